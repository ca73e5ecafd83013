//! Front-end behaviour for the marketing page: an animated particle-field
//! background plus the small interactive touches around it (tilting logo
//! and cards, theme switch, info panel, smooth scrolling, reveal on scroll).
//!
//! The particle field itself only talks to the [`Surface`], [`Viewport`]
//! and [`FrameScheduler`] traits, so it runs (and is tested) without a
//! browser. [`Page`] wires everything to the real DOM.

mod dom;
mod utils;

pub mod background;
pub mod color;
pub mod config;
pub mod field;
pub mod logging;
pub mod page;
pub mod particle;
pub mod scheduler;
pub mod surface;
pub mod theme;
pub mod tilt;
pub mod viewport;

#[cfg(test)]
mod testing;

use wasm_bindgen::prelude::*;

pub use background::ParticleBackground;
pub use color::Color;
pub use config::FieldConfig;
pub use field::ParticleField;
pub use page::Page;
pub use particle::Particle;
pub use scheduler::{AnimationFrameScheduler, FrameScheduler};
pub use surface::{Canvas2dSurface, Surface};
pub use viewport::{Viewport, WindowViewport};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}
