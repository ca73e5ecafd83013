// Lifecycle of the animated particle background: sizing the surface to the
// viewport, running one field frame per display refresh, following resizes
// and stopping on request.

use crate::config::FieldConfig;
use crate::field::ParticleField;
use crate::logging;
use crate::particle::Particle;
use crate::scheduler::FrameScheduler;
use crate::surface::Surface;
use crate::viewport::Viewport;
use rand::Rng;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

struct State<S, V: Viewport, F: FrameScheduler> {
    field: ParticleField,
    surface: S,
    viewport: V,
    scheduler: F,
    pending: Option<F::Handle>,
    running: bool,
}

impl<S, V: Viewport, F: FrameScheduler> Drop for State<S, V, F> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.viewport.unsubscribe();
    }
}

/// Owns the particle field and drives it.
///
/// Scheduled frames and the resize listener only hold weak references, so
/// dropping the background also ends the animation.
pub struct ParticleBackground<S, V: Viewport, F: FrameScheduler> {
    state: Rc<RefCell<State<S, V, F>>>,
}

impl<S, V, F> ParticleBackground<S, V, F>
where
    S: Surface + 'static,
    V: Viewport + 'static,
    F: FrameScheduler + 'static,
{
    /// Sizes the surface to the viewport and seeds the particles, without
    /// starting the animation.
    pub fn new<R: Rng + ?Sized>(
        mut surface: S,
        viewport: V,
        scheduler: F,
        rng: &mut R,
        config: FieldConfig,
    ) -> Self {
        let (viewport_width, viewport_height) = viewport.size();
        surface.set_size(viewport_width, viewport_height);
        let (width, height) = surface.size();
        let field = ParticleField::seeded(rng, viewport_width, width, height, config);
        logging::log(&format!(
            "particle background: {} particles on {}x{}",
            field.len(),
            width,
            height
        ));

        ParticleBackground {
            state: Rc::new(RefCell::new(State {
                field,
                surface,
                viewport,
                scheduler,
                pending: None,
                running: false,
            })),
        }
    }

    /// `new` followed by `start`.
    pub fn init<R: Rng + ?Sized>(
        surface: S,
        viewport: V,
        scheduler: F,
        rng: &mut R,
        config: FieldConfig,
    ) -> Result<Self, String> {
        let background = ParticleBackground::new(surface, viewport, scheduler, rng, config);
        background.start()?;
        Ok(background)
    }

    /// Starts following viewport resizes and schedules the first frame.
    /// Does nothing if already running.
    pub fn start(&self) -> Result<(), String> {
        {
            let mut state = self.state.borrow_mut();
            if state.running {
                return Ok(());
            }
            let weak = Rc::downgrade(&self.state);
            state.viewport.subscribe(Box::new(move || {
                if let Some(state) = weak.upgrade() {
                    resize_surface(&state);
                }
            }))?;
            state.running = true;
        }
        request_next_frame(&self.state)
    }

    /// Matches the surface to the viewport again. Particles are left alone;
    /// any that end up outside are wrapped back on the next frame.
    pub fn resize(&self) {
        resize_surface(&self.state);
    }

    /// Cancels the pending frame and stops following resizes. Safe to call
    /// any number of times.
    pub fn destroy(&self) {
        let mut state = self.state.borrow_mut();
        state.running = false;
        if let Some(handle) = state.pending.take() {
            state.scheduler.cancel_frame(handle);
        }
        state.viewport.unsubscribe();
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().running
    }

    pub fn has_pending_frame(&self) -> bool {
        self.state.borrow().pending.is_some()
    }

    pub fn particle_count(&self) -> usize {
        self.state.borrow().field.len()
    }

    pub fn particles(&self) -> Vec<Particle> {
        self.state.borrow().field.particles().to_vec()
    }

    pub fn surface_size(&self) -> (f64, f64) {
        self.state.borrow().surface.size()
    }
}

fn resize_surface<S: Surface, V: Viewport, F: FrameScheduler>(state: &RefCell<State<S, V, F>>) {
    let mut state = state.borrow_mut();
    let (width, height) = state.viewport.size();
    state.surface.set_size(width, height);
}

fn request_next_frame<S, V, F>(state: &Rc<RefCell<State<S, V, F>>>) -> Result<(), String>
where
    S: Surface + 'static,
    V: Viewport + 'static,
    F: FrameScheduler + 'static,
{
    let weak: Weak<RefCell<State<S, V, F>>> = Rc::downgrade(state);
    let mut guard = state.borrow_mut();
    let requested = guard.scheduler.request_frame(Box::new(move || {
        if let Some(state) = weak.upgrade() {
            run_frame(&state);
        }
    }));
    match requested {
        Ok(handle) => {
            guard.pending = Some(handle);
            Ok(())
        }
        Err(err) => {
            guard.running = false;
            guard.viewport.unsubscribe();
            Err(err)
        }
    }
}

fn run_frame<S, V, F>(state: &Rc<RefCell<State<S, V, F>>>)
where
    S: Surface + 'static,
    V: Viewport + 'static,
    F: FrameScheduler + 'static,
{
    {
        let mut guard = state.borrow_mut();
        guard.pending = None;
        if !guard.running {
            return;
        }
        let State { field, surface, .. } = &mut *guard;
        field.frame(surface);
    }
    if let Err(err) = request_next_frame(state) {
        logging::error(&format!("particle background stopped: {}", err));
    }
}
