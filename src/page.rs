// The smaller page behaviours (info panel, anchor scrolling, reveal-on-scroll,
// low-end tweaks, lazy images, visibility) and `Page`, which mounts
// everything including the particle background.

use crate::background::ParticleBackground;
use crate::config::FieldConfig;
use crate::dom;
use crate::logging;
use crate::scheduler::AnimationFrameScheduler;
use crate::surface::Canvas2dSurface;
use crate::theme;
use crate::tilt;
use crate::utils;
use crate::viewport::WindowViewport;
use js_sys::{Array, Reflect};
use std::cell::Cell;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollToOptions, Window,
};

pub const PARTICLE_CANVAS_ID: &str = "particleCanvas";
pub const REVEAL_SELECTOR: &str = ".feature-card, .download-card, .step-card";
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

pub type BrowserBackground = ParticleBackground<Canvas2dSurface, WindowViewport, AnimationFrameScheduler>;

// Where to scroll so `target` sits just below the fixed header
pub fn scroll_target(target_offset_top: f64, header_height: f64) -> f64 {
    target_offset_top - header_height
}

/// Few cores, little memory, or the user asked for less motion. Values the
/// browser does not report never count as low-end.
pub fn is_low_end(hardware_concurrency: Option<f64>, device_memory: Option<f64>, prefers_reduced_motion: bool) -> bool {
    hardware_concurrency.map_or(false, |cores| cores <= 2.0)
        || device_memory.map_or(false, |gigabytes| gigabytes <= 2.0)
        || prefers_reduced_motion
}

fn add_class(element: &Element, class: &str) {
    if let Err(err) = element.class_list().add_1(class) {
        logging::warn(&format!("could not add class `{}`: {}", class, dom::describe(&err)));
    }
}

fn remove_class(element: &Element, class: &str) {
    if let Err(err) = element.class_list().remove_1(class) {
        logging::warn(&format!("could not remove class `{}`: {}", class, dom::describe(&err)));
    }
}

// `#infoToggle` opens and closes `#infoContent`
pub fn install_info_toggle(document: &Document) -> Result<bool, JsValue> {
    let (toggle, content) = match (
        document.get_element_by_id("infoToggle"),
        document.get_element_by_id("infoContent"),
    ) {
        (Some(toggle), Some(content)) => (toggle, content),
        _ => return Ok(false),
    };

    // Starts closed whatever the markup says, so the first click opens it
    let is_open = Cell::new(false);
    let on_click = Closure::wrap(Box::new(move || {
        is_open.set(!is_open.get());
        if let Err(err) = content.class_list().toggle_with_force("show", is_open.get()) {
            logging::warn(&format!("could not toggle info: {}", dom::describe(&err)));
        }
    }) as Box<dyn FnMut()>);
    toggle.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(true)
}

fn scroll_to_anchor(window: &Window, document: &Document, href: &str) {
    // An href that is not a valid selector (e.g. a bare "#") has no target
    let target = match document.query_selector(href) {
        Ok(Some(target)) => target,
        _ => return,
    };
    let target = match target.dyn_into::<HtmlElement>() {
        Ok(target) => target,
        Err(_) => return,
    };
    let header_height = document
        .query_selector(".header")
        .ok()
        .flatten()
        .and_then(|header| header.dyn_into::<HtmlElement>().ok())
        .map_or(0.0, |header| header.offset_height() as f64);

    let options = ScrollToOptions::new();
    options.set_top(scroll_target(target.offset_top() as f64, header_height));
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

// In-page links scroll smoothly instead of jumping. Returns the number of
// links handled.
pub fn install_smooth_scroll(window: &Window, document: &Document) -> Result<usize, JsValue> {
    let anchors = dom::query_all(document, "a[href^=\"#\"]")?;
    let count = anchors.len();
    for anchor in anchors {
        let on_click = {
            let window = window.clone();
            let document = document.clone();
            let anchor = anchor.clone();
            Closure::wrap(Box::new(move |event: Event| {
                event.prevent_default();
                if let Some(href) = anchor.get_attribute("href") {
                    scroll_to_anchor(&window, &document, &href);
                }
            }) as Box<dyn FnMut(_)>)
        };
        anchor.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(count)
}

fn intersecting_targets(entries: &Array) -> Vec<Element> {
    entries
        .iter()
        .map(|entry| entry.unchecked_into::<IntersectionObserverEntry>())
        .filter(|entry| entry.is_intersecting())
        .map(|entry| entry.target())
        .collect()
}

// Cards get `animate-in` once they scroll into view
pub fn install_scroll_reveal(document: &Document) -> Result<IntersectionObserver, JsValue> {
    let on_intersect = Closure::wrap(Box::new(move |entries: Array, _observer: IntersectionObserver| {
        for target in intersecting_targets(&entries) {
            add_class(&target, "animate-in");
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    options.set_root_margin(REVEAL_ROOT_MARGIN);
    let observer = IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &options)?;
    on_intersect.forget();

    for element in dom::query_all(document, REVEAL_SELECTOR)? {
        observer.observe(&element);
    }
    Ok(observer)
}

// Moves `data-src` into `src`
pub fn load_image(image: &Element) {
    if let Some(src) = image.get_attribute("data-src") {
        if let Err(err) = image.set_attribute("src", &src) {
            logging::warn(&format!("could not load {}: {}", src, dom::describe(&err)));
        }
    }
    remove_class(image, "lazy");
}

// `img[data-src]` loads when it nears the viewport, or right away in
// browsers without IntersectionObserver.
pub fn install_lazy_images(window: &Window, document: &Document) -> Result<Option<IntersectionObserver>, JsValue> {
    let images = dom::query_all(document, "img[data-src]")?;

    if !Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false) {
        images.iter().for_each(load_image);
        return Ok(None);
    }
    observe_lazy_images(&images).map(Some)
}

fn observe_lazy_images(images: &[Element]) -> Result<IntersectionObserver, JsValue> {
    let on_intersect = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for image in intersecting_targets(&entries) {
            load_image(&image);
            observer.unobserve(&image);
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);
    let observer = IntersectionObserver::new(on_intersect.as_ref().unchecked_ref())?;
    on_intersect.forget();

    for image in images {
        observer.observe(image);
    }
    Ok(observer)
}

// Adds `reduced-motion` to the body on low-end devices. Returns whether it did.
pub fn apply_performance_hints(window: &Window, document: &Document) -> Result<bool, JsValue> {
    let navigator = window.navigator();
    let device_memory = Reflect::get(&navigator, &JsValue::from_str("deviceMemory"))
        .ok()
        .and_then(|memory| memory.as_f64());
    let low_end = is_low_end(
        Some(navigator.hardware_concurrency()),
        device_memory,
        dom::media_matches(window, "(prefers-reduced-motion: reduce)"),
    );
    if low_end {
        add_class(&*dom::body(document)?, "reduced-motion");
    }
    Ok(low_end)
}

// `paused` on the body while the tab is hidden
pub fn install_visibility_handler(document: &Document) -> Result<(), JsValue> {
    let on_change = {
        let document = document.clone();
        Closure::wrap(Box::new(move || {
            if let Some(body) = document.body() {
                if document.hidden() {
                    add_class(&body, "paused");
                } else {
                    remove_class(&body, "paused");
                }
            }
        }) as Box<dyn FnMut()>)
    };
    document.add_event_listener_with_callback("visibilitychange", on_change.as_ref().unchecked_ref())?;
    on_change.forget();
    Ok(())
}

// Uncaught errors and rejected promises end up in the console
pub fn install_error_reporting(window: &Window) -> Result<(), JsValue> {
    for &(event_name, field, label) in [
        ("error", "error", "JavaScript error"),
        ("unhandledrejection", "reason", "Unhandled promise rejection"),
    ]
    .iter()
    {
        let on_event = Closure::wrap(Box::new(move |event: Event| {
            let detail = Reflect::get(&event, &JsValue::from_str(field)).unwrap_or(JsValue::UNDEFINED);
            logging::error(&format!("{}: {}", label, dom::describe(&detail)));
        }) as Box<dyn FnMut(_)>);
        window.add_event_listener_with_callback(event_name, on_event.as_ref().unchecked_ref())?;
        on_event.forget();
    }
    Ok(())
}

/// Everything the marketing page runs, mounted once the DOM is ready.
#[wasm_bindgen]
pub struct Page {
    background: Option<BrowserBackground>,
    observers: Vec<IntersectionObserver>,
}

#[wasm_bindgen]
impl Page {
    /// Mounts the particle background on `#particleCanvas` along with the
    /// tilt, theme and scrolling behaviours, then marks the body `loaded`.
    pub fn mount() -> Result<Page, JsValue> {
        utils::set_panic_hook();
        let window = dom::window()?;
        let document = dom::document()?;

        // These hold for the whole page even if mounting fails further down
        install_error_reporting(&window)?;
        install_visibility_handler(&document)?;

        let background = ParticleBackground::init(
            Canvas2dSurface::from_element_id(PARTICLE_CANVAS_ID)?,
            WindowViewport::new()?,
            AnimationFrameScheduler::new()?,
            &mut rand::thread_rng(),
            FieldConfig::default(),
        )?;

        tilt::install_hero_logo(&document)?;
        tilt::install_feature_cards(&document)?;
        theme::install(&window, &document)?;
        install_info_toggle(&document)?;
        install_smooth_scroll(&window, &document)?;

        let mut observers = vec![install_scroll_reveal(&document)?];
        apply_performance_hints(&window, &document)?;
        observers.extend(install_lazy_images(&window, &document)?);

        add_class(&*dom::body(&document)?, "loaded");
        logging::log("page mounted");

        Ok(Page {
            background: Some(background),
            observers,
        })
    }

    /// Stops the particle background for good.
    pub fn destroy(&mut self) {
        if let Some(background) = self.background.take() {
            background.destroy();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> usize {
        self.background.as_ref().map_or(0, |background| background.particle_count())
    }

    #[wasm_bindgen(getter)]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}
