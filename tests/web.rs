//! Browser tests for the DOM-backed pieces. Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;

use particle_page::page::{self, Page};
use particle_page::theme::{self, Theme};
use particle_page::tilt::{self, Tilt};
use particle_page::{
    AnimationFrameScheduler, Canvas2dSurface, FieldConfig, ParticleBackground, Surface, Viewport,
    WindowViewport,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlCanvasElement, HtmlElement, MouseEvent};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn body() -> HtmlElement {
    document().body().unwrap()
}

// Appends a fresh `<tag>` to the body
fn element(tag: &str, id: &str, class: &str) -> Element {
    let element = document().create_element(tag).unwrap();
    if !id.is_empty() {
        element.set_id(id);
    }
    element.set_class_name(class);
    body().append_child(&element).unwrap();
    element
}

fn remove_by_id(id: &str) {
    while let Some(element) = document().get_element_by_id(id) {
        element.remove();
    }
}

fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

fn dispatch(target: &EventTarget, name: &str) {
    target.dispatch_event(&Event::new(name).unwrap()).unwrap();
}

fn transform_of(element: &Element) -> String {
    element
        .dyn_ref::<HtmlElement>()
        .unwrap()
        .style()
        .get_property_value("transform")
        .unwrap()
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn canvas_with_id(id: &str) -> HtmlCanvasElement {
    element("canvas", id, "").dyn_into::<HtmlCanvasElement>().unwrap()
}

#[wasm_bindgen_test]
fn canvas_surface_truncates_to_whole_pixels() {
    let mut surface = Canvas2dSurface::new(canvas_with_id("surface-size")).unwrap();
    surface.set_size(320.7, 200.2);
    assert_eq!(surface.size(), (320.0, 200.0));
    surface.clear();
    surface.fill_circle([10.0, 10.0], 2.0, FieldConfig::DEFAULT_COLOR, 0.5);
    surface.stroke_line([0.0, 0.0], [20.0, 20.0], FieldConfig::DEFAULT_COLOR, 0.1, 0.5);
    remove_by_id("surface-size");
}

#[wasm_bindgen_test]
fn missing_canvas_is_an_error() {
    assert!(Canvas2dSurface::from_element_id("no-such-canvas").is_err());
}

#[wasm_bindgen_test]
fn background_fills_the_window_and_stops() {
    canvas_with_id("particle-test");
    let viewport = WindowViewport::new().unwrap();
    let (width, height) = viewport.size();

    let background = ParticleBackground::init(
        Canvas2dSurface::from_element_id("particle-test").unwrap(),
        viewport,
        AnimationFrameScheduler::new().unwrap(),
        &mut StdRng::seed_from_u64(1),
        FieldConfig::default(),
    )
    .unwrap();

    assert_eq!(background.surface_size(), (width.floor(), height.floor()));
    assert_eq!(background.particle_count(), FieldConfig::default().particle_count(width));
    assert!(background.has_pending_frame());

    background.destroy();
    assert!(!background.has_pending_frame());
    assert!(!background.is_running());
    remove_by_id("particle-test");
}

#[wasm_bindgen_test]
fn unsubscribed_viewport_stops_hearing_resizes() {
    let window = web_sys::window().unwrap();
    let heard = Rc::new(Cell::new(0));
    let mut viewport = WindowViewport::new().unwrap();
    {
        let heard = heard.clone();
        viewport
            .subscribe(Box::new(move || heard.set(heard.get() + 1)))
            .unwrap();
    }

    dispatch(&window, "resize");
    assert_eq!(heard.get(), 1);

    viewport.unsubscribe();
    viewport.unsubscribe();
    dispatch(&window, "resize");
    assert_eq!(heard.get(), 1);
}

#[wasm_bindgen_test]
fn info_panel_starts_closed_regardless_of_markup() {
    let toggle = element("button", "infoToggle", "");
    let content = element("div", "infoContent", "show");
    assert!(page::install_info_toggle(&document()).unwrap());

    dispatch(&toggle, "click");
    assert!(has_class(&content, "show"));
    dispatch(&toggle, "click");
    assert!(!has_class(&content, "show"));
    dispatch(&toggle, "click");
    assert!(has_class(&content, "show"));

    remove_by_id("infoToggle");
    remove_by_id("infoContent");
}

#[wasm_bindgen_test]
fn info_panel_needs_both_elements() {
    remove_by_id("infoToggle");
    remove_by_id("infoContent");
    element("button", "infoToggle", "");
    assert!(!page::install_info_toggle(&document()).unwrap());
    remove_by_id("infoToggle");
}

#[wasm_bindgen_test]
fn theme_switcher_restores_and_toggles_saved_theme() {
    let window = web_sys::window().unwrap();
    let storage = window.local_storage().unwrap().unwrap();
    storage.set_item(theme::STORAGE_KEY, "dark").unwrap();

    let button = element("button", "themeSwitcher", "");
    let icon = document().create_element("span").unwrap();
    icon.set_class_name("theme-icon");
    button.append_child(&icon).unwrap();

    assert!(theme::install(&window, &document()).unwrap());
    assert!(has_class(&body(), theme::DARK_CLASS));
    assert_eq!(icon.text_content().as_deref(), Some(Theme::Dark.icon()));

    button.dyn_ref::<HtmlElement>().unwrap().click();
    assert!(!has_class(&body(), theme::DARK_CLASS));
    assert_eq!(icon.text_content().as_deref(), Some("🌙"));
    assert_eq!(storage.get_item(theme::STORAGE_KEY).unwrap().as_deref(), Some("light"));

    button.dyn_ref::<HtmlElement>().unwrap().click();
    assert!(has_class(&body(), theme::DARK_CLASS));
    assert_eq!(icon.text_content().as_deref(), Some("☀️"));
    assert_eq!(storage.get_item(theme::STORAGE_KEY).unwrap().as_deref(), Some("dark"));

    remove_by_id("themeSwitcher");
    storage.remove_item(theme::STORAGE_KEY).unwrap();
    body().class_list().remove_1(theme::DARK_CLASS).unwrap();
}

#[wasm_bindgen_test]
fn card_tilts_on_move_and_flattens_on_leave() {
    let card = element("div", "tilt-card", "feature-card");
    assert!(tilt::install_feature_cards(&document()).unwrap() >= 1);

    card.dispatch_event(&MouseEvent::new("mousemove").unwrap()).unwrap();
    assert!(transform_of(&card).contains("translateZ(20px)"));

    dispatch(&card, "mouseleave");
    assert_eq!(transform_of(&card), Tilt::flat().to_css());
    assert_eq!(
        transform_of(&card),
        "perspective(1000px) rotateX(0deg) rotateY(0deg) translateZ(0px)"
    );

    remove_by_id("tilt-card");
}

#[wasm_bindgen_test]
fn lazy_image_loads_directly_without_observer() {
    let image = element("img", "lazy-direct", "lazy");
    image.set_attribute("data-src", "data:image/gif;base64,R0lGODlhAQABAAAAACw=").unwrap();

    page::load_image(&image);
    assert_eq!(image.get_attribute("src"), image.get_attribute("data-src"));
    assert!(!has_class(&image, "lazy"));

    remove_by_id("lazy-direct");
}

#[wasm_bindgen_test]
async fn lazy_image_loads_once_visible() {
    let image = element("img", "lazy-observed", "lazy");
    image.set_attribute("data-src", "data:image/gif;base64,R0lGODlhAQABAAAAACw=").unwrap();
    image
        .set_attribute("style", "position: fixed; top: 0; left: 0; width: 10px; height: 10px;")
        .unwrap();

    let window = web_sys::window().unwrap();
    let observer = page::install_lazy_images(&window, &document()).unwrap();
    assert!(observer.is_some());
    sleep(200).await;

    assert_eq!(image.get_attribute("src"), image.get_attribute("data-src"));
    assert!(!has_class(&image, "lazy"));
    remove_by_id("lazy-observed");
}

#[wasm_bindgen_test]
fn page_level_handlers_survive_a_missing_canvas() {
    remove_by_id(page::PARTICLE_CANVAS_ID);
    assert!(Page::mount().is_err());

    body().class_list().add_1("paused").unwrap();
    dispatch(&document(), "visibilitychange");
    assert!(!document().hidden());
    assert!(!has_class(&body(), "paused"));
}

#[wasm_bindgen_test]
fn mounted_page_is_marked_loaded() {
    remove_by_id(page::PARTICLE_CANVAS_ID);
    canvas_with_id(page::PARTICLE_CANVAS_ID);
    body().class_list().remove_1("loaded").unwrap();

    let mut mounted = Page::mount().unwrap();
    assert!(has_class(&body(), "loaded"));
    let (width, _) = WindowViewport::new().unwrap().size();
    assert_eq!(mounted.particle_count(), FieldConfig::default().particle_count(width));

    mounted.destroy();
    mounted.destroy();
    assert_eq!(mounted.particle_count(), 0);
    remove_by_id(page::PARTICLE_CANVAS_ID);
}
