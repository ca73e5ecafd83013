// Mouse-driven 3D tilt for the hero logo and the feature cards.

use crate::dom;
use crate::logging;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, MouseEvent};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn of(element: &Element) -> Rect {
        let rect = element.get_bounding_client_rect();
        Rect {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        }
    }

    pub fn center(&self) -> [f64; 2] {
        [self.left + self.width / 2.0, self.top + self.height / 2.0]
    }
}

/// Rotation in degrees about the x and y axes, plus a lift toward the
/// viewer in pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub translate_z: f64,
}

impl Tilt {
    pub const PERSPECTIVE: f64 = 1000.0;

    pub fn flat() -> Tilt {
        Tilt {
            rotate_x: 0.0,
            rotate_y: 0.0,
            translate_z: 0.0,
        }
    }

    /// Leans `rect` toward `pointer`. A larger `divisor` gives a gentler
    /// tilt for the same pointer offset.
    pub fn toward(rect: &Rect, pointer: [f64; 2], divisor: f64, lift: f64) -> Tilt {
        let [center_x, center_y] = rect.center();
        let delta_x = (pointer[0] - center_x) / divisor;
        let delta_y = (pointer[1] - center_y) / divisor;
        Tilt {
            rotate_x: -delta_y,
            rotate_y: delta_x,
            translate_z: lift,
        }
    }

    pub fn to_css(&self) -> String {
        // + 0.0 turns -0 into 0
        format!(
            "perspective({}px) rotateX({}deg) rotateY({}deg) translateZ({}px)",
            Tilt::PERSPECTIVE,
            self.rotate_x + 0.0,
            self.rotate_y + 0.0,
            self.translate_z + 0.0
        )
    }
}

pub struct TiltStyle {
    pub divisor: f64,
    pub lift: f64,
}

pub const HERO_LOGO: TiltStyle = TiltStyle {
    divisor: 20.0,
    lift: 50.0,
};

pub const FEATURE_CARD: TiltStyle = TiltStyle {
    divisor: 30.0,
    lift: 20.0,
};

fn apply(element: &HtmlElement, tilt: &Tilt) {
    if let Err(err) = element.style().set_property("transform", &tilt.to_css()) {
        logging::warn(&format!("could not set transform: {}", dom::describe(&err)));
    }
}

fn pointer_of(event: &MouseEvent) -> [f64; 2] {
    [event.client_x() as f64, event.client_y() as f64]
}

// Tilts `#heroLogo` toward the pointer anywhere on the page. Returns false
// when the page has no logo.
pub fn install_hero_logo(document: &Document) -> Result<bool, JsValue> {
    let logo = match document.get_element_by_id("heroLogo") {
        Some(element) => element.dyn_into::<HtmlElement>()?,
        None => return Ok(false),
    };

    let on_move = Closure::wrap(Box::new(move |event: MouseEvent| {
        let tilt = Tilt::toward(&Rect::of(&logo), pointer_of(&event), HERO_LOGO.divisor, HERO_LOGO.lift);
        apply(&logo, &tilt);
    }) as Box<dyn FnMut(_)>);
    document.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
    on_move.forget();
    Ok(true)
}

// Tilts each `.feature-card` while the pointer is over it and flattens it
// again on leave. Returns how many cards were wired up.
pub fn install_feature_cards(document: &Document) -> Result<usize, JsValue> {
    let cards = dom::query_all(document, ".feature-card")?;
    let mut installed = 0;
    for card in cards {
        let card = match card.dyn_into::<HtmlElement>() {
            Ok(card) => card,
            Err(_) => continue,
        };

        let on_move = {
            let card = card.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                let tilt = Tilt::toward(
                    &Rect::of(&card),
                    pointer_of(&event),
                    FEATURE_CARD.divisor,
                    FEATURE_CARD.lift,
                );
                apply(&card, &tilt);
            }) as Box<dyn FnMut(_)>)
        };
        let on_leave = {
            let card = card.clone();
            Closure::wrap(Box::new(move || apply(&card, &Tilt::flat())) as Box<dyn FnMut()>)
        };

        card.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
        card.add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref())?;
        on_move.forget();
        on_leave.forget();
        installed += 1;
    }
    Ok(installed)
}
