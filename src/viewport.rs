// Viewport size queries and resize notifications.

use crate::dom;
use crate::logging;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Window;

pub type ResizeListener = Box<dyn FnMut()>;

pub trait Viewport {
    /// Current width and height, in the same units as the surface.
    fn size(&self) -> (f64, f64);

    /// Installs the single resize listener, replacing any previous one.
    fn subscribe(&mut self, listener: ResizeListener) -> Result<(), String>;

    fn unsubscribe(&mut self);
}

pub struct WindowViewport {
    window: Window,
    listener: Option<Closure<dyn FnMut()>>,
}

impl WindowViewport {
    pub fn new() -> Result<Self, JsValue> {
        Ok(WindowViewport {
            window: dom::window()?,
            listener: None,
        })
    }
}

impl Viewport for WindowViewport {
    fn size(&self) -> (f64, f64) {
        let width = self.window.inner_width().ok().and_then(|w| w.as_f64());
        let height = self.window.inner_height().ok().and_then(|h| h.as_f64());
        (width.unwrap_or(0.0), height.unwrap_or(0.0))
    }

    fn subscribe(&mut self, listener: ResizeListener) -> Result<(), String> {
        self.unsubscribe();
        let closure = Closure::wrap(listener);
        self.window
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
            .map_err(|err| dom::describe(&err))?;
        self.listener = Some(closure);
        Ok(())
    }

    fn unsubscribe(&mut self) {
        if let Some(closure) = self.listener.take() {
            if let Err(err) = self
                .window
                .remove_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
            {
                logging::warn(&format!("could not remove resize listener: {}", dom::describe(&err)));
            }
        }
    }
}

impl Drop for WindowViewport {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
