// Display-synchronized callback scheduling.

use crate::dom;
use crate::logging;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Window;

pub type FrameCallback = Box<dyn FnOnce()>;

/// Runs a callback once, on the next display refresh.
pub trait FrameScheduler {
    type Handle: Copy;

    fn request_frame(&mut self, callback: FrameCallback) -> Result<Self::Handle, String>;

    /// Cancelling a handle that already fired is a no-op.
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// `requestAnimationFrame` / `cancelAnimationFrame` on the window.
///
/// The closure for the requested frame is owned here. The one before it is
/// kept for one more request, since the next frame is requested from inside
/// that closure while it is still running.
pub struct AnimationFrameScheduler {
    window: Window,
    pending: Option<(i32, Closure<dyn FnMut()>)>,
    retired: Option<Closure<dyn FnMut()>>,
}

impl AnimationFrameScheduler {
    pub fn new() -> Result<Self, JsValue> {
        Ok(AnimationFrameScheduler {
            window: dom::window()?,
            pending: None,
            retired: None,
        })
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    type Handle = i32;

    fn request_frame(&mut self, callback: FrameCallback) -> Result<i32, String> {
        let closure: Closure<dyn FnMut()> = Closure::once(move || callback());
        let handle = self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .map_err(|err| dom::describe(&err))?;
        self.retired = self.pending.take().map(|(_, closure)| closure);
        self.pending = Some((handle, closure));
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Err(err) = self.window.cancel_animation_frame(handle) {
            logging::warn(&format!(
                "cancelAnimationFrame({}) failed: {}",
                handle,
                dom::describe(&err)
            ));
        }
        if matches!(self.pending, Some((pending, _)) if pending == handle) {
            self.pending = None;
        }
        self.retired = None;
    }
}
