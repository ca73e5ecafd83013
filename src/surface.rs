// Drawing surface the particle field renders onto, plus the canvas-backed
// implementation used in the browser.

use crate::color::Color;
use crate::dom;
use crate::logging;
use std::f64::consts::PI;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// A 2D immediate-mode drawing target.
///
/// Alpha is passed with every draw call rather than baked into the color,
/// since every particle and every link has its own.
pub trait Surface {
    fn size(&self) -> (f64, f64);
    fn set_size(&mut self, width: f64, height: f64);
    fn clear(&mut self);
    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color, alpha: f64);
    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, alpha: f64, width: f64);
}

pub struct Canvas2dSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl Canvas2dSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or("canvas has no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Canvas2dSurface { canvas, context })
    }

    // Looks up `<canvas id="...">` in the current document
    pub fn from_element_id(id: &str) -> Result<Self, JsValue> {
        let canvas = dom::document()?
            .get_element_by_id(id)
            .ok_or_else(|| format!("no element with id `{}`", id))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| format!("`#{}` is not a canvas", id))?;
        Canvas2dSurface::new(canvas)
    }
}

impl Surface for Canvas2dSurface {
    fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    // Canvas dimensions are whole pixels
    fn set_size(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
    }

    fn clear(&mut self) {
        let (width, height) = self.size();
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color, alpha: f64) {
        self.context.begin_path();
        if let Err(err) = self.context.arc(center[0], center[1], radius, 0.0, PI * 2.0) {
            logging::warn(&format!("arc failed: {}", dom::describe(&err)));
            return;
        }
        self.context.set_fill_style_str(&color.to_rgba(alpha));
        self.context.fill();
    }

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, alpha: f64, width: f64) {
        self.context.begin_path();
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.set_stroke_style_str(&color.to_rgba(alpha));
        self.context.set_line_width(width);
        self.context.stroke();
    }
}
