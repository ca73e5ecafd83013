// In-memory stand-ins for the browser, for native unit tests.

use crate::color::Color;
use crate::scheduler::{FrameCallback, FrameScheduler};
use crate::surface::Surface;
use crate::viewport::{ResizeListener, Viewport};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear,
    Circle {
        center: [f64; 2],
        radius: f64,
        color: Color,
        alpha: f64,
    },
    Line {
        from: [f64; 2],
        to: [f64; 2],
        color: Color,
        alpha: f64,
        width: f64,
    },
}

#[derive(Default)]
pub struct RecordingSurface {
    pub width: f64,
    pub height: f64,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        RecordingSurface {
            width,
            height,
            calls: Vec::new(),
        }
    }

    pub fn lines(&self) -> Vec<([f64; 2], [f64; 2], f64)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Line { from, to, alpha, .. } => Some((*from, *to, *alpha)),
                _ => None,
            })
            .collect()
    }

    pub fn circle_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Circle { .. }))
            .count()
    }

    pub fn clear_count(&self) -> usize {
        self.calls.iter().filter(|call| **call == DrawCall::Clear).count()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color, alpha: f64) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            color,
            alpha,
        });
    }

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, alpha: f64, width: f64) {
        self.calls.push(DrawCall::Line {
            from,
            to,
            color,
            alpha,
            width,
        });
    }
}

/// Frames only run when the test says so. Clones share one queue.
#[derive(Clone)]
pub struct ManualScheduler {
    queue: Rc<RefCell<VecDeque<(u32, FrameCallback)>>>,
    next_id: Rc<Cell<u32>>,
    honor_cancel: bool,
}

impl ManualScheduler {
    pub fn new() -> Self {
        ManualScheduler {
            queue: Rc::new(RefCell::new(VecDeque::new())),
            next_id: Rc::new(Cell::new(1)),
            honor_cancel: true,
        }
    }

    // Lets cancelled callbacks fire anyway, like a frame already in flight
    pub fn ignoring_cancel() -> Self {
        ManualScheduler {
            honor_cancel: false,
            ..ManualScheduler::new()
        }
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn fire_next(&self) -> bool {
        let next = self.queue.borrow_mut().pop_front();
        match next {
            Some((_, callback)) => {
                callback();
                true
            }
            None => false,
        }
    }

    pub fn fire(&self, frames: usize) {
        for _ in 0..frames {
            assert!(self.fire_next(), "no frame was scheduled");
        }
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u32;

    fn request_frame(&mut self, callback: FrameCallback) -> Result<u32, String> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.queue.borrow_mut().push_back((id, callback));
        Ok(id)
    }

    fn cancel_frame(&mut self, handle: u32) {
        if self.honor_cancel {
            self.queue.borrow_mut().retain(|(id, _)| *id != handle);
        }
    }
}

/// Refuses every frame request.
pub struct FailingScheduler;

impl FrameScheduler for FailingScheduler {
    type Handle = ();

    fn request_frame(&mut self, _callback: FrameCallback) -> Result<(), String> {
        Err("no display".to_string())
    }

    fn cancel_frame(&mut self, _handle: ()) {}
}

#[derive(Clone)]
pub struct FakeViewport {
    size: Rc<Cell<(f64, f64)>>,
    listener: Rc<RefCell<Option<ResizeListener>>>,
}

impl FakeViewport {
    pub fn new(width: f64, height: f64) -> Self {
        FakeViewport {
            size: Rc::new(Cell::new((width, height))),
            listener: Rc::new(RefCell::new(None)),
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.listener.borrow().is_some()
    }

    // Changes the size and notifies the listener, if any
    pub fn resize_to(&self, width: f64, height: f64) {
        self.size.set((width, height));
        if let Some(listener) = self.listener.borrow_mut().as_mut() {
            listener();
        }
    }
}

impl Viewport for FakeViewport {
    fn size(&self) -> (f64, f64) {
        self.size.get()
    }

    fn subscribe(&mut self, listener: ResizeListener) -> Result<(), String> {
        *self.listener.borrow_mut() = Some(listener);
        Ok(())
    }

    fn unsubscribe(&mut self) {
        self.listener.borrow_mut().take();
    }
}
