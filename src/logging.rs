// Console logging. Off wasm32 (native unit tests) there is no console to
// talk to, so everything here quietly does nothing.

#[cfg(target_arch = "wasm32")]
mod imp {
    use web_sys::console;

    pub fn log(msg: &str) {
        console::log_1(&msg.into());
    }

    pub fn warn(msg: &str) {
        console::warn_1(&msg.into());
    }

    pub fn error(msg: &str) {
        console::error_1(&msg.into());
    }

    pub fn time(label: &str) {
        if cfg!(feature = "frame-timing") {
            console::time_with_label(label);
        }
    }

    pub fn time_end(label: &str) {
        if cfg!(feature = "frame-timing") {
            console::time_end_with_label(label);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    pub fn log(_msg: &str) {}
    pub fn warn(_msg: &str) {}
    pub fn error(_msg: &str) {}
    pub fn time(_label: &str) {}
    pub fn time_end(_label: &str) {}
}

pub use imp::{error, log, warn};

/// Times the enclosing scope with `console.time` / `console.timeEnd`.
///
/// Only active with the `frame-timing` feature, since the per-frame
/// labels flood the console otherwise.
pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        imp::time(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        imp::time_end(self.name);
    }
}
