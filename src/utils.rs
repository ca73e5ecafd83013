pub fn set_panic_hook() {
    // Panics show up in the browser console with a message and stack
    // instead of a bare `unreachable` trap.
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
