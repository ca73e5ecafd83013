// Light/dark theme toggle, remembered across visits.

use crate::dom;
use crate::logging;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Storage, Window};

pub const STORAGE_KEY: &str = "theme";
pub const DARK_CLASS: &str = "dark";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn key(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    // The icon offers the other theme
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Dark when dark was saved, or nothing was saved and the system
    /// prefers dark. Anything else saved means light.
    pub fn resolve(saved: Option<&str>, prefers_dark: bool) -> Theme {
        match saved {
            Some(value) if value == Theme::Dark.key() => Theme::Dark,
            Some(_) => Theme::Light,
            None if prefers_dark => Theme::Dark,
            None => Theme::Light,
        }
    }
}

pub trait ThemeStore {
    fn load(&self) -> Option<String>;
    fn save(&mut self, value: &str) -> Result<(), String>;
}

/// `window.localStorage`, which may be missing (e.g. disabled by the user).
pub struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    pub fn new(window: &Window) -> Self {
        LocalStorageStore {
            storage: window.local_storage().ok().flatten(),
        }
    }
}

impl ThemeStore for LocalStorageStore {
    fn load(&self) -> Option<String> {
        self.storage.as_ref()?.get_item(STORAGE_KEY).ok().flatten()
    }

    fn save(&mut self, value: &str) -> Result<(), String> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| "local storage unavailable".to_string())?;
        storage
            .set_item(STORAGE_KEY, value)
            .map_err(|err| dom::describe(&err))
    }
}

pub struct ThemeSwitcher<St: ThemeStore> {
    store: St,
    theme: Theme,
}

impl<St: ThemeStore> ThemeSwitcher<St> {
    // A dark start is written back to the store straight away; a light one
    // leaves the store untouched until the first toggle.
    pub fn new(store: St, prefers_dark: bool) -> Self {
        let saved = store.load();
        let theme = Theme::resolve(saved.as_deref(), prefers_dark);
        let mut switcher = ThemeSwitcher {
            store,
            theme: Theme::Light,
        };
        if theme == Theme::Dark {
            switcher.set(Theme::Dark);
        }
        switcher
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set(&mut self, theme: Theme) -> Theme {
        self.theme = theme;
        if let Err(err) = self.store.save(theme.key()) {
            logging::warn(&format!("could not persist theme: {}", err));
        }
        theme
    }

    pub fn toggle(&mut self) -> Theme {
        self.set(self.theme.toggled())
    }
}

fn show(body: &HtmlElement, icon: Option<&Element>, theme: Theme) {
    let classes = body.class_list();
    if let Err(err) = classes.toggle_with_force(DARK_CLASS, theme == Theme::Dark) {
        logging::warn(&format!("could not switch theme class: {}", dom::describe(&err)));
    }
    if let Some(icon) = icon {
        icon.set_text_content(Some(theme.icon()));
    }
}

// Wires up `#themeSwitcher`. Returns false when the page has no switcher.
pub fn install(window: &Window, document: &Document) -> Result<bool, JsValue> {
    let button = match document.get_element_by_id("themeSwitcher") {
        Some(button) => button,
        None => return Ok(false),
    };
    let icon = button.query_selector(".theme-icon")?;
    let body = dom::body(document)?;
    let prefers_dark = dom::media_matches(window, "(prefers-color-scheme: dark)");

    let switcher = ThemeSwitcher::new(LocalStorageStore::new(window), prefers_dark);
    if switcher.theme() == Theme::Dark {
        show(&body, icon.as_ref(), Theme::Dark);
    }

    let switcher = Rc::new(RefCell::new(switcher));
    let on_click = Closure::wrap(Box::new(move || {
        let theme = switcher.borrow_mut().toggle();
        show(&body, icon.as_ref(), theme);
    }) as Box<dyn FnMut()>);
    button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(true)
}
