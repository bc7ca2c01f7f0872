//! Theme controller: persists the dark/light flag and applies the derived
//! visual state (root class, icon pairs, mobile label, canvas line colors).

use web_sys::Storage;

use super::{dom, lines};
use crate::motion::Theme;

// Key kept from the previous generation of the site so an existing visitor's
// stored preference survives.
const THEME_KEY: &str = "darkMode_AugmentedDev_Portfolio_Global_Final_Ext";

const MOON_ICON_IDS: [&str; 2] = ["moonIcon", "moonIconMobile"];
const SUN_ICON_IDS: [&str; 2] = ["sunIcon", "sunIconMobile"];
const TOGGLE_BUTTON_IDS: [&str; 2] = ["darkModeToggle", "darkModeToggleMobile"];

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn read_stored_theme() -> Theme {
    let stored = local_storage().and_then(|storage| storage.get_item(THEME_KEY).ok().flatten());
    Theme::from_stored(stored.as_deref())
}

fn persist_theme(theme: Theme) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(THEME_KEY, theme.stored_value());
    }
}

/// Theme currently reflected by the root element.
pub fn current() -> Theme {
    let dark = dom::root()
        .map(|root| root.class_list().contains("dark"))
        .unwrap_or(false);
    if dark {
        Theme::Dark
    } else {
        Theme::Light
    }
}

/// Applies `theme` to the document. On the initial load the canvas renderers
/// are not repainted: none have started yet, and their first draw picks up
/// the right color on its own.
pub fn apply(theme: Theme, initial_load: bool) {
    if let Some(root) = dom::root() {
        let _ = root.class_list().toggle_with_force("dark", theme.is_dark());
    }

    for id in MOON_ICON_IDS {
        if let Some(icon) = dom::by_id(id) {
            let _ = icon.class_list().toggle_with_force("hidden", !theme.is_dark());
        }
    }
    for id in SUN_ICON_IDS {
        if let Some(icon) = dom::by_id(id) {
            let _ = icon.class_list().toggle_with_force("hidden", theme.is_dark());
        }
    }

    if let Some(label) = dom::by_id("darkModeToggleTextMobile") {
        label.set_text_content(Some(theme.toggle_label()));
    }

    if !initial_load {
        lines::update_all_colors(theme);
    }
}

fn toggle() {
    let next = current().toggled();
    persist_theme(next);
    apply(next, false);
}

/// Reads the persisted flag (defaulting to dark), applies it synchronously,
/// and wires both toggle buttons.
pub fn init() {
    apply(read_stored_theme(), true);

    for id in TOGGLE_BUTTON_IDS {
        if let Some(button) = dom::by_id(id) {
            dom::listen(&button, "click", |_| toggle());
        }
    }
}
