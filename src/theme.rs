use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::config::SiteConfig;
use crate::dom::Dom;
use crate::storage::Storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => anyhow::bail!("unknown theme {other:?}"),
        }
    }
}

/// Read the persisted theme; absent or unrecognised values fall back to light.
pub fn load_theme(storage: &dyn Storage, key: &str) -> Theme {
    match storage.get_item(key) {
        None => Theme::default(),
        Some(raw) => raw.parse().unwrap_or_else(|err: anyhow::Error| {
            tracing::warn!(key, %err, "ignoring persisted theme");
            Theme::default()
        }),
    }
}

/// Owns the current theme and is the only writer of its storage key.
pub struct ThemeController {
    current: Cell<Theme>,
    storage: Rc<dyn Storage>,
    storage_key: String,
    attribute: String,
    toggle_ids: Vec<String>,
    icon_selector: String,
    dark_icon_class: String,
    light_icon_class: String,
}

impl ThemeController {
    pub fn new(storage: Rc<dyn Storage>, config: &SiteConfig) -> Self {
        let initial = load_theme(storage.as_ref(), &config.theme_storage_key);
        Self {
            current: Cell::new(initial),
            storage,
            storage_key: config.theme_storage_key.clone(),
            attribute: config.theme_attribute.clone(),
            toggle_ids: config.theme_toggle_ids.clone(),
            icon_selector: config.theme_icon_selector.clone(),
            dark_icon_class: config.dark_icon_class.clone(),
            light_icon_class: config.light_icon_class.clone(),
        }
    }

    pub fn current(&self) -> Theme {
        self.current.get()
    }

    /// Reflect `theme` onto `<html>` and onto each toggle's icon.
    ///
    /// Toggles are handled one by one: a missing desktop toggle does not stop the mobile
    /// icon from updating.
    pub fn apply<D: Dom>(&self, dom: &D, theme: Theme) {
        let root = dom.document_element();
        dom.set_attribute(&root, &self.attribute, theme.as_str());

        let dark = theme.is_dark();
        for id in &self.toggle_ids {
            let Some(toggle) = dom.element_by_id(id) else {
                continue;
            };
            let Some(icon) = dom.query_within(&toggle, &self.icon_selector) else {
                continue;
            };
            dom.toggle_class(&icon, &self.dark_icon_class, Some(dark));
            dom.toggle_class(&icon, &self.light_icon_class, Some(!dark));
        }
    }

    /// Flip, persist, then apply. Returns the new theme.
    pub fn toggle<D: Dom>(&self, dom: &D) -> Theme {
        let next = self.current.get().toggled();
        if let Err(err) = self.storage.set_item(&self.storage_key, next.as_str()) {
            tracing::error!(key = %self.storage_key, "persist theme failed: {err:#}");
        }
        self.current.set(next);
        self.apply(dom, next);
        tracing::debug!(theme = %next, "theme toggled");
        next
    }

    /// Apply the initial theme and hook `toggle` onto every toggle element present.
    pub fn wire<D: Dom + 'static>(self: &Rc<Self>, dom: &D) {
        self.apply(dom, self.current());
        for id in &self.toggle_ids {
            let Some(toggle) = dom.element_by_id(id) else {
                continue;
            };
            let controller = self.clone();
            dom.add_click_listener(
                &toggle,
                Rc::new(move |dom: &D| {
                    controller.toggle(dom);
                }),
            );
        }
    }
}
