use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;

use crate::lang::Lang;

/// Selectors, ids and names the page and its fragments agree on.
///
/// Every field has a default matching the site's markup, so a config file only needs to
/// name what differs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub home_page: String,
    pub header_selector: String,
    pub footer_selector: String,
    pub nav_link_selector: String,
    pub footer_link_selector: String,
    pub nav_fragment: String,
    pub nav_fragment_en: String,
    pub footer_fragment: String,
    pub footer_fragment_en: String,
    pub theme_storage_key: String,
    pub theme_attribute: String,
    pub theme_toggle_ids: Vec<String>,
    pub theme_icon_selector: String,
    /// Icon class shown while the dark theme is active (offers switching to light).
    pub dark_icon_class: String,
    pub light_icon_class: String,
    pub hamburger_id: String,
    pub mobile_menu_id: String,
    pub mobile_menu_items: String,
    pub open_class: String,
    pub lang_toggle_ids: Vec<String>,
    pub load_error_message: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            home_page: "index.html".to_string(),
            header_selector: "header.container".to_string(),
            footer_selector: "footer.container".to_string(),
            nav_link_selector: ".nav-link".to_string(),
            footer_link_selector: ".footer-link".to_string(),
            nav_fragment: "nav.html".to_string(),
            nav_fragment_en: "nav-en.html".to_string(),
            footer_fragment: "footer.html".to_string(),
            footer_fragment_en: "footer-en.html".to_string(),
            theme_storage_key: "theme".to_string(),
            theme_attribute: "data-theme".to_string(),
            theme_toggle_ids: vec!["theme-toggle".to_string(), "mobile-theme-toggle".to_string()],
            theme_icon_selector: "i".to_string(),
            dark_icon_class: "fa-sun".to_string(),
            light_icon_class: "fa-moon".to_string(),
            hamburger_id: "hamburger-btn".to_string(),
            mobile_menu_id: "mobile-nav-links".to_string(),
            mobile_menu_items: "a, button".to_string(),
            open_class: "is-open".to_string(),
            lang_toggle_ids: vec![
                "lang-toggle-desktop".to_string(),
                "lang-toggle-mobile".to_string(),
            ],
            load_error_message: "Gagal memuat komponen.".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parse config {}", path.display()))
    }

    pub fn nav_fragment_for(&self, lang: Lang) -> &str {
        match lang {
            Lang::Id => &self.nav_fragment,
            Lang::En => &self.nav_fragment_en,
        }
    }

    pub fn footer_fragment_for(&self, lang: Lang) -> &str {
        match lang {
            Lang::Id => &self.footer_fragment,
            Lang::En => &self.footer_fragment_en,
        }
    }
}
