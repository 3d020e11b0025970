use std::rc::Rc;

use crate::config::SiteConfig;
use crate::dom::Dom;
use crate::links::current_page;

const EN_SUFFIX: &str = "-en.html";
const HTML_SUFFIX: &str = ".html";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    Id,
    En,
}

impl Lang {
    /// Exactly `en` selects English; `EN`, `en-US` and the like stay Indonesian.
    pub fn from_tag(tag: &str) -> Self {
        if tag == "en" {
            Lang::En
        } else {
            Lang::Id
        }
    }

    /// Read from the `lang` attribute of `<html>`, defaulting to Indonesian.
    pub fn detect<D: Dom>(dom: &D) -> Self {
        let root = dom.document_element();
        dom.attribute(&root, "lang")
            .map(|tag| Lang::from_tag(&tag))
            .unwrap_or_default()
    }

    pub fn code(self) -> &'static str {
        match self {
            Lang::Id => "id",
            Lang::En => "en",
        }
    }
}

/// Filename of the same page in the other language.
///
/// `about.html` <-> `about-en.html`; the home page maps to `index-en.html`.
pub fn counterpart_page(pathname: &str, lang: Lang, home_page: &str) -> String {
    let filename = current_page(pathname, home_page);
    match lang {
        Lang::En => filename.replacen(EN_SUFFIX, HTML_SUFFIX, 1),
        Lang::Id => filename.replacen(HTML_SUFFIX, EN_SUFFIX, 1),
    }
}

/// Wire every language toggle present in the header to navigate to the counterpart page.
pub fn init_language_switcher<D: Dom + 'static>(dom: &D, lang: Lang, config: &SiteConfig) {
    let home_page: Rc<str> = Rc::from(config.home_page.as_str());
    for id in &config.lang_toggle_ids {
        let Some(toggle) = dom.element_by_id(id) else {
            continue;
        };
        let home_page = home_page.clone();
        dom.add_click_listener(
            &toggle,
            Rc::new(move |dom: &D| {
                let target = counterpart_page(&dom.pathname(), lang, &home_page);
                tracing::debug!(lang = lang.code(), %target, "switch language");
                dom.navigate(&target);
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::HtmlPage;
    use url::Url;

    #[test]
    fn counterpart_from_indonesian() {
        assert_eq!(counterpart_page("/about.html", Lang::Id, "index.html"), "about-en.html");
        assert_eq!(counterpart_page("/", Lang::Id, "index.html"), "index-en.html");
        assert_eq!(counterpart_page("", Lang::Id, "index.html"), "index-en.html");
        assert_eq!(counterpart_page("/index.html", Lang::Id, "index.html"), "index-en.html");
    }

    #[test]
    fn counterpart_from_english() {
        assert_eq!(counterpart_page("/about-en.html", Lang::En, "index.html"), "about.html");
        assert_eq!(counterpart_page("/index-en.html", Lang::En, "index.html"), "index.html");
    }

    #[test]
    fn from_tag_matches_exactly() {
        assert_eq!(Lang::from_tag("en"), Lang::En);
        for tag in ["EN", " en", "en-US", "id", ""] {
            assert_eq!(Lang::from_tag(tag), Lang::Id, "{tag:?}");
        }
    }

    #[test]
    fn detect_reads_html_lang() {
        let root = Url::parse("http://localhost/").unwrap();
        let en = HtmlPage::parse(r#"<html lang="en"><body></body></html>"#, root.clone());
        let id = HtmlPage::parse(r#"<html lang="id"><body></body></html>"#, root.clone());
        let none = HtmlPage::parse("<html><body></body></html>", root);
        assert_eq!(Lang::detect(&en), Lang::En);
        assert_eq!(Lang::detect(&id), Lang::Id);
        assert_eq!(Lang::detect(&none), Lang::Id);
    }

    #[test]
    fn toggle_click_navigates() {
        let page = HtmlPage::parse(
            r#"<html lang="id"><body><button id="lang-toggle-mobile">EN</button></body></html>"#,
            Url::parse("http://localhost/about.html").unwrap(),
        );
        init_language_switcher(&page, Lang::detect(&page), &SiteConfig::default());

        let toggle = page.element_by_id("lang-toggle-mobile").unwrap();
        page.click(&toggle);
        assert_eq!(page.pathname(), "/about-en.html");
    }
}
