use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Context as _;
use html5ever::{LocalName, Namespace, QualName};
use kuchiki::NodeRef;
use kuchiki::iter::NodeIterator as _;
use kuchiki::traits::TendrilSink as _;
use url::Url;

const HTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// Click handler registered on an element. Receives the document it fired in.
pub type Listener<D> = Rc<dyn Fn(&D)>;

/// The small slice of a browser document the chrome controllers need.
///
/// Everything the loaders and controllers touch goes through here, so they can run against
/// a parsed page (`HtmlPage`) or anything else that can locate elements and flip classes.
pub trait Dom: Sized {
    type Element: Clone;

    /// First element in the document matching a CSS selector.
    fn query(&self, selector: &str) -> Option<Self::Element>;

    /// Every element matching `selector` inside `scope` (in document order).
    fn query_all_within(&self, scope: &Self::Element, selector: &str) -> Vec<Self::Element>;

    fn query_within(&self, scope: &Self::Element, selector: &str) -> Option<Self::Element> {
        self.query_all_within(scope, selector).into_iter().next()
    }

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// The `<html>` element.
    fn document_element(&self) -> Self::Element;

    /// Replace all children of `element` with the parsed `markup`.
    fn set_content(&self, element: &Self::Element, markup: &str);

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str);

    fn has_class(&self, element: &Self::Element, class: &str) -> bool;

    /// Flip `class` on `element`, or force it on/off. Returns whether the class is now present.
    fn toggle_class(&self, element: &Self::Element, class: &str, force: Option<bool>) -> bool;

    fn remove_class(&self, element: &Self::Element, class: &str) {
        self.toggle_class(element, class, Some(false));
    }

    fn add_click_listener(&self, element: &Self::Element, listener: Listener<Self>);

    /// Run every click listener registered on `element`, in registration order.
    fn click(&self, element: &Self::Element);

    /// Path component of the current location (e.g. `/blog/about.html`).
    fn pathname(&self) -> String;

    /// Full navigation to `href`, resolved against the current location.
    fn navigate(&self, href: &str);
}

/// A headless page: a `kuchiki` tree plus a location and a click-listener registry.
pub struct HtmlPage {
    document: NodeRef,
    location: RefCell<Url>,
    listeners: RefCell<Vec<(NodeRef, Listener<HtmlPage>)>>,
}

impl HtmlPage {
    pub fn parse(html: &str, location: Url) -> Self {
        Self {
            document: kuchiki::parse_html().one(html),
            location: RefCell::new(location),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn location(&self) -> Url {
        self.location.borrow().clone()
    }

    pub fn to_html(&self) -> anyhow::Result<String> {
        let mut out = Vec::new();
        self.document
            .serialize(&mut out)
            .context("serialize document")?;
        String::from_utf8(out).context("document html not utf-8")
    }

    /// Serialized children of `element`.
    pub fn inner_html(&self, element: &NodeRef) -> anyhow::Result<String> {
        let mut out = Vec::new();
        for child in element.children() {
            child.serialize(&mut out).context("serialize child")?;
        }
        String::from_utf8(out).context("element html not utf-8")
    }

    pub fn text_of(&self, selector: &str) -> Option<String> {
        self.query(selector).map(|node| node.text_contents())
    }
}

impl Dom for HtmlPage {
    type Element = NodeRef;

    fn query(&self, selector: &str) -> Option<NodeRef> {
        self.document
            .select_first(selector)
            .ok()
            .map(|n| n.as_node().clone())
    }

    fn query_all_within(&self, scope: &NodeRef, selector: &str) -> Vec<NodeRef> {
        match scope.select(selector) {
            Ok(nodes) => nodes
                .map(|n| n.as_node().clone())
                // `select` includes the scope itself; the DOM's querySelectorAll does not.
                .filter(|n| n != scope)
                .collect(),
            Err(()) => {
                tracing::debug!(selector, "invalid selector");
                Vec::new()
            }
        }
    }

    fn element_by_id(&self, id: &str) -> Option<NodeRef> {
        self.document
            .descendants()
            .elements()
            .find(|el| el.attributes.borrow().get("id") == Some(id))
            .map(|el| el.as_node().clone())
    }

    fn document_element(&self) -> NodeRef {
        self.document
            .select_first("html")
            .map(|n| n.as_node().clone())
            .unwrap_or_else(|()| self.document.clone())
    }

    fn set_content(&self, element: &NodeRef, markup: &str) {
        for child in element.children().collect::<Vec<_>>() {
            child.detach();
        }

        // Fragment parsing (innerHTML rules) keeps leading comments, <style>, <link> etc.
        // in place; the parsed nodes hang off a synthetic <html> root.
        let context = element
            .as_element()
            .map(|data| data.name.clone())
            .unwrap_or_else(|| {
                QualName::new(None, Namespace::from(HTML_NS), LocalName::from("div"))
            });
        let parsed = kuchiki::parse_fragment(context, Vec::new()).one(markup);
        let Ok(root) = parsed.select_first("html") else {
            return;
        };
        for child in root.as_node().children().collect::<Vec<_>>() {
            element.append(child);
        }
    }

    fn attribute(&self, element: &NodeRef, name: &str) -> Option<String> {
        let data = element.as_element()?;
        data.attributes.borrow().get(name).map(|s| s.to_string())
    }

    fn set_attribute(&self, element: &NodeRef, name: &str, value: &str) {
        if let Some(data) = element.as_element() {
            data.attributes
                .borrow_mut()
                .insert(name, value.to_string());
        }
    }

    fn has_class(&self, element: &NodeRef, class: &str) -> bool {
        self.attribute(element, "class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    fn toggle_class(&self, element: &NodeRef, class: &str, force: Option<bool>) -> bool {
        let Some(data) = element.as_element() else {
            return false;
        };
        let mut attrs = data.attributes.borrow_mut();
        let mut classes: Vec<String> = attrs
            .get("class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();

        let present = classes.iter().any(|c| c == class);
        let wanted = force.unwrap_or(!present);
        if wanted == present {
            return present;
        }
        if wanted {
            classes.push(class.to_string());
        } else {
            classes.retain(|c| c != class);
        }
        attrs.insert("class", classes.join(" "));
        wanted
    }

    fn add_click_listener(&self, element: &NodeRef, listener: Listener<Self>) {
        self.listeners
            .borrow_mut()
            .push((element.clone(), listener));
    }

    fn click(&self, element: &NodeRef) {
        // Collect first: listeners may register more listeners or touch the registry.
        let matched: Vec<Listener<Self>> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(node, _)| node == element)
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in matched {
            listener(self);
        }
    }

    fn pathname(&self) -> String {
        self.location.borrow().path().to_string()
    }

    fn navigate(&self, href: &str) {
        let next = self.location.borrow().join(href);
        match next {
            Ok(url) => {
                tracing::info!(%url, "navigate");
                *self.location.borrow_mut() = url;
            }
            Err(err) => tracing::warn!(href, %err, "cannot resolve navigation target"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(html: &str) -> HtmlPage {
        HtmlPage::parse(html, Url::parse("http://localhost/about.html").unwrap())
    }

    #[test]
    fn set_content_replaces_children() {
        let page = page(r#"<header class="container"><p>old</p></header>"#);
        let header = page.query("header.container").unwrap();
        page.set_content(&header, r##"<nav><a class="nav-link" href="#x">x</a></nav>"##);

        assert_eq!(
            page.inner_html(&header).unwrap(),
            r##"<nav><a class="nav-link" href="#x">x</a></nav>"##
        );
    }

    #[test]
    fn set_content_keeps_leading_comment_and_head_elements() {
        let page = page(r#"<header class="container"></header>"#);
        let header = page.query("header.container").unwrap();
        let fragment = r#"<!-- nav --><style>.nav{color:red}</style><link href="nav.css" rel="stylesheet"><nav>menu</nav>"#;
        page.set_content(&header, fragment);

        assert_eq!(page.inner_html(&header).unwrap(), fragment);
        assert!(page.query("head style").is_none());
    }

    #[test]
    fn toggle_class_flips_and_forces() {
        let page = page(r#"<div id="menu" class="menu"></div>"#);
        let menu = page.element_by_id("menu").unwrap();

        assert!(page.toggle_class(&menu, "is-open", None));
        assert!(page.has_class(&menu, "is-open"));
        assert!(!page.toggle_class(&menu, "is-open", None));
        assert!(!page.has_class(&menu, "is-open"));
        assert!(page.has_class(&menu, "menu"));

        assert!(page.toggle_class(&menu, "a", Some(true)));
        assert!(page.toggle_class(&menu, "a", Some(true)));
        page.remove_class(&menu, "a");
        assert!(!page.has_class(&menu, "a"));
    }

    #[test]
    fn click_runs_listeners_in_order() {
        let page = page(r#"<button id="b"></button><button id="c"></button>"#);
        let b = page.element_by_id("b").unwrap();
        let c = page.element_by_id("c").unwrap();
        let log = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second"] {
            let log = log.clone();
            page.add_click_listener(&b, Rc::new(move |_: &HtmlPage| log.borrow_mut().push(tag)));
        }
        page.click(&c);
        assert!(log.borrow().is_empty());
        page.click(&b);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn navigate_resolves_relative_to_location() {
        let page = HtmlPage::parse(
            "<p></p>",
            Url::parse("http://localhost/site/about.html").unwrap(),
        );
        page.navigate("about-en.html");
        assert_eq!(page.pathname(), "/site/about-en.html");
    }

    #[test]
    fn query_all_within_excludes_scope() {
        let page = page(r#"<div id="m" class="x"><a class="x"></a><button></button></div>"#);
        let m = page.element_by_id("m").unwrap();
        assert_eq!(page.query_all_within(&m, ".x").len(), 1);
        assert_eq!(page.query_all_within(&m, "a, button").len(), 2);
    }
}
