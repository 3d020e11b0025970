use std::rc::Rc;

use crate::config::SiteConfig;
use crate::dom::Dom;
use crate::storage::Storage;
use crate::theme::ThemeController;

/// Header interactions: theme toggles plus the mobile hamburger menu.
///
/// Must run after the header fragment is in place; the elements it wires live there.
pub fn init_nav_interaction<D: Dom + 'static>(
    dom: &D,
    storage: Rc<dyn Storage>,
    config: &SiteConfig,
) -> Rc<ThemeController> {
    let theme = Rc::new(ThemeController::new(storage, config));
    theme.wire(dom);

    let hamburger = dom.element_by_id(&config.hamburger_id);
    let menu = dom.element_by_id(&config.mobile_menu_id);
    let (Some(hamburger), Some(menu)) = (hamburger, menu) else {
        tracing::debug!("no hamburger menu in header");
        return theme;
    };

    let open_class: Rc<str> = Rc::from(config.open_class.as_str());
    {
        let menu = menu.clone();
        let open_class = open_class.clone();
        dom.add_click_listener(
            &hamburger,
            Rc::new(move |dom: &D| {
                dom.toggle_class(&menu, &open_class, None);
            }),
        );
    }

    for item in dom.query_all_within(&menu, &config.mobile_menu_items) {
        let menu = menu.clone();
        let open_class = open_class.clone();
        dom.add_click_listener(
            &item,
            Rc::new(move |dom: &D| {
                if dom.has_class(&menu, &open_class) {
                    dom.remove_class(&menu, &open_class);
                }
            }),
        );
    }

    theme
}
