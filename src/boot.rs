use std::cell::RefCell;
use std::rc::Rc;

use crate::config::SiteConfig;
use crate::contract::{self, ContractIssue};
use crate::dom::Dom;
use crate::lang::{Lang, init_language_switcher};
use crate::links;
use crate::loader::{self, LoadOutcome};
use crate::nav;
use crate::source::FragmentSource;
use crate::storage::Storage;

#[derive(Debug)]
pub struct BootReport {
    pub lang: Lang,
    pub header: LoadOutcome,
    pub footer: LoadOutcome,
    /// Required header elements missing after a successful header load.
    pub header_issues: Vec<ContractIssue>,
}

/// The page-ready routine: load header and footer side by side and wire what they bring.
///
/// The two loads are independent; either may finish first and a failure in one does not
/// affect the other.
pub async fn on_ready<D: Dom + 'static>(
    dom: &D,
    source: &FragmentSource,
    storage: Rc<dyn Storage>,
    config: &SiteConfig,
) -> BootReport {
    let lang = Lang::detect(dom);
    let header_issues = RefCell::new(Vec::new());
    tracing::info!(lang = lang.code(), path = %dom.pathname(), "page ready");

    let header = loader::load_fragment(
        dom,
        source,
        config.nav_fragment_for(lang),
        &config.header_selector,
        &config.load_error_message,
        |dom| {
            links::fix_links(
                dom,
                &config.header_selector,
                &config.nav_link_selector,
                &config.home_page,
            );
            nav::init_nav_interaction(dom, storage.clone(), config);
            init_language_switcher(dom, lang, config);

            let issues = contract::audit_header(dom, config);
            for issue in &issues {
                tracing::warn!(%issue, "header fragment incomplete");
            }
            *header_issues.borrow_mut() = issues;
        },
    );

    let footer = loader::load_fragment(
        dom,
        source,
        config.footer_fragment_for(lang),
        &config.footer_selector,
        &config.load_error_message,
        |dom| {
            links::fix_links(
                dom,
                &config.footer_selector,
                &config.footer_link_selector,
                &config.home_page,
            );
        },
    );

    let (header, footer) = tokio::join!(header, footer);
    BootReport {
        lang,
        header,
        footer,
        header_issues: header_issues.take(),
    }
}
