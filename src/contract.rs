use std::fmt;

use crate::config::SiteConfig;
use crate::dom::Dom;

/// A required header element that the loaded fragment does not provide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractIssue {
    MissingElement { id: String },
    MissingIcon { toggle_id: String },
}

impl fmt::Display for ContractIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractIssue::MissingElement { id } => write!(f, "missing #{id}"),
            ContractIssue::MissingIcon { toggle_id } => write!(f, "#{toggle_id} has no icon"),
        }
    }
}

/// Check the header against what the nav controllers expect to find.
///
/// Language toggles are optional and never reported.
pub fn audit_header<D: Dom>(dom: &D, config: &SiteConfig) -> Vec<ContractIssue> {
    let mut issues = Vec::new();

    for id in &config.theme_toggle_ids {
        match dom.element_by_id(id) {
            None => issues.push(ContractIssue::MissingElement { id: id.clone() }),
            Some(toggle) => {
                if dom.query_within(&toggle, &config.theme_icon_selector).is_none() {
                    issues.push(ContractIssue::MissingIcon {
                        toggle_id: id.clone(),
                    });
                }
            }
        }
    }

    for id in [&config.hamburger_id, &config.mobile_menu_id] {
        if dom.element_by_id(id).is_none() {
            issues.push(ContractIssue::MissingElement { id: id.clone() });
        }
    }

    issues
}
