use maud::{Markup, html};

use crate::dom::Dom;
use crate::source::FragmentSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    /// The placeholder was not in the page; nothing was fetched.
    PlaceholderMissing,
    /// The fetch failed and the placeholder shows the error message instead.
    Failed,
}

pub fn error_markup(message: &str) -> Markup {
    html! {
        p style="color: red; text-align: center;" { (message) }
    }
}

/// Fetch fragment `name` into the element matching `placeholder`.
///
/// `on_complete` runs once, right after the content is spliced in, and only on success.
/// Failures are terminal: they are logged and shown inline, never returned.
pub async fn load_fragment<D, F>(
    dom: &D,
    source: &FragmentSource,
    name: &str,
    placeholder: &str,
    error_message: &str,
    on_complete: F,
) -> LoadOutcome
where
    D: Dom,
    F: FnOnce(&D),
{
    let Some(target) = dom.query(placeholder) else {
        tracing::warn!(placeholder, "placeholder not found");
        return LoadOutcome::PlaceholderMissing;
    };

    match source.fetch(name).await {
        Ok(markup) => {
            dom.set_content(&target, &markup);
            tracing::debug!(fragment = name, placeholder, bytes = markup.len(), "fragment loaded");
            on_complete(dom);
            LoadOutcome::Loaded
        }
        Err(err) => {
            tracing::error!(
                fragment = %source.describe(name),
                "error loading component: {err:#}"
            );
            dom.set_content(&target, &error_markup(error_message).into_string());
            LoadOutcome::Failed
        }
    }
}
