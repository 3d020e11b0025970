use std::path::PathBuf;

use clap::Parser;
use url::Url;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Page to boot: an HTML file carrying the header/footer placeholders.
    #[arg(long)]
    pub page: PathBuf,

    /// Base URL the nav/footer fragments are fetched from (e.g. `https://example.com/`).
    #[arg(long, conflicts_with = "fragments_dir", required_unless_present = "fragments_dir")]
    pub base_url: Option<Url>,

    /// Directory the nav/footer fragments are read from.
    #[arg(long)]
    pub fragments_dir: Option<PathBuf>,

    /// Location path the page is booted at. Defaults to `/<page file name>`.
    #[arg(long)]
    pub path: Option<String>,

    /// JSON file standing in for the browser's local storage (theme preference).
    ///
    /// Without it, storage starts empty and is discarded on exit.
    #[arg(long)]
    pub storage: Option<PathBuf>,

    /// JSON file overriding selectors, ids, fragment names or the error message.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Element id to click after boot. Repeat to replay several clicks in order.
    #[arg(long = "click", value_name = "ID")]
    pub clicks: Vec<String>,

    /// Fail when a fragment does not load or the header misses required elements.
    #[arg(long)]
    pub strict: bool,

    /// Output path for the resulting document. Defaults to stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// HTTP User-Agent used for fetching fragments.
    #[arg(long, default_value = "site-chrome/0.1")]
    pub user_agent: String,
}
