mod boot;
mod cli;
mod config;
mod contract;
mod dom;
mod fetcher;
mod lang;
mod links;
mod loader;
mod nav;
mod source;
mod storage;
mod theme;

use std::io::Write as _;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context as _, anyhow};
use cli::Args;
use url::Url;

pub use boot::{BootReport, on_ready};
pub use cli::Args as CliArgs;
pub use config::SiteConfig;
pub use contract::{ContractIssue, audit_header};
pub use dom::{Dom, HtmlPage, Listener};
pub use lang::{Lang, counterpart_page, init_language_switcher};
pub use links::{current_page, fix_links};
pub use loader::{LoadOutcome, error_markup, load_fragment};
pub use nav::init_nav_interaction;
pub use source::FragmentSource;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use theme::{Theme, ThemeController, load_theme};

const DEFAULT_ORIGIN: &str = "http://localhost/";

pub async fn run(args: Args) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => SiteConfig::load(path)?,
        None => SiteConfig::default(),
    };

    let html = std::fs::read_to_string(&args.page)
        .with_context(|| format!("read {}", args.page.display()))?;
    let location = page_location(&args)?;
    let page = HtmlPage::parse(&html, location.clone());

    let source = match (&args.base_url, &args.fragments_dir) {
        (Some(base), _) => FragmentSource::remote(base.clone(), &args.user_agent)?,
        (None, Some(dir)) => FragmentSource::Local(dir.clone()),
        (None, None) => anyhow::bail!("one of --base-url or --fragments-dir is required"),
    };

    let storage: Rc<dyn Storage> = match &args.storage {
        Some(path) => Rc::new(FileStorage::open(path.clone())?),
        None => Rc::new(MemoryStorage::new()),
    };

    let report = on_ready(&page, &source, storage, &config).await;
    tracing::info!(
        lang = report.lang.code(),
        header = ?report.header,
        footer = ?report.footer,
        "chrome loaded"
    );
    if args.strict {
        check_strict(&report)?;
    }

    for id in &args.clicks {
        let element = page
            .element_by_id(id)
            .ok_or_else(|| anyhow!("--click {id}: no element with that id"))?;
        page.click(&element);
    }
    if page.location() != location {
        tracing::info!(location = %page.location(), "page navigated away");
    }

    let out = page.to_html()?;
    match &args.out {
        Some(path) => write_output(path, &out),
        None => std::io::stdout()
            .lock()
            .write_all(out.as_bytes())
            .context("write stdout"),
    }
}

fn page_location(args: &Args) -> anyhow::Result<Url> {
    let origin = match &args.base_url {
        Some(base) => base.clone(),
        None => Url::parse(DEFAULT_ORIGIN).context("parse default origin")?,
    };
    let path = match &args.path {
        Some(path) => path.clone(),
        None => args
            .page
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    origin
        .join(&path)
        .with_context(|| format!("resolve page path {path}"))
}

fn check_strict(report: &BootReport) -> anyhow::Result<()> {
    for (name, outcome) in [("header", report.header), ("footer", report.footer)] {
        if outcome != LoadOutcome::Loaded {
            anyhow::bail!("strict check failed: {name} {outcome:?}");
        }
    }
    if !report.header_issues.is_empty() {
        let issues: Vec<String> = report.header_issues.iter().map(ToString::to_string).collect();
        anyhow::bail!(
            "strict check failed: header fragment incomplete ({})",
            issues.join(", ")
        );
    }
    Ok(())
}

fn write_output(path: &Path, html: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
    }
    std::fs::write(path, html).with_context(|| format!("write {}", path.display()))
}
