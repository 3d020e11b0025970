use std::path::PathBuf;

use anyhow::Context as _;
use url::Url;

use crate::fetcher::Fetcher;

/// Where fragment files are read from.
#[derive(Clone)]
pub enum FragmentSource {
    /// Resolved against `base` and fetched over HTTP. `base` should end in `/`.
    Remote { base: Url, fetcher: Fetcher },
    /// Read from a directory on disk.
    Local(PathBuf),
}

impl FragmentSource {
    pub fn remote(base: Url, user_agent: &str) -> anyhow::Result<Self> {
        Ok(Self::Remote {
            base,
            fetcher: Fetcher::new(user_agent)?,
        })
    }

    /// Human-readable location of `name`, for logs.
    pub fn describe(&self, name: &str) -> String {
        match self {
            Self::Remote { base, .. } => base
                .join(name)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| format!("{base}{name}")),
            Self::Local(dir) => dir.join(name).display().to_string(),
        }
    }

    pub async fn fetch(&self, name: &str) -> anyhow::Result<String> {
        match self {
            Self::Remote { base, fetcher } => {
                let url = base
                    .join(name)
                    .with_context(|| format!("resolve {name} against {base}"))?;
                fetcher.get_text(url).await
            }
            Self::Local(dir) => {
                let path = dir.join(name);
                let bytes = tokio::fs::read(&path)
                    .await
                    .with_context(|| format!("read {}", path.display()))?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
        }
    }
}
