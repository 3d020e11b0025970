use anyhow::{Context as _, anyhow};
use url::Url;

/// Plain GET-as-text client for fragments. One attempt per request, no retries.
#[derive(Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(user_agent: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .context("build reqwest client")?;
        Ok(Self { client })
    }

    pub async fn get_text(&self, url: Url) -> anyhow::Result<String> {
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {}", url))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow!("GET {} failed with status {}", url, status));
        }

        // Decoded by charset; undecodable bytes become U+FFFD rather than an error.
        resp.text().await.context("read response body")
    }
}
