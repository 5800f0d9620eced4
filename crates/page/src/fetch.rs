use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::{PageError, Result};

/// Source of the page's static JSON documents.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Raw body of the resource at `location`. Non-success responses are
    /// errors.
    async fn fetch(&self, location: &str) -> Result<Vec<u8>>;
}

/// Fetch `location` and decode it as JSON.
pub async fn fetch_json<T: DeserializeOwned>(
    fetcher: &dyn ResourceFetcher,
    location: &str,
) -> Result<T> {
    let body = fetcher.fetch(location).await?;
    Ok(serde_json::from_slice(&body)?)
}

/// HTTP(S) fetcher that always bypasses caches.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base: Option<Url>,
}

impl HttpFetcher {
    /// `base` resolves relative locations; `timeout` bounds each request.
    pub fn new(base: Option<&str>, timeout: Option<Duration>) -> Result<Self> {
        let base = base
            .map(|raw| Url::parse(raw).map_err(|err| PageError::InvalidLocation(format!("{raw}: {err}"))))
            .transpose()?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base,
        })
    }

    fn resolve(&self, location: &str) -> Result<Url> {
        if let Ok(url) = Url::parse(location) {
            return Ok(url);
        }
        let base = self
            .base
            .as_ref()
            .ok_or_else(|| PageError::InvalidLocation(location.to_string()))?;
        base.join(location)
            .map_err(|err| PageError::InvalidLocation(format!("{location}: {err}")))
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        let url = self.resolve(location)?;
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PageError::Status {
                location: location.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Reads documents from a local site directory.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, location: &str) -> Result<PathBuf> {
        let relative = Path::new(location.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || location.trim().is_empty() {
            return Err(PageError::InvalidLocation(location.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ResourceFetcher for FileFetcher {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        let path = self.resolve(location)?;
        debug!("reading {}", path.display());
        match tokio::fs::read(&path).await {
            Ok(body) => Ok(body),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(PageError::NotFound(location.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Preloaded documents keyed by location. Entries may also be canned
/// failure statuses.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    entries: HashMap<String, std::result::Result<Vec<u8>, u16>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, location: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.entries.insert(location.into(), Ok(body.into()));
        self
    }

    pub fn with_status(mut self, location: impl Into<String>, status: u16) -> Self {
        self.entries.insert(location.into(), Err(status));
        self
    }
}

#[async_trait]
impl ResourceFetcher for StaticFetcher {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        match self.entries.get(location) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(PageError::Status {
                location: location.to_string(),
                status: *status,
            }),
            None => Err(PageError::NotFound(location.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn http_resolves_relative_locations_against_base() {
        let fetcher = HttpFetcher::new(Some("https://example.com/site/"), None).unwrap();
        assert_eq!(
            fetcher.resolve("data/profile.json").unwrap().as_str(),
            "https://example.com/site/data/profile.json"
        );
        assert_eq!(
            fetcher.resolve("https://cdn.example.com/c.json").unwrap().as_str(),
            "https://cdn.example.com/c.json"
        );
    }

    #[test]
    fn http_without_base_rejects_relative_locations() {
        let fetcher = HttpFetcher::new(None, Some(Duration::from_secs(5))).unwrap();
        assert!(matches!(
            fetcher.resolve("data/profile.json"),
            Err(PageError::InvalidLocation(_))
        ));
    }

    #[tokio::test]
    async fn file_fetcher_reads_under_root() {
        let dir = tempdir().unwrap();
        tokio::fs::create_dir_all(dir.path().join("data")).await.unwrap();
        tokio::fs::write(dir.path().join("data/certificates.json"), b"[]")
            .await
            .unwrap();

        let fetcher = FileFetcher::new(dir.path());
        assert_eq!(fetcher.fetch("data/certificates.json").await.unwrap(), b"[]");
        assert_eq!(fetcher.fetch("/data/certificates.json").await.unwrap(), b"[]");
        assert!(matches!(
            fetcher.fetch("data/profile.json").await,
            Err(PageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn file_fetcher_refuses_to_escape_root() {
        let dir = tempdir().unwrap();
        let fetcher = FileFetcher::new(dir.path());
        assert!(matches!(
            fetcher.fetch("../secrets.json").await,
            Err(PageError::InvalidLocation(_))
        ));
    }

    #[tokio::test]
    async fn static_fetcher_serves_bodies_and_statuses() {
        let fetcher = StaticFetcher::new()
            .with("ok.json", r#"{"a":1}"#)
            .with_status("gone.json", 404);

        let value: serde_json::Value = fetch_json(&fetcher, "ok.json").await.unwrap();
        assert_eq!(value["a"], 1);
        assert!(matches!(
            fetcher.fetch("gone.json").await,
            Err(PageError::Status { status: 404, .. })
        ));
        assert!(matches!(
            fetch_json::<serde_json::Value>(&fetcher, "missing.json").await,
            Err(PageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn malformed_json_is_an_error() {
        let fetcher = StaticFetcher::new().with("bad.json", "{ nope");
        assert!(matches!(
            fetch_json::<serde_json::Value>(&fetcher, "bad.json").await,
            Err(PageError::Json(_))
        ));
    }
}
