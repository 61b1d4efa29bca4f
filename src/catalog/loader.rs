// loader.rs
use crate::catalog::LoadError;
use crate::domain::listing::Catalog;
use reqwest::blocking::Client;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("listing_browser/", env!("CARGO_PKG_VERSION"));

/// Where the catalog document lives.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogSource {
    Http(Url),
    File(PathBuf),
}

impl CatalogSource {
    /// `http(s)://...` is fetched, `file://...` and anything else is a path
    /// on disk.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => CatalogSource::Http(url),
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(path) => CatalogSource::File(path),
                Err(()) => CatalogSource::File(PathBuf::from(raw)),
            },
            _ => CatalogSource::File(PathBuf::from(raw)),
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Http(url) => write!(f, "{url}"),
            CatalogSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

pub struct CatalogLoader {
    client: Client,
}

impl CatalogLoader {
    pub fn new(timeout: Duration) -> Result<Self, LoadError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    /// Read and parse the whole catalog. One attempt, no retry.
    pub fn load(&self, source: &CatalogSource) -> Result<Catalog, LoadError> {
        let started = std::time::Instant::now();

        let catalog = match source {
            CatalogSource::Http(url) => self.fetch(url)?,
            CatalogSource::File(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                parse_catalog(&text)?
            }
        };

        tracing::info!(
            source = %source,
            categories = catalog.len(),
            listings = catalog.listing_count(),
            elapsed = ?started.elapsed(),
            "catalog loaded"
        );

        Ok(catalog)
    }

    fn fetch(&self, url: &Url) -> Result<Catalog, LoadError> {
        let resp = self.client.get(url.clone()).send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let text = resp.text()?;
        parse_catalog(&text)
    }
}

pub fn parse_catalog(text: &str) -> Result<Catalog, LoadError> {
    Ok(serde_json::from_str(text)?)
}
