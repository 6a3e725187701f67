use crate::ports::outbound::{RegistryMetadata, RegistryRepository};
use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const REGISTRY_BASE_URL: &str = "https://registry.npmjs.org";
const DOWNLOADS_BASE_URL: &str = "https://api.npmjs.org/downloads/point/last-week";

/// Abbreviated packument media type; a fraction of the size of the full
/// document, enough for dist-tags.
const ABBREVIATED_ACCEPT: &str = "application/vnd.npm.install-v1+json";

#[derive(Debug, Deserialize)]
struct AbbreviatedPackument {
    #[serde(rename = "dist-tags", default)]
    dist_tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct FullPackument {
    #[serde(rename = "dist-tags", default)]
    dist_tags: HashMap<String, String>,
    #[serde(default)]
    time: HashMap<String, DateTime<Utc>>,
    #[serde(default)]
    versions: HashMap<String, VersionManifest>,
}

#[derive(Debug, Deserialize)]
struct VersionManifest {
    #[serde(default)]
    deprecated: Option<DeprecationNotice>,
}

/// npm encodes deprecation either as a message string or as a bare flag.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum DeprecationNotice {
    Message(String),
    Flag(bool),
}

impl DeprecationNotice {
    fn into_message(self) -> Option<String> {
        match self {
            DeprecationNotice::Message(message) if !message.is_empty() => Some(message),
            DeprecationNotice::Message(_) | DeprecationNotice::Flag(true) => {
                Some("Package is marked deprecated".to_string())
            }
            DeprecationNotice::Flag(false) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DownloadsPoint {
    downloads: u64,
}

/// NpmRegistryRepository adapter for the npm registry HTTP API
///
/// This adapter implements the RegistryRepository port: the latest
/// version comes from the abbreviated packument's dist-tags, metadata
/// (deprecation, publish times) from the full packument, and weekly
/// downloads best-effort from the downloads API.
///
/// # Async Support
/// Uses the async reqwest client for non-blocking requests, enabling the
/// enricher's concurrent fan-out.
pub struct NpmRegistryRepository {
    client: reqwest::Client,
    max_retries: u32,
}

impl NpmRegistryRepository {
    /// Creates a new npm registry repository with default configuration
    pub fn new() -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("deprisk/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            max_retries: 3,
        })
    }

    /// Validates a package name before it is placed into a URL.
    ///
    /// Scoped names legitimately contain `@` and `/`; both are
    /// percent-encoded afterwards. Everything that could escape the
    /// path segment is rejected.
    fn validate_package_name(package_name: &str) -> Result<()> {
        if package_name.is_empty() {
            anyhow::bail!("Package name must not be empty");
        }

        if package_name.contains("..") || package_name.contains('\\') {
            anyhow::bail!("Package name contains path traversal sequences");
        }

        if package_name.contains('#')
            || package_name.contains('?')
            || package_name.chars().any(char::is_whitespace)
        {
            anyhow::bail!("Package name contains URL-unsafe characters");
        }

        Ok(())
    }

    fn packument_url(package_name: &str) -> String {
        format!(
            "{}/{}",
            REGISTRY_BASE_URL,
            urlencoding::encode(package_name)
        )
    }

    /// Fetches and decodes a JSON document with retry and linear backoff.
    async fn fetch_json<T: DeserializeOwned>(&self, url: &str, accept: Option<&str>) -> Result<T> {
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match self.fetch_once(url, accept).await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    }
                }
            }
        }

        Err(last_error.expect("retry loop ran at least once"))
    }

    async fn fetch_once<T: DeserializeOwned>(&self, url: &str, accept: Option<&str>) -> Result<T> {
        let mut request = self.client.get(url);
        if let Some(accept) = accept {
            request = request.header(reqwest::header::ACCEPT, accept);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            anyhow::bail!("npm registry returned status code {}", response.status());
        }

        Ok(response.json().await?)
    }

    /// Weekly downloads are a soft signal: any failure maps to `None`
    /// rather than failing the metadata lookup.
    async fn fetch_weekly_downloads(&self, package_name: &str) -> Option<u64> {
        let url = format!(
            "{}/{}",
            DOWNLOADS_BASE_URL,
            urlencoding::encode(package_name)
        );

        match self.fetch_once::<DownloadsPoint>(&url, None).await {
            Ok(point) => Some(point.downloads),
            Err(_) => None,
        }
    }
}

#[async_trait]
impl RegistryRepository for NpmRegistryRepository {
    async fn latest_version(&self, package_name: &str) -> Result<Option<String>> {
        Self::validate_package_name(package_name)?;

        let url = Self::packument_url(package_name);
        let packument: AbbreviatedPackument =
            self.fetch_json(&url, Some(ABBREVIATED_ACCEPT)).await?;

        Ok(packument.dist_tags.get("latest").cloned())
    }

    async fn package_metadata(&self, package_name: &str) -> Result<RegistryMetadata> {
        Self::validate_package_name(package_name)?;

        let url = Self::packument_url(package_name);
        let packument: FullPackument = self.fetch_json(&url, None).await?;

        // Deprecation lives on the version manifests; the latest
        // dist-tag decides which one speaks for the package.
        let deprecated = packument
            .dist_tags
            .get("latest")
            .and_then(|latest| packument.versions.get(latest))
            .and_then(|manifest| manifest.deprecated.clone())
            .and_then(DeprecationNotice::into_message);

        let weekly_downloads = self.fetch_weekly_downloads(package_name).await;

        Ok(RegistryMetadata {
            deprecated,
            dist_tags: packument.dist_tags,
            time: packument.time,
            weekly_downloads,
        })
    }
}
