//! Document retrieval
//!
//! This module provides the [`DocumentSource`] seam used by URL-based
//! extraction, and [`HttpDocumentSource`], the default implementation backed
//! by a blocking `reqwest` client. Retrieval is a single request: no retries,
//! no partial results. Timeouts and redirect limits come from [`FetchConfig`].

use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::redirect::Policy;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{Error, Result};

/// Configuration for document retrieval
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Timeout for a whole request
    pub fetch_timeout: Duration,
    /// Whether to follow redirects
    pub follow_redirects: bool,
    /// Maximum number of redirects to follow
    pub max_redirects: usize,
    /// Custom headers to include in requests
    pub default_headers: HashMap<String, String>,
    /// Whether to validate SSL certificates
    pub verify_ssl: bool,
    /// User agent string
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(30),
            follow_redirects: true,
            max_redirects: 5,
            default_headers: HashMap::new(),
            verify_ssl: true,
            user_agent: concat!("html-microdata/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FetchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_redirects(mut self, follow: bool, max_redirects: usize) -> Self {
        self.follow_redirects = follow;
        self.max_redirects = max_redirects;
        self
    }

    pub fn with_header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_ssl_verification(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }

    fn header_map(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        for (name, value) in &self.default_headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => warn!("Ignoring invalid header '{}: {}'", name, value),
            }
        }

        headers
    }
}

/// Something that can retrieve the HTML of a document by URL
///
/// Implement this to plug in caching, authentication or canned documents for
/// tests.
pub trait DocumentSource {
    fn fetch(&self, url: &Url) -> Result<String>;
}

/// Retrieves documents over HTTP(S), and from disk for `file://` URLs
pub struct HttpDocumentSource {
    client: Client,
    config: FetchConfig,
}

impl HttpDocumentSource {
    /// Create a source with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(FetchConfig::default())
    }

    /// Create a source with custom configuration
    pub fn with_config(config: FetchConfig) -> Result<Self> {
        let redirect = if config.follow_redirects {
            Policy::limited(config.max_redirects)
        } else {
            Policy::none()
        };

        let client = Client::builder()
            .timeout(config.fetch_timeout)
            .user_agent(config.user_agent.clone())
            .redirect(redirect)
            .default_headers(config.header_map())
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    fn fetch_http(&self, url: &Url) -> Result<String> {
        info!("Fetching {}", url);

        let response = self.client.get(url.as_str()).send()?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::http_owned(format!("{} for {}", status, url)));
        }

        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
        {
            if !content_type.contains("html") {
                warn!("{} has content type '{}', parsing as HTML anyway", url, content_type);
            }
        }

        let body = response.text()?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }

    fn fetch_file(&self, url: &Url) -> Result<String> {
        let path = url
            .to_file_path()
            .map_err(|_| Error::parse_owned(format!("Not a local file URL: {}", url)))?;

        std::fs::read_to_string(&path).map_err(|e| {
            Error::io(format!("Failed to read file '{}': {}", path.display(), e))
        })
    }
}

impl DocumentSource for HttpDocumentSource {
    fn fetch(&self, url: &Url) -> Result<String> {
        match url.scheme() {
            "http" | "https" => self.fetch_http(url),
            "file" => self.fetch_file(url),
            scheme => Err(Error::parse_owned(format!(
                "Unsupported URL scheme '{}': {}",
                scheme, url
            ))),
        }
    }
}
