//! Builder pattern API for configuring extraction
//!
//! [`MicrodataExtractor`] bundles an [`ExtractorConfig`] with the
//! [`DocumentSource`] used for URL-based extraction. The free functions in
//! [`crate::microdata`] cover the common cases; the extractor is for callers
//! that need a default base URL, custom fetch settings or their own source.
//!
//! # Examples
//!
//! ```rust,ignore
//! use html_microdata::{FetchConfig, MicrodataExtractorBuilder};
//! use std::time::Duration;
//!
//! let extractor = MicrodataExtractorBuilder::new()
//!     .with_fetch_config(FetchConfig::new().with_timeout(Duration::from_secs(10)))
//!     .build()?;
//!
//! let items = extractor.extract_url("https://example.com/product/42")?;
//! ```

use std::path::Path;

use dom_query::Document;
use url::Url;

use crate::error::{Error, Result};
use crate::fetch::{DocumentSource, FetchConfig, HttpDocumentSource};
use crate::microdata;
use crate::types::{ExtractorConfig, MicrodataItem};

/// Configured microdata extractor
pub struct MicrodataExtractor {
    config: ExtractorConfig,
    source: Box<dyn DocumentSource>,
}

impl MicrodataExtractor {
    /// Create an extractor with default configuration
    pub fn new() -> Result<Self> {
        MicrodataExtractorBuilder::new().build()
    }

    pub fn builder() -> MicrodataExtractorBuilder {
        MicrodataExtractorBuilder::new()
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract items from markup, resolving against the configured base URL
    pub fn extract_html(&self, html: &str) -> Vec<MicrodataItem> {
        microdata::extract_from_markup(self.config.base_url(), html)
    }

    /// Extract items from markup whose own address is `base`
    pub fn extract_html_with_base(&self, base: &Url, html: &str) -> Vec<MicrodataItem> {
        microdata::extract_from_markup(Some(base), html)
    }

    /// Extract items from an already parsed document
    pub fn extract_document(&self, doc: &Document) -> Vec<MicrodataItem> {
        microdata::extract_from_document(self.config.base_url(), doc)
    }

    /// Retrieve `url` through the configured source and extract its items
    pub fn extract_url(&self, url: &str) -> Result<Vec<MicrodataItem>> {
        microdata::extract_from_source(self.source.as_ref(), url)
    }

    /// Extract items from a local HTML file through the configured source
    ///
    /// The file's `file://` URL is both what the source is asked for and the
    /// base for relative references.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<MicrodataItem>> {
        let path = path.as_ref();
        let absolute = std::fs::canonicalize(path).map_err(|e| {
            Error::io(format!("Failed to read file '{}': {}", path.display(), e))
        })?;
        let url = Url::from_file_path(&absolute).map_err(|_| {
            Error::parse_owned(format!("Cannot express '{}' as a file URL", absolute.display()))
        })?;

        microdata::extract_from_source(self.source.as_ref(), url.as_str())
    }
}

/// Builder for [`MicrodataExtractor`]
#[derive(Default)]
pub struct MicrodataExtractorBuilder {
    config: ExtractorConfig,
    source: Option<Box<dyn DocumentSource>>,
}

impl MicrodataExtractorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: ExtractorConfig) -> Self {
        self.config = config;
        self
    }

    /// Base URL for markup passed without one
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.config = self.config.with_base_url(base_url);
        self
    }

    /// Settings for the default HTTP source
    ///
    /// Ignored when a custom source is set with [`with_source`](Self::with_source).
    pub fn with_fetch_config(mut self, fetch: FetchConfig) -> Self {
        self.config = self.config.with_fetch_config(fetch);
        self
    }

    /// Use a custom document source for URL extraction
    pub fn with_source<S: DocumentSource + 'static>(mut self, source: S) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn build(self) -> Result<MicrodataExtractor> {
        let source = match self.source {
            Some(source) => source,
            None => Box::new(HttpDocumentSource::with_config(
                self.config.fetch_config().clone(),
            )?),
        };

        Ok(MicrodataExtractor {
            config: self.config,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::StaticDocumentSource;

    #[test]
    fn test_default_base_url_applies_to_markup() {
        let extractor = MicrodataExtractorBuilder::new()
            .with_base_url(Url::parse("http://x.test/a/index.html").unwrap())
            .build()
            .unwrap();

        let items = extractor.extract_html(r#"<div itemscope><img itemprop="photo" src="b.jpg"></div>"#);
        assert_eq!(items[0].get_text("photo"), Some("http://x.test/a/b.jpg"));
    }

    #[test]
    fn test_explicit_base_overrides_default() {
        let extractor = MicrodataExtractorBuilder::new()
            .with_base_url(Url::parse("http://default.test/").unwrap())
            .build()
            .unwrap();

        let base = Url::parse("http://other.test/dir/").unwrap();
        let items = extractor.extract_html_with_base(
            &base,
            r#"<div itemscope><a itemprop="url" href="page">x</a></div>"#,
        );
        assert_eq!(items[0].get_text("url"), Some("http://other.test/dir/page"));
    }

    #[test]
    fn test_custom_source_uses_url_as_base() {
        let source = StaticDocumentSource::new().with_document(
            "http://shop.test/items/1",
            r#"<div itemscope itemtype="Product"><img itemprop="image" src="1.png"></div>"#,
        );
        let extractor = MicrodataExtractorBuilder::new()
            .with_source(source)
            .build()
            .unwrap();

        let items = extractor.extract_url("http://shop.test/items/1").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].get_text("image"), Some("http://shop.test/items/1.png"));
    }

    #[test]
    fn test_retrieval_failure_is_an_error() {
        let extractor = MicrodataExtractorBuilder::new()
            .with_source(StaticDocumentSource::new())
            .build()
            .unwrap();

        let err = extractor.extract_url("http://missing.test/").unwrap_err();
        assert!(err.is_retrieval());
    }

    #[test]
    fn test_extract_file_goes_through_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, "<p>on disk</p>").unwrap();

        let url = Url::from_file_path(std::fs::canonicalize(&path).unwrap()).unwrap();
        let source = StaticDocumentSource::new().with_document(
            url.as_str(),
            r#"<div itemscope><img itemprop="image" src="pic.png"></div>"#,
        );
        let extractor = MicrodataExtractorBuilder::new()
            .with_source(source)
            .build()
            .unwrap();

        let items = extractor.extract_file(&path).unwrap();
        assert_eq!(items.len(), 1);
        let image = items[0].get_text("image").unwrap();
        assert!(image.starts_with("file://"));
        assert!(image.ends_with("/pic.png"));
    }

    #[test]
    fn test_extract_file_with_default_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, r#"<div itemscope><b itemprop="name">disk</b></div>"#).unwrap();

        let extractor = MicrodataExtractor::new().unwrap();
        let items = extractor.extract_file(&path).unwrap();
        assert_eq!(items[0].get_text("name"), Some("disk"));

        let err = extractor.extract_file(dir.path().join("missing.html")).unwrap_err();
        assert!(err.is_retrieval());
    }

    #[test]
    fn test_invalid_url_is_an_error() {
        let extractor = MicrodataExtractorBuilder::new()
            .with_source(StaticDocumentSource::new())
            .build()
            .unwrap();

        assert!(extractor.extract_url("not a url").is_err());
    }
}
