//! Test utilities for microdata extraction
//!
//! Helpers for tests that should not touch the network: an in-memory
//! [`DocumentSource`] and shortcuts for pulling a single item out of markup.

use std::collections::HashMap;

use url::Url;

use crate::error::{Error, Result};
use crate::fetch::DocumentSource;
use crate::microdata::extract_from_markup;
use crate::types::MicrodataItem;

/// A [`DocumentSource`] serving canned documents
///
/// Unknown URLs fail like an HTTP 404.
///
/// # Examples
///
/// ```
/// use html_microdata::test_utils::StaticDocumentSource;
/// use html_microdata::microdata::extract_from_source;
///
/// let source = StaticDocumentSource::new()
///     .with_document("http://x.test/", r#"<div itemscope itemtype="Thing"></div>"#);
///
/// let items = extract_from_source(&source, "http://x.test/").unwrap();
/// assert_eq!(items.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticDocumentSource {
    documents: HashMap<String, String>,
}

impl StaticDocumentSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` for `url`
    ///
    /// The URL is normalized the same way lookups are, so
    /// `http://x.test` and `http://x.test/` are the same document.
    pub fn with_document<U: AsRef<str>, H: Into<String>>(mut self, url: U, html: H) -> Self {
        let key = Url::parse(url.as_ref())
            .map(|url| url.to_string())
            .unwrap_or_else(|_| url.as_ref().to_string());
        self.documents.insert(key, html.into());
        self
    }
}

impl DocumentSource for StaticDocumentSource {
    fn fetch(&self, url: &Url) -> Result<String> {
        self.documents
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| Error::http_owned(format!("404 Not Found for {}", url)))
    }
}

/// Extract the items of `html` with an optional base URL given as a string
///
/// Panics if `base` is not a valid URL.
pub fn items_from_html(base: Option<&str>, html: &str) -> Vec<MicrodataItem> {
    let base = base.map(|base| Url::parse(base).expect("invalid base URL in test"));
    extract_from_markup(base.as_ref(), html)
}

/// Extract the only root item of `html`
///
/// Panics unless `html` contains exactly one root item.
pub fn single_item_from_html(html: &str) -> MicrodataItem {
    let mut items = items_from_html(None, html);
    assert_eq!(
        items.len(),
        1,
        "expected exactly one root item, found {}",
        items.len()
    );
    items.remove(0)
}
