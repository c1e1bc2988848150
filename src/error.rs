//! Error handling for html-microdata
//!
//! Extraction itself is infallible: malformed markup, unresolvable URLs and
//! unparsable dates degrade to empty results or [`PropertyValue::Null`]
//! values. Errors only surface at the boundaries of the crate, when a
//! document has to be retrieved or a serialized item has to be read back.
//!
//! # Error Types
//!
//! - [`Error::ParseError`] - Input that cannot be interpreted (e.g. a bad source URL)
//! - [`Error::HttpError`] - HTTP client and networking errors while fetching a document
//! - [`Error::UrlError`] - URL parsing errors
//! - [`Error::JsonError`] - JSON parsing and serialization errors
//! - [`Error::IoError`] - File system and I/O errors
//!
//! # Usage
//!
//! ```rust,ignore
//! use html_microdata::{extract_from_url, Error};
//!
//! match extract_from_url("https://example.com/recipe.html") {
//!     Ok(items) => println!("found {} items", items.len()),
//!     Err(err) if err.is_retrieval() => println!("could not fetch: {}", err),
//!     Err(err) => println!("other error: {}", err),
//! }
//! ```
//!
//! # Memory Efficiency
//!
//! Error messages use `Cow<'static, str>` to avoid unnecessary allocations
//! when using static error messages, while still supporting owned strings
//! for dynamic error context.
//!
//! [`PropertyValue::Null`]: crate::value::PropertyValue::Null

use std::borrow::Cow;
use thiserror::Error;

/// Error type for all html-microdata operations
#[derive(Error, Debug)]
pub enum Error {
    /// Input that cannot be interpreted
    ///
    /// Never produced for malformed HTML, which the parser recovers from.
    #[error("Parse error: {0}")]
    ParseError(Cow<'static, str>),

    /// HTTP client and networking errors
    ///
    /// Occurs when a document cannot be fetched: connection failures,
    /// timeouts, redirect loops or a non-success status code.
    #[error("HTTP error: {0}")]
    HttpError(Cow<'static, str>),

    /// URL parsing errors
    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    /// JSON parsing and serialization errors
    ///
    /// Automatically converted from `serde_json::Error` when JSON operations fail.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File system and I/O errors
    ///
    /// Automatically converted from `std::io::Error` when file operations fail.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// Create a parse error with a static string
    pub fn parse_static(msg: &'static str) -> Self {
        Error::ParseError(Cow::Borrowed(msg))
    }

    /// Create a parse error with an owned string
    pub fn parse_owned(msg: String) -> Self {
        Error::ParseError(Cow::Owned(msg))
    }

    /// Create an HTTP error with a static string
    pub fn http_static(msg: &'static str) -> Self {
        Error::HttpError(Cow::Borrowed(msg))
    }

    /// Create an HTTP error with an owned string
    pub fn http_owned(msg: String) -> Self {
        Error::HttpError(Cow::Owned(msg))
    }

    /// Create an IO error from a message
    ///
    /// For more specific IO errors, use the standard `std::io::Error` constructors
    /// and let them be automatically converted.
    pub fn io(msg: String) -> Self {
        Error::IoError(std::io::Error::new(std::io::ErrorKind::Other, msg))
    }

    /// Whether this error means the document could not be retrieved
    pub fn is_retrieval(&self) -> bool {
        matches!(self, Error::HttpError(_) | Error::IoError(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        match err.url() {
            Some(url) => Error::http_owned(format!("{} ({})", err, url)),
            None => Error::http_owned(err.to_string()),
        }
    }
}

/// Result type alias for html-microdata operations
pub type Result<T> = std::result::Result<T, Error>;
