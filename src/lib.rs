//! Microdata extraction from HTML documents
//!
//! This crate extracts [WHATWG microdata] items from HTML: elements marked
//! with `itemscope` become [`MicrodataItem`]s carrying their `itemtype`
//! tokens, their `itemid` and a map of `itemprop` properties. Property values
//! follow the per-element rules of the microdata model (text content,
//! `content`/`value`/`data` attributes, URLs resolved against the document
//! address, parsed `<time>` values) and nested items are resolved
//! recursively.
//!
//! Names ending in `s` always hold a list of values; any other name holds a
//! single value, with later elements replacing earlier ones.
//!
//! # Examples
//!
//! ```rust
//! use html_microdata::extract_from_markup;
//! use url::Url;
//!
//! let html = r#"
//!     <div itemscope itemtype="https://schema.org/Person">
//!         <span itemprop="name">Ada Lovelace</span>
//!         <img itemprop="photos" src="ada.jpg">
//!     </div>
//! "#;
//!
//! let base = Url::parse("https://example.com/people/ada.html").unwrap();
//! let items = extract_from_markup(Some(&base), html);
//!
//! assert_eq!(items.len(), 1);
//! assert_eq!(items[0].get_text("name"), Some("Ada Lovelace"));
//! assert_eq!(
//!     items[0].get_list("photos").unwrap()[0].as_text(),
//!     Some("https://example.com/people/ada.jpg")
//! );
//! ```
//!
//! [WHATWG microdata]: https://html.spec.whatwg.org/multipage/microdata.html

pub mod builder;
pub mod error;
pub mod fetch;
pub mod microdata;
pub mod node_ext;
pub mod test_utils;
pub mod types;
pub mod utils;
pub mod value;

// Re-export commonly used types
pub use builder::{MicrodataExtractor, MicrodataExtractorBuilder};
pub use error::{Error, Result};
pub use fetch::{DocumentSource, FetchConfig, HttpDocumentSource};
pub use microdata::{
    extract_from_document, extract_from_file, extract_from_markup, extract_from_source,
    extract_from_url, find_root_items, resolve_item,
};
pub use types::{is_multi_valued, ExtractorConfig, MicrodataItem};
pub use value::PropertyValue;
