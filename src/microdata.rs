//! Microdata extraction from DOM elements
//!
//! Extraction runs in two steps. The document scanner ([`find_root_items`])
//! collects every `itemscope` element that is not itself a property of another
//! item. The item resolver ([`resolve_item`]) then builds one
//! [`MicrodataItem`] per root, descending into nested items as it meets them.
//!
//! A property belongs to its nearest enclosing `itemscope` element only. In
//!
//! ```html
//! <div itemscope>
//!   <span itemprop="a">
//!     <div itemscope itemprop="b"><span itemprop="a">X</span></div>
//!   </span>
//! </div>
//! ```
//!
//! the inner `a` is a property of the item under `b`, never of the outer item.
//! Text values skip the text of nested items for the same reason, so the
//! outer `a` is empty here.
//!
//! Extraction never fails. Missing attributes, unresolvable URLs and
//! unparsable dates produce [`PropertyValue::Null`] for that one value.

use std::path::Path;

use dom_query::{Document, Node, Selection};
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::fetch::{DocumentSource, HttpDocumentSource};
use crate::node_ext::{NodeExt, ITEMID, ITEMPROP, ITEMTYPE};
use crate::types::MicrodataItem;
use crate::utils::{parse_datetime, resolve_url, split_tokens};
use crate::value::PropertyValue;

/// Find every root item element in document order
///
/// A root item carries `itemscope` but not `itemprop`. Items that are also
/// properties are reached through the item that owns them.
pub fn find_root_items(doc: &Document) -> Vec<Node<'_>> {
    doc.select("[itemscope]")
        .nodes()
        .iter()
        .filter(|node| !node.is_item_property())
        .cloned()
        .collect()
}

/// Build the item rooted at `scope`
///
/// Relative `src`/`href` values are resolved against `base`. Without a base
/// only absolute URLs survive; relative ones become [`PropertyValue::Null`].
pub fn resolve_item(base: Option<&Url>, scope: &Node) -> MicrodataItem {
    let mut item = MicrodataItem::new();

    if let Some(types) = scope.attr_string(ITEMTYPE) {
        for item_type in split_tokens(&types) {
            item.add_type(item_type);
        }
    }

    item.set_id(scope.attr_string(ITEMID));

    for property in find_properties(scope) {
        let names = property.attr_string(ITEMPROP).unwrap_or_default();
        let value = extract_value(base, &property);

        for name in split_tokens(&names) {
            item.add_property(name, value.clone());
        }
    }

    item
}

/// Property elements owned by `scope`, in document order
fn find_properties<'a>(scope: &Node<'a>) -> Vec<Node<'a>> {
    let candidates = Selection::from(scope.clone()).select("[itemprop]");

    candidates
        .nodes()
        .iter()
        .filter(|candidate| !candidate.is_same_node(scope))
        .filter(|candidate| belongs_to(candidate, scope))
        .cloned()
        .collect()
}

/// Whether the closest enclosing scope of `property` is `scope`
fn belongs_to<'a>(property: &Node<'a>, scope: &Node<'a>) -> bool {
    match property.nearest_scope_ancestor() {
        Some(owner) => owner.is_same_node(scope),
        None => true,
    }
}

/// Extract the value an element contributes to its property names
fn extract_value(base: Option<&Url>, element: &Node) -> PropertyValue {
    if element.is_item_scope() {
        return PropertyValue::from(resolve_item(base, element));
    }

    let tag = element.element_tag().unwrap_or_default();

    match tag.as_str() {
        "meta" => attribute_value(element, "content"),
        "audio" | "embed" | "iframe" | "img" | "source" | "track" | "video" => {
            url_value(base, element, "src")
        }
        "a" | "area" | "link" => url_value(base, element, "href"),
        "object" => attribute_value(element, "data"),
        "data" | "meter" => attribute_value(element, "value"),
        "time" => time_value(element),
        _ => PropertyValue::Text(element.scoped_text()),
    }
}

fn attribute_value(element: &Node, attr: &str) -> PropertyValue {
    match element.attr_string(attr) {
        Some(value) => PropertyValue::Text(value),
        None => {
            debug!("<{}> property without '{}' attribute", tag_of(element), attr);
            PropertyValue::Null
        }
    }
}

fn url_value(base: Option<&Url>, element: &Node, attr: &str) -> PropertyValue {
    let Some(reference) = element.attr_string(attr) else {
        debug!("<{}> property without '{}' attribute", tag_of(element), attr);
        return PropertyValue::Null;
    };

    match resolve_url(base, &reference) {
        Some(url) => PropertyValue::Text(url),
        None => {
            debug!(
                "Cannot resolve {}='{}' against {:?}",
                attr,
                reference,
                base.map(Url::as_str)
            );
            PropertyValue::Null
        }
    }
}

fn time_value(element: &Node) -> PropertyValue {
    let raw = element
        .attr_string("datetime")
        .filter(|datetime| !datetime.trim().is_empty())
        .unwrap_or_else(|| element.scoped_text());

    match parse_datetime(&raw) {
        Some(dt) => PropertyValue::DateTime(dt),
        None => {
            debug!("Cannot parse '{}' as a date/time", raw);
            PropertyValue::Null
        }
    }
}

fn tag_of(element: &Node) -> String {
    element.element_tag().unwrap_or_default()
}

/// Extract all root items of a parsed document
pub fn extract_from_document(base: Option<&Url>, doc: &Document) -> Vec<MicrodataItem> {
    let items: Vec<MicrodataItem> = find_root_items(doc)
        .iter()
        .map(|root| resolve_item(base, root))
        .collect();

    debug!("Extracted {} microdata items", items.len());
    items
}

/// Extract all root items from HTML markup
///
/// Blank markup yields no items. Malformed markup is recovered by the HTML
/// parser and yields whatever items survive.
pub fn extract_from_markup(base: Option<&Url>, html: &str) -> Vec<MicrodataItem> {
    if html.trim().is_empty() {
        return Vec::new();
    }

    let doc = Document::from(html);
    extract_from_document(base, &doc)
}

/// Fetch `url` through `source` and extract its items, using `url` as base
pub fn extract_from_source(source: &dyn DocumentSource, url: &str) -> Result<Vec<MicrodataItem>> {
    let url = Url::parse(url)?;
    let html = source.fetch(&url)?;
    Ok(extract_from_markup(Some(&url), &html))
}

/// Fetch `url` over HTTP and extract its items, using `url` as base
///
/// Fails when the document cannot be retrieved.
pub fn extract_from_url(url: &str) -> Result<Vec<MicrodataItem>> {
    extract_from_source(&HttpDocumentSource::new()?, url)
}

/// Read an HTML file and extract its items
///
/// The `file://` URL of the file is the base for relative references.
pub fn extract_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<MicrodataItem>> {
    let path = path.as_ref();
    let html = std::fs::read_to_string(path).map_err(|e| {
        Error::io(format!("Failed to read file '{}': {}", path.display(), e))
    })?;

    let base = std::fs::canonicalize(path)
        .ok()
        .and_then(|absolute| Url::from_file_path(absolute).ok());

    Ok(extract_from_markup(base.as_ref(), &html))
}
