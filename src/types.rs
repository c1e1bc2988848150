//! Core microdata types and configurations
//!
//! # Key Types
//!
//! - [`MicrodataItem`] - One extracted item: its types, identifier and properties
//! - [`ExtractorConfig`] - Configuration for [`MicrodataExtractor`]
//!
//! # Usage
//!
//! ```rust,ignore
//! use html_microdata::{extract_from_markup, MicrodataItem};
//!
//! let items = extract_from_markup(None, html);
//! for item in &items {
//!     if item.has_type("https://schema.org/Recipe") {
//!         println!("{}", item.get_text("name").unwrap_or_default());
//!     }
//! }
//! ```
//!
//! [`MicrodataExtractor`]: crate::builder::MicrodataExtractor

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use url::Url;

use crate::fetch::FetchConfig;
use crate::value::PropertyValue;

/// Whether a property name holds a list of values
///
/// Names ending in `s` are treated as plural. This is a naming convention,
/// not a linguistic analysis: `address` is plural too.
pub fn is_multi_valued(name: &str) -> bool {
    name.ends_with('s')
}

/// A microdata item
///
/// Items are produced by the extraction functions and are not modified
/// afterwards; the mutators exist for assembling items by hand.
///
/// `types` and `properties` are always present, possibly empty. Both keep
/// insertion order: types in declaration order, properties in order of the
/// first element that contributed to each name.
///
/// # Property Names
///
/// A property whose name ends in `s` always holds a [`PropertyValue::List`],
/// even when a single element contributed to it. Any other name holds a single
/// value, and a later element with the same name replaces the earlier value.
///
/// # Examples
///
/// ```rust,ignore
/// use html_microdata::{MicrodataItem, PropertyValue};
///
/// let mut item = MicrodataItem::new();
/// item.add_type("https://schema.org/Person");
/// item.add_property("name", PropertyValue::from("Ada"));
/// item.add_property("awards", PropertyValue::from("Medal"));
///
/// assert_eq!(item.get_text("name"), Some("Ada"));
/// assert_eq!(item.get_list("awards").map(|v| v.len()), Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MicrodataItem {
    types: IndexSet<String>,
    id: Option<String>,
    properties: IndexMap<String, PropertyValue>,
}

impl MicrodataItem {
    /// Create an empty item
    pub fn new() -> Self {
        Self::default()
    }

    /// Reassemble an item from its parts
    pub fn from_parts<I, S>(
        types: I,
        id: Option<String>,
        properties: IndexMap<String, PropertyValue>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            types: types.into_iter().map(Into::into).collect(),
            id,
            properties,
        }
    }

    pub fn types(&self) -> &IndexSet<String> {
        &self.types
    }

    pub fn types_mut(&mut self) -> &mut IndexSet<String> {
        &mut self.types
    }

    /// Replace the type set; `None` clears it
    pub fn set_types(&mut self, types: Option<IndexSet<String>>) {
        self.types = types.unwrap_or_default();
    }

    /// Add a type, returning `false` if it was already declared
    pub fn add_type<S: Into<String>>(&mut self, item_type: S) -> bool {
        self.types.insert(item_type.into())
    }

    pub fn has_type(&self, item_type: &str) -> bool {
        self.types.contains(item_type)
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    pub fn properties(&self) -> &IndexMap<String, PropertyValue> {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut IndexMap<String, PropertyValue> {
        &mut self.properties
    }

    /// Replace the property map; `None` clears it
    pub fn set_properties(&mut self, properties: Option<IndexMap<String, PropertyValue>>) {
        self.properties = properties.unwrap_or_default();
    }

    /// Add a value under `name`, following the plural naming rule
    ///
    /// Plural names (see [`is_multi_valued`]) append to a list created on
    /// first use. Other names overwrite any previous value in place.
    pub fn add_property<S: Into<String>>(&mut self, name: S, value: PropertyValue) {
        let name = name.into();

        if is_multi_valued(&name) {
            let entry = self
                .properties
                .entry(name)
                .or_insert_with(|| PropertyValue::List(Vec::new()));

            match entry {
                PropertyValue::List(values) => values.push(value),
                // Only reachable when a caller stored a scalar under a plural
                // name through `properties_mut`.
                other => {
                    let previous = std::mem::replace(other, PropertyValue::Null);
                    *other = PropertyValue::List(vec![previous, value]);
                }
            }
        } else {
            self.properties.insert(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(PropertyValue::as_text)
    }

    pub fn get_item(&self, name: &str) -> Option<&MicrodataItem> {
        self.get(name).and_then(PropertyValue::as_item)
    }

    pub fn get_list(&self, name: &str) -> Option<&[PropertyValue]> {
        self.get(name).and_then(PropertyValue::as_list)
    }

    /// Project this item onto plain JSON
    ///
    /// The result has the shape
    /// `{"type": [...], "id": "..." | null, "properties": {...}}` with
    /// properties in insertion order.
    pub fn to_json(&self) -> JsonValue {
        let mut properties = Map::new();
        for (name, value) in &self.properties {
            properties.insert(name.clone(), value.to_json());
        }

        let mut object = Map::new();
        object.insert(
            "type".to_string(),
            JsonValue::Array(
                self.types
                    .iter()
                    .map(|t| JsonValue::String(t.clone()))
                    .collect(),
            ),
        );
        object.insert(
            "id".to_string(),
            self.id
                .as_ref()
                .map_or(JsonValue::Null, |id| JsonValue::String(id.clone())),
        );
        object.insert("properties".to_string(), JsonValue::Object(properties));

        JsonValue::Object(object)
    }
}

impl fmt::Display for MicrodataItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MicrodataItem{types=[")?;
        for (i, item_type) in self.types.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(item_type)?;
        }

        f.write_str("], id=")?;
        match &self.id {
            Some(id) => f.write_str(id)?,
            None => f.write_str("null")?,
        }

        f.write_str(", properties={")?;
        for (i, (name, value)) in self.properties.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        f.write_str("}}")
    }
}

/// Configuration for [`MicrodataExtractor`]
///
/// [`MicrodataExtractor`]: crate::builder::MicrodataExtractor
#[derive(Debug, Clone, Default)]
pub struct ExtractorConfig {
    pub(crate) base_url: Option<Url>,
    pub(crate) fetch: FetchConfig,
}

impl ExtractorConfig {
    /// Create a new extractor configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL used for markup that carries no URL of its own
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Set the configuration used to fetch documents
    pub fn with_fetch_config(mut self, fetch: FetchConfig) -> Self {
        self.fetch = fetch;
        self
    }

    // Accessors
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }
    pub fn fetch_config(&self) -> &FetchConfig {
        &self.fetch
    }
}
