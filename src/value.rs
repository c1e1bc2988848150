//! Property values of microdata items
//!
//! A microdata property holds one of a small, closed set of values, modelled
//! by [`PropertyValue`]:
//!
//! - [`PropertyValue::Text`] - text content or an attribute value
//! - [`PropertyValue::DateTime`] - the parsed value of a `<time>` element
//! - [`PropertyValue::Item`] - a nested item (`itemprop` together with `itemscope`)
//! - [`PropertyValue::List`] - all values of a multi-valued (pluralized) property
//! - [`PropertyValue::Null`] - a value that could not be extracted, such as an
//!   unresolvable URL or an unparsable date
//!
//! Values serialize with explicit variant tags so that an item read back from
//! its serialized form is structurally identical to the original. For a plain
//! JSON projection, use [`PropertyValue::to_json`].

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::types::MicrodataItem;

/// A single property value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    /// No value could be extracted
    Null,
    /// Text content or a (possibly resolved) attribute value
    Text(String),
    /// A parsed date/time
    DateTime(DateTime<Utc>),
    /// A nested item
    Item(Box<MicrodataItem>),
    /// Values of a multi-valued property, in document order
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, PropertyValue::List(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            PropertyValue::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    pub fn as_item(&self) -> Option<&MicrodataItem> {
        match self {
            PropertyValue::Item(item) => Some(item),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[PropertyValue]> {
        match self {
            PropertyValue::List(values) => Some(values),
            _ => None,
        }
    }

    /// Project this value onto plain JSON
    ///
    /// Text becomes a string, dates become RFC 3339 strings, nested items
    /// become objects (see [`MicrodataItem::to_json`]) and lists become arrays.
    pub fn to_json(&self) -> JsonValue {
        match self {
            PropertyValue::Null => JsonValue::Null,
            PropertyValue::Text(text) => JsonValue::String(text.clone()),
            PropertyValue::DateTime(dt) => {
                JsonValue::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            PropertyValue::Item(item) => item.to_json(),
            PropertyValue::List(values) => {
                JsonValue::Array(values.iter().map(PropertyValue::to_json).collect())
            }
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Null => f.write_str("null"),
            PropertyValue::Text(text) => f.write_str(text),
            PropertyValue::DateTime(dt) => {
                f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            PropertyValue::Item(item) => write!(f, "{}", item),
            PropertyValue::List(values) => {
                f.write_str("[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<String> for PropertyValue {
    fn from(text: String) -> Self {
        PropertyValue::Text(text)
    }
}

impl From<&str> for PropertyValue {
    fn from(text: &str) -> Self {
        PropertyValue::Text(text.to_string())
    }
}

impl From<DateTime<Utc>> for PropertyValue {
    fn from(dt: DateTime<Utc>) -> Self {
        PropertyValue::DateTime(dt)
    }
}

impl From<MicrodataItem> for PropertyValue {
    fn from(item: MicrodataItem) -> Self {
        PropertyValue::Item(Box::new(item))
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(values: Vec<PropertyValue>) -> Self {
        PropertyValue::List(values)
    }
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(PropertyValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_accessors() {
        let text = PropertyValue::from("hello");
        assert_eq!(text.as_text(), Some("hello"));
        assert!(text.as_item().is_none());
        assert!(!text.is_null());

        let missing: PropertyValue = Option::<String>::None.into();
        assert!(missing.is_null());

        let list = PropertyValue::from(vec![PropertyValue::from("a")]);
        assert!(list.is_list());
        assert_eq!(list.as_list().map(<[PropertyValue]>::len), Some(1));
    }

    #[test]
    fn test_to_json() {
        let dt = Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap();
        let value = PropertyValue::List(vec![
            PropertyValue::from("a"),
            PropertyValue::Null,
            PropertyValue::DateTime(dt),
        ]);

        assert_eq!(value.to_json(), json!(["a", null, "2020-01-02T00:00:00Z"]));
    }

    #[test]
    fn test_display() {
        let value = PropertyValue::List(vec![PropertyValue::from("a"), PropertyValue::Null]);
        assert_eq!(value.to_string(), "[a, null]");
    }

    #[test]
    fn test_serde_keeps_variant_tags() {
        let dt = Utc.with_ymd_and_hms(2021, 6, 1, 12, 30, 0).unwrap();
        let value = PropertyValue::List(vec![
            PropertyValue::Text("2021-06-01T12:30:00Z".to_string()),
            PropertyValue::DateTime(dt),
        ]);

        let json = serde_json::to_string(&value).unwrap();
        let back: PropertyValue = serde_json::from_str(&json).unwrap();

        assert_eq!(back, value);
        assert!(back.as_list().unwrap()[0].as_text().is_some());
        assert!(back.as_list().unwrap()[1].as_datetime().is_some());
    }
}
