//! Custom field values, type tags and descriptor parsing

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum number of options shown in a searchable list
pub const DISPLAY_LIMIT: usize = 20;

/// Format used by date fields when stored as text
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A loosely typed custom field value, normalized once at the boundary
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    Number(f64),
    #[default]
    Empty,
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s),
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => n.as_f64().map(Self::Number).unwrap_or(Self::Empty),
            Value::Null | Value::Array(_) | Value::Object(_) => Self::Empty,
        }
    }
}

impl From<FieldValue> for Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Text(s) => Value::String(s),
            FieldValue::Bool(b) => Value::Bool(b),
            FieldValue::Number(n) => serde_json::Number::from_f64(n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FieldValue::Empty => Value::Null,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl FieldValue {
    /// Whether the value counts as "set" (non-empty text, `true`, non-zero number)
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty(),
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Empty => false,
        }
    }

    /// Selection seeded into a searchable list: the value when set, otherwise none
    pub fn as_selection(&self) -> Option<String> {
        if !self.is_truthy() {
            return None;
        }
        Some(self.to_string())
    }

    /// Text shown in text and date inputs; unset values show as empty
    pub fn as_text(&self) -> String {
        self.as_selection().unwrap_or_default()
    }

    /// Initial state of a switch
    ///
    /// Strings are checked only when they read `"true"` or `"1"`. Other
    /// variants keep their own truthiness.
    pub fn as_checked(&self) -> bool {
        match self {
            Self::Text(s) => s == "true" || s == "1",
            other => other.is_truthy(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Self::Number(n) => write!(f, "{}", n),
            Self::Empty => Ok(()),
        }
    }
}

/// The control a custom field renders as
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    SingleLineText,
    MultiLineText,
    Switch,
    Date,
    /// Any other tag: free text backed by a searchable option list
    Unknown(String),
}

impl FieldKind {
    /// Map a type tag onto a kind. Matching is exact.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "single_line_text" => Self::SingleLineText,
            "multi_line_text" => Self::MultiLineText,
            "switch" => Self::Switch,
            "date" => Self::Date,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The raw tag for this kind
    pub fn tag(&self) -> &str {
        match self {
            Self::SingleLineText => "single_line_text",
            Self::MultiLineText => "multi_line_text",
            Self::Switch => "switch",
            Self::Date => "date",
            Self::Unknown(tag) => tag,
        }
    }

    pub fn is_searchable(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A parsed field descriptor (`"<options>|<type-tag>"`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Raw options payload
    pub options: String,
    /// Kind derived from the type tag
    pub kind: FieldKind,
}

impl FieldDescriptor {
    /// Parse a descriptor
    ///
    /// Without a `|` the whole string is the options payload and the kind is
    /// multi-line text. Segments past the second are ignored.
    pub fn parse(raw: &str) -> Self {
        if !raw.contains('|') {
            return Self {
                options: raw.to_string(),
                kind: FieldKind::MultiLineText,
            };
        }

        let mut parts = raw.split('|');
        let options = parts.next().unwrap_or_default().to_string();
        let tag = parts.next().unwrap_or_default();

        Self {
            options,
            kind: FieldKind::from_tag(tag),
        }
    }

    /// Options derived from the payload
    pub fn derive_options(&self) -> Vec<FieldOption> {
        derive_options(&self.options)
    }
}

/// A selectable option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

impl FieldOption {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Split an options payload on `,` (no trimming, no dedup)
pub fn derive_options(payload: &str) -> Vec<FieldOption> {
    payload.split(',').map(FieldOption::new).collect()
}

/// Options whose label contains `query` (case-insensitive), in original order
///
/// An absent or empty query matches everything. The result is capped at
/// [`DISPLAY_LIMIT`].
pub fn filter_options(options: &[FieldOption], query: Option<&str>) -> Vec<FieldOption> {
    let needle = query.unwrap_or_default().to_lowercase();
    options
        .iter()
        .filter(|option| option.label.to_lowercase().contains(&needle))
        .take(DISPLAY_LIMIT)
        .cloned()
        .collect()
}

/// Parse a stored date value
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Format a date the way date fields store it
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_without_separator_is_multi_line() {
        for raw in ["", "Region", "north,south,east", "a, b"] {
            let descriptor = FieldDescriptor::parse(raw);
            assert_eq!(descriptor.kind, FieldKind::MultiLineText);
            assert_eq!(descriptor.options, raw);
        }
    }

    #[test]
    fn test_descriptor_with_switch_tag() {
        let descriptor = FieldDescriptor::parse("opt1,opt2,opt3|switch");
        assert_eq!(descriptor.kind, FieldKind::Switch);
        assert_eq!(descriptor.options, "opt1,opt2,opt3");
        assert_eq!(descriptor.derive_options().len(), 3);
    }

    #[test]
    fn test_descriptor_known_and_unknown_tags() {
        assert_eq!(FieldDescriptor::parse("|date").kind, FieldKind::Date);
        assert_eq!(
            FieldDescriptor::parse("x|single_line_text").kind,
            FieldKind::SingleLineText
        );
        assert_eq!(
            FieldDescriptor::parse("a,b|dropdown|extra").kind,
            FieldKind::Unknown("dropdown".to_string())
        );
        assert_eq!(
            FieldDescriptor::parse("a|Switch").kind,
            FieldKind::Unknown("Switch".to_string())
        );
    }

    #[test]
    fn test_derive_options_keeps_raw_segments() {
        let options = derive_options("a, b,,a");
        let values: Vec<_> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["a", " b", "", "a"]);
        assert!(options.iter().all(|o| o.label == o.value));
    }

    #[test]
    fn test_filter_is_case_insensitive_and_ordered() {
        let options = derive_options("Berlin,Bern,Paris,bergen");
        let shown = filter_options(&options, Some("BER"));
        let labels: Vec<_> = shown.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Berlin", "Bern", "bergen"]);
    }

    #[test]
    fn test_filter_caps_at_display_limit() {
        let payload = (0..50).map(|i| format!("item{}", i)).collect::<Vec<_>>().join(",");
        let options = derive_options(&payload);
        assert_eq!(filter_options(&options, None).len(), DISPLAY_LIMIT);
        assert_eq!(filter_options(&options, Some("")).len(), DISPLAY_LIMIT);

        let shown = filter_options(&options, Some("item1"));
        assert_eq!(shown.len(), 11);
        assert_eq!(shown[0].value, "item1");
        assert_eq!(shown[1].value, "item10");
    }

    #[test]
    fn test_switch_initial_state() {
        assert!(FieldValue::from("1").as_checked());
        assert!(FieldValue::from("true").as_checked());
        assert!(!FieldValue::from("0").as_checked());
        assert!(!FieldValue::from("yes").as_checked());
        assert!(FieldValue::Bool(true).as_checked());
        assert!(!FieldValue::Bool(false).as_checked());
        assert!(FieldValue::Number(2.0).as_checked());
        assert!(!FieldValue::Empty.as_checked());
    }

    #[test]
    fn test_selection_from_default() {
        assert_eq!(FieldValue::from("Paris").as_selection(), Some("Paris".to_string()));
        assert_eq!(FieldValue::from("").as_selection(), None);
        assert_eq!(FieldValue::Number(3.0).as_selection(), Some("3".to_string()));
        assert_eq!(FieldValue::Number(0.0).as_selection(), None);
        assert_eq!(FieldValue::Bool(false).as_selection(), None);
        assert_eq!(FieldValue::Empty.as_text(), "");
    }

    #[test]
    fn test_value_json_normalization() {
        let values: Vec<FieldValue> =
            serde_json::from_str(r#"["a", true, 1.5, null, [1], {"k": 1}]"#).unwrap();
        assert_eq!(
            values,
            vec![
                FieldValue::from("a"),
                FieldValue::Bool(true),
                FieldValue::Number(1.5),
                FieldValue::Empty,
                FieldValue::Empty,
                FieldValue::Empty,
            ]
        );
        assert_eq!(serde_json::to_string(&FieldValue::Empty).unwrap(), "null");
    }

    #[test]
    fn test_date_helpers() {
        let date = parse_date("2024-02-29").unwrap();
        assert_eq!(format_date(date), "2024-02-29");
        assert!(parse_date("29/02/2024").is_none());
    }
}
