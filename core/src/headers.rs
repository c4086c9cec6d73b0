//! Header normalization shared by the builder and the executor.
//!
//! Every header value that crosses the boundary is a single string. Callers
//! may hand in numbers, booleans or lists; lists are joined with `", "` in
//! their original order. Header names keep the casing they were given and
//! case variants are not merged.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// A header value as supplied by a caller, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValue {
    Single(String),
    List(Vec<String>),
}

impl HeaderValue {
    /// Collapse to the wire form.
    pub fn normalize(&self) -> String {
        match self {
            HeaderValue::Single(value) => value.clone(),
            HeaderValue::List(values) => values.join(", "),
        }
    }
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        HeaderValue::Single(value.to_string())
    }
}

impl From<String> for HeaderValue {
    fn from(value: String) -> Self {
        HeaderValue::Single(value)
    }
}

impl From<&String> for HeaderValue {
    fn from(value: &String) -> Self {
        HeaderValue::Single(value.clone())
    }
}

impl From<bool> for HeaderValue {
    fn from(value: bool) -> Self {
        HeaderValue::Single(value.to_string())
    }
}

macro_rules! header_value_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for HeaderValue {
                fn from(value: $ty) -> Self {
                    HeaderValue::Single(value.to_string())
                }
            }
        )*
    };
}

header_value_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);

impl<S: Into<String>> From<Vec<S>> for HeaderValue {
    fn from(values: Vec<S>) -> Self {
        HeaderValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<S: AsRef<str>, const N: usize> From<[S; N]> for HeaderValue {
    fn from(values: [S; N]) -> Self {
        HeaderValue::List(values.iter().map(|v| v.as_ref().to_string()).collect())
    }
}

impl<S: AsRef<str>> From<&[S]> for HeaderValue {
    fn from(values: &[S]) -> Self {
        HeaderValue::List(values.iter().map(|v| v.as_ref().to_string()).collect())
    }
}

/// Normalize caller-supplied headers into the wire mapping.
///
/// A later entry with the exact same name replaces an earlier one.
pub fn normalize_header_list(headers: &[(String, HeaderValue)]) -> BTreeMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| (name.clone(), value.normalize()))
        .collect()
}

/// Normalize a JSON header object as received by the executor.
///
/// Strings pass through, numbers and booleans are stringified, arrays are
/// joined with `", "`, objects become compact JSON text and `null` entries
/// are dropped.
pub fn normalize_headers(headers: &Map<String, Value>) -> BTreeMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| match value {
            Value::Null => None,
            Value::Array(items) => {
                let joined = items
                    .iter()
                    .filter(|item| !item.is_null())
                    .map(scalar_to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                Some((name.clone(), joined))
            }
            other => Some((name.clone(), scalar_to_string(other))),
        })
        .collect()
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Case-insensitive header lookup; stored casing is left untouched.
pub fn find_header<'a>(headers: &'a BTreeMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
