//! Runtime value types for field comparison and entity identifiers.
//!
//! [`Value`] is borrowed from a record while a query runs. [`Key`] is the
//! owned form used for primary-key sets, which outlive any single pass over
//! the data.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A field value borrowed from a record for the duration of one pass.
///
/// ```
/// use roster_query::{Number, Value};
///
/// struct Listing { title: String, stock: u32 }
///
/// fn field<'a>(l: &'a Listing, name: &str) -> Value<'a> {
///     match name {
///         "title" => Value::String(&l.title),
///         "stock" => Value::Number(l.stock.into()),
///         _ => Value::None,
///     }
/// }
///
/// let lamp = Listing { title: "Lamp".into(), stock: 4 };
/// assert_eq!(field(&lamp, "stock").text().as_deref(), Some("4"));
/// assert_eq!(field(&lamp, "color"), Value::None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    String(&'a str),
    Number(Number),
    Bool(bool),
    /// Missing, null or of a type the record does not expose.
    None,
}

impl Value<'_> {
    /// Text form used by `LIKE` patterns. `None` for missing fields, so they
    /// never match.
    pub fn text(&self) -> Option<Cow<'_, str>> {
        let text = match self {
            Value::String(s) => return Some(Cow::Borrowed(*s)),
            Value::Number(Number::I64(n)) => n.to_string(),
            Value::Number(Number::U64(n)) => n.to_string(),
            Value::Number(Number::F64(n)) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::None => return None,
        };
        Some(Cow::Owned(text))
    }
}

/// A numeric field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl Number {
    /// Compares across variants. Integers compare exactly; anything
    /// involving a float goes through `f64`, and NaN compares to nothing.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        use Number::{F64, I64, U64};

        match (self, other) {
            (I64(a), I64(b)) => Some(a.cmp(&b)),
            (U64(a), U64(b)) => Some(a.cmp(&b)),
            (I64(a), U64(b)) => Some(i128::from(a).cmp(&i128::from(b))),
            (U64(a), I64(b)) => Some(i128::from(a).cmp(&i128::from(b))),
            (a, b) => a.lossy().partial_cmp(&b.lossy()),
        }
    }

    pub fn is_nan(self) -> bool {
        matches!(self, Number::F64(n) if n.is_nan())
    }

    fn lossy(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

macro_rules! number_from {
    ($variant:ident, $wide:ty, [$($t:ty),*]) => {
        $(
            impl From<$t> for Number {
                fn from(n: $t) -> Self {
                    Number::$variant(n as $wide)
                }
            }
        )*
    };
}

number_from!(I64, i64, [i8, i16, i32, i64, isize]);
number_from!(U64, u64, [u8, u16, u32, u64, usize]);
number_from!(F64, f64, [f32, f64]);

/// Owned primary-key value.
///
/// Keys are opaque scalars: the collection only moves them around, compares
/// them for set membership and hands them back to the data source. Unsigned
/// integers that fit in `i64` are stored as [`Key::Int`] so that `5u32` and
/// `5i64` name the same entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    /// Signed integer key.
    Int(i64),
    /// Unsigned integer key above `i64::MAX`.
    Uint(u64),
    /// String key (slugs, UUIDs, ...).
    Str(String),
}

impl Key {
    /// Converts a borrowed field value into a key.
    ///
    /// Floats, booleans and missing fields are not valid keys.
    pub fn from_value(value: &Value<'_>) -> Option<Key> {
        match value {
            Value::String(s) => Some(Key::Str((*s).to_string())),
            Value::Number(Number::I64(n)) => Some(Key::Int(*n)),
            Value::Number(Number::U64(n)) => Some(Key::from(*n)),
            Value::Number(Number::F64(_)) | Value::Bool(_) | Value::None => None,
        }
    }

    /// Returns `true` if the field value names this key.
    pub fn matches(&self, value: &Value<'_>) -> bool {
        Key::from_value(value).as_ref() == Some(self)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(n) => write!(f, "{}", n),
            Key::Uint(n) => write!(f, "{}", n),
            Key::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for Key {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(signed) => Key::Int(signed),
            Err(_) => Key::Uint(n),
        }
    }
}

macro_rules! key_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Key {
                fn from(n: $t) -> Self {
                    Key::Int(n as i64)
                }
            }
        )*
    };
}

key_from_signed!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for Key {
    fn from(n: usize) -> Self {
        Key::from(n as u64)
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_form() {
        assert_eq!(Value::String("a").text().as_deref(), Some("a"));
        assert_eq!(Value::Number(Number::U64(7)).text().as_deref(), Some("7"));
        assert_eq!(Value::Bool(false).text().as_deref(), Some("false"));
        assert_eq!(Value::None.text(), None);
    }

    #[test]
    fn integers_compare_exactly() {
        assert_eq!(
            Number::I64(-1).compare(Number::U64(u64::MAX)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::U64(u64::MAX).compare(Number::U64(u64::MAX - 1)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn floats_compare_through_f64() {
        assert_eq!(
            Number::I64(5).compare(Number::F64(5.0)),
            Some(Ordering::Equal)
        );
        assert_eq!(Number::F64(f64::NAN).compare(Number::I64(1)), None);
    }

    #[test]
    fn key_normalizes_unsigned() {
        assert_eq!(Key::from(5u32), Key::Int(5));
        assert_eq!(Key::from(5u64), Key::from(5i64));
        assert_eq!(Key::from(u64::MAX), Key::Uint(u64::MAX));
    }

    #[test]
    fn key_from_value() {
        assert_eq!(
            Key::from_value(&Value::Number(Number::U64(3))),
            Some(Key::Int(3))
        );
        assert_eq!(
            Key::from_value(&Value::String("sku-1")),
            Some(Key::Str("sku-1".into()))
        );
        assert_eq!(Key::from_value(&Value::Number(Number::F64(1.0))), None);
        assert_eq!(Key::from_value(&Value::None), None);
    }

    #[test]
    fn key_matches_value() {
        assert!(Key::Int(9).matches(&Value::Number(Number::I64(9))));
        assert!(!Key::Int(9).matches(&Value::String("9")));
    }

    #[test]
    fn key_serializes_untagged() {
        let keys = vec![Key::Int(1), Key::Str("a".into())];
        let json = serde_json::to_string(&keys).unwrap();
        assert_eq!(json, r#"[1,"a"]"#);
    }
}
