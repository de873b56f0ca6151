//! Sort directions and multi-field row ordering.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::value::Value;

/// Sort direction. Parses case-insensitively from `asc` / `desc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    #[default]
    #[serde(alias = "ASC")]
    Asc,
    #[serde(alias = "DESC")]
    Desc,
}

impl Dir {
    /// Turns an ascending comparison into one in this direction.
    pub fn orient(self, ascending: Ordering) -> Ordering {
        if self == Dir::Desc {
            ascending.reverse()
        } else {
            ascending
        }
    }

    /// `ASC` or `DESC`.
    pub fn keyword(self) -> &'static str {
        match self {
            Dir::Asc => "ASC",
            Dir::Desc => "DESC",
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for Dir {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Dir::Asc),
            "desc" => Ok(Dir::Desc),
            _ => Err(QueryError::InvalidDirection(s.to_string())),
        }
    }
}

/// One sort key: a field and its direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub dir: Dir,
}

impl OrderBy {
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        Self {
            field: field.into(),
            dir,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, Dir::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, Dir::Desc)
    }

    /// Compares two rows on this key.
    pub fn compare_rows<T, F>(&self, a: &T, b: &T, field: &F) -> Ordering
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        self.dir
            .orient(compare_values(&field(a, &self.field), &field(b, &self.field)))
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.dir)
    }
}

/// Ascending sort order of two field values.
///
/// The order is total so row sorts stay consistent: booleans come first,
/// then numbers, then NaN, then strings, and missing values last.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    match (a, b) {
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => x
            .compare(*y)
            .unwrap_or_else(|| kind_rank(a).cmp(&kind_rank(b))),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(value: &Value<'_>) -> u8 {
    match value {
        Value::Bool(_) => 0,
        Value::Number(n) if n.is_nan() => 2,
        Value::Number(_) => 1,
        Value::String(_) => 3,
        Value::None => 4,
    }
}

/// Compares two rows by each key in turn; later keys only break ties.
pub fn compare_rows<T, F>(a: &T, b: &T, keys: &[OrderBy], field: &F) -> Ordering
where
    for<'a> F: Fn(&'a T, &str) -> Value<'a>,
{
    keys.iter()
        .map(|key| key.compare_rows(a, b, field))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}
