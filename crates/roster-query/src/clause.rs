//! Clause types for query predicates.
//!
//! A [`Clause`] is a field name, an operator and an owned comparison value.

use regex::Regex;

use crate::error::Result;
use crate::op::Op;
use crate::value::{Key, Number, Value};

/// A single filter predicate.
///
/// # Example
///
/// ```
/// use roster_query::{Clause, Key, Value};
///
/// let clause = Clause::in_keys("id", vec![Key::Int(1), Key::Int(3)]);
/// assert!(clause.matches(&Value::Number(3i64.into())));
///
/// let like = Clause::like("title", "%lamp%").unwrap();
/// assert!(like.matches(&Value::String("Desk Lamp")));
/// ```
#[derive(Debug, Clone)]
pub struct Clause {
    /// The field name to compare.
    pub field: String,
    /// The comparison operator.
    pub op: Op,
    /// The value to compare against.
    pub value: ClauseValue,
}

impl Clause {
    /// Creates a new clause.
    pub fn new(field: impl Into<String>, op: Op, value: impl Into<ClauseValue>) -> Self {
        Clause {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// Creates a set-membership clause over identifier keys.
    pub fn in_keys(field: impl Into<String>, keys: Vec<Key>) -> Self {
        Clause::new(field, Op::In, ClauseValue::Keys(keys))
    }

    /// Creates a SQL-style `LIKE` clause.
    ///
    /// `%` matches any run of characters, `_` matches exactly one, and a
    /// backslash makes the next character literal. Matching ignores case.
    pub fn like(field: impl Into<String>, pattern: &str) -> Result<Self> {
        let regex = Regex::new(&like_to_regex(pattern))?;
        Ok(Clause::new(field, Op::Like, ClauseValue::Pattern(regex)))
    }

    /// Evaluates this clause against a field value.
    ///
    /// Missing fields and type mismatches never match.
    pub fn matches(&self, field_value: &Value<'_>) -> bool {
        match (&self.value, field_value) {
            (_, Value::None) => false,

            (ClauseValue::Keys(keys), value) => {
                self.op == Op::In && keys.iter().any(|key| key.matches(value))
            }

            (ClauseValue::Pattern(regex), value) => match value.text() {
                Some(text) => self.op == Op::Like && regex.is_match(&text),
                None => false,
            },

            (ClauseValue::String(pattern), Value::String(s)) => self.match_string(s, pattern),

            (ClauseValue::Number(clause_num), Value::Number(field_num)) => {
                field_num
                    .compare(*clause_num)
                    .and_then(|ordering| self.op.holds(ordering))
                    .unwrap_or(false)
            }

            (ClauseValue::Bool(clause_bool), Value::Bool(field_bool)) => match self.op {
                Op::Eq => field_bool == clause_bool,
                Op::Ne => field_bool != clause_bool,
                _ => false,
            },

            _ => false,
        }
    }

    fn match_string(&self, field: &str, pattern: &str) -> bool {
        match self.op {
            Op::Contains => field.contains(pattern),
            op => op.holds(field.cmp(pattern)).unwrap_or(false),
        }
    }
}

fn like_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    out.push_str("(?is)^");
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '%' => out.push_str(".*"),
            '_' => out.push('.'),
            '\\' => {
                if let Some(next) = chars.next() {
                    out.push_str(&regex::escape(&next.to_string()));
                }
            }
            other => out.push_str(&regex::escape(&other.to_string())),
        }
    }
    out.push('$');
    out
}

/// Owned value stored in a clause.
#[derive(Debug, Clone)]
pub enum ClauseValue {
    /// String value.
    String(String),
    /// Numeric value.
    Number(Number),
    /// Boolean value.
    Bool(bool),
    /// Identifier set (for `In`).
    Keys(Vec<Key>),
    /// Compiled `LIKE` pattern.
    Pattern(Regex),
}

impl From<String> for ClauseValue {
    fn from(s: String) -> Self {
        ClauseValue::String(s)
    }
}

impl From<&str> for ClauseValue {
    fn from(s: &str) -> Self {
        ClauseValue::String(s.to_string())
    }
}

impl From<Number> for ClauseValue {
    fn from(n: Number) -> Self {
        ClauseValue::Number(n)
    }
}

impl From<bool> for ClauseValue {
    fn from(b: bool) -> Self {
        ClauseValue::Bool(b)
    }
}

impl From<Vec<Key>> for ClauseValue {
    fn from(keys: Vec<Key>) -> Self {
        ClauseValue::Keys(keys)
    }
}

macro_rules! clause_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ClauseValue {
                fn from(n: $t) -> Self {
                    ClauseValue::Number(Number::from(n))
                }
            }
        )*
    };
}

clause_from_number!(i32, i64, u32, u64, usize, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_keys_matches_members() {
        let clause = Clause::in_keys("id", vec![Key::Int(1), Key::Int(3)]);
        assert!(clause.matches(&Value::Number(Number::I64(1))));
        assert!(clause.matches(&Value::Number(Number::U64(3))));
        assert!(!clause.matches(&Value::Number(Number::I64(2))));
        assert!(!clause.matches(&Value::None));
    }

    #[test]
    fn in_keys_empty_set_matches_nothing() {
        let clause = Clause::in_keys("id", Vec::new());
        assert!(!clause.matches(&Value::Number(Number::I64(1))));
    }

    #[test]
    fn like_wildcards() {
        let clause = Clause::like("title", "%lamp%").unwrap();
        assert!(clause.matches(&Value::String("Desk LAMP shade")));
        assert!(!clause.matches(&Value::String("Desk light")));

        let single = Clause::like("code", "a_c").unwrap();
        assert!(single.matches(&Value::String("abc")));
        assert!(!single.matches(&Value::String("abbc")));
    }

    #[test]
    fn like_escapes_regex_metacharacters() {
        let clause = Clause::like("title", "%(v2.0)%").unwrap();
        assert!(clause.matches(&Value::String("release (v2.0) notes")));
        assert!(!clause.matches(&Value::String("release (v2x0) notes")));
    }

    #[test]
    fn like_backslash_escapes_wildcard() {
        let clause = Clause::like("title", "100\\%").unwrap();
        assert!(clause.matches(&Value::String("100%")));
        assert!(!clause.matches(&Value::String("1000")));
    }

    #[test]
    fn like_matches_numbers_as_text() {
        let clause = Clause::like("price", "%99%").unwrap();
        assert!(clause.matches(&Value::Number(Number::I64(1990))));
    }

    #[test]
    fn string_ordering_and_contains() {
        assert!(Clause::new("name", Op::Lt, "m").matches(&Value::String("apple")));
        assert!(Clause::new("name", Op::Contains, "pp").matches(&Value::String("apple")));
        assert!(!Clause::new("name", Op::Eq, "Apple").matches(&Value::String("apple")));
    }

    #[test]
    fn number_and_bool() {
        assert!(Clause::new("stock", Op::Gte, 3i64).matches(&Value::Number(Number::U64(3))));
        assert!(Clause::new("active", Op::Eq, true).matches(&Value::Bool(true)));
        assert!(!Clause::new("active", Op::Gt, true).matches(&Value::Bool(true)));
    }

    #[test]
    fn type_mismatch_never_matches() {
        assert!(!Clause::new("stock", Op::Eq, 3i64).matches(&Value::String("3")));
    }
}
