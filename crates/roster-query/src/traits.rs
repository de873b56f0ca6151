//! Record access for the in-memory engine.

use crate::value::Value;

/// A record that can be filtered and ordered by field name.
///
/// # Example
///
/// ```
/// use roster_query::{Number, Record, Value};
///
/// struct Product {
///     id: u32,
///     title: String,
/// }
///
/// impl Record for Product {
///     fn field_names() -> &'static [&'static str] {
///         &["id", "title"]
///     }
///
///     fn field(&self, name: &str) -> Value<'_> {
///         match name {
///             "id" => Value::Number(Number::from(self.id)),
///             "title" => Value::String(&self.title),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Names of every queryable field, in declaration order.
    ///
    /// Used to validate clauses and to build search conditions across
    /// all fields.
    fn field_names() -> &'static [&'static str]
    where
        Self: Sized;

    /// Returns the value of a field, or [`Value::None`] if it is absent.
    fn field(&self, name: &str) -> Value<'_>;

    /// Static accessor suitable for the ordering helpers.
    fn accessor<'a>(item: &'a Self, name: &str) -> Value<'a>
    where
        Self: Sized,
    {
        item.field(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Number;

    struct Row {
        id: i64,
    }

    impl Record for Row {
        fn field_names() -> &'static [&'static str] {
            &["id"]
        }

        fn field(&self, name: &str) -> Value<'_> {
            match name {
                "id" => Value::Number(Number::I64(self.id)),
                _ => Value::None,
            }
        }
    }

    #[test]
    fn accessor_delegates_to_field() {
        let row = Row { id: 4 };
        assert_eq!(Row::accessor(&row, "id"), Value::Number(Number::I64(4)));
        assert_eq!(Row::accessor(&row, "missing"), Value::None);
        assert_eq!(Row::field_names(), &["id"]);
    }
}
