//! Clause operators.

use std::cmp::Ordering;
use std::fmt;

/// How a clause compares a field against its value.
///
/// `Eq` through `Lte` compare numbers, strings and (for `Eq`/`Ne` only)
/// booleans. `Contains` is a case-sensitive substring test, `Like` an SQL
/// pattern match and `In` a key-set membership test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Contains,
    Like,
    In,
}

impl Op {
    /// Whether `field <op> value` holds, given `field.cmp(value)`.
    ///
    /// `None` for operators that are not comparisons.
    pub fn holds(self, ordering: Ordering) -> Option<bool> {
        let held = match self {
            Op::Eq => ordering.is_eq(),
            Op::Ne => ordering.is_ne(),
            Op::Gt => ordering.is_gt(),
            Op::Gte => ordering.is_ge(),
            Op::Lt => ordering.is_lt(),
            Op::Lte => ordering.is_le(),
            Op::Contains | Op::Like | Op::In => return None,
        };
        Some(held)
    }

    /// SQL-style spelling, used in logs and error messages.
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Ne => "<>",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Lt => "<",
            Op::Lte => "<=",
            Op::Contains => "CONTAINS",
            Op::Like => "LIKE",
            Op::In => "IN",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparisons_follow_ordering() {
        assert_eq!(Op::Gte.holds(Ordering::Equal), Some(true));
        assert_eq!(Op::Gt.holds(Ordering::Equal), Some(false));
        assert_eq!(Op::Ne.holds(Ordering::Less), Some(true));
        assert_eq!(Op::Lte.holds(Ordering::Greater), Some(false));
    }

    #[test]
    fn set_and_text_ops_do_not_compare() {
        assert_eq!(Op::In.holds(Ordering::Equal), None);
        assert_eq!(Op::Like.holds(Ordering::Equal), None);
    }

    #[test]
    fn displays_as_sql() {
        assert_eq!(format!("price {} 10", Op::Lte), "price <= 10");
        assert_eq!(Op::In.to_string(), "IN");
    }
}
