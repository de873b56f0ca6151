//! In-memory [`EntityQuery`] implementation.
//!
//! [`MemoryQuery`] evaluates a session against an owned `Vec` of records.
//! It is the reference backend for tests and small catalogs that fit in
//! memory.
//!
//! Match logic for a row:
//!
//! ```text
//! match = (all AND clauses match)
//!       ∧ (every OR group has at least one matching clause)
//! ```

use crate::clause::Clause;
use crate::error::{QueryError, Result};
use crate::op::Op;
use crate::ordering::{compare_rows, Dir, OrderBy};
use crate::query::EntityQuery;
use crate::traits::Record;
use crate::value::Key;

/// Query session over an owned set of records.
///
/// Restrictions accumulate for the life of the session with two exceptions
/// that keep repeated passes stable: a key restriction on a field replaces
/// the previous key restriction on that field, and ordering an
/// already-ordered field updates its direction without changing its
/// priority. [`checkpoint`](EntityQuery::checkpoint) snapshots the clauses
/// and orderings; [`rollback`](EntityQuery::rollback) restores them.
///
/// # Example
///
/// ```
/// use roster_query::{Dir, EntityQuery, Key, MemoryQuery, Number, Record, Value};
///
/// #[derive(Clone)]
/// struct Product { id: i64, price: i64 }
///
/// impl Record for Product {
///     fn field_names() -> &'static [&'static str] { &["id", "price"] }
///     fn field(&self, name: &str) -> Value<'_> {
///         match name {
///             "id" => Value::Number(Number::I64(self.id)),
///             "price" => Value::Number(Number::I64(self.price)),
///             _ => Value::None,
///         }
///     }
/// }
///
/// let mut query = MemoryQuery::new(vec![
///     Product { id: 1, price: 30 },
///     Product { id: 2, price: 10 },
///     Product { id: 3, price: 20 },
/// ]);
///
/// query.order_by("price", Dir::Asc);
/// let ids = query.field_values("id").unwrap();
/// assert_eq!(ids, vec![Key::Int(2), Key::Int(3), Key::Int(1)]);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryQuery<T> {
    rows: Vec<T>,
    and_clauses: Vec<Clause>,
    or_groups: Vec<Vec<Clause>>,
    orderings: Vec<OrderBy>,
    saved: Vec<Snapshot>,
}

#[derive(Debug, Clone)]
struct Snapshot {
    and_clauses: Vec<Clause>,
    or_groups: Vec<Vec<Clause>>,
    orderings: Vec<OrderBy>,
}

impl<T: Record> MemoryQuery<T> {
    /// Creates a session over the given rows with no restrictions.
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows,
            and_clauses: Vec::new(),
            or_groups: Vec::new(),
            orderings: Vec::new(),
            saved: Vec::new(),
        }
    }

    /// Adds an arbitrary AND clause, e.g. a category filter set up before
    /// the session is handed to a collection.
    pub fn and(&mut self, clause: Clause) -> &mut Self {
        self.and_clauses.push(clause);
        self
    }

    /// Clears every restriction, ordering and pending checkpoint, keeping
    /// the rows.
    pub fn reset(&mut self) -> &mut Self {
        self.and_clauses.clear();
        self.or_groups.clear();
        self.orderings.clear();
        self.saved.clear();
        self
    }

    /// Returns the ordering clauses in priority order.
    pub fn orderings(&self) -> &[OrderBy] {
        &self.orderings
    }

    /// Returns the AND clauses.
    pub fn and_clauses(&self) -> &[Clause] {
        &self.and_clauses
    }

    /// Returns the OR groups.
    pub fn or_groups(&self) -> &[Vec<Clause>] {
        &self.or_groups
    }

    /// Returns all rows regardless of restrictions.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    fn matches(&self, row: &T) -> bool {
        let and_pass = self
            .and_clauses
            .iter()
            .all(|clause| clause.matches(&row.field(&clause.field)));

        and_pass
            && self.or_groups.iter().all(|group| {
                group.is_empty()
                    || group
                        .iter()
                        .any(|clause| clause.matches(&row.field(&clause.field)))
            })
    }

    fn check_field(&self, field: &str) -> Result<()> {
        if T::field_names().contains(&field) {
            Ok(())
        } else {
            Err(QueryError::UnknownField(field.to_string()))
        }
    }

    fn validate(&self) -> Result<()> {
        let clause_fields = self
            .and_clauses
            .iter()
            .chain(self.or_groups.iter().flatten())
            .map(|clause| clause.field.as_str());
        let order_fields = self.orderings.iter().map(|order| order.field.as_str());

        for field in clause_fields.chain(order_fields) {
            self.check_field(field)?;
        }
        Ok(())
    }

    fn selected(&self) -> Result<Vec<&T>> {
        self.validate()?;

        let mut results: Vec<&T> = self.rows.iter().filter(|row| self.matches(row)).collect();
        if !self.orderings.is_empty() {
            results.sort_by(|a, b| compare_rows(*a, *b, &self.orderings, &T::accessor));
        }
        Ok(results)
    }
}

impl<T: Record + Clone> EntityQuery for MemoryQuery<T> {
    type Item = T;

    fn fields(&self) -> Vec<String> {
        T::field_names().iter().map(|name| name.to_string()).collect()
    }

    fn field_values(&mut self, field: &str) -> Result<Vec<Key>> {
        self.check_field(field)?;
        Ok(self
            .selected()?
            .into_iter()
            .filter_map(|row| Key::from_value(&row.field(field)))
            .collect())
    }

    fn field_values_in(&mut self, field: &str, keys: &[Key]) -> Result<Vec<Key>> {
        self.check_field(field)?;
        Ok(self
            .selected()?
            .into_iter()
            .filter_map(|row| Key::from_value(&row.field(field)))
            .filter(|key| keys.contains(key))
            .collect())
    }

    fn cond(&mut self, field: &str, keys: &[Key]) -> &mut Self {
        let clause = Clause::in_keys(field, keys.to_vec());
        let existing = self
            .and_clauses
            .iter_mut()
            .find(|c| c.op == Op::In && c.field == field);

        match existing {
            Some(slot) => *slot = clause,
            None => self.and_clauses.push(clause),
        }
        self
    }

    fn cond_any(&mut self, clauses: Vec<Clause>) -> &mut Self {
        self.or_groups.push(clauses);
        self
    }

    fn order_by(&mut self, field: &str, dir: Dir) -> &mut Self {
        match self.orderings.iter_mut().find(|o| o.field == field) {
            Some(existing) => existing.dir = dir,
            None => self.orderings.push(OrderBy::new(field, dir)),
        }
        self
    }

    fn exec(&mut self) -> Result<Vec<T>> {
        Ok(self.selected()?.into_iter().cloned().collect())
    }

    fn checkpoint(&mut self) {
        self.saved.push(Snapshot {
            and_clauses: self.and_clauses.clone(),
            or_groups: self.or_groups.clone(),
            orderings: self.orderings.clone(),
        });
    }

    fn rollback(&mut self) {
        if let Some(snapshot) = self.saved.pop() {
            self.and_clauses = snapshot.and_clauses;
            self.or_groups = snapshot.or_groups;
            self.orderings = snapshot.orderings;
        }
    }
}
