//! The data-source contract consumed by paged collections.
//!
//! An [`EntityQuery`] is a stateful query session: restrictions and
//! orderings attached with [`cond`](EntityQuery::cond),
//! [`cond_any`](EntityQuery::cond_any) and [`order_by`](EntityQuery::order_by)
//! stay in effect for every later resolution on the same session, until
//! rolled back to a [`checkpoint`](EntityQuery::checkpoint).

use crate::clause::Clause;
use crate::error::Result;
use crate::ordering::Dir;
use crate::value::Key;

/// A chainable query session over a set of entities.
pub trait EntityQuery {
    /// The materialized record type produced by [`exec`](Self::exec).
    type Item;

    /// Names of the fields that can be searched.
    fn fields(&self) -> Vec<String>;

    /// Resolves the values of `field` for every row matching the session.
    fn field_values(&mut self, field: &str) -> Result<Vec<Key>>;

    /// Resolves the values of `field` for matching rows whose `field` is in `keys`.
    ///
    /// The result follows the session's ordering.
    fn field_values_in(&mut self, field: &str, keys: &[Key]) -> Result<Vec<Key>>;

    /// Restricts subsequent operations to rows whose `field` is in `keys`.
    fn cond(&mut self, field: &str, keys: &[Key]) -> &mut Self;

    /// Restricts subsequent operations to rows matching at least one clause.
    fn cond_any(&mut self, clauses: Vec<Clause>) -> &mut Self;

    /// Appends an ordering. Earlier orderings take priority.
    fn order_by(&mut self, field: &str, dir: Dir) -> &mut Self;

    /// Materializes every matching row in query order.
    fn exec(&mut self) -> Result<Vec<Self::Item>>;

    /// Saves the current restrictions and orderings.
    ///
    /// Checkpoints nest; each one is undone by a matching
    /// [`rollback`](Self::rollback). Sessions that keep no state between
    /// calls can leave the default.
    fn checkpoint(&mut self) {}

    /// Restores the state saved by the most recent [`checkpoint`](Self::checkpoint).
    ///
    /// Without a pending checkpoint this does nothing.
    fn rollback(&mut self) {}
}

impl<Q: EntityQuery + ?Sized> EntityQuery for &mut Q {
    type Item = Q::Item;

    fn fields(&self) -> Vec<String> {
        (**self).fields()
    }

    fn field_values(&mut self, field: &str) -> Result<Vec<Key>> {
        (**self).field_values(field)
    }

    fn field_values_in(&mut self, field: &str, keys: &[Key]) -> Result<Vec<Key>> {
        (**self).field_values_in(field, keys)
    }

    fn cond(&mut self, field: &str, keys: &[Key]) -> &mut Self {
        (**self).cond(field, keys);
        self
    }

    fn cond_any(&mut self, clauses: Vec<Clause>) -> &mut Self {
        (**self).cond_any(clauses);
        self
    }

    fn order_by(&mut self, field: &str, dir: Dir) -> &mut Self {
        (**self).order_by(field, dir);
        self
    }

    fn exec(&mut self) -> Result<Vec<Self::Item>> {
        (**self).exec()
    }

    fn checkpoint(&mut self) {
        (**self).checkpoint()
    }

    fn rollback(&mut self) {
        (**self).rollback()
    }
}
