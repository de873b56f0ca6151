//! Entity query contract and in-memory query engine for roster collections.
//!
//! Paged collections never talk to storage directly. They drive an
//! [`EntityQuery`] session: resolve primary-key values, restrict the
//! session to a key set, attach orderings, then materialize records.
//!
//! - [`EntityQuery`]: the contract a backing store implements
//! - [`MemoryQuery`]: a ready-made implementation over a `Vec` of [`Record`]s
//! - [`Key`]: owned primary-key values passed between passes
//! - [`Clause`] / [`Op`]: predicates, including SQL-style `LIKE` patterns
//! - [`Dir`] / [`OrderBy`]: multi-field ordering
//!
//! # Quick Start
//!
//! ```rust
//! use roster_query::{Dir, EntityQuery, Key, MemoryQuery, Number, Record, Value};
//!
//! #[derive(Clone)]
//! struct Task { id: i64, title: String, priority: i64 }
//!
//! impl Record for Task {
//!     fn field_names() -> &'static [&'static str] { &["id", "title", "priority"] }
//!     fn field(&self, name: &str) -> Value<'_> {
//!         match name {
//!             "id" => Value::Number(Number::I64(self.id)),
//!             "title" => Value::String(&self.title),
//!             "priority" => Value::Number(Number::I64(self.priority)),
//!             _ => Value::None,
//!         }
//!     }
//! }
//!
//! let mut query = MemoryQuery::new(vec![
//!     Task { id: 1, title: "Write docs".into(), priority: 3 },
//!     Task { id: 2, title: "Fix bug".into(), priority: 5 },
//!     Task { id: 3, title: "Old task".into(), priority: 1 },
//! ]);
//!
//! let ids = query
//!     .order_by("priority", Dir::Desc)
//!     .cond("id", &[Key::Int(1), Key::Int(2)])
//!     .field_values("id")
//!     .unwrap();
//! assert_eq!(ids, vec![Key::Int(2), Key::Int(1)]);
//!
//! let tasks = query.exec().unwrap();
//! assert_eq!(tasks[0].title, "Fix bug");
//! ```

mod clause;
mod error;
mod memory;
mod op;
mod ordering;
mod query;
mod traits;
mod value;

pub use clause::{Clause, ClauseValue};
pub use error::{QueryError, Result};
pub use memory::MemoryQuery;
pub use op::Op;
pub use ordering::{compare_rows, compare_values, Dir, OrderBy};
pub use query::EntityQuery;
pub use traits::Record;
pub use value::{Key, Number, Value};
