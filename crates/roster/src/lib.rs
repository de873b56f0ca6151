//! # Roster - Paged Entity Collections
//!
//! Roster turns a query session into a rendered, paginated list. A
//! collection resolves which entities belong on the current page, fetches
//! them, and renders them through three named views: an index wrapper, a
//! per-item view and an optional empty view.
//!
//! ## Core Concepts
//!
//! - [`Collection`]: an in-memory item list with cursor iteration
//! - [`Listing`]: the render pipeline shared by every collection
//! - [`Paged`]: identifier resolution, handler filtering, search, sorting and
//!   pager-bounded fetching over an [`EntityQuery`]
//! - [`Pager`] / [`PageWindow`]: the current `[start, end)` window and its
//!   navigation markup
//! - [`HandlerChain`]: pluggable filters that produce candidate identifiers
//! - [`CollectionConfig`]: YAML-loadable settings
//!
//! ## Quick Start
//!
//! ```rust
//! use roster::{
//!     Dir, Key, Listing, MemoryQuery, Number, PageWindow, Paged, Record, Renderer, Value,
//! };
//! use serde::Serialize;
//!
//! #[derive(Clone, Serialize)]
//! struct Product { id: i64, title: String, price: i64 }
//!
//! impl Record for Product {
//!     fn field_names() -> &'static [&'static str] { &["id", "title", "price"] }
//!     fn field(&self, name: &str) -> Value<'_> {
//!         match name {
//!             "id" => Value::Number(Number::I64(self.id)),
//!             "title" => Value::String(&self.title),
//!             "price" => Value::Number(Number::I64(self.price)),
//!             _ => Value::None,
//!         }
//!     }
//! }
//!
//! let mut renderer = Renderer::new();
//! renderer.add_template("www/collection/index", "<ul>{{ items }}</ul>").unwrap();
//! renderer.add_template("www/collection/item/index", "<li>{{ item.title }}</li>").unwrap();
//! renderer.add_template("www/collection/item/empty", "<p>No products</p>").unwrap();
//!
//! let query = MemoryQuery::new(vec![
//!     Product { id: 1, title: "Oak desk".into(), price: 300 },
//!     Product { id: 2, title: "Lamp".into(), price: 40 },
//!     Product { id: 3, title: "Pine desk".into(), price: 250 },
//! ]);
//!
//! let mut products = Paged::new(renderer, query, PageWindow::new(1, 10));
//! products
//!     .search("desk")
//!     .handler(|ids| {
//!         ids.extend([Key::Int(1), Key::Int(2), Key::Int(3)]);
//!         Ok(())
//!     })
//!     .sorter("price", Dir::Asc)
//!     .fill()
//!     .unwrap();
//!
//! let view = products.to_view("products_", &[]).unwrap();
//! assert_eq!(view["products_html"], "<ul><li>Pine desk</li><li>Oak desk</li></ul>");
//! assert_eq!(view["products_pager"], "");
//! ```
//!
//! ## Logging
//!
//! Roster emits [`tracing`] events and installs no subscriber. `fill`
//! steps log at `debug` under the `roster::paged` target; rendering logs at
//! `trace` under `roster::render`.

mod collection;
mod config;
mod cursor;
mod error;
mod handler;
mod paged;
mod pager;
mod views;

pub use collection::{Collection, Listing};
pub use config::{CollectionConfig, HandlerFailure};
pub use cursor::Cursor;
pub use error::{CollectionError, ConfigError};
pub use handler::{
    handler_fn, handler_with, BoundHandler, FnHandler, HandlerChain, HandlerError, IdHandler,
};
pub use paged::Paged;
pub use pager::{PageWindow, Pager};
pub use views::{ViewData, ViewNames, ViewOverrides};

// Query and render layers, so most users need a single dependency.
pub use roster_query::{
    Clause, ClauseValue, Dir, EntityQuery, Key, MemoryQuery, Number, Op, OrderBy, QueryError,
    Record, Value,
};
pub use roster_render::{RenderError, Renderer, View, ViewContext, ViewRenderer};
