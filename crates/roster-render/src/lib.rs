//! Named view templates and the renderer contract for roster collections.
//!
//! A collection renders through three named views (index wrapper, item,
//! empty state). This crate supplies the seam it renders through:
//!
//! - [`ViewRenderer`]: resolve a named view and render it with variables
//! - [`View`]: chainable handle (`view(name).set(var, value)?.output()?`)
//! - [`Renderer`]: minijinja implementation with inline and file views
//! - [`RenderError`]: the error every renderer reports
//!
//! # Example
//!
//! ```rust
//! use roster_render::{Renderer, ViewRenderer};
//!
//! let mut renderer = Renderer::new();
//! renderer.add_template("www/index", "<ul>{{ items }}</ul>").unwrap();
//!
//! let html = renderer
//!     .view("www/index")
//!     .set_safe("items", "<li>one</li><li>two</li>")
//!     .output()
//!     .unwrap();
//! assert_eq!(html, "<ul><li>one</li><li>two</li></ul>");
//! ```

mod error;
pub mod template;

pub use error::RenderError;
pub use template::{DirLoader, Renderer, View, ViewContext, ViewRenderer, TEMPLATE_EXTENSIONS};
