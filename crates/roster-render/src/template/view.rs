//! The renderer contract and the per-render view handle.
//!
//! Collections only need three things from a renderer: pick a named view,
//! bind variables to it, and produce text. [`ViewRenderer`] is that seam;
//! [`View`] is the handle returned by [`ViewRenderer::view`].
//!
//! ```rust
//! use roster_render::{Renderer, ViewRenderer};
//!
//! let mut renderer = Renderer::new();
//! renderer.add_template("www/item", "<li>{{ item.title }}</li>").unwrap();
//!
//! #[derive(serde::Serialize)]
//! struct Product { title: String }
//!
//! let html = renderer
//!     .view("www/item")
//!     .set("item", &Product { title: "Lamp".into() })
//!     .unwrap()
//!     .output()
//!     .unwrap();
//! assert_eq!(html, "<li>Lamp</li>");
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::RenderError;

/// Variables bound to a view before it is rendered.
///
/// Plain variables hold serialized data. Safe variables hold markup that
/// was already rendered (for example the concatenated item views) and must
/// not be escaped a second time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewContext {
    vars: serde_json::Map<String, serde_json::Value>,
    safe: BTreeMap<String, String>,
}

impl ViewContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a serialized value, replacing any previous binding of `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: serde_json::Value) {
        let name = name.into();
        self.safe.remove(&name);
        self.vars.insert(name, value);
    }

    /// Binds pre-rendered markup, replacing any previous binding of `name`.
    pub fn insert_safe(&mut self, name: impl Into<String>, markup: impl Into<String>) {
        let name = name.into();
        self.vars.remove(&name);
        self.safe.insert(name, markup.into());
    }

    /// Returns the serialized variables.
    pub fn vars(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.vars
    }

    /// Returns the pre-rendered markup variables.
    pub fn safe_vars(&self) -> &BTreeMap<String, String> {
        &self.safe
    }

    /// Looks up a variable of either kind as JSON.
    pub fn get(&self, name: &str) -> Option<serde_json::Value> {
        self.vars
            .get(name)
            .cloned()
            .or_else(|| self.safe.get(name).cloned().map(serde_json::Value::String))
    }

    /// Returns `true` if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty() && self.safe.is_empty()
    }
}

/// Resolves named views and renders them with bound variables.
///
/// Implement this to plug a different template backend into a collection.
/// [`Renderer`](crate::Renderer) is the minijinja-backed implementation.
pub trait ViewRenderer {
    /// Renders the view registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::TemplateNotFound`] when no view has that name.
    fn render_view(&self, name: &str, context: &ViewContext) -> Result<String, RenderError>;

    /// Starts a view handle for `name`.
    fn view(&self, name: &str) -> View<'_, Self>
    where
        Self: Sized,
    {
        View::new(self, name)
    }
}

impl<R: ViewRenderer + ?Sized> ViewRenderer for &R {
    fn render_view(&self, name: &str, context: &ViewContext) -> Result<String, RenderError> {
        (**self).render_view(name, context)
    }
}

impl<R: ViewRenderer + ?Sized> ViewRenderer for Box<R> {
    fn render_view(&self, name: &str, context: &ViewContext) -> Result<String, RenderError> {
        (**self).render_view(name, context)
    }
}

/// A named view with its bound variables.
///
/// Nothing is resolved until [`output`](View::output) is called.
#[derive(Debug)]
pub struct View<'r, R: ?Sized> {
    renderer: &'r R,
    name: String,
    context: ViewContext,
}

impl<'r, R: ViewRenderer + ?Sized> View<'r, R> {
    /// Creates a handle for the view `name`.
    pub fn new(renderer: &'r R, name: impl Into<String>) -> Self {
        Self {
            renderer,
            name: name.into(),
            context: ViewContext::new(),
        }
    }

    /// Binds `value` under the variable `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::SerializationError`] if `value` fails to serialize.
    pub fn set(mut self, name: &str, value: impl Serialize) -> Result<Self, RenderError> {
        let value = serde_json::to_value(value)?;
        self.context.insert(name, value);
        Ok(self)
    }

    /// Binds already-rendered markup under the variable `name`.
    pub fn set_safe(mut self, name: &str, markup: impl Into<String>) -> Self {
        self.context.insert_safe(name, markup);
        self
    }

    /// The view name this handle renders.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The variables bound so far.
    pub fn context(&self) -> &ViewContext {
        &self.context
    }

    /// Resolves the view and renders it.
    pub fn output(&self) -> Result<String, RenderError> {
        self.renderer.render_view(&self.name, &self.context)
    }
}
