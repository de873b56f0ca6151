//! Minijinja-backed [`ViewRenderer`].
//!
//! [`Renderer`] holds inline templates and a list of template directories.
//! Inline templates shadow files with the same name.
//!
//! ```rust,ignore
//! use roster_render::Renderer;
//!
//! let mut renderer = Renderer::new();
//! renderer.add_template_dir("./templates")?;
//! renderer.add_template("www/empty", "<p>Nothing here yet.</p>")?;
//! ```
//!
//! # Escaping
//!
//! By default escaping follows minijinja's rule (HTML escaping for view
//! names ending in `.html`, `.htm` or `.xml`). [`Renderer::escape_html`]
//! turns it on for every view. Markup bound through
//! [`View::set_safe`](crate::View::set_safe) is never escaped.

use std::collections::BTreeMap;
use std::path::Path;

use minijinja::{AutoEscape, Environment, Error, ErrorKind, Value};

use super::loader::DirLoader;
use super::view::{ViewContext, ViewRenderer};
use crate::error::RenderError;

/// A renderer with inline and directory-backed views.
pub struct Renderer {
    env: Environment<'static>,
    loader: DirLoader,
}

impl Renderer {
    /// Creates a renderer with no views.
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
            loader: DirLoader::new(),
        }
    }

    /// Registers a named inline view.
    ///
    /// The template is compiled immediately; syntax errors are returned.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<(), RenderError> {
        self.env
            .add_template_owned(name.to_string(), source.to_string())?;
        Ok(())
    }

    /// Adds a directory to search for view files.
    ///
    /// See [`super::loader`] for name resolution.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not exist or is not a directory.
    pub fn add_template_dir<P: AsRef<Path>>(&mut self, path: P) -> Result<(), RenderError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(RenderError::OperationError(format!(
                "Template directory does not exist: {}",
                path.display()
            )));
        }
        if !path.is_dir() {
            return Err(RenderError::OperationError(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        self.loader.push(path);
        let loader = self.loader.clone();
        self.env.set_loader(move |name| {
            loader.load(name).map_err(|err| {
                Error::new(
                    ErrorKind::InvalidOperation,
                    format!("could not read template '{}'", name),
                )
                .with_source(err)
            })
        });
        Ok(())
    }

    /// Escapes HTML in every view, regardless of its name.
    pub fn escape_html(mut self) -> Self {
        self.env.set_auto_escape_callback(|_| AutoEscape::Html);
        self
    }

    /// Returns `true` if `name` resolves to an inline or file view.
    pub fn has_template(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }

    /// Mutable access to the minijinja environment, for custom filters
    /// and functions.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("template_dirs", &self.loader.dirs())
            .finish_non_exhaustive()
    }
}

impl ViewRenderer for Renderer {
    fn render_view(&self, name: &str, context: &ViewContext) -> Result<String, RenderError> {
        tracing::trace!(target: "roster::render", view = name, "rendering view");

        let template = self.env.get_template(name)?;

        let mut values: BTreeMap<&str, Value> = BTreeMap::new();
        for (key, value) in context.vars() {
            values.insert(key, Value::from_serialize(value));
        }
        for (key, markup) in context.safe_vars() {
            values.insert(key, Value::from_safe_string(markup.clone()));
        }

        Ok(template.render(values)?)
    }
}
