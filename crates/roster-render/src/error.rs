//! Rendering errors.
//!
//! Every [`ViewRenderer`](crate::ViewRenderer) reports failures as a
//! [`RenderError`], whatever engine it wraps. Minijinja errors are sorted
//! into the variants below by their kind.

use std::error::Error;
use std::fmt;
use std::io;

use minijinja::ErrorKind;

#[derive(Debug)]
pub enum RenderError {
    /// The view failed to compile or evaluate.
    TemplateError(String),

    /// No view is registered or loadable under the name.
    TemplateNotFound(String),

    /// A value bound into the view could not be serialized.
    SerializationError(String),

    /// Reading a view file failed.
    IoError(io::Error),

    /// The renderer was misconfigured, e.g. given a missing directory.
    OperationError(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TemplateError(detail) => write!(f, "view failed: {detail}"),
            Self::TemplateNotFound(name) => write!(f, "view not found: {name}"),
            Self::SerializationError(detail) => write!(f, "cannot bind value: {detail}"),
            Self::IoError(err) => write!(f, "cannot read view: {err}"),
            Self::OperationError(detail) => f.write_str(detail),
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        if let Self::IoError(err) = self {
            Some(err)
        } else {
            None
        }
    }
}

impl From<io::Error> for RenderError {
    fn from(err: io::Error) -> Self {
        Self::IoError(err)
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        let detail = err.to_string();
        match err.kind() {
            ErrorKind::TemplateNotFound => Self::TemplateNotFound(detail),
            ErrorKind::BadSerialization => Self::SerializationError(detail),
            ErrorKind::InvalidOperation => Self::OperationError(detail),
            _ => Self::TemplateError(detail),
        }
    }
}
