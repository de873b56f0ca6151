//! Error types for collections.

use std::path::PathBuf;

use roster_query::QueryError;
use roster_render::RenderError;
use thiserror::Error;

use crate::handler::HandlerError;

/// Errors surfaced by [`Paged::fill`](crate::Paged::fill) and the render pipeline.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// The data source failed while resolving identifiers or records.
    #[error("query failed: {0}")]
    Query(#[from] QueryError),

    /// A view could not be resolved or rendered.
    #[error("render failed: {0}")]
    Render(#[from] RenderError),

    /// An identifier handler reported failure and the collection aborted.
    #[error(transparent)]
    Handler(#[from] HandlerError),
}

/// Errors raised while loading a [`CollectionConfig`](crate::CollectionConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("could not read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The YAML did not match the config schema.
    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The config parsed but holds an unusable value.
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_wraps() {
        let err: CollectionError = QueryError::UnknownField("sku".into()).into();
        assert_eq!(err.to_string(), "query failed: unknown field 'sku'");
    }

    #[test]
    fn test_render_error_wraps() {
        let err: CollectionError = RenderError::TemplateNotFound("www/item".into()).into();
        assert!(matches!(err, CollectionError::Render(_)));
        assert!(err.to_string().contains("www/item"));
    }

    #[test]
    fn test_handler_error_is_transparent() {
        let err: CollectionError = HandlerError::new("no category").at(2).into();
        assert_eq!(err.to_string(), "identifier handler #2 failed: no category");
    }
}
