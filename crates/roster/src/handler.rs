//! Identifier handler chain.
//!
//! Instead of asking the data source for every identifier, a paged
//! collection can delegate candidate resolution to a chain of handlers.
//! Each handler receives the in-progress identifier set and may replace,
//! extend or prune it:
//!
//! ```text
//! [] → handler 0 → handler 1 → ... → candidate identifiers
//! ```
//!
//! Handlers run in registration order. The first one to return an error
//! stops the chain; later handlers never run.
//!
//! # Example
//!
//! ```rust
//! use roster::{handler_fn, handler_with, HandlerChain, HandlerError, Key};
//!
//! let mut chain = HandlerChain::new();
//! chain.push(handler_fn(|ids: &mut Vec<Key>| {
//!     ids.extend([Key::Int(1), Key::Int(2), Key::Int(3)]);
//!     Ok(())
//! }));
//! chain.push(handler_with(
//!     |ids: &mut Vec<Key>, min: &i64| {
//!         ids.retain(|id| matches!(id, Key::Int(n) if n >= min));
//!         Ok(())
//!     },
//!     2i64,
//! ));
//!
//! let mut ids = Vec::new();
//! chain.run(&mut ids).unwrap();
//! assert_eq!(ids, vec![Key::Int(2), Key::Int(3)]);
//! ```

use std::fmt;

use roster_query::Key;
use thiserror::Error;

/// Error returned by an identifier handler.
#[derive(Debug, Error)]
#[error("identifier handler #{index} failed: {message}")]
pub struct HandlerError {
    /// Human-readable reason.
    pub message: String,
    /// Position of the failing handler in its chain.
    pub index: usize,
    /// The underlying error, if any.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl HandlerError {
    /// Creates a handler error with the given reason.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            index: 0,
            source: None,
        }
    }

    /// Records the chain position of the failing handler.
    pub fn at(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// Sets the source error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        self.source = Some(source.into());
        self
    }
}

/// Produces or filters candidate identifiers.
pub trait IdHandler {
    /// Updates `ids` in place. Returning an error stops the chain.
    fn handle(&mut self, ids: &mut Vec<Key>) -> Result<(), HandlerError>;
}

/// An [`IdHandler`] backed by a closure. Created by [`handler_fn`].
pub struct FnHandler<F> {
    f: F,
}

impl<F> IdHandler for FnHandler<F>
where
    F: FnMut(&mut Vec<Key>) -> Result<(), HandlerError>,
{
    fn handle(&mut self, ids: &mut Vec<Key>) -> Result<(), HandlerError> {
        (self.f)(ids)
    }
}

/// Wraps a closure as an [`IdHandler`].
pub fn handler_fn<F>(f: F) -> FnHandler<F>
where
    F: FnMut(&mut Vec<Key>) -> Result<(), HandlerError>,
{
    FnHandler { f }
}

/// An [`IdHandler`] with a fixed extra argument. Created by [`handler_with`].
pub struct BoundHandler<F, A> {
    f: F,
    args: A,
}

impl<F, A> IdHandler for BoundHandler<F, A>
where
    F: FnMut(&mut Vec<Key>, &A) -> Result<(), HandlerError>,
{
    fn handle(&mut self, ids: &mut Vec<Key>) -> Result<(), HandlerError> {
        (self.f)(ids, &self.args)
    }
}

/// Binds `args` to a handler; every invocation receives them after the
/// identifier set.
pub fn handler_with<F, A>(f: F, args: A) -> BoundHandler<F, A>
where
    F: FnMut(&mut Vec<Key>, &A) -> Result<(), HandlerError>,
{
    BoundHandler { f, args }
}

/// Ordered handler chain.
#[derive(Default)]
pub struct HandlerChain {
    handlers: Vec<Box<dyn IdHandler>>,
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler.
    pub fn push(&mut self, handler: impl IdHandler + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs every handler in order against `ids`.
    ///
    /// Stops at the first failure and returns it, tagged with the
    /// handler's position. `ids` keeps whatever the chain produced so far.
    pub fn run(&mut self, ids: &mut Vec<Key>) -> Result<(), HandlerError> {
        for (index, handler) in self.handlers.iter_mut().enumerate() {
            handler.handle(ids).map_err(|err| err.at(index))?;
        }
        Ok(())
    }
}

impl fmt::Debug for HandlerChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerChain")
            .field("len", &self.handlers.len())
            .finish()
    }
}
