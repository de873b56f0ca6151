//! View resolution and rendering.
//!
//! - [`view`]: the [`ViewRenderer`] contract and the [`View`] handle
//! - [`renderer`]: the minijinja-backed [`Renderer`]
//! - [`loader`]: name-to-file resolution for template directories

pub mod loader;
pub mod renderer;
pub mod view;

pub use loader::{DirLoader, TEMPLATE_EXTENSIONS};
pub use renderer::Renderer;
pub use view::{View, ViewContext, ViewRenderer};
