//! Core abstractions for scene processing
//!
//! Geometry, configuration, errors, logging and the drawing surfaces shared
//! by the navigation scene pipeline.

mod canvas;
mod config;
mod context;
mod error;
mod glyphs;
pub mod logging;
mod render_target;
mod types;

pub use canvas::*;
pub use config::*;
pub use context::*;
pub use error::*;
pub use glyphs::*;
pub use logging::*;
pub use render_target::*;
pub use types::*;
