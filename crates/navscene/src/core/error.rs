//! Core error types for scene processing
//!
//! Only host contract violations are errors. Unresolved action endpoints and
//! empty bounding boxes are encoded as skipped elements and sentinel values.

use thiserror::Error;

/// Core error types for scene processing
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Unknown node: {id}")]
    UnknownNode { id: String },

    #[error("Duplicate node id: {id}")]
    DuplicateNode { id: String },

    #[error("Invalid parent for {id}: {message}")]
    InvalidParent { id: String, message: String },

    #[error("Invalid dimension for {id}: {width}x{height}")]
    InvalidDimension { id: String, width: i32, height: i32 },

    #[error("Invalid position for {id}: ({x}, {y}) is outside the scene limits")]
    InvalidPosition { id: String, x: i32, y: i32 },

    #[error("Layout error: {message}")]
    LayoutError { message: String },

    #[error("Render error: {message}")]
    RenderError { message: String },

    #[error("Document error: {source}")]
    DocumentError {
        #[from]
        source: serde_json::Error,
    },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl SceneError {
    /// Create a new unknown node error
    pub fn unknown_node(id: impl Into<String>) -> Self {
        Self::UnknownNode { id: id.into() }
    }

    /// Create a new duplicate node error
    pub fn duplicate_node(id: impl Into<String>) -> Self {
        Self::DuplicateNode { id: id.into() }
    }

    /// Create a new invalid parent error
    pub fn invalid_parent(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParent {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Create a new layout error
    pub fn layout_error(message: String) -> Self {
        Self::LayoutError { message }
    }

    /// Create a new render error
    pub fn render_error(message: String) -> Self {
        Self::RenderError { message }
    }
}
