//! Navscene - Layout and action routing for navigation graphs
//!
//! Positions the destinations of a navigation graph on a 2D canvas, routes
//! the actions between them as curves, loops and stubs, and draws the result
//! as ASCII art or as a stream of draw commands.
//!
//! # Quick Start
//!
//! ```rust
//! let json = r#"{
//!     "id": "main",
//!     "destinations": [{"id": "home"}, {"id": "detail"}],
//!     "actions": [{"id": "open", "from": "home", "to": "detail"}]
//! }"#;
//!
//! let ascii = navscene::render(json).unwrap();
//! assert!(ascii.contains("home"));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, drive the pipeline yourself:
//!
//! ```rust
//! use navscene::prelude::*;
//!
//! let mut document = NavDocument::new("main");
//! document.destinations.push(DestinationDoc::new("a", DestinationKind::Fragment).at(0, 0));
//! document.destinations.push(DestinationDoc::new("b", DestinationKind::Fragment).at(400, 0));
//! document.actions.push(ActionDoc::new("go", Some("a"), "b"));
//!
//! let mut scene = NavScene::from_document(&document, SceneConfig::default()).unwrap();
//! scene.layout().unwrap();
//!
//! let geometry = scene.geometry();
//! assert_eq!(geometry.actions.len(), 1);
//! ```

pub mod core;
pub mod scene;

pub use crate::core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        ActionKind, CharacterSet, DestinationKind, Direction, DisplayList, DrawCommand, DrawMode,
        Point, Rect, RenderTarget, SceneConfig, SceneContext, SceneError, Size,
    };
    pub use crate::scene::{
        ActionDoc, ActionGeometry, DestinationDoc, EdgeRouter, LayoutAlgorithm, LayoutEngine,
        NavDocument, NavScene, PositionedNode, SceneGeometry, SceneGraph,
    };
}

use crate::scene::{NavDocument, NavScene, SceneGeometry};

fn laid_out(input: &str, config: SceneConfig) -> anyhow::Result<NavScene> {
    let document = NavDocument::from_json(input)?;
    let mut scene = NavScene::from_document(&document, config)?;
    scene.layout()?;
    Ok(scene)
}

/// Lay out a JSON navigation document and return its geometry
///
/// # Example
/// ```rust
/// let geometry = navscene::route(r#"{"id": "main", "destinations": [{"id": "a"}]}"#).unwrap();
/// assert_eq!(geometry.nodes.len(), 1);
/// ```
pub fn route(input: &str) -> anyhow::Result<SceneGeometry> {
    route_with_config(input, SceneConfig::default())
}

/// Like [`route`], with explicit configuration
pub fn route_with_config(input: &str, config: SceneConfig) -> anyhow::Result<SceneGeometry> {
    Ok(laid_out(input, config)?.geometry())
}

/// Lay out a JSON navigation document and draw it as text
///
/// Uses the default Unicode character set.
pub fn render(input: &str) -> anyhow::Result<String> {
    render_with_config(input, SceneConfig::default())
}

/// Like [`render`], with explicit configuration
///
/// # Example
/// ```rust
/// use navscene::{render_with_config, CharacterSet, SceneConfig};
///
/// let json = r#"{"id": "main", "destinations": [{"id": "home"}]}"#;
/// let ascii = render_with_config(json, SceneConfig::default().with_style(CharacterSet::Ascii)).unwrap();
/// assert!(ascii.contains('+'));
/// ```
pub fn render_with_config(input: &str, config: SceneConfig) -> anyhow::Result<String> {
    Ok(laid_out(input, config)?.render_ascii())
}
