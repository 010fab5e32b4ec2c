//! Navigation document: the host's description of one graph
//!
//! ```json
//! {
//!   "id": "main",
//!   "destinations": [
//!     { "id": "home", "kind": "fragment", "x": 0, "y": 0 },
//!     { "id": "settings", "kind": "activity" }
//!   ],
//!   "actions": [
//!     { "id": "open", "from": "home", "to": "settings" },
//!     { "id": "anywhere", "to": "home" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{ActionKind, DestinationKind, DrawMode, Point, SceneError};

/// A navigation graph as supplied by the host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavDocument {
    /// Id of the root navigation
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub destinations: Vec<DestinationDoc>,
    #[serde(default)]
    pub actions: Vec<ActionDoc>,
}

/// One destination of the graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DestinationDoc {
    pub id: String,
    #[serde(default)]
    pub kind: DestinationKind,
    #[serde(default)]
    pub label: Option<String>,
    /// Stored position in logical units
    #[serde(default)]
    pub x: Option<i32>,
    #[serde(default)]
    pub y: Option<i32>,
}

impl DestinationDoc {
    pub fn new(id: impl Into<String>, kind: DestinationKind) -> Self {
        Self {
            id: id.into(),
            kind,
            ..Default::default()
        }
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Stored position, if both coordinates are present
    pub fn position(&self) -> Option<Point> {
        Some(Point::new(self.x?, self.y?))
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

/// One action of the graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionDoc {
    pub id: String,
    /// Owning destination; absent for actions owned by the root
    #[serde(default)]
    pub from: Option<String>,
    pub to: String,
    #[serde(default)]
    pub kind: Option<ActionKind>,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub highlighted: bool,
}

impl ActionDoc {
    pub fn new(id: impl Into<String>, from: Option<&str>, to: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            from: from.map(str::to_string),
            to: to.into(),
            ..Default::default()
        }
    }

    pub fn with_kind(mut self, kind: ActionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Explicit kind, or the kind implied by the endpoints
    pub fn effective_kind(&self) -> ActionKind {
        self.kind
            .unwrap_or_else(|| ActionKind::classify(self.from.as_deref(), &self.to))
    }

    pub fn mode(&self) -> DrawMode {
        DrawMode::from_flags(self.selected, self.highlighted)
    }
}

impl NavDocument {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Parse a document from JSON
    pub fn from_json(input: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Read and parse a document file
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn destination(&self, id: &str) -> Option<&DestinationDoc> {
        self.destinations.iter().find(|d| d.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let doc = NavDocument::from_json(r#"{"id": "main"}"#).unwrap();
        assert_eq!(doc.id, "main");
        assert!(doc.destinations.is_empty());
        assert!(doc.actions.is_empty());
    }

    #[test]
    fn test_parse_full() {
        let doc = NavDocument::from_json(
            r#"{
                "id": "main",
                "destinations": [
                    {"id": "home", "kind": "fragment", "x": 10, "y": 20, "label": "Home"},
                    {"id": "nested", "kind": "navigation"}
                ],
                "actions": [
                    {"id": "a1", "from": "home", "to": "nested", "selected": true},
                    {"id": "a2", "to": "home"},
                    {"id": "a3", "from": "home", "to": "home"},
                    {"id": "a4", "from": "nested", "to": "outside", "kind": "exit"}
                ]
            }"#,
        )
        .unwrap();

        let home = doc.destination("home").unwrap();
        assert_eq!(home.position(), Some(Point::new(10, 20)));
        assert_eq!(home.display_label(), "Home");
        assert_eq!(doc.destination("nested").unwrap().kind, DestinationKind::Navigation);
        assert_eq!(doc.destination("nested").unwrap().position(), None);

        let kinds: Vec<_> = doc.actions.iter().map(|a| a.effective_kind()).collect();
        assert_eq!(
            kinds,
            vec![
                ActionKind::Regular,
                ActionKind::Global,
                ActionKind::SelfLoop,
                ActionKind::Exit
            ]
        );
        assert_eq!(doc.actions[0].mode(), DrawMode::Selected);
    }

    #[test]
    fn test_partial_position_is_none() {
        let dest = DestinationDoc {
            x: Some(3),
            ..DestinationDoc::new("a", DestinationKind::Activity)
        };
        assert_eq!(dest.position(), None);
        assert_eq!(dest.display_label(), "a");
    }

    #[test]
    fn test_from_missing_path() {
        let err = NavDocument::from_path("/nonexistent/navscene/graph.json").unwrap_err();
        assert!(matches!(err, SceneError::IoError { .. }));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            NavDocument::from_json("{"),
            Err(SceneError::DocumentError { .. })
        ));
    }

    #[test]
    fn test_json_round_trip_keeps_document() {
        let mut doc = NavDocument::new("main");
        doc.destinations
            .push(DestinationDoc::new("a", DestinationKind::Fragment).at(1, 2));
        doc.actions
            .push(ActionDoc::new("x", Some("a"), "b").with_kind(ActionKind::Exit));
        let json = doc.to_json().unwrap();
        assert_eq!(NavDocument::from_json(&json).unwrap(), doc);
    }
}
