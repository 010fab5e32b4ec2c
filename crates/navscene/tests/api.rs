//! Integration tests for the public API

use navscene::prelude::*;
use navscene::scene::ActionPath;
use navscene::{render, render_with_config, route};

const LOGIN_FLOW: &str = r#"{
    "id": "main",
    "label": "Main",
    "destinations": [
        {"id": "login", "label": "Login", "x": 0, "y": 0},
        {"id": "home", "label": "Home", "x": 400, "y": 0},
        {"id": "settings", "kind": "activity", "label": "Settings", "x": 800, "y": 0},
        {"id": "onboarding", "kind": "navigation", "label": "Onboarding", "x": 400, "y": 400}
    ],
    "actions": [
        {"id": "signed_in", "from": "login", "to": "home"},
        {"id": "open_settings", "from": "home", "to": "settings", "selected": true},
        {"id": "reload", "from": "home", "to": "home"},
        {"id": "logout", "to": "login"},
        {"id": "finish", "from": "onboarding", "to": "external", "kind": "exit"}
    ]
}"#;

#[test]
fn test_route_login_flow() {
    let geometry = route(LOGIN_FLOW).unwrap();

    // Four destinations plus one global and one exit stub
    assert_eq!(geometry.nodes.len(), 6);
    assert_eq!(geometry.actions.len(), 5);

    let shapes: Vec<&str> = geometry
        .actions
        .iter()
        .map(|a| match a.path {
            ActionPath::Curve(_) => "curve",
            ActionPath::SelfLoop(_) => "loop",
            ActionPath::Stub(_) => "stub",
        })
        .collect();
    assert_eq!(shapes, vec!["curve", "curve", "loop", "stub", "stub"]);
    assert_eq!(geometry.actions[1].mode, DrawMode::Selected);
}

#[test]
fn test_geometry_serializes() {
    let geometry = route(LOGIN_FLOW).unwrap();
    let json = serde_json::to_value(&geometry).unwrap();

    assert!(json["nodes"].is_array());
    assert_eq!(json["actions"][0]["action"], "signed_in");
    assert_eq!(json["actions"][0]["path"]["shape"], "curve");
    assert_eq!(json["actions"][2]["path"]["shape"], "self_loop");
    assert_eq!(json["actions"][2]["kind"], "self");
    assert_eq!(json["actions"][0]["arrow"]["direction"], "right");
    assert_eq!(json["bounding_box"]["width"].as_i64().map(|w| w > 0), Some(true));
}

#[test]
fn test_render_login_flow() {
    let ascii = render(LOGIN_FLOW).unwrap();
    assert!(ascii.contains("Login"));
    assert!(ascii.contains("Home"));
    assert!(ascii.contains("Settings"));
    // Nested graphs use rounded corners
    assert!(ascii.contains('╭'));
    // The selected action is drawn heavy
    assert!(ascii.contains('•'));
}

#[test]
fn test_render_ascii_only() {
    let config = SceneConfig::default().with_style(CharacterSet::Ascii);
    let ascii = render_with_config(LOGIN_FLOW, config).unwrap();
    assert!(ascii.is_ascii());
    assert!(ascii.contains("Login"));
}

#[test]
fn test_nav_scene_pipeline() {
    let document = NavDocument::from_json(LOGIN_FLOW).unwrap();
    let mut scene = NavScene::from_document(&document, SceneConfig::default()).unwrap();
    scene.layout().unwrap();

    assert!(scene.report().is_clean());
    assert_eq!(scene.actions().len(), 5);

    let list = scene.display_list();
    // Four boxes, then path and arrow per action
    assert_eq!(list.len(), 4 + 2 * 5);
    assert!(matches!(list.commands()[0], DrawCommand::Node { .. }));
}

#[test]
fn test_zoom_scales_geometry() {
    let document = NavDocument::from_json(LOGIN_FLOW).unwrap();

    let mut normal = NavScene::from_document(&document, SceneConfig::default()).unwrap();
    normal.layout().unwrap();
    let mut zoomed =
        NavScene::from_document(&document, SceneConfig::default().with_zoom(2.0)).unwrap();
    zoomed.layout().unwrap();

    let a = &normal.geometry().nodes[1].rect;
    let b = &zoomed.geometry().nodes[1].rect;
    assert_eq!(b.x, a.x * 2);
    assert_eq!(b.width, a.width * 2);
}

#[test]
fn test_hit_testing() {
    let document = NavDocument::from_json(LOGIN_FLOW).unwrap();
    let mut scene = NavScene::from_document(&document, SceneConfig::default()).unwrap();
    scene.layout().unwrap();

    let login = scene.graph().get("login").unwrap().rect();
    let start = login.connection_point(Direction::Right);
    assert_eq!(scene.action_at(start), Some("signed_in"));
    assert_eq!(scene.action_at(Point::new(5000, 5000)), None);
}

#[test]
fn test_position_near_i32_max_is_rejected() {
    let input = r#"{"id": "m", "destinations": [{"id": "a", "x": 2147483600, "y": 0}]}"#;
    let err = route(input).unwrap_err();
    assert!(err.to_string().contains("Invalid position for a"));
    assert!(render(input).is_err());
}

#[test]
fn test_extreme_coordinates_zoom_and_viewport() {
    let limit = navscene::scene::metrics::MAX_COORDINATE;
    let mut document = NavDocument::new("main");
    document
        .destinations
        .push(DestinationDoc::new("west", DestinationKind::Fragment).at(-limit, -limit));
    document
        .destinations
        .push(DestinationDoc::new("east", DestinationKind::Fragment).at(limit, limit));
    document.actions.push(ActionDoc::new("cross", Some("west"), "east"));
    document.actions.push(ActionDoc::new("stay", Some("east"), "east"));
    document.actions.push(ActionDoc::new("anywhere", None, "west"));

    let config = SceneConfig::default()
        .with_zoom(50.0)
        .with_viewport(Size::new(i32::MAX, i32::MAX));
    let mut scene = NavScene::from_document(&document, config).unwrap();
    scene.layout().unwrap();

    let geometry = scene.geometry();
    assert_eq!(geometry.actions.len(), 3);
    assert!(geometry.bounding_box.width >= 0);
    assert!(scene.render_ascii().lines().count() <= navscene::scene::MAX_CANVAS_ROWS as usize);
    let _ = scene.action_at(Point::new(i32::MAX, i32::MIN));
}

#[test]
fn test_widely_spread_document_renders_bounded() {
    let input = r#"{
        "id": "main",
        "destinations": [
            {"id": "near", "x": 0, "y": 0},
            {"id": "far", "x": 100000000, "y": 0}
        ],
        "actions": [{"id": "travel", "from": "near", "to": "far"}]
    }"#;
    let output = render(input).unwrap();
    assert!(output.lines().count() <= navscene::scene::MAX_CANVAS_ROWS as usize);
    for line in output.lines() {
        assert!(line.chars().count() <= navscene::scene::MAX_CANVAS_COLUMNS as usize + 3);
    }
}
