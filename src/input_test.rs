use uuid::Uuid;

use super::*;

// =============================================================
// ContactEvent
// =============================================================

#[test]
fn contact_event_constructors() {
    let down = ContactEvent::down(3, 1.0, 2.0);
    assert_eq!(down.phase, Phase::Down);
    assert_eq!(down.position, Point::new(1.0, 2.0));
    assert!(down.contacts.is_empty());

    let up = ContactEvent::up(3, 1.0, 2.0);
    assert_eq!(up.phase, Phase::Up);

    let contacts = vec![Contact { id: 3, position: Point::new(5.0, 5.0) }];
    let moved = ContactEvent::moved(3, 5.0, 5.0, contacts.clone());
    assert_eq!(moved.phase, Phase::Move);
    assert_eq!(moved.contacts, contacts);
}

#[test]
fn contact_event_deserializes_without_contacts() {
    let raw = r#"{"id": 9, "position": {"x": 1.0, "y": 2.0}, "phase": "move"}"#;
    let event: ContactEvent = serde_json::from_str(raw).unwrap();
    assert_eq!(event, ContactEvent::moved(9, 1.0, 2.0, Vec::new()));
}

#[test]
fn phase_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Phase::Up).unwrap(), "\"up\"");
}

// =============================================================
// Mode / InputState
// =============================================================

#[test]
fn defaults_are_neutral() {
    assert_eq!(Mode::default(), Mode::Neutral);
    assert_eq!(InputState::default(), InputState::Neutral);
    assert_eq!(InputState::default().mode(), Mode::Neutral);
}

#[test]
fn shape_manipulation_carries_its_shape() {
    let id = Uuid::new_v4();
    let state = InputState::ShapeManipulation { id };
    assert_eq!(state.mode(), Mode::ShapeManipulation);
    assert_ne!(state, InputState::ShapeManipulation { id: Uuid::new_v4() });
}

#[test]
fn mode_serializes_snake_case() {
    assert_eq!(serde_json::to_string(&Mode::FrameToScene).unwrap(), "\"frame_to_scene\"");
}

#[test]
fn button_kinds_map_to_matching_modes() {
    for kind in ButtonKind::ALL {
        assert_eq!(kind.input_state().mode(), kind.mode());
    }
    assert_eq!(ButtonKind::Erase.mode(), Mode::Erase);
}

// =============================================================
// ToolButton / Toolbar
// =============================================================

#[test]
fn tool_button_contains_is_half_open() {
    let b = ToolButton::new("X", 10.0, 20.0, 100.0, 50.0);
    assert!(b.contains(Point::new(10.0, 20.0)));
    assert!(b.contains(Point::new(109.9, 69.9)));
    assert!(!b.contains(Point::new(110.0, 30.0)));
    assert!(!b.contains(Point::new(50.0, 70.0)));
    assert!(!b.contains(Point::new(9.9, 30.0)));
}

#[test]
fn default_toolbar_layout() {
    let bar = Toolbar::default();
    let labels: Vec<&str> = bar.iter().map(|(_, b)| b.label.as_str()).collect();
    assert_eq!(labels, vec!["Lasso", "Create", "Zoom Shape", "AutoZoom", "Erase"]);
    assert_eq!(bar.create, ToolButton::new("Create", 10.0, 220.0, 140.0, 140.0));
    assert_eq!(bar.erase.y, 670.0);
}

#[test]
fn toolbar_hit() {
    let bar = Toolbar::default();
    assert_eq!(bar.hit(Point::new(50.0, 100.0)), Some(ButtonKind::Lasso));
    assert_eq!(bar.hit(Point::new(50.0, 250.0)), Some(ButtonKind::Create));
    assert_eq!(bar.hit(Point::new(50.0, 400.0)), Some(ButtonKind::FrameToShape));
    assert_eq!(bar.hit(Point::new(50.0, 600.0)), Some(ButtonKind::FrameToScene));
    assert_eq!(bar.hit(Point::new(50.0, 700.0)), Some(ButtonKind::Erase));
    // Gap between lasso and create.
    assert_eq!(bar.hit(Point::new(50.0, 215.0)), None);
    assert_eq!(bar.hit(Point::new(500.0, 100.0)), None);
}

#[test]
fn overlapping_buttons_resolve_in_priority_order() {
    let mut bar = Toolbar::default();
    bar.erase = ToolButton::new("Erase", 10.0, 70.0, 140.0, 140.0);
    assert_eq!(bar.hit(Point::new(50.0, 100.0)), Some(ButtonKind::Lasso));
}

// =============================================================
// UiState
// =============================================================

#[test]
fn select_only_replaces_and_dedupes() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let mut ui = UiState::default();
    ui.select_only([a]);
    ui.select_only([b, a, b]);
    assert_eq!(ui.selected_ids, vec![b, a]);
    assert!(ui.is_selected(&a));
}

#[test]
fn deselect_reports_change() {
    let a = Uuid::new_v4();
    let mut ui = UiState::default();
    ui.select_only([a]);
    assert!(ui.deselect(&a));
    assert!(!ui.deselect(&a));
    assert!(ui.selected_ids.is_empty());
}
