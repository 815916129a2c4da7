use super::*;
use crate::input::ContactEvent;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn square(x: f64, y: f64, side: f64) -> Vec<Point> {
    vec![pt(x, y), pt(x + side, y), pt(x + side, y + side), pt(x, y + side)]
}

fn send(core: &mut EngineCore, event: ContactEvent) {
    core.process_event(&event);
}

fn buttons(commands: &[DrawCommand]) -> Vec<(ButtonKind, bool)> {
    commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Button { kind, highlighted, .. } => Some((*kind, *highlighted)),
            _ => None,
        })
        .collect()
}

#[test]
fn idle_scene_draws_shapes_then_buttons() {
    let mut core = EngineCore::new();
    let a = core.add_shape(square(300.0, 300.0, 50.0)).unwrap();
    let b = core.add_shape(square(400.0, 300.0, 50.0)).unwrap();

    let commands = display_list(&core);
    assert_eq!(commands.len(), 7);
    assert!(matches!(&commands[0], DrawCommand::Shape { id, manipulated: false, .. } if *id == a));
    assert!(matches!(&commands[1], DrawCommand::Shape { id, manipulated: false, .. } if *id == b));
    assert_eq!(
        buttons(&commands),
        vec![
            (ButtonKind::Lasso, false),
            (ButtonKind::Create, false),
            (ButtonKind::FrameToShape, false),
            (ButtonKind::FrameToScene, false),
            (ButtonKind::Erase, false),
        ]
    );
}

#[test]
fn active_tool_button_is_highlighted() {
    let mut core = EngineCore::new();
    send(&mut core, ContactEvent::down(1, 50.0, 700.0));
    let highlighted: Vec<ButtonKind> = buttons(&display_list(&core))
        .into_iter()
        .filter(|(_, on)| *on)
        .map(|(kind, _)| kind)
        .collect();
    assert_eq!(highlighted, vec![ButtonKind::Erase]);
}

#[test]
fn manipulated_shape_is_flagged() {
    let mut core = EngineCore::new();
    let id = core.add_shape(square(300.0, 300.0, 50.0)).unwrap();
    send(&mut core, ContactEvent::down(1, 320.0, 320.0));
    let commands = display_list(&core);
    assert!(commands.iter().any(|c| matches!(c, DrawCommand::Shape { id: s, manipulated: true, .. } if *s == id)));
}

#[test]
fn contact_count_label_follows_cursors() {
    let mut core = EngineCore::new();
    assert!(!display_list(&core).iter().any(|c| matches!(c, DrawCommand::ContactCount { .. })));

    send(&mut core, ContactEvent::down(1, 500.0, 500.0));
    send(&mut core, ContactEvent::down(2, 600.0, 500.0));
    let commands = display_list(&core);
    assert_eq!(
        commands.last(),
        Some(&DrawCommand::ContactCount { count: 2, at: pt(CONTACT_LABEL_X_PX, CONTACT_LABEL_Y_PX) })
    );
}

#[test]
fn lasso_in_progress_is_drawn_in_pixels() {
    let mut core = EngineCore::new();
    core.viewport_mut().zoom = 2.0;
    send(&mut core, ContactEvent::down(1, 50.0, 100.0));
    send(&mut core, ContactEvent::down(2, 300.0, 300.0));
    send(&mut core, ContactEvent::moved(2, 400.0, 300.0, Vec::new()));

    let commands = display_list(&core);
    let lasso = commands.iter().find_map(|c| match c {
        DrawCommand::Lasso { points } => Some(points.clone()),
        _ => None,
    });
    assert_eq!(lasso, Some(vec![pt(300.0, 300.0), pt(400.0, 300.0)]));
}

#[test]
fn no_lasso_outside_lasso_mode() {
    let mut core = EngineCore::new();
    send(&mut core, ContactEvent::down(1, 500.0, 500.0));
    send(&mut core, ContactEvent::moved(1, 520.0, 500.0, Vec::new()));
    assert!(!display_list(&core).iter().any(|c| matches!(c, DrawCommand::Lasso { .. })));
}

#[test]
fn selection_draws_halo_first() {
    let mut core = EngineCore::new();
    let id = core.add_shape(square(300.0, 300.0, 50.0)).unwrap();
    send(&mut core, ContactEvent::down(1, 50.0, 100.0));
    send(&mut core, ContactEvent::down(2, 250.0, 250.0));
    for (x, y) in [(450.0, 250.0), (450.0, 450.0), (250.0, 450.0)] {
        send(&mut core, ContactEvent::moved(2, x, y, Vec::new()));
    }
    send(&mut core, ContactEvent::up(2, 250.0, 450.0));
    send(&mut core, ContactEvent::up(1, 50.0, 100.0));
    assert_eq!(core.selection(), &[id]);

    let commands = display_list(&core);
    let DrawCommand::Halo { points } = &commands[0] else {
        panic!("expected halo first, got {:?}", commands[0]);
    };
    for corner in square(300.0, 300.0, 50.0) {
        assert!(crate::geometry::point_in_polygon(points, corner));
    }
    assert!(commands[0].is_world_space());
}

#[test]
fn world_space_split() {
    let button = DrawCommand::Button {
        kind: ButtonKind::Lasso,
        button: ToolButton::new("Lasso", 0.0, 0.0, 1.0, 1.0),
        highlighted: false,
    };
    assert!(!button.is_world_space());
    assert!(!DrawCommand::Lasso { points: Vec::new() }.is_world_space());
    assert!(!DrawCommand::ContactCount { count: 1, at: pt(0.0, 0.0) }.is_world_space());
    assert!(DrawCommand::Halo { points: Vec::new() }.is_world_space());
}
