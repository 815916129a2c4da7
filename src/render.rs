//! Rendering: a display list built from engine state, and a painter for it.
//!
//! [`display_list`] is pure and reads the engine through `&self` accessors, so
//! the host can inspect exactly what would be drawn. [`draw`] is the only place
//! that touches [`web_sys::CanvasRenderingContext2d`]; it produces pixels and
//! does not mutate any application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::{Camera, Point, Viewport};
use crate::consts::{CONTACT_LABEL_FONT_PX, CONTACT_LABEL_X_PX, CONTACT_LABEL_Y_PX};
use crate::cursor::CursorRole;
use crate::doc::ShapeId;
use crate::engine::EngineCore;
use crate::hit;
use crate::input::{ButtonKind, Mode, ToolButton};

const BACKGROUND: &str = "#000000";
const HALO_FILL: &str = "rgba(255, 0, 0, 0.8)";
const SHAPE_STROKE: &str = "#FFFFFF";
const MANIPULATED_FILL: &str = "rgba(255, 255, 0, 0.35)";
const LASSO_FILL: &str = "rgba(255, 0, 0, 0.5)";
const BUTTON_FILL: &str = "rgba(80, 80, 80, 0.9)";
const BUTTON_HIGHLIGHT_FILL: &str = "rgba(30, 144, 255, 0.9)";
const BUTTON_TEXT: &str = "#FFFFFF";
const LABEL_TEXT: &str = "#FFFFFF";

/// One thing to paint. World-space commands go through the camera transform;
/// the rest are in surface pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled outline around the selection, world space.
    Halo { points: Vec<Point> },
    /// A scene polygon, world space.
    Shape { id: ShapeId, points: Vec<Point>, manipulated: bool },
    /// A toolbar button, pixel space.
    Button { kind: ButtonKind, button: ToolButton, highlighted: bool },
    /// The lasso being traced, pixel space.
    Lasso { points: Vec<Point> },
    /// The `[N contacts]` overlay label, pixel space.
    ContactCount { count: usize, at: Point },
}

impl DrawCommand {
    #[must_use]
    pub fn is_world_space(&self) -> bool {
        matches!(self, Self::Halo { .. } | Self::Shape { .. })
    }
}

/// Build the display list for the current engine state, bottom layer first.
#[must_use]
pub fn display_list<V: Viewport>(core: &EngineCore<V>) -> Vec<DrawCommand> {
    let mut commands = Vec::new();

    // Layer 1: selection halo.
    let halo = hit::selection_halo(core.shapes(), core.selection(), core.config().halo_divisor);
    if !halo.is_empty() {
        commands.push(DrawCommand::Halo { points: halo });
    }

    // Layer 2: shapes in draw order.
    let manipulated = core.manipulated_shape();
    commands.extend(core.shapes().iter().map(|s| DrawCommand::Shape {
        id: s.id(),
        points: s.points().to_vec(),
        manipulated: manipulated == Some(s.id()),
    }));

    // Layer 3: toolbar.
    let mode = core.mode();
    commands.extend(core.config().toolbar.iter().map(|(kind, button)| DrawCommand::Button {
        kind,
        button: button.clone(),
        highlighted: kind.mode() == mode,
    }));

    // Layer 4: lasso in progress.
    if mode == Mode::Lasso {
        if let Some(cursor) = core.cursors().nth_with_role(CursorRole::Dragging, 0) {
            commands.push(DrawCommand::Lasso { points: cursor.positions().to_vec() });
        }
    }

    // Layer 5: contact count.
    let count = core.cursors().len();
    if count > 0 {
        commands.push(DrawCommand::ContactCount {
            count,
            at: Point::new(CONTACT_LABEL_X_PX, CONTACT_LABEL_Y_PX),
        });
    }

    commands
}

/// Paint a display list.
///
/// `viewport_w` and `viewport_h` are in CSS pixels. `dpr` is the device pixel ratio.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    camera: &Camera,
    commands: &[DrawCommand],
    viewport_w: f64,
    viewport_h: f64,
    dpr: f64,
) -> Result<(), JsValue> {
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, viewport_w, viewport_h);

    // World layer.
    ctx.save();
    ctx.translate(camera.pan_x, camera.pan_y)?;
    ctx.scale(camera.zoom, camera.zoom)?;
    ctx.set_line_width(1.0 / camera.zoom);
    for command in commands.iter().filter(|c| c.is_world_space()) {
        draw_command(ctx, command)?;
    }
    ctx.restore();

    // Pixel layer.
    for command in commands.iter().filter(|c| !c.is_world_space()) {
        draw_command(ctx, command)?;
    }
    Ok(())
}

fn draw_command(ctx: &CanvasRenderingContext2d, command: &DrawCommand) -> Result<(), JsValue> {
    match command {
        DrawCommand::Halo { points } => {
            ctx.set_fill_style_str(HALO_FILL);
            polygon_path(ctx, points);
            ctx.fill();
            Ok(())
        }
        DrawCommand::Shape { points, manipulated, .. } => {
            draw_shape(ctx, points, *manipulated);
            Ok(())
        }
        DrawCommand::Button { button, highlighted, .. } => draw_button(ctx, button, *highlighted),
        DrawCommand::Lasso { points } => {
            ctx.set_fill_style_str(LASSO_FILL);
            polygon_path(ctx, points);
            ctx.fill();
            Ok(())
        }
        DrawCommand::ContactCount { count, at } => {
            ctx.set_fill_style_str(LABEL_TEXT);
            ctx.set_text_align("left");
            ctx.set_text_baseline("alphabetic");
            ctx.set_font(&format!("{CONTACT_LABEL_FONT_PX:.0}px sans-serif"));
            ctx.fill_text(&format!("[{count} contacts]"), at.x, at.y)
        }
    }
}

fn draw_shape(ctx: &CanvasRenderingContext2d, points: &[Point], manipulated: bool) {
    polygon_path(ctx, points);
    if manipulated {
        ctx.set_fill_style_str(MANIPULATED_FILL);
        ctx.fill();
    }
    ctx.set_stroke_style_str(SHAPE_STROKE);
    ctx.stroke();
}

fn draw_button(ctx: &CanvasRenderingContext2d, button: &ToolButton, highlighted: bool) -> Result<(), JsValue> {
    ctx.set_fill_style_str(if highlighted { BUTTON_HIGHLIGHT_FILL } else { BUTTON_FILL });
    ctx.fill_rect(button.x, button.y, button.width, button.height);

    ctx.set_line_width(1.0);
    ctx.set_stroke_style_str(BUTTON_TEXT);
    ctx.stroke_rect(button.x, button.y, button.width, button.height);

    let font_size = (button.height * 0.16).clamp(12.0, 24.0);
    ctx.set_fill_style_str(BUTTON_TEXT);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_font(&format!("{font_size:.0}px sans-serif"));
    ctx.fill_text(&button.label, button.x + button.width * 0.5, button.y + button.height * 0.5)
}

/// Trace a closed path through `points`. Leaves the path empty for no points.
fn polygon_path(ctx: &CanvasRenderingContext2d, points: &[Point]) {
    ctx.begin_path();
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    ctx.move_to(first.x, first.y);
    for p in rest {
        ctx.line_to(p.x, p.y);
    }
    ctx.close_path();
}
