#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::doc::{ShapeId, ShapeStore};
use crate::geometry::{self, BoundingRect};
use crate::input::{ButtonKind, Toolbar, UiState};

/// What a fresh single-finger touch landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// A toolbar button.
    Button(ButtonKind),
    /// The topmost shape under the finger.
    Shape(ShapeId),
    /// Inside the last lasso while it still has a selection.
    Selection,
    /// Empty canvas.
    Canvas,
}

/// Resolve a touch-down in priority order: buttons (pixel space), then
/// shapes, then the last lasso (world space), then the canvas.
#[must_use]
pub fn hit_test(pixels: Point, world: Point, toolbar: &Toolbar, shapes: &ShapeStore, ui: &UiState) -> Hit {
    if let Some(kind) = toolbar.hit(pixels) {
        return Hit::Button(kind);
    }
    if let Some(id) = shapes.shape_at(world) {
        return Hit::Shape(id);
    }
    if !ui.selected_ids.is_empty() && geometry::point_in_polygon(&ui.lasso_points, world) {
        return Hit::Selection;
    }
    Hit::Canvas
}

/// The rounded outline drawn around the selected shapes, in world space.
///
/// Empty when nothing is selected. The offset is the selection's bounding
/// diagonal divided by `divisor`.
#[must_use]
pub fn selection_halo(shapes: &ShapeStore, selected: &[ShapeId], divisor: f64) -> Vec<Point> {
    let points: Vec<Point> = selected
        .iter()
        .filter_map(|id| shapes.get_by_id(id))
        .flat_map(|s| s.points().iter().copied())
        .collect();
    if points.is_empty() {
        return points;
    }
    let offset = BoundingRect::from_points(&points).diagonal_length() / divisor;
    geometry::expand_polygon(&geometry::convex_hull(&points), offset)
}
