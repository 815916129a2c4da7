//! Scene model: polygon shapes and the store that owns them.
//!
//! A [`Shape`] is a closed polygon in world coordinates with a stable
//! [`ShapeId`]. The [`ShapeStore`] keeps shapes in insertion order, which is
//! also draw order: the last shape added is drawn on top and wins hit tests.
//! Anything outside the store (the selection, the engine's manipulation
//! state) refers to shapes by id, never by reference.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::Serialize;
use uuid::Uuid;

use crate::camera::Point;
use crate::geometry::{self, BoundingRect};

/// Unique identifier for a shape.
pub type ShapeId = Uuid;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("a shape needs at least one point")]
    Empty,
}

/// A closed polygon; the last point connects back to the first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    id: ShapeId,
    points: Vec<Point>,
}

impl Shape {
    /// Build a shape with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::Empty`] when `points` is empty.
    pub fn new(points: Vec<Point>) -> Result<Self, ShapeError> {
        Self::with_id(Uuid::new_v4(), points)
    }

    /// Build a shape with a caller-chosen id.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::Empty`] when `points` is empty.
    pub fn with_id(id: ShapeId, points: Vec<Point>) -> Result<Self, ShapeError> {
        if points.is_empty() {
            return Err(ShapeError::Empty);
        }
        Ok(Self { id, points })
    }

    #[must_use]
    pub fn id(&self) -> ShapeId {
        self.id
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn contains_point(&self, p: Point) -> bool {
        geometry::point_in_polygon(&self.points, p)
    }

    #[must_use]
    pub fn bounding_rect(&self) -> BoundingRect {
        BoundingRect::from_points(&self.points)
    }

    /// A shape is inside a lasso when every one of its vertices is.
    #[must_use]
    pub fn is_inside_lasso(&self, lasso: &[Point]) -> bool {
        lasso.len() >= 3 && self.points.iter().all(|p| geometry::point_in_polygon(lasso, *p))
    }

    pub fn translate(&mut self, from: Point, to: Point) {
        geometry::translate_points(&mut self.points, from, to);
    }

    pub fn transform_two_point(&mut self, from1: Point, from2: Point, to1: Point, to2: Point) {
        geometry::transform_points_two(&mut self.points, from1, from2, to1, to2);
    }
}

/// In-memory, ordered store of shapes.
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    shapes: Vec<Shape>,
}

impl ShapeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a polygon on top of the scene and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::Empty`] when `points` is empty.
    pub fn add(&mut self, points: Vec<Point>) -> Result<ShapeId, ShapeError> {
        let shape = Shape::new(points)?;
        let id = shape.id;
        self.shapes.push(shape);
        Ok(id)
    }

    /// Remove the shape at `index`, returning it if present.
    pub fn remove(&mut self, index: usize) -> Option<Shape> {
        (index < self.shapes.len()).then(|| self.shapes.remove(index))
    }

    /// Remove a shape by id, returning it if present.
    pub fn remove_by_id(&mut self, id: &ShapeId) -> Option<Shape> {
        let index = self.index_of(id)?;
        self.remove(index)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    #[must_use]
    pub fn get_by_id(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == *id)
    }

    pub fn get_mut_by_id(&mut self, id: &ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == *id)
    }

    #[must_use]
    pub fn index_of(&self, id: &ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id == *id)
    }

    /// The topmost shape containing `p`, searching from the last-added down.
    #[must_use]
    pub fn shape_at(&self, p: Point) -> Option<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .find(|s| s.contains_point(p))
            .map(Shape::id)
    }

    /// Union of every shape's bounding rectangle; empty for an empty store.
    #[must_use]
    pub fn bounding_rect(&self) -> BoundingRect {
        let mut rect = BoundingRect::empty();
        for shape in &self.shapes {
            rect.union(&shape.bounding_rect());
        }
        rect
    }

    /// Replace every shape with `shapes`.
    pub fn load(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
    }

    /// Shapes in draw order, bottom first.
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// The starter scene: a triangle, a rectangle and a pentagon.
#[must_use]
pub fn demo_shapes() -> Vec<Vec<Point>> {
    let p = Point::new;
    vec![
        vec![p(100.0, 50.0), p(100.0, 650.0), p(400.0, 350.0)],
        vec![p(500.0, 100.0), p(800.0, 100.0), p(800.0, 300.0), p(500.0, 300.0)],
        vec![p(450.0, 400.0), p(750.0, 400.0), p(950.0, 600.0), p(850.0, 700.0), p(650.0, 700.0)],
    ]
}
