//! Points, the viewport contract, and the pan/zoom camera.
//!
//! The gesture engine never does projection math itself. It talks to a
//! [`Viewport`], handing it pixel-space points for camera gestures and asking
//! it to convert pixel positions into world space for shape edits. [`Camera`]
//! is the implementation used by the browser engine.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::consts::{FRAME_MARGIN_PX, GEOMETRY_EPSILON, MAX_ZOOM, MIN_ZOOM};
use crate::geometry::BoundingRect;

/// A point in either screen (pixel) or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Length of this point taken as a vector from the origin.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (other - self).length()
    }

    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// The viewport contract consumed by the gesture engine.
///
/// Pixel arguments are surface coordinates as delivered by the input source;
/// world arguments are scene coordinates as stored in shapes.
pub trait Viewport {
    /// Convert a pixel-space point to world coordinates.
    fn pixels_to_world(&self, pixels: Point) -> Point;

    /// Convert a world-space point to pixel coordinates.
    fn world_to_pixels(&self, world: Point) -> Point;

    /// Pan so that whatever was under `from` ends up under `to`.
    fn pan_by_pixel_displacement(&mut self, from: Point, to: Point);

    /// Pan and zoom so the segment `from1→from2` maps onto `to1→to2`.
    fn pan_and_zoom_by_two_pixel_displacements(&mut self, from1: Point, from2: Point, to1: Point, to2: Point);

    /// Fit the viewport to a world-space rectangle.
    fn frame(&mut self, rect: &BoundingRect, animated: bool);
}

/// Camera state for pan/zoom on the infinite canvas.
///
/// `pan_x` / `pan_y` are in CSS pixels.
/// `zoom` is a scale factor (1.0 = no zoom).
/// `viewport_width` / `viewport_height` are the surface size used by framing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0, viewport_width: 0.0, viewport_height: 0.0 }
    }
}

impl Camera {
    /// Record the surface size in CSS pixels.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width.max(0.0);
        self.viewport_height = height.max(0.0);
    }

    fn pan(&self) -> Point {
        Point::new(self.pan_x, self.pan_y)
    }

    fn set_pan(&mut self, pan: Point) {
        self.pan_x = pan.x;
        self.pan_y = pan.y;
    }
}

impl Viewport for Camera {
    fn pixels_to_world(&self, pixels: Point) -> Point {
        Point {
            x: (pixels.x - self.pan_x) / self.zoom,
            y: (pixels.y - self.pan_y) / self.zoom,
        }
    }

    fn world_to_pixels(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan_x,
            y: world.y * self.zoom + self.pan_y,
        }
    }

    fn pan_by_pixel_displacement(&mut self, from: Point, to: Point) {
        self.set_pan(self.pan() + (to - from));
    }

    fn pan_and_zoom_by_two_pixel_displacements(&mut self, from1: Point, from2: Point, to1: Point, to2: Point) {
        let old_mid = from1.midpoint(from2);
        let new_mid = to1.midpoint(to2);
        let old_dist = from1.distance(from2);
        let new_dist = to1.distance(to2);

        if old_dist < GEOMETRY_EPSILON || new_dist < GEOMETRY_EPSILON {
            self.pan_by_pixel_displacement(old_mid, new_mid);
            return;
        }

        // Keep the world point under the old midpoint beneath the new one.
        let anchor = self.pixels_to_world(old_mid);
        self.zoom = (self.zoom * new_dist / old_dist).clamp(MIN_ZOOM, MAX_ZOOM);
        self.set_pan(new_mid - anchor * self.zoom);
    }

    fn frame(&mut self, rect: &BoundingRect, animated: bool) {
        let Some(center) = rect.center() else {
            return;
        };

        let avail_w = (self.viewport_width - 2.0 * FRAME_MARGIN_PX).max(1.0);
        let avail_h = (self.viewport_height - 2.0 * FRAME_MARGIN_PX).max(1.0);
        let (w, h) = (rect.width(), rect.height());

        if w > GEOMETRY_EPSILON || h > GEOMETRY_EPSILON {
            let fit_w = if w > GEOMETRY_EPSILON { avail_w / w } else { f64::INFINITY };
            let fit_h = if h > GEOMETRY_EPSILON { avail_h / h } else { f64::INFINITY };
            self.zoom = fit_w.min(fit_h).clamp(MIN_ZOOM, MAX_ZOOM);
        }

        let viewport_center = Point::new(self.viewport_width * 0.5, self.viewport_height * 0.5);
        self.set_pan(viewport_center - center * self.zoom);
        tracing::trace!(zoom = self.zoom, animated, "camera framed rectangle");
    }
}
