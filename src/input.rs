//! Input model: contact events, toolbar buttons, modes, and the gesture state.
//!
//! This module defines the types consumed by the gesture engine. A
//! [`ContactEvent`] is one normalized finger report. [`Toolbar`] is the fixed
//! set of on-screen buttons, passed in as configuration. [`InputState`] is the
//! gesture being interpreted; each variant is one mode and carries whatever
//! context that mode needs, so mode-specific data cannot outlive its mode.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::consts::BUTTON_SIZE_PX;
use crate::cursor::ContactId;
use crate::doc::ShapeId;

/// Contact phase after platform sub-phases are collapsed.
///
/// Pointer-up and cancel both arrive as [`Phase::Up`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Down,
    Move,
    Up,
}

/// A single reported contact position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub position: Point,
}

/// One normalized input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactEvent {
    /// Contact this event is about.
    pub id: ContactId,
    /// Its position in surface pixels.
    pub position: Point,
    pub phase: Phase,
    /// Every contact currently on the surface. Only read for [`Phase::Move`],
    /// where one platform event may carry new positions for several fingers.
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

impl ContactEvent {
    #[must_use]
    pub fn down(id: ContactId, x: f64, y: f64) -> Self {
        Self { id, position: Point::new(x, y), phase: Phase::Down, contacts: Vec::new() }
    }

    #[must_use]
    pub fn up(id: ContactId, x: f64, y: f64) -> Self {
        Self { id, position: Point::new(x, y), phase: Phase::Up, contacts: Vec::new() }
    }

    /// A move of `id` that also reports `contacts` (which should include `id`).
    #[must_use]
    pub fn moved(id: ContactId, x: f64, y: f64, contacts: Vec<Contact>) -> Self {
        Self { id, position: Point::new(x, y), phase: Phase::Move, contacts }
    }
}

/// Which interaction mode is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Neutral,
    CameraManipulation,
    ShapeManipulation,
    PolygonManipulation,
    Lasso,
    Create,
    FrameToShape,
    FrameToScene,
    Erase,
}

/// The five toolbar buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonKind {
    Lasso,
    Create,
    FrameToShape,
    FrameToScene,
    Erase,
}

impl ButtonKind {
    /// Hit-test priority order.
    pub const ALL: [ButtonKind; 5] = [
        ButtonKind::Lasso,
        ButtonKind::Create,
        ButtonKind::FrameToShape,
        ButtonKind::FrameToScene,
        ButtonKind::Erase,
    ];

    /// The mode this button activates.
    #[must_use]
    pub fn mode(self) -> Mode {
        match self {
            Self::Lasso => Mode::Lasso,
            Self::Create => Mode::Create,
            Self::FrameToShape => Mode::FrameToShape,
            Self::FrameToScene => Mode::FrameToScene,
            Self::Erase => Mode::Erase,
        }
    }

    /// The state entered when this button is pressed.
    #[must_use]
    pub fn input_state(self) -> InputState {
        match self {
            Self::Lasso => InputState::Lasso,
            Self::Create => InputState::Create,
            Self::FrameToShape => InputState::FrameToShape,
            Self::FrameToScene => InputState::FrameToScene,
            Self::Erase => InputState::Erase,
        }
    }
}

/// A fixed on-screen button in pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolButton {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ToolButton {
    #[must_use]
    pub fn new(label: &str, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { label: label.to_string(), x, y, width, height }
    }

    /// Left/top edges are inside, right/bottom edges are not.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }
}

/// The toolbar: one button per tool mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toolbar {
    pub lasso: ToolButton,
    pub create: ToolButton,
    pub frame_to_shape: ToolButton,
    pub frame_to_scene: ToolButton,
    pub erase: ToolButton,
}

impl Default for Toolbar {
    fn default() -> Self {
        let s = BUTTON_SIZE_PX;
        Self {
            lasso: ToolButton::new("Lasso", 10.0, 70.0, s, s),
            create: ToolButton::new("Create", 10.0, 220.0, s, s),
            frame_to_shape: ToolButton::new("Zoom Shape", 10.0, 370.0, s, s),
            frame_to_scene: ToolButton::new("AutoZoom", 10.0, 520.0, s, s),
            erase: ToolButton::new("Erase", 10.0, 670.0, s, s),
        }
    }
}

impl Toolbar {
    #[must_use]
    pub fn button(&self, kind: ButtonKind) -> &ToolButton {
        match kind {
            ButtonKind::Lasso => &self.lasso,
            ButtonKind::Create => &self.create,
            ButtonKind::FrameToShape => &self.frame_to_shape,
            ButtonKind::FrameToScene => &self.frame_to_scene,
            ButtonKind::Erase => &self.erase,
        }
    }

    /// The first button, in priority order, containing the pixel point.
    #[must_use]
    pub fn hit(&self, p: Point) -> Option<ButtonKind> {
        ButtonKind::ALL
            .into_iter()
            .find(|kind| self.button(*kind).contains(p))
    }

    /// Buttons in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (ButtonKind, &ToolButton)> {
        ButtonKind::ALL.into_iter().map(|kind| (kind, self.button(kind)))
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Selected shapes. Holds ids only; the store owns the shapes.
    pub selected_ids: Vec<ShapeId>,
    /// The last completed lasso in world space, empty before the first one.
    pub lasso_points: Vec<Point>,
}

impl UiState {
    #[must_use]
    pub fn is_selected(&self, id: &ShapeId) -> bool {
        self.selected_ids.contains(id)
    }

    /// Drop `id` from the selection. Returns whether it was selected.
    pub fn deselect(&mut self, id: &ShapeId) -> bool {
        let before = self.selected_ids.len();
        self.selected_ids.retain(|s| s != id);
        self.selected_ids.len() != before
    }

    /// Replace the selection, skipping duplicates.
    pub fn select_only(&mut self, ids: impl IntoIterator<Item = ShapeId>) {
        self.selected_ids.clear();
        for id in ids {
            if !self.is_selected(&id) {
                self.selected_ids.push(id);
            }
        }
    }
}

/// The gesture state machine's current state, one variant per [`Mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for a single finger to touch down.
    #[default]
    Neutral,
    /// One finger pans, two fingers pan and zoom the camera.
    CameraManipulation,
    /// One finger drags, two fingers rotate and scale a single shape.
    ShapeManipulation {
        /// The shape under the finger that started the gesture.
        id: ShapeId,
    },
    /// One finger drags every selected shape.
    PolygonManipulation,
    /// A finger traces a lasso while the button is held.
    Lasso,
    /// Fingers mark the vertices of a new polygon.
    Create,
    /// The next tap on a shape frames the camera on it.
    FrameToShape,
    /// Frames the whole scene on the next event.
    FrameToScene,
    /// The next tap on a shape deletes it.
    Erase,
}

impl InputState {
    #[must_use]
    pub fn mode(self) -> Mode {
        match self {
            Self::Neutral => Mode::Neutral,
            Self::CameraManipulation => Mode::CameraManipulation,
            Self::ShapeManipulation { .. } => Mode::ShapeManipulation,
            Self::PolygonManipulation => Mode::PolygonManipulation,
            Self::Lasso => Mode::Lasso,
            Self::Create => Mode::Create,
            Self::FrameToShape => Mode::FrameToShape,
            Self::FrameToScene => Mode::FrameToScene,
            Self::Erase => Mode::Erase,
        }
    }
}
