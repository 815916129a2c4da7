use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use serde::Serialize;

use crate::camera::{Camera, Point, Viewport};
use crate::config::Config;
use crate::cursor::{CursorContainer, CursorRole};
use crate::doc::{self, Shape, ShapeError, ShapeId, ShapeStore};
use crate::geometry::{self, BoundingRect};
use crate::hit::{self, Hit};
use crate::input::{ContactEvent, InputState, Mode, Phase, UiState};
use crate::render;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Effects returned from [`EngineCore::process_event`] for the host to act on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    ModeChanged { from: Mode, to: Mode },
    CameraChanged,
    CameraFramed { rect: BoundingRect, animated: bool },
    ShapeCreated { id: ShapeId },
    ShapeUpdated { id: ShapeId },
    ShapeDeleted { id: ShapeId },
    SelectionChanged { ids: Vec<ShapeId> },
    RenderNeeded,
}

/// An event after cursor bookkeeping: which cursor it resolved to, the phase
/// it is handled as, and which cursors actually moved.
#[derive(Debug)]
struct Tracked {
    index: usize,
    phase: Phase,
    pixels: Point,
    moved: Vec<usize>,
}

impl Tracked {
    fn moved(&self, index: usize) -> bool {
        self.moved.contains(&index)
    }
}

/// Core engine state: all gesture logic, independent of the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// Generic over the [`Viewport`] so tests can substitute their own mapping.
pub struct EngineCore<V = Camera> {
    shapes: ShapeStore,
    cursors: CursorContainer,
    viewport: V,
    ui: UiState,
    input: InputState,
    config: Config,
}

impl Default for EngineCore<Camera> {
    fn default() -> Self {
        Self::with_viewport(Camera::default(), Config::default())
    }
}

impl EngineCore<Camera> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V: Viewport> EngineCore<V> {
    #[must_use]
    pub fn with_viewport(viewport: V, config: Config) -> Self {
        Self {
            shapes: ShapeStore::new(),
            cursors: CursorContainer::new(),
            viewport,
            ui: UiState::default(),
            input: InputState::default(),
            config,
        }
    }

    // --- Data inputs ---

    /// Add a polygon on top of the scene.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::Empty`] for an empty point list.
    pub fn add_shape(&mut self, points: Vec<Point>) -> Result<ShapeId, ShapeError> {
        self.shapes.add(points)
    }

    /// Remove a shape and purge it from the selection. Returns whether it existed.
    pub fn remove_shape(&mut self, id: &ShapeId) -> bool {
        self.ui.deselect(id);
        self.shapes.remove_by_id(id).is_some()
    }

    /// Replace the scene. Clears the selection and the last lasso.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::Empty`] if any polygon is empty; the scene is
    /// left untouched in that case.
    pub fn load_shapes(&mut self, polygons: Vec<Vec<Point>>) -> Result<Vec<ShapeId>, ShapeError> {
        let shapes = polygons.into_iter().map(Shape::new).collect::<Result<Vec<_>, _>>()?;
        let ids = shapes.iter().map(Shape::id).collect();
        self.shapes.load(shapes);
        self.ui = UiState::default();
        Ok(ids)
    }

    /// Mutable access to the viewport, e.g. to resize it.
    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    // --- Queries ---

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.input.mode()
    }

    #[must_use]
    pub fn input_state(&self) -> InputState {
        self.input
    }

    /// The shape being dragged or transformed, only in shape manipulation.
    #[must_use]
    pub fn manipulated_shape(&self) -> Option<ShapeId> {
        match self.input {
            InputState::ShapeManipulation { id } => Some(id),
            _ => None,
        }
    }

    #[must_use]
    pub fn cursors(&self) -> &CursorContainer {
        &self.cursors
    }

    #[must_use]
    pub fn shapes(&self) -> &ShapeStore {
        &self.shapes
    }

    #[must_use]
    pub fn selection(&self) -> &[ShapeId] {
        &self.ui.selected_ids
    }

    #[must_use]
    pub fn lasso_points(&self) -> &[Point] {
        &self.ui.lasso_points
    }

    #[must_use]
    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    // --- Input ---

    /// Run one contact event through the gesture state machine.
    ///
    /// Returns the effects it produced, ending in [`Action::RenderNeeded`].
    /// A lift for a contact that is not tracked is ignored and yields nothing.
    pub fn process_event(&mut self, event: &ContactEvent) -> Vec<Action> {
        tracing::trace!(id = event.id, phase = ?event.phase, x = event.position.x, y = event.position.y, "contact event");
        let Some(t) = self.track(event) else {
            tracing::debug!(id = event.id, "ignoring lift of an untracked contact");
            return Vec::new();
        };

        let mut actions = Vec::new();
        match self.input {
            InputState::Neutral => self.on_neutral(&t, &mut actions),
            InputState::CameraManipulation => self.on_camera(&t, &mut actions),
            InputState::ShapeManipulation { id } => self.on_shape(id, &t, &mut actions),
            InputState::PolygonManipulation => self.on_polygon(&t, &mut actions),
            InputState::Lasso => self.on_lasso(&t, &mut actions),
            InputState::Create => self.on_create(&t, &mut actions),
            InputState::FrameToShape => self.on_frame_to_shape(&t, &mut actions),
            InputState::FrameToScene => self.on_frame_to_scene(&t, &mut actions),
            InputState::Erase => self.on_erase(&t, &mut actions),
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Resolve the event's cursor, creating it for a new contact, and resync
    /// every tracked contact reported by a move.
    fn track(&mut self, event: &ContactEvent) -> Option<Tracked> {
        let Some(index) = self.cursors.index_of(event.id) else {
            if event.phase == Phase::Up {
                return None;
            }
            let index = self.cursors.update(event.id, event.position);
            return Some(Tracked { index, phase: Phase::Down, pixels: event.position, moved: Vec::new() });
        };

        let mut moved = Vec::new();
        if self.cursors.update_existing(event.id, event.position) == Some(true) {
            moved.push(index);
        }
        if event.phase == Phase::Move {
            for contact in &event.contacts {
                let Some(other) = self.cursors.index_of(contact.id) else {
                    continue;
                };
                if self.cursors.update_existing(contact.id, contact.position) == Some(true) && !moved.contains(&other) {
                    moved.push(other);
                }
            }
        }
        Some(Tracked { index, phase: event.phase, pixels: event.position, moved })
    }

    // --- Per-mode handlers ---

    fn on_neutral(&mut self, t: &Tracked, actions: &mut Vec<Action>) {
        match t.phase {
            Phase::Down if self.cursors.len() == 1 => {
                let world = self.viewport.pixels_to_world(t.pixels);
                let (next, role) = match hit::hit_test(t.pixels, world, &self.config.toolbar, &self.shapes, &self.ui) {
                    Hit::Button(kind) => (kind.input_state(), CursorRole::Button),
                    Hit::Shape(id) => (InputState::ShapeManipulation { id }, CursorRole::Dragging),
                    Hit::Selection => (InputState::PolygonManipulation, CursorRole::Dragging),
                    Hit::Canvas => (InputState::CameraManipulation, CursorRole::Dragging),
                };
                self.set_role(t.index, role);
                self.transition(next, actions);
            }
            Phase::Up => self.evict(t.index),
            Phase::Down | Phase::Move => {}
        }
    }

    fn on_camera(&mut self, t: &Tracked, actions: &mut Vec<Action>) {
        match t.phase {
            Phase::Move => match self.cursors.len() {
                1 if t.moved(0) => {
                    if let Some((from, to)) = self.step(t, 0) {
                        self.viewport.pan_by_pixel_displacement(from, to);
                        actions.push(Action::CameraChanged);
                    }
                }
                2 if t.moved(0) || t.moved(1) => {
                    if let (Some((from1, to1)), Some((from2, to2))) = (self.step(t, 0), self.step(t, 1)) {
                        self.viewport.pan_and_zoom_by_two_pixel_displacements(from1, from2, to1, to2);
                        actions.push(Action::CameraChanged);
                    }
                }
                _ => {}
            },
            Phase::Up => self.release(t.index, actions),
            Phase::Down => {}
        }
    }

    fn on_shape(&mut self, id: ShapeId, t: &Tracked, actions: &mut Vec<Action>) {
        match t.phase {
            Phase::Move => match self.cursors.len() {
                1 if t.moved(0) => {
                    let Some((from, to)) = self.world_step(t, 0) else {
                        return;
                    };
                    if let Some(shape) = self.shapes.get_mut_by_id(&id) {
                        shape.translate(from, to);
                        actions.push(Action::ShapeUpdated { id });
                    }
                }
                2 if t.moved(0) || t.moved(1) => {
                    let (Some((from1, to1)), Some((from2, to2))) = (self.world_step(t, 0), self.world_step(t, 1)) else {
                        return;
                    };
                    if let Some(shape) = self.shapes.get_mut_by_id(&id) {
                        shape.transform_two_point(from1, from2, to1, to2);
                        actions.push(Action::ShapeUpdated { id });
                    }
                }
                _ => {}
            },
            Phase::Up => self.release(t.index, actions),
            Phase::Down => {}
        }
    }

    fn on_polygon(&mut self, t: &Tracked, actions: &mut Vec<Action>) {
        match t.phase {
            Phase::Move if self.cursors.len() == 1 && t.moved(0) => {
                let Some((from, to)) = self.world_step(t, 0) else {
                    return;
                };
                for id in &self.ui.selected_ids {
                    if let Some(shape) = self.shapes.get_mut_by_id(id) {
                        shape.translate(from, to);
                        actions.push(Action::ShapeUpdated { id: *id });
                    }
                }
                // The grab region travels with the selection.
                geometry::translate_points(&mut self.ui.lasso_points, from, to);
            }
            Phase::Up => self.release(t.index, actions),
            Phase::Down | Phase::Move => {}
        }
    }

    fn on_lasso(&mut self, t: &Tracked, actions: &mut Vec<Action>) {
        match t.phase {
            Phase::Down => {
                let lasso_in_progress = self
                    .cursors
                    .iter()
                    .enumerate()
                    .any(|(i, c)| i != t.index && c.role() == CursorRole::Dragging);
                let role = if lasso_in_progress { CursorRole::Ignore } else { CursorRole::Dragging };
                self.set_role(t.index, role);
            }
            Phase::Up => {
                if self.cursors.get(t.index).map(|c| c.role()) == Some(CursorRole::Dragging) {
                    self.complete_lasso(t.index, actions);
                }
                self.release(t.index, actions);
            }
            Phase::Move => {}
        }
    }

    fn on_create(&mut self, t: &Tracked, actions: &mut Vec<Action>) {
        match t.phase {
            Phase::Down => {
                if self.config.toolbar.create.contains(t.pixels) && self.cursors.len() <= 2 {
                    tracing::debug!("create cancelled from the toolbar");
                    self.cursors.clear();
                    self.transition(InputState::Neutral, actions);
                    return;
                }
                self.set_role(t.index, CursorRole::Create);
            }
            Phase::Up => {
                // Lifted fingers stay tracked as placed vertices until enough are down.
                if self.cursors.len() >= self.config.min_create_contacts {
                    self.commit_polygon(actions);
                    self.cursors.clear();
                }
                if self.cursors.is_empty() {
                    self.transition(InputState::Neutral, actions);
                }
            }
            Phase::Move => {}
        }
    }

    fn on_frame_to_shape(&mut self, t: &Tracked, actions: &mut Vec<Action>) {
        match t.phase {
            Phase::Down => {
                if self.config.toolbar.frame_to_shape.contains(t.pixels) {
                    self.transition(InputState::Neutral, actions);
                    return;
                }
                let world = self.viewport.pixels_to_world(t.pixels);
                let target = self
                    .shapes
                    .shape_at(world)
                    .and_then(|id| self.shapes.get_by_id(&id))
                    .map(Shape::bounding_rect);
                if let Some(rect) = target {
                    self.frame(rect, actions);
                    self.transition(InputState::Neutral, actions);
                }
            }
            Phase::Up => self.evict(t.index),
            Phase::Move => {}
        }
    }

    fn on_frame_to_scene(&mut self, t: &Tracked, actions: &mut Vec<Action>) {
        let rect = self.shapes.bounding_rect();
        if !rect.is_empty() {
            self.frame(rect, actions);
        }
        if t.phase == Phase::Up {
            self.evict(t.index);
        }
        self.transition(InputState::Neutral, actions);
    }

    fn on_erase(&mut self, t: &Tracked, actions: &mut Vec<Action>) {
        match t.phase {
            Phase::Down => {
                if self.config.toolbar.erase.contains(t.pixels) {
                    self.transition(InputState::Neutral, actions);
                    return;
                }
                let world = self.viewport.pixels_to_world(t.pixels);
                let Some(id) = self.shapes.shape_at(world) else {
                    return;
                };
                if self.ui.deselect(&id) {
                    actions.push(Action::SelectionChanged { ids: self.ui.selected_ids.clone() });
                }
                if self.shapes.remove_by_id(&id).is_some() {
                    tracing::info!(%id, remaining = self.shapes.len(), "shape erased");
                    actions.push(Action::ShapeDeleted { id });
                }
                self.transition(InputState::Neutral, actions);
            }
            Phase::Up => self.evict(t.index),
            Phase::Move => {}
        }
    }

    // --- Helpers ---

    fn complete_lasso(&mut self, index: usize, actions: &mut Vec<Action>) {
        let Some(cursor) = self.cursors.get(index) else {
            return;
        };
        let lasso: Vec<Point> = cursor
            .positions()
            .iter()
            .map(|p| self.viewport.pixels_to_world(*p))
            .collect();
        let inside: Vec<ShapeId> = self
            .shapes
            .iter()
            .filter(|s| s.is_inside_lasso(&lasso))
            .map(Shape::id)
            .collect();

        self.ui.lasso_points = lasso;
        self.ui.select_only(inside);
        tracing::info!(
            lasso_points = self.ui.lasso_points.len(),
            selected = self.ui.selected_ids.len(),
            "lasso selection completed"
        );
        actions.push(Action::SelectionChanged { ids: self.ui.selected_ids.clone() });
    }

    fn commit_polygon(&mut self, actions: &mut Vec<Action>) {
        let world: Vec<Point> = self
            .cursors
            .positions_with_role(CursorRole::Create)
            .into_iter()
            .map(|p| self.viewport.pixels_to_world(p))
            .collect();
        let hull = geometry::convex_hull(&world);
        if hull.len() < 3 {
            tracing::info!(vertices = hull.len(), contacts = world.len(), "degenerate polygon discarded");
            return;
        }
        match self.shapes.add(hull) {
            Ok(id) => {
                tracing::info!(%id, contacts = world.len(), "shape created");
                actions.push(Action::ShapeCreated { id });
            }
            Err(e) => tracing::warn!(error = %e, "polygon rejected"),
        }
    }

    fn frame(&mut self, rect: BoundingRect, actions: &mut Vec<Action>) {
        let animated = self.config.animate_framing;
        self.viewport.frame(&rect, animated);
        actions.push(Action::CameraFramed { rect, animated });
    }

    /// Previous and current pixel positions of the cursor at `index` for this
    /// event; a cursor that did not move this event has no displacement.
    fn step(&self, t: &Tracked, index: usize) -> Option<(Point, Point)> {
        let cursor = self.cursors.get(index)?;
        let to = cursor.current_position();
        let from = if t.moved(index) { cursor.previous_position() } else { to };
        Some((from, to))
    }

    fn world_step(&self, t: &Tracked, index: usize) -> Option<(Point, Point)> {
        let (from, to) = self.step(t, index)?;
        Some((self.viewport.pixels_to_world(from), self.viewport.pixels_to_world(to)))
    }

    fn set_role(&mut self, index: usize, role: CursorRole) {
        if let Some(cursor) = self.cursors.get_mut(index) {
            cursor.set_role(role);
        }
    }

    fn evict(&mut self, index: usize) {
        self.cursors.remove(index);
    }

    /// Evict the lifted cursor and fall back to neutral once none remain.
    fn release(&mut self, index: usize, actions: &mut Vec<Action>) {
        self.evict(index);
        if self.cursors.is_empty() {
            self.transition(InputState::Neutral, actions);
        }
    }

    fn transition(&mut self, next: InputState, actions: &mut Vec<Action>) {
        let from = self.input.mode();
        let to = next.mode();
        self.input = next;
        if from != to {
            tracing::debug!(?from, ?to, "mode changed");
            actions.push(Action::ModeChanged { from, to });
        }
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore<Camera>,
    dpr: f64,
}

impl Engine {
    /// Create an engine bound to `canvas`, seeded with the starter scene.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, config: Config) -> Self {
        let mut core = EngineCore::with_viewport(Camera::default(), config);
        if let Err(e) = core.load_shapes(doc::demo_shapes()) {
            tracing::warn!(error = %e, "starter scene rejected");
        }
        Self { canvas, core, dpr: 1.0 }
    }

    // --- Delegated data inputs ---

    /// # Errors
    ///
    /// Returns [`ShapeError::Empty`] for an empty point list.
    pub fn add_shape(&mut self, points: Vec<Point>) -> Result<ShapeId, ShapeError> {
        self.core.add_shape(points)
    }

    pub fn remove_shape(&mut self, id: &ShapeId) -> bool {
        self.core.remove_shape(id)
    }

    /// # Errors
    ///
    /// Returns [`ShapeError::Empty`] if any polygon is empty.
    pub fn load_shapes(&mut self, polygons: Vec<Vec<Point>>) -> Result<Vec<ShapeId>, ShapeError> {
        self.core.load_shapes(polygons)
    }

    // --- Viewport ---

    /// Update viewport dimensions (CSS pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.viewport_mut().set_viewport(width_css, height_css);
        self.dpr = if dpr > 0.0 { dpr } else { 1.0 };
    }

    // --- Input events ---

    pub fn process_event(&mut self, event: &ContactEvent) -> Vec<Action> {
        self.core.process_event(event)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let camera = self.core.viewport();
        let commands = render::display_list(&self.core);
        render::draw(&ctx, camera, &commands, camera.viewport_width, camera.viewport_height, self.dpr)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.core.mode()
    }

    #[must_use]
    pub fn selection(&self) -> &[ShapeId] {
        self.core.selection()
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        self.core.viewport()
    }
}
