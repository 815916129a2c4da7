//! Multi-contact tracking.
//!
//! Every finger on the surface is a [`Cursor`]: the id the platform gave it,
//! the full pixel-space path it has traced, and a [`CursorRole`] the gesture
//! engine assigns. Cursors live in a [`CursorContainer`] in the order they
//! touched down, which is also the order two-finger gestures read them in.
//!
//! Cursors are never dropped on their own. The engine evicts them, since when
//! a lifted finger stops counting depends on the active mode.

#[cfg(test)]
#[path = "cursor_test.rs"]
mod cursor_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;

/// Contact identifier assigned by the input source.
///
/// Not guaranteed to be contiguous, ordered, or reused predictably.
pub type ContactId = i64;

/// What a contact is currently being used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorRole {
    /// Drags something: the camera, a shape, the selection, or a lasso.
    Dragging,
    /// Pressed a toolbar button.
    Button,
    /// Present but not driving anything.
    #[default]
    Ignore,
    /// Marks a vertex of a polygon being created.
    Create,
}

/// One active contact and its position history in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    id: ContactId,
    positions: Vec<Point>,
    role: CursorRole,
}

impl Cursor {
    #[must_use]
    pub fn new(id: ContactId, position: Point) -> Self {
        Self { id, positions: vec![position], role: CursorRole::default() }
    }

    #[must_use]
    pub fn id(&self) -> ContactId {
        self.id
    }

    /// Every position reported for this contact, oldest first. Never empty.
    #[must_use]
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    #[must_use]
    pub fn first_position(&self) -> Point {
        self.positions[0]
    }

    #[must_use]
    pub fn current_position(&self) -> Point {
        self.positions[self.positions.len() - 1]
    }

    /// The position before the current one, or the first position if the
    /// contact has not moved yet.
    #[must_use]
    pub fn previous_position(&self) -> Point {
        let n = self.positions.len();
        self.positions[n.saturating_sub(2)]
    }

    #[must_use]
    pub fn role(&self) -> CursorRole {
        self.role
    }

    pub fn set_role(&mut self, role: CursorRole) {
        self.role = role;
    }

    /// Append `p` unless it equals the current position. Returns whether it moved.
    fn push_position(&mut self, p: Point) -> bool {
        if self.current_position() == p {
            return false;
        }
        self.positions.push(p);
        true
    }
}

/// Insertion-ordered set of active cursors.
///
/// Lookups by id are linear; the container holds one entry per finger.
#[derive(Debug, Clone, Default)]
pub struct CursorContainer {
    cursors: Vec<Cursor>,
}

impl CursorContainer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Cursor> {
        self.cursors.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Cursor> {
        self.cursors.get_mut(index)
    }

    #[must_use]
    pub fn index_of(&self, id: ContactId) -> Option<usize> {
        self.cursors.iter().position(|c| c.id == id)
    }

    #[must_use]
    pub fn by_id(&self, id: ContactId) -> Option<&Cursor> {
        self.cursors.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn count_with_role(&self, role: CursorRole) -> usize {
        self.cursors.iter().filter(|c| c.role == role).count()
    }

    /// The `n`th cursor (zero-based) holding `role`, skipping cursors with other roles.
    #[must_use]
    pub fn nth_with_role(&self, role: CursorRole, n: usize) -> Option<&Cursor> {
        self.cursors.iter().filter(|c| c.role == role).nth(n)
    }

    /// Current positions of every cursor holding `role`, in container order.
    #[must_use]
    pub fn positions_with_role(&self, role: CursorRole) -> Vec<Point> {
        self.cursors
            .iter()
            .filter(|c| c.role == role)
            .map(Cursor::current_position)
            .collect()
    }

    /// Upsert: create a cursor for an unseen `id`, otherwise append `p` to its
    /// history if it moved. Returns the cursor's index.
    pub fn update(&mut self, id: ContactId, p: Point) -> usize {
        if let Some(index) = self.index_of(id) {
            self.cursors[index].push_position(p);
            return index;
        }
        self.cursors.push(Cursor::new(id, p));
        self.cursors.len() - 1
    }

    /// Update a tracked cursor without ever creating one.
    ///
    /// Returns `None` for an untracked id, otherwise whether a new position
    /// was appended.
    pub fn update_existing(&mut self, id: ContactId, p: Point) -> Option<bool> {
        let index = self.index_of(id)?;
        Some(self.cursors[index].push_position(p))
    }

    /// Evict the cursor at `index`. Out-of-range indices are a no-op.
    pub fn remove(&mut self, index: usize) -> Option<Cursor> {
        (index < self.cursors.len()).then(|| self.cursors.remove(index))
    }

    pub fn clear(&mut self) {
        self.cursors.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cursor> {
        self.cursors.iter()
    }
}
