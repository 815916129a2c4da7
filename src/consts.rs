//! Shared numeric constants for the touchdraw crate.

// ── Geometry ────────────────────────────────────────────────────

/// Tolerance for on-edge and degenerate-segment tests, in world units.
pub const GEOMETRY_EPSILON: f64 = 1e-9;

/// Number of samples on the disc swept around each vertex when expanding a polygon.
pub const EXPAND_ARC_SEGMENTS: u32 = 16;

// ── Camera ──────────────────────────────────────────────────────

/// Lower bound for the camera zoom factor.
pub const MIN_ZOOM: f64 = 0.01;

/// Upper bound for the camera zoom factor.
pub const MAX_ZOOM: f64 = 100.0;

/// Screen-space margin kept around a framed rectangle, in pixels.
pub const FRAME_MARGIN_PX: f64 = 40.0;

// ── Gestures ────────────────────────────────────────────────────

/// Contacts that must be tracked before lifting a finger commits a new polygon.
pub const MIN_CREATE_CONTACTS: usize = 3;

/// The selection halo is offset by the selection's bounding diagonal divided by this.
pub const HALO_DIAGONAL_DIVISOR: f64 = 30.0;

// ── Overlay ─────────────────────────────────────────────────────

/// Pixel position of the contact-count label.
pub const CONTACT_LABEL_X_PX: f64 = 50.0;
pub const CONTACT_LABEL_Y_PX: f64 = 50.0;

/// Font height of the contact-count label, in pixels.
pub const CONTACT_LABEL_FONT_PX: f64 = 30.0;

/// Side length of the default square toolbar buttons, in pixels.
pub const BUTTON_SIZE_PX: f64 = 140.0;
