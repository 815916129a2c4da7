//! Multitouch gesture engine for a polygon drawing surface.
//!
//! Fingers on a touch surface create, select, transform and delete polygons.
//! The crate turns concurrent contact streams into those operations: it tracks
//! every contact, runs a gesture state machine over them, and reports the
//! resulting [`engine::Action`]s to the host. It compiles to WebAssembly for a
//! browser host, but everything except [`engine::Engine`], [`render::draw`]
//! and [`touch`] is plain Rust and testable natively.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`input`] | Contact events, toolbar buttons, modes and gesture state |
//! | [`cursor`] | Per-contact position history and roles |
//! | [`doc`] | Polygon shapes and the ordered shape store |
//! | [`geometry`] | Hull, containment, expansion and point-pair transforms |
//! | [`camera`] | Points, the viewport contract, and the pan/zoom camera |
//! | [`hit`] | Touch-down hit-testing and the selection halo |
//! | [`render`] | Display list and the `Canvas2D` painter |
//! | [`touch`] | DOM touch events to contact events |
//! | [`config`] | Toolbar layout and gesture tuning |
//! | [`consts`] | Shared numeric constants (zoom limits, tolerances, etc.) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod cursor;
pub mod doc;
pub mod engine;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod render;
pub mod touch;
