//! Shared numeric constants for the layout engine.
//!
//! All canvas coordinates are CSS pixels on a fixed-size stage. The usable
//! area (stage minus margins) maps to a fixed real-world extent, which fixes
//! [`SCALE`].

// ── Stage ───────────────────────────────────────────────────────

/// Width of the drawing stage in pixels.
pub const STAGE_WIDTH: f64 = 880.0;

/// Height of the drawing stage in pixels.
pub const STAGE_HEIGHT: f64 = 695.0;

/// Empty band kept around the room on every side of the stage.
pub const MARGIN: f64 = 70.0;

/// Real-world width of the usable stage area, in meters.
pub const STAGE_WIDTH_M: f64 = 12.0;

/// Real-world height of the usable stage area, in meters.
pub const STAGE_HEIGHT_M: f64 = 9.0;

/// Meters per pixel.
pub const SCALE: f64 = STAGE_WIDTH_M / (STAGE_WIDTH - 2.0 * MARGIN);

/// Multiplier applied when converting catalog container dimensions to pixels.
pub const CONTAINER_PIXEL_SCALE: f64 = 2.0;

// ── Room ────────────────────────────────────────────────────────

/// Smallest room width a corner drag may produce.
pub const MIN_WIDTH: f64 = 50.0;

/// Smallest room height a corner drag may produce.
pub const MIN_HEIGHT: f64 = 50.0;

/// Room size used when a snapshot carries no room at all.
pub const DEFAULT_ROOM_WIDTH: f64 = 400.0;

/// Room size used when a snapshot carries no room at all.
pub const DEFAULT_ROOM_HEIGHT: f64 = 300.0;

// ── Doors ───────────────────────────────────────────────────────

/// Width of a newly added door, in meters.
pub const DEFAULT_DOOR_WIDTH_M: f64 = 1.0;

/// Clearance added around a door's swing square, in meters.
pub const DOOR_ZONE_MARGIN_M: f64 = 0.1;

// ── Placement ───────────────────────────────────────────────────

/// Buffer added around other-object zones, in meters.
pub const OTHER_OBJECT_BUFFER_M: f64 = 0.1;

/// Step of the free-position scan when the centered default is blocked.
pub const PLACEMENT_GRID_STEP: f64 = 10.0;

/// Rotation increment for containers and other objects, in degrees.
pub const ROTATION_STEP_DEG: f64 = 90.0;
