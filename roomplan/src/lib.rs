//! Room layout model and editing engine for waste container rooms.
//!
//! A room is a rectangle on a fixed pixel stage. Doors sit on its walls, and
//! containers and other objects sit inside it. This crate owns the geometry
//! and the layout rules: keeping every entity valid while the user resizes
//! the room or drags things around, finding free spots for new items, and
//! converting the pixel layout into the real-world save payload. Rendering
//! and persistence belong to the host; it feeds pointer positions in stage
//! pixels and acts on the returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Editor session: selection, gestures, emitted actions |
//! | [`layout`] | Layout store and its mutation rules |
//! | [`room`] | Room rectangle, corner resize and move clamping |
//! | [`door`] | Walls, door snapping, swing footprint and zone |
//! | [`placed`] | Containers, other objects and the placed-entity view |
//! | [`zones`] | Blocked-zone aggregation and free-position search |
//! | [`input`] | Selection and the drag gesture state machine |
//! | [`snapshot`] | Snapshot load/save and the meter-based save payload |
//! | [`geometry`] | Points, rectangles, overlap and unit conversion |
//! | [`consts`] | Stage size, scale and placement constants |
//! | [`error`] | [`PlanError`] and the [`ErrorCode`] trait |

pub mod consts;
pub mod door;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod placed;
pub mod room;
pub mod snapshot;
pub mod zones;

pub use engine::{Action, Engine};
pub use error::{ErrorCode, PlanError};
pub use layout::{Layout, Violation, ViolationKind};
