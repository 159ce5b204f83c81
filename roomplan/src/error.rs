#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::placed::EntityRef;

/// Errors that carry a stable machine-readable code for the host UI.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;
}

/// Errors surfaced by layout operations.
///
/// Blocked drags are not errors (they snap back); these cover the cases the
/// host has to tell the user about.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("no free position for a {width:.1}x{height:.1} px item in this room")]
    NoFreePlacement { width: f64, height: f64 },
    #[error("entity not found: {0:?}")]
    EntityNotFound(EntityRef),
    #[error("{0:?} would overlap a blocked zone or leave the room")]
    Blocked(EntityRef),
    #[error("{0:?} cannot be rotated")]
    NotRotatable(EntityRef),
    #[error("invalid snapshot JSON: {0}")]
    Snapshot(#[from] serde_json::Error),
    #[error("snapshot must be a JSON object, got {0}")]
    SnapshotShape(&'static str),
}

impl ErrorCode for PlanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoFreePlacement { .. } => "E_NO_FREE_PLACEMENT",
            Self::EntityNotFound(_) => "E_ENTITY_NOT_FOUND",
            Self::Blocked(_) => "E_BLOCKED",
            Self::NotRotatable(_) => "E_NOT_ROTATABLE",
            Self::Snapshot(_) | Self::SnapshotShape(_) => "E_SNAPSHOT",
        }
    }
}
