//! Persisted editor state in, real-world save payload out.
//!
//! Snapshots are pixel-space JSON blobs of arbitrary quality: any field may be
//! missing or mistyped. Loading never fails on a field; numbers default to 0,
//! `wall` to `bottom`, `swingDirection` to `inward`, and unparseable ids are
//! replaced with fresh ones. Only a blob that is not a JSON object is rejected.
//!
//! The save payload converts every pixel coordinate to meters with `SCALE`.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::door::{Door, SwingDirection, Wall};
use crate::error::PlanError;
use crate::geometry::pixels_to_meters;
use crate::layout::Layout;
use crate::placed::{ContainerDto, ContainerInRoom, EntityId, OtherObjectInRoom};
use crate::room::Room;

// =============================================================================
// LOAD
// =============================================================================

/// Parse a serialized snapshot into a layout.
///
/// # Errors
///
/// Returns `Snapshot` for invalid JSON and `SnapshotShape` if the top level is
/// not an object.
pub fn load(raw: &str) -> Result<Layout, PlanError> {
    let value: Value = serde_json::from_str(raw)?;
    from_value(&value)
}

/// Build a layout from an already-parsed snapshot.
///
/// # Errors
///
/// Returns `SnapshotShape` if `value` is not an object.
pub fn from_value(value: &Value) -> Result<Layout, PlanError> {
    if !value.is_object() {
        return Err(PlanError::SnapshotShape(json_type(value)));
    }
    let snap = Fields::new(value);

    let room = match value.get("room").filter(|v| v.is_object()) {
        Some(v) => read_room(&Fields::new(v)),
        None => {
            debug!("snapshot has no room; using default");
            Room::default()
        }
    };

    Ok(Layout {
        room,
        doors: snap.array("doors").iter().map(|v| read_door(&Fields::new(v))).collect(),
        containers: snap.array("containers").iter().map(|v| read_container(&Fields::new(v))).collect(),
        other_objects: snap.array("otherObjects").iter().map(|v| read_other_object(&Fields::new(v))).collect(),
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn read_room(f: &Fields<'_>) -> Room {
    let raw = Room {
        x: f.f64("x"),
        y: f.f64("y"),
        width: f.f64("width"),
        height: f.f64("height"),
        name: f.str("name").map(str::to_string),
    };
    let room = raw.normalized();
    if room != raw {
        debug!(?raw, ?room, "snapshot room adjusted to stage bounds");
    }
    room
}

fn read_door(f: &Fields<'_>) -> Door {
    Door {
        id: f.id("id"),
        width: f.f64("width"),
        x: f.f64("x"),
        y: f.f64("y"),
        rotation: f.f64("rotation"),
        wall: f.parse("wall").unwrap_or_default(),
        swing_direction: f.parse("swingDirection").unwrap_or_default(),
    }
}

fn read_container(f: &Fields<'_>) -> ContainerInRoom {
    let container = f.value.get("container").map_or_else(ContainerDto::default, |v| read_container_dto(&Fields::new(v)));
    let (dw, dh) = container.footprint_px();
    let (width, height) = if dw > 0.0 && dh > 0.0 { (dw, dh) } else { (f.f64("width"), f.f64("height")) };
    ContainerInRoom {
        id: f.id("id"),
        container,
        x: f.f64("x"),
        y: f.f64("y"),
        width,
        height,
        rotation: f.f64("rotation"),
        lock_i_lock: f.bool("lockILock"),
    }
}

fn read_container_dto(f: &Fields<'_>) -> ContainerDto {
    ContainerDto {
        id: f.value.get("id").and_then(Value::as_i64).unwrap_or(0),
        name: f.str("name").unwrap_or_default().to_string(),
        width: f.opt_f64("width"),
        depth: f.opt_f64("depth"),
        height: f.opt_f64("height"),
        size: f.opt_f64("size"),
    }
}

fn read_other_object(f: &Fields<'_>) -> OtherObjectInRoom {
    OtherObjectInRoom {
        id: f.id("id"),
        name: f.str("name").unwrap_or_default().to_string(),
        x: f.f64("x"),
        y: f.f64("y"),
        width: f.f64("width"),
        height: f.f64("height"),
        rotation: f.f64("rotation"),
    }
}

/// Typed, defaulting access to the fields of one snapshot object.
struct Fields<'a> {
    value: &'a Value,
}

impl<'a> Fields<'a> {
    fn new(value: &'a Value) -> Self {
        Self { value }
    }

    fn opt_f64(&self, key: &str) -> Option<f64> {
        self.value.get(key).and_then(Value::as_f64).filter(|n| n.is_finite())
    }

    fn f64(&self, key: &str) -> f64 {
        self.opt_f64(key).unwrap_or(0.0)
    }

    fn str(&self, key: &str) -> Option<&'a str> {
        self.value.get(key).and_then(Value::as_str)
    }

    fn bool(&self, key: &str) -> bool {
        self.value.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    fn id(&self, key: &str) -> EntityId {
        match self.str(key).map(EntityId::parse_str) {
            Some(Ok(id)) => id,
            Some(Err(e)) => {
                debug!(error = %e, "invalid snapshot id; assigning a new one");
                EntityId::new_v4()
            }
            None => EntityId::new_v4(),
        }
    }

    /// Deserialize a string enum field; `None` when missing or unknown.
    fn parse<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        let v = self.value.get(key)?;
        match serde_json::from_value(v.clone()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                debug!(key, error = %e, "unrecognized snapshot value; using default");
                None
            }
        }
    }

    fn array(&self, key: &str) -> &'a [Value] {
        self.value.get(key).and_then(Value::as_array).map(Vec::as_slice).unwrap_or_default()
    }
}

// =============================================================================
// SNAPSHOT OUT
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotRef<'a> {
    room: &'a Room,
    doors: &'a [Door],
    containers: &'a [ContainerInRoom],
    other_objects: &'a [OtherObjectInRoom],
}

/// Serialize a layout back into the pixel-space snapshot shape.
///
/// # Errors
///
/// Returns `Snapshot` if serialization fails.
pub fn to_json(layout: &Layout, pretty: bool) -> Result<String, PlanError> {
    let snap = SnapshotRef {
        room: &layout.room,
        doors: &layout.doors,
        containers: &layout.containers,
        other_objects: &layout.other_objects,
    };
    let out = if pretty { serde_json::to_string_pretty(&snap)? } else { serde_json::to_string(&snap)? };
    Ok(out)
}

// =============================================================================
// SAVE PAYLOAD
// =============================================================================

/// Request body for the persistence API, in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePayload {
    pub room: RoomPayload,
    pub doors: Vec<DoorPayload>,
    pub containers: Vec<ContainerPayload>,
    pub other_objects: Vec<OtherObjectPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub width: f64,
    pub length: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoorPayload {
    pub x: f64,
    pub y: f64,
    /// Already meters; not scaled.
    pub width: f64,
    pub wall: Wall,
    pub angle: f64,
    pub swing_direction: SwingDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPayload {
    /// Catalog id of the container.
    pub id: i64,
    pub x: f64,
    pub y: f64,
    pub angle: f64,
    pub lock_i_lock: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherObjectPayload {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub angle: f64,
}

/// Convert a layout to the real-world save payload.
#[must_use]
pub fn save_payload(layout: &Layout) -> SavePayload {
    let room = &layout.room;
    SavePayload {
        room: RoomPayload {
            name: room.name.clone(),
            width: pixels_to_meters(room.width),
            length: pixels_to_meters(room.height),
            x: pixels_to_meters(room.x),
            y: pixels_to_meters(room.y),
        },
        doors: layout
            .doors
            .iter()
            .map(|d| DoorPayload {
                x: pixels_to_meters(d.x),
                y: pixels_to_meters(d.y),
                width: d.width,
                wall: d.wall,
                angle: d.rotation,
                swing_direction: d.swing_direction,
            })
            .collect(),
        containers: layout
            .containers
            .iter()
            .map(|c| ContainerPayload {
                id: c.container.id,
                x: pixels_to_meters(c.x),
                y: pixels_to_meters(c.y),
                angle: c.rotation,
                lock_i_lock: c.lock_i_lock,
            })
            .collect(),
        other_objects: layout
            .other_objects
            .iter()
            .map(|o| OtherObjectPayload {
                name: o.name.clone(),
                x: pixels_to_meters(o.x),
                y: pixels_to_meters(o.y),
                width: pixels_to_meters(o.width),
                height: pixels_to_meters(o.height),
                angle: o.rotation,
            })
            .collect(),
    }
}
