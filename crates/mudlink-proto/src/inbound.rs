//! Inbound frame decoding.
//!
//! Decoding is total: every raw frame becomes an [`Inbound`]. Frames that are
//! not JSON objects, or that carry a known `type` with a payload of the wrong shape,
//! degrade to [`Inbound::Text`] so the player still sees them. JSON frames
//! with an unrecognized `type` become [`ServerMessage::Unknown`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::payloads::{GameObject, Inventory, MapRoom, id_string};

/// A decoded server frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    /// JSON envelope with a `type` discriminator.
    Message(ServerMessage),
    /// Plain text, displayed verbatim.
    Text(String),
}

impl Inbound {
    /// Decode one raw frame.
    pub fn decode(raw: &str) -> Self {
        // Only objects are envelopes. Bare JSON scalars and arrays are text.
        let value: Value = match serde_json::from_str(raw) {
            Ok(value @ Value::Object(_)) => value,
            _ => return Self::Text(raw.to_owned()),
        };

        let kind = match value.get("type") {
            Some(Value::String(tag)) => Some(tag.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        };

        match kind.as_deref() {
            Some(tag) if ServerMessage::TAGS.contains(&tag) => {
                match serde_json::from_value::<ServerMessage>(value) {
                    Ok(message) => Self::Message(message),
                    Err(e) => {
                        tracing::warn!(%tag, error = %e, "malformed payload, showing raw frame");
                        Self::Text(raw.to_owned())
                    },
                }
            },
            _ => {
                let message = value
                    .get("message")
                    .and_then(Value::as_str)
                    .filter(|m| !m.is_empty())
                    .map(str::to_owned);
                Self::Message(ServerMessage::Unknown { kind, message })
            },
        }
    }
}

/// Server message, discriminated by the JSON `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Error text.
    Error {
        /// Text to display.
        #[serde(default)]
        message: Option<String>,
    },

    /// Client or server system notice.
    System {
        /// Text to display.
        #[serde(default)]
        message: Option<String>,
    },

    /// Direct response to the player's last command.
    Response {
        /// Text to display.
        #[serde(default)]
        message: Option<String>,
    },

    /// Generic message envelope used by simpler servers.
    Message {
        /// Text to display.
        #[serde(default)]
        content: Option<String>,
    },

    /// Announcement to every connected player.
    Broadcast {
        /// Text to display.
        #[serde(default)]
        message: Option<String>,
    },

    /// Room description after moving.
    Location {
        /// Text to display.
        #[serde(default)]
        message: Option<String>,
    },

    /// Speech from another player.
    Chat {
        /// Text to display.
        #[serde(default)]
        message: Option<String>,
    },

    /// Authoritative map snapshot. Replaces every map cache.
    Map {
        /// Room positions.
        rooms: Vec<MapRoom>,
        /// Door lock state keyed by room id.
        #[serde(default)]
        doors: Option<BTreeMap<String, bool>>,
        /// Active hazards keyed by room id.
        #[serde(default)]
        hazards: Option<BTreeMap<String, Vec<String>>>,
        /// Power state keyed by grid id.
        #[serde(default)]
        power: Option<BTreeMap<String, bool>>,
    },

    /// Authoritative inventory snapshot.
    Inventory {
        /// Inventory contents. `None` clears the panel.
        #[serde(default)]
        inventory: Option<Inventory>,
    },

    /// Reply to an object request. `None` when the object does not exist.
    ObjectData {
        /// Requested object.
        #[serde(default)]
        object: Option<GameObject>,
    },

    /// A door was locked or unlocked.
    DoorStatus {
        /// Room id of the door.
        #[serde(deserialize_with = "id_string")]
        door_id: String,
        /// New lock state.
        #[serde(default)]
        locked: bool,
    },

    /// Atmospheric hazards changed in a room.
    AtmosWarning {
        /// Affected room.
        #[serde(deserialize_with = "id_string")]
        room_id: String,
        /// Hazards now present. Empty or absent clears the warning.
        #[serde(default)]
        hazards: Option<Vec<String>>,
    },

    /// A power grid went up or down.
    PowerStatus {
        /// Affected grid.
        #[serde(deserialize_with = "id_string")]
        grid_id: String,
        /// New power state. Absent leaves the grid unknown.
        #[serde(default)]
        is_powered: Option<bool>,
    },

    /// JSON envelope with an unrecognized or missing `type`.
    #[serde(skip)]
    Unknown {
        /// The `type` value, if any.
        kind: Option<String>,
        /// The `message` field, if present and non-empty.
        message: Option<String>,
    },
}

impl ServerMessage {
    /// Every `type` tag with a dedicated variant.
    pub const TAGS: &'static [&'static str] = &[
        "error",
        "system",
        "response",
        "message",
        "broadcast",
        "location",
        "chat",
        "map",
        "inventory",
        "object_data",
        "door_status",
        "atmos_warning",
        "power_status",
    ];
}
