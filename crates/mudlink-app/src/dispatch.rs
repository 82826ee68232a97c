//! Message Dispatcher.
//!
//! Routes each decoded server frame to the output buffer or to one of the
//! panel caches.

use mudlink_proto::{Inbound, ServerMessage, payloads::GameObject};

use crate::{App, LineKind};

impl App {
    /// Decode one raw frame and apply it.
    pub(crate) fn dispatch_frame(&mut self, raw: &str) {
        match Inbound::decode(raw) {
            Inbound::Text(text) => {
                tracing::debug!(len = text.len(), "plain text frame");
                self.output.push(text, LineKind::Plain);
            },
            Inbound::Message(message) => self.dispatch(message),
        }
    }

    fn dispatch(&mut self, message: ServerMessage) {
        match message {
            ServerMessage::Error { message } => self.append(message, LineKind::Error),
            ServerMessage::System { message } => self.append(message, LineKind::System),
            ServerMessage::Response { message } => self.append(message, LineKind::Plain),
            ServerMessage::Message { content } => self.append(content, LineKind::Plain),
            ServerMessage::Broadcast { message } => self.append(message, LineKind::Broadcast),
            ServerMessage::Location { message } => self.append(message, LineKind::Location),
            ServerMessage::Chat { message } => self.append(message, LineKind::Chat),
            ServerMessage::Map { rooms, doors, hazards, power } => {
                tracing::debug!(rooms = rooms.len(), "map snapshot");
                self.map.replace(
                    rooms,
                    doors.unwrap_or_default(),
                    hazards.unwrap_or_default(),
                    power.unwrap_or_default(),
                );
            },
            ServerMessage::Inventory { inventory } => self.inventory.replace(inventory),
            ServerMessage::ObjectData { object: None } => {
                self.output.push("Object not found.", LineKind::Error);
            },
            ServerMessage::ObjectData { object: Some(object) } => self.show_object(&object),
            ServerMessage::DoorStatus { door_id, locked } => self.map.set_door(door_id, locked),
            ServerMessage::AtmosWarning { room_id, hazards } => {
                self.map.set_hazards(room_id, hazards.unwrap_or_default());
            },
            ServerMessage::PowerStatus { grid_id, is_powered } => {
                self.map.set_power(grid_id, is_powered);
            },
            ServerMessage::Unknown { kind, message } => {
                tracing::debug!(kind = ?kind, "unknown message type");
                let text = message.unwrap_or_else(|| {
                    format!("Unknown message type: {}", kind.as_deref().unwrap_or("none"))
                });
                self.output.push(text, LineKind::Plain);
            },
        }
    }

    /// Append a text payload. Missing or empty text shows nothing.
    fn append(&mut self, text: Option<String>, kind: LineKind) {
        if let Some(text) = text.filter(|t| !t.is_empty()) {
            self.output.push(text, kind);
        }
    }

    fn show_object(&mut self, object: &GameObject) {
        self.output.push(format!("{}: {}", object.name, object.description), LineKind::System);
        for (name, component) in &object.components {
            self.output.push(format!("- {name}: {component}"), LineKind::System);
        }
        self.inventory.apply_object(object);
    }
}
