//! Outbound frames.

use serde::Serialize;

use crate::ProtocolError;

/// A frame sent from the client to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ClientFrame {
    /// Free-text game command, sent as `{"command": ...}`.
    Command {
        /// Command line as typed.
        command: String,
    },
    /// Panel refresh request, sent as `{"type": ...}`.
    Request(Request),
}

/// On-demand panel refresh requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// Ask for a fresh map snapshot.
    MapRequest,
    /// Ask for a fresh inventory snapshot.
    InventoryRequest,
    /// Ask for the details of one object.
    ObjectRequest {
        /// Object to describe.
        object_id: String,
    },
}

impl ClientFrame {
    /// Wrap a typed command line.
    pub fn command(command: impl Into<String>) -> Self {
        Self::Command { command: command.into() }
    }

    /// Encode as a JSON text frame.
    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Text to put on the wire.
    ///
    /// Falls back to the raw command string when JSON encoding fails, which
    /// the server accepts as a plain-text command.
    pub fn to_wire(&self) -> String {
        match self.encode() {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "frame encode failed, sending plain text");
                self.plain_text()
            },
        }
    }

    fn plain_text(&self) -> String {
        match self {
            ClientFrame::Command { command } => command.clone(),
            ClientFrame::Request(Request::MapRequest) => "map".to_owned(),
            ClientFrame::Request(Request::InventoryRequest) => "inventory".to_owned(),
            ClientFrame::Request(Request::ObjectRequest { object_id }) => {
                format!("examine {object_id}")
            },
        }
    }
}

impl From<Request> for ClientFrame {
    fn from(request: Request) -> Self {
        Self::Request(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_envelope() {
        assert_eq!(ClientFrame::command("look").to_wire(), r#"{"command":"look"}"#);
    }

    #[test]
    fn request_envelopes() {
        assert_eq!(ClientFrame::from(Request::MapRequest).to_wire(), r#"{"type":"map_request"}"#);
        assert_eq!(
            ClientFrame::from(Request::InventoryRequest).to_wire(),
            r#"{"type":"inventory_request"}"#
        );
        assert_eq!(
            ClientFrame::from(Request::ObjectRequest { object_id: "w1".into() }).to_wire(),
            r#"{"type":"object_request","object_id":"w1"}"#
        );
    }

    #[test]
    fn plain_text_fallback_is_raw_command() {
        assert_eq!(ClientFrame::command("say hi").plain_text(), "say hi");
    }
}
