//! Wire envelopes for the MUD socket protocol.
//!
//! The server speaks UTF-8 JSON text frames over a WebSocket at `/ws`. Every
//! inbound frame carries a `type` discriminator; frames that are not JSON are
//! still valid and are shown to the player verbatim.
//!
//! # Components
//!
//! - [`Inbound`]: decoded server frame, either a [`ServerMessage`] or raw text
//! - [`ServerMessage`]: sum type over every known `type` tag plus a fallback
//! - [`ClientFrame`]: outbound command and panel-refresh requests
//! - [`payloads`]: structured map, inventory and object payloads

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod inbound;
mod outbound;
pub mod payloads;

pub use error::ProtocolError;
pub use inbound::{Inbound, ServerMessage};
pub use outbound::{ClientFrame, Request};
