//! Local slash-command parsing.
//!
//! Input starting with `/` is handled by the client itself. Anything else is
//! a game command for the server.

/// A parsed line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/connect`: reconnect to the current server.
    Connect,
    /// `/server [url]`: show or change the server URL.
    Server {
        /// New URL. `None` shows the current one.
        url: Option<String>,
    },
    /// `/dark`: toggle dark mode.
    ToggleDarkMode,
    /// `/clear`: clear the output.
    Clear,
    /// `/map`: request the map and show the map panel.
    Map,
    /// `/inv`: toggle the inventory panel.
    Inventory,
    /// `/help`: toggle the help panel.
    Help,
    /// `/room <id>`: select a map room.
    SelectRoom {
        /// Room to select.
        room_id: String,
    },
    /// `/use`: use the selected item.
    UseItem,
    /// `/drop`: drop the selected item.
    DropItem,
    /// `/inspect`: request details of the selected item.
    Inspect,
    /// `/quit` or `/q`.
    Quit,
    /// Free text for the server.
    Game {
        /// Command line, trimmed.
        text: String,
    },
    /// Unrecognized slash command.
    Unknown {
        /// The input as typed.
        input: String,
    },
    /// Known command with bad arguments.
    InvalidArgs {
        /// Command name without the slash.
        command: &'static str,
        /// What was wrong.
        error: &'static str,
    },
}

/// Parse one trimmed, non-empty input line.
pub fn parse(input: &str) -> Command {
    let Some(rest) = input.strip_prefix('/') else {
        return Command::Game { text: input.to_owned() };
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or("");
    let arg = parts.next();

    match name {
        "connect" => Command::Connect,
        "server" => Command::Server { url: arg.map(str::to_owned) },
        "dark" => Command::ToggleDarkMode,
        "clear" => Command::Clear,
        "map" => Command::Map,
        "inv" | "inventory" => Command::Inventory,
        "help" => Command::Help,
        "room" => match arg {
            Some(id) => Command::SelectRoom { room_id: id.to_owned() },
            None => Command::InvalidArgs { command: "room", error: "usage: /room <id>" },
        },
        "use" => Command::UseItem,
        "drop" => Command::DropItem,
        "inspect" => Command::Inspect,
        "quit" | "q" => Command::Quit,
        _ => Command::Unknown { input: input.to_owned() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_game_command() {
        assert_eq!(parse("get wrench"), Command::Game { text: "get wrench".into() });
    }

    #[test]
    fn slash_commands() {
        assert_eq!(parse("/server ws://x:1/ws"), Command::Server { url: Some("ws://x:1/ws".into()) });
        assert_eq!(parse("/server"), Command::Server { url: None });
        assert_eq!(parse("/room r1"), Command::SelectRoom { room_id: "r1".into() });
        assert!(matches!(parse("/room"), Command::InvalidArgs { command: "room", .. }));
        assert_eq!(parse("/q"), Command::Quit);
        assert_eq!(parse("/dance"), Command::Unknown { input: "/dance".into() });
    }
}
