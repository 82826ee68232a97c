//! Submitted command history.

/// How many entries the history panel shows.
pub const HISTORY_DISPLAY_LIMIT: usize = 10;

/// Append-only list of submitted commands with arrow-key navigation.
///
/// A command equal to the immediately preceding entry is not recorded
/// again. Navigation is measured in steps back from the newest entry.
#[derive(Debug, Clone, Default)]
pub struct CommandHistory {
    entries: Vec<String>,
    /// Steps back from the newest entry. `None` when not navigating.
    position: Option<usize>,
}

impl CommandHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submitted command and stop navigating.
    ///
    /// Returns `false` when the command repeats the previous entry.
    pub fn push(&mut self, command: &str) -> bool {
        self.position = None;
        if self.entries.last().is_some_and(|last| last == command) {
            return false;
        }
        self.entries.push(command.to_owned());
        true
    }

    /// Step back to an older entry (Up arrow).
    ///
    /// Stops at the oldest entry. Returns the text to show, or `None` when
    /// the history is empty.
    pub fn older(&mut self) -> Option<&str> {
        let newest = self.entries.len().checked_sub(1)?;
        let steps = self.position.map_or(0, |p| (p + 1).min(newest));
        self.position = Some(steps);
        self.entries.get(newest - steps).map(String::as_str)
    }

    /// Step forward to a newer entry (Down arrow).
    ///
    /// Stepping past the newest entry returns an empty string and stops
    /// navigating. Returns `None` when not navigating.
    pub fn newer(&mut self) -> Option<&str> {
        match self.position? {
            0 => {
                self.position = None;
                Some("")
            },
            steps => {
                let steps = steps - 1;
                self.position = Some(steps);
                let newest = self.entries.len().checked_sub(1)?;
                self.entries.get(newest - steps).map(String::as_str)
            },
        }
    }

    /// Most recent entries, newest first.
    pub fn recent(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().rev().take(HISTORY_DISPLAY_LIMIT).map(String::as_str)
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was submitted yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_command_is_coalesced() {
        let mut history = CommandHistory::new();
        assert!(history.push("look"));
        assert!(!history.push("look"));
        assert_eq!(history.len(), 1);

        history.push("north");
        history.push("look");
        assert_eq!(history.recent().collect::<Vec<_>>(), vec!["look", "north", "look"]);
    }

    #[test]
    fn arrows_walk_and_clamp() {
        let mut history = CommandHistory::new();
        history.push("a");
        history.push("b");

        assert_eq!(history.older(), Some("b"));
        assert_eq!(history.older(), Some("a"));
        assert_eq!(history.older(), Some("a"));
        assert_eq!(history.newer(), Some("b"));
        assert_eq!(history.newer(), Some(""));
        assert_eq!(history.newer(), None);
    }

    #[test]
    fn display_is_bounded() {
        let mut history = CommandHistory::new();
        for i in 0..15 {
            history.push(&format!("cmd{i}"));
        }
        let recent: Vec<_> = history.recent().collect();
        assert_eq!(recent.len(), HISTORY_DISPLAY_LIMIT);
        assert_eq!(recent.first(), Some(&"cmd14"));
    }
}
