//! Settings persisted across restarts.

use serde::{Deserialize, Deserializer, Serialize};

use crate::Theme;

/// User preferences kept between sessions.
///
/// Serialized as `{"darkMode": bool, "serverUrl": string | null}`. Older
/// documents that stored the flag as the string `"true"` or `"false"` are
/// accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Dark palette enabled. Defaults to on.
    #[serde(default = "dark_mode_default", deserialize_with = "flag")]
    pub dark_mode: bool,
    /// Socket URL override. `None` uses the URL derived from the host.
    #[serde(default)]
    pub server_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self { dark_mode: dark_mode_default(), server_url: None }
    }
}

impl Settings {
    /// Palette selected by these settings.
    pub fn theme(&self) -> Theme {
        if self.dark_mode { Theme::Dark } else { Theme::Light }
    }
}

fn dark_mode_default() -> bool {
    true
}

/// Anything other than `false` / `"false"` enables the flag.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFlag {
        Bool(bool),
        Text(String),
    }

    Ok(match RawFlag::deserialize(deserializer)? {
        RawFlag::Bool(b) => b,
        RawFlag::Text(s) => s != "false",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_document_fields_use_defaults() {
        let settings: Settings = serde_json::from_str("{}").expect("settings");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.theme(), Theme::Dark);
    }

    #[test]
    fn string_flags_are_accepted() {
        let settings: Settings =
            serde_json::from_str(r#"{"darkMode": "false", "serverUrl": "ws://h:1/ws"}"#)
                .expect("settings");
        assert!(!settings.dark_mode);
        assert_eq!(settings.server_url.as_deref(), Some("ws://h:1/ws"));
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_string(&Settings { dark_mode: false, server_url: None })
            .expect("json");
        assert_eq!(json, r#"{"darkMode":false,"serverUrl":null}"#);
    }
}
