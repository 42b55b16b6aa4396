// src/config.rs
use gloo::console::{error, log};
use serde::Deserialize;
use web_sys::window;

const CONFIG_ELEMENT_ID: &str = "board-config";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Prefix for every API path; empty means same origin.
    pub api_base: String,
    pub message_hide_ms: u32,
    /// Drop the previous hide timer when a new message is shown.
    pub cancel_pending_hide: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            message_hide_ms: 5000,
            cancel_pending_hide: false,
        }
    }
}

pub fn parse_config(json: &str) -> Result<BoardConfig, serde_json::Error> {
    serde_json::from_str(json)
}

fn get_config_json_from_dom() -> Result<String, String> {
    let win = window().ok_or("no window")?;
    let doc = win.document().ok_or("no document")?;
    let el = doc
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .ok_or("missing <script id=\"board-config\" type=\"application/json\">")?;
    Ok(el.text_content().unwrap_or_default())
}

/// Read the embedded config block, falling back to defaults.
pub fn load_config() -> BoardConfig {
    let json = match get_config_json_from_dom() {
        Ok(s) => s,
        Err(e) => {
            log!(format!("Using default board config: {e}"));
            return BoardConfig::default();
        }
    };
    match parse_config(&json) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(format!("Invalid board config, using defaults: {e}"));
            BoardConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        assert_eq!(parse_config("{}").unwrap(), BoardConfig::default());
    }

    #[test]
    fn fields_override_defaults() {
        let cfg = parse_config(r#"{"api_base": "/api", "cancel_pending_hide": true}"#).unwrap();
        assert_eq!(cfg.api_base, "/api");
        assert_eq!(cfg.message_hide_ms, 5000);
        assert!(cfg.cancel_pending_hide);
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(parse_config("{api_base: }").is_err());
        assert!(parse_config(r#"{"message_hide_ms": -1}"#).is_err());
    }
}
