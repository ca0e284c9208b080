//! Data models for shared, persisted settings

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Storage keys shared by every surface
pub mod keys {
    pub const MODE: &str = "mode";
    pub const VIEW_MODE: &str = "viewMode";
    pub const BADGE_SIZE: &str = "badgeSize";

    pub const ALL: [&str; 3] = [MODE, VIEW_MODE, BADGE_SIZE];
}

/// Analysis mode: whole-page text or user text selections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Page,
    Select,
}

impl Default for Mode {
    fn default() -> Self {
        Self::Page
    }
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Select => "select",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "page" => Some(Self::Page),
            "select" => Some(Self::Select),
            _ => None,
        }
    }
}

/// Which presentation surface is live; exactly one per page context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Popup,
    Floating,
    Sidebar,
}

impl Default for ViewMode {
    fn default() -> Self {
        Self::Popup
    }
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Popup => "popup",
            Self::Floating => "floating",
            Self::Sidebar => "sidebar",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "popup" => Some(Self::Popup),
            "floating" => Some(Self::Floating),
            "sidebar" => Some(Self::Sidebar),
            _ => None,
        }
    }
}

/// The persisted configuration shared by all surfaces.
///
/// The store itself does not validate values; defaults are applied by the
/// consumer when a key is absent or malformed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub mode: Mode,
    pub view_mode: ViewMode,
    /// Floating badge edge length in pixels; the UI slider constrains the
    /// range, the store does not
    pub badge_size: u32,
}

pub const DEFAULT_BADGE_SIZE: u32 = 250;

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            view_mode: ViewMode::default(),
            badge_size: DEFAULT_BADGE_SIZE,
        }
    }
}

impl Settings {
    /// Build settings from raw store values, falling back to defaults for
    /// absent or malformed keys
    pub fn from_map(values: &HashMap<String, Value>) -> Self {
        let mode = values
            .get(keys::MODE)
            .and_then(Value::as_str)
            .and_then(Mode::parse)
            .unwrap_or_default();

        let view_mode = values
            .get(keys::VIEW_MODE)
            .and_then(Value::as_str)
            .and_then(ViewMode::parse)
            .unwrap_or_default();

        let badge_size = values
            .get(keys::BADGE_SIZE)
            .and_then(Value::as_u64)
            .map(|v| v as u32)
            .unwrap_or(DEFAULT_BADGE_SIZE);

        Self {
            mode,
            view_mode,
            badge_size,
        }
    }

    /// Raw store representation of these settings
    pub fn to_map(&self) -> HashMap<String, Value> {
        HashMap::from([
            (keys::MODE.to_string(), Value::from(self.mode.as_str())),
            (keys::VIEW_MODE.to_string(), Value::from(self.view_mode.as_str())),
            (keys::BADGE_SIZE.to_string(), Value::from(self.badge_size)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_round_trip() {
        assert_eq!(Mode::parse("page"), Some(Mode::Page));
        assert_eq!(Mode::parse("select"), Some(Mode::Select));
        assert_eq!(Mode::parse("bogus"), None);
        assert_eq!(Mode::Select.as_str(), "select");
    }

    #[test]
    fn test_view_mode_round_trip() {
        for vm in [ViewMode::Popup, ViewMode::Floating, ViewMode::Sidebar] {
            assert_eq!(ViewMode::parse(vm.as_str()), Some(vm));
        }
        assert_eq!(ViewMode::parse(""), None);
    }

    #[test]
    fn test_defaults_for_absent_keys() {
        let settings = Settings::from_map(&HashMap::new());
        assert_eq!(settings.mode, Mode::Page);
        assert_eq!(settings.view_mode, ViewMode::Popup);
        assert_eq!(settings.badge_size, 250);
    }

    #[test]
    fn test_defaults_for_malformed_values() {
        let values = HashMap::from([
            (keys::MODE.to_string(), Value::from(42)),
            (keys::BADGE_SIZE.to_string(), Value::from("wide")),
        ]);

        let settings = Settings::from_map(&values);
        assert_eq!(settings.mode, Mode::Page);
        assert_eq!(settings.badge_size, 250);
    }

    #[test]
    fn test_map_round_trip() {
        let settings = Settings {
            mode: Mode::Select,
            view_mode: ViewMode::Floating,
            badge_size: 300,
        };

        assert_eq!(Settings::from_map(&settings.to_map()), settings);
    }
}
