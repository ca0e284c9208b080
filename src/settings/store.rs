//! Shared key-value settings store

use super::models::{keys, Mode, Settings, ViewMode};
use crate::metrics::METRICS;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

/// Generic, asynchronous, eventually-consistent key-value store.
///
/// Concurrent writers are last-write-wins; the store holds no invariants
/// spanning multiple keys, so that is acceptable for scalar settings.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Fetch the requested keys; absent keys are simply missing from the map
    async fn get(&self, keys: &[&str]) -> HashMap<String, Value>;

    /// Write the given entries, fire-and-forget
    async fn set(&self, values: HashMap<String, Value>);
}

/// In-process store implementation
pub struct MemorySettingsStore {
    values: Mutex<HashMap<String, Value>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemorySettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self, keys: &[&str]) -> HashMap<String, Value> {
        let values = self.values.lock().unwrap();
        keys.iter()
            .filter_map(|&key| values.get(key).map(|v| (key.to_string(), v.clone())))
            .collect()
    }

    async fn set(&self, entries: HashMap<String, Value>) {
        let mut values = self.values.lock().unwrap();
        for (key, value) in entries {
            values.insert(key, value);
        }
    }
}

/// Load all settings, applying consumer-side defaults for absent keys
pub async fn load_settings(store: &dyn SettingsStore) -> Settings {
    let raw = store.get(&keys::ALL).await;
    let settings = Settings::from_map(&raw);
    debug!(
        "settings loaded: mode={} viewMode={} badgeSize={}",
        settings.mode.as_str(),
        settings.view_mode.as_str(),
        settings.badge_size
    );
    settings
}

/// Persist the analysis mode
pub async fn save_mode(store: &dyn SettingsStore, mode: Mode) {
    METRICS.settings_updates.inc();
    store
        .set(HashMap::from([(
            keys::MODE.to_string(),
            Value::from(mode.as_str()),
        )]))
        .await;
}

/// Persist the active view mode
pub async fn save_view_mode(store: &dyn SettingsStore, view_mode: ViewMode) {
    METRICS.settings_updates.inc();
    store
        .set(HashMap::from([(
            keys::VIEW_MODE.to_string(),
            Value::from(view_mode.as_str()),
        )]))
        .await;
}

/// Persist the floating badge size
pub async fn save_badge_size(store: &dyn SettingsStore, size: u32) {
    METRICS.settings_updates.inc();
    store
        .set(HashMap::from([(
            keys::BADGE_SIZE.to_string(),
            Value::from(size),
        )]))
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_settings_round_trip() {
        let store = MemorySettingsStore::new();

        save_mode(&store, Mode::Select).await;

        let raw = store.get(&[keys::MODE]).await;
        assert_eq!(raw.get(keys::MODE).and_then(Value::as_str), Some("select"));
    }

    #[tokio::test]
    async fn test_absent_keys_use_defaults() {
        let store = MemorySettingsStore::new();

        let settings = load_settings(&store).await;
        assert_eq!(settings.mode, Mode::Page);
        assert_eq!(settings.view_mode, ViewMode::Popup);
        assert_eq!(settings.badge_size, 250);
    }

    #[tokio::test]
    async fn test_partial_write_leaves_other_keys() {
        let store = MemorySettingsStore::new();

        save_badge_size(&store, 320).await;
        save_mode(&store, Mode::Select).await;

        let settings = load_settings(&store).await;
        assert_eq!(settings.badge_size, 320);
        assert_eq!(settings.mode, Mode::Select);
        assert_eq!(settings.view_mode, ViewMode::Popup);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = MemorySettingsStore::new();

        save_mode(&store, Mode::Select).await;
        save_mode(&store, Mode::Page).await;

        let settings = load_settings(&store).await;
        assert_eq!(settings.mode, Mode::Page);
    }
}
