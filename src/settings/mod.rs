//! Shared persisted configuration
//!
//! Settings (`mode`, `viewMode`, `badgeSize`) are owned by the store and
//! merely mirrored by each surface; every surface re-fetches on activation
//! rather than trusting push messages alone, so all surfaces converge within
//! one message round-trip of any change.

pub mod models;
pub mod store;

pub use models::{keys, Mode, Settings, ViewMode, DEFAULT_BADGE_SIZE};
pub use store::{
    load_settings, save_badge_size, save_mode, save_view_mode, MemorySettingsStore, SettingsStore,
};
