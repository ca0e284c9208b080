//! SDG badge runtime: rate-limited classification coordination and
//! cross-surface state synchronization.
//!
//! Text is scored against the 17 UN Sustainable Development Goals by a
//! remote classifier. A background coordinator serializes outbound calls
//! behind a single-slot rate limiter and normalizes responses into a stable
//! shape; a per-page context caches the most recent result and keeps the
//! floating badge, popup, and sidebar surfaces consistent over an
//! asynchronous message fabric backed by a shared settings store.

pub mod background;
pub mod classifier;
pub mod config;
pub mod error;
pub mod messaging;
pub mod metrics;
pub mod page;
pub mod panels;
pub mod settings;

pub use background::Coordinator;
pub use classifier::{ClassificationResult, ClassifierClient, ClassifierConfig, ClassifyError};
pub use config::Config;
pub use error::{BadgeError, Result};
pub use messaging::{AnalysisData, ContextId, Fabric, Message, Reply};
pub use page::{PageContext, PageHandle};
pub use panels::{PopupPanel, SidebarPanel};
pub use settings::{MemorySettingsStore, Mode, Settings, SettingsStore, ViewMode};
