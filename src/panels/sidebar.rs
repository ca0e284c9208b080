//! Sidebar panel surface

use crate::messaging::{AnalysisData, ContextId, Fabric, Message, Reply};
use crate::settings::{self, Mode, Settings, SettingsStore, ViewMode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Sidebar configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SidebarConfig {
    /// Poll cadence for the auto-refresh loop in seconds
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

fn default_poll_interval_secs() -> u64 {
    30
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl SidebarConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// The sidebar panel: same settings controls as the popup, plus a periodic
/// pull of the page context's analysis while open.
///
/// Like the popup this surface is pull-only; the 30-second poll is its way
/// of staying fresh without unsolicited pushes. The panel itself is opened
/// by a user gesture at the platform level, never programmatically.
pub struct SidebarPanel {
    fabric: Arc<Fabric>,
    store: Arc<dyn SettingsStore>,
    config: SidebarConfig,
    settings: Settings,
    analysis: Option<AnalysisData>,
}

impl SidebarPanel {
    pub fn new(fabric: Arc<Fabric>, store: Arc<dyn SettingsStore>, config: SidebarConfig) -> Self {
        Self {
            fabric,
            store,
            config,
            settings: Settings::default(),
            analysis: None,
        }
    }

    /// Re-fetch settings and pull the current analysis
    pub async fn open(&mut self) {
        self.settings = settings::load_settings(self.store.as_ref()).await;
        self.refresh().await;
    }

    /// Change the analysis mode: persist, then notify the page context
    pub async fn set_mode(&mut self, mode: Mode) {
        self.settings.mode = mode;
        settings::save_mode(self.store.as_ref(), mode).await;
        self.notify(Message::UpdateMode { mode });
    }

    /// Change the badge size: persist, then notify the page context
    pub async fn set_badge_size(&mut self, size: u32) {
        self.settings.badge_size = size;
        settings::save_badge_size(self.store.as_ref(), size).await;
        self.notify(Message::UpdateSize { size });
    }

    /// Change the active surface: persist, then notify the page context
    pub async fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.settings.view_mode = view_mode;
        settings::save_view_mode(self.store.as_ref(), view_mode).await;
        self.notify(Message::UpdateViewMode { view_mode });
    }

    /// Pull the page context's cached analysis
    pub async fn refresh(&mut self) {
        match self
            .fabric
            .request(ContextId::Sidebar, ContextId::Page, Message::GetAnalysisData)
            .await
        {
            Ok(Reply::AnalysisData { data }) => self.analysis = data,
            Ok(other) => warn!("unexpected reply to getAnalysisData: {:?}", other),
            Err(e) => debug!("analysis pull failed: {}", e),
        }
    }

    /// Open, then keep polling until the task is dropped
    pub async fn run(mut self) {
        self.open().await;

        let interval = self.config.poll_interval();
        loop {
            tokio::time::sleep(interval).await;
            self.refresh().await;
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn analysis(&self) -> Option<&AnalysisData> {
        self.analysis.as_ref()
    }

    fn notify(&self, message: Message) {
        if let Err(e) = self
            .fabric
            .send(ContextId::Sidebar, ContextId::Page, message)
        {
            debug!("page notification skipped: {}", e);
        }
    }
}
