//! Popup panel surface

use crate::messaging::{AnalysisData, ContextId, Fabric, Message, Reply};
use crate::settings::{self, Mode, Settings, SettingsStore, ViewMode};
use std::sync::Arc;
use tracing::{debug, warn};

/// The popup panel: settings controls, API probe, and an on-demand view of
/// the page context's cached analysis.
///
/// Settings changes are persisted to the store first, then announced to the
/// page context. Analysis data is pulled on open and on explicit refresh;
/// the popup never receives unsolicited updates.
pub struct PopupPanel {
    fabric: Arc<Fabric>,
    store: Arc<dyn SettingsStore>,
    settings: Settings,
    analysis: Option<AnalysisData>,
    status: Option<String>,
}

impl PopupPanel {
    pub fn new(fabric: Arc<Fabric>, store: Arc<dyn SettingsStore>) -> Self {
        Self {
            fabric,
            store,
            settings: Settings::default(),
            analysis: None,
            status: None,
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

    /// Probe the remote classifier through the background coordinator and
    /// record a human-readable status line
    pub async fn test_connection(&mut self) -> bool {
        let reply = self
            .fabric
            .request(ContextId::Popup, ContextId::Background, Message::TestConnection)
            .await;

        let success = match reply {
            Ok(Reply::Probe { success: true, .. }) => {
                self.status = Some("API connection successful!".to_string());
                true
            }
            Ok(Reply::Probe { error, .. }) => {
                self.status = error.or_else(|| Some("API connection failed.".to_string()));
                false
            }
            Ok(other) => {
                warn!("unexpected reply to testConnection: {:?}", other);
                self.status = Some("API connection failed.".to_string());
                false
            }
            Err(e) => {
                self.status = Some(e.to_string());
                false
            }
        };
        success
    }

    /// Pull the page context's cached analysis
    pub async fn refresh(&mut self) {
        match self
            .fabric
            .request(ContextId::Popup, ContextId::Page, Message::GetAnalysisData)
            .await
        {
            Ok(Reply::AnalysisData { data }) => self.analysis = data,
            Ok(other) => warn!("unexpected reply to getAnalysisData: {:?}", other),
            Err(e) => debug!("analysis pull failed: {}", e),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn analysis(&self) -> Option<&AnalysisData> {
        self.analysis.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn notify(&self, message: Message) {
        if let Err(e) = self
            .fabric
            .send(ContextId::Popup, ContextId::Page, message)
        {
            // No page context on this tab; the store still holds the change
            debug!("page notification skipped: {}", e);
        }
    }
}
