//! Page context: analysis triggering and floating badge state
//!
//! One page context exists per visited page. It mirrors the shared settings,
//! owns the most recent classification (served to popup and sidebar on
//! demand: pull, never push), reacts to selection changes, and drives the
//! floating badge through the view-mode state machine. A new page means a
//! new context; nothing here survives navigation.

pub mod badge;

pub use badge::{BadgeContent, FloatingBadge, WheelFrame};

use crate::classifier::ClassifyReply;
use crate::messaging::{AnalysisData, ContextId, Envelope, Fabric, Message, Reply};
use crate::metrics::METRICS;
use crate::settings::{self, Mode, SettingsStore, ViewMode};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Maximum text length submitted to the classifier, enforced here (the
/// caller side), not by the client
pub const MAX_ANALYZED_LEN: usize = 5000;

/// Selections at or below this length never trigger analysis
pub const MIN_SELECTION_LEN: usize = 10;

/// Platform signals delivered into the page context's event loop
#[derive(Debug, Clone)]
pub enum PageEvent {
    /// The user's text selection changed; empty string means cleared
    SelectionChanged(String),
}

/// Handle to a spawned page context
pub struct PageHandle {
    events: mpsc::UnboundedSender<PageEvent>,
    pub task: JoinHandle<()>,
}

impl PageHandle {
    /// Report a selection change into the page context
    pub fn selection_changed(&self, selection: impl Into<String>) {
        let _ = self
            .events
            .send(PageEvent::SelectionChanged(selection.into()));
    }
}

/// Collapse whitespace runs to single spaces, trim, and cap the length
pub fn prepare_text(text: &str, max_len: usize) -> String {
    let collapsed: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(max_len).collect()
}

/// The page context state
pub struct PageContext {
    fabric: Arc<Fabric>,
    store: Arc<dyn SettingsStore>,
    page_text: String,
    mode: Mode,
    view_mode: ViewMode,
    badge_size: u32,
    analysis: Option<AnalysisData>,
    last_analyzed_text: String,
    badge: Option<FloatingBadge>,
}

impl PageContext {
    pub fn new(
        fabric: Arc<Fabric>,
        store: Arc<dyn SettingsStore>,
        page_text: impl Into<String>,
    ) -> Self {
        Self {
            fabric,
            store,
            page_text: page_text.into(),
            mode: Mode::default(),
            view_mode: ViewMode::default(),
            badge_size: settings::DEFAULT_BADGE_SIZE,
            analysis: None,
            last_analyzed_text: String::new(),
            badge: None,
        }
    }

    /// Load settings and run the initial whole-page analysis
    pub async fn init(&mut self) {
        let loaded = settings::load_settings(self.store.as_ref()).await;
        self.mode = loaded.mode;
        self.badge_size = loaded.badge_size;
        self.apply_view_mode(loaded.view_mode);

        info!(
            "page context ready: mode={} viewMode={}",
            self.mode.as_str(),
            self.view_mode.as_str()
        );

        if self.mode == Mode::Page {
            self.analyze_page().await;
        }
    }

    /// Register on the fabric and run the event loop on its own task
    pub fn spawn(
        fabric: Arc<Fabric>,
        store: Arc<dyn SettingsStore>,
        page_text: impl Into<String>,
    ) -> PageHandle {
        let inbox = fabric.register(ContextId::Page);
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let ctx = Self::new(fabric, store, page_text);

        let task = tokio::spawn(ctx.run(inbox, events_rx));

        PageHandle {
            events: events_tx,
            task,
        }
    }

    /// Event loop: one message or platform event at a time, in arrival order
    pub async fn run(
        mut self,
        mut inbox: mpsc::UnboundedReceiver<Envelope>,
        mut events: mpsc::UnboundedReceiver<PageEvent>,
    ) {
        self.init().await;

        loop {
            tokio::select! {
                envelope = inbox.recv() => match envelope {
                    Some(envelope) => self.handle_envelope(envelope).await,
                    None => break,
                },
                event = events.recv() => match event {
                    Some(PageEvent::SelectionChanged(selection)) => {
                        self.handle_selection_change(&selection).await;
                    }
                    None => break,
                },
            }
        }
    }

    /// Dispatch one inbound message
    pub async fn handle_envelope(&mut self, envelope: Envelope) {
        match envelope.message.clone() {
            Message::UpdateMode { mode } => {
                // The sender already persisted the store; only mirror and react
                self.mode = mode;
                if mode == Mode::Page {
                    self.analyze_page().await;
                }
            }
            Message::UpdateSize { size } => {
                self.badge_size = size;
                if let Some(badge) = &mut self.badge {
                    badge.resize(size);
                }
            }
            Message::UpdateViewMode { view_mode } => {
                self.apply_view_mode(view_mode);
            }
            Message::GetAnalysisData => {
                METRICS.analysis_pulls.inc();
                envelope.respond(Reply::AnalysisData {
                    data: self.analysis.clone(),
                });
            }
            other => {
                warn!(
                    "page context ignoring unexpected {} from {}",
                    other.action(),
                    envelope.from
                );
            }
        }
    }

    /// Selection-driven automatic mode switching.
    ///
    /// A trimmed selection longer than `MIN_SELECTION_LEN` forces select mode
    /// and classifies the selection; an empty selection forces page mode and
    /// re-analyzes the page. Short non-empty selections are ignored. Mode
    /// transitions are persisted so popup and sidebar toggles stay truthful.
    pub async fn handle_selection_change(&mut self, selection: &str) {
        let trimmed = selection.trim();

        if trimmed.is_empty() {
            if self.mode != Mode::Page {
                self.mode = Mode::Page;
                settings::save_mode(self.store.as_ref(), Mode::Page).await;
            }
            self.analyze_page().await;
        } else if trimmed.chars().count() > MIN_SELECTION_LEN {
            if self.mode != Mode::Select {
                self.mode = Mode::Select;
                settings::save_mode(self.store.as_ref(), Mode::Select).await;
            }
            self.analyze(trimmed.to_string()).await;
        }
    }

    /// Trigger whole-page analysis
    pub async fn analyze_page(&mut self) {
        let text = self.page_text.clone();
        self.analyze(text).await;
    }

    /// Classify `text` through the background coordinator, unless it matches
    /// the already-analyzed text exactly
    async fn analyze(&mut self, text: String) {
        let prepared = prepare_text(&text, MAX_ANALYZED_LEN);
        if prepared.is_empty() {
            return;
        }
        if prepared == self.last_analyzed_text {
            debug!("skipping analysis of unchanged text");
            return;
        }
        self.last_analyzed_text = prepared.clone();

        if let Some(badge) = self.active_badge() {
            badge.show_loading();
        }

        let reply = self
            .fabric
            .request(
                ContextId::Page,
                ContextId::Background,
                Message::ClassifyText {
                    text: prepared.clone(),
                },
            )
            .await;

        match reply {
            Ok(Reply::Classification { result }) => match result {
                ClassifyReply::Ok { data } => {
                    let analysis = AnalysisData {
                        text: prepared,
                        result: data,
                    };
                    if let Some(badge) = self.active_badge() {
                        badge.render(&analysis);
                    }
                    self.analysis = Some(analysis);
                }
                ClassifyReply::Declined { reason } => {
                    debug!("classification declined: {}", reason);
                }
                ClassifyReply::Error { message } => {
                    if let Some(badge) = self.active_badge() {
                        badge.show_error(&message);
                    }
                }
            },
            Ok(other) => {
                warn!("unexpected reply to classifyText: {:?}", other);
            }
            Err(e) => {
                warn!("classification request failed: {}", e);
                if let Some(badge) = self.active_badge() {
                    badge.show_error(e.to_string());
                }
            }
        }
    }

    /// View-mode state machine.
    ///
    /// Entering floating creates the badge lazily and shows it; leaving
    /// floating hides it without destroying the last-rendered content.
    /// Entering sidebar is advisory only: the platform opens the actual
    /// panel from a user gesture, never from this transition.
    fn apply_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;

        match view_mode {
            ViewMode::Floating => {
                let size = self.badge_size;
                let badge = self.badge.get_or_insert_with(|| FloatingBadge::new(size));
                badge.resize(size);
                badge.show();
                if let Some(analysis) = &self.analysis {
                    badge.render(analysis);
                }
            }
            ViewMode::Popup | ViewMode::Sidebar => {
                if let Some(badge) = &mut self.badge {
                    badge.hide();
                }
            }
        }
    }

    /// The badge, but only while the floating surface is the live one
    fn active_badge(&mut self) -> Option<&mut FloatingBadge> {
        if self.view_mode == ViewMode::Floating {
            self.badge.as_mut()
        } else {
            None
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn badge_size(&self) -> u32 {
        self.badge_size
    }

    pub fn analysis(&self) -> Option<&AnalysisData> {
        self.analysis.as_ref()
    }

    pub fn badge(&self) -> Option<&FloatingBadge> {
        self.badge.as_ref()
    }
}
