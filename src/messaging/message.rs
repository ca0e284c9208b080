//! Cross-context message protocol

use crate::classifier::{ClassificationResult, ClassifyReply};
use crate::settings::{Mode, ViewMode};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

/// The page context's cached most-recent classification, together with the
/// text it was computed from. Other surfaces only ever see a copy of this,
/// obtained via a `getAnalysisData` pull.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisData {
    pub text: String,
    pub result: ClassificationResult,
}

/// Messages exchanged between contexts, dispatched on the `action` tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Message {
    /// Analysis mode changed by a settings-editing surface; the store was
    /// already written before this message was sent.
    #[serde(rename_all = "camelCase")]
    UpdateMode { mode: Mode },
    /// Floating badge size changed.
    #[serde(rename_all = "camelCase")]
    UpdateSize { size: u32 },
    /// Active presentation surface changed.
    #[serde(rename_all = "camelCase")]
    UpdateViewMode { view_mode: ViewMode },
    /// Pull the page context's cached analysis (request/response).
    GetAnalysisData,
    /// Ask the background coordinator to classify text (request/response).
    #[serde(rename_all = "camelCase")]
    ClassifyText { text: String },
    /// Probe the remote classifier through the coordinator
    /// (request/response).
    TestConnection,
}

impl Message {
    /// The `action` tag this message dispatches on
    pub fn action(&self) -> &'static str {
        match self {
            Self::UpdateMode { .. } => "updateMode",
            Self::UpdateSize { .. } => "updateSize",
            Self::UpdateViewMode { .. } => "updateViewMode",
            Self::GetAnalysisData => "getAnalysisData",
            Self::ClassifyText { .. } => "classifyText",
            Self::TestConnection => "testConnection",
        }
    }
}

/// Replies for the request/response message variants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Reply {
    /// Cached analysis, or `None` when the page has not classified anything
    #[serde(rename_all = "camelCase")]
    AnalysisData { data: Option<AnalysisData> },
    /// Tagged classification outcome
    #[serde(rename_all = "camelCase")]
    Classification { result: ClassifyReply },
    /// Connection probe outcome
    #[serde(rename_all = "camelCase")]
    Probe {
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

/// A message in flight, with an optional reply channel for the
/// request/response variants.
#[derive(Debug)]
pub struct Envelope {
    pub from: super::ContextId,
    pub message: Message,
    pub reply: Option<oneshot::Sender<Reply>>,
}

impl Envelope {
    /// Send a reply if the requester supplied a channel and still listens
    pub fn respond(self, reply: Reply) {
        if let Some(tx) = self.reply {
            let _ = tx.send(reply);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_action_tags() {
        let msg = Message::UpdateMode { mode: Mode::Select };
        assert_eq!(msg.action(), "updateMode");

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["action"], "updateMode");
        assert_eq!(json["mode"], "select");
    }

    #[test]
    fn test_view_mode_field_name() {
        let msg = Message::UpdateViewMode {
            view_mode: ViewMode::Floating,
        };

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["action"], "updateViewMode");
        assert_eq!(json["viewMode"], "floating");
    }

    #[test]
    fn test_message_round_trip() {
        let msg = Message::ClassifyText {
            text: "renewable energy".to_string(),
        };

        let json = serde_json::to_string(&msg).unwrap();
        let parsed: Message = serde_json::from_str(&json).unwrap();
        match parsed {
            Message::ClassifyText { text } => assert_eq!(text, "renewable energy"),
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn test_reply_serialization() {
        let reply = Reply::Probe {
            success: false,
            error: Some("offline".to_string()),
        };

        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["kind"], "probe");
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "offline");
    }
}
