//! In-process message fabric between extension contexts

use super::message::{Envelope, Message, Reply};
use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

/// The four independent execution contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextId {
    Background,
    Page,
    Popup,
    Sidebar,
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Background => "background",
            Self::Page => "page",
            Self::Popup => "popup",
            Self::Sidebar => "sidebar",
        };
        f.write_str(name)
    }
}

/// Messaging errors
#[derive(Debug, Error)]
pub enum FabricError {
    #[error("no handler registered for {0}")]
    Unroutable(ContextId),

    #[error("context {0} stopped receiving")]
    Disconnected(ContextId),

    #[error("request to {0} was dropped without a reply")]
    NoReply(ContextId),
}

/// Message transport between contexts.
///
/// Each context registers exactly one handler (receiver). Delivery is FIFO
/// per sender/receiver pair; there is no ordering guarantee across different
/// senders or message types, and no delivery guarantee once a context has
/// stopped receiving.
pub struct Fabric {
    routes: Mutex<HashMap<ContextId, mpsc::UnboundedSender<Envelope>>>,
}

impl Fabric {
    pub fn new() -> Self {
        Self {
            routes: Mutex::new(HashMap::new()),
        }
    }

    /// Register the handler for a context, replacing any previous one.
    ///
    /// The returned receiver is the context's single inbound queue.
    pub fn register(&self, id: ContextId) -> mpsc::UnboundedReceiver<Envelope> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.routes.lock().unwrap().insert(id, tx);
        rx
    }

    /// Fire-and-forget send
    pub fn send(&self, from: ContextId, to: ContextId, message: Message) -> Result<(), FabricError> {
        debug!("{} -> {}: {}", from, to, message.action());
        self.deliver(Envelope {
            from,
            message,
            reply: None,
        }, to)
    }

    /// Request/response round-trip
    pub async fn request(
        &self,
        from: ContextId,
        to: ContextId,
        message: Message,
    ) -> Result<Reply, FabricError> {
        debug!("{} -> {} (request): {}", from, to, message.action());

        let (tx, rx) = oneshot::channel();
        self.deliver(
            Envelope {
                from,
                message,
                reply: Some(tx),
            },
            to,
        )?;

        rx.await.map_err(|_| FabricError::NoReply(to))
    }

    fn deliver(&self, envelope: Envelope, to: ContextId) -> Result<(), FabricError> {
        let routes = self.routes.lock().unwrap();
        let tx = routes.get(&to).ok_or(FabricError::Unroutable(to))?;
        tx.send(envelope).map_err(|_| FabricError::Disconnected(to))
    }
}

impl Default for Fabric {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_reaches_registered_handler() {
        let fabric = Fabric::new();
        let mut rx = fabric.register(ContextId::Page);

        fabric
            .send(ContextId::Popup, ContextId::Page, Message::GetAnalysisData)
            .unwrap();

        let envelope = rx.recv().await.unwrap();
        assert_eq!(envelope.from, ContextId::Popup);
        assert!(matches!(envelope.message, Message::GetAnalysisData));
    }

    #[tokio::test]
    async fn test_send_to_unregistered_context_fails() {
        let fabric = Fabric::new();

        let result = fabric.send(ContextId::Popup, ContextId::Page, Message::GetAnalysisData);
        assert!(matches!(result, Err(FabricError::Unroutable(ContextId::Page))));
    }

    #[tokio::test]
    async fn test_request_round_trip() {
        let fabric = Fabric::new();
        let mut rx = fabric.register(ContextId::Page);

        let responder = tokio::spawn(async move {
            let envelope = rx.recv().await.unwrap();
            envelope.respond(Reply::AnalysisData { data: None });
        });

        let reply = fabric
            .request(ContextId::Sidebar, ContextId::Page, Message::GetAnalysisData)
            .await
            .unwrap();

        assert_eq!(reply, Reply::AnalysisData { data: None });
        responder.await.unwrap();
    }

    #[tokio::test]
    async fn test_dropped_reply_surfaces_as_no_reply() {
        let fabric = Fabric::new();
        let mut rx = fabric.register(ContextId::Background);

        let dropper = tokio::spawn(async move {
            // Drop the envelope (and its reply channel) without answering
            let _ = rx.recv().await.unwrap();
        });

        let result = fabric
            .request(ContextId::Page, ContextId::Background, Message::TestConnection)
            .await;

        assert!(matches!(result, Err(FabricError::NoReply(ContextId::Background))));
        dropper.await.unwrap();
    }

    #[tokio::test]
    async fn test_fifo_per_sender_receiver_pair() {
        let fabric = Fabric::new();
        let mut rx = fabric.register(ContextId::Page);

        for size in [100, 200, 300] {
            fabric
                .send(ContextId::Popup, ContextId::Page, Message::UpdateSize { size })
                .unwrap();
        }

        for expected in [100, 200, 300] {
            match rx.recv().await.unwrap().message {
                Message::UpdateSize { size } => assert_eq!(size, expected),
                other => panic!("unexpected message {:?}", other),
            }
        }
    }
}
