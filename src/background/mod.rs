//! Background request coordinator
//!
//! Owns the classifier client and serves `classifyText` / `testConnection`
//! requests from any page context. Each request runs on its own task, so
//! several classifications can be pending at once in this context's event
//! loop; the rate limiter inside the client is the only serialization point
//! between them.

use crate::classifier::{ClassifierClient, ClassifierConfig, ClassifyError};
use crate::messaging::{ContextId, Envelope, Fabric, Message, Reply};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// The background coordinator context
pub struct Coordinator {
    client: Arc<ClassifierClient>,
}

impl Coordinator {
    /// Create a coordinator with the given classifier configuration
    pub fn new(config: ClassifierConfig) -> Result<Self, ClassifyError> {
        Ok(Self {
            client: Arc::new(ClassifierClient::new(config)?),
        })
    }

    /// Register on the fabric and start serving requests.
    ///
    /// Runs until the fabric drops this context's channel.
    pub fn spawn(self, fabric: &Arc<Fabric>) -> JoinHandle<()> {
        let mut rx = fabric.register(ContextId::Background);
        info!("background coordinator started");

        tokio::spawn(async move {
            while let Some(envelope) = rx.recv().await {
                let client = Arc::clone(&self.client);
                tokio::spawn(async move {
                    handle_request(client, envelope).await;
                });
            }
        })
    }
}

/// Serve one inbound request, converting every outcome into a tagged reply.
///
/// Raw errors never cross the fabric; the requesting context only ever sees
/// `Reply` variants.
async fn handle_request(client: Arc<ClassifierClient>, envelope: Envelope) {
    match envelope.message.clone() {
        Message::ClassifyText { text } => {
            let result = client.classify(&text).await.into();
            envelope.respond(Reply::Classification { result });
        }
        Message::TestConnection => {
            let reply = match client.test_connection().await {
                Ok(()) => Reply::Probe {
                    success: true,
                    error: None,
                },
                Err(e) => Reply::Probe {
                    success: false,
                    error: Some(probe_error_text(&e)),
                },
            };
            envelope.respond(reply);
        }
        other => {
            warn!(
                "coordinator ignoring unexpected {} from {}",
                other.action(),
                envelope.from
            );
        }
    }
}

fn probe_error_text(error: &ClassifyError) -> String {
    match error {
        ClassifyError::EmptyInput => error.to_string(),
        ClassifyError::Remote(_) => {
            "API connection failed. Please check your internet connection.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ClassifyReply;

    fn coordinator_with_endpoint(endpoint: &str) -> Coordinator {
        let config = ClassifierConfig {
            endpoint: endpoint.to_string(),
            rate_limit_ms: 1,
            ..ClassifierConfig::default()
        };
        Coordinator::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_classify_empty_text_is_declined() {
        let mut server = mockito::Server::new_async().await;
        // The endpoint must never be hit for empty input
        let mock = server
            .mock("POST", "/classify")
            .expect(0)
            .create_async()
            .await;

        let fabric = Arc::new(Fabric::new());
        coordinator_with_endpoint(&format!("{}/classify", server.url())).spawn(&fabric);

        let reply = fabric
            .request(
                ContextId::Page,
                ContextId::Background,
                Message::ClassifyText {
                    text: "   ".to_string(),
                },
            )
            .await
            .unwrap();

        match reply {
            Reply::Classification {
                result: ClassifyReply::Declined { .. },
            } => {}
            other => panic!("expected declined reply, got {:?}", other),
        }

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_remote_failure_becomes_tagged_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/classify")
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let fabric = Arc::new(Fabric::new());
        coordinator_with_endpoint(&format!("{}/classify", server.url())).spawn(&fabric);

        let reply = fabric
            .request(
                ContextId::Page,
                ContextId::Background,
                Message::ClassifyText {
                    text: "clean water".to_string(),
                },
            )
            .await
            .unwrap();

        match reply {
            Reply::Classification {
                result: ClassifyReply::Error { message },
            } => assert!(message.contains("500")),
            other => panic!("expected error reply, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_probe_reports_failure_without_payload() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/classify")
            .with_status(503)
            .create_async()
            .await;

        let fabric = Arc::new(Fabric::new());
        coordinator_with_endpoint(&format!("{}/classify", server.url())).spawn(&fabric);

        let reply = fabric
            .request(ContextId::Popup, ContextId::Background, Message::TestConnection)
            .await
            .unwrap();

        match reply {
            Reply::Probe { success, error } => {
                assert!(!success);
                assert!(error.unwrap().contains("connection failed"));
            }
            other => panic!("expected probe reply, got {:?}", other),
        }
    }
}
