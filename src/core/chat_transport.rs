use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{StatusCode, Url};
use thiserror::Error;
use tracing::debug;

use crate::api::{encode_form_body, ChatReply, FORM_CONTENT_TYPE};

/// Longest body excerpt kept on a status error.
const BODY_EXCERPT_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("request to chat endpoint failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("chat endpoint returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("chat endpoint sent a malformed reply: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One outbound request per call. Implementations never retry.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, message: &str) -> Result<String, ExchangeError>;

    /// Human-readable description of where messages go.
    fn describe(&self) -> String;
}

#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    /// The client is built without a request timeout; failures are whatever
    /// the connection reports.
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, message: &str) -> Result<String, ExchangeError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(encode_form_body(message))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(%status, bytes = body.len(), "chat endpoint replied");

        if !status.is_success() {
            return Err(ExchangeError::Status {
                status,
                body: excerpt(&body),
            });
        }

        let reply: ChatReply = serde_json::from_str(&body)?;
        Ok(reply.response)
    }

    fn describe(&self) -> String {
        self.endpoint.to_string()
    }
}

fn excerpt(body: &str) -> String {
    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= BODY_EXCERPT_CHARS {
        return collapsed;
    }
    let mut cut: String = collapsed.chars().take(BODY_EXCERPT_CHARS).collect();
    cut.push('…');
    cut
}
