use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;

use crate::error::TableroError;
use crate::extraction::http::build_client;
use crate::model::CanvasDocument;
use crate::suggest::types::{CanvasAnalysis, Envelope};
use crate::suggest::SuggestionService;

const DEFAULT_FAILURE: &str = "the service returned no analysis";

#[derive(Serialize)]
struct ImproveRequest<'a> {
    canvas: &'a CanvasDocument,
}

/// Client for the `/ai/canvas-improve` endpoint.
pub struct HttpSuggestionClient {
    client: Client,
    endpoint: String,
}

impl HttpSuggestionClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TableroError> {
        Ok(HttpSuggestionClient {
            client: build_client(timeout)?,
            endpoint: format!("{}/ai/canvas-improve", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SuggestionService for HttpSuggestionClient {
    fn analyze(&self, canvas: &CanvasDocument) -> Result<CanvasAnalysis, TableroError> {
        tracing::debug!(endpoint = %self.endpoint, title = %canvas.title, "requesting canvas analysis");
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ImproveRequest { canvas })
            .send()?;

        let status = response.status();
        if !status.is_success() {
            // Error responses may still carry an envelope message.
            let bytes = response.bytes()?;
            let message = serde_json::from_slice::<Envelope>(&bytes)
                .ok()
                .and_then(|e| e.message)
                .filter(|m| !m.trim().is_empty());
            return Err(match message {
                Some(message) => TableroError::Suggestion(message),
                None => TableroError::Http {
                    url: self.endpoint.clone(),
                    status: status.as_u16(),
                    message: String::from_utf8_lossy(&bytes).trim().to_string(),
                },
            });
        }

        decode_envelope(&response.bytes()?)
    }

    fn backend_name(&self) -> &str {
        "http"
    }
}

/// Decode the `{ok, message, data}` wrapper.
///
/// `ok: false` or a missing `data` become `TableroError::Suggestion` with
/// the service's message when it sent one.
pub fn decode_envelope(bytes: &[u8]) -> Result<CanvasAnalysis, TableroError> {
    let envelope: Envelope = serde_json::from_slice(bytes)
        .map_err(|e| TableroError::Suggestion(format!("malformed response: {e}")))?;

    let failure = || {
        TableroError::Suggestion(
            envelope
                .message
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FAILURE.to_string()),
        )
    };

    if !envelope.ok {
        return Err(failure());
    }
    envelope.data.clone().ok_or_else(failure)
}
