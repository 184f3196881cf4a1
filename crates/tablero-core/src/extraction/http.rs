use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;

use crate::error::TableroError;
use crate::extraction::CanvasSource;
use crate::model::CanvasPayload;

/// Build the blocking HTTP client shared by the remote sources.
pub fn build_client(timeout: Duration) -> Result<Client, TableroError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Turn a non-success response into `TableroError::Http`, keeping the body
/// text as the message.
fn check_status(response: Response, url: &str) -> Result<Response, TableroError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().unwrap_or_default();
    Err(TableroError::Http {
        url: url.to_string(),
        status: status.as_u16(),
        message: message.trim().to_string(),
    })
}

/// GET a URL and return the body, failing on non-success status.
pub fn get_bytes(client: &Client, url: &str) -> Result<Vec<u8>, TableroError> {
    let response = client.get(url).header(ACCEPT, "application/json").send()?;
    let response = check_status(response, url)?;
    Ok(response.bytes()?.to_vec())
}

/// URL of the canvas endpoint for a sheet.
pub fn canvas_url(base_url: &str, sheet_id: &str) -> String {
    format!(
        "{}/projects/canvas/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(sheet_id)
    )
}

/// Canvas source backed by the portfolio API (`/projects/canvas/{sheet}`).
pub struct HttpCanvasSource {
    client: Client,
    base_url: String,
}

impl HttpCanvasSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TableroError> {
        Ok(HttpCanvasSource {
            client: build_client(timeout)?,
            base_url: base_url.into(),
        })
    }
}

impl CanvasSource for HttpCanvasSource {
    fn fetch(&self, sheet_id: &str) -> Result<CanvasPayload, TableroError> {
        let url = canvas_url(&self.base_url, sheet_id);
        tracing::debug!(%url, "fetching canvas");
        let bytes = get_bytes(&self.client, &url)?;
        CanvasPayload::from_json(&bytes)
    }

    fn backend_name(&self) -> &str {
        "http"
    }
}
