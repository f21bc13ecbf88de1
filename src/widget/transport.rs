/**
 * Page Transport
 *
 * A single HTTP GET used to pull a record's page. The response body is read
 * separately from the status so that "server said no" and "the body could
 * not be read" stay distinguishable.
 */
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::shared::error::SyncError;

/// Response to a page GET
#[derive(Debug)]
pub struct HttpResponse {
    status: u16,
    status_text: String,
    body: Body,
}

#[derive(Debug)]
enum Body {
    Pending(reqwest::Response),
    Text(String),
    #[cfg(test)]
    Unreadable(SyncError),
}

impl HttpResponse {
    /// Response with an already-buffered body; the status text is the
    /// status code's canonical reason phrase
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: reason_phrase(status),
            body: Body::Text(body.into()),
        }
    }

    pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = status_text.into();
        self
    }

    /// Response whose body fails to read with `err`
    #[cfg(test)]
    pub(crate) fn unreadable(status: u16, err: SyncError) -> Self {
        Self {
            status,
            status_text: reason_phrase(status),
            body: Body::Unreadable(err),
        }
    }

    fn from_reqwest(response: reqwest::Response) -> Self {
        let status = response.status();
        Self {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body: Body::Pending(response),
        }
    }

    /// 2xx status
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Read the full body as text
    pub async fn text(self) -> Result<String, SyncError> {
        match self.body {
            Body::Pending(response) => Ok(response.text().await?),
            Body::Text(text) => Ok(text),
            #[cfg(test)]
            Body::Unreadable(err) => Err(err),
        }
    }
}

fn reason_phrase(status: u16) -> String {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or_default()
        .to_string()
}

/// HTTP GET capability used by the sync controller
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET. Non-success statuses are returned, not raised; `Err` means
    /// the request itself failed.
    async fn get(&self, url: &str) -> Result<HttpResponse, SyncError>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Transport whose client gives up after `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self, SyncError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, SyncError> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Ok(HttpResponse::from_reqwest(response))
    }
}
