//! Delivery of rendered messages to the Webex API.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use reqwest::StatusCode;

use crate::card::MessagePayload;
use crate::error::{HandlerError, Result};

/// Default API host; overridable for test or proxy deployments.
pub const DEFAULT_API_HOST: &str = "api.ciscospark.com";

const MESSAGES_PATH: &str = "/v1/messages";

/// Rate-limited requests are retried at most this many times.
const RETRY_LIMIT: u32 = 2;
const RETRY_WAIT_MIN: Duration = Duration::from_secs(2);
const RETRY_WAIT_MAX: Duration = Duration::from_secs(9);

/// Outcome of one delivery, kept for operator visibility. A non-200 response
/// ends up here rather than in an error: `ok` is false and every diagnostic
/// field is populated, but the handler still exits cleanly.
#[derive(Debug)]
pub struct DeliveryReport {
    pub ok: bool,
    pub status: u16,
    pub retries: u32,
    pub elapsed: Duration,
    pub received_at: DateTime<Utc>,
    pub response_body: String,
}

/// Client for `POST /v1/messages`, bearer-authenticated.
pub struct WebexClient {
    client: reqwest::Client,
    messages_url: String,
    token: String,
}

impl WebexClient {
    /// Builds a client for the given host. The timeout bounds each request;
    /// the handler additionally bounds its whole run with the same value.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::Transport`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(api_host: &str, token: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            messages_url: format!("{}{MESSAGES_PATH}", base_url(api_host)),
            token: token.to_string(),
        })
    }

    /// Sends the payload, retrying only on rate-limit responses.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::Transport`] when the endpoint cannot be
    /// reached. HTTP error responses are not errors; they are logged with
    /// full diagnostics and reported through the returned [`DeliveryReport`].
    pub async fn send(&self, payload: &MessagePayload) -> Result<DeliveryReport> {
        let body =
            serde_json::to_string(payload).map_err(|e| HandlerError::Render(e.to_string()))?;
        let started = Instant::now();
        let mut attempt = 0u32;

        loop {
            let response = self
                .client
                .post(&self.messages_url)
                .bearer_auth(&self.token)
                .header("Content-Type", "application/json")
                .body(body.clone())
                .send()
                .await?;

            let status = response.status();
            if should_retry(status) && attempt < RETRY_LIMIT {
                let wait = retry_wait(attempt);
                tracing::warn!(
                    status = status.as_u16(),
                    attempt = attempt + 1,
                    wait_secs = wait.as_secs(),
                    "Webex API rate limited, retrying"
                );
                tokio::time::sleep(wait).await;
                attempt += 1;
                continue;
            }

            let received_at = Utc::now();
            let elapsed = started.elapsed();
            let body = match response.text().await {
                Ok(text) => text,
                Err(e) => format!("[failed to read response body: {e}]"),
            };

            let ok = status == StatusCode::OK;
            if ok {
                tracing::info!(status = status.as_u16(), elapsed_ms = elapsed.as_millis() as u64, "message delivered");
            } else {
                tracing::error!(
                    status = status.as_u16(),
                    status_text = status.canonical_reason().unwrap_or("unknown"),
                    elapsed_ms = elapsed.as_millis() as u64,
                    received_at = %received_at,
                    retries = attempt,
                    body = %body,
                    "Webex API returned non-OK status"
                );
            }

            return Ok(DeliveryReport {
                ok,
                status: status.as_u16(),
                retries: attempt,
                elapsed,
                received_at,
                response_body: body,
            });
        }
    }
}

/// A bare host gets the https scheme; a host that already carries one is
/// used verbatim.
fn base_url(api_host: &str) -> String {
    let host = api_host.trim();
    if host.contains("://") {
        host.trim_end_matches('/').to_string()
    } else {
        format!("https://{host}")
    }
}

fn should_retry(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
}

/// Wait before retry `attempt`, doubling from the minimum up to the cap.
fn retry_wait(attempt: u32) -> Duration {
    let wait = RETRY_WAIT_MIN * 2u32.saturating_pow(attempt);
    wait.min(RETRY_WAIT_MAX)
}
