//! Webhook relay with exponential-backoff retry.
//!
//! [`WebhookPublisher`] sends a JSON-encoded [`VehicleCreated`] envelope to
//! a configured URL via HTTP POST. Failed attempts are retried up to three
//! times with exponential backoff (1 s, 2 s, 4 s); exhausted retries fail
//! the publish; a delivery timeout is a reported error, never a silent
//! drop.

use std::time::Duration;

use async_trait::async_trait;

use fleetreg_core::publisher::{EventPublisher, PublishError};
use fleetreg_core::vehicle::Vehicle;

use crate::event::VehicleCreated;

/// Retry delays in seconds (exponential backoff: 1s, 2s, 4s).
const RETRY_DELAYS_SECS: [u64; 3] = [1, 2, 4];

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for webhook delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// WebhookPublisher
// ---------------------------------------------------------------------------

/// Publishes creation events to an external endpoint.
pub struct WebhookPublisher {
    client: reqwest::Client,
    endpoint: String,
}

impl WebhookPublisher {
    /// Create a publisher with a pre-configured HTTP client.
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Deliver an envelope with retry.
    ///
    /// Returns `Ok(())` on the first successful attempt.
    async fn deliver(&self, envelope: &VehicleCreated) -> Result<(), WebhookError> {
        let mut last_err: Option<WebhookError> = None;

        for (attempt, delay_secs) in RETRY_DELAYS_SECS.iter().enumerate() {
            match self.try_send(envelope).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        endpoint = %self.endpoint,
                        error = %e,
                        "Event delivery attempt failed, retrying"
                    );
                    last_err = Some(e);
                    tokio::time::sleep(Duration::from_secs(*delay_secs)).await;
                }
            }
        }

        // Final attempt after the last backoff.
        match self.try_send(envelope).await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::error!(
                    endpoint = %self.endpoint,
                    error = %e,
                    "Event delivery failed after all retries"
                );
                Err(last_err.unwrap_or(e))
            }
        }
    }

    /// Execute a single POST request and check the response status.
    async fn try_send(&self, envelope: &VehicleCreated) -> Result<(), WebhookError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(envelope)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(WebhookError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl EventPublisher for WebhookPublisher {
    async fn publish_vehicle_created(&self, vehicle: &Vehicle) -> Result<(), PublishError> {
        let envelope = VehicleCreated::new(vehicle.clone());
        self.deliver(&envelope).await.map_err(PublishError::new)?;
        tracing::info!(vehicle_id = %vehicle.id, "Published vehicle.created");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
