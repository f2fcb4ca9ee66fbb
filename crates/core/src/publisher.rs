//! Notification capability contract for creation events.

use async_trait::async_trait;

use crate::error::BoxError;
use crate::vehicle::Vehicle;

/// Error surface of a publisher implementation.
///
/// Carries the transport failure unmodified; the use case layer never
/// inspects it beyond logging and propagation.
#[derive(Debug, thiserror::Error)]
#[error("publish failed: {0}")]
pub struct PublishError(#[source] pub BoxError);

impl PublishError {
    pub fn new(err: impl Into<BoxError>) -> Self {
        Self(err.into())
    }
}

/// Announces "a vehicle was created" to an external channel.
///
/// Transport (broker protocol, endpoint naming) is entirely the
/// implementation's concern.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a creation event carrying the persisted record, assigned id
    /// included.
    async fn publish_vehicle_created(&self, vehicle: &Vehicle) -> Result<(), PublishError>;
}

/// Publisher that accepts every event and does nothing.
///
/// Used by tests and by assemblies with no delivery endpoint configured.
pub struct NoopPublisher;

#[async_trait]
impl EventPublisher for NoopPublisher {
    async fn publish_vehicle_created(&self, vehicle: &Vehicle) -> Result<(), PublishError> {
        tracing::debug!(vehicle_id = %vehicle.id, "Event delivery disabled, dropping vehicle.created");
        Ok(())
    }
}
