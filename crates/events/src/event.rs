//! Creation event envelope.

use chrono::{DateTime, Utc};
use serde::Serialize;

use fleetreg_core::vehicle::Vehicle;

/// Dot-separated event name for vehicle creation.
pub const EVENT_VEHICLE_CREATED: &str = "vehicle.created";

/// Envelope delivered to downstream consumers when a vehicle is created.
///
/// Carries the persisted record verbatim, assigned id included.
#[derive(Debug, Clone, Serialize)]
pub struct VehicleCreated {
    /// Always [`EVENT_VEHICLE_CREATED`].
    pub event_type: &'static str,

    /// The persisted record.
    pub vehicle: Vehicle,

    /// When the envelope was built (UTC).
    pub timestamp: DateTime<Utc>,
}

impl VehicleCreated {
    /// Build an envelope for a freshly persisted record.
    pub fn new(vehicle: Vehicle) -> Self {
        Self {
            event_type: EVENT_VEHICLE_CREATED,
            vehicle,
            timestamp: Utc::now(),
        }
    }
}
