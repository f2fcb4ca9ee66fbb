/// Vehicle primary keys are UUIDs assigned by the storage layer.
pub type VehicleId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
