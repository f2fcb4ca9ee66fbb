//! Domain error taxonomy shared by every use case.
//!
//! The first four variants form the closed business taxonomy; `Storage` and
//! `Publish` are pass-through channels that carry infrastructure failures
//! unmodified, so callers can always tell a business error from a broken
//! collaborator.

use crate::types::VehicleId;
use crate::vehicle::UniqueField;

/// Boxed opaque error source for infrastructure failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A lookup by id found nothing (get, update, delete).
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: VehicleId },

    /// A create/update candidate value collides with another record's
    /// unique field.
    #[error("{entity} with {field} '{value}' already exists")]
    UniqueViolation {
        entity: &'static str,
        field: UniqueField,
        value: String,
    },

    /// The repository returned no record from `create` for a reason other
    /// than a uniqueness conflict.
    #[error("{entity} not created")]
    CreationFailed { entity: &'static str },

    /// A payload failed field-shape validation.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A storage fault that is not a uniqueness violation, unmodified.
    #[error("Storage failure: {0}")]
    Storage(#[source] BoxError),

    /// Event publication failed after the record was durably created.
    #[error("Event publish failure: {0}")]
    Publish(#[source] BoxError),
}

/// Convenience alias for use-case return values.
pub type CoreResult<T> = Result<T, CoreError>;
