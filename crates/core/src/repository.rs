//! Storage capability contract for vehicle records.
//!
//! Any backing store (PostgreSQL, in-memory) implements [`VehicleRepository`]
//! with the same observable semantics: absence is signalled by `None` or an
//! empty list, never by an error, and the store is the final authority on
//! uniqueness: a write that would duplicate a unique field must fail with
//! [`StorageError::UniqueViolation`] even if the caller checked first.

use async_trait::async_trait;

use crate::error::BoxError;
use crate::types::VehicleId;
use crate::vehicle::{NewVehicle, UniqueField, Vehicle, VehicleChanges};

/// Error surface of a repository implementation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A write was rejected by the store's own uniqueness enforcement
    /// (unique index or equivalent).
    #[error("duplicate {field} '{value}'")]
    UniqueViolation { field: UniqueField, value: String },

    /// Any other storage fault (I/O, connectivity), carried unmodified.
    #[error("storage backend error: {0}")]
    Backend(#[source] BoxError),
}

impl StorageError {
    /// Wrap an arbitrary backend fault.
    pub fn backend(err: impl Into<BoxError>) -> Self {
        Self::Backend(err.into())
    }
}

/// Durable storage contract for [`Vehicle`] records.
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Snapshot of all records, order unspecified.
    async fn find_all(&self) -> Result<Vec<Vehicle>, StorageError>;

    /// The record with the given id, or `None`.
    async fn find_by_id(&self, id: VehicleId) -> Result<Option<Vehicle>, StorageError>;

    /// All records whose `field` equals `value`; empty when none match.
    async fn find_by_field(
        &self,
        field: UniqueField,
        value: &str,
    ) -> Result<Vec<Vehicle>, StorageError>;

    /// Persist a new record, assigning its id.
    ///
    /// `Ok(None)` means the store produced no record without raising a
    /// classified error; callers treat it as a creation failure.
    async fn create(&self, input: NewVehicle) -> Result<Option<Vehicle>, StorageError>;

    /// Merge the present fields of `changes` onto the stored record.
    ///
    /// `Ok(None)` means no record with that id exists.
    async fn update(
        &self,
        id: VehicleId,
        changes: VehicleChanges,
    ) -> Result<Option<Vehicle>, StorageError>;

    /// Remove a record. Returns whether one existed and was removed.
    async fn delete(&self, id: VehicleId) -> Result<bool, StorageError>;
}
