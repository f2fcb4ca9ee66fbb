//! Use-case orchestrators.
//!
//! One struct per operation, collaborators injected at construction as
//! `Arc<dyn …>` trait objects. Each `execute` composes the repository (and
//! publisher, for create) into a single operation and maps every outcome to
//! the [`CoreError`](crate::error::CoreError) taxonomy.

pub mod create_vehicle;
pub mod delete_vehicle;
pub mod get_all_vehicles;
pub mod get_vehicle_by_id;
pub mod update_vehicle;

pub use create_vehicle::CreateVehicle;
pub use delete_vehicle::DeleteVehicle;
pub use get_all_vehicles::GetAllVehicles;
pub use get_vehicle_by_id::GetVehicleById;
pub use update_vehicle::UpdateVehicle;

use crate::error::CoreError;
use crate::repository::StorageError;
use crate::vehicle;

/// Map a repository error into the domain taxonomy.
///
/// Uniqueness rejections from the store become the same conflict error the
/// guard raises; everything else passes through as an opaque storage fault.
pub(crate) fn storage_to_core(err: StorageError) -> CoreError {
    match err {
        StorageError::UniqueViolation { field, value } => CoreError::UniqueViolation {
            entity: vehicle::ENTITY,
            field,
            value,
        },
        StorageError::Backend(source) => CoreError::Storage(source),
    }
}
