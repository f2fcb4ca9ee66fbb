//! Apply a partial update to an existing vehicle.

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::repository::VehicleRepository;
use crate::types::VehicleId;
use crate::uniqueness::ensure_unique;
use crate::vehicle::{self, UniqueField, Vehicle, VehicleChanges};

use super::storage_to_core;

/// Updates any subset of a vehicle's mutable fields.
///
/// Only unique fields present in the payload are re-checked; untouched
/// fields never trigger a lookup. A record's own current values are never a
/// conflict with themselves. No event is published on update.
pub struct UpdateVehicle {
    repo: Arc<dyn VehicleRepository>,
}

impl UpdateVehicle {
    pub fn new(repo: Arc<dyn VehicleRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: VehicleId, changes: VehicleChanges) -> CoreResult<Vehicle> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(storage_to_core)?
            .ok_or(CoreError::NotFound {
                entity: vehicle::ENTITY,
                id,
            })?;

        if let Some(plate) = &changes.plate {
            ensure_unique(&*self.repo, UniqueField::Plate, plate, Some(id)).await?;
        }
        if let Some(chassis_number) = &changes.chassis_number {
            ensure_unique(
                &*self.repo,
                UniqueField::ChassisNumber,
                chassis_number,
                Some(id),
            )
            .await?;
        }
        if let Some(registration_number) = &changes.registration_number {
            ensure_unique(
                &*self.repo,
                UniqueField::RegistrationNumber,
                registration_number,
                Some(id),
            )
            .await?;
        }

        // The record can vanish between the existence check and the write;
        // both absences resolve to the same not-found error.
        let updated = self
            .repo
            .update(id, changes)
            .await
            .map_err(storage_to_core)?
            .ok_or(CoreError::NotFound {
                entity: vehicle::ENTITY,
                id,
            })?;

        tracing::info!(vehicle_id = %updated.id, "Vehicle updated");
        Ok(updated)
    }
}
