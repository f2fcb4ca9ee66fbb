//! Thread-safe in-memory implementation of [`VehicleRepository`].
//!
//! The reference implementation of the storage contract, used by tests and
//! by assemblies that run without a database. Create and update re-validate
//! uniqueness inside their own write-lock critical section, emulating the
//! unique indexes a durable store would enforce: two racing creates with the
//! same plate resolve to exactly one winner.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use crate::repository::{StorageError, VehicleRepository};
use crate::types::VehicleId;
use crate::vehicle::{NewVehicle, UniqueField, Vehicle, VehicleChanges};

/// In-memory vehicle store keyed by id.
#[derive(Clone, Default)]
pub struct MemoryVehicleRepository {
    vehicles: Arc<RwLock<HashMap<VehicleId, Vehicle>>>,
}

impl MemoryVehicleRepository {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Find a record other than `exclude` currently holding `value` in `field`.
fn conflicting<'a>(
    vehicles: &'a HashMap<VehicleId, Vehicle>,
    field: UniqueField,
    value: &str,
    exclude: Option<VehicleId>,
) -> Option<&'a Vehicle> {
    vehicles
        .values()
        .find(|v| field.value_of(v) == value && Some(v.id) != exclude)
}

#[async_trait]
impl VehicleRepository for MemoryVehicleRepository {
    async fn find_all(&self) -> Result<Vec<Vehicle>, StorageError> {
        let vehicles = self.vehicles.read().expect("vehicle store lock poisoned");
        Ok(vehicles.values().cloned().collect())
    }

    async fn find_by_id(&self, id: VehicleId) -> Result<Option<Vehicle>, StorageError> {
        let vehicles = self.vehicles.read().expect("vehicle store lock poisoned");
        Ok(vehicles.get(&id).cloned())
    }

    async fn find_by_field(
        &self,
        field: UniqueField,
        value: &str,
    ) -> Result<Vec<Vehicle>, StorageError> {
        let vehicles = self.vehicles.read().expect("vehicle store lock poisoned");
        Ok(vehicles
            .values()
            .filter(|v| field.value_of(v) == value)
            .cloned()
            .collect())
    }

    async fn create(&self, input: NewVehicle) -> Result<Option<Vehicle>, StorageError> {
        let mut vehicles = self.vehicles.write().expect("vehicle store lock poisoned");

        // Uniqueness is re-checked under the write lock so concurrent
        // creates cannot both pass.
        let candidate = Vehicle {
            id: Uuid::new_v4(),
            plate: input.plate,
            chassis_number: input.chassis_number,
            registration_number: input.registration_number,
            model: input.model,
            make: input.make,
            year: input.year,
        };
        for field in [
            UniqueField::Plate,
            UniqueField::ChassisNumber,
            UniqueField::RegistrationNumber,
        ] {
            let value = field.value_of(&candidate);
            if conflicting(&vehicles, field, value, None).is_some() {
                return Err(StorageError::UniqueViolation {
                    field,
                    value: value.to_string(),
                });
            }
        }

        vehicles.insert(candidate.id, candidate.clone());
        Ok(Some(candidate))
    }

    async fn update(
        &self,
        id: VehicleId,
        changes: VehicleChanges,
    ) -> Result<Option<Vehicle>, StorageError> {
        let mut vehicles = self.vehicles.write().expect("vehicle store lock poisoned");

        if !vehicles.contains_key(&id) {
            return Ok(None);
        }

        // Same critical-section re-check as create; the record itself is
        // never its own conflict.
        for (field, value) in [
            (UniqueField::Plate, changes.plate.as_deref()),
            (UniqueField::ChassisNumber, changes.chassis_number.as_deref()),
            (
                UniqueField::RegistrationNumber,
                changes.registration_number.as_deref(),
            ),
        ] {
            if let Some(value) = value {
                if conflicting(&vehicles, field, value, Some(id)).is_some() {
                    return Err(StorageError::UniqueViolation {
                        field,
                        value: value.to_string(),
                    });
                }
            }
        }

        let vehicle = vehicles.get_mut(&id).expect("checked above");
        changes.apply_to(vehicle);
        Ok(Some(vehicle.clone()))
    }

    async fn delete(&self, id: VehicleId) -> Result<bool, StorageError> {
        let mut vehicles = self.vehicles.write().expect("vehicle store lock poisoned");
        Ok(vehicles.remove(&id).is_some())
    }
}
