//! Remove a vehicle record.

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::repository::VehicleRepository;
use crate::types::VehicleId;
use crate::vehicle;

use super::storage_to_core;

/// Deletes a record outright; deleting an absent id is a defined,
/// recoverable not-found error, not a crash.
pub struct DeleteVehicle {
    repo: Arc<dyn VehicleRepository>,
}

impl DeleteVehicle {
    pub fn new(repo: Arc<dyn VehicleRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: VehicleId) -> CoreResult<()> {
        let removed = self.repo.delete(id).await.map_err(storage_to_core)?;
        if !removed {
            return Err(CoreError::NotFound {
                entity: vehicle::ENTITY,
                id,
            });
        }
        tracing::info!(vehicle_id = %id, "Vehicle deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryVehicleRepository;
    use crate::vehicle::NewVehicle;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn deletes_an_existing_record() {
        let repo = Arc::new(MemoryVehicleRepository::new());
        let vehicle = repo
            .create(NewVehicle {
                plate: "ABC1234".into(),
                chassis_number: "12345678901234567".into(),
                registration_number: "12345678901".into(),
                model: "Uno".into(),
                make: "Fiat".into(),
                year: 2022,
            })
            .await
            .unwrap()
            .unwrap();

        let usecase = DeleteVehicle::new(repo.clone());
        usecase.execute(vehicle.id).await.unwrap();
        assert_eq!(repo.find_by_id(vehicle.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn missing_id_is_not_found_and_mutates_nothing() {
        let repo = Arc::new(MemoryVehicleRepository::new());
        repo.create(NewVehicle {
            plate: "ABC1234".into(),
            chassis_number: "12345678901234567".into(),
            registration_number: "12345678901".into(),
            model: "Uno".into(),
            make: "Fiat".into(),
            year: 2022,
        })
        .await
        .unwrap();

        let usecase = DeleteVehicle::new(repo.clone());
        let err = usecase.execute(uuid::Uuid::new_v4()).await.unwrap_err();
        assert_matches!(err, CoreError::NotFound { entity: "Vehicle", .. });
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }
}
