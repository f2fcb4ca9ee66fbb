//! Register a new vehicle.

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::publisher::EventPublisher;
use crate::repository::VehicleRepository;
use crate::uniqueness::ensure_unique;
use crate::vehicle::{self, NewVehicle, UniqueField, Vehicle};

use super::storage_to_core;

/// Creates a vehicle record and announces it.
///
/// Check order is fixed: plate, then registration number, then chassis
/// number, short-circuiting on the first conflict, since callers rely on
/// receiving the first violated constraint, not all of them. The creation
/// event is published only after the record is durably persisted; a publish
/// failure propagates without rolling the record back.
pub struct CreateVehicle {
    repo: Arc<dyn VehicleRepository>,
    publisher: Arc<dyn EventPublisher>,
}

impl CreateVehicle {
    pub fn new(repo: Arc<dyn VehicleRepository>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self { repo, publisher }
    }

    pub async fn execute(&self, input: NewVehicle) -> CoreResult<Vehicle> {
        ensure_unique(&*self.repo, UniqueField::Plate, &input.plate, None).await?;
        ensure_unique(
            &*self.repo,
            UniqueField::RegistrationNumber,
            &input.registration_number,
            None,
        )
        .await?;
        ensure_unique(
            &*self.repo,
            UniqueField::ChassisNumber,
            &input.chassis_number,
            None,
        )
        .await?;

        let vehicle = self
            .repo
            .create(input)
            .await
            .map_err(storage_to_core)?
            .ok_or(CoreError::CreationFailed {
                entity: vehicle::ENTITY,
            })?;

        self.publisher
            .publish_vehicle_created(&vehicle)
            .await
            .map_err(|e| CoreError::Publish(e.0))?;

        tracing::info!(vehicle_id = %vehicle.id, plate = %vehicle.plate, "Vehicle registered");
        Ok(vehicle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryVehicleRepository;
    use crate::publisher::PublishError;
    use crate::repository::StorageError;
    use crate::vehicle::VehicleChanges;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Publisher spy that records every event it receives.
    #[derive(Default)]
    struct RecordingPublisher {
        published: Mutex<Vec<Vehicle>>,
    }

    #[async_trait]
    impl EventPublisher for RecordingPublisher {
        async fn publish_vehicle_created(&self, vehicle: &Vehicle) -> Result<(), PublishError> {
            self.published.lock().unwrap().push(vehicle.clone());
            Ok(())
        }
    }

    /// Publisher that always fails.
    struct FailingPublisher;

    #[async_trait]
    impl EventPublisher for FailingPublisher {
        async fn publish_vehicle_created(&self, _vehicle: &Vehicle) -> Result<(), PublishError> {
            Err(PublishError::new("broker unreachable"))
        }
    }

    /// Repository stub whose create yields no record and no error.
    struct VanishingRepository(MemoryVehicleRepository);

    #[async_trait]
    impl VehicleRepository for VanishingRepository {
        async fn find_all(&self) -> Result<Vec<Vehicle>, StorageError> {
            self.0.find_all().await
        }
        async fn find_by_id(
            &self,
            id: crate::types::VehicleId,
        ) -> Result<Option<Vehicle>, StorageError> {
            self.0.find_by_id(id).await
        }
        async fn find_by_field(
            &self,
            field: UniqueField,
            value: &str,
        ) -> Result<Vec<Vehicle>, StorageError> {
            self.0.find_by_field(field, value).await
        }
        async fn create(&self, _input: NewVehicle) -> Result<Option<Vehicle>, StorageError> {
            Ok(None)
        }
        async fn update(
            &self,
            id: crate::types::VehicleId,
            changes: VehicleChanges,
        ) -> Result<Option<Vehicle>, StorageError> {
            self.0.update(id, changes).await
        }
        async fn delete(&self, id: crate::types::VehicleId) -> Result<bool, StorageError> {
            self.0.delete(id).await
        }
    }

    /// Repository stub that rejects every create at write time, the way a
    /// unique index does when a racing insert won.
    struct RacingRepository(MemoryVehicleRepository);

    #[async_trait]
    impl VehicleRepository for RacingRepository {
        async fn find_all(&self) -> Result<Vec<Vehicle>, StorageError> {
            self.0.find_all().await
        }
        async fn find_by_id(
            &self,
            id: crate::types::VehicleId,
        ) -> Result<Option<Vehicle>, StorageError> {
            self.0.find_by_id(id).await
        }
        async fn find_by_field(
            &self,
            _field: UniqueField,
            _value: &str,
        ) -> Result<Vec<Vehicle>, StorageError> {
            // The racing writer has not committed yet when the guard looks.
            Ok(Vec::new())
        }
        async fn create(&self, input: NewVehicle) -> Result<Option<Vehicle>, StorageError> {
            Err(StorageError::UniqueViolation {
                field: UniqueField::Plate,
                value: input.plate,
            })
        }
        async fn update(
            &self,
            id: crate::types::VehicleId,
            changes: VehicleChanges,
        ) -> Result<Option<Vehicle>, StorageError> {
            self.0.update(id, changes).await
        }
        async fn delete(&self, id: crate::types::VehicleId) -> Result<bool, StorageError> {
            self.0.delete(id).await
        }
    }

    fn payload(plate: &str, chassis: &str, registration: &str) -> NewVehicle {
        NewVehicle {
            plate: plate.into(),
            chassis_number: chassis.into(),
            registration_number: registration.into(),
            model: "Uno".into(),
            make: "Fiat".into(),
            year: 2022,
        }
    }

    #[tokio::test]
    async fn creates_and_returns_persisted_record() {
        let repo = Arc::new(MemoryVehicleRepository::new());
        let publisher = Arc::new(RecordingPublisher::default());
        let usecase = CreateVehicle::new(repo.clone(), publisher.clone());

        let vehicle = usecase
            .execute(payload("ABC1234", "12345678901234567", "12345678901"))
            .await
            .unwrap();

        assert!(!vehicle.id.is_nil());
        assert_eq!(repo.find_by_id(vehicle.id).await.unwrap(), Some(vehicle));
    }

    #[tokio::test]
    async fn duplicate_plate_conflicts_and_writes_nothing() {
        let repo = Arc::new(MemoryVehicleRepository::new());
        let publisher = Arc::new(RecordingPublisher::default());
        let usecase = CreateVehicle::new(repo.clone(), publisher.clone());

        usecase
            .execute(payload("ABC1234", "12345678901234567", "12345678901"))
            .await
            .unwrap();

        let err = usecase
            .execute(payload("ABC1234", "76543210987654321", "10987654321"))
            .await
            .unwrap_err();

        assert_matches!(
            err,
            CoreError::UniqueViolation {
                entity: "Vehicle",
                field: UniqueField::Plate,
                value,
            } => assert_eq!(value, "ABC1234")
        );
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
        assert_eq!(publisher.published.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_chassis_and_registration_conflict() {
        let repo = Arc::new(MemoryVehicleRepository::new());
        let publisher = Arc::new(RecordingPublisher::default());
        let usecase = CreateVehicle::new(repo, publisher);

        usecase
            .execute(payload("AAA1111", "12345678901234567", "12345678901"))
            .await
            .unwrap();

        let err = usecase
            .execute(payload("BBB2222", "12345678901234567", "10987654321"))
            .await
            .unwrap_err();
        assert_matches!(
            err,
            CoreError::UniqueViolation {
                field: UniqueField::ChassisNumber,
                ..
            }
        );

        let err = usecase
            .execute(payload("CCC3333", "76543210987654321", "12345678901"))
            .await
            .unwrap_err();
        assert_matches!(
            err,
            CoreError::UniqueViolation {
                field: UniqueField::RegistrationNumber,
                ..
            }
        );
    }

    #[tokio::test]
    async fn plate_conflict_reported_first_when_several_violated() {
        let repo = Arc::new(MemoryVehicleRepository::new());
        let publisher = Arc::new(RecordingPublisher::default());
        let usecase = CreateVehicle::new(repo, publisher);

        usecase
            .execute(payload("ABC1234", "12345678901234567", "12345678901"))
            .await
            .unwrap();

        // Violates both plate and registration number; plate is checked
        // first and must be the one reported.
        let err = usecase
            .execute(payload("ABC1234", "76543210987654321", "12345678901"))
            .await
            .unwrap_err();
        assert_matches!(
            err,
            CoreError::UniqueViolation {
                field: UniqueField::Plate,
                ..
            }
        );
    }

    #[tokio::test]
    async fn publishes_exactly_once_with_persisted_payload() {
        let repo = Arc::new(MemoryVehicleRepository::new());
        let publisher = Arc::new(RecordingPublisher::default());
        let usecase = CreateVehicle::new(repo, publisher.clone());

        let vehicle = usecase
            .execute(payload("ABC1234", "12345678901234567", "12345678901"))
            .await
            .unwrap();

        let published = publisher.published.lock().unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0], vehicle);
    }

    #[tokio::test]
    async fn publish_failure_surfaces_but_record_stays() {
        let repo = Arc::new(MemoryVehicleRepository::new());
        let usecase = CreateVehicle::new(repo.clone(), Arc::new(FailingPublisher));

        let err = usecase
            .execute(payload("ABC1234", "12345678901234567", "12345678901"))
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::Publish(_));

        // Not rolled back: the record is retrievable afterwards.
        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].plate, "ABC1234");
    }

    #[tokio::test]
    async fn create_yielding_no_record_is_a_creation_failure() {
        let repo = Arc::new(VanishingRepository(MemoryVehicleRepository::new()));
        let publisher = Arc::new(RecordingPublisher::default());
        let usecase = CreateVehicle::new(repo, publisher.clone());

        let err = usecase
            .execute(payload("ABC1234", "12345678901234567", "12345678901"))
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::CreationFailed { entity: "Vehicle" });
        assert!(publisher.published.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn storage_level_rejection_translates_to_unique_violation() {
        let repo = Arc::new(RacingRepository(MemoryVehicleRepository::new()));
        let publisher = Arc::new(RecordingPublisher::default());
        let usecase = CreateVehicle::new(repo, publisher);

        let err = usecase
            .execute(payload("ABC1234", "12345678901234567", "12345678901"))
            .await
            .unwrap_err();
        assert_matches!(
            err,
            CoreError::UniqueViolation {
                entity: "Vehicle",
                field: UniqueField::Plate,
                ..
            }
        );
    }

    #[tokio::test]
    async fn concurrent_creates_with_same_plate_have_one_winner() {
        let repo = Arc::new(MemoryVehicleRepository::new());
        let publisher = Arc::new(RecordingPublisher::default());
        let usecase = Arc::new(CreateVehicle::new(repo, publisher));

        let a = {
            let usecase = Arc::clone(&usecase);
            tokio::spawn(async move {
                usecase
                    .execute(payload("ABC1234", "11111111111111111", "11111111111"))
                    .await
            })
        };
        let b = {
            let usecase = Arc::clone(&usecase);
            tokio::spawn(async move {
                usecase
                    .execute(payload("ABC1234", "22222222222222222", "22222222222"))
                    .await
            })
        };

        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1, "exactly one of two racing creates may win");

        let loser = if a.is_ok() { b } else { a };
        assert_matches!(
            loser.unwrap_err(),
            CoreError::UniqueViolation {
                field: UniqueField::Plate,
                ..
            }
        );
    }
}
