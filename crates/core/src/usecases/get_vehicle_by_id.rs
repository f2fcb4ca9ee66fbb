//! Fetch a single vehicle by id.

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::repository::VehicleRepository;
use crate::types::VehicleId;
use crate::vehicle::{self, Vehicle};

use super::storage_to_core;

pub struct GetVehicleById {
    repo: Arc<dyn VehicleRepository>,
}

impl GetVehicleById {
    pub fn new(repo: Arc<dyn VehicleRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: VehicleId) -> CoreResult<Vehicle> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(storage_to_core)?
            .ok_or(CoreError::NotFound {
                entity: vehicle::ENTITY,
                id,
            })
    }
}
