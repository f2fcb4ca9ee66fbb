//! List every registered vehicle.

use std::sync::Arc;

use crate::error::CoreResult;
use crate::repository::VehicleRepository;
use crate::vehicle::Vehicle;

use super::storage_to_core;

/// Returns the repository snapshot verbatim, including the empty case.
pub struct GetAllVehicles {
    repo: Arc<dyn VehicleRepository>,
}

impl GetAllVehicles {
    pub fn new(repo: Arc<dyn VehicleRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> CoreResult<Vec<Vehicle>> {
        self.repo.find_all().await.map_err(storage_to_core)
    }
}
