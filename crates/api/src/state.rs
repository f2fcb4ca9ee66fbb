use std::sync::Arc;

use fleetreg_core::publisher::EventPublisher;
use fleetreg_core::repository::VehicleRepository;
use fleetreg_core::usecases::{
    CreateVehicle, DeleteVehicle, GetAllVehicles, GetVehicleById, UpdateVehicle,
};
use fleetreg_db::DbPool;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Holds the five use cases, wired at assembly time over whichever
/// repository and publisher implementations were selected. Cheaply
/// cloneable (everything is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    pub create_vehicle: Arc<CreateVehicle>,
    pub get_all_vehicles: Arc<GetAllVehicles>,
    pub get_vehicle_by_id: Arc<GetVehicleById>,
    pub update_vehicle: Arc<UpdateVehicle>,
    pub delete_vehicle: Arc<DeleteVehicle>,
    /// Present only with the PostgreSQL backend; used by the health probe.
    pub pool: Option<DbPool>,
}

impl AppState {
    /// Wire the use cases over the selected collaborators.
    pub fn new(
        repo: Arc<dyn VehicleRepository>,
        publisher: Arc<dyn EventPublisher>,
        pool: Option<DbPool>,
    ) -> Self {
        Self {
            create_vehicle: Arc::new(CreateVehicle::new(Arc::clone(&repo), publisher)),
            get_all_vehicles: Arc::new(GetAllVehicles::new(Arc::clone(&repo))),
            get_vehicle_by_id: Arc::new(GetVehicleById::new(Arc::clone(&repo))),
            update_vehicle: Arc::new(UpdateVehicle::new(Arc::clone(&repo))),
            delete_vehicle: Arc::new(DeleteVehicle::new(repo)),
            pool,
        }
    }
}
