//! Fleetreg domain core.
//!
//! Vehicle registry orchestration: the entity and payload types, the closed
//! error taxonomy, the storage and notification capability contracts, the
//! uniqueness guard, the five use cases, and the reference in-memory store.
//! Transport adapters (HTTP, PostgreSQL, event delivery) live in the sibling
//! crates and plug into the traits defined here.

pub mod error;
pub mod memory;
pub mod publisher;
pub mod repository;
pub mod types;
pub mod uniqueness;
pub mod usecases;
pub mod vehicle;

pub use error::{CoreError, CoreResult};
pub use memory::MemoryVehicleRepository;
pub use publisher::{EventPublisher, NoopPublisher, PublishError};
pub use repository::{StorageError, VehicleRepository};
pub use usecases::{CreateVehicle, DeleteVehicle, GetAllVehicles, GetVehicleById, UpdateVehicle};
pub use vehicle::{NewVehicle, UniqueField, Vehicle, VehicleChanges};
