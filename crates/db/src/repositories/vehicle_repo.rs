//! Durable repository for the `vehicles` table.
//!
//! Uniqueness is ultimately enforced by the `uq_vehicles_*` constraints; a
//! write rejected with PostgreSQL error code 23505 is classified by
//! constraint name and surfaced as [`StorageError::UniqueViolation`], so
//! racing duplicates produce the same conflict the application-level guard
//! raises. Everything else propagates as an opaque backend fault.

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use fleetreg_core::repository::{StorageError, VehicleRepository};
use fleetreg_core::types::VehicleId;
use fleetreg_core::vehicle::{NewVehicle, UniqueField, Vehicle, VehicleChanges};

use crate::DbPool;

/// Column list shared across queries to avoid repetition.
///
/// Excludes `created_at`/`updated_at`, which are storage bookkeeping and do
/// not appear on the domain entity.
const COLUMNS: &str = "id, plate, chassis_number, registration_number, model, make, year";

/// PostgreSQL unique-constraint violation error code.
const PG_UNIQUE_VIOLATION: &str = "23505";

/// A row from the `vehicles` table.
#[derive(Debug, FromRow)]
struct VehicleRow {
    id: Uuid,
    plate: String,
    chassis_number: String,
    registration_number: String,
    model: String,
    make: String,
    year: i32,
}

impl From<VehicleRow> for Vehicle {
    fn from(row: VehicleRow) -> Self {
        Vehicle {
            id: row.id,
            plate: row.plate,
            chassis_number: row.chassis_number,
            registration_number: row.registration_number,
            model: row.model,
            make: row.make,
            year: row.year,
        }
    }
}

/// Map a violated constraint name to the unique field it guards.
fn unique_field_for_constraint(constraint: &str) -> Option<UniqueField> {
    match constraint {
        "uq_vehicles_plate" => Some(UniqueField::Plate),
        "uq_vehicles_chassis_number" => Some(UniqueField::ChassisNumber),
        "uq_vehicles_registration_number" => Some(UniqueField::RegistrationNumber),
        _ => None,
    }
}

/// Extract the unique field behind a 23505 rejection, if that is what this
/// error is.
fn violated_field(err: &sqlx::Error) -> Option<UniqueField> {
    if let sqlx::Error::Database(db_err) = err {
        if db_err.code().as_deref() == Some(PG_UNIQUE_VIOLATION) {
            return db_err.constraint().and_then(unique_field_for_constraint);
        }
    }
    None
}

/// Vehicle storage backed by PostgreSQL.
#[derive(Clone)]
pub struct PgVehicleRepository {
    pool: DbPool,
}

impl PgVehicleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn find_all(&self) -> Result<Vec<Vehicle>, StorageError> {
        let query = format!("SELECT {COLUMNS} FROM vehicles");
        let rows: Vec<VehicleRow> = sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::backend)?;
        Ok(rows.into_iter().map(Vehicle::from).collect())
    }

    async fn find_by_id(&self, id: VehicleId) -> Result<Option<Vehicle>, StorageError> {
        let query = format!("SELECT {COLUMNS} FROM vehicles WHERE id = $1");
        let row: Option<VehicleRow> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::backend)?;
        Ok(row.map(Vehicle::from))
    }

    async fn find_by_field(
        &self,
        field: UniqueField,
        value: &str,
    ) -> Result<Vec<Vehicle>, StorageError> {
        // Column name comes from the closed enum, never from caller input.
        let query = format!("SELECT {COLUMNS} FROM vehicles WHERE {} = $1", field.as_str());
        let rows: Vec<VehicleRow> = sqlx::query_as(&query)
            .bind(value)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::backend)?;
        Ok(rows.into_iter().map(Vehicle::from).collect())
    }

    async fn create(&self, input: NewVehicle) -> Result<Option<Vehicle>, StorageError> {
        let query = format!(
            "INSERT INTO vehicles (plate, chassis_number, registration_number, model, make, year)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let row: Option<VehicleRow> = sqlx::query_as(&query)
            .bind(&input.plate)
            .bind(&input.chassis_number)
            .bind(&input.registration_number)
            .bind(&input.model)
            .bind(&input.make)
            .bind(input.year)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| match violated_field(&e) {
                Some(field) => StorageError::UniqueViolation {
                    field,
                    value: field.value_of_new(&input).to_string(),
                },
                None => StorageError::backend(e),
            })?;
        Ok(row.map(Vehicle::from))
    }

    async fn update(
        &self,
        id: VehicleId,
        changes: VehicleChanges,
    ) -> Result<Option<Vehicle>, StorageError> {
        let query = format!(
            "UPDATE vehicles SET
                plate = COALESCE($2, plate),
                chassis_number = COALESCE($3, chassis_number),
                registration_number = COALESCE($4, registration_number),
                model = COALESCE($5, model),
                make = COALESCE($6, make),
                year = COALESCE($7, year),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row: Option<VehicleRow> = sqlx::query_as(&query)
            .bind(id)
            .bind(&changes.plate)
            .bind(&changes.chassis_number)
            .bind(&changes.registration_number)
            .bind(&changes.model)
            .bind(&changes.make)
            .bind(changes.year)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| match violated_field(&e) {
                Some(field) => StorageError::UniqueViolation {
                    field,
                    value: field
                        .value_of_changes(&changes)
                        .unwrap_or_default()
                        .to_string(),
                },
                None => StorageError::backend(e),
            })?;
        Ok(row.map(Vehicle::from))
    }

    async fn delete(&self, id: VehicleId) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::backend)?;
        Ok(result.rows_affected() > 0)
    }
}
