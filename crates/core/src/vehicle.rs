//! Vehicle entity, payload types, and field-shape validation.
//!
//! Shape rules (exact lengths, year range) are enforced here by plain
//! `validate_*` helpers called from the transport layer before a use case
//! runs. Uniqueness and existence are the use cases' concern, not this
//! module's.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::VehicleId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Entity name carried by every domain error.
pub const ENTITY: &str = "Vehicle";

/// Exact length of a license plate.
pub const PLATE_LEN: usize = 7;

/// Exact length of a chassis number (VIN).
pub const CHASSIS_NUMBER_LEN: usize = 17;

/// Exact length of a national registration number.
pub const REGISTRATION_NUMBER_LEN: usize = 11;

/// Oldest accepted model year.
pub const MIN_YEAR: i32 = 1900;

/// Newest accepted model year: next calendar year, evaluated at call time.
pub fn max_year() -> i32 {
    chrono::Utc::now().year() + 1
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A registered vehicle record.
///
/// `id` is assigned exactly once, by the storage layer, at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub plate: String,
    pub chassis_number: String,
    pub registration_number: String,
    pub model: String,
    pub make: String,
    pub year: i32,
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Payload for registering a new vehicle. The id is never caller-supplied.
#[derive(Debug, Clone, Deserialize)]
pub struct NewVehicle {
    pub plate: String,
    pub chassis_number: String,
    pub registration_number: String,
    pub model: String,
    pub make: String,
    pub year: i32,
}

/// Partial update payload. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleChanges {
    pub plate: Option<String>,
    pub chassis_number: Option<String>,
    pub registration_number: Option<String>,
    pub model: Option<String>,
    pub make: Option<String>,
    pub year: Option<i32>,
}

impl VehicleChanges {
    /// Merge the present fields onto an existing record.
    pub fn apply_to(&self, vehicle: &mut Vehicle) {
        if let Some(plate) = &self.plate {
            vehicle.plate = plate.clone();
        }
        if let Some(chassis_number) = &self.chassis_number {
            vehicle.chassis_number = chassis_number.clone();
        }
        if let Some(registration_number) = &self.registration_number {
            vehicle.registration_number = registration_number.clone();
        }
        if let Some(model) = &self.model {
            vehicle.model = model.clone();
        }
        if let Some(make) = &self.make {
            vehicle.make = make.clone();
        }
        if let Some(year) = self.year {
            vehicle.year = year;
        }
    }
}

// ---------------------------------------------------------------------------
// Unique fields
// ---------------------------------------------------------------------------

/// The three globally-unique vehicle fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UniqueField {
    Plate,
    ChassisNumber,
    RegistrationNumber,
}

impl UniqueField {
    /// Stable snake_case name, also the storage column name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plate => "plate",
            Self::ChassisNumber => "chassis_number",
            Self::RegistrationNumber => "registration_number",
        }
    }

    /// Read this field's current value off a record.
    pub fn value_of<'a>(&self, vehicle: &'a Vehicle) -> &'a str {
        match self {
            Self::Plate => &vehicle.plate,
            Self::ChassisNumber => &vehicle.chassis_number,
            Self::RegistrationNumber => &vehicle.registration_number,
        }
    }

    /// Read this field's value off a registration payload.
    pub fn value_of_new<'a>(&self, input: &'a NewVehicle) -> &'a str {
        match self {
            Self::Plate => &input.plate,
            Self::ChassisNumber => &input.chassis_number,
            Self::RegistrationNumber => &input.registration_number,
        }
    }

    /// Read this field's value off an update payload, when present.
    pub fn value_of_changes<'a>(&self, changes: &'a VehicleChanges) -> Option<&'a str> {
        match self {
            Self::Plate => changes.plate.as_deref(),
            Self::ChassisNumber => changes.chassis_number.as_deref(),
            Self::RegistrationNumber => changes.registration_number.as_deref(),
        }
    }
}

impl std::fmt::Display for UniqueField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Shape validation
// ---------------------------------------------------------------------------

fn check_exact_len(field: &str, value: &str, expected: usize) -> Result<(), CoreError> {
    let len = value.chars().count();
    if len != expected {
        return Err(CoreError::Validation(format!(
            "{field} must be exactly {expected} characters, got {len}"
        )));
    }
    Ok(())
}

fn check_non_empty(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

fn check_year(year: i32) -> Result<(), CoreError> {
    let max = max_year();
    if !(MIN_YEAR..=max).contains(&year) {
        return Err(CoreError::Validation(format!(
            "year must be between {MIN_YEAR} and {max}, got {year}"
        )));
    }
    Ok(())
}

/// Validate the shape of a registration payload.
pub fn validate_new(input: &NewVehicle) -> Result<(), CoreError> {
    check_exact_len("plate", &input.plate, PLATE_LEN)?;
    check_exact_len("chassis_number", &input.chassis_number, CHASSIS_NUMBER_LEN)?;
    check_exact_len(
        "registration_number",
        &input.registration_number,
        REGISTRATION_NUMBER_LEN,
    )?;
    check_non_empty("model", &input.model)?;
    check_non_empty("make", &input.make)?;
    check_year(input.year)?;
    Ok(())
}

/// Validate the shape of the fields present in an update payload.
///
/// Absent fields are not inspected.
pub fn validate_changes(changes: &VehicleChanges) -> Result<(), CoreError> {
    if let Some(plate) = &changes.plate {
        check_exact_len("plate", plate, PLATE_LEN)?;
    }
    if let Some(chassis_number) = &changes.chassis_number {
        check_exact_len("chassis_number", chassis_number, CHASSIS_NUMBER_LEN)?;
    }
    if let Some(registration_number) = &changes.registration_number {
        check_exact_len(
            "registration_number",
            registration_number,
            REGISTRATION_NUMBER_LEN,
        )?;
    }
    if let Some(model) = &changes.model {
        check_non_empty("model", model)?;
    }
    if let Some(make) = &changes.make {
        check_non_empty("make", make)?;
    }
    if let Some(year) = changes.year {
        check_year(year)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn valid_new() -> NewVehicle {
        NewVehicle {
            plate: "ABC1234".into(),
            chassis_number: "12345678901234567".into(),
            registration_number: "12345678901".into(),
            model: "Uno".into(),
            make: "Fiat".into(),
            year: 2022,
        }
    }

    #[test]
    fn valid_payload_passes() {
        assert!(validate_new(&valid_new()).is_ok());
    }

    #[test]
    fn plate_length_enforced() {
        let mut input = valid_new();
        input.plate = "ABC123".into();
        assert_matches!(validate_new(&input), Err(CoreError::Validation(msg)) => {
            assert!(msg.contains("plate"));
        });
    }

    #[test]
    fn chassis_length_enforced() {
        let mut input = valid_new();
        input.chassis_number = "short".into();
        assert_matches!(validate_new(&input), Err(CoreError::Validation(_)));
    }

    #[test]
    fn registration_length_enforced() {
        let mut input = valid_new();
        input.registration_number = "123456789012".into();
        assert_matches!(validate_new(&input), Err(CoreError::Validation(_)));
    }

    #[test]
    fn blank_model_rejected() {
        let mut input = valid_new();
        input.model = "   ".into();
        assert_matches!(validate_new(&input), Err(CoreError::Validation(msg)) => {
            assert!(msg.contains("model"));
        });
    }

    #[test]
    fn year_bounds_enforced() {
        let mut input = valid_new();
        input.year = 1899;
        assert_matches!(validate_new(&input), Err(CoreError::Validation(_)));

        input.year = MIN_YEAR;
        assert!(validate_new(&input).is_ok());

        input.year = max_year();
        assert!(validate_new(&input).is_ok());

        input.year = max_year() + 1;
        assert_matches!(validate_new(&input), Err(CoreError::Validation(_)));
    }

    #[test]
    fn changes_only_validate_present_fields() {
        let changes = VehicleChanges {
            model: Some("Argo".into()),
            ..Default::default()
        };
        assert!(validate_changes(&changes).is_ok());

        let changes = VehicleChanges {
            plate: Some("BAD".into()),
            ..Default::default()
        };
        assert_matches!(validate_changes(&changes), Err(CoreError::Validation(_)));
    }

    #[test]
    fn apply_to_merges_only_present_fields() {
        let mut vehicle = Vehicle {
            id: uuid::Uuid::new_v4(),
            plate: "ABC1234".into(),
            chassis_number: "12345678901234567".into(),
            registration_number: "12345678901".into(),
            model: "Uno".into(),
            make: "Fiat".into(),
            year: 2020,
        };
        let changes = VehicleChanges {
            model: Some("Argo".into()),
            year: Some(2023),
            ..Default::default()
        };
        changes.apply_to(&mut vehicle);
        assert_eq!(vehicle.model, "Argo");
        assert_eq!(vehicle.year, 2023);
        assert_eq!(vehicle.plate, "ABC1234");
    }
}
