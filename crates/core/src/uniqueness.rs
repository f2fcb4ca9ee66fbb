//! Uniqueness guard shared by the create and update use cases.

use crate::error::{CoreError, CoreResult};
use crate::repository::VehicleRepository;
use crate::types::VehicleId;
use crate::vehicle::{self, UniqueField};

/// Check that `value` is free to use for `field`.
///
/// Succeeds when no record holds the value, or when every holder is the
/// record identified by `exclude` (the update path comparing a record
/// against itself). Any other holder is a conflict.
///
/// Create passes `exclude = None`; update passes the id of the record being
/// updated.
pub async fn ensure_unique(
    repo: &dyn VehicleRepository,
    field: UniqueField,
    value: &str,
    exclude: Option<VehicleId>,
) -> CoreResult<()> {
    let matches = repo
        .find_by_field(field, value)
        .await
        .map_err(crate::usecases::storage_to_core)?;

    let taken_by_other = matches.iter().any(|v| Some(v.id) != exclude);
    if taken_by_other {
        return Err(CoreError::UniqueViolation {
            entity: vehicle::ENTITY,
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
