use crate::models::audit::{AuditField, FieldChange};

/// Returns one change per field that is present in `patch` and differs from
/// the value stored on `entity`. Fields resubmitted with their current value
/// produce nothing.
pub fn compute_changes<F: AuditField>(entity: &F::Entity, patch: &F::Patch) -> Vec<FieldChange> {
    F::all()
        .iter()
        .filter_map(|field| {
            let new_value = field.proposed(patch)?;
            let old_value = field.current(entity);
            (old_value != new_value).then(|| FieldChange {
                field: field.name(),
                old_value,
                new_value,
            })
        })
        .collect()
}
