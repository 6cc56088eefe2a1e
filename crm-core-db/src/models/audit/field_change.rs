use super::AuditValue;

/// A single field whose stored value differs from the value being submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub field: &'static str,
    pub old_value: AuditValue,
    pub new_value: AuditValue,
}

/// The static table of auditable fields of an entity.
///
/// Each variant maps one API field name to a typed accessor on the entity and
/// on its sparse patch, so diffing never relies on runtime reflection.
pub trait AuditField: Copy + 'static {
    type Entity;
    type Patch;

    /// Every auditable field, in a stable order.
    fn all() -> &'static [Self];

    /// The camelCase name recorded in history entries.
    fn name(&self) -> &'static str;

    /// The value currently stored on the entity.
    fn current(&self, entity: &Self::Entity) -> AuditValue;

    /// The value submitted in the patch, `None` when the field is absent.
    fn proposed(&self, patch: &Self::Patch) -> Option<AuditValue>;
}
