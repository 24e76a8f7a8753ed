use crate::errors::ModelError;

/// Structural checks applied to a value right after it is decoded.
///
/// Serde guarantees the shape; `Validate` covers what the type system does
/// not (empty strings, cross-field constraints, non-finite numbers).
pub trait Validate {
    fn validate(&self) -> Result<(), ModelError>;
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), ModelError> {
        self.iter().try_for_each(Validate::validate)
    }
}

impl Validate for () {
    fn validate(&self) -> Result<(), ModelError> {
        Ok(())
    }
}

impl Validate for serde_json::Value {
    fn validate(&self) -> Result<(), ModelError> {
        Ok(())
    }
}

pub(crate) fn require_non_empty(entity: &str, field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::contract(entity, format!("{field} is empty")));
    }
    Ok(())
}
