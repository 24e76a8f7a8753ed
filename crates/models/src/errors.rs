use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("contract violation: {0}")]
    Contract(String),
}

impl ModelError {
    pub fn contract(entity: &str, detail: impl std::fmt::Display) -> Self {
        Self::Contract(format!("{entity}: {detail}"))
    }
}
