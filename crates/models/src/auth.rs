use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::validate::{require_non_empty, Validate};

/// Token pair returned by `POST /auth/login`.
///
/// `refresh_token` is persisted with the session but nothing consumes it yet.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}

impl fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthTokens")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

impl Validate for AuthTokens {
    fn validate(&self) -> Result<(), ModelError> {
        require_non_empty("auth tokens", "access_token", &self.access_token)?;
        require_non_empty("auth tokens", "refresh_token", &self.refresh_token)
    }
}

/// Login input
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }

    pub fn check(&self) -> Result<(), ModelError> {
        if self.email.trim().is_empty() {
            return Err(ModelError::Validation("email required".into()));
        }
        if self.password.is_empty() {
            return Err(ModelError::Validation("password required".into()));
        }
        Ok(())
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Result of `GET /auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl Validate for User {
    fn validate(&self) -> Result<(), ModelError> {
        require_non_empty("user", "id", &self.id)?;
        require_non_empty("user", "email", &self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_never_contains_secrets() {
        let tokens = AuthTokens { access_token: "acc-secret".into(), refresh_token: "ref-secret".into() };
        let rendered = format!("{tokens:?}");
        assert!(!rendered.contains("acc-secret"));
        assert!(!rendered.contains("ref-secret"));

        let login = LoginRequest::new("admin@kapok.dev", "hunter2");
        let rendered = format!("{login:?}");
        assert!(rendered.contains("admin@kapok.dev"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn empty_tokens_violate_contract() {
        let tokens = AuthTokens { access_token: "a".into(), refresh_token: "".into() };
        assert!(matches!(tokens.validate(), Err(ModelError::Contract(_))));
    }

    #[test]
    fn login_request_encodes_credentials() -> anyhow::Result<()> {
        let body = serde_json::to_value(LoginRequest::new("ops@kapok.dev", "pw"))?;
        assert_eq!(body, serde_json::json!({"email": "ops@kapok.dev", "password": "pw"}));
        Ok(())
    }

    #[test]
    fn login_request_requires_both_fields() {
        assert!(LoginRequest::new("", "pw").check().is_err());
        assert!(LoginRequest::new("a@b.c", "").check().is_err());
        assert!(LoginRequest::new("a@b.c", "pw").check().is_ok());
    }

    #[test]
    fn user_decodes_and_validates() -> anyhow::Result<()> {
        let user: User = serde_json::from_str(r#"{"id":"u-1","email":"ops@kapok.dev","role":"admin"}"#)?;
        user.validate()?;
        assert_eq!(user.role, "admin");
        Ok(())
    }
}
