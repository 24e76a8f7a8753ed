use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::ids::TenantId;
use crate::validate::{require_non_empty, Validate};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantStatus {
    Active,
    Provisioning,
    Suspended,
    Deleted,
    Migrating,
}

impl TenantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TenantStatus::Active => "active",
            TenantStatus::Provisioning => "provisioning",
            TenantStatus::Suspended => "suspended",
            TenantStatus::Deleted => "deleted",
            TenantStatus::Migrating => "migrating",
        }
    }
}

impl fmt::Display for TenantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TenantStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(TenantStatus::Active),
            "provisioning" => Ok(TenantStatus::Provisioning),
            "suspended" => Ok(TenantStatus::Suspended),
            "deleted" => Ok(TenantStatus::Deleted),
            "migrating" => Ok(TenantStatus::Migrating),
            other => Err(ModelError::Validation(format!("unknown tenant status {other:?}"))),
        }
    }
}

/// How a tenant's data is separated from other tenants.
///
/// Unknown levels reported by the backend are preserved verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IsolationLevel {
    #[default]
    Schema,
    Database,
    Other(String),
}

impl IsolationLevel {
    pub fn as_str(&self) -> &str {
        match self {
            IsolationLevel::Schema => "schema",
            IsolationLevel::Database => "database",
            IsolationLevel::Other(s) => s,
        }
    }
}

impl From<String> for IsolationLevel {
    fn from(value: String) -> Self {
        match value.as_str() {
            "schema" => IsolationLevel::Schema,
            "database" => IsolationLevel::Database,
            _ => IsolationLevel::Other(value),
        }
    }
}

impl From<IsolationLevel> for String {
    fn from(value: IsolationLevel) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for IsolationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IsolationLevel {
    type Err = ModelError;

    /// Only the levels a tenant can be created with parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "schema" => Ok(IsolationLevel::Schema),
            "database" => Ok(IsolationLevel::Database),
            other => Err(ModelError::Validation(format!("unknown isolation level {other:?}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    pub name: String,
    pub slug: String,
    pub isolation_level: IsolationLevel,
    pub status: TenantStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub storage_used_bytes: u64,
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
}

impl Validate for Tenant {
    fn validate(&self) -> Result<(), ModelError> {
        require_non_empty("tenant", "name", &self.name)?;
        require_non_empty("tenant", "slug", &self.slug)?;
        require_non_empty("tenant", "isolation_level", self.isolation_level.as_str())
    }
}

/// Body of `POST /admin/tenants`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTenantRequest {
    pub name: String,
    pub isolation_level: IsolationLevel,
}

impl CreateTenantRequest {
    pub fn new(name: impl Into<String>, isolation_level: IsolationLevel) -> Self {
        Self { name: name.into(), isolation_level }
    }

    pub fn check(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() {
            return Err(ModelError::Validation("tenant name required".into()));
        }
        if let IsolationLevel::Other(level) = &self.isolation_level {
            return Err(ModelError::Validation(format!("unsupported isolation level {level:?}")));
        }
        Ok(())
    }
}
