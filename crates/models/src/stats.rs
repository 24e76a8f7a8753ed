use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::validate::Validate;

/// Platform-wide counters from `GET /admin/stats`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformStats {
    pub total_tenants: u64,
    pub active_tenants: u64,
    pub total_storage_bytes: u64,
    pub total_queries_today: u64,
}

impl Validate for PlatformStats {
    fn validate(&self) -> Result<(), ModelError> {
        if self.active_tenants > self.total_tenants {
            return Err(ModelError::contract(
                "platform stats",
                format!("active_tenants {} exceeds total_tenants {}", self.active_tenants, self.total_tenants),
            ));
        }
        Ok(())
    }
}
