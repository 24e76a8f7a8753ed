use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

const HYPHEN_POSITIONS: [usize; 4] = [8, 13, 18, 23];
const CANONICAL_LEN: usize = 36;

/// Tenant identifier in canonical 8-4-4-4-12 hexadecimal form.
///
/// The caller's spelling is kept (case included) so URLs built from it match
/// what the caller passed in. Braced, URN and unhyphenated UUID spellings are
/// rejected even though they denote valid UUIDs.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantId(String);

impl TenantId {
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        if !is_canonical_uuid(raw) {
            return Err(ModelError::Validation(format!("invalid tenant id {raw:?}: expected canonical UUID")));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_uuid(&self) -> Uuid {
        // canonical form was checked on construction
        Uuid::parse_str(&self.0).unwrap_or_default()
    }
}

/// Case-insensitive check for `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`.
pub fn is_canonical_uuid(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    if bytes.len() != CANONICAL_LEN {
        return false;
    }
    bytes.iter().enumerate().all(|(i, b)| {
        if HYPHEN_POSITIONS.contains(&i) {
            *b == b'-'
        } else {
            b.is_ascii_hexdigit()
        }
    })
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TenantId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TenantId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if !is_canonical_uuid(&value) {
            return Err(ModelError::Validation(format!("invalid tenant id {value:?}: expected canonical UUID")));
        }
        Ok(Self(value))
    }
}

impl From<TenantId> for String {
    fn from(value: TenantId) -> Self {
        value.0
    }
}

impl From<Uuid> for TenantId {
    fn from(value: Uuid) -> Self {
        Self(value.hyphenated().to_string())
    }
}

impl AsRef<str> for TenantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
