//! Wire types shared by the Kapok console client.
//! - Mirrors the JSON shapes of the `/api/v1` admin surface.
//! - Every decoded response implements [`validate::Validate`] so contract
//!   drift is reported instead of silently accepted.

pub mod errors;
pub mod ids;
pub mod validate;
pub mod auth;
pub mod tenant;
pub mod stats;
pub mod metrics;

pub use errors::ModelError;
pub use ids::TenantId;
pub use validate::Validate;
