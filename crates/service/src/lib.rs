//! Session and listing helpers for the Kapok console client.
//! - `session`: where the access/refresh token pair lives between calls.
//! - `storage`: small JSON file persistence used by the file-backed session.
//! - `tenants`: client-side filtering and pagination of tenant listings.

pub mod errors;
pub mod storage;
pub mod session;
pub mod pagination;
pub mod tenants;

pub use errors::SessionError;
pub use session::{FileSessionStore, MemorySessionStore, SessionState, SessionStore};
