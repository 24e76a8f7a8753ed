//! Typed client for the Kapok admin API.
//!
//! Every console call goes through [`ApiClient`], which attaches the bearer
//! token from the injected [`service::SessionStore`], tears the session down
//! on any 401, validates tenant identifiers before touching the network, and
//! checks decoded bodies with [`models::Validate`].

pub mod errors;
pub mod paths;
pub mod request;
pub mod client;
mod resources;

pub use client::{ApiClient, LoginRedirect, LOGIN_PATH};
pub use errors::ClientError;
pub use request::ApiRequest;
