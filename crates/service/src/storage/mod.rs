//! Storage abstractions for service layer
//!
//! Contains reusable file-backed stores for small pieces of state persisted
//! as JSON.

pub mod json_value_store;
