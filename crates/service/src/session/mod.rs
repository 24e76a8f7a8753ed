//! Session persistence: store abstraction plus memory and file backends.
//!
//! The token pair and the session marker always move together: `set` stores
//! both tokens and raises the marker, `clear` removes all three.

pub mod store;
pub mod memory;
pub mod file;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;
pub use store::{SessionState, SessionStore};
