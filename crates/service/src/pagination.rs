//! Pagination utilities for tenant listings
//!
//! Provides a simple offset/limit `Pagination` struct and helpers to normalize inputs.

pub const DEFAULT_LIMIT: usize = 100;
pub const MAX_LIMIT: usize = 1000;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// items to skip
    pub offset: usize,
    /// maximum items returned
    pub limit: usize,
}

impl Pagination {
    /// Clamp `limit` into `1..=MAX_LIMIT`
    pub fn normalize(self) -> (usize, usize) {
        (self.offset, self.limit.clamp(1, MAX_LIMIT))
    }

    pub fn apply<T>(self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let (offset, limit) = self.normalize();
        items.into_iter().skip(offset).take(limit).collect()
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { offset: 0, limit: DEFAULT_LIMIT } }
}
