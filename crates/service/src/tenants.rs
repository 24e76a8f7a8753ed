//! Client-side narrowing of `GET /admin/tenants` results.
//!
//! The admin API returns every tenant in one response; status filtering and
//! paging for the console happen locally, in backend order.

use models::tenant::{Tenant, TenantStatus};

use crate::pagination::Pagination;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TenantFilter {
    pub status: Option<TenantStatus>,
    pub pagination: Pagination,
}

impl TenantFilter {
    pub fn with_status(mut self, status: TenantStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn apply(&self, tenants: Vec<Tenant>) -> Vec<Tenant> {
        let status = self.status;
        self.pagination
            .apply(tenants.into_iter().filter(|t| status.map_or(true, |s| t.status == s)))
    }
}

/// Sum of `storage_used_bytes` over the given tenants.
pub fn total_storage_bytes(tenants: &[Tenant]) -> u64 {
    tenants.iter().map(|t| t.storage_used_bytes).fold(0u64, u64::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use models::tenant::IsolationLevel;

    fn tenant(name: &str, status: TenantStatus, bytes: u64) -> Tenant {
        Tenant {
            id: uuid::Uuid::new_v4().into(),
            name: name.into(),
            slug: name.to_lowercase(),
            isolation_level: IsolationLevel::Schema,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            storage_used_bytes: bytes,
            last_activity: None,
        }
    }

    fn fixtures() -> Vec<Tenant> {
        vec![
            tenant("a", TenantStatus::Active, 10),
            tenant("b", TenantStatus::Suspended, 20),
            tenant("c", TenantStatus::Active, 30),
            tenant("d", TenantStatus::Deleted, 40),
            tenant("e", TenantStatus::Active, 50),
        ]
    }

    fn names(ts: &[Tenant]) -> Vec<&str> {
        ts.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn default_filter_keeps_everything() {
        let out = TenantFilter::default().apply(fixtures());
        assert_eq!(names(&out), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn status_filter_runs_before_paging() {
        let filter = TenantFilter::default()
            .with_status(TenantStatus::Active)
            .with_pagination(Pagination { offset: 1, limit: 1 });
        let out = filter.apply(fixtures());
        assert_eq!(names(&out), vec!["c"]);
    }

    #[test]
    fn storage_total_saturates() {
        assert_eq!(total_storage_bytes(&fixtures()), 150);
        let huge = vec![tenant("x", TenantStatus::Active, u64::MAX), tenant("y", TenantStatus::Active, 1)];
        assert_eq!(total_storage_bytes(&huge), u64::MAX);
    }
}
