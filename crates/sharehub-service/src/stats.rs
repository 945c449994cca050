//! Dashboard statistics aggregation.

use std::sync::Arc;

use sharehub_auth::policy;
use sharehub_core::result::AppResult;
use sharehub_entity::store::{ShareStore, UserStore};

use crate::context::RequestContext;

/// Aggregate counters shown on the administrative dashboard.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct DashboardStats {
    /// Registered user count.
    pub total_users: u64,
    /// Share record count.
    pub total_files: u64,
    /// Sum of all download counters.
    pub total_downloads: u64,
    /// Total stored bytes across all records.
    pub storage_used_bytes: u64,
}

/// Computes administrative dashboard statistics.
#[derive(Debug, Clone)]
pub struct StatsService {
    shares: Arc<dyn ShareStore>,
    users: Arc<dyn UserStore>,
}

impl StatsService {
    /// Creates a new stats service.
    pub fn new(shares: Arc<dyn ShareStore>, users: Arc<dyn UserStore>) -> Self {
        Self { shares, users }
    }

    /// Returns dashboard totals (administrative).
    pub async fn dashboard(&self, ctx: &RequestContext) -> AppResult<DashboardStats> {
        policy::require_admin(ctx.identity())?;

        let totals = self.shares.totals().await?;
        let total_users = self.users.count().await?;

        Ok(DashboardStats {
            total_users,
            total_files: totals.total_files,
            total_downloads: totals.total_downloads,
            storage_used_bytes: totals.total_bytes,
        })
    }
}
