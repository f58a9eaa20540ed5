use chrono::{DateTime, Duration, Utc};

use crate::storage::traits::PanelFeedRepository;

pub const RETENTION_DAYS: i64 = 14;

/// What happened during cleanup. Never turned into an invocation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupReport {
    Pruned(u64),
    Failed(String),
}

/// Best-effort removal of records outside the retention window.
pub struct RetentionPruner<'a, R: PanelFeedRepository> {
    repository: &'a R,
    retention: Duration,
}

impl<'a, R: PanelFeedRepository> RetentionPruner<'a, R> {
    pub fn new(repository: &'a R) -> Self {
        Self {
            repository,
            retention: Duration::days(RETENTION_DAYS),
        }
    }

    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.retention
    }

    pub fn prune(&self) -> CleanupReport {
        self.prune_at(Utc::now())
    }

    pub fn prune_at(&self, now: DateTime<Utc>) -> CleanupReport {
        let cutoff = self.cutoff(now);

        match self.repository.delete_collected_before(cutoff) {
            Ok(0) => {
                tracing::info!("No old records to clean up");
                CleanupReport::Pruned(0)
            }
            Ok(deleted) => {
                tracing::info!(
                    deleted,
                    retention_days = RETENTION_DAYS,
                    "Cleaned up old records"
                );
                CleanupReport::Pruned(deleted)
            }
            Err(e) => {
                tracing::error!(error = %e, "Cleanup error");
                CleanupReport::Failed(e.to_string())
            }
        }
    }
}
