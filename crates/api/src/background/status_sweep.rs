//! Periodic refresh of persisted event statuses.
//!
//! Reads already re-derive status, but listings filter on the stored column,
//! so the sweep keeps it from drifting: `Upcoming` events whose day has come
//! become `Ongoing`, and past `Ongoing` events become `Completed`.

use std::time::Duration;

use chrono::{FixedOffset, Utc};
use eventhub_core::lifecycle::{next_day_start, resolve_status};
use eventhub_db::repositories::EventRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// Run the status sweep until `cancel` fires.
pub async fn run(pool: PgPool, tz: FixedOffset, every: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = every.as_secs(), "Status sweep started");

    let mut interval = tokio::time::interval(every);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Status sweep stopping");
                break;
            }
            _ = interval.tick() => {
                match sweep_once(&pool, &tz).await {
                    Ok(0) => tracing::debug!("Status sweep: nothing to update"),
                    Ok(updated) => tracing::info!(updated, "Status sweep: statuses refreshed"),
                    Err(e) => tracing::error!(error = %e, "Status sweep failed"),
                }
            }
        }
    }
}

/// Re-resolve every live event that may be stale and persist the changes.
///
/// Returns how many rows changed.
pub async fn sweep_once(pool: &PgPool, tz: &FixedOffset) -> Result<u64, sqlx::Error> {
    let now = Utc::now();
    let candidates = EventRepo::list_status_candidates(pool, next_day_start(now, tz)).await?;

    let mut updated = 0;
    for event in candidates {
        let status = resolve_status(event.date, now, tz);
        if status != event.status && EventRepo::update_status(pool, event.id, status).await? {
            tracing::debug!(event_id = event.id, from = %event.status, to = %status, "Event status changed");
            updated += 1;
        }
    }
    Ok(updated)
}
