// src/scheduler.rs
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::brief::DailyBrief;

/// Run the daily brief every `interval`; the first run happens immediately.
/// A failed run is logged and the loop keeps going.
pub fn spawn_brief_scheduler(brief: Arc<DailyBrief>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            match brief.run().await {
                Ok(reports) => {
                    let insights: usize = reports.iter().map(|(_, r)| r.insights).sum();
                    tracing::info!(target: "brief", insights, "scheduled brief tick");
                }
                Err(e) => {
                    tracing::warn!(target: "brief", error = ?e, "scheduled brief failed");
                }
            }
        }
    })
}
