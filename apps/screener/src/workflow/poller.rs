use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::orchestrator::WorkflowOrchestrator;

/// Runs orchestrator ticks every `interval` until `shutdown` turns true or its
/// sender goes away. A tick that has started always runs to completion.
/// Returns the number of ticks run.
pub async fn run_poller(
    mut orchestrator: WorkflowOrchestrator,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> u64 {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut ticks = 0;

    info!("Poller started (interval {}s)", interval.as_secs());

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                ticks += 1;
                debug!("Poll tick {}", ticks);
                orchestrator.run_tick().await;
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    info!("Poller stopped after {} ticks", ticks);
    ticks
}
