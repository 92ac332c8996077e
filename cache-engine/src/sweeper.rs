use crate::ResponseCache;
use crate::tier::TierKind;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Owns the background expiry tasks; dropping it without calling
/// [`SweepHandle::shutdown`] leaves the tasks running until the runtime stops.
pub struct SweepHandle {
    token: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl SweepHandle {
    pub(crate) fn spawn(cache: Arc<ResponseCache>) -> Self {
        let token = CancellationToken::new();
        let tasks = TierKind::ALL
            .into_iter()
            .map(|kind| tokio::spawn(sweep_loop(cache.clone(), kind, token.clone())))
            .collect();

        Self { token, tasks }
    }

    pub fn is_running(&self) -> bool {
        self.tasks.iter().any(|task| !task.is_finished())
    }

    /// Cancel every sweeper and wait for them to exit.
    pub async fn shutdown(self) {
        self.token.cancel();
        for task in self.tasks {
            let _ = task.await;
        }
        info!("Response cache sweepers stopped");
    }
}

async fn sweep_loop(cache: Arc<ResponseCache>, kind: TierKind, token: CancellationToken) {
    let period = kind.sweep_interval();
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = ticker.tick() => {
                let purged = cache.tier(kind).purge_expired(Instant::now());
                if purged > 0 {
                    debug!(tier = kind.as_str(), purged, "Swept expired cache entries");
                }
            }
        }
    }
}
