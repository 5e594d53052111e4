use crate::state::messages::NetworkRequest;
use log::debug;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::sleep;

/// Polls the score strip, then sleeps `interval` once the fetch has finished.
/// A slow endpoint stretches the cycle instead of stacking requests.
pub struct PeriodicRefresher {
    network_requests: mpsc::Sender<NetworkRequest>,
    interval: Duration,
}

impl PeriodicRefresher {
    pub fn new(network_requests: mpsc::Sender<NetworkRequest>, interval: Duration) -> Self {
        Self { network_requests, interval }
    }

    pub async fn run(self) {
        loop {
            let (done_tx, done_rx) = oneshot::channel();
            let request = NetworkRequest::RefreshScores { done: Some(done_tx) };
            if self.network_requests.send(request).await.is_err() {
                break;
            }
            // An Err here means the worker dropped the request; sleep anyway.
            let _ = done_rx.await;
            debug!("next score poll in {:?}", self.interval);
            sleep(self.interval).await;
        }
    }
}
