use crate::state::messages::{NetworkRequest, NetworkResponse};
use log::{debug, error};
use playoff_bracket::{ApiResult, ScoresApi};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

pub struct NetworkWorker {
    client: ScoresApi,
    scores_url: String,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
}

impl NetworkWorker {
    pub fn new(
        scores_url: String,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client: ScoresApi::new(),
            scores_url,
            requests,
            responses,
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            let NetworkRequest::RefreshScores { done } = request;

            let spinner = self.spin();
            let result = self.handle_refresh_scores().await;
            spinner.stop(&self.responses, result.is_ok()).await;
            debug!("score refresh complete");

            let response = result.unwrap_or_else(|err| NetworkResponse::Error {
                message: err.to_string(),
            });
            let sent = self.responses.send(response).await;
            if let Some(done) = done {
                let _ = done.send(());
            }
            if let Err(e) = sent {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_refresh_scores(&self) -> ApiResult<NetworkResponse> {
        debug!("refreshing scores from {}", self.scores_url);
        let strip = self.client.fetch(&self.scores_url).await?;
        Ok(NetworkResponse::ScoresUpdated { strip })
    }

    /// Start cycling the spinner until the returned handle is stopped.
    fn spin(&self) -> Spinner {
        let running = Arc::new(AtomicBool::new(true));
        let responses = self.responses.clone();
        let flag = running.clone();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            for spinner_char in SPINNER_CHARS.iter().copied().cycle() {
                interval.tick().await;
                if !flag.load(Ordering::Relaxed) {
                    break;
                }
                let loading_state = LoadingState { is_loading: true, spinner_char };
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });

        Spinner { running }
    }
}

struct Spinner {
    running: Arc<AtomicBool>,
}

impl Spinner {
    /// Halt the animation and leave a blank, or `ERROR_CHAR` when the request failed.
    async fn stop(self, responses: &mpsc::Sender<NetworkResponse>, is_ok: bool) {
        self.running.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}
