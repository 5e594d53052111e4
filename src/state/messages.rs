use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use playoff_bracket::ScoreStrip;
use tokio::sync::oneshot;

#[derive(Debug)]
pub enum NetworkRequest {
    /// Poll the score strip. `done` fires once the response has been queued.
    RefreshScores { done: Option<oneshot::Sender<()>> },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    ScoresUpdated { strip: ScoreStrip },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
