use crate::Conference;
use std::fmt;

pub type BracketResult<T> = Result<T, BracketError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BracketError {
    /// Seeding data cannot produce a bracket. Raised once, at initialization.
    Seeding { conference: Option<Conference>, reason: String },
    /// A saved-picks payload does not fit the 11-game layout at replay time.
    Restore { game: u32, reason: String },
    /// Seeding or picks JSON could not be decoded.
    Parse(String),
}

impl BracketError {
    pub(crate) fn seeding(conference: Conference, reason: impl Into<String>) -> Self {
        BracketError::Seeding { conference: Some(conference), reason: reason.into() }
    }
}

impl fmt::Display for BracketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketError::Seeding { conference: Some(conf), reason } => {
                write!(f, "initialization rejected: insufficient {conf} seeding data: {reason}")
            }
            BracketError::Seeding { conference: None, reason } => {
                write!(f, "initialization rejected: insufficient seeding data: {reason}")
            }
            BracketError::Restore { game, reason } => {
                write!(f, "saved picks inconsistent at game_{game}: {reason}")
            }
            BracketError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for BracketError {}

impl From<serde_json::Error> for BracketError {
    fn from(e: serde_json::Error) -> Self {
        BracketError::Parse(e.to_string())
    }
}
