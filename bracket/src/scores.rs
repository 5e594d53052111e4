/// Wire types for the live score strip.
/// The bracket engine never reads these; they describe what the ticker polls.
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Deserialize, Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct ScoreStrip {
    #[serde(default)]
    pub games: Vec<LiveGame>,
}

#[derive(Deserialize, Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct LiveGame {
    #[serde(default)]
    pub eid: String,
    pub away: String,
    pub home: String,
    #[serde(default, alias = "awayScore", deserialize_with = "lenient_score")]
    pub away_score: Option<u16>,
    #[serde(default, alias = "homeScore", deserialize_with = "lenient_score")]
    pub home_score: Option<u16>,
    /// Abbreviation of the winner once the game is final.
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub status: String, // "Pending", "Final", "Q3", ...
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub clock: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default, alias = "pos")]
    pub possession: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
}

impl LiveGame {
    /// Kickoff day and time before the game, status and clock after.
    pub fn status_label(&self) -> String {
        if self.status == "Pending" {
            return format!("{} {}", self.day, self.time).trim().to_string();
        }
        match self.clock.as_deref().filter(|c| !c.is_empty()) {
            Some(clock) => format!("{} {clock}", self.status),
            None => self.status.clone(),
        }
    }

    pub fn outcome(&self, abbr: &str) -> Option<Outcome> {
        if abbr != self.home && abbr != self.away {
            return None;
        }
        let winner = self.winner.as_deref()?;
        Some(if winner == abbr { Outcome::Win } else { Outcome::Loss })
    }

    pub fn has_possession(&self, abbr: &str) -> bool {
        self.possession.as_deref() == Some(abbr)
    }
}

/// Scores arrive as numbers, digit strings, or empty strings before kickoff.
fn lenient_score<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
