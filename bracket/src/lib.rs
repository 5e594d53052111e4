pub mod client;
pub mod controller;
pub mod error;
pub mod ids;
pub mod picks;
pub mod registry;
pub mod reseed;
pub mod restore;
pub mod scores;
pub mod scoring;
pub mod state;

#[cfg(test)]
mod fixtures;

pub use client::{ApiError, ApiResult, ScoresApi};
pub use controller::{Bracket, BracketEvent};
pub use error::{BracketError, BracketResult};
pub use picks::{PickSheet, SavedPicks};
pub use registry::{SeedRegistry, SeedingFile};
pub use scores::{LiveGame, Outcome, ScoreStrip};
pub use scoring::{ScoringRules, Standing};
pub use state::BracketState;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Games in a full bracket: 4 wild card + 4 divisional + 2 conference + 1 final.
pub const GAME_COUNT: u32 = 11;

/// Teams seeded per conference.
pub const SEEDS_PER_CONFERENCE: usize = 6;

// ---------------------------------------------------------------------------
// Domain types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Conference {
    #[serde(rename = "NFC")]
    Nfc,
    #[serde(rename = "AFC")]
    Afc,
}

impl Conference {
    /// Layout order for interleaved rounds: NFC game first, then AFC.
    pub const ALL: [Conference; 2] = [Conference::Nfc, Conference::Afc];

    pub fn abbr(&self) -> &'static str {
        match self {
            Conference::Nfc => "NFC",
            Conference::Afc => "AFC",
        }
    }
}

impl fmt::Display for Conference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbr())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub abbr: String,  // "SEA"
    pub name: String,  // "Seattle Seahawks"
    pub seed: u8,      // 1 (best) ..= 6
    #[serde(alias = "conf")]
    pub conference: Conference,
    #[serde(default)]
    pub record: String, // "12-4"
    #[serde(default, alias = "url")]
    pub logo: Option<String>,
}

impl Team {
    /// "#3 Dallas Cowboys (12-4)"
    pub fn label(&self) -> String {
        if self.record.is_empty() {
            format!("#{} {}", self.seed, self.name)
        } else {
            format!("#{} {} ({})", self.seed, self.name, self.record)
        }
    }
}

/// The four playoff rounds, ordered from earliest to latest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoundKind {
    #[default]
    WildCard,
    Divisional,
    ConferenceChampionship,
    SuperBowl,
}

impl RoundKind {
    pub const ALL: [RoundKind; 4] = [
        RoundKind::WildCard,
        RoundKind::Divisional,
        RoundKind::ConferenceChampionship,
        RoundKind::SuperBowl,
    ];

    pub fn number(&self) -> u8 {
        match self {
            RoundKind::WildCard => 1,
            RoundKind::Divisional => 2,
            RoundKind::ConferenceChampionship => 3,
            RoundKind::SuperBowl => 4,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(RoundKind::WildCard),
            2 => Some(RoundKind::Divisional),
            3 => Some(RoundKind::ConferenceChampionship),
            4 => Some(RoundKind::SuperBowl),
            _ => None,
        }
    }

    /// Zero-based position, used to index per-round storage.
    pub fn index(&self) -> usize {
        usize::from(self.number() - 1)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoundKind::WildCard => "Wild Card",
            RoundKind::Divisional => "Divisional",
            RoundKind::ConferenceChampionship => "Conference",
            RoundKind::SuperBowl => "Super Bowl",
        }
    }

    pub fn prev(self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    /// Matchups a fully built round holds.
    pub fn expected_games(&self) -> usize {
        match self {
            RoundKind::WildCard | RoundKind::Divisional => 4,
            RoundKind::ConferenceChampionship => 2,
            RoundKind::SuperBowl => 1,
        }
    }

    /// Saved-picks game number (`game_N`) of the round's first matchup.
    pub fn first_game(&self) -> u32 {
        match self {
            RoundKind::WildCard => 1,
            RoundKind::Divisional => 5,
            RoundKind::ConferenceChampionship => 9,
            RoundKind::SuperBowl => 11,
        }
    }

    /// Round owning saved-picks game `game` (1-based).
    pub fn of_game(game: u32) -> Option<Self> {
        match game {
            1..=4 => Some(RoundKind::WildCard),
            5..=8 => Some(RoundKind::Divisional),
            9 | 10 => Some(RoundKind::ConferenceChampionship),
            11 => Some(RoundKind::SuperBowl),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matchup {
    pub id: u32,
    pub round: RoundKind,
    pub home: Team, // better seed, or the NFC champion in the final
    pub away: Team,
    pub winner: Option<String>, // abbreviation of the picked team
}

impl Matchup {
    pub fn new(id: u32, round: RoundKind, home: Team, away: Team) -> Self {
        Self { id, round, home, away, winner: None }
    }

    pub fn involves(&self, abbr: &str) -> bool {
        self.home.abbr == abbr || self.away.abbr == abbr
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    pub fn winner(&self) -> Option<&Team> {
        let abbr = self.winner.as_deref()?;
        if self.home.abbr == abbr {
            Some(&self.home)
        } else if self.away.abbr == abbr {
            Some(&self.away)
        } else {
            None
        }
    }

    pub fn loser(&self) -> Option<&Team> {
        let winner = self.winner()?;
        if winner.abbr == self.home.abbr {
            Some(&self.away)
        } else {
            Some(&self.home)
        }
    }
}
