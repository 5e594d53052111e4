use crate::state::BracketState;
use crate::{GAME_COUNT, RoundKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A user's picks as stored between sessions:
/// `{"game_1": "DAL", …, "game_11": "SEA", "points": 45}`.
///
/// Decoding is forgiving the way a submitted pick form is: `points` may be a
/// number or a digit string (anything else reads as absent), and keys that
/// are neither `game_1..game_11` nor `points` are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Value>", into = "BTreeMap<String, Value>")]
pub struct SavedPicks {
    pub games: BTreeMap<u32, String>, // game number -> team abbreviation
    pub points: Option<u32>,          // tiebreaker guess
}

impl SavedPicks {
    /// Snapshot the winners of every live matchup. Matchup id N is `game_N`.
    pub fn from_state(state: &BracketState) -> Self {
        let games = state
            .iter()
            .filter_map(|m| m.winner.clone().map(|w| (m.id, w)))
            .collect();
        Self { games, points: state.tiebreaker() }
    }

    pub fn game(&self, game: u32) -> Option<&str> {
        self.games.get(&game).map(String::as_str)
    }

    pub fn set_game(&mut self, game: u32, abbr: impl Into<String>) {
        self.games.insert(game, abbr.into());
    }

    /// Picks for games 1 through 11, in order.
    pub fn teams(&self) -> [Option<&str>; GAME_COUNT as usize] {
        std::array::from_fn(|i| self.game(i as u32 + 1))
    }

    pub fn round_picks(&self, round: RoundKind) -> Vec<Option<&str>> {
        let first = round.first_game();
        (first..first + round.expected_games() as u32)
            .map(|game| self.game(game))
            .collect()
    }

    pub fn teams_by_round(&self) -> [Vec<Option<&str>>; 4] {
        RoundKind::ALL.map(|round| self.round_picks(round))
    }

    pub fn is_complete(&self) -> bool {
        (1..=GAME_COUNT).all(|game| self.games.contains_key(&game))
    }
}

impl From<BTreeMap<String, Value>> for SavedPicks {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        let mut picks = SavedPicks::default();
        for (key, value) in raw {
            if key == "points" {
                picks.points = parse_points(&value);
            } else if let Some(game) = parse_game_key(&key)
                && let Some(abbr) = value.as_str().filter(|s| !s.is_empty())
            {
                picks.games.insert(game, abbr.to_string());
            }
        }
        picks
    }
}

impl From<SavedPicks> for BTreeMap<String, Value> {
    fn from(picks: SavedPicks) -> Self {
        let mut raw: BTreeMap<String, Value> = picks
            .games
            .into_iter()
            .map(|(game, abbr)| (format!("game_{game}"), Value::String(abbr)))
            .collect();
        if let Some(points) = picks.points {
            raw.insert("points".into(), Value::from(points));
        }
        raw
    }
}

fn parse_game_key(key: &str) -> Option<u32> {
    let game = key.strip_prefix("game_")?.parse::<u32>().ok()?;
    RoundKind::of_game(game).map(|_| game)
}

fn parse_points(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => s.parse().ok(),
        _ => None,
    }
}

/// The persisted envelope: whose picks, for which season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickSheet {
    pub user_id: String,
    pub season: u16,
    pub picks: SavedPicks,
}
