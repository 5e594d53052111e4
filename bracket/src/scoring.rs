use crate::picks::{PickSheet, SavedPicks};
use crate::GAME_COUNT;

/// Points per correctly picked game, indexed by game number - 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringRules {
    pub weights: [u32; GAME_COUNT as usize],
}

impl Default for ScoringRules {
    /// One point per wild card and divisional game, two per conference
    /// championship, four for the Super Bowl.
    fn default() -> Self {
        Self { weights: [1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 4] }
    }
}

impl ScoringRules {
    pub fn weight(&self, game: u32) -> u32 {
        game.checked_sub(1)
            .and_then(|i| self.weights.get(i as usize))
            .copied()
            .unwrap_or(0)
    }

    pub fn max_points(&self) -> u32 {
        self.weights.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameScore {
    pub game: u32,
    pub pick: Option<String>,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickScore {
    pub points: u32,
    pub correct: u32,
    /// Minus the distance between tiebreaker guesses. 0 is a perfect guess.
    pub delta: i64,
    pub games: Vec<GameScore>,
}

/// Score `entry` against the official `results` sheet.
///
/// A game counts only when both sheets name the same team, so games the
/// results sheet has not decided yet score nothing. Missing tiebreaker
/// points count as 0.
pub fn score(rules: &ScoringRules, results: &SavedPicks, entry: &SavedPicks) -> PickScore {
    let mut points = 0;
    let mut correct = 0;
    let games = (1..=GAME_COUNT)
        .map(|game| {
            let pick = entry.game(game);
            let hit = pick.is_some() && pick == results.game(game);
            let earned = if hit { rules.weight(game) } else { 0 };
            if hit {
                points += earned;
                correct += 1;
            }
            GameScore { game, pick: pick.map(str::to_string), points: earned }
        })
        .collect();

    let actual = i64::from(results.points.unwrap_or(0));
    let guess = i64::from(entry.points.unwrap_or(0));
    PickScore { points, correct, delta: -(actual - guess).abs(), games }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub user_id: String,
    pub score: PickScore,
}

/// Rank pick sheets: most points first, then the closest tiebreaker guess,
/// then user id.
pub fn standings(rules: &ScoringRules, results: &SavedPicks, entries: &[PickSheet]) -> Vec<Standing> {
    let mut rows: Vec<Standing> = entries
        .iter()
        .map(|sheet| Standing {
            user_id: sheet.user_id.clone(),
            score: score(rules, results, &sheet.picks),
        })
        .collect();
    rows.sort_by(|a, b| {
        b.score
            .points
            .cmp(&a.score.points)
            .then_with(|| b.score.delta.cmp(&a.score.delta))
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(user_id: &str, games: &[(u32, &str)], points: Option<u32>) -> PickSheet {
        let mut picks = SavedPicks::default();
        for (game, abbr) in games {
            picks.set_game(*game, *abbr);
        }
        picks.points = points;
        PickSheet { user_id: user_id.into(), season: 2014, picks }
    }

    #[test]
    fn default_weights_favor_later_rounds() {
        let rules = ScoringRules::default();
        assert_eq!(rules.weight(1), 1);
        assert_eq!(rules.weight(9), 2);
        assert_eq!(rules.weight(11), 4);
        assert_eq!(rules.weight(0), 0);
        assert_eq!(rules.weight(12), 0);
        assert_eq!(rules.max_points(), 16);
    }

    #[test]
    fn only_matching_picks_score() {
        let results = sheet("admin", &[(1, "DAL"), (2, "CAR"), (9, "SEA"), (11, "NE")], Some(52)).picks;
        let entry = sheet("fan", &[(1, "DAL"), (2, "ARI"), (9, "SEA"), (10, "NE"), (11, "NE")], Some(45)).picks;

        let s = score(&ScoringRules::default(), &results, &entry);
        assert_eq!(s.points, 1 + 2 + 4);
        assert_eq!(s.correct, 3);
        assert_eq!(s.delta, -7);
        assert_eq!(s.games[1], GameScore { game: 2, pick: Some("ARI".into()), points: 0 });
        assert_eq!(s.games[9].points, 0, "undecided game scores nothing");
    }

    #[test]
    fn standings_break_ties_on_tiebreaker_distance() {
        let results = sheet("admin", &[(1, "DAL"), (11, "NE")], Some(52)).picks;
        let entries = vec![
            sheet("carol", &[(1, "DAL")], Some(52)),
            sheet("bob", &[(1, "DAL"), (11, "NE")], Some(40)),
            sheet("alice", &[(1, "DAL"), (11, "NE")], Some(50)),
            sheet("dave", &[(1, "DAL"), (11, "NE")], None),
        ];
        let rows = standings(&ScoringRules::default(), &results, &entries);
        let order: Vec<&str> = rows
            .iter()
            .map(|row| row.user_id.as_str())
            .collect();
        assert_eq!(order, vec!["alice", "bob", "dave", "carol"]);
    }
}
