use crate::app::MenuItem;
use playoff_bracket::{Bracket, BracketEvent, Matchup, RoundKind, ScoreStrip, SeedingFile, Standing, Team};
use std::sync::mpsc::Receiver;

// ---------------------------------------------------------------------------
// Picks board state
// ---------------------------------------------------------------------------

/// The user's bracket plus where the cursor sits on the board.
///
/// Each round column lists its matchups top to bottom, two rows per matchup:
/// the home team, then the away team.
#[derive(Debug, Default)]
pub struct PicksState {
    pub seeding: Option<SeedingFile>,
    pub bracket: Option<Bracket>,
    pub events: Option<Receiver<BracketEvent>>,
    pub view_round: RoundKind,
    pub selected_row: usize,
    pub points_input: Option<String>,
    /// Picks changed since the last save.
    pub dirty: bool,
    pub status: Option<String>,
}

impl PicksState {
    pub fn load(&mut self, seeding: SeedingFile, mut bracket: Bracket) {
        self.events = Some(bracket.subscribe());
        self.view_round = bracket.state().active_round().unwrap_or(RoundKind::SuperBowl);
        self.selected_row = 0;
        self.points_input = None;
        self.dirty = false;
        self.seeding = Some(seeding);
        self.bracket = Some(bracket);
    }

    pub fn season(&self) -> Option<u16> {
        self.seeding.as_ref().map(|s| s.season)
    }

    pub fn matchups_in_view(&self) -> &[Matchup] {
        self.bracket
            .as_ref()
            .map(|b| b.state().matchups(self.view_round))
            .unwrap_or(&[])
    }

    pub fn navigate_round_next(&mut self) {
        if let Some(next) = self.view_round.next() {
            self.view_round = next;
            self.clamp_row();
        }
    }

    pub fn navigate_round_prev(&mut self) {
        if let Some(prev) = self.view_round.prev() {
            self.view_round = prev;
            self.clamp_row();
        }
    }

    pub fn navigate_row_down(&mut self) {
        let max = (self.matchups_in_view().len() * 2).saturating_sub(1);
        if self.selected_row < max {
            self.selected_row += 1;
        }
    }

    pub fn navigate_row_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    /// The matchup id and team under the cursor.
    pub fn highlighted(&self) -> Option<(u32, &Team)> {
        let matchup = self.matchups_in_view().get(self.selected_row / 2)?;
        let team = if self.selected_row % 2 == 0 { &matchup.home } else { &matchup.away };
        Some((matchup.id, team))
    }

    pub fn clamp_row(&mut self) {
        let rows = self.matchups_in_view().len() * 2;
        self.selected_row = self.selected_row.min(rows.saturating_sub(1));
    }

    /// `"Wild Card 4/4  Divisional 1/4  Conference 0/2  Super Bowl 0/1"`.
    pub fn progress(&self) -> Option<String> {
        let picks = self.bracket.as_ref()?.to_picks();
        let parts: Vec<String> = RoundKind::ALL
            .iter()
            .zip(picks.teams_by_round())
            .map(|(round, games)| {
                let made = games.iter().filter(|g| g.is_some()).count();
                format!("{} {made}/{}", round.label(), games.len())
            })
            .collect();
        Some(parts.join("  "))
    }

    /// Collect pending bracket notifications into a status line.
    pub fn drain_events(&mut self) {
        let Some(events) = &self.events else {
            return;
        };
        let mut notes = Vec::new();
        while let Ok(event) = events.try_recv() {
            match event {
                BracketEvent::RoundsCleared { from, removed } => {
                    notes.push(format!("{removed} picks from the {} on were reset", from.label()));
                }
                BracketEvent::RoundPopulated { round, matchups } => {
                    notes.push(format!("{} set: {} games", round.label(), matchups.len()));
                }
            }
        }
        if !notes.is_empty() {
            self.status = Some(notes.join(", "));
        }
        self.clamp_row();
    }
}

// ---------------------------------------------------------------------------
// Live scores state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ScoresState {
    pub strip: ScoreStrip,
    pub last_updated_at: Option<String>,
    pub scroll_offset: u16,
}

// ---------------------------------------------------------------------------
// Standings state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct StandingsState {
    pub rows: Vec<Standing>,
    pub source_errors: Vec<String>,
    pub results_source: Option<String>,
    pub last_loaded_at: Option<String>,
    pub scroll_offset: u16,
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    pub picks: PicksState,
    pub scores: ScoresState,
    pub standings: StandingsState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> PicksState {
        let seeding = SeedingFile::embedded().unwrap();
        let bracket = Bracket::new(seeding.registry().unwrap());
        let mut picks = PicksState::default();
        picks.load(seeding, bracket);
        picks
    }

    #[test]
    fn cursor_starts_on_the_first_wild_card_home_team() {
        let picks = loaded();
        assert_eq!(picks.view_round, RoundKind::WildCard);
        let (id, team) = picks.highlighted().unwrap();
        assert_eq!((id, team.abbr.as_str()), (1, "DAL"));
    }

    #[test]
    fn rows_alternate_home_and_away() {
        let mut picks = loaded();
        picks.navigate_row_down();
        assert_eq!(picks.highlighted().map(|(id, t)| (id, t.abbr.clone())), Some((1, "DET".into())));
        for _ in 0..20 {
            picks.navigate_row_down();
        }
        assert_eq!(picks.selected_row, 7);
        assert_eq!(picks.highlighted().map(|(id, t)| (id, t.abbr.clone())), Some((4, "CIN".into())));
    }

    #[test]
    fn progress_counts_picks_per_round() {
        let mut picks = loaded();
        assert_eq!(
            picks.progress().as_deref(),
            Some("Wild Card 0/4  Divisional 0/4  Conference 0/2  Super Bowl 0/1")
        );
        let bracket = picks.bracket.as_mut().unwrap();
        for (id, abbr) in [(1, "DAL"), (2, "CAR"), (3, "PIT"), (4, "IND")] {
            assert!(bracket.select_winner(id, abbr));
        }
        assert!(bracket.select_winner(5, "SEA"));
        assert_eq!(
            picks.progress().as_deref(),
            Some("Wild Card 4/4  Divisional 1/4  Conference 0/2  Super Bowl 0/1")
        );
    }

    #[test]
    fn unbuilt_round_has_nothing_highlighted() {
        let mut picks = loaded();
        picks.selected_row = 5;
        picks.navigate_round_next();
        assert_eq!(picks.view_round, RoundKind::Divisional);
        assert_eq!(picks.selected_row, 0);
        assert!(picks.highlighted().is_none());
    }

    #[test]
    fn events_become_a_status_line() {
        let mut picks = loaded();
        let bracket = picks.bracket.as_mut().unwrap();
        for (id, abbr) in [(1, "DAL"), (2, "CAR"), (3, "PIT"), (4, "IND")] {
            assert!(bracket.select_winner(id, abbr));
        }
        picks.drain_events();
        assert_eq!(picks.status.as_deref(), Some("Divisional set: 4 games"));
    }
}
