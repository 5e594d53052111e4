use crate::controller::Bracket;
use crate::error::{BracketError, BracketResult};
use crate::picks::SavedPicks;
use crate::GAME_COUNT;
use log::debug;

impl Bracket {
    /// Rebuild the bracket from saved picks.
    ///
    /// Games are replayed in order as ordinary picks, so each completed round
    /// builds the next one exactly as it would interactively, and `game_N`
    /// always finds matchup N. Missing games are skipped. Replay stops at the
    /// first pick that has no live matchup or names a team not playing in it;
    /// the rounds rebuilt before that point stay and the tiebreaker is left
    /// alone. On success the tiebreaker is taken from `points`.
    pub fn restore(&mut self, picks: &SavedPicks) -> BracketResult<()> {
        for game in 1..=GAME_COUNT {
            let Some(abbr) = picks.game(game) else {
                continue;
            };
            let Some(matchup) = self.state().matchup(game) else {
                return Err(BracketError::Restore {
                    game,
                    reason: format!("{abbr} picked before the game exists"),
                });
            };
            if !matchup.involves(abbr) {
                return Err(BracketError::Restore {
                    game,
                    reason: format!(
                        "{abbr} does not play in {} v {}",
                        matchup.home.abbr, matchup.away.abbr
                    ),
                });
            }
            self.select_winner(game, abbr);
        }
        self.set_tiebreaker(picks.points);
        debug!("restored {} picks", picks.games.len());
        Ok(())
    }
}
