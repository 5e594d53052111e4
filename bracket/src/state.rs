use crate::{Matchup, RoundKind, Team};

/// Every matchup of the bracket, by round, plus the tiebreaker guess.
///
/// Round N+1 only holds matchups while every round-N matchup has a winner;
/// [`crate::Bracket`] keeps that true by clearing and rebuilding later rounds
/// whenever an earlier pick changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BracketState {
    rounds: [Vec<Matchup>; 4],
    tiebreaker: Option<u32>,
}

impl BracketState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matchups(&self, round: RoundKind) -> &[Matchup] {
        &self.rounds[round.index()]
    }

    pub fn matchup(&self, id: u32) -> Option<&Matchup> {
        self.iter().find(|m| m.id == id)
    }

    /// All live matchups in creation order, which is also id order.
    pub fn iter(&self) -> impl Iterator<Item = &Matchup> {
        self.rounds.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.rounds.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn push(&mut self, matchup: Matchup) {
        self.rounds[matchup.round.index()].push(matchup);
    }

    pub fn decided_count(&self, round: RoundKind) -> usize {
        self.matchups(round).iter().filter(|m| m.is_decided()).count()
    }

    /// A built round whose every matchup has a winner. Unbuilt rounds are never complete.
    pub fn is_round_complete(&self, round: RoundKind) -> bool {
        let games = self.matchups(round);
        !games.is_empty() && games.iter().all(Matchup::is_decided)
    }

    /// Lowest built round still waiting on picks. `None` when nothing is
    /// built or the Super Bowl has been picked.
    pub fn active_round(&self) -> Option<RoundKind> {
        RoundKind::ALL
            .into_iter()
            .take_while(|r| !self.matchups(*r).is_empty())
            .find(|r| !self.is_round_complete(*r))
    }

    /// Set the winner of a live matchup.
    ///
    /// Ignored (returns `false`) when `id` is not live, when its round lies
    /// past the active round, or when `abbr` is not one of its two teams.
    /// Earlier, already decided rounds may be revised.
    pub fn record_winner(&mut self, id: u32, abbr: &str) -> bool {
        let active = self.active_round();
        let Some(matchup) = self.rounds.iter_mut().flatten().find(|m| m.id == id) else {
            return false;
        };
        if active.is_some_and(|active| matchup.round > active) || !matchup.involves(abbr) {
            return false;
        }
        matchup.winner = Some(abbr.to_string());
        true
    }

    /// Remove `round` and every later round. Returns how many matchups went.
    pub fn clear_from(&mut self, round: RoundKind) -> usize {
        self.rounds[round.index()..]
            .iter_mut()
            .map(|games| {
                let removed = games.len();
                games.clear();
                removed
            })
            .sum()
    }

    pub fn champion(&self) -> Option<&Team> {
        self.matchups(RoundKind::SuperBowl).first()?.winner()
    }

    pub fn tiebreaker(&self) -> Option<u32> {
        self.tiebreaker
    }

    pub fn set_tiebreaker(&mut self, points: Option<u32>) {
        self.tiebreaker = points;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Conference::Nfc;
    use crate::fixtures::team;

    fn game(id: u32, round: RoundKind, home: &str, away: &str) -> Matchup {
        Matchup::new(id, round, team(home, 1, Nfc), team(away, 6, Nfc))
    }

    fn two_round_state() -> BracketState {
        let mut state = BracketState::new();
        state.push(game(1, RoundKind::WildCard, "N3", "N6"));
        state.push(game(2, RoundKind::WildCard, "N4", "N5"));
        state
    }

    #[test]
    fn round_completeness_tracks_winners() {
        let mut state = two_round_state();
        assert!(!state.is_round_complete(RoundKind::WildCard));
        assert!(!state.is_round_complete(RoundKind::Divisional), "unbuilt round is not complete");

        assert!(state.record_winner(1, "N6"));
        assert_eq!(state.decided_count(RoundKind::WildCard), 1);
        assert!(state.record_winner(2, "N4"));
        assert!(state.is_round_complete(RoundKind::WildCard));
    }

    #[test]
    fn winner_must_play_in_the_matchup() {
        let mut state = two_round_state();
        assert!(!state.record_winner(1, "N4"));
        assert!(!state.record_winner(99, "N3"));
        assert_eq!(state.decided_count(RoundKind::WildCard), 0);
    }

    #[test]
    fn picks_past_the_active_round_are_ignored() {
        let mut state = two_round_state();
        // Not reachable through Bracket, but the guard must hold on its own.
        state.push(game(3, RoundKind::Divisional, "N1", "N4"));
        assert_eq!(state.active_round(), Some(RoundKind::WildCard));
        assert!(!state.record_winner(3, "N1"));
        assert!(state.matchup(3).unwrap().winner.is_none());
    }

    #[test]
    fn clear_from_counts_every_later_round() {
        let mut state = two_round_state();
        state.push(game(3, RoundKind::Divisional, "N1", "N4"));
        state.push(game(4, RoundKind::Divisional, "N2", "N3"));
        state.push(game(5, RoundKind::ConferenceChampionship, "N1", "N2"));

        assert_eq!(state.clear_from(RoundKind::Divisional), 3);
        assert_eq!(state.len(), 2);
        assert!(state.matchups(RoundKind::ConferenceChampionship).is_empty());
        assert_eq!(state.clear_from(RoundKind::Divisional), 0);
    }

    #[test]
    fn active_round_moves_forward_and_ends() {
        let mut state = BracketState::new();
        assert_eq!(state.active_round(), None);
        state.push(game(1, RoundKind::SuperBowl, "N1", "A1"));
        // Rounds must be built in order; a lone later round is not "active".
        assert_eq!(state.active_round(), None);

        let mut state = two_round_state();
        state.record_winner(1, "N3");
        state.record_winner(2, "N4");
        assert_eq!(state.active_round(), None);
        state.push(game(3, RoundKind::Divisional, "N1", "N4"));
        assert_eq!(state.active_round(), Some(RoundKind::Divisional));
    }
}
