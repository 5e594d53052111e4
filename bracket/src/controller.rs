use crate::error::BracketResult;
use crate::ids::MatchupIds;
use crate::picks::SavedPicks;
use crate::registry::SeedRegistry;
use crate::reseed::{final_pairing, interleave, reseed};
use crate::state::BracketState;
use crate::{Conference, Matchup, RoundKind, Team};
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};

/// Notifications for whoever renders the bracket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BracketEvent {
    /// `round` was (re)built with these matchups, in display order.
    RoundPopulated { round: RoundKind, matchups: Vec<Matchup> },
    /// `from` and every later round were discarded after an earlier pick changed.
    RoundsCleared { from: RoundKind, removed: usize },
}

/// One user's bracket: drives round-by-round progression with reseeding.
#[derive(Debug)]
pub struct Bracket {
    registry: SeedRegistry,
    ids: MatchupIds,
    state: BracketState,
    subscribers: Vec<Sender<BracketEvent>>,
}

impl Bracket {
    /// Build the wild card round: per conference, 3 hosts 6 and 4 hosts 5.
    /// Seeds 1 and 2 sit out until the divisional round.
    pub fn new(registry: SeedRegistry) -> Self {
        let mut bracket = Self {
            registry,
            ids: MatchupIds::new(),
            state: BracketState::new(),
            subscribers: Vec::new(),
        };

        for conference in Conference::ALL {
            let seeding = bracket.registry.seeding(conference);
            let games = [
                (seeding[2].clone(), seeding[5].clone()),
                (seeding[3].clone(), seeding[4].clone()),
            ];
            for (home, away) in games {
                let id = bracket.ids.next();
                bracket.state.push(Matchup::new(id, RoundKind::WildCard, home, away));
            }
        }
        bracket
    }

    /// Validate the seeding, build round one, then replay `saved` if given.
    ///
    /// Seeding problems fail the whole call. A saved-picks payload that stops
    /// fitting the bracket part way through is logged and the rounds rebuilt
    /// up to that point are kept; call [`Bracket::restore`] directly to get
    /// that error back instead.
    pub fn init(
        catalog: HashMap<String, Team>,
        nfc: Vec<String>,
        afc: Vec<String>,
        saved: Option<&SavedPicks>,
    ) -> BracketResult<Self> {
        let registry = SeedRegistry::new(catalog, nfc, afc)?;
        let mut bracket = Self::new(registry);
        if let Some(picks) = saved
            && let Err(e) = bracket.restore(picks)
        {
            warn!("{e}; keeping the {} games rebuilt so far", bracket.state.len());
        }
        Ok(bracket)
    }

    pub fn subscribe(&mut self) -> Receiver<BracketEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn registry(&self) -> &SeedRegistry {
        &self.registry
    }

    pub fn state(&self) -> &BracketState {
        &self.state
    }

    pub fn champion(&self) -> Option<&Team> {
        self.state.champion()
    }

    pub fn is_complete(&self) -> bool {
        self.champion().is_some()
    }

    pub fn set_tiebreaker(&mut self, points: Option<u32>) {
        self.state.set_tiebreaker(points);
    }

    pub fn to_picks(&self) -> SavedPicks {
        SavedPicks::from_state(&self.state)
    }

    /// The user picked `abbr` to win matchup `id`.
    ///
    /// Returns `false` and changes nothing when the pick is not allowed (see
    /// [`BracketState::record_winner`]). Re-picking the current winner is a
    /// no-op. Otherwise the matchup's round is re-evaluated, which may rebuild
    /// everything after it.
    pub fn select_winner(&mut self, id: u32, abbr: &str) -> bool {
        let Some(round) = self.state.matchup(id).map(|m| m.round) else {
            debug!("ignoring pick {abbr} for unknown game {id}");
            return false;
        };
        let unchanged = self
            .state
            .matchup(id)
            .is_some_and(|m| m.winner.as_deref() == Some(abbr));
        if unchanged {
            return true;
        }
        if !self.state.record_winner(id, abbr) {
            debug!("ignoring pick {abbr} for game {id} ({})", round.label());
            return false;
        }
        self.round_changed(round);
        true
    }

    /// A pick in `round` changed.
    ///
    /// Nothing happens until every game of the round has a winner. Then the
    /// later rounds are dropped, their ids handed back, and the next round is
    /// rebuilt from this round's winners.
    pub fn round_changed(&mut self, round: RoundKind) {
        let Some(next) = round.next() else {
            if let Some(champion) = self.state.champion() {
                debug!("bracket complete, {} wins it all", champion.abbr);
            }
            return;
        };

        let decided = self.state.decided_count(round);
        let expected = round.expected_games();
        if decided != expected {
            debug!("{}: {decided}/{expected} picks, waiting", round.label());
            return;
        }

        let removed = self.state.clear_from(next);
        if removed > 0 {
            self.ids.release(removed);
            debug!("dropped {removed} games from {} onward", next.label());
            self.emit(BracketEvent::RoundsCleared { from: next, removed });
        }

        let mut matchups = Vec::with_capacity(next.expected_games());
        for (home, away) in self.next_pairings(round) {
            let matchup = Matchup::new(self.ids.next(), next, home, away);
            self.state.push(matchup.clone());
            matchups.push(matchup);
        }
        debug!(
            "{} built: {}",
            next.label(),
            matchups
                .iter()
                .map(|m| format!("{} {}v{}", m.id, m.home.abbr, m.away.abbr))
                .collect::<Vec<_>>()
                .join(", ")
        );
        self.emit(BracketEvent::RoundPopulated { round: next, matchups });
    }

    fn next_pairings(&self, round: RoundKind) -> Vec<(Team, Team)> {
        let byes: Vec<Team> = if round == RoundKind::WildCard {
            Conference::ALL
                .iter()
                .flat_map(|conf| self.registry.byes(*conf))
                .cloned()
                .collect()
        } else {
            Vec::new()
        };
        let winners = self
            .state
            .matchups(round)
            .iter()
            .filter_map(Matchup::winner)
            .cloned();

        let (nfc, afc): (Vec<Team>, Vec<Team>) = byes
            .into_iter()
            .chain(winners)
            .partition(|t| t.conference == Conference::Nfc);

        match (nfc.as_slice(), afc.as_slice()) {
            ([nfc_champion], [afc_champion]) => vec![final_pairing(nfc_champion, afc_champion)],
            _ => interleave(reseed(&nfc), reseed(&afc)),
        }
    }

    fn emit(&mut self, event: BracketEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, pair, pairings, pick};

    fn pick_wild_card(bracket: &mut Bracket) {
        for abbr in ["N3", "N4", "A3", "A4"] {
            pick(bracket, abbr);
        }
    }

    #[test]
    fn wild_card_round_pairs_three_six_and_four_five() {
        let bracket = fixtures::bracket();
        assert_eq!(
            pairings(&bracket, RoundKind::WildCard),
            vec![pair("N3", "N6"), pair("N4", "N5"), pair("A3", "A6"), pair("A4", "A5")]
        );
        let ids: Vec<u32> = bracket.state().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert!(
            bracket
                .state()
                .iter()
                .all(|m| m.home.seed > 2 && m.away.seed > 2),
            "byes must not play the wild card round"
        );
        assert!(bracket.state().matchups(RoundKind::Divisional).is_empty());
    }

    #[test]
    fn divisional_round_reseeds_byes_against_lowest_survivors() {
        let mut bracket = fixtures::bracket();
        pick_wild_card(&mut bracket);
        assert_eq!(
            pairings(&bracket, RoundKind::Divisional),
            vec![pair("N1", "N4"), pair("A1", "A4"), pair("N2", "N3"), pair("A2", "A3")]
        );
        let ids: Vec<u32> = bracket
            .state()
            .matchups(RoundKind::Divisional)
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![5, 6, 7, 8]);
    }

    #[test]
    fn wild_card_upsets_send_the_worst_seed_to_the_top_seed() {
        let mut bracket = fixtures::bracket();
        for abbr in ["N6", "N5", "A3", "A5"] {
            pick(&mut bracket, abbr);
        }
        assert_eq!(
            pairings(&bracket, RoundKind::Divisional),
            vec![pair("N1", "N6"), pair("A1", "A5"), pair("N2", "N5"), pair("A2", "A3")]
        );
    }

    #[test]
    fn incomplete_round_builds_nothing() {
        let mut bracket = fixtures::bracket();
        let events = bracket.subscribe();
        for abbr in ["N3", "N4", "A3"] {
            pick(&mut bracket, abbr);
        }
        assert!(bracket.state().matchups(RoundKind::Divisional).is_empty());
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn full_run_reaches_a_champion() {
        let mut bracket = fixtures::bracket();
        pick_wild_card(&mut bracket);
        for abbr in ["N1", "N3", "A4", "A2"] {
            pick(&mut bracket, abbr);
        }
        assert_eq!(
            pairings(&bracket, RoundKind::ConferenceChampionship),
            vec![pair("N1", "N3"), pair("A2", "A4")]
        );

        pick(&mut bracket, "N3");
        pick(&mut bracket, "A4");
        assert_eq!(pairings(&bracket, RoundKind::SuperBowl), vec![pair("N3", "A4")]);
        assert_eq!(bracket.state().matchups(RoundKind::SuperBowl)[0].id, 11);
        assert!(!bracket.is_complete());

        pick(&mut bracket, "A4");
        assert_eq!(bracket.champion().map(|t| t.abbr.as_str()), Some("A4"));
        assert_eq!(bracket.state().len(), 11);
    }

    #[test]
    fn every_team_plays_at_most_once_per_round() {
        let mut bracket = fixtures::bracket();
        pick_wild_card(&mut bracket);
        for round in [RoundKind::WildCard, RoundKind::Divisional] {
            let mut seen: Vec<String> = bracket
                .state()
                .matchups(round)
                .iter()
                .flat_map(|m| [m.home.abbr.clone(), m.away.abbr.clone()])
                .collect();
            let total = seen.len();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), total, "{} repeats a team", round.label());
        }
    }

    #[test]
    fn revising_an_earlier_pick_rebuilds_later_rounds_with_the_same_ids() {
        let mut bracket = fixtures::bracket();
        pick_wild_card(&mut bracket);
        for abbr in ["N1", "N2", "A1", "A2"] {
            pick(&mut bracket, abbr);
        }
        assert_eq!(bracket.state().len(), 10);
        let events = bracket.subscribe();

        // N6 upsets N3 instead.
        assert!(bracket.select_winner(1, "N6"));

        assert_eq!(
            events.try_recv().unwrap(),
            BracketEvent::RoundsCleared { from: RoundKind::Divisional, removed: 6 }
        );
        match events.try_recv().unwrap() {
            BracketEvent::RoundPopulated { round, matchups } => {
                assert_eq!(round, RoundKind::Divisional);
                let ids: Vec<u32> = matchups.iter().map(|m| m.id).collect();
                assert_eq!(ids, vec![5, 6, 7, 8]);
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(
            pairings(&bracket, RoundKind::Divisional),
            vec![pair("N1", "N6"), pair("A1", "A4"), pair("N2", "N4"), pair("A2", "A3")]
        );
        assert!(bracket.state().matchups(RoundKind::ConferenceChampionship).is_empty());
        assert!(bracket.state().iter().filter(|m| m.round == RoundKind::Divisional).all(|m| m.winner.is_none()));
    }

    #[test]
    fn repeating_the_same_picks_rebuilds_an_identical_round() {
        let mut bracket = fixtures::bracket();
        pick_wild_card(&mut bracket);
        let before = bracket.state().matchups(RoundKind::Divisional).to_vec();

        assert!(bracket.select_winner(2, "N4"));
        assert_eq!(bracket.state().matchups(RoundKind::Divisional), before.as_slice());
        assert_eq!(bracket.state().len(), 8);
    }

    #[test]
    fn re_picking_the_current_winner_keeps_later_rounds() {
        let mut bracket = fixtures::bracket();
        fixtures::complete(&mut bracket);
        let before = bracket.to_picks();
        let winner = bracket.state().matchup(1).unwrap().winner.clone().unwrap();

        assert!(bracket.select_winner(1, &winner));
        assert_eq!(bracket.to_picks(), before);
        assert!(bracket.is_complete());
    }

    #[test]
    fn stale_and_foreign_picks_are_ignored() {
        let mut bracket = fixtures::bracket();
        assert!(!bracket.select_winner(5, "N1"), "game 5 does not exist yet");
        assert!(!bracket.select_winner(1, "A3"), "A3 does not play in game 1");
        assert_eq!(bracket.state().decided_count(RoundKind::WildCard), 0);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut bracket = fixtures::bracket();
        let kept = bracket.subscribe();
        drop(bracket.subscribe());
        pick_wild_card(&mut bracket);
        assert_eq!(bracket.subscribers.len(), 1);
        assert!(matches!(
            kept.try_recv(),
            Ok(BracketEvent::RoundPopulated { round: RoundKind::Divisional, .. })
        ));
    }

    #[test]
    fn init_rejects_bad_seeding() {
        let (catalog, mut nfc, afc) = fixtures::seeding_parts();
        nfc.truncate(3);
        assert!(Bracket::init(catalog, nfc, afc, None).is_err());
    }
}
