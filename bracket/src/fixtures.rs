//! Shared test bracket: NFC seeds N1..N6, AFC seeds A1..A6.

use crate::{Bracket, Conference, SeedRegistry, Team};
use std::collections::HashMap;

pub fn team(abbr: &str, seed: u8, conference: Conference) -> Team {
    Team {
        abbr: abbr.into(),
        name: format!("Team {abbr}"),
        seed,
        conference,
        record: String::new(),
        logo: None,
    }
}

pub fn seeding_parts() -> (HashMap<String, Team>, Vec<String>, Vec<String>) {
    let mut catalog = HashMap::new();
    let mut nfc = Vec::new();
    let mut afc = Vec::new();
    for seed in 1..=6u8 {
        let n = format!("N{seed}");
        let a = format!("A{seed}");
        catalog.insert(n.clone(), team(&n, seed, Conference::Nfc));
        catalog.insert(a.clone(), team(&a, seed, Conference::Afc));
        nfc.push(n);
        afc.push(a);
    }
    (catalog, nfc, afc)
}

pub fn registry() -> SeedRegistry {
    let (catalog, nfc, afc) = seeding_parts();
    SeedRegistry::new(catalog, nfc, afc).unwrap()
}

pub fn bracket() -> Bracket {
    Bracket::new(registry())
}

/// Pick `abbr` in whichever live matchup it plays in.
pub fn pick(bracket: &mut Bracket, abbr: &str) {
    let id = bracket
        .state()
        .iter()
        .filter(|m| m.involves(abbr))
        .map(|m| m.id)
        .last()
        .unwrap_or_else(|| panic!("{abbr} is not in a live matchup"));
    assert!(bracket.select_winner(id, abbr), "pick {abbr} in matchup {id} was refused");
}

/// Pick every game through the Super Bowl, A4 taking the title.
pub fn complete(bracket: &mut Bracket) {
    for abbr in ["N6", "N4", "A3", "A4", "N1", "A4", "N4", "A2", "N4", "A4", "A4"] {
        pick(bracket, abbr);
    }
}

/// Pairings of a round as (home, away) abbreviations.
pub fn pairings(bracket: &Bracket, round: crate::RoundKind) -> Vec<(String, String)> {
    bracket
        .state()
        .matchups(round)
        .iter()
        .map(|m| (m.home.abbr.clone(), m.away.abbr.clone()))
        .collect()
}

pub fn pair(home: &str, away: &str) -> (String, String) {
    (home.to_string(), away.to_string())
}
