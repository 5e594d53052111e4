use crate::Team;

/// Pair one conference's remaining teams for the next round.
///
/// Teams are sorted by seed and paired from both ends: best remaining seed
/// hosts worst remaining seed, second best hosts second worst, and so on.
/// Seeds are unique within a conference, so the order is total. With an odd
/// count the middle team is left unpaired.
pub fn reseed(remaining: &[Team]) -> Vec<(Team, Team)> {
    let mut teams = remaining.to_vec();
    teams.sort_by_key(|t| t.seed);

    let mut pairings = Vec::with_capacity(teams.len() / 2);
    if teams.len() < 2 {
        return pairings;
    }
    let (mut i, mut j) = (0, teams.len() - 1);
    while i < j {
        pairings.push((teams[i].clone(), teams[j].clone()));
        i += 1;
        j -= 1;
    }
    pairings
}

/// Alternate NFC and AFC games: NFC, AFC, NFC, AFC, …
pub fn interleave<T>(nfc: Vec<T>, afc: Vec<T>) -> Vec<T> {
    let mut out = Vec::with_capacity(nfc.len() + afc.len());
    let mut nfc = nfc.into_iter();
    let mut afc = afc.into_iter();
    loop {
        match (nfc.next(), afc.next()) {
            (None, None) => break,
            (n, a) => out.extend(n.into_iter().chain(a)),
        }
    }
    out
}

/// The Super Bowl: conference champions meet, NFC champion listed as home.
pub fn final_pairing(nfc_champion: &Team, afc_champion: &Team) -> (Team, Team) {
    (nfc_champion.clone(), afc_champion.clone())
}
