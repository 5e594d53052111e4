/// Issues matchup ids 1, 2, 3, … in creation order.
///
/// Live ids are always the prefix `1..=issued`. Clearing the tail of the
/// bracket hands ids back with [`MatchupIds::release`], so a rebuilt round
/// reuses exactly the ids its previous incarnation held. Saved picks rely
/// on this: matchup id N is always `game_N`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchupIds {
    issued: u32,
}

impl MatchupIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> u32 {
        self.issued += 1;
        self.issued
    }

    /// Roll the counter back after removing `count` matchups.
    pub fn release(&mut self, count: usize) {
        let count = u32::try_from(count).unwrap_or(u32::MAX);
        self.issued = self.issued.saturating_sub(count);
    }

    /// Highest id currently handed out (0 when none).
    pub fn issued(&self) -> u32 {
        self.issued
    }
}
