use crate::error::{BracketError, BracketResult};
use crate::{Conference, SEEDS_PER_CONFERENCE, Team};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

const EMBEDDED_SEEDING_JSON: &str = include_str!("../data/playoffs_2014.json");

/// Read-only team catalog plus the two conference seed orderings.
#[derive(Debug, Clone)]
pub struct SeedRegistry {
    teams: HashMap<String, Team>,
    nfc: [Team; SEEDS_PER_CONFERENCE],
    afc: [Team; SEEDS_PER_CONFERENCE],
}

impl SeedRegistry {
    /// Validate the orderings against the catalog.
    ///
    /// Each ordering must name six distinct catalog teams, index 0 = seed 1.
    /// A catalog entry whose conference or seed disagrees with its slot is
    /// rejected too, so `team.seed` can be trusted for reseeding later on.
    pub fn new(
        catalog: HashMap<String, Team>,
        nfc: Vec<String>,
        afc: Vec<String>,
    ) -> BracketResult<Self> {
        let nfc = resolve_seeding(&catalog, Conference::Nfc, &nfc)?;
        let afc = resolve_seeding(&catalog, Conference::Afc, &afc)?;
        Ok(Self { teams: catalog, nfc, afc })
    }

    pub fn team(&self, abbr: &str) -> Option<&Team> {
        self.teams.get(abbr)
    }

    pub fn team_at(&self, conference: Conference, seed_index: usize) -> Option<&Team> {
        self.seeding(conference).get(seed_index)
    }

    pub fn seeding(&self, conference: Conference) -> &[Team; SEEDS_PER_CONFERENCE] {
        match conference {
            Conference::Nfc => &self.nfc,
            Conference::Afc => &self.afc,
        }
    }

    /// Seeds 1 and 2, which skip the wild card round.
    pub fn byes(&self, conference: Conference) -> [&Team; 2] {
        let seeding = self.seeding(conference);
        [&seeding[0], &seeding[1]]
    }
}

fn resolve_seeding(
    catalog: &HashMap<String, Team>,
    conference: Conference,
    ordering: &[String],
) -> BracketResult<[Team; SEEDS_PER_CONFERENCE]> {
    if ordering.len() != SEEDS_PER_CONFERENCE {
        return Err(BracketError::seeding(
            conference,
            format!("expected {SEEDS_PER_CONFERENCE} seeds, got {}", ordering.len()),
        ));
    }

    let mut seen = HashSet::new();
    let mut teams = Vec::with_capacity(SEEDS_PER_CONFERENCE);
    for (index, abbr) in ordering.iter().enumerate() {
        if !seen.insert(abbr.as_str()) {
            return Err(BracketError::seeding(conference, format!("{abbr} is listed twice")));
        }
        let team = catalog
            .get(abbr)
            .ok_or_else(|| BracketError::seeding(conference, format!("{abbr} is not in the team catalog")))?;
        if team.conference != conference {
            return Err(BracketError::seeding(
                conference,
                format!("{abbr} plays in the {}", team.conference),
            ));
        }
        let slot_seed = index + 1;
        if usize::from(team.seed) != slot_seed {
            return Err(BracketError::seeding(
                conference,
                format!("{abbr} is seeded {} but listed at seed {slot_seed}", team.seed),
            ));
        }
        teams.push(team.clone());
    }

    teams
        .try_into()
        .map_err(|_| BracketError::seeding(conference, "seed list changed size during validation"))
}

// ---------------------------------------------------------------------------
// Seeding file: the JSON a season's bracket is configured from
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedingFile {
    pub season: u16,
    /// First wild card kickoff. Picks close once it has passed.
    #[serde(default)]
    pub kickoff: Option<DateTime<Utc>>,
    pub teams: HashMap<String, Team>,
    #[serde(rename = "NFC")]
    pub nfc: Vec<String>,
    #[serde(rename = "AFC")]
    pub afc: Vec<String>,
}

impl SeedingFile {
    pub fn from_json(json: &str) -> BracketResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Bundled 2014-season field, used when no seeding file is configured.
    pub fn embedded() -> BracketResult<Self> {
        Self::from_json(EMBEDDED_SEEDING_JSON)
    }

    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        self.kickoff.is_some_and(|kickoff| now > kickoff)
    }

    pub fn registry(&self) -> BracketResult<SeedRegistry> {
        SeedRegistry::new(self.teams.clone(), self.nfc.clone(), self.afc.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use chrono::TimeZone;

    fn seeding_reason(result: BracketResult<SeedRegistry>) -> String {
        match result {
            Err(BracketError::Seeding { reason, .. }) => reason,
            other => panic!("expected a seeding error, got {other:?}"),
        }
    }

    #[test]
    fn team_at_follows_the_ordering() {
        let registry = fixtures::registry();
        assert_eq!(registry.team_at(Conference::Nfc, 0).unwrap().abbr, "N1");
        assert_eq!(registry.team_at(Conference::Afc, 5).unwrap().abbr, "A6");
        assert!(registry.team_at(Conference::Afc, 6).is_none());
        let [one, two] = registry.byes(Conference::Afc);
        assert_eq!((one.abbr.as_str(), two.abbr.as_str()), ("A1", "A2"));
    }

    #[test]
    fn short_ordering_is_rejected() {
        let (catalog, mut nfc, afc) = fixtures::seeding_parts();
        nfc.pop();
        let err = SeedRegistry::new(catalog, nfc, afc).unwrap_err();
        assert_eq!(
            err,
            BracketError::Seeding {
                conference: Some(Conference::Nfc),
                reason: "expected 6 seeds, got 5".into(),
            }
        );
        assert!(err.to_string().starts_with("initialization rejected"));
    }

    #[test]
    fn duplicate_entry_is_rejected() {
        let (catalog, nfc, mut afc) = fixtures::seeding_parts();
        afc[5] = "A1".into();
        assert!(seeding_reason(SeedRegistry::new(catalog, nfc, afc)).contains("listed twice"));
    }

    #[test]
    fn unknown_team_is_rejected() {
        let (catalog, mut nfc, afc) = fixtures::seeding_parts();
        nfc[2] = "XXX".into();
        assert!(seeding_reason(SeedRegistry::new(catalog, nfc, afc)).contains("not in the team catalog"));
    }

    #[test]
    fn team_in_wrong_conference_is_rejected() {
        let (catalog, mut nfc, afc) = fixtures::seeding_parts();
        nfc[0] = "A1".into();
        assert!(seeding_reason(SeedRegistry::new(catalog, nfc, afc)).contains("plays in the AFC"));
    }

    #[test]
    fn seed_out_of_slot_is_rejected() {
        let (catalog, mut nfc, afc) = fixtures::seeding_parts();
        nfc.swap(0, 1);
        assert!(seeding_reason(SeedRegistry::new(catalog, nfc, afc)).contains("seeded 2"));
    }

    #[test]
    fn embedded_seeding_builds_a_registry() {
        let file = SeedingFile::embedded().expect("embedded seeding should parse");
        assert_eq!(file.season, 2014);
        let registry = file.registry().expect("embedded seeding should validate");
        assert_eq!(registry.team_at(Conference::Nfc, 0).unwrap().abbr, "SEA");
        assert_eq!(registry.team_at(Conference::Afc, 0).unwrap().abbr, "NE");
    }

    #[test]
    fn picks_lock_after_kickoff() {
        let mut file = SeedingFile::embedded().unwrap();
        let kickoff = Utc.with_ymd_and_hms(2015, 1, 3, 21, 35, 0).unwrap();
        file.kickoff = Some(kickoff);
        assert!(!file.is_locked(kickoff));
        assert!(file.is_locked(kickoff + chrono::Duration::seconds(1)));
        file.kickoff = None;
        assert!(!file.is_locked(kickoff));
    }
}
