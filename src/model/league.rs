//! League records and per-league buckets.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::model::team::Team;

/// An individual league as listed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeagueRecord {
    /// Display name of the league.
    pub league: String,
    /// Link to retrieve the teams of the league.
    #[serde(rename = "_link")]
    pub link: String,
}

/// A team together with its position in the source file.
#[derive(Debug, Clone)]
struct Ranked {
    position: usize,
    team: Arc<Team>,
}

/// Derived per-league structure: ordered teams plus a name index.
#[derive(Debug)]
pub(crate) struct LeagueBucket {
    display: String,
    sorted_teams: Vec<Arc<Team>>,
    team_by_name: HashMap<String, Ranked>,
}

impl LeagueBucket {
    pub(crate) fn new(display: &str) -> Self {
        Self {
            display: display.to_string(),
            sorted_teams: Vec::new(),
            team_by_name: HashMap::new(),
        }
    }

    /// Display name, taken from the first team that created the bucket.
    pub(crate) fn display(&self) -> &str {
        &self.display
    }

    /// Append a team. Callers push in name order.
    pub(crate) fn push(&mut self, name_key: String, position: usize, team: Arc<Team>) {
        self.sorted_teams.push(Arc::clone(&team));
        self.resolve_duplicate(name_key, Ranked { position, team });
    }

    /// Duplicate names within a league: the record latest in source order wins.
    fn resolve_duplicate(&mut self, name_key: String, candidate: Ranked) {
        match self.team_by_name.entry(name_key) {
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
            Entry::Occupied(mut slot) => {
                if candidate.position > slot.get().position {
                    slot.insert(candidate);
                }
            }
        }
    }

    pub(crate) fn teams(&self) -> &[Arc<Team>] {
        &self.sorted_teams
    }

    pub(crate) fn team(&self, name_key: &str) -> Option<&Arc<Team>> {
        self.team_by_name.get(name_key).map(|ranked| &ranked.team)
    }
}
