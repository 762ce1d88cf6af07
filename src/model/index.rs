//! Index construction.
//!
//! Runs once per load, before the model is published to any reader:
//! 1. derive every team's link
//! 2. stable sort by name (ordinal)
//! 3. bucket teams by normalized league, in name order
//! 4. resolve duplicate names per bucket (last in source order wins)
//! 5. list leagues, sorted by display name (ordinal)

use std::collections::HashMap;
use std::sync::Arc;

use crate::model::league::{LeagueBucket, LeagueRecord};
use crate::model::link::{league_link, normalize_key, team_link};
use crate::model::team::Team;

/// All derived lookup structures.
#[derive(Debug)]
pub(crate) struct Index {
    pub(crate) teams: Vec<Arc<Team>>,
    /// Normalized team names, parallel to `teams`.
    pub(crate) name_keys: Vec<String>,
    pub(crate) leagues: Vec<LeagueRecord>,
    pub(crate) buckets: HashMap<String, LeagueBucket>,
}

/// Build the index from teams in source order.
pub(crate) fn build(mut teams: Vec<Team>) -> Index {
    for team in &mut teams {
        let link = team_link(team.league(), team.name());
        team.set_link(link);
    }

    let mut ordered: Vec<(usize, Arc<Team>)> = teams.into_iter().map(Arc::new).enumerate().collect();
    ordered.sort_by(|(_, a), (_, b)| a.name().cmp(b.name()));

    let name_keys: Vec<String> = ordered.iter().map(|(_, team)| normalize_key(team.name())).collect();

    let mut buckets: HashMap<String, LeagueBucket> = HashMap::new();
    for ((position, team), name_key) in ordered.iter().zip(&name_keys) {
        let bucket = buckets
            .entry(normalize_key(team.league()))
            .or_insert_with(|| LeagueBucket::new(team.league()));
        bucket.push(name_key.clone(), *position, Arc::clone(team));
    }

    let mut leagues: Vec<LeagueRecord> = buckets
        .iter()
        .map(|(key, bucket)| LeagueRecord {
            league: bucket.display().to_string(),
            link: league_link(key),
        })
        .collect();
    leagues.sort_by(|a, b| a.league.cmp(&b.league));

    Index {
        teams: ordered.into_iter().map(|(_, team)| team).collect(),
        name_keys,
        leagues,
        buckets,
    }
}
