//! Team color data model.
//!
//! # Data Flow
//! ```text
//! data file
//!     → loader.rs (read, detect schema, deserialize)
//!     → index.rs (links, sort, league buckets, league list)
//!     → Model (immutable, shared via Arc)
//! ```
//!
//! # Design Decisions
//! - Built once per load and never mutated; readers need no locks
//! - Reloading builds a new Model and swaps the published Arc
//! - League and team lookups are case-insensitive; display strings are kept
//! - Errors are typed values; nothing in this module logs

pub mod error;
pub mod index;
pub mod league;
pub mod link;
pub mod loader;
pub mod team;
pub mod timestamp;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};

pub use error::{LoadError, LookupError};
pub use league::LeagueRecord;
pub use loader::Schema;
pub use team::{Color, Era, EraTeam, FlatTeam, Team};

use crate::model::index::Index;
use crate::model::league::LeagueBucket;
use crate::model::link::normalize_key;
use crate::model::loader::RawData;

/// Read-only view over one loaded data file.
#[derive(Debug)]
pub struct Model {
    generated: DateTime<FixedOffset>,
    schema: Schema,
    teams: Vec<Arc<Team>>,
    name_keys: Vec<String>,
    leagues: Vec<LeagueRecord>,
    teams_by_league: HashMap<String, LeagueBucket>,
}

impl Model {
    /// Load and index a data file.
    pub fn load(path: impl AsRef<Path>, schema: Schema) -> Result<Self, LoadError> {
        loader::load(path.as_ref(), schema).map(Self::from_raw)
    }

    /// Decode and index data file content already in memory.
    pub fn from_slice(content: &[u8], schema: Schema) -> Result<Self, LoadError> {
        loader::decode(content, schema).map(Self::from_raw)
    }

    fn from_raw(raw: RawData) -> Self {
        let Index {
            teams,
            name_keys,
            leagues,
            buckets,
        } = index::build(raw.teams);

        Self {
            generated: raw.generated,
            schema: raw.schema,
            teams,
            name_keys,
            leagues,
            teams_by_league: buckets,
        }
    }

    /// All teams, sorted by name.
    pub fn all_teams(&self) -> &[Arc<Team>] {
        &self.teams
    }

    /// All leagues, sorted by display name.
    pub fn leagues(&self) -> &[LeagueRecord] {
        &self.leagues
    }

    /// Teams of one league, sorted by name.
    pub fn teams_by_league(&self, league: &str) -> Result<&[Arc<Team>], LookupError> {
        self.teams_by_league
            .get(&normalize_key(league))
            .map(LeagueBucket::teams)
            .ok_or(LookupError::LeagueNotFound)
    }

    /// A single team by league and name.
    pub fn team_by_league_and_name(&self, league: &str, name: &str) -> Result<&Arc<Team>, LookupError> {
        let bucket = self
            .teams_by_league
            .get(&normalize_key(league))
            .ok_or(LookupError::LeagueNotFound)?;

        bucket.team(&normalize_key(name)).ok_or(LookupError::TeamNotFound)
    }

    /// Teams whose name contains `needle`, ignoring case, in name order.
    pub fn search(&self, needle: &str) -> Vec<Arc<Team>> {
        let needle = normalize_key(needle);
        self.teams
            .iter()
            .zip(&self.name_keys)
            .filter(|(_, key)| key.contains(&needle))
            .map(|(team, _)| Arc::clone(team))
            .collect()
    }

    /// When the data file was generated.
    pub fn generation_date(&self) -> DateTime<FixedOffset> {
        self.generated
    }

    /// The schema the data file was decoded with.
    pub fn schema(&self) -> Schema {
        self.schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const TEST_FILE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/teamhex.json");
    const MORE_LEAGUES_FILE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/teamhex-moreleagues.json");
    const ERAS_FILE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/teamhex-eras.json");
    const INVALID_FILE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/invalid.json");

    fn model() -> Model {
        Model::load(TEST_FILE, Schema::Auto).unwrap()
    }

    fn names(teams: &[Arc<Team>]) -> Vec<&str> {
        teams.iter().map(|t| t.name()).collect()
    }

    #[test]
    fn test_load_model() {
        assert!(matches!(
            Model::load("badfile.json", Schema::Auto),
            Err(LoadError::Io { .. })
        ));
        assert!(matches!(
            Model::load(INVALID_FILE, Schema::Auto),
            Err(LoadError::Parse(_))
        ));

        let model = model();
        assert_eq!(model.schema(), Schema::Flat);
    }

    #[test]
    fn test_generation_date() {
        let expected = Utc.with_ymd_and_hms(2020, 2, 22, 12, 0, 0).unwrap();
        assert_eq!(model().generation_date(), expected);
    }

    #[test]
    fn test_all_teams() {
        let model = model();
        let teams = model.all_teams();
        assert_eq!(names(teams), ["Apples", "Bananas", "Pizzas", "The Pears"]);
        assert_eq!(teams[3].link(), "/leagues/fruit/the%20pears");
    }

    #[test]
    fn test_leagues() {
        let model = Model::load(MORE_LEAGUES_FILE, Schema::Auto).unwrap();
        let leagues: Vec<&str> = model.leagues().iter().map(|l| l.league.as_str()).collect();
        assert_eq!(leagues, ["Berry", "Hesperidium", "Pome"]);
        assert_eq!(model.leagues()[0].link, "/leagues/berry");
    }

    #[test]
    fn test_team_by_league_and_name() {
        let model = model();

        assert_eq!(
            model.team_by_league_and_name("foo", "bar").unwrap_err(),
            LookupError::LeagueNotFound
        );
        assert_eq!(
            model.team_by_league_and_name("fruit", "bar").unwrap_err(),
            LookupError::TeamNotFound
        );
        assert_eq!(
            model.team_by_league_and_name("italian food", "the pears").unwrap_err(),
            LookupError::TeamNotFound
        );

        let team = model.team_by_league_and_name("fRuIt", "aPpLeS").unwrap();
        assert_eq!(team.name(), "Apples");
        assert_eq!(team.league(), "Fruit");
        assert_eq!(team.link(), "/leagues/fruit/apples");
        assert_eq!(team.grouping(), Some("Sweet"));
        match team.as_ref() {
            Team::Flat(flat) => assert_eq!(flat.colors, ["#f00", "#0f0"]),
            other => panic!("expected flat team, got {:?}", other),
        }

        let team = model.team_by_league_and_name("fruit", "THE PEARS").unwrap();
        assert_eq!(team.link(), "/leagues/fruit/the%20pears");
    }

    #[test]
    fn test_every_team_is_reachable() {
        let model = model();
        for team in model.all_teams() {
            let upper = model
                .team_by_league_and_name(&team.league().to_uppercase(), &team.name().to_uppercase())
                .unwrap();
            assert_eq!(upper, team);
        }
    }

    #[test]
    fn test_teams_by_league() {
        let model = model();

        assert_eq!(model.teams_by_league("bad").unwrap_err(), LookupError::LeagueNotFound);

        let teams = model.teams_by_league("frUit").unwrap();
        assert_eq!(names(teams), ["Apples", "Bananas", "The Pears"]);

        let teams = model.teams_by_league("italian FOOD").unwrap();
        assert_eq!(names(teams), ["Pizzas"]);
    }

    #[test]
    fn test_search() {
        let model = model();

        assert!(model.search("bad").is_empty());
        assert_eq!(names(&model.search("izz")), ["Pizzas"]);
        assert_eq!(names(&model.search("as")), ["Bananas", "Pizzas"]);
        assert_eq!(names(&model.search("AS")), ["Bananas", "Pizzas"]);
        assert_eq!(model.search("").len(), model.all_teams().len());
    }

    #[test]
    fn test_dotted_capital_i_lookup_and_search() {
        let data = r##"{
            "generated": "2020-02-22T12:00:00Z",
            "teams": [{"name": "İstanbul Başakşehir", "colors": ["#f60"], "league": "Süper Lig"}]
        }"##;
        let model = Model::from_slice(data.as_bytes(), Schema::Auto).unwrap();

        let team = model
            .team_by_league_and_name("süper lig", "istanbul başakşehir")
            .unwrap();
        assert_eq!(team.link(), "/leagues/s%C3%BCper%20lig/istanbul%20ba%C5%9Fak%C5%9Fehir");
        assert_eq!(
            model.team_by_league_and_name("SÜPER LIG", "İSTANBUL BAŞAKŞEHİR").unwrap(),
            team
        );
        assert_eq!(names(&model.search("istanbul")), ["İstanbul Başakşehir"]);
        assert_eq!(names(&model.search("İST")), ["İstanbul Başakşehir"]);
    }

    #[test]
    fn test_eras_file() {
        let model = Model::load(ERAS_FILE, Schema::Auto).unwrap();
        assert_eq!(model.schema(), Schema::Eras);
        assert_eq!(timestamp::format(&model.generation_date()), "2021-03-01T09:30:00-05:00");

        let leagues: Vec<&str> = model.leagues().iter().map(|l| l.league.as_str()).collect();
        assert_eq!(leagues, ["MLB", "NFL"]);

        let team = model.team_by_league_and_name("nfl", "chicago bears").unwrap();
        assert_eq!(team.grouping(), Some("NFC North"));
        match team.as_ref() {
            Team::Eras(bears) => {
                assert_eq!(bears.id, 3);
                let years: Vec<i32> = bears.eras.iter().map(|e| e.year).collect();
                assert_eq!(years, [1974, 1946]);
            }
            other => panic!("expected eras team, got {:?}", other),
        }

        // Listed twice in the source; the later record is the one found by name.
        let cubs = model.team_by_league_and_name("MLB", "Chicago Cubs").unwrap();
        match cubs.as_ref() {
            Team::Eras(cubs) => assert_eq!(cubs.eras[0].colors[0].hex, "#0e3386"),
            other => panic!("expected eras team, got {:?}", other),
        }
        assert_eq!(model.teams_by_league("mlb").unwrap().len(), 3);
    }
}
