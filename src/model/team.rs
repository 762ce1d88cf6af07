//! Team records in both supported data file layouts.
//!
//! The eras layout carries a palette history per team; the flat layout
//! carries a single list of hex strings. A data file uses exactly one of
//! them, and each layout serializes back with its own field names.

use serde::{Deserialize, Serialize};

/// A named color within an era.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub name: String,
    pub hex: String,
}

/// The palette a team used starting in a given year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Era {
    pub year: i32,
    pub colors: Vec<Color>,
}

/// A team in the eras layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EraTeam {
    /// Optional numeric identifier, omitted from output when zero.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,

    pub name: String,

    pub eras: Vec<Era>,

    pub league: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub division: String,

    /// Canonical link, derived when the index is built.
    #[serde(rename = "_link", skip_deserializing)]
    pub link: String,
}

/// A team in the flat layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatTeam {
    pub name: String,

    pub colors: Vec<String>,

    pub league: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub conference: String,

    /// Canonical link, derived when the index is built.
    #[serde(skip_deserializing)]
    pub link: String,
}

fn is_zero(id: &i64) -> bool {
    *id == 0
}

/// A team as held by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Team {
    Eras(EraTeam),
    Flat(FlatTeam),
}

impl Team {
    pub fn name(&self) -> &str {
        match self {
            Team::Eras(t) => &t.name,
            Team::Flat(t) => &t.name,
        }
    }

    pub fn league(&self) -> &str {
        match self {
            Team::Eras(t) => &t.league,
            Team::Flat(t) => &t.league,
        }
    }

    /// Division (eras layout) or conference (flat layout), if any.
    pub fn grouping(&self) -> Option<&str> {
        let label = match self {
            Team::Eras(t) => &t.division,
            Team::Flat(t) => &t.conference,
        };
        (!label.is_empty()).then_some(label.as_str())
    }

    pub fn link(&self) -> &str {
        match self {
            Team::Eras(t) => &t.link,
            Team::Flat(t) => &t.link,
        }
    }

    pub(crate) fn set_link(&mut self, link: String) {
        match self {
            Team::Eras(t) => t.link = link,
            Team::Flat(t) => t.link = link,
        }
    }
}

impl From<EraTeam> for Team {
    fn from(team: EraTeam) -> Self {
        Team::Eras(team)
    }
}

impl From<FlatTeam> for Team {
    fn from(team: FlatTeam) -> Self {
        Team::Flat(team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(name: &str, conference: &str) -> Team {
        Team::Flat(FlatTeam {
            name: name.into(),
            colors: vec!["#f00".into(), "#0f0".into()],
            league: "Fruit".into(),
            conference: conference.into(),
            link: "/leagues/fruit/apples".into(),
        })
    }

    #[test]
    fn test_flat_team_output() {
        let json = serde_json::to_string(&flat("Apples", "Sweet")).unwrap();
        assert_eq!(
            json,
            r##"{"name":"Apples","colors":["#f00","#0f0"],"league":"Fruit","conference":"Sweet","link":"/leagues/fruit/apples"}"##
        );

        let json = serde_json::to_string(&flat("Apples", "")).unwrap();
        assert!(!json.contains("conference"));
    }

    #[test]
    fn test_era_team_output() {
        let team = Team::Eras(EraTeam {
            id: 0,
            name: "Bears".into(),
            eras: vec![Era {
                year: 1920,
                colors: vec![Color {
                    name: "Navy".into(),
                    hex: "#0b162a".into(),
                }],
            }],
            league: "NFL".into(),
            division: String::new(),
            link: "/leagues/nfl/bears".into(),
        });
        let json = serde_json::to_string(&team).unwrap();
        assert_eq!(
            json,
            r##"{"name":"Bears","eras":[{"year":1920,"colors":[{"name":"Navy","hex":"#0b162a"}]}],"league":"NFL","_link":"/leagues/nfl/bears"}"##
        );
    }

    #[test]
    fn test_link_is_not_read_from_input() {
        let team: FlatTeam = serde_json::from_str(
            r#"{"name":"Apples","colors":[],"league":"Fruit","link":"/elsewhere"}"#,
        )
        .unwrap();
        assert_eq!(team.link, "");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(flat("Apples", "Sweet").grouping(), Some("Sweet"));
        assert_eq!(flat("Apples", "").grouping(), None);
    }
}
