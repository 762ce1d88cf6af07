//! Team data file loading.
//!
//! # Data Flow
//! ```text
//! data file (JSON)
//!     → read bytes (LoadError::Io)
//!     → resolve schema (configured, or detected from the first team)
//!     → deserialize with that one schema (LoadError::Parse)
//!     → RawData (generation timestamp + teams in source order)
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::model::error::LoadError;
use crate::model::team::{EraTeam, FlatTeam, Team};

/// Layout of the team records in a data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    /// Decide from the first team record.
    #[default]
    Auto,
    /// Teams carry `eras` and an optional `division`.
    Eras,
    /// Teams carry a flat `colors` list and an optional `conference`.
    Flat,
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Schema::Auto => "auto",
            Schema::Eras => "eras",
            Schema::Flat => "flat",
        };
        f.write_str(name)
    }
}

impl FromStr for Schema {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Schema::Auto),
            "eras" => Ok(Schema::Eras),
            "flat" => Ok(Schema::Flat),
            other => Err(format!("unknown schema '{}', expected auto, eras or flat", other)),
        }
    }
}

/// How the data file is stored on disk.
#[derive(Debug, Deserialize)]
struct DataFile<T> {
    generated: DateTime<FixedOffset>,
    teams: Vec<T>,
}

/// Decoded file content, before indexing.
#[derive(Debug)]
pub struct RawData {
    pub generated: DateTime<FixedOffset>,
    /// The schema actually used, never `Auto`.
    pub schema: Schema,
    /// Teams in source order.
    pub teams: Vec<Team>,
}

/// Read and decode a data file.
pub fn load(path: &Path, schema: Schema) -> Result<RawData, LoadError> {
    let content = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode(&content, schema)
}

/// Decode data file content.
pub fn decode(content: &[u8], schema: Schema) -> Result<RawData, LoadError> {
    let schema = match schema {
        Schema::Auto => detect(content)?,
        fixed => fixed,
    };

    match schema {
        Schema::Flat => decode_as::<FlatTeam>(content, schema),
        _ => decode_as::<EraTeam>(content, schema),
    }
}

fn decode_as<T>(content: &[u8], schema: Schema) -> Result<RawData, LoadError>
where
    T: for<'de> Deserialize<'de> + Into<Team>,
{
    let file: DataFile<T> = serde_json::from_slice(content)?;
    Ok(RawData {
        generated: file.generated,
        schema,
        teams: file.teams.into_iter().map(Into::into).collect(),
    })
}

#[derive(Deserialize)]
struct Probe {
    #[serde(default)]
    teams: Vec<ProbeTeam>,
}

#[derive(Deserialize)]
struct ProbeTeam {
    #[serde(default)]
    eras: Option<IgnoredAny>,
    #[serde(default)]
    colors: Option<IgnoredAny>,
}

/// Pick a schema from the keys of the first team.
fn detect(content: &[u8]) -> Result<Schema, LoadError> {
    let probe: Probe = serde_json::from_slice(content)?;
    let Some(first) = probe.teams.first() else {
        return Ok(Schema::Eras);
    };

    match (first.eras.is_some(), first.colors.is_some()) {
        (true, false) => Ok(Schema::Eras),
        (false, true) => Ok(Schema::Flat),
        (true, true) => Err(LoadError::UnknownSchema(
            "first team has both `eras` and `colors`".to_string(),
        )),
        (false, false) => Err(LoadError::UnknownSchema(
            "first team has neither `eras` nor `colors`".to_string(),
        )),
    }
}
