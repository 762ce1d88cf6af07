//! API route handlers.
//!
//! Every handler reads the currently published model once and answers from
//! it, so a reload in the middle of a request never mixes two data files.

use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    http::{header, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, FixedOffset};
use percent_encoding::percent_decode_str;
use serde::Serialize;

use crate::http::response::{serve_json, ApiError};
use crate::http::server::AppState;
use crate::model::timestamp;

/// Links advertised by the root document.
const ROOT_LINKS: [&str; 2] = ["/teams{?search}", "/leagues"];

#[derive(Serialize)]
struct RootResponse {
    version: &'static str,
    #[serde(rename = "generationDate", serialize_with = "timestamp::serialize")]
    generation_date: DateTime<FixedOffset>,
    #[serde(rename = "_links")]
    links: [&'static str; 2],
}

/// `GET /`: version, data generation date and entry links.
pub async fn get_root(State(state): State<AppState>) -> Response {
    let model = state.model.load();
    serve_json(
        StatusCode::OK,
        &RootResponse {
            version: state.version,
            generation_date: model.generation_date(),
            links: ROOT_LINKS,
        },
    )
}

/// `GET /leagues`: every league with its link.
pub async fn get_leagues(State(state): State<AppState>) -> Response {
    let model = state.model.load();
    serve_json(StatusCode::OK, model.leagues())
}

/// `GET /teams[?search=]`: all teams, or those whose name matches `search`.
///
/// Only the first `search` parameter counts; an empty one lists every team.
pub async fn get_teams(State(state): State<AppState>, Query(params): Query<Vec<(String, String)>>) -> Response {
    let model = state.model.load();
    let search = params
        .iter()
        .find(|(key, _)| key == "search")
        .map(|(_, value)| value.as_str())
        .filter(|s| !s.is_empty());

    match search {
        Some(search) => serve_json(StatusCode::OK, &model.search(search)),
        None => serve_json(StatusCode::OK, model.all_teams()),
    }
}

/// Path segments after `/leagues/`, percent-decoded with invalid UTF-8
/// replaced. Used when the typed extractor rejects the path.
fn lossy_segments(uri: &Uri) -> Vec<String> {
    uri.path()
        .trim_start_matches("/leagues/")
        .split('/')
        .map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
        .collect()
}

/// `GET /leagues/{league}`: the teams of one league.
pub async fn get_league(
    State(state): State<AppState>,
    uri: Uri,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let league = match path {
        Ok(Path(league)) => league,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "league segment not decodable");
            lossy_segments(&uri).into_iter().next().unwrap_or_default()
        }
    };

    let model = state.model.load();
    let teams = model.teams_by_league(&league)?;
    Ok(serve_json(StatusCode::OK, teams))
}

/// `GET /leagues/{league}/{team}`: a single team.
pub async fn get_league_team(
    State(state): State<AppState>,
    uri: Uri,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Response, ApiError> {
    let (league, team) = match path {
        Ok(Path(segments)) => segments,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "league or team segment not decodable");
            let mut segments = lossy_segments(&uri).into_iter();
            (
                segments.next().unwrap_or_default(),
                segments.next().unwrap_or_default(),
            )
        }
    };

    let model = state.model.load();
    let team = model.team_by_league_and_name(&league, &team)?;
    Ok(serve_json(StatusCode::OK, team))
}

/// `GET /swagger.json`: the API description, served from disk.
pub async fn get_swagger(State(state): State<AppState>) -> Result<Response, ApiError> {
    match tokio::fs::read(state.swagger_path.as_path()).await {
        Ok(content) => Ok((
            StatusCode::OK,
            [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            content,
        )
            .into_response()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(not_found().await.into_response()),
        Err(e) => Err(ApiError::Internal(format!(
            "could not read {}: {}",
            state.swagger_path.display(),
            e
        ))),
    }
}

/// Fallback for paths outside the API.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"))],
        "404 page not found\n",
    )
}
