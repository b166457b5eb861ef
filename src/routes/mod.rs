use log::info;
use rocket::serde::json::{self, Json};
use rocket::serde::{Deserialize, Serialize};
use rocket::{delete, get, post, State};

use crate::store::{NewScore, PlayerScore, ScoreRecord, ScoreStore};

pub mod request_error;

pub use request_error::{ApiError, ApiResult};

/// Every listing endpoint is capped to this many records.
const TOP_LIMIT: u32 = 10;

/// Candidate body of `POST /scores`. Anything that does not parse into
/// this shape is rejected before the store is touched.
#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ScoreSubmission {
    name: String,
    score: f64,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct SubmitResponse {
    success: bool,
    scores: Vec<ScoreRecord>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ResetResponse {
    success: bool,
    message: &'static str,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct HealthResponse {
    status: &'static str,
    database: &'static str,
}

#[get("/")]
pub fn index() -> &'static str {
    "This is an online score leaderboard server!"
}

/// Top 10 records, descending by score.
#[get("/scores")]
pub async fn get_scores(store: &State<ScoreStore>) -> ApiResult<Json<Vec<ScoreRecord>>> {
    let scores = store
        .top_n(TOP_LIMIT)
        .await
        .map_err(|error| ApiError::store(error, "Failed to fetch scores"))?;
    Ok(Json(scores))
}

/// Records a score attempt and responds with the updated leaderboard.
/// Intentionally non-idempotent: every call creates a new record.
#[post("/scores", format = "json", data = "<submission>")]
pub async fn submit_score(
    submission: Result<Json<ScoreSubmission>, json::Error<'_>>,
    store: &State<ScoreStore>,
) -> ApiResult<Json<SubmitResponse>> {
    let submission = match submission {
        Ok(json) => json.0,
        Err(_) => return Err(ApiError::InvalidData),
    };
    let new_score =
        NewScore::new(&submission.name, submission.score).map_err(|_| ApiError::InvalidData)?;

    store
        .insert(new_score)
        .await
        .map_err(|error| ApiError::store(error, "Failed to save score"))?;

    let scores = store
        .top_n(TOP_LIMIT)
        .await
        .map_err(|error| ApiError::store(error, "Failed to save score"))?;
    Ok(Json(SubmitResponse {
        success: true,
        scores,
    }))
}

/// Up to 10 records for one player, matched by case-insensitive exact name.
/// An unknown player yields an empty list, not an error.
#[get("/scores/<name>")]
pub async fn get_player_scores(
    name: &str,
    store: &State<ScoreStore>,
) -> ApiResult<Json<Vec<PlayerScore>>> {
    let scores = store
        .by_player(name, TOP_LIMIT)
        .await
        .map_err(|error| ApiError::store(error, "Failed to fetch player scores"))?;
    Ok(Json(scores))
}

/// Wipes the whole leaderboard. Idempotent.
#[delete("/scores/reset")]
pub async fn reset_scores(store: &State<ScoreStore>) -> ApiResult<Json<ResetResponse>> {
    let removed = store
        .delete_all()
        .await
        .map_err(|error| ApiError::store(error, "Failed to delete scores"))?;
    info!("leaderboard reset, {} records removed", removed);
    Ok(Json(ResetResponse {
        success: true,
        message: "All scores deleted",
    }))
}

/// Always answers 200; the body reflects store connectivity.
#[get("/health")]
pub async fn health(store: &State<ScoreStore>) -> Json<HealthResponse> {
    let connected = store.is_connected().await;
    Json(HealthResponse {
        status: if connected { "OK" } else { "DEGRADED" },
        database: if connected { "Connected" } else { "Disconnected" },
    })
}
