//! Mini-game high score endpoints

use axum::{extract::State, Json};
use fiesta_common::highscore::{HighScore, ScoreSubmission};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighScoreResponse {
    pub high_score: Option<HighScore>,
    pub total_games: i64,
}

/// GET /api/highscore
pub async fn get_high_score(State(state): State<AppState>) -> ApiResult<Json<HighScoreResponse>> {
    Ok(Json(HighScoreResponse {
        high_score: state.high_scores.get().await?,
        total_games: state.high_scores.total_games().await?,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub name: String,
    pub score: i64,
}

/// POST /api/highscore
///
/// Counts the finished game and replaces the record on a strictly higher
/// score.
pub async fn submit_score(
    State(state): State<AppState>,
    Json(body): Json<ScoreRequest>,
) -> ApiResult<Json<ScoreSubmission>> {
    if body.score < 0 {
        return Err(ApiError::BadRequest("Puntuación no válida".to_string()));
    }
    let outcome = state.high_scores.submit(&body.name, body.score).await?;
    Ok(Json(outcome))
}

/// POST /api/admin/highscore/reset
pub async fn reset_high_score(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    state.high_scores.reset().await?;
    Ok(Json(json!({ "success": true })))
}
