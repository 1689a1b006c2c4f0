//! Announcement banner endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{ApiResult, AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct Announcement {
    pub text: String,
}

/// GET /api/announcement
///
/// Empty text means no banner is shown.
pub async fn get_announcement(State(state): State<AppState>) -> ApiResult<Json<Announcement>> {
    let text = state.announcement.get().await?;
    Ok(Json(Announcement { text }))
}

/// PUT /api/admin/announcement
///
/// Blank text removes the banner.
pub async fn update_announcement(
    State(state): State<AppState>,
    Json(body): Json<Announcement>,
) -> ApiResult<Json<Value>> {
    state.announcement.update(&body.text).await?;
    Ok(Json(json!({ "success": true })))
}
