//! Roster endpoints: listing, single add, bulk import, status toggles and
//! clearing

use axum::{
    extract::{Path, Query, State},
    Json,
};
use fiesta_common::roster::{NewMember, QuickFilter, StatusField};
use fiesta_common::RosterEntry;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{ApiResult, AppState};

/// Query parameters for roster listing
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Accent-insensitive text search over the given name and surnames
    #[serde(default)]
    pub q: String,

    #[serde(default)]
    pub filter: QuickFilter,
}

#[derive(Debug, Serialize)]
pub struct MembersResponse {
    pub members: Vec<RosterEntry>,
}

/// GET /api/members
///
/// Entries in ascending order, optionally narrowed by `q` and `filter`.
pub async fn list_members(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<MembersResponse>> {
    let members = state.roster.search(&query.q, query.filter).await?;
    Ok(Json(MembersResponse { members }))
}

#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub success: bool,
    pub member: RosterEntry,
}

/// POST /api/admin/members
pub async fn add_member(
    State(state): State<AppState>,
    Json(input): Json<NewMember>,
) -> ApiResult<Json<MemberResponse>> {
    let member = state.roster.add(&input).await?;
    Ok(Json(MemberResponse {
        success: true,
        member,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub success: bool,
    pub count: usize,
}

/// POST /api/admin/members/import
///
/// Duplicate explicit order numbers reject the whole batch with 400; a store
/// failure mid-commit is reported with 500 and the cause.
pub async fn import_members(
    State(state): State<AppState>,
    Json(body): Json<ImportRequest>,
) -> ApiResult<Json<ImportResponse>> {
    let count = state.roster.bulk_import(&body.text).await?;
    Ok(Json(ImportResponse {
        success: true,
        count,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub field: StatusField,
    /// Value the client currently shows; the stored flag becomes its negation
    pub current: bool,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub success: bool,
    pub value: bool,
}

/// POST /api/admin/members/:id/toggle
pub async fn toggle_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ToggleRequest>,
) -> ApiResult<Json<ToggleResponse>> {
    let value = state.roster.toggle(&id, body.field, body.current).await?;
    Ok(Json(ToggleResponse {
        success: true,
        value,
    }))
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub success: bool,
    pub removed: usize,
}

/// DELETE /api/admin/members
pub async fn clear_members(State(state): State<AppState>) -> ApiResult<Json<ClearResponse>> {
    let removed = state.roster.clear().await?;
    info!(removed, "Roster cleared from admin panel");
    Ok(Json(ClearResponse {
        success: true,
        removed,
    }))
}
