//! Server-Sent Events for roster, announcement and high score changes

use crate::AppState;
use axum::{
    extract::State,
    response::sse::{Event, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;

/// GET /events - SSE stream of change notifications
///
/// Streams events:
/// - ConnectionStatus (sent once on connect)
/// - RosterChanged, AnnouncementChanged, HighScoreChanged (no payload;
///   clients refetch the affected resource)
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    fiesta_common::sse::create_event_sse_stream(&state.events, "fiesta-server")
}
