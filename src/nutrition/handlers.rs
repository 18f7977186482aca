use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::sessions::Session;
use crate::state::AppState;

use super::dto::{CreatedSessionResponse, ExerciseQuery, SearchRequest, SearchView};
use super::error::NutritionError;
use super::exercise::{self, ExerciseDurations};
use super::services::{current_view, search_in_session};

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/:id", get(get_session).delete(delete_session))
        .route("/sessions/:id/search", post(search))
}

pub fn calculator_routes() -> Router<AppState> {
    Router::new().route("/exercise", get(exercise_durations))
}

#[instrument(skip(state))]
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, HeaderMap, Json<CreatedSessionResponse>), (StatusCode, String)> {
    let session = state.sessions.create().await;
    info!(session_id = %session.id, "session created");

    let mut headers = HeaderMap::new();
    let location = HeaderValue::from_str(&format!("/api/v1/sessions/{}", session.id))
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    headers.insert(header::LOCATION, location);

    Ok((
        StatusCode::CREATED,
        headers,
        Json(CreatedSessionResponse {
            id: session.id,
            created_at: session.created_at,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SearchView>, (StatusCode, String)> {
    let session = find_session(&state, id).await?;
    Ok(Json(current_view(&session).await))
}

#[instrument(skip(state, body))]
pub async fn search(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SearchRequest>,
) -> Result<Json<SearchView>, (StatusCode, String)> {
    let session = find_session(&state, id).await?;
    let view = search_in_session(&state, &session, &body.query).await;
    Ok(Json(view))
}

#[instrument(skip(state))]
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    if !state.sessions.remove(id).await {
        warn!(session_id = %id, "delete of unknown session");
        return Err((StatusCode::NOT_FOUND, "Session not found".into()));
    }
    let remaining = state.sessions.len().await;
    info!(session_id = %id, remaining, "session removed");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument]
pub async fn exercise_durations(
    Query(q): Query<ExerciseQuery>,
) -> Result<Json<ExerciseDurations>, (StatusCode, String)> {
    exercise::compute(q.calories)
        .map(Json)
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                NutritionError::InvalidCalories(q.calories).to_string(),
            )
        })
}

async fn find_session(
    state: &AppState,
    id: Uuid,
) -> Result<std::sync::Arc<Session>, (StatusCode, String)> {
    state.sessions.get(id).await.ok_or_else(|| {
        warn!(session_id = %id, "session not found");
        (StatusCode::NOT_FOUND, "Session not found".into())
    })
}
