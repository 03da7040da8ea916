use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::ports::ModelGateway;
use crate::domain::{streak_from_raw, streak_key};
use crate::presentation::handlers::ErrorResponse;
use crate::presentation::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetStreakParams {
    /// Stored verbatim; the client supplies the full value, there is no
    /// server-side increment and no bounds check.
    pub count: i64,
}

#[derive(Serialize)]
pub struct SetStreakResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct GetStreakResponse {
    pub user_id: String,
    pub streak: i64,
}

#[tracing::instrument(skip(state))]
pub async fn set_streak_handler<M>(
    State(state): State<AppState<M>>,
    Path(user_id): Path<String>,
    Query(params): Query<SetStreakParams>,
) -> impl IntoResponse
where
    M: ModelGateway + 'static,
{
    let key = streak_key(&user_id);

    match state
        .streak_store
        .set(&key, &params.count.to_string(), None)
        .await
    {
        Ok(()) => {
            tracing::info!(user_id = %user_id, count = params.count, "Streak updated");
            (
                StatusCode::OK,
                Json(SetStreakResponse {
                    message: format!("Streak for user {} set to {}", user_id, params.count),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, user_id = %user_id, "Streak write failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Streak update failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn get_streak_handler<M>(
    State(state): State<AppState<M>>,
    Path(user_id): Path<String>,
) -> impl IntoResponse
where
    M: ModelGateway + 'static,
{
    let key = streak_key(&user_id);

    match state.streak_store.get(&key).await {
        Ok(raw) => {
            let streak = streak_from_raw(raw);
            (StatusCode::OK, Json(GetStreakResponse { user_id, streak })).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, user_id = %user_id, "Streak read failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Streak lookup failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}
