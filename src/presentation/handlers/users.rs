use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::ports::ModelGateway;
use crate::domain::NewUser;
use crate::presentation::handlers::ErrorResponse;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Serialize)]
pub struct CreateUserResponse {
    pub user_id: String,
}

/// Uniqueness check then insert. The check and the insert are not atomic;
/// a concurrent duplicate slipping between them is accepted, matching the
/// streak counter's last-writer-wins posture.
#[tracing::instrument(skip(state, request), fields(username = %request.username))]
pub async fn create_user_handler<M>(
    State(state): State<AppState<M>>,
    Json(request): Json<CreateUserRequest>,
) -> impl IntoResponse
where
    M: ModelGateway + 'static,
{
    match state
        .user_repository
        .find_by_username(&request.username)
        .await
    {
        Ok(Some(_)) => {
            tracing::warn!("Username already taken");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Username already exists".to_string(),
                }),
            )
                .into_response();
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!(error = %e, "Username lookup failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("User lookup failed: {}", e),
                }),
            )
                .into_response();
        }
    }

    let new_user = NewUser {
        username: request.username,
        email: request.email,
        display_name: request.display_name,
    };

    match state.user_repository.insert(&new_user).await {
        Ok(user_id) => {
            tracing::info!(user_id = %user_id, "User created");
            (StatusCode::OK, Json(CreateUserResponse { user_id })).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "User insert failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("User creation failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}
