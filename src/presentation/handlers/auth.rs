use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::ports::ModelGateway;
use crate::presentation::handlers::ErrorResponse;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub data: Value,
}

#[derive(Serialize)]
pub struct CurrentUserResponse {
    pub user: Value,
}

/// Presence check that must run before anything reaches the provider.
fn require_credentials(request: &CredentialsRequest) -> Result<(&str, &str), ErrorResponse> {
    match (request.email.as_deref(), request.password.as_deref()) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            Ok((email, password))
        }
        _ => Err(ErrorResponse {
            error: "Email and password are required".to_string(),
        }),
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

// Provider failures on auth paths map to 400: the original treated them as
// client-caused, and the asymmetry with the 500s on inference paths is
// preserved deliberately.

#[tracing::instrument(skip(state, request))]
pub async fn sign_up_handler<M>(
    State(state): State<AppState<M>>,
    Json(request): Json<CredentialsRequest>,
) -> impl IntoResponse
where
    M: ModelGateway + 'static,
{
    let (email, password) = match require_credentials(&request) {
        Ok(creds) => creds,
        Err(response) => {
            tracing::warn!("Sign-up request with missing credentials");
            return (StatusCode::BAD_REQUEST, Json(response)).into_response();
        }
    };

    match state.account_service.sign_up(email, password).await {
        Ok(data) => {
            tracing::info!("Sign-up forwarded");
            (
                StatusCode::OK,
                Json(AuthResponse {
                    message: "Sign up successful".to_string(),
                    data,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Sign-up failed");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Sign up failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}

#[tracing::instrument(skip(state, request))]
pub async fn sign_in_handler<M>(
    State(state): State<AppState<M>>,
    Json(request): Json<CredentialsRequest>,
) -> impl IntoResponse
where
    M: ModelGateway + 'static,
{
    let (email, password) = match require_credentials(&request) {
        Ok(creds) => creds,
        Err(response) => {
            tracing::warn!("Sign-in request with missing credentials");
            return (StatusCode::BAD_REQUEST, Json(response)).into_response();
        }
    };

    match state.account_service.sign_in(email, password).await {
        Ok(data) => {
            tracing::info!("Sign-in forwarded");
            (
                StatusCode::OK,
                Json(AuthResponse {
                    message: "Sign in successful".to_string(),
                    data,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Sign-in failed");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Sign in failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}

#[tracing::instrument(skip(state, headers))]
pub async fn sign_out_handler<M>(
    State(state): State<AppState<M>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    M: ModelGateway + 'static,
{
    match state.account_service.sign_out(bearer_token(&headers)).await {
        Ok(data) => {
            tracing::info!("Sign-out forwarded");
            (
                StatusCode::OK,
                Json(AuthResponse {
                    message: "Sign out successful".to_string(),
                    data,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Sign-out failed");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Sign out failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}

#[tracing::instrument(skip(state, headers))]
pub async fn current_user_handler<M>(
    State(state): State<AppState<M>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    M: ModelGateway + 'static,
{
    match state
        .account_service
        .current_user(bearer_token(&headers))
        .await
    {
        Ok(user) => (StatusCode::OK, Json(CurrentUserResponse { user })).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Current-user lookup failed");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Get user failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}
