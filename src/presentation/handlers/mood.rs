use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::ports::ModelGateway;
use crate::infrastructure::observability::sanitize_for_log;
use crate::presentation::handlers::ErrorResponse;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct TextAnalysisRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct MoodCheckResponse {
    pub j_hartmann_emotion: Value,
    pub sam_lowe_emotion: Value,
}

/// Two independent emotion classifiers, raw results side by side.
#[tracing::instrument(skip(state, request))]
pub async fn mood_check_handler<M>(
    State(state): State<AppState<M>>,
    Json(request): Json<TextAnalysisRequest>,
) -> impl IntoResponse
where
    M: ModelGateway + 'static,
{
    tracing::debug!(text = %sanitize_for_log(&request.text), "Processing mood check");

    let j_hartmann_emotion = match state.model_gateway.classify_emotion(&request.text).await {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(error = %e, "Emotion classification failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Emotion analysis failed: {}", e),
                }),
            )
                .into_response();
        }
    };

    let sam_lowe_emotion = match state.model_gateway.classify_emotion_fine(&request.text).await {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(error = %e, "Fine-grained emotion classification failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Emotion analysis failed: {}", e),
                }),
            )
                .into_response();
        }
    };

    tracing::info!("Mood check completed");

    (
        StatusCode::OK,
        Json(MoodCheckResponse {
            j_hartmann_emotion,
            sam_lowe_emotion,
        }),
    )
        .into_response()
}
