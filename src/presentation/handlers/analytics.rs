use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use serde_json::Value;

use crate::application::ports::ModelGateway;
use crate::infrastructure::observability::sanitize_for_log;
use crate::presentation::handlers::ErrorResponse;
use crate::presentation::handlers::mood::TextAnalysisRequest;
use crate::presentation::state::AppState;

const INSIGHTS_PLACEHOLDER: &str =
    "Further analysis requires historical data and trend detection.";

#[derive(Serialize)]
pub struct TextPatternsResponse {
    pub j_hartmann_analysis: Value,
    pub sam_lowe_analysis: Value,
    pub insights: String,
}

/// Same classifier pair as the mood check, deliberately exposed as its own
/// endpoint, plus a static insights placeholder.
#[tracing::instrument(skip(state, request))]
pub async fn text_patterns_handler<M>(
    State(state): State<AppState<M>>,
    Json(request): Json<TextAnalysisRequest>,
) -> impl IntoResponse
where
    M: ModelGateway + 'static,
{
    tracing::debug!(text = %sanitize_for_log(&request.text), "Processing text-pattern analytics");

    let j_hartmann_analysis = match state.model_gateway.classify_emotion(&request.text).await {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(error = %e, "Emotion classification failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Text analysis failed: {}", e),
                }),
            )
                .into_response();
        }
    };

    let sam_lowe_analysis = match state.model_gateway.classify_emotion_fine(&request.text).await {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(error = %e, "Fine-grained emotion classification failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Text analysis failed: {}", e),
                }),
            )
                .into_response();
        }
    };

    tracing::info!("Text-pattern analytics completed");

    (
        StatusCode::OK,
        Json(TextPatternsResponse {
            j_hartmann_analysis,
            sam_lowe_analysis,
            insights: INSIGHTS_PLACEHOLDER.to_string(),
        }),
    )
        .into_response()
}
