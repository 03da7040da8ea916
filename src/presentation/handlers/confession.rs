use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::ports::{InferenceError, ModelGateway};
use crate::infrastructure::observability::sanitize_for_log;
use crate::presentation::handlers::ErrorResponse;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct ConfessionRequest {
    pub confession_text: String,
}

#[derive(Serialize)]
pub struct ConfessionResponse {
    pub moderation_results: ModerationResults,
    pub confession_emotion: Value,
    pub ai_response: String,
}

#[derive(Serialize)]
pub struct ModerationResults {
    pub toxic_bert: Value,
    pub martin_ha_toxic_model: Value,
}

/// Two toxicity scores, one emotion score, and a supportive generated reply.
/// No accept/reject decision is made here; raw scores pass through.
#[tracing::instrument(skip(state, request))]
pub async fn submit_confession_handler<M>(
    State(state): State<AppState<M>>,
    Json(request): Json<ConfessionRequest>,
) -> impl IntoResponse
where
    M: ModelGateway + 'static,
{
    tracing::debug!(
        confession = %sanitize_for_log(&request.confession_text),
        "Processing confession"
    );

    match analyze_confession(&state, &request.confession_text).await {
        Ok(response) => {
            tracing::info!("Confession processed");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Confession analysis failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Confession analysis failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}

async fn analyze_confession<M>(
    state: &AppState<M>,
    confession_text: &str,
) -> Result<ConfessionResponse, InferenceError>
where
    M: ModelGateway,
{
    let toxic_bert = state.model_gateway.classify_toxicity(confession_text).await?;
    let martin_ha_toxic_model = state
        .model_gateway
        .classify_toxicity_alt(confession_text)
        .await?;
    let confession_emotion = state
        .model_gateway
        .classify_emotion_social(confession_text)
        .await?;

    let prompt = format!(
        "User confessed: {}. Provide a supportive response.",
        confession_text
    );
    let ai_response = state.model_gateway.generate_companion_reply(&prompt).await?;

    Ok(ConfessionResponse {
        moderation_results: ModerationResults {
            toxic_bert,
            martin_ha_toxic_model,
        },
        confession_emotion,
        ai_response,
    })
}
