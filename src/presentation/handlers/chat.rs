use std::path::Path;

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::application::ports::{InferenceError, ModelGateway};
use crate::domain::ChatKind;
use crate::infrastructure::observability::sanitize_for_log;
use crate::presentation::handlers::ErrorResponse;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
    pub chat_type: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Serialize)]
pub struct VoiceChatResponse {
    pub transcribed_text: String,
    pub ai_response: String,
    pub audio_features: Value,
}

#[tracing::instrument(skip(state, request), fields(chat_type = %request.chat_type))]
pub async fn text_chat_handler<M>(
    State(state): State<AppState<M>>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse
where
    M: ModelGateway + 'static,
{
    tracing::debug!(prompt = %sanitize_for_log(&request.prompt), "Processing text chat");

    let kind = match request.chat_type.parse::<ChatKind>() {
        Ok(kind) => kind,
        Err(_) => {
            tracing::warn!(chat_type = %request.chat_type, "Unrecognized chat_type");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Invalid chat_type".to_string(),
                }),
            )
                .into_response();
        }
    };

    let result = match kind {
        ChatKind::StudyBuddy => state.model_gateway.generate_study_reply(&request.prompt).await,
        ChatKind::Advisor => state.model_gateway.generate_advisor_reply(&request.prompt).await,
        ChatKind::General => {
            state
                .model_gateway
                .generate_companion_reply(&request.prompt)
                .await
        }
    };

    match result {
        Ok(response) => {
            tracing::info!(chat_type = %kind, "Text chat completed");
            (StatusCode::OK, Json(ChatResponse { response })).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Text chat generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Generation failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}

#[tracing::instrument(skip(state, multipart))]
pub async fn voice_chat_handler<M>(
    State(state): State<AppState<M>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    M: ModelGateway + 'static,
{
    let field = match multipart.next_field().await {
        Ok(Some(f)) => f,
        Ok(None) => {
            tracing::warn!("Voice chat request with no file");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "No audio file uploaded".to_string(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read multipart");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read multipart: {}", e),
                }),
            )
                .into_response();
        }
    };

    let filename = field.file_name().unwrap_or("upload.wav").to_string();

    let data = match field.bytes().await {
        Ok(d) => d,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read audio bytes");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read file: {}", e),
                }),
            )
                .into_response();
        }
    };

    tracing::debug!(filename = %filename, bytes = data.len(), "Audio upload received");

    // A randomly named temp file avoids collisions between concurrent
    // uploads sharing a filename; dropping it removes the file on every
    // exit path, including panics.
    let temp_file = match materialize_upload(&filename, &data).await {
        Ok(f) => f,
        Err(e) => {
            tracing::error!(error = %e, "Failed to stage audio upload");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Error processing audio: {}", e),
                }),
            )
                .into_response();
        }
    };

    let result = run_voice_pipeline(&state, temp_file.path()).await;
    drop(temp_file);

    match result {
        Ok(response) => {
            tracing::info!("Voice chat completed");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Voice chat pipeline failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Error processing audio: {}", e),
                }),
            )
                .into_response()
        }
    }
}

async fn materialize_upload(filename: &str, data: &[u8]) -> Result<NamedTempFile, std::io::Error> {
    let suffix = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_else(|| ".wav".to_string());

    let temp_file = tempfile::Builder::new()
        .prefix("voice-")
        .suffix(&suffix)
        .tempfile()?;

    tokio::fs::write(temp_file.path(), data).await?;

    Ok(temp_file)
}

/// Strict linear pipeline: transcribe, reply to the transcript, extract
/// audio features. Any failure aborts the whole request.
async fn run_voice_pipeline<M>(
    state: &AppState<M>,
    audio_path: &Path,
) -> Result<VoiceChatResponse, InferenceError>
where
    M: ModelGateway,
{
    let transcribed_text = state.model_gateway.transcribe(audio_path).await?;

    let ai_response = state
        .model_gateway
        .generate_companion_reply(&transcribed_text)
        .await?;

    let audio_features = state.model_gateway.extract_audio_features(audio_path).await?;

    Ok(VoiceChatResponse {
        transcribed_text,
        ai_response,
        audio_features,
    })
}
