use std::path::Path;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::application::ports::{InferenceError, ModelGateway};

const STUDY_BUDDY_MODEL: &str = "microsoft/DialoGPT-medium";
const ADVISOR_MODEL: &str = "microsoft/DialoGPT-large";
const COMPANION_MODEL: &str = "facebook/blenderbot-400M-distill";
const TRANSCRIPTION_MODEL: &str = "openai/whisper-base";
const EMOTION_MODEL: &str = "j-hartmann/emotion-english-distilroberta-base";
const EMOTION_FINE_MODEL: &str = "SamLowe/roberta-base-go_emotions";
const EMOTION_SOCIAL_MODEL: &str = "cardiffnlp/twitter-roberta-base-emotion";
const TOXICITY_MODEL: &str = "unitary/toxic-bert";
const TOXICITY_ALT_MODEL: &str = "martin-ha/toxic-comment-model";

const STUDY_MAX_NEW_TOKENS: u32 = 50;
const ADVISOR_MAX_NEW_TOKENS: u32 = 100;

/// Hosted-inference adapter: every capability is one POST against a named
/// pre-trained model.
pub struct HfInferenceGateway {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl HfInferenceGateway {
    pub fn new(client: reqwest::Client, base_url: String, api_token: String) -> Self {
        Self {
            client,
            base_url,
            api_token,
        }
    }

    async fn call_model(&self, model: &str, body: &Value) -> Result<Value, InferenceError> {
        let url = format!("{}/models/{}", self.base_url, model);

        tracing::debug!(model = %model, "Sending inference request");

        let mut request = self.client.post(&url).json(body);
        if !self.api_token.is_empty() {
            request = request.bearer_auth(&self.api_token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| InferenceError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(InferenceError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(format!("body: {}", e)))
    }

    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        max_new_tokens: Option<u32>,
    ) -> Result<String, InferenceError> {
        let body = match max_new_tokens {
            Some(n) => json!({ "inputs": prompt, "parameters": { "max_new_tokens": n } }),
            None => json!({ "inputs": prompt }),
        };
        let payload = self.call_model(model, &body).await?;
        extract_generated_text(&payload)
    }

    async fn classify(&self, model: &str, text: &str) -> Result<Value, InferenceError> {
        self.call_model(model, &json!({ "inputs": text })).await
    }
}

/// Generation endpoints answer `[{"generated_text": ...}]` (sometimes without
/// the array wrapper).
fn extract_generated_text(payload: &Value) -> Result<String, InferenceError> {
    let entry = match payload {
        Value::Array(items) => items.first(),
        other => Some(other),
    };

    entry
        .and_then(|v| v.get("generated_text"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            InferenceError::InvalidResponse(format!("missing generated_text in: {}", payload))
        })
}

#[async_trait]
impl ModelGateway for HfInferenceGateway {
    async fn generate_study_reply(&self, prompt: &str) -> Result<String, InferenceError> {
        self.generate(STUDY_BUDDY_MODEL, prompt, Some(STUDY_MAX_NEW_TOKENS))
            .await
    }

    async fn generate_advisor_reply(&self, prompt: &str) -> Result<String, InferenceError> {
        self.generate(ADVISOR_MODEL, prompt, Some(ADVISOR_MAX_NEW_TOKENS))
            .await
    }

    async fn generate_companion_reply(&self, prompt: &str) -> Result<String, InferenceError> {
        self.generate(COMPANION_MODEL, prompt, None).await
    }

    async fn transcribe(&self, audio_path: &Path) -> Result<String, InferenceError> {
        let audio_data = tokio::fs::read(audio_path).await?;
        let url = format!("{}/models/{}", self.base_url, TRANSCRIPTION_MODEL);

        tracing::debug!(
            model = TRANSCRIPTION_MODEL,
            bytes = audio_data.len(),
            "Sending audio for transcription"
        );

        let mut request = self.client.post(&url).body(audio_data);
        if !self.api_token.is_empty() {
            request = request.bearer_auth(&self.api_token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| InferenceError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(InferenceError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(format!("body: {}", e)))?;

        let transcript = payload
            .get("text")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                InferenceError::InvalidResponse(format!("missing text in: {}", payload))
            })?
            .trim()
            .to_string();

        tracing::info!(chars = transcript.len(), "Transcription completed");

        Ok(transcript)
    }

    async fn extract_audio_features(&self, audio_path: &Path) -> Result<Value, InferenceError> {
        // Acoustic feature extraction needs an openSMILE-style toolchain that
        // is not wired up yet; the contract ships a fixed placeholder payload.
        tracing::debug!(path = %audio_path.display(), "Audio feature extraction placeholder");
        Ok(json!({ "voice_features": "extracted_features_data" }))
    }

    async fn classify_emotion(&self, text: &str) -> Result<Value, InferenceError> {
        self.classify(EMOTION_MODEL, text).await
    }

    async fn classify_emotion_fine(&self, text: &str) -> Result<Value, InferenceError> {
        self.classify(EMOTION_FINE_MODEL, text).await
    }

    async fn classify_emotion_social(&self, text: &str) -> Result<Value, InferenceError> {
        self.classify(EMOTION_SOCIAL_MODEL, text).await
    }

    async fn classify_toxicity(&self, text: &str) -> Result<Value, InferenceError> {
        self.classify(TOXICITY_MODEL, text).await
    }

    async fn classify_toxicity_alt(&self, text: &str) -> Result<Value, InferenceError> {
        self.classify(TOXICITY_ALT_MODEL, text).await
    }
}
