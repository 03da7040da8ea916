use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;

/// Uniform access to the named inference capabilities backing the API.
///
/// Generation capabilities return plain text; classifiers return the raw
/// provider payload untouched, since the dispatcher passes scores through
/// without interpreting them.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Short-form replies for the study-buddy chat.
    async fn generate_study_reply(&self, prompt: &str) -> Result<String, InferenceError>;

    /// Long-form replies for the advisor chat.
    async fn generate_advisor_reply(&self, prompt: &str) -> Result<String, InferenceError>;

    /// Conversational replies for general chat, voice chat, and confessions.
    async fn generate_companion_reply(&self, prompt: &str) -> Result<String, InferenceError>;

    /// Speech-to-text over an audio file on disk.
    async fn transcribe(&self, audio_path: &Path) -> Result<String, InferenceError>;

    /// Acoustic feature extraction over an audio file on disk.
    async fn extract_audio_features(&self, audio_path: &Path) -> Result<Value, InferenceError>;

    /// Seven-class emotion detection (mood check, analytics).
    async fn classify_emotion(&self, text: &str) -> Result<Value, InferenceError>;

    /// Fine-grained emotion detection (mood check, analytics).
    async fn classify_emotion_fine(&self, text: &str) -> Result<Value, InferenceError>;

    /// Emotion detection tuned for short social-media style text (confessions).
    async fn classify_emotion_social(&self, text: &str) -> Result<Value, InferenceError>;

    /// Toxicity scoring (confession moderation).
    async fn classify_toxicity(&self, text: &str) -> Result<Value, InferenceError>;

    /// Independent second toxicity opinion (confession moderation).
    async fn classify_toxicity_alt(&self, text: &str) -> Result<Value, InferenceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("audio io failed: {0}")]
    Io(#[from] std::io::Error),
}
