use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Value, json};

use crate::application::ports::{InferenceError, ModelGateway};

/// Scripted gateway for router tests. Counts per-capability invocations and
/// remembers the audio path it was handed so tests can check temp-file
/// cleanup.
#[derive(Default)]
pub struct MockModelGateway {
    pub study_calls: AtomicUsize,
    pub advisor_calls: AtomicUsize,
    pub companion_calls: AtomicUsize,
    pub transcribe_calls: AtomicUsize,
    pub seen_audio_path: Mutex<Option<PathBuf>>,
    pub last_companion_prompt: Mutex<Option<String>>,
}

#[async_trait::async_trait]
impl ModelGateway for MockModelGateway {
    async fn generate_study_reply(&self, _prompt: &str) -> Result<String, InferenceError> {
        self.study_calls.fetch_add(1, Ordering::SeqCst);
        Ok("study buddy reply".to_string())
    }

    async fn generate_advisor_reply(&self, _prompt: &str) -> Result<String, InferenceError> {
        self.advisor_calls.fetch_add(1, Ordering::SeqCst);
        Ok("advisor reply".to_string())
    }

    async fn generate_companion_reply(&self, prompt: &str) -> Result<String, InferenceError> {
        self.companion_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_companion_prompt.lock().unwrap() = Some(prompt.to_string());
        Ok("companion reply".to_string())
    }

    async fn transcribe(&self, audio_path: &Path) -> Result<String, InferenceError> {
        self.transcribe_calls.fetch_add(1, Ordering::SeqCst);
        *self.seen_audio_path.lock().unwrap() = Some(audio_path.to_path_buf());
        Ok("mock transcript".to_string())
    }

    async fn extract_audio_features(&self, _audio_path: &Path) -> Result<Value, InferenceError> {
        Ok(json!({ "voice_features": "extracted_features_data" }))
    }

    async fn classify_emotion(&self, _text: &str) -> Result<Value, InferenceError> {
        Ok(json!([{ "label": "joy", "score": 0.91 }]))
    }

    async fn classify_emotion_fine(&self, _text: &str) -> Result<Value, InferenceError> {
        Ok(json!([{ "label": "gratitude", "score": 0.72 }]))
    }

    async fn classify_emotion_social(&self, _text: &str) -> Result<Value, InferenceError> {
        Ok(json!([{ "label": "optimism", "score": 0.65 }]))
    }

    async fn classify_toxicity(&self, _text: &str) -> Result<Value, InferenceError> {
        Ok(json!([{ "label": "toxic", "score": 0.02 }]))
    }

    async fn classify_toxicity_alt(&self, _text: &str) -> Result<Value, InferenceError> {
        Ok(json!([{ "label": "non-toxic", "score": 0.97 }]))
    }
}

/// Gateway whose transcription always fails, for exercising the voice-chat
/// error path. Still records the audio path it saw.
#[derive(Default)]
pub struct FailingTranscriptionGateway {
    pub seen_audio_path: Mutex<Option<PathBuf>>,
}

#[async_trait::async_trait]
impl ModelGateway for FailingTranscriptionGateway {
    async fn generate_study_reply(&self, _prompt: &str) -> Result<String, InferenceError> {
        Ok("study buddy reply".to_string())
    }

    async fn generate_advisor_reply(&self, _prompt: &str) -> Result<String, InferenceError> {
        Ok("advisor reply".to_string())
    }

    async fn generate_companion_reply(&self, _prompt: &str) -> Result<String, InferenceError> {
        Ok("companion reply".to_string())
    }

    async fn transcribe(&self, audio_path: &Path) -> Result<String, InferenceError> {
        *self.seen_audio_path.lock().unwrap() = Some(audio_path.to_path_buf());
        Err(InferenceError::ApiRequestFailed(
            "model loading timed out".to_string(),
        ))
    }

    async fn extract_audio_features(&self, _audio_path: &Path) -> Result<Value, InferenceError> {
        Ok(json!({ "voice_features": "extracted_features_data" }))
    }

    async fn classify_emotion(&self, _text: &str) -> Result<Value, InferenceError> {
        Ok(json!([]))
    }

    async fn classify_emotion_fine(&self, _text: &str) -> Result<Value, InferenceError> {
        Ok(json!([]))
    }

    async fn classify_emotion_social(&self, _text: &str) -> Result<Value, InferenceError> {
        Ok(json!([]))
    }

    async fn classify_toxicity(&self, _text: &str) -> Result<Value, InferenceError> {
        Ok(json!([]))
    }

    async fn classify_toxicity_alt(&self, _text: &str) -> Result<Value, InferenceError> {
        Ok(json!([]))
    }
}
