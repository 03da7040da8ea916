use std::sync::Arc;
use std::sync::atomic::Ordering;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use bloom_backend::application::ports::{
    AccountService, ModelGateway, StreakStore, UserRepository,
};
use bloom_backend::infrastructure::auth::{MockAccountService, RejectingAccountService};
use bloom_backend::infrastructure::inference::{FailingTranscriptionGateway, MockModelGateway};
use bloom_backend::infrastructure::persistence::{MockStreakStore, MockUserRepository};
use bloom_backend::presentation::config::{
    AtlasSettings, Environment, InferenceSettings, LoggingSettings, RedisSettings, ServerSettings,
    Settings, SupabaseSettings,
};
use bloom_backend::presentation::{AppState, create_router};

const MULTIPART_BOUNDARY: &str = "test-boundary";

fn test_settings() -> Settings {
    Settings {
        environment: Environment::Test,
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 8000,
        },
        inference: InferenceSettings {
            base_url: "http://localhost:9999".to_string(),
            api_token: String::new(),
        },
        redis: RedisSettings {
            url: "redis://localhost:6379/0".to_string(),
        },
        supabase: SupabaseSettings {
            url: "http://localhost:54321".to_string(),
            anon_key: String::new(),
        },
        atlas: AtlasSettings {
            base_url: "http://localhost:8080".to_string(),
            api_key: String::new(),
            data_source: "bloom".to_string(),
            database: "bloom_db".to_string(),
        },
        logging: LoggingSettings {
            level: "info".to_string(),
            enable_json: false,
        },
    }
}

fn app_with<M>(
    gateway: Arc<M>,
    account_service: Arc<dyn AccountService>,
    streak_store: Arc<dyn StreakStore>,
    user_repository: Arc<dyn UserRepository>,
) -> Router
where
    M: ModelGateway + 'static,
{
    create_router(AppState {
        model_gateway: gateway,
        streak_store,
        account_service,
        user_repository,
        settings: test_settings(),
    })
}

struct TestApp {
    router: Router,
    gateway: Arc<MockModelGateway>,
    account_service: Arc<MockAccountService>,
    user_repository: Arc<MockUserRepository>,
}

fn test_app() -> TestApp {
    let gateway = Arc::new(MockModelGateway::default());
    let account_service = Arc::new(MockAccountService::default());
    let user_repository = Arc::new(MockUserRepository::default());

    let router = app_with(
        Arc::clone(&gateway),
        Arc::clone(&account_service) as Arc<dyn AccountService>,
        Arc::new(MockStreakStore::default()),
        Arc::clone(&user_repository) as Arc<dyn UserRepository>,
    );

    TestApp {
        router,
        gateway,
        account_service,
        user_repository,
    }
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn voice_request(filename: &str, data: &str) -> Request<Body> {
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"audio_file\"; filename=\"{filename}\"\r\nContent-Type: audio/wav\r\n\r\n{data}\r\n--{b}--\r\n",
        b = MULTIPART_BOUNDARY,
    );
    Request::builder()
        .method("POST")
        .uri("/chat/voice")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_returns_healthy() {
    let app = test_app();

    let response = app.router.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn text_chat_rejects_unknown_chat_type() {
    let app = test_app();

    let response = app
        .router
        .oneshot(json_request(
            "/chat/text",
            json!({ "prompt": "hi", "chat_type": "therapist" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Invalid chat_type");
    assert_eq!(app.gateway.study_calls.load(Ordering::SeqCst), 0);
    assert_eq!(app.gateway.advisor_calls.load(Ordering::SeqCst), 0);
    assert_eq!(app.gateway.companion_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn text_chat_routes_study_buddy_to_study_capability() {
    let app = test_app();

    let response = app
        .router
        .oneshot(json_request(
            "/chat/text",
            json!({ "prompt": "explain photosynthesis", "chat_type": "study_buddy" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["response"], "study buddy reply");
    assert_eq!(app.gateway.study_calls.load(Ordering::SeqCst), 1);
    assert_eq!(app.gateway.advisor_calls.load(Ordering::SeqCst), 0);
    assert_eq!(app.gateway.companion_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn text_chat_routes_advisor_to_advisor_capability() {
    let app = test_app();

    let response = app
        .router
        .oneshot(json_request(
            "/chat/text",
            json!({ "prompt": "should I change jobs?", "chat_type": "advisor" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["response"], "advisor reply");
    assert_eq!(app.gateway.advisor_calls.load(Ordering::SeqCst), 1);
    assert_eq!(app.gateway.study_calls.load(Ordering::SeqCst), 0);
    assert_eq!(app.gateway.companion_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn text_chat_routes_general_to_companion_capability() {
    let app = test_app();

    let response = app
        .router
        .oneshot(json_request(
            "/chat/text",
            json!({ "prompt": "hello", "chat_type": "general" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["response"], "companion reply");
    assert_eq!(app.gateway.companion_calls.load(Ordering::SeqCst), 1);
    assert_eq!(app.gateway.study_calls.load(Ordering::SeqCst), 0);
    assert_eq!(app.gateway.advisor_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn voice_chat_transcribes_and_replies() {
    let app = test_app();

    let response = app
        .router
        .oneshot(voice_request("note.wav", "fake-audio-bytes"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["transcribed_text"], "mock transcript");
    assert_eq!(body["ai_response"], "companion reply");
    assert_eq!(body["audio_features"]["voice_features"], "extracted_features_data");

    // The reply was generated from the transcript.
    assert_eq!(
        app.gateway.last_companion_prompt.lock().unwrap().as_deref(),
        Some("mock transcript")
    );
}

#[tokio::test]
async fn voice_chat_removes_temp_file_on_success() {
    let app = test_app();

    let response = app
        .router
        .oneshot(voice_request("note.wav", "fake-audio-bytes"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let seen_path = app
        .gateway
        .seen_audio_path
        .lock()
        .unwrap()
        .clone()
        .expect("transcription saw a path");
    assert!(!seen_path.exists(), "temp file must be removed after the request");
}

#[tokio::test]
async fn voice_chat_removes_temp_file_on_failure() {
    let gateway = Arc::new(FailingTranscriptionGateway::default());
    let router = app_with(
        Arc::clone(&gateway),
        Arc::new(MockAccountService::default()),
        Arc::new(MockStreakStore::default()),
        Arc::new(MockUserRepository::default()),
    );

    let response = router
        .oneshot(voice_request("note.wav", "fake-audio-bytes"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let seen_path = gateway
        .seen_audio_path
        .lock()
        .unwrap()
        .clone()
        .expect("transcription saw a path");
    assert!(!seen_path.exists(), "temp file must be removed after a failure");
}

#[tokio::test]
async fn voice_chat_failure_embeds_upstream_error() {
    let router = app_with(
        Arc::new(FailingTranscriptionGateway::default()),
        Arc::new(MockAccountService::default()),
        Arc::new(MockStreakStore::default()),
        Arc::new(MockUserRepository::default()),
    );

    let response = router
        .oneshot(voice_request("note.wav", "fake-audio-bytes"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Error processing audio:"));
    assert!(message.contains("model loading timed out"));
}

#[tokio::test]
async fn voice_chat_without_file_is_client_error() {
    let app = test_app();

    let body = format!("--{b}--\r\n", b = MULTIPART_BOUNDARY);
    let request = Request::builder()
        .method("POST")
        .uri("/chat/voice")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.gateway.transcribe_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn mood_check_returns_both_classifier_outputs() {
    let app = test_app();

    let response = app
        .router
        .oneshot(json_request("/mood/check", json!({ "text": "feeling great" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["j_hartmann_emotion"], json!([{ "label": "joy", "score": 0.91 }]));
    assert_eq!(
        body["sam_lowe_emotion"],
        json!([{ "label": "gratitude", "score": 0.72 }])
    );
}

#[tokio::test]
async fn confession_groups_all_four_results() {
    let app = test_app();

    let response = app
        .router
        .oneshot(json_request(
            "/confession/submit",
            json!({ "confession_text": "I skipped class today" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;

    let top = body.as_object().unwrap();
    assert_eq!(top.len(), 3);
    assert!(top.contains_key("moderation_results"));
    assert!(top.contains_key("confession_emotion"));
    assert!(top.contains_key("ai_response"));

    let moderation = body["moderation_results"].as_object().unwrap();
    assert_eq!(moderation.len(), 2);
    assert!(moderation.contains_key("toxic_bert"));
    assert!(moderation.contains_key("martin_ha_toxic_model"));
}

#[tokio::test]
async fn confession_reply_prompt_embeds_confession_text() {
    let app = test_app();

    let response = app
        .router
        .oneshot(json_request(
            "/confession/submit",
            json!({ "confession_text": "I skipped class today" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let prompt = app
        .gateway
        .last_companion_prompt
        .lock()
        .unwrap()
        .clone()
        .expect("companion capability was invoked");
    assert!(prompt.contains("I skipped class today"));
    assert!(prompt.contains("supportive response"));
}

#[tokio::test]
async fn text_patterns_returns_analyses_and_placeholder_insight() {
    let app = test_app();

    let response = app
        .router
        .oneshot(json_request(
            "/analytics/text-patterns",
            json!({ "text": "journaling again after a long break" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert!(body["j_hartmann_analysis"].is_array());
    assert!(body["sam_lowe_analysis"].is_array());
    assert_eq!(
        body["insights"],
        "Further analysis requires historical data and trend detection."
    );
}

#[tokio::test]
async fn signup_without_password_never_reaches_provider() {
    let app = test_app();

    let response = app
        .router
        .oneshot(json_request(
            "/auth/signup",
            json!({ "email": "user@example.com" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.account_service.total_calls(), 0);
}

#[tokio::test]
async fn signin_without_email_never_reaches_provider() {
    let app = test_app();

    let response = app
        .router
        .oneshot(json_request("/auth/signin", json!({ "password": "hunter2" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.account_service.total_calls(), 0);
}

#[tokio::test]
async fn signup_forwards_credentials() {
    let app = test_app();

    let response = app
        .router
        .oneshot(json_request(
            "/auth/signup",
            json!({ "email": "user@example.com", "password": "hunter2" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Sign up successful");
    assert_eq!(body["data"]["user"]["email"], "user@example.com");
    assert_eq!(app.account_service.sign_up_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn signin_provider_failure_maps_to_client_error() {
    let router = app_with(
        Arc::new(MockModelGateway::default()),
        Arc::new(RejectingAccountService),
        Arc::new(MockStreakStore::default()),
        Arc::new(MockUserRepository::default()),
    );

    let response = router
        .oneshot(json_request(
            "/auth/signin",
            json!({ "email": "user@example.com", "password": "wrong" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Sign in failed:"));
    assert!(message.contains("invalid credentials"));
}

#[tokio::test]
async fn signout_forwards_bearer_token() {
    let app = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/auth/signout")
        .header(header::AUTHORIZATION, "Bearer session-token")
        .body(Body::empty())
        .unwrap();

    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Sign out successful");
    assert_eq!(app.account_service.sign_out_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn signout_without_token_is_client_error() {
    let app = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/auth/signout")
        .body(Body::empty())
        .unwrap();

    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn current_user_returns_provider_payload() {
    let app = test_app();

    let request = Request::builder()
        .uri("/auth/user")
        .header(header::AUTHORIZATION, "Bearer session-token")
        .body(Body::empty())
        .unwrap();

    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["user"]["email"], "user@example.com");
}

#[tokio::test]
async fn streak_defaults_to_zero_before_any_write() {
    let app = test_app();

    let response = app
        .router
        .oneshot(get_request("/streak/alice"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["user_id"], "alice");
    assert_eq!(body["streak"], 0);
}

#[tokio::test]
async fn streak_write_then_read_round_trips() {
    let app = test_app();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/streak/alice?count=5")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .router
        .oneshot(get_request("/streak/alice"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["streak"], 5);
}

#[tokio::test]
async fn streak_accepts_negative_count_verbatim() {
    let app = test_app();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/streak/bob?count=-3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.router.oneshot(get_request("/streak/bob")).await.unwrap();
    let body = response_json(response).await;
    assert_eq!(body["streak"], -3);
}

#[tokio::test]
async fn streak_write_without_count_is_client_error() {
    let app = test_app();

    let response = app
        .router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/streak/alice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_user_returns_generated_id() {
    let app = test_app();

    let response = app
        .router
        .oneshot(json_request("/users/", json!({ "username": "alice" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert!(!body["user_id"].as_str().unwrap().is_empty());
    assert_eq!(app.user_repository.user_count(), 1);
}

#[tokio::test]
async fn create_user_rejects_duplicate_username() {
    let app = test_app();

    let response = app
        .router
        .clone()
        .oneshot(json_request("/users/", json!({ "username": "alice" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .router
        .oneshot(json_request("/users/", json!({ "username": "alice" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Username already exists");
    assert_eq!(app.user_repository.user_count(), 1, "no duplicate record created");
}
