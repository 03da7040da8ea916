use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::ModelGateway;
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    create_user_handler, current_user_handler, get_streak_handler, health_handler,
    mood_check_handler, set_streak_handler, sign_in_handler, sign_out_handler, sign_up_handler,
    submit_confession_handler, text_chat_handler, text_patterns_handler, voice_chat_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<M>(state: AppState<M>) -> Router
where
    M: ModelGateway + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/chat/text", post(text_chat_handler::<M>))
        .route("/chat/voice", post(voice_chat_handler::<M>))
        .route("/mood/check", post(mood_check_handler::<M>))
        .route("/confession/submit", post(submit_confession_handler::<M>))
        .route("/analytics/text-patterns", post(text_patterns_handler::<M>))
        .route("/auth/signup", post(sign_up_handler::<M>))
        .route("/auth/signin", post(sign_in_handler::<M>))
        .route("/auth/signout", post(sign_out_handler::<M>))
        .route("/auth/user", get(current_user_handler::<M>))
        .route(
            "/streak/{user_id}",
            post(set_streak_handler::<M>).get(get_streak_handler::<M>),
        )
        .route("/users/", post(create_user_handler::<M>))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
