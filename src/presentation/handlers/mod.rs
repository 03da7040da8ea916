mod analytics;
mod auth;
mod chat;
mod confession;
mod health;
pub mod mood;
mod streak;
mod users;

use serde::Serialize;

pub use analytics::text_patterns_handler;
pub use auth::{current_user_handler, sign_in_handler, sign_out_handler, sign_up_handler};
pub use chat::{text_chat_handler, voice_chat_handler};
pub use confession::submit_confession_handler;
pub use health::health_handler;
pub use mood::mood_check_handler;
pub use streak::{get_streak_handler, set_streak_handler};
pub use users::create_user_handler;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
