mod chat_kind;
mod streak;
mod user;

pub use chat_kind::ChatKind;
pub use streak::{streak_from_raw, streak_key};
pub use user::{NewUser, UserRecord};
