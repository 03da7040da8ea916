mod account_service;
mod model_gateway;
mod streak_store;
mod user_repository;

pub use account_service::{AccountError, AccountService};
pub use model_gateway::{InferenceError, ModelGateway};
pub use streak_store::{StoreError, StreakStore};
pub use user_repository::{RepositoryError, UserRepository};
