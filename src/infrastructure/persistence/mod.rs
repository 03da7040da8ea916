mod atlas_user_repository;
mod mock_stores;
mod redis_streak_store;

pub use atlas_user_repository::AtlasUserRepository;
pub use mock_stores::{MockStreakStore, MockUserRepository};
pub use redis_streak_store::RedisStreakStore;
