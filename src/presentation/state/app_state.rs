use std::sync::Arc;

use crate::application::ports::{AccountService, ModelGateway, StreakStore, UserRepository};
use crate::presentation::config::Settings;

/// Per-process shared handles, built once at startup and cloned per request.
pub struct AppState<M>
where
    M: ModelGateway,
{
    pub model_gateway: Arc<M>,
    pub streak_store: Arc<dyn StreakStore>,
    pub account_service: Arc<dyn AccountService>,
    pub user_repository: Arc<dyn UserRepository>,
    pub settings: Settings,
}

impl<M> Clone for AppState<M>
where
    M: ModelGateway,
{
    fn clone(&self) -> Self {
        Self {
            model_gateway: Arc::clone(&self.model_gateway),
            streak_store: Arc::clone(&self.streak_store),
            account_service: Arc::clone(&self.account_service),
            user_repository: Arc::clone(&self.user_repository),
            settings: self.settings.clone(),
        }
    }
}
