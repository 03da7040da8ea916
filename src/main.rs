use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use bloom_backend::infrastructure::auth::SupabaseAccountService;
use bloom_backend::infrastructure::inference::HfInferenceGateway;
use bloom_backend::infrastructure::observability::init_tracing;
use bloom_backend::infrastructure::persistence::{AtlasUserRepository, RedisStreakStore};
use bloom_backend::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();

    init_tracing(&settings.logging, settings.server.port);

    let http_client = reqwest::Client::new();

    let model_gateway = Arc::new(HfInferenceGateway::new(
        http_client.clone(),
        settings.inference.base_url.clone(),
        settings.inference.api_token.clone(),
    ));

    let streak_store = Arc::new(
        RedisStreakStore::new(&settings.redis.url)
            .map_err(|e| anyhow::anyhow!("redis client: {}", e))?,
    );

    let account_service = Arc::new(SupabaseAccountService::new(
        http_client.clone(),
        settings.supabase.url.clone(),
        settings.supabase.anon_key.clone(),
    ));

    let user_repository = Arc::new(AtlasUserRepository::new(
        http_client,
        settings.atlas.base_url.clone(),
        settings.atlas.api_key.clone(),
        settings.atlas.data_source.clone(),
        settings.atlas.database.clone(),
    ));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;

    let state = AppState {
        model_gateway,
        streak_store,
        account_service,
        user_repository,
        settings,
    };

    tracing::info!(environment = %state.settings.environment, "Listening on {}", addr);

    let router = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
