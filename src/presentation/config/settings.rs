use std::env;

use super::Environment;

/// Process-wide configuration, sourced from environment variables. Every
/// default is safe to publish: connection URLs point at localhost and keys
/// default to empty strings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub environment: Environment,
    pub server: ServerSettings,
    pub inference: InferenceSettings,
    pub redis: RedisSettings,
    pub supabase: SupabaseSettings,
    pub atlas: AtlasSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct InferenceSettings {
    pub base_url: String,
    pub api_token: String,
}

#[derive(Debug, Clone)]
pub struct RedisSettings {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct SupabaseSettings {
    pub url: String,
    pub anon_key: String,
}

#[derive(Debug, Clone)]
pub struct AtlasSettings {
    pub base_url: String,
    pub api_key: String,
    pub data_source: String,
    pub database: String,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    pub fn from_env() -> Self {
        let environment = env_or("APP_ENV", "local")
            .try_into()
            .unwrap_or(Environment::Local);

        Self {
            environment,
            server: ServerSettings {
                host: env_or("SERVER_HOST", "0.0.0.0"),
                port: env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8000),
            },
            inference: InferenceSettings {
                base_url: env_or("HF_API_BASE_URL", "https://api-inference.huggingface.co"),
                api_token: env_or("HF_API_TOKEN", ""),
            },
            redis: RedisSettings {
                url: redis_url_from_env(),
            },
            supabase: SupabaseSettings {
                url: env_or("SUPABASE_URL", "http://localhost:54321"),
                anon_key: env_or("SUPABASE_ANON_KEY", ""),
            },
            atlas: AtlasSettings {
                base_url: env_or("MONGO_DATA_API_URL", "http://localhost:8080"),
                api_key: env_or("MONGO_DATA_API_KEY", ""),
                data_source: env_or("MONGO_DATA_SOURCE", "bloom"),
                database: env_or("MONGO_DATABASE", "bloom_db"),
            },
            logging: LoggingSettings {
                level: env_or("LOG_LEVEL", "info"),
                enable_json: env::var("LOG_FORMAT")
                    .map(|v| v.to_lowercase() == "json")
                    .unwrap_or(false),
            },
        }
    }
}

/// `REDIS_URL` wins; otherwise the URL is assembled from the host/port/db
/// pieces with optional credentials.
fn redis_url_from_env() -> String {
    if let Ok(url) = env::var("REDIS_URL") {
        return url;
    }

    let host = env_or("REDIS_HOST", "localhost");
    let port = env_or("REDIS_PORT", "6379");
    let db = env_or("REDIS_DB", "0");

    match (env::var("REDIS_USERNAME"), env::var("REDIS_PASSWORD")) {
        (Ok(user), Ok(pass)) => format!("redis://{}:{}@{}:{}/{}", user, pass, host, port, db),
        (Err(_), Ok(pass)) => format!("redis://:{}@{}:{}/{}", pass, host, port, db),
        _ => format!("redis://{}:{}/{}", host, port, db),
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}
