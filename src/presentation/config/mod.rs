mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AtlasSettings, InferenceSettings, LoggingSettings, RedisSettings, ServerSettings, Settings,
    SupabaseSettings,
};
