pub mod loader;
pub mod schema;

pub use loader::{ConfigError, ConfigLoader};
pub use schema::{
    HistoryConfig, MAX_HISTORY_LIMIT, MAX_NAME_WIDTH, MAX_PROCESS_LIMIT, ParleyConfig,
    ResourcesConfig, ShellConfig,
};
