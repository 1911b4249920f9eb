// Infrastructure layer modules
pub mod attribute_codec;
pub mod config;
pub mod item_table;
pub mod logging;

// Re-exports
pub use config::{ConfigError, ItemsConfig};
pub use item_table::{DynamoItemTable, ItemTable, TableError};
pub use logging::init_logging;
