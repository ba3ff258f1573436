/// Configuration module - Load and validate run configuration
pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_file};
pub use schema::Config;
