mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{DashboardSettings, LoggingSettings, ServerSettings, Settings, StorageSettings};
