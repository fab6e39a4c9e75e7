pub mod settings;

pub use settings::{AppConfig, ModelSettings, StorageSettings};
