#[derive(Debug, Clone)]
pub struct ModelSettings {
    /// Additive damping applied to item mean offsets
    pub damping: f64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self { damping: 5.0 }
    }
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub database_path: String,
    pub stream_batch_size: usize,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "ratings.db".to_string()),
            stream_batch_size: 500,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model: ModelSettings,
    pub storage: StorageSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            model: ModelSettings::default(),
            storage: StorageSettings::default(),
        }
    }
}
