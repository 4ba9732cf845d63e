// ABOUTME: Application context shared by every CLI command
// ABOUTME: Owns the configuration, the file-backed store and the tax assistant

use std::path::PathBuf;

use taxify_ai::{AIService, TaxAssistant};
use taxify_auth::SessionManager;
use taxify_config::Config;
use taxify_storage::{open_file_db, FileBlobStore, TaxifyDb};
use tracing::debug;

use crate::error::AppResult;

pub struct AppContext {
    pub config: Config,
    pub db: TaxifyDb<FileBlobStore>,
    pub assistant: TaxAssistant,
}

impl AppContext {
    pub fn new(config: Config) -> AppResult<Self> {
        debug!("Opening data directory {:?}", config.data_dir);
        let db = open_file_db(config.data_dir.clone());
        let assistant = TaxAssistant::new(AIService::from_config(&config)?);
        Ok(Self {
            config,
            db,
            assistant,
        })
    }

    /// Environment configuration with an optional `--data-dir` override
    pub fn load(data_dir: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Config::from_env()?;
        if let Some(dir) = data_dir {
            config = config.with_data_dir(dir);
        }
        Self::new(config)
    }

    pub fn session(&self) -> SessionManager<'_, FileBlobStore> {
        SessionManager::new(&self.db, self.config.login_delay)
    }
}
