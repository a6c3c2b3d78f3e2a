//! App Core for linkqr.
//!
//! Central struct holding the database, the live session, the encoder, the
//! download manager and the settings engine.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::database::connection::Database;
use crate::managers::download_manager::{DirectoryExportSink, DownloadManager};
use crate::managers::history_store::HistoryStore;
use crate::managers::session_manager::{SessionManager, SessionManagerTrait};
use crate::services::qr_encoder::{PngQrEncoder, QrEncoder};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

/// Central application struct.
pub struct App {
    pub db: Arc<Database>,
    pub session_manager: SessionManager,
    pub download_manager: DownloadManager,
    pub settings_engine: SettingsEngine,
    pub encoder: Arc<dyn QrEncoder>,
}

impl App {
    /// Opens the app using the database path named by the settings.
    pub fn from_settings(settings_engine: SettingsEngine) -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings_engine = settings_engine;
        load_settings(&mut settings_engine);
        let db_path = settings_engine.database_path();
        Self::open_loaded(db_path, settings_engine)
    }

    /// Opens the app on `db_path` with an explicit settings engine.
    pub fn open<P: AsRef<Path>>(
        db_path: P,
        mut settings_engine: SettingsEngine,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        load_settings(&mut settings_engine);
        Self::open_loaded(db_path, settings_engine)
    }

    fn open_loaded<P: AsRef<Path>>(
        db_path: P,
        settings_engine: SettingsEngine,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Arc::new(Database::open(db_path)?);

        let settings = settings_engine.get_settings().clone();
        let session_manager =
            SessionManager::new(HistoryStore::sqlite(db.clone()), settings.history.capacity);
        let encoder: Arc<dyn QrEncoder> =
            Arc::new(PngQrEncoder::new(settings.encoder.module_scale));
        let download_manager = DownloadManager::new(Box::new(DirectoryExportSink::new(
            settings_engine.downloads_dir(),
        )));

        Ok(Self {
            db,
            session_manager,
            download_manager,
            settings_engine,
            encoder,
        })
    }

    /// Re-reads the in-memory settings into the live components.
    pub fn apply_settings(&mut self) {
        let settings = self.settings_engine.get_settings().clone();
        self.session_manager.set_capacity(settings.history.capacity);
        self.encoder = Arc::new(PngQrEncoder::new(settings.encoder.module_scale));
        self.download_manager = DownloadManager::new(Box::new(DirectoryExportSink::new(
            self.settings_engine.downloads_dir(),
        )));
    }

    /// Startup sequence: report the restored state.
    pub fn startup(&mut self) {
        info!(
            entries = self.session_manager.history().len(),
            selected = self.session_manager.current_selection().is_some(),
            config = self.settings_engine.get_config_path(),
            "linkqr started"
        );
    }

    pub fn shutdown(&mut self) {
        info!("linkqr shutting down");
    }
}

fn load_settings(engine: &mut SettingsEngine) {
    if let Err(e) = engine.load() {
        warn!(error = %e, "failed to load settings; using defaults");
    }
}
