use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;
use vocabmaster_config::Config;
use vocabmaster_enricher::Enricher;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub enricher: Arc<dyn Enricher>,
    pub enrichment_running: AtomicBool,
    /// Token of the run in flight, if any
    pub enrichment_cancel: Mutex<Option<CancellationToken>>,
}

impl AppState {
    pub fn new(config: Config, enricher: Arc<dyn Enricher>) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            enricher,
            enrichment_running: AtomicBool::new(false),
            enrichment_cancel: Mutex::new(None),
        }
    }
}
