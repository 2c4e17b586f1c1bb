use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::form::FormDocument;
use crate::sync::projector::PreviewRegion;
use crate::sync::ResumeBuilder;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single document this process serves. Every host event takes the lock
    /// for its whole mutation + synchronization pass.
    pub builder: Arc<Mutex<ResumeBuilder>>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let preview = PreviewRegion::with_targets(&config.preview_targets);
        let builder = ResumeBuilder::new(FormDocument::new(), preview);
        Self {
            builder: Arc::new(Mutex::new(builder)),
        }
    }
}
