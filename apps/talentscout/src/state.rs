use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::session::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Inference backend. `InferenceClient` in production, scripted stubs in tests.
    pub generator: Arc<dyn TextGenerator>,
    pub config: Config,
}
