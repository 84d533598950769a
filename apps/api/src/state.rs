use std::sync::Arc;

use crate::llm_client::CompletionBackend;

/// Shared application state injected into route handlers via Axum extractors.
/// Request-scoped data never lives here; every extraction request is
/// independent and stateless.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable completion backend. Production: `OpenAiClient`; tests swap
    /// in a counting mock.
    pub llm: Arc<dyn CompletionBackend>,
}
