use crate::llm_client::GeminiClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds only the shared model client — the service is deliberately stateless,
/// and each button press on the page is an isolated run.
#[derive(Clone)]
pub struct AppState {
    pub llm: GeminiClient,
}
