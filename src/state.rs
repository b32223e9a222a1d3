use crate::api::ApiClient;

/// Shared application state handed to every handler. All data access goes
/// through the API client; there is no other mutable state.
#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
}
