//! Shared application state handed to every handler as `web::Data<AppState>`.

use crate::ai::CompletionModel;
use crate::store::DocumentStore;
use crate::vss::VssClient;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// The document database; also read by the VSS resolver.
    pub store: Arc<DocumentStore>,
    /// Generative model behind the suggestion flows.
    pub model: Arc<dyn CompletionModel>,
    pub vss: Arc<VssClient>,
    /// Byte cap for files passed through the VSS upload proxy.
    pub upload_limit: usize,
}
