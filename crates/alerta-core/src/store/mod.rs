// ── Injected data-access layer ──
//
// One trait, two backends: the seeded fixture store and the network
// store. The implementation is chosen once at process start and injected
// everywhere; nothing downstream branches on "mock vs real".

mod fixture;
mod http;

use std::sync::Arc;

use async_trait::async_trait;

pub use fixture::{FixtureLatency, FixtureStore};
pub use http::HttpStore;

use alerta_api::IncidentClient;

use crate::config::StoreConfig;
use crate::error::CoreError;
use crate::form::{Submission, UpdatePatch};
use crate::model::Incident;

/// Data access for incident records.
///
/// Callers must not assume which backend is active; the fixture store is
/// indistinguishable from the network apart from latency.
#[async_trait]
pub trait IncidentStore: Send + Sync {
    /// Stable tag for diagnostics.
    fn backend_tag(&self) -> &'static str;

    /// Fetch the full incident collection.
    async fn get_all(&self) -> Result<Vec<Incident>, CoreError>;

    /// Fetch one incident; `Ok(None)` when the id is unknown.
    async fn get_by_id(&self, id: i64) -> Result<Option<Incident>, CoreError>;

    /// Create an incident. The store assigns the id; the created record
    /// is echoed back when the backend provides it.
    async fn create(&self, submission: &Submission) -> Result<Option<Incident>, CoreError>;

    /// Update the editable fields of an existing incident.
    async fn update(&self, id: i64, patch: &UpdatePatch) -> Result<(), CoreError>;
}

/// Build the data-access layer once, at process start.
pub fn build_store(config: &StoreConfig) -> Result<Arc<dyn IncidentStore>, CoreError> {
    if config.fixtures {
        return Ok(Arc::new(FixtureStore::seeded()));
    }

    let client = IncidentClient::new(config.url.clone(), config.contract, &config.transport())?;
    if let Some(ref token) = config.token {
        client.set_token(token.clone());
    }
    Ok(Arc::new(HttpStore::new(client)))
}
