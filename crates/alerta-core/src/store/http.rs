// ── Network-backed incident store ──

use std::collections::HashSet;

use async_trait::async_trait;
use tracing::warn;

use alerta_api::IncidentClient;

use crate::error::CoreError;
use crate::form::{Submission, UpdatePatch};
use crate::model::Incident;
use crate::store::IncidentStore;
use crate::submit::{create_body, update_body};

/// Incident store backed by the remote backend through `alerta-api`.
///
/// Owns the wire boundary: records are normalized to canonical
/// `Incident`s on the way in, and canonical submissions are emitted in
/// whichever contract shape the client was configured with.
pub struct HttpStore {
    client: IncidentClient,
}

impl HttpStore {
    pub fn new(client: IncidentClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IncidentStore for HttpStore {
    fn backend_tag(&self) -> &'static str {
        "http"
    }

    async fn get_all(&self) -> Result<Vec<Incident>, CoreError> {
        let records = self.client.list_incidents().await?;

        // Ids are unique within a collection; a backend that repeats one
        // gets the first occurrence kept and the rest dropped.
        let mut seen = HashSet::new();
        let mut incidents = Vec::with_capacity(records.len());
        for record in records {
            if !seen.insert(record.id) {
                warn!(id = record.id, "duplicate incident id in listing, dropping");
                continue;
            }
            incidents.push(Incident::from(record));
        }
        Ok(incidents)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Incident>, CoreError> {
        Ok(self.client.get_incident(id).await?.map(Incident::from))
    }

    async fn create(&self, submission: &Submission) -> Result<Option<Incident>, CoreError> {
        let body = create_body(self.client.contract(), submission);
        Ok(self
            .client
            .create_incident(&body)
            .await?
            .map(Incident::from))
    }

    async fn update(&self, id: i64, patch: &UpdatePatch) -> Result<(), CoreError> {
        let body = update_body(self.client.contract(), patch);
        self.client.update_incident(id, &body).await?;
        Ok(())
    }
}
