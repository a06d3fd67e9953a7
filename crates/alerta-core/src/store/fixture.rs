// ── Fixture-backed incident store ──
//
// Offline backend seeded with the sample incidents the app ships for
// development. Each operation sleeps for a fixed simulated latency to
// keep the calling code honest about async behavior; tests construct the
// store with zero latency. A call counter lets tests verify that a
// failed validation never reached the store.

use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::CoreError;
use crate::form::{Submission, UpdatePatch};
use crate::model::{Incident, IncidentType, Location, Priority, Status};
use crate::store::IncidentStore;

/// Per-operation simulated latency, mirroring the remote backend's feel.
#[derive(Debug, Clone, Copy)]
pub struct FixtureLatency {
    pub get_all: Duration,
    pub get_by_id: Duration,
    pub create: Duration,
    pub update: Duration,
}

impl FixtureLatency {
    pub const ZERO: Self = Self {
        get_all: Duration::ZERO,
        get_by_id: Duration::ZERO,
        create: Duration::ZERO,
        update: Duration::ZERO,
    };
}

impl Default for FixtureLatency {
    fn default() -> Self {
        Self {
            get_all: Duration::from_millis(800),
            get_by_id: Duration::from_millis(300),
            create: Duration::from_millis(1500),
            update: Duration::from_millis(1000),
        }
    }
}

pub struct FixtureStore {
    incidents: Mutex<Vec<Incident>>,
    next_id: AtomicI64,
    latency: FixtureLatency,
    calls: AtomicU64,
}

impl FixtureStore {
    /// Store pre-loaded with the development sample set.
    pub fn seeded() -> Self {
        Self::with_latency(seed_incidents(), FixtureLatency::default())
    }

    /// Empty, zero-latency store for tests.
    pub fn empty() -> Self {
        Self::with_latency(Vec::new(), FixtureLatency::ZERO)
    }

    /// Seeded, zero-latency store for tests.
    pub fn seeded_instant() -> Self {
        Self::with_latency(seed_incidents(), FixtureLatency::ZERO)
    }

    pub fn with_latency(incidents: Vec<Incident>, latency: FixtureLatency) -> Self {
        let next_id = incidents.iter().map(|i| i.id).max().unwrap_or(100) + 1;
        Self {
            incidents: Mutex::new(incidents),
            next_id: AtomicI64::new(next_id),
            latency,
            calls: AtomicU64::new(0),
        }
    }

    /// How many operations reached this store.
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    async fn simulate(&self, latency: Duration) {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl IncidentStore for FixtureStore {
    fn backend_tag(&self) -> &'static str {
        "fixture"
    }

    async fn get_all(&self) -> Result<Vec<Incident>, CoreError> {
        self.simulate(self.latency.get_all).await;
        Ok(self.incidents.lock().expect("fixture lock poisoned").clone())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Incident>, CoreError> {
        self.simulate(self.latency.get_by_id).await;
        let incidents = self.incidents.lock().expect("fixture lock poisoned");
        Ok(incidents.iter().find(|i| i.id == id).cloned())
    }

    async fn create(&self, submission: &Submission) -> Result<Option<Incident>, CoreError> {
        self.simulate(self.latency.create).await;

        let incident = Incident {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            title: Some(submission.title.clone()),
            status: Some(Status::InProgress),
            priority: Some(submission.priority),
            occurred_at: Some(submission.occurred_at),
            kind: Some(submission.kind.clone()),
            location: Location {
                street: submission.address.as_ref().map(|a| a.street.clone()),
                number: submission.address.as_ref().map(|a| a.number.clone()),
                complement: submission
                    .address
                    .as_ref()
                    .map(|a| a.complement.clone())
                    .filter(|c| !c.is_empty()),
                district_id: submission.address.as_ref().and_then(|a| a.district_id),
                latitude: submission.coordinates.map(|(lat, _)| lat),
                longitude: submission.coordinates.map(|(_, lng)| lng),
                ..Location::default()
            },
            victims: Some(submission.victims.clone()).filter(|v| !v.is_empty()),
            details: Some(submission.details.clone()).filter(|d| !d.is_empty()),
        };

        let mut incidents = self.incidents.lock().expect("fixture lock poisoned");
        incidents.push(incident.clone());
        Ok(Some(incident))
    }

    async fn update(&self, id: i64, patch: &UpdatePatch) -> Result<(), CoreError> {
        self.simulate(self.latency.update).await;

        let mut incidents = self.incidents.lock().expect("fixture lock poisoned");
        let Some(incident) = incidents.iter_mut().find(|i| i.id == id) else {
            return Err(CoreError::NotFound { id });
        };
        incident.title = Some(patch.title.clone());
        incident.victims = Some(patch.victims.clone()).filter(|v| !v.is_empty());
        incident.details = Some(patch.details.clone()).filter(|d| !d.is_empty());
        incident.status = Some(patch.status);
        incident.priority = Some(patch.priority);
        Ok(())
    }
}

/// The development sample set the mobile app shipped with.
fn seed_incidents() -> Vec<Incident> {
    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> Option<chrono::NaiveDateTime> {
        NaiveDate::from_ymd_opt(y, m, d).and_then(|date| date.and_hms_opt(h, min, 0))
    }

    vec![
        Incident {
            id: 101,
            title: Some("Incêndio em Edificação Residencial".into()),
            status: Some(Status::InProgress),
            priority: Some(Priority::High),
            occurred_at: at(2025, 10, 25, 14, 30),
            kind: Some(IncidentType {
                id: 1,
                name: "Incêndio".into(),
            }),
            location: Location {
                display: Some("Rua da Aurora, 123, Recife - PE".into()),
                latitude: Some(-8.063169),
                longitude: Some(-34.871139),
                ..Location::default()
            },
            victims: Some("2 inalação de fumaça".into()),
            details: Some("Fogo no 2º andar. Combate iniciado.".into()),
        },
        Incident {
            id: 102,
            title: Some("Resgate Veicular na BR-101".into()),
            status: Some(Status::Closed),
            priority: Some(Priority::Medium),
            occurred_at: at(2025, 10, 25, 16, 0),
            kind: Some(IncidentType {
                id: 2,
                name: "Resgate".into(),
            }),
            location: Location {
                display: Some("BR-101, km 40, Abreu e Lima - PE".into()),
                latitude: Some(-7.908988),
                longitude: Some(-34.902683),
                ..Location::default()
            },
            victims: Some("1 vítima leve".into()),
            details: Some("Colisão carro x moto.".into()),
        },
        Incident {
            id: 103,
            title: Some("Vazamento de Gás GLP".into()),
            status: Some(Status::Cancelled),
            priority: Some(Priority::Low),
            occurred_at: at(2025, 10, 24, 9, 15),
            kind: Some(IncidentType {
                id: 5,
                name: "Ocorrência Ambiental".into(),
            }),
            location: Location {
                display: Some("Rua do Sol, Olinda - PE".into()),
                ..Location::default()
            },
            victims: None,
            details: Some("Alarme falso, cheiro de gás dispersou.".into()),
        },
        Incident {
            id: 104,
            title: Some("Deslizamento de Barreira".into()),
            status: Some(Status::InProgress),
            priority: Some(Priority::High),
            occurred_at: at(2025, 10, 24, 18, 45),
            kind: Some(IncidentType {
                id: 7,
                name: "Desastre Natural".into(),
            }),
            location: Location {
                display: Some("Córrego do Jenipapo, Recife - PE".into()),
                ..Location::default()
            },
            victims: Some("Busca em andamento".into()),
            details: Some("Risco de novo deslizamento.".into()),
        },
    ]
}
