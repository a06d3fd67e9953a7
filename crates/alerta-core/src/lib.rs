//! Business logic between `alerta-api` and UI consumers.
//!
//! This crate owns the canonical domain model and the two pieces of real
//! business machinery in the incident-reporting workflow:
//!
//! - **[`project`](project::project)** — the pure filter/group engine
//!   behind the incident list: free-text search, date-range/status/type/
//!   region criteria, and status-bucketed sectioning. No I/O, no hidden
//!   state; callers re-run it on every input change.
//!
//! - **[`IncidentForm`]** — the create/edit form's normalization layer:
//!   input masks, required-field validation, and assembly of a canonical
//!   [`Submission`] that [`submit`] translates into whichever wire
//!   contract the live backend speaks.
//!
//! - **[`IncidentStore`]** — the injected data-access seam. Chosen once
//!   at process start ([`build_store`]): either the network-backed
//!   [`HttpStore`] or the seeded [`FixtureStore`]. Callers must not
//!   assume which is active.
//!
//! Wire records of both backend generations are normalized into the
//! canonical [`Incident`] by [`convert`]; nothing outside that module
//! reads an alias field.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod convert;
pub mod error;
pub mod form;
pub mod model;
pub mod project;
pub mod store;
pub mod submit;

// ── Primary re-exports ──────────────────────────────────────────────
pub use auth::User;
pub use config::{StoreConfig, TlsVerification};
pub use error::{CoreError, ValidationError};
pub use form::{IncidentForm, Submission, SubmissionAddress, UpdatePatch};
pub use model::{Incident, IncidentType, Location, Priority, Status};
pub use project::{FilterCriteria, SectionGroup, project};
pub use store::{FixtureStore, HttpStore, IncidentStore, build_store};
pub use submit::{submit_new, submit_update};

// Re-export the contract selector and API error so downstream crates
// don't need a direct `alerta-api` dependency.
pub use alerta_api::BackendContract;
pub use alerta_api::Error as ApiError;
