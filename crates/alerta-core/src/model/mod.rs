// ── Canonical domain model ──
//
// The single internal shape every consumer reads. Wire-format aliases
// (`titule`/`title`, bare-id vs nested type, flat vs structured address)
// are resolved in `convert` before a value ever reaches these types.

mod incident;

pub use incident::{Incident, IncidentType, Location, Priority, Status};
