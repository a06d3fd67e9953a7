// ── Form option catalogs ──
//
// The backend has no options endpoint, so the catalogs the form screens
// need are served statically, mirroring the backend's seeded database.

use crate::model::IncidentType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: i64,
    pub label: &'static str,
}

/// Main incident types.
pub const INCIDENT_TYPES: &[CatalogEntry] = &[
    CatalogEntry { id: 1, label: "Incêndio" },
    CatalogEntry { id: 2, label: "Resgate" },
    CatalogEntry { id: 3, label: "APH" },
    CatalogEntry { id: 4, label: "Prevenção" },
    CatalogEntry { id: 5, label: "Ambiental" },
    CatalogEntry { id: 6, label: "Administrativa" },
    CatalogEntry { id: 7, label: "Desastre" },
];

/// Region names used by the list filter.
pub const REGIONS: &[&str] = &["RMR", "Zona da Mata", "Agreste", "Sertão"];

/// Look up a main type by id.
pub fn incident_type(id: i64) -> Option<IncidentType> {
    INCIDENT_TYPES
        .iter()
        .find(|entry| entry.id == id)
        .map(|entry| IncidentType {
            id: entry.id,
            name: entry.label.to_owned(),
        })
}

/// Subtype options for a main type. The subtype's label doubles as the
/// incident title on the create form.
pub fn subtypes(type_id: i64) -> &'static [CatalogEntry] {
    match type_id {
        1 => &[
            CatalogEntry { id: 101, label: "Incêndio em Edificação" },
            CatalogEntry { id: 102, label: "Incêndio Florestal" },
        ],
        2 => &[
            CatalogEntry { id: 201, label: "Resgate em Altura" },
            CatalogEntry { id: 202, label: "Resgate Veicular" },
        ],
        3 => &[
            CatalogEntry { id: 301, label: "Atendimento Clínico" },
            CatalogEntry { id: 302, label: "Trauma" },
        ],
        _ => &[],
    }
}
