use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ── Status ──────────────────────────────────────────────────────────

/// Lifecycle state of an incident.
///
/// Serialized with the backend's canonical enum spelling. Real data has
/// shown the separator drifting (`"Em andamento"` vs `"Em_andamento"`);
/// [`Status::parse_wire`] normalizes that once, at ingestion — matching
/// and grouping code never sees a raw string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Em_andamento")]
    InProgress,
    #[serde(rename = "Encerrada")]
    Closed,
    #[serde(rename = "Cancelada")]
    Cancelled,
}

impl Status {
    /// Fixed display order for status sections.
    pub const DISPLAY_ORDER: [Self; 3] = [Self::InProgress, Self::Closed, Self::Cancelled];

    /// Parse a wire value, tolerating separator and case drift.
    /// Unknown values stay unknown — no silent guessing.
    pub fn parse_wire(raw: &str) -> Option<Self> {
        match raw.trim().replace(' ', "_").to_lowercase().as_str() {
            "em_andamento" => Some(Self::InProgress),
            "encerrada" => Some(Self::Closed),
            "cancelada" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// The canonical wire spelling.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::InProgress => "Em_andamento",
            Self::Closed => "Encerrada",
            Self::Cancelled => "Cancelada",
        }
    }

    /// Section label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::InProgress => "In progress",
            Self::Closed => "Closed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Priority ────────────────────────────────────────────────────────

/// Urgency of an incident. Drives visual emphasis only, never grouping
/// or business rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "Baixa")]
    Low,
    #[serde(rename = "Media")]
    Medium,
    #[serde(rename = "Alta")]
    High,
    #[serde(rename = "Critica")]
    Critical,
}

impl Priority {
    /// Parse a wire value. The backend stores the unaccented enum name
    /// but display labels with accents have leaked into older records.
    pub fn parse_wire(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "baixa" => Some(Self::Low),
            "media" | "média" => Some(Self::Medium),
            "alta" => Some(Self::High),
            "critica" | "crítica" => Some(Self::Critical),
            _ => None,
        }
    }

    /// The canonical wire spelling.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Low => "Baixa",
            Self::Medium => "Media",
            Self::High => "Alta",
            Self::Critical => "Critica",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Incident type ───────────────────────────────────────────────────

/// Classification reference: main type id plus its display name.
///
/// Arrives as a bare numeric id (flat contract, with the name in a
/// sibling field) or as a nested object (current contract); both
/// normalize to this pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentType {
    pub id: i64,
    pub name: String,
}

// ── Location ────────────────────────────────────────────────────────

/// Where the incident happened. Structured fields when the record came
/// from the current contract, a single display string when it came from
/// the flat one — usually not both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub district_id: Option<i64>,
    pub district: Option<String>,
    pub city: Option<String>,
    /// Pre-rendered display address from flat records.
    pub display: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Location {
    /// One-line address for display, if anything is known.
    pub fn summary(&self) -> Option<String> {
        if let Some(ref display) = self.display {
            return Some(display.clone());
        }
        let street = self.street.as_deref()?;
        match self.number.as_deref() {
            Some(number) => Some(format!("{street}, {number}")),
            None => Some(street.to_owned()),
        }
    }

    /// Every text field a region filter may match against.
    pub(crate) fn search_texts(&self) -> impl Iterator<Item = &str> {
        [
            self.street.as_deref(),
            self.district.as_deref(),
            self.city.as_deref(),
            self.display.as_deref(),
        ]
        .into_iter()
        .flatten()
    }
}

// ── Incident ────────────────────────────────────────────────────────

/// Canonical incident representation.
///
/// `id` is assigned by the remote store and never reassigned. Fields the
/// backend failed to deliver stay `None`: display falls back locally
/// (see [`Incident::display_title`]) and date-bounded filters simply
/// exclude the record — a ragged record is never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: i64,
    pub title: Option<String>,
    /// `None` when the wire value wasn't one of the known states.
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    /// Local timestamp of the event (no zone on the wire).
    pub occurred_at: Option<NaiveDateTime>,
    pub kind: Option<IncidentType>,
    pub location: Location,
    pub victims: Option<String>,
    pub details: Option<String>,
}

impl Incident {
    /// Title for display; records with no stored title get a placeholder
    /// instead of failing.
    pub fn display_title(&self) -> String {
        match self.title {
            Some(ref title) => title.clone(),
            None => format!("Incident #{}", self.id),
        }
    }
}
