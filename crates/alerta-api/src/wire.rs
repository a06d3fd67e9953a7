// Wire types for the incident backend
//
// Models for the backend's JSON API. Fields use `#[serde(default)]`
// liberally because the API is inconsistent about field presence across
// deployments, and alias keys from both contract generations are modeled
// side by side. Interpretation of the polymorphic fields happens in
// `alerta-core`, not here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── User / login ─────────────────────────────────────────────────────

/// Authenticated user record returned by `user/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Outcome marker; the backend answers HTTP 200 with `status != "sucesso"`
    /// on some failure paths.
    #[serde(default)]
    pub status: Option<String>,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub cpf: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Failure body from `user/login`. Only best-effort: failure responses may
/// also be plain text, in which case the raw body is surfaced instead.
#[derive(Debug, Deserialize)]
pub struct LoginFailure {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// ── Incident records (reads) ─────────────────────────────────────────

/// Incident record from `occurrence/getall` / `occurrence/{id}`.
///
/// Tolerates both contract generations in one shape: the title aliases are
/// modeled side by side, and the fields whose type changed between
/// generations (`type`, `address`) stay as raw JSON values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentRecord {
    pub id: i64,
    /// Historical misspelled title key (flat contract).
    #[serde(default)]
    pub titule: Option<String>,
    /// Corrected title key (nested contract).
    #[serde(default)]
    pub title: Option<String>,
    /// Bare numeric id (flat) or `{id, name, description}` object (nested).
    #[serde(default, rename = "type")]
    pub kind: Option<Value>,
    /// Sibling type label carried by flat records.
    #[serde(default)]
    pub nome_tipo: Option<String>,
    /// Local ISO timestamp, `YYYY-MM-DDTHH:MM:SS`.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub victims: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    /// Display string (flat) or `{street, number, complement, ...}` object
    /// (nested).
    #[serde(default)]
    pub address: Option<Value>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    // ── Address aliases carried by flat records ──
    #[serde(default)]
    pub rua: Option<String>,
    #[serde(default)]
    pub numero: Option<String>,
    #[serde(default)]
    pub nome_bairro: Option<String>,
    #[serde(default)]
    pub nome_cidade: Option<String>,
    /// Catch-all for undocumented fields (`BackendAddress` and friends).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

// ── Submission bodies (writes) ───────────────────────────────────────
//
// One module per contract generation. `alerta-core` builds these from its
// canonical submission value; nothing outside that mapping knows which keys
// the live backend wants.

pub mod nested {
    use serde::Serialize;

    /// Create payload for the current contract (`occurrence/registry`).
    #[derive(Debug, Clone, Serialize)]
    pub struct CreateBody {
        pub title: String,
        /// `YYYY-MM-DDTHH:MM:SS`, no zone.
        pub date: String,
        pub victims: String,
        pub details: String,
        pub priority: String,
        #[serde(rename = "type")]
        pub kind: TypeObject,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub address: Option<AddressObject>,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct TypeObject {
        pub id: i64,
        pub name: String,
        pub description: String,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct AddressObject {
        pub street: String,
        pub number: String,
        pub complement: String,
        #[serde(rename = "idDistrict")]
        pub district_id: i64,
    }

    /// Update payload (`PUT occurrence/{id}`) -- editable fields only.
    #[derive(Debug, Clone, Serialize)]
    pub struct UpdateBody {
        pub title: String,
        pub victims: String,
        pub details: String,
        pub status: String,
        pub priority: String,
    }
}

pub mod flat {
    use serde::Serialize;

    /// Create payload for the original flat contract.
    #[derive(Debug, Clone, Serialize)]
    pub struct CreateBody {
        pub titule: String,
        pub date: String,
        pub victims: String,
        pub details: String,
        pub priority: String,
        #[serde(rename = "type")]
        pub kind: i64,
        pub address: String,
        /// Stringly coordinates; the flat contract requires the fields
        /// present, `"0.0"` when unknown.
        pub lat: String,
        pub lng: String,
    }

    /// Update payload for the original flat contract.
    #[derive(Debug, Clone, Serialize)]
    pub struct UpdateBody {
        pub titule: String,
        pub victims: String,
        pub details: String,
        pub status: String,
        pub priority: String,
    }
}

/// A create payload in whichever shape the target contract expects.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CreateBody {
    Nested(nested::CreateBody),
    Flat(flat::CreateBody),
}

/// An update payload in whichever shape the target contract expects.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum UpdateBody {
    Nested(nested::UpdateBody),
    Flat(flat::UpdateBody),
}
