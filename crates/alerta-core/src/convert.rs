// ── Wire-to-domain conversions ──
//
// Bridges raw `alerta_api` records into canonical `alerta_core::model`
// types. The record shape drifted across backend generations, so every
// alias pair (`titule`/`title`, bare-id vs nested type, flat vs
// structured address) is resolved here, once. Consumers only ever read
// the canonical fields.

use chrono::NaiveDateTime;
use serde_json::Value;

use alerta_api::wire::IncidentRecord;

use crate::model::{Incident, IncidentType, Location, Priority, Status};

// ── Helpers ────────────────────────────────────────────────────────

/// Parse the backend's local ISO timestamp (`YYYY-MM-DDTHH:MM:SS`),
/// tolerating a missing seconds component. Unparseable values stay
/// `None` — the record survives, date-bounded filters skip it.
fn parse_datetime(raw: Option<&str>) -> Option<NaiveDateTime> {
    let raw = raw?.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()
}

/// Resolve the `type` field: bare numeric id (flat contract, display
/// name in the `nome_tipo` sibling) or a nested `{id, name}` object.
fn kind_from_wire(kind: Option<&Value>, sibling_label: Option<&str>) -> Option<IncidentType> {
    match kind? {
        Value::Number(n) => Some(IncidentType {
            id: n.as_i64()?,
            name: sibling_label.unwrap_or_default().to_owned(),
        }),
        Value::Object(obj) => {
            let id = obj.get("id").and_then(Value::as_i64)?;
            let name = obj
                .get("name")
                .and_then(Value::as_str)
                .or(sibling_label)
                .unwrap_or_default()
                .to_owned();
            Some(IncidentType { id, name })
        }
        _ => None,
    }
}

/// Assemble a `Location` from whichever address representation the
/// record carries: a structured object, a display string, the flat-era
/// alias columns, or the stray `BackendAddress` key one snapshot used.
fn location_from_wire(rec: &IncidentRecord) -> Location {
    let mut loc = Location {
        latitude: rec.lat,
        longitude: rec.lng,
        ..Location::default()
    };

    match rec.address.as_ref() {
        Some(Value::String(s)) if !s.is_empty() => loc.display = Some(s.clone()),
        Some(Value::Object(obj)) => {
            loc.street = obj.get("street").and_then(Value::as_str).map(str::to_owned);
            loc.number = obj.get("number").and_then(Value::as_str).map(str::to_owned);
            loc.complement = obj
                .get("complement")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_owned);
            // The district id key itself drifted between snapshots.
            loc.district_id = obj
                .get("idDistrict")
                .or_else(|| obj.get("districtId"))
                .and_then(Value::as_i64);
        }
        _ => {}
    }

    // Flat-era alias columns fill whatever the address value didn't.
    loc.street = loc.street.or_else(|| rec.rua.clone());
    loc.number = loc.number.or_else(|| rec.numero.clone());
    loc.district = rec.nome_bairro.clone();
    loc.city = rec.nome_cidade.clone();
    loc.display = loc.display.or_else(|| {
        rec.extra
            .get("BackendAddress")
            .and_then(Value::as_str)
            .map(str::to_owned)
    });

    loc
}

/// Pick the canonical title: corrected key first, then the historical
/// misspelling. Empty strings count as absent.
fn title_from_wire(rec: &IncidentRecord) -> Option<String> {
    rec.title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .or_else(|| rec.titule.clone().filter(|t| !t.trim().is_empty()))
}

// ── Incident ───────────────────────────────────────────────────────

impl From<IncidentRecord> for Incident {
    fn from(rec: IncidentRecord) -> Self {
        let title = title_from_wire(&rec);
        let status = rec.status.as_deref().and_then(Status::parse_wire);
        let priority = rec.priority.as_deref().and_then(Priority::parse_wire);
        let occurred_at = parse_datetime(rec.date.as_deref());
        let kind = kind_from_wire(rec.kind.as_ref(), rec.nome_tipo.as_deref());
        let location = location_from_wire(&rec);

        Incident {
            id: rec.id,
            title,
            status,
            priority,
            occurred_at,
            kind,
            location,
            victims: rec.victims,
            details: rec.details,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(value: serde_json::Value) -> IncidentRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn flat_record_normalizes_aliases() {
        let incident: Incident = record(json!({
            "id": 101,
            "titule": "Incêndio em Edificação Residencial",
            "type": 1,
            "nome_tipo": "Incêndio",
            "date": "2025-10-25T14:30:00",
            "status": "Em_andamento",
            "priority": "Alta",
            "victims": "2 inalação de fumaça",
            "BackendAddress": "Rua da Aurora, 123, Recife - PE",
            "lat": -8.063169,
            "lng": -34.871139
        }))
        .into();

        assert_eq!(
            incident.title.as_deref(),
            Some("Incêndio em Edificação Residencial")
        );
        assert_eq!(incident.status, Some(Status::InProgress));
        assert_eq!(incident.priority, Some(Priority::High));
        assert_eq!(
            incident.kind,
            Some(IncidentType {
                id: 1,
                name: "Incêndio".into()
            })
        );
        assert_eq!(
            incident.location.display.as_deref(),
            Some("Rua da Aurora, 123, Recife - PE")
        );
        assert_eq!(incident.location.latitude, Some(-8.063169));
    }

    #[test]
    fn nested_record_normalizes_objects() {
        let incident: Incident = record(json!({
            "id": 205,
            "title": "Resgate em Altura",
            "type": {"id": 2, "name": "Resgate", "description": ""},
            "date": "2025-11-02T08:10:00",
            "status": "Encerrada",
            "priority": "Media",
            "address": {"street": "Av. Caxangá", "number": "900", "complement": "", "idDistrict": 4}
        }))
        .into();

        assert_eq!(incident.title.as_deref(), Some("Resgate em Altura"));
        assert_eq!(
            incident.kind,
            Some(IncidentType {
                id: 2,
                name: "Resgate".into()
            })
        );
        assert_eq!(incident.location.street.as_deref(), Some("Av. Caxangá"));
        assert_eq!(incident.location.number.as_deref(), Some("900"));
        // Empty complement counts as absent.
        assert_eq!(incident.location.complement, None);
        assert_eq!(incident.location.district_id, Some(4));
    }

    #[test]
    fn corrected_title_key_wins_over_legacy() {
        let incident: Incident = record(json!({
            "id": 7,
            "titule": "old spelling",
            "title": "corrected spelling"
        }))
        .into();
        assert_eq!(incident.title.as_deref(), Some("corrected spelling"));
    }

    #[test]
    fn empty_title_is_absent() {
        let incident: Incident = record(json!({"id": 8, "titule": "  "})).into();
        assert_eq!(incident.title, None);
        assert_eq!(incident.display_title(), "Incident #8");
    }

    #[test]
    fn status_with_space_separator_normalizes() {
        let incident: Incident = record(json!({"id": 9, "status": "Em andamento"})).into();
        assert_eq!(incident.status, Some(Status::InProgress));
    }

    #[test]
    fn unknown_status_stays_unknown() {
        let incident: Incident = record(json!({"id": 10, "status": "Arquivada"})).into();
        assert_eq!(incident.status, None);
    }

    #[test]
    fn malformed_date_survives_as_none() {
        let incident: Incident = record(json!({"id": 11, "date": "25/10/2025"})).into();
        assert_eq!(incident.occurred_at, None);
    }

    #[test]
    fn seconds_optional_in_timestamp() {
        let incident: Incident = record(json!({"id": 12, "date": "2025-10-25T14:30"})).into();
        assert_eq!(
            incident.occurred_at,
            Some(
                chrono::NaiveDate::from_ymd_opt(2025, 10, 25)
                    .unwrap()
                    .and_hms_opt(14, 30, 0)
                    .unwrap()
            )
        );
    }

    #[test]
    fn district_id_key_drift_is_tolerated() {
        let incident: Incident = record(json!({
            "id": 13,
            "address": {"street": "Rua A", "number": "1", "districtId": 9}
        }))
        .into();
        assert_eq!(incident.location.district_id, Some(9));
    }
}
