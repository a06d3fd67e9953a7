// ── Submission drivers and canonical-to-wire emission ──
//
// The only place that knows how a canonical `Submission` or
// `UpdatePatch` maps onto each backend generation's keys. Call sites
// hand over canonical values and an injected store; they never branch
// on the contract.

use chrono::NaiveDateTime;

use alerta_api::BackendContract;
use alerta_api::wire::{self, CreateBody, UpdateBody};

use crate::error::CoreError;
use crate::form::{IncidentForm, Submission, UpdatePatch};
use crate::model::Incident;
use crate::store::IncidentStore;

/// Wire formatting for the backend's zone-less local timestamps.
fn iso_datetime(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Render the flat contract's single display-address string.
fn flat_address(submission: &Submission) -> String {
    match submission.address {
        Some(ref addr) if addr.complement.is_empty() => {
            format!("{}, {}", addr.street, addr.number)
        }
        Some(ref addr) => format!("{}, {}, {}", addr.street, addr.number, addr.complement),
        None => String::new(),
    }
}

/// Stringly coordinate for the flat contract; the field must be present,
/// `"0.0"` when unknown.
fn flat_coordinate(value: Option<f64>) -> String {
    value.map_or_else(|| "0.0".to_owned(), |v| v.to_string())
}

/// Emit a create payload in the target contract's shape.
pub fn create_body(contract: BackendContract, submission: &Submission) -> CreateBody {
    match contract {
        BackendContract::Nested => CreateBody::Nested(wire::nested::CreateBody {
            title: submission.title.clone(),
            date: iso_datetime(submission.occurred_at),
            victims: submission.victims.clone(),
            details: submission.details.clone(),
            priority: submission.priority.wire_name().to_owned(),
            kind: wire::nested::TypeObject {
                id: submission.kind.id,
                name: submission.kind.name.clone(),
                description: String::new(),
            },
            address: submission.address.as_ref().map(|addr| {
                wire::nested::AddressObject {
                    street: addr.street.clone(),
                    number: addr.number.clone(),
                    complement: addr.complement.clone(),
                    district_id: addr.district_id.unwrap_or_default(),
                }
            }),
        }),
        BackendContract::LegacyFlat => CreateBody::Flat(wire::flat::CreateBody {
            titule: submission.title.clone(),
            date: iso_datetime(submission.occurred_at),
            victims: submission.victims.clone(),
            details: submission.details.clone(),
            priority: submission.priority.wire_name().to_owned(),
            kind: submission.kind.id,
            address: flat_address(submission),
            lat: flat_coordinate(submission.coordinates.map(|(lat, _)| lat)),
            lng: flat_coordinate(submission.coordinates.map(|(_, lng)| lng)),
        }),
    }
}

/// Emit an update payload in the target contract's shape.
pub fn update_body(contract: BackendContract, patch: &UpdatePatch) -> UpdateBody {
    match contract {
        BackendContract::Nested => UpdateBody::Nested(wire::nested::UpdateBody {
            title: patch.title.clone(),
            victims: patch.victims.clone(),
            details: patch.details.clone(),
            status: patch.status.wire_name().to_owned(),
            priority: patch.priority.wire_name().to_owned(),
        }),
        BackendContract::LegacyFlat => UpdateBody::Flat(wire::flat::UpdateBody {
            titule: patch.title.clone(),
            victims: patch.victims.clone(),
            details: patch.details.clone(),
            status: patch.status.wire_name().to_owned(),
            priority: patch.priority.wire_name().to_owned(),
        }),
    }
}

// ── Drivers ────────────────────────────────────────────────────────

/// Validate a create form and drive it through the store.
///
/// Validation happens strictly before the store is touched; a rejected
/// form makes no network call. Backend failures come back as-is — no
/// automatic retry.
pub async fn submit_new(
    store: &dyn IncidentStore,
    form: &IncidentForm,
) -> Result<Option<Incident>, CoreError> {
    let submission = form.build_submission()?;
    store.create(&submission).await
}

/// Validate an update patch and drive it through the store. The caller
/// supplies the id of an existing incident; existence is the store's
/// problem, not verified here.
pub async fn submit_update(
    store: &dyn IncidentStore,
    id: i64,
    patch: &UpdatePatch,
) -> Result<(), CoreError> {
    patch.validate()?;
    store.update(id, patch).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::form::SubmissionAddress;
    use crate::model::{IncidentType, Priority, Status};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn submission() -> Submission {
        Submission {
            title: "Resgate Veicular".into(),
            occurred_at: chrono::NaiveDate::from_ymd_opt(2025, 10, 25)
                .unwrap()
                .and_hms_opt(16, 0, 0)
                .unwrap(),
            kind: IncidentType {
                id: 2,
                name: "Resgate".into(),
            },
            priority: Priority::Medium,
            victims: "1 vítima leve".into(),
            details: String::new(),
            address: Some(SubmissionAddress {
                street: "BR-101".into(),
                number: "km 40".into(),
                complement: String::new(),
                district_id: Some(3),
            }),
            coordinates: None,
        }
    }

    #[test]
    fn nested_create_body_uses_corrected_keys_and_objects() {
        let body = create_body(BackendContract::Nested, &submission());
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Resgate Veicular",
                "date": "2025-10-25T16:00:00",
                "victims": "1 vítima leve",
                "details": "",
                "priority": "Media",
                "type": {"id": 2, "name": "Resgate", "description": ""},
                "address": {
                    "street": "BR-101",
                    "number": "km 40",
                    "complement": "",
                    "idDistrict": 3
                }
            })
        );
    }

    #[test]
    fn flat_create_body_uses_legacy_keys_and_sentinel_coordinates() {
        let body = create_body(BackendContract::LegacyFlat, &submission());
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["titule"], "Resgate Veicular");
        assert_eq!(value["type"], 2);
        assert_eq!(value["address"], "BR-101, km 40");
        assert_eq!(value["lat"], "0.0");
        assert_eq!(value["lng"], "0.0");
        assert!(value.get("title").is_none());
    }

    #[test]
    fn flat_create_body_renders_real_coordinates() {
        let mut sub = submission();
        sub.coordinates = Some((-8.05, -34.9));
        let value = serde_json::to_value(create_body(BackendContract::LegacyFlat, &sub)).unwrap();
        assert_eq!(value["lat"], "-8.05");
        assert_eq!(value["lng"], "-34.9");
    }

    #[test]
    fn nested_create_omits_address_when_none() {
        let mut sub = submission();
        sub.address = None;
        let value = serde_json::to_value(create_body(BackendContract::Nested, &sub)).unwrap();
        assert!(value.get("address").is_none());
    }

    #[test]
    fn update_body_title_key_follows_contract() {
        let patch = UpdatePatch {
            title: "Resgate Veicular na BR-101".into(),
            victims: String::new(),
            details: String::new(),
            status: Status::Closed,
            priority: Priority::Medium,
        };

        let nested = serde_json::to_value(update_body(BackendContract::Nested, &patch)).unwrap();
        assert_eq!(nested["title"], "Resgate Veicular na BR-101");
        assert_eq!(nested["status"], "Encerrada");

        let flat = serde_json::to_value(update_body(BackendContract::LegacyFlat, &patch)).unwrap();
        assert_eq!(flat["titule"], "Resgate Veicular na BR-101");
        assert!(flat.get("title").is_none());
    }
}
