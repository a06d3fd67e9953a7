// ── Incident form state and normalization ──
//
// The create/edit form's loosely-typed state, the live input masks, and
// the validation pass that turns it into a canonical `Submission`.
// Validation fails fast: a rejected form never reaches the store.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::ValidationError;
use crate::model::{IncidentType, Priority, Status};

// ── Input masks ────────────────────────────────────────────────────

/// Reformat a raw keystroke stream into `DD/MM/YYYY`.
///
/// Non-digits are stripped, the stream is truncated to 8 digits, and
/// separators are inserted after the 2nd and 4th digit. Partial input
/// stays partial: `"259"` masks to `"25/9"`.
pub fn mask_date(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).take(8).collect();
    match digits.len() {
        0..=2 => digits,
        3..=4 => format!("{}/{}", &digits[..2], &digits[2..]),
        _ => format!("{}/{}/{}", &digits[..2], &digits[2..4], &digits[4..]),
    }
}

/// Reformat a raw keystroke stream into `HH:MM` (max 4 digits, separator
/// after the 2nd).
pub fn mask_time(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).take(4).collect();
    if digits.len() <= 2 {
        digits
    } else {
        format!("{}:{}", &digits[..2], &digits[2..])
    }
}

// ── Form state ─────────────────────────────────────────────────────

/// Raw create-form state as collected from the user. Everything is
/// optional or stringly here; [`IncidentForm::build_submission`] is
/// where it becomes typed.
#[derive(Debug, Clone, Default)]
pub struct IncidentForm {
    /// Free-text label, typically the chosen subtype's label.
    pub title: String,
    pub kind: Option<IncidentType>,
    /// Masked date, `DD/MM/YYYY`.
    pub date: String,
    /// Masked time, `HH:MM`.
    pub time: String,
    pub priority: Option<Priority>,
    pub victims: String,
    pub details: String,
    pub street: String,
    pub number: String,
    pub complement: String,
    pub district_id: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Canonical, validated submission payload — everything the backend
/// requires, independent of which wire contract will carry it.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub title: String,
    pub occurred_at: NaiveDateTime,
    pub kind: IncidentType,
    pub priority: Priority,
    pub victims: String,
    pub details: String,
    pub address: Option<SubmissionAddress>,
    pub coordinates: Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionAddress {
    pub street: String,
    pub number: String,
    pub complement: String,
    pub district_id: Option<i64>,
}

impl IncidentForm {
    /// Whether the user started filling in an address.
    fn has_address_input(&self) -> bool {
        !self.street.trim().is_empty()
            || !self.number.trim().is_empty()
            || !self.complement.trim().is_empty()
            || self.district_id.is_some()
    }

    /// Validate and assemble the canonical payload. Fails on the first
    /// missing required field, before any network call is attempted.
    pub fn build_submission(&self) -> Result<Submission, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::required("title"));
        }
        let Some(ref kind) = self.kind else {
            return Err(ValidationError::required("type"));
        };
        let Some(priority) = self.priority else {
            return Err(ValidationError::required("priority"));
        };
        let occurred_at = parse_masked_datetime(&self.date, &self.time)?;

        let address = if self.has_address_input() {
            if self.street.trim().is_empty() {
                return Err(ValidationError::required("street"));
            }
            if self.number.trim().is_empty() {
                return Err(ValidationError::required("number"));
            }
            Some(SubmissionAddress {
                street: self.street.trim().to_owned(),
                number: self.number.trim().to_owned(),
                complement: self.complement.trim().to_owned(),
                district_id: self.district_id,
            })
        } else {
            None
        };

        let coordinates = match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        };

        Ok(Submission {
            title: title.to_owned(),
            occurred_at,
            kind: kind.clone(),
            priority,
            victims: self.victims.trim().to_owned(),
            details: self.details.trim().to_owned(),
            address,
            coordinates,
        })
    }
}

/// Combine the masked date and time inputs into one local timestamp.
fn parse_masked_datetime(date: &str, time: &str) -> Result<NaiveDateTime, ValidationError> {
    if date.len() < 10 {
        return Err(ValidationError::new("date", "expected DD/MM/YYYY"));
    }
    if time.len() < 5 {
        return Err(ValidationError::new("time", "expected HH:MM"));
    }
    let date = NaiveDate::parse_from_str(date, "%d/%m/%Y")
        .map_err(|_| ValidationError::new("date", format!("not a calendar date: {date}")))?;
    let time = NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| ValidationError::new("time", format!("not a clock time: {time}")))?;
    Ok(date.and_time(time))
}

// ── Update patch ───────────────────────────────────────────────────

/// Editable fields of an existing incident — the edit screen's surface.
/// Anything not listed here is immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePatch {
    pub title: String,
    pub victims: String,
    pub details: String,
    pub status: Status,
    pub priority: Priority,
}

impl UpdatePatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::required("title"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn valid_form() -> IncidentForm {
        IncidentForm {
            title: "Incêndio Florestal".into(),
            kind: Some(IncidentType {
                id: 1,
                name: "Incêndio".into(),
            }),
            date: "25/10/2025".into(),
            time: "14:30".into(),
            priority: Some(Priority::High),
            victims: String::new(),
            details: "Foco em vegetação.".into(),
            street: "Rua da Aurora".into(),
            number: "123".into(),
            complement: String::new(),
            district_id: Some(2),
            latitude: None,
            longitude: None,
        }
    }

    // ── Masks ──

    #[test]
    fn date_mask_inserts_separators_after_2_and_4_digits() {
        assert_eq!(mask_date("25102025"), "25/10/2025");
        assert_eq!(mask_date("25"), "25");
        assert_eq!(mask_date("259"), "25/9");
        assert_eq!(mask_date("2510"), "25/10");
        assert_eq!(mask_date("25102"), "25/10/2");
    }

    #[test]
    fn date_mask_truncates_to_8_digits() {
        assert_eq!(mask_date("251020259"), "25/10/2025");
        assert_eq!(mask_date("9999999999999"), "99/99/9999");
    }

    #[test]
    fn date_mask_strips_non_digits() {
        assert_eq!(mask_date("25/10/2025"), "25/10/2025");
        assert_eq!(mask_date("2a5b1c0"), "25/10");
        assert_eq!(mask_date(""), "");
    }

    #[test]
    fn time_mask_inserts_separator_after_2_digits() {
        assert_eq!(mask_time("1430"), "14:30");
        assert_eq!(mask_time("143"), "14:3");
        assert_eq!(mask_time("14"), "14");
        assert_eq!(mask_time("14305"), "14:30");
    }

    // ── Validation ──

    #[test]
    fn valid_form_builds_submission() {
        let submission = valid_form().build_submission().unwrap();
        assert_eq!(submission.title, "Incêndio Florestal");
        assert_eq!(
            submission.occurred_at,
            NaiveDate::from_ymd_opt(2025, 10, 25)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap()
        );
        let address = submission.address.unwrap();
        assert_eq!(address.street, "Rua da Aurora");
        assert_eq!(address.district_id, Some(2));
    }

    #[test]
    fn empty_title_is_rejected_even_when_all_else_is_valid() {
        let mut form = valid_form();
        form.title = "   ".into();
        let err = form.build_submission().unwrap_err();
        assert_eq!(err.field, "title");
    }

    #[test]
    fn missing_type_is_rejected() {
        let mut form = valid_form();
        form.kind = None;
        assert_eq!(form.build_submission().unwrap_err().field, "type");
    }

    #[test]
    fn partial_date_or_time_is_rejected() {
        let mut form = valid_form();
        form.date = "25/10".into();
        assert_eq!(form.build_submission().unwrap_err().field, "date");

        let mut form = valid_form();
        form.time = "14".into();
        assert_eq!(form.build_submission().unwrap_err().field, "time");
    }

    #[test]
    fn impossible_calendar_date_is_rejected() {
        let mut form = valid_form();
        form.date = "31/02/2025".into();
        assert_eq!(form.build_submission().unwrap_err().field, "date");
    }

    #[test]
    fn address_fields_required_only_when_address_started() {
        // No address input at all: fine.
        let mut form = valid_form();
        form.street = String::new();
        form.number = String::new();
        form.complement = String::new();
        form.district_id = None;
        assert!(form.build_submission().unwrap().address.is_none());

        // Street given but number missing: rejected.
        let mut form = valid_form();
        form.number = String::new();
        assert_eq!(form.build_submission().unwrap_err().field, "number");

        // District given but street missing: rejected.
        let mut form = valid_form();
        form.street = String::new();
        form.number = String::new();
        assert_eq!(form.build_submission().unwrap_err().field, "street");
    }

    #[test]
    fn coordinates_require_both_axes() {
        let mut form = valid_form();
        form.latitude = Some(-8.05);
        assert_eq!(form.build_submission().unwrap().coordinates, None);

        form.longitude = Some(-34.9);
        assert_eq!(
            form.build_submission().unwrap().coordinates,
            Some((-8.05, -34.9))
        );
    }

    #[test]
    fn update_patch_requires_title() {
        let patch = UpdatePatch {
            title: String::new(),
            victims: String::new(),
            details: String::new(),
            status: Status::Closed,
            priority: Priority::Medium,
        };
        assert_eq!(patch.validate().unwrap_err().field, "title");
    }
}
