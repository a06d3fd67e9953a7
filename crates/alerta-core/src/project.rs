// ── Incident list projection ──
//
// The pure filter/group engine behind the incident list screen: one
// composed predicate over the full collection, then status-bucketed
// sectioning in a fixed order. Deterministic and strictly read-only over
// its inputs; callers re-run it on every search or filter change.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::model::{Incident, Status};

// ── Criteria ───────────────────────────────────────────────────────

/// Criteria set applied to the incident list. Every field is optional;
/// an unset field constrains nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Inclusive lower bound, from the start of that day.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound, through the end of that day.
    pub date_to: Option<NaiveDate>,
    pub status: Option<Status>,
    /// Incident type id.
    pub kind: Option<i64>,
    /// Substring matched against any available address text field.
    pub region: Option<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Number of active constraints (the filter-badge count).
    pub fn active_count(&self) -> usize {
        usize::from(self.date_from.is_some() || self.date_to.is_some())
            + usize::from(self.status.is_some())
            + usize::from(self.kind.is_some())
            + usize::from(self.region.is_some())
    }
}

// ── Output ─────────────────────────────────────────────────────────

/// One status bucket of the projected list. Regenerated on every
/// projection, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionGroup {
    pub title: String,
    pub status: Status,
    pub items: Vec<Incident>,
    pub count: usize,
}

// ── Projection ─────────────────────────────────────────────────────

/// Project the full incident collection into status-grouped sections.
///
/// Sections appear in the fixed order InProgress, Closed, Cancelled;
/// empty buckets are omitted. Within a section, items keep the relative
/// order of the source collection. Incidents whose status isn't one of
/// the known states are excluded. Never panics on ragged records: a
/// missing timestamp simply fails any date bound.
pub fn project(
    incidents: &[Incident],
    search: &str,
    criteria: &FilterCriteria,
) -> Vec<SectionGroup> {
    let matched: Vec<&Incident> = incidents
        .iter()
        .filter(|incident| matches(incident, search, criteria))
        .collect();

    Status::DISPLAY_ORDER
        .iter()
        .filter_map(|&status| {
            let items: Vec<Incident> = matched
                .iter()
                .filter(|incident| incident.status == Some(status))
                .map(|incident| (*incident).clone())
                .collect();
            if items.is_empty() {
                return None;
            }
            Some(SectionGroup {
                title: status.label().to_owned(),
                status,
                count: items.len(),
                items,
            })
        })
        .collect()
}

/// The composed predicate: AND of the independent sub-predicates.
fn matches(incident: &Incident, search: &str, criteria: &FilterCriteria) -> bool {
    matches_text(incident, search)
        && matches_date_range(incident.occurred_at, criteria.date_from, criteria.date_to)
        && criteria
            .status
            .is_none_or(|want| incident.status == Some(want))
        && matches_kind(incident, criteria.kind)
        && matches_region(incident, criteria.region.as_deref())
}

/// Free-text match: the decimal id string or the canonical title,
/// case-insensitively for the title.
fn matches_text(incident: &Incident, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    if incident.id.to_string().contains(search) {
        return true;
    }
    let needle = search.to_lowercase();
    incident
        .title
        .as_deref()
        .is_some_and(|title| title.to_lowercase().contains(&needle))
}

/// Date-range match, inclusive at both ends: the upper bound covers the
/// entire calendar day. A record with no usable timestamp cannot satisfy
/// a bound.
fn matches_date_range(
    occurred_at: Option<NaiveDateTime>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> bool {
    if from.is_none() && to.is_none() {
        return true;
    }
    let Some(at) = occurred_at else {
        return false;
    };
    if let Some(from) = from {
        if at < from.and_time(NaiveTime::MIN) {
            return false;
        }
    }
    if let Some(to) = to {
        let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).expect("valid time");
        if at > to.and_time(end_of_day) {
            return false;
        }
    }
    true
}

fn matches_kind(incident: &Incident, want: Option<i64>) -> bool {
    let Some(want) = want else {
        return true;
    };
    incident.kind.as_ref().is_some_and(|kind| kind.id == want)
}

/// Region match: substring containment against any available address
/// text field, case-insensitively.
fn matches_region(incident: &Incident, region: Option<&str>) -> bool {
    let Some(region) = region else {
        return true;
    };
    let needle = region.to_lowercase();
    incident
        .location
        .search_texts()
        .any(|text| text.to_lowercase().contains(&needle))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{IncidentType, Location, Priority};
    use pretty_assertions::assert_eq;

    fn incident(id: i64, title: &str, status: &str, date: &str) -> Incident {
        Incident {
            id,
            title: Some(title.to_owned()),
            status: Status::parse_wire(status),
            priority: Some(Priority::Medium),
            occurred_at: chrono::NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S").ok(),
            kind: Some(IncidentType {
                id: 1,
                name: "Incêndio".into(),
            }),
            location: Location::default(),
            victims: None,
            details: None,
        }
    }

    fn sample() -> Vec<Incident> {
        vec![
            incident(101, "Incêndio em Edificação", "Em_andamento", "2025-10-25T14:30:00"),
            incident(102, "Resgate Veicular na BR-101", "Encerrada", "2025-10-25T16:00:00"),
            incident(103, "Vazamento de Gás GLP", "Cancelada", "2025-10-24T09:15:00"),
        ]
    }

    #[test]
    fn empty_criteria_yields_one_group_per_status_in_fixed_order() {
        let groups = project(&sample(), "", &FilterCriteria::default());
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].status, Status::InProgress);
        assert_eq!(groups[1].status, Status::Closed);
        assert_eq!(groups[2].status, Status::Cancelled);
        assert!(groups.iter().all(|g| g.count == 1));
        assert!(groups.iter().all(|g| g.count == g.items.len()));
    }

    #[test]
    fn grouping_order_ignores_input_order() {
        let mut reversed = sample();
        reversed.reverse();
        let groups = project(&reversed, "", &FilterCriteria::default());
        let order: Vec<Status> = groups.iter().map(|g| g.status).collect();
        assert_eq!(order, vec![Status::InProgress, Status::Closed, Status::Cancelled]);
    }

    #[test]
    fn unknown_status_incidents_are_excluded() {
        let mut incidents = sample();
        incidents.push(incident(104, "Sem estado", "Arquivada", "2025-10-25T10:00:00"));
        let groups = project(&incidents, "", &FilterCriteria::default());
        let total: usize = groups.iter().map(|g| g.count).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn search_by_id_substring_returns_single_group() {
        let groups = project(&sample(), "102", &FilterCriteria::default());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].status, Status::Closed);
        assert_eq!(groups[0].items[0].id, 102);
    }

    #[test]
    fn search_by_title_is_case_insensitive() {
        let groups = project(&sample(), "resgate", &FilterCriteria::default());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].items[0].id, 102);
    }

    #[test]
    fn search_result_is_subset_matching_title_or_id() {
        let groups = project(&sample(), "10", &FilterCriteria::default());
        for group in &groups {
            for item in &group.items {
                let title_hit = item
                    .title
                    .as_deref()
                    .is_some_and(|t| t.to_lowercase().contains("10"));
                let id_hit = item.id.to_string().contains("10");
                assert!(title_hit || id_hit);
            }
        }
    }

    #[test]
    fn date_range_is_inclusive_at_both_ends() {
        let day = chrono::NaiveDate::from_ymd_opt(2025, 10, 25).unwrap();
        let at_last_milli = Incident {
            occurred_at: Some(day.and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap())),
            ..incident(201, "Limite", "Em_andamento", "2025-10-25T00:00:00")
        };
        let just_after = Incident {
            occurred_at: day
                .succ_opt()
                .map(|d| d.and_time(NaiveTime::MIN)),
            ..incident(202, "Fora", "Em_andamento", "2025-10-26T00:00:00")
        };

        let criteria = FilterCriteria {
            date_from: Some(day),
            date_to: Some(day),
            ..FilterCriteria::default()
        };
        let groups = project(&[at_last_milli, just_after], "", &criteria);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].count, 1);
        assert_eq!(groups[0].items[0].id, 201);
    }

    #[test]
    fn missing_timestamp_fails_any_date_bound() {
        let mut undated = incident(301, "Sem data", "Em_andamento", "bogus");
        undated.occurred_at = None;

        let unbounded = project(&[undated.clone()], "", &FilterCriteria::default());
        assert_eq!(unbounded.len(), 1);

        let bounded = FilterCriteria {
            date_from: chrono::NaiveDate::from_ymd_opt(2020, 1, 1),
            ..FilterCriteria::default()
        };
        assert!(project(&[undated], "", &bounded).is_empty());
    }

    #[test]
    fn status_and_kind_criteria_compose() {
        let criteria = FilterCriteria {
            status: Some(Status::Closed),
            kind: Some(1),
            ..FilterCriteria::default()
        };
        let groups = project(&sample(), "", &criteria);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].items[0].id, 102);

        let wrong_kind = FilterCriteria {
            status: Some(Status::Closed),
            kind: Some(7),
            ..FilterCriteria::default()
        };
        assert!(project(&sample(), "", &wrong_kind).is_empty());
    }

    #[test]
    fn region_matches_any_address_text_field() {
        let mut incidents = sample();
        incidents[0].location.display = Some("Rua da Aurora, 123, Recife - PE".into());
        incidents[1].location.city = Some("Abreu e Lima".into());
        incidents[2].location.district = Some("Carmo".into());

        let by_display = FilterCriteria {
            region: Some("recife".into()),
            ..FilterCriteria::default()
        };
        let groups = project(&incidents, "", &by_display);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].items[0].id, 101);

        let by_city = FilterCriteria {
            region: Some("abreu".into()),
            ..FilterCriteria::default()
        };
        assert_eq!(project(&incidents, "", &by_city)[0].items[0].id, 102);

        let by_district = FilterCriteria {
            region: Some("Carmo".into()),
            ..FilterCriteria::default()
        };
        assert_eq!(project(&incidents, "", &by_district)[0].items[0].id, 103);
    }

    #[test]
    fn projection_is_pure_and_idempotent() {
        let incidents = sample();
        let before = incidents.clone();
        let criteria = FilterCriteria {
            status: Some(Status::InProgress),
            ..FilterCriteria::default()
        };

        let first = project(&incidents, "incêndio", &criteria);
        let second = project(&incidents, "incêndio", &criteria);
        assert_eq!(first, second);
        // Source collection untouched.
        assert_eq!(incidents, before);
    }

    #[test]
    fn in_bucket_order_preserves_source_order() {
        let incidents = vec![
            incident(5, "b", "Em_andamento", "2025-10-25T10:00:00"),
            incident(3, "a", "Em_andamento", "2025-10-24T10:00:00"),
            incident(9, "c", "Em_andamento", "2025-10-26T10:00:00"),
        ];
        let groups = project(&incidents, "", &FilterCriteria::default());
        let ids: Vec<i64> = groups[0].items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![5, 3, 9]);
    }

    #[test]
    fn active_count_tracks_constraints() {
        assert!(FilterCriteria::default().is_empty());
        let criteria = FilterCriteria {
            date_from: chrono::NaiveDate::from_ymd_opt(2025, 1, 1),
            status: Some(Status::Closed),
            region: Some("RMR".into()),
            ..FilterCriteria::default()
        };
        assert_eq!(criteria.active_count(), 3);
    }
}
