//! Incident command handlers: list, show, report, update, types.

use chrono::{Local, NaiveDate};
use indicatif::{ProgressBar, ProgressStyle};
use tabled::Tabled;

use alerta_core::form::{mask_date, mask_time};
use alerta_core::{
    FilterCriteria, Incident, IncidentForm, IncidentStore, SectionGroup, UpdatePatch, catalog,
    project, submit_new, submit_update,
};

use crate::cli::{GlobalOpts, ListArgs, OutputFormat, ReportArgs, UpdateArgs};
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct IncidentRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Address")]
    address: String,
}

impl From<&Incident> for IncidentRow {
    fn from(incident: &Incident) -> Self {
        Self {
            id: incident.id,
            title: incident.display_title(),
            kind: incident
                .kind
                .as_ref()
                .map(|k| k.name.clone())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "-".into()),
            date: incident
                .occurred_at
                .map(|at| at.format("%d/%m/%Y %H:%M").to_string())
                .unwrap_or_else(|| "-".into()),
            priority: incident
                .priority
                .map_or_else(|| "-".into(), |p| p.to_string()),
            address: incident.location.summary().unwrap_or_else(|| "-".into()),
        }
    }
}

fn detail(incident: &Incident) -> String {
    let mut lines = vec![
        format!("ID:        {}", incident.id),
        format!("Title:     {}", incident.display_title()),
        format!(
            "Type:      {}",
            incident
                .kind
                .as_ref()
                .map(|k| k.name.as_str())
                .filter(|name| !name.is_empty())
                .unwrap_or("-")
        ),
        format!(
            "Status:    {}",
            incident.status.map_or_else(|| "-".into(), |s| s.to_string())
        ),
        format!(
            "Priority:  {}",
            incident.priority.map_or_else(|| "-".into(), |p| p.to_string())
        ),
        format!(
            "Date:      {}",
            incident
                .occurred_at
                .map_or_else(|| "-".into(), |at| at.format("%d/%m/%Y %H:%M").to_string())
        ),
        format!(
            "Address:   {}",
            incident.location.summary().unwrap_or_else(|| "-".into())
        ),
    ];
    if let (Some(lat), Some(lng)) = (incident.location.latitude, incident.location.longitude) {
        lines.push(format!("Position:  {lat}, {lng}"));
    }
    lines.push(format!(
        "Victims:   {}",
        incident.victims.as_deref().unwrap_or("-")
    ));
    lines.push(format!(
        "Details:   {}",
        incident.details.as_deref().unwrap_or("-")
    ));
    lines.join("\n")
}

// ── Spinner ─────────────────────────────────────────────────────────

/// Spinner shown while a store call is in flight (interactive table
/// output only).
fn spinner(message: &'static str, global: &GlobalOpts) -> Option<ProgressBar> {
    if global.quiet || global.output != OutputFormat::Table {
        return None;
    }
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.set_style(ProgressStyle::default_spinner());
    bar.enable_steady_tick(std::time::Duration::from_millis(100));
    Some(bar)
}

// ── Argument parsing helpers ────────────────────────────────────────

/// Parse a `DD/MM/YYYY` argument, running the keystroke mask first so
/// bare digit streams ("25102025") are accepted too.
fn parse_date_arg(raw: &str, field: &'static str) -> Result<NaiveDate, CliError> {
    let masked = mask_date(raw);
    NaiveDate::parse_from_str(&masked, "%d/%m/%Y").map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("expected DD/MM/YYYY, got '{raw}'"),
    })
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn list(
    store: &dyn IncidentStore,
    args: ListArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let criteria = FilterCriteria {
        date_from: args
            .from
            .as_deref()
            .map(|raw| parse_date_arg(raw, "from"))
            .transpose()?,
        date_to: args
            .to
            .as_deref()
            .map(|raw| parse_date_arg(raw, "to"))
            .transpose()?,
        status: args.status.map(Into::into),
        kind: args.type_id,
        region: args.region,
    };
    let search = args.search.unwrap_or_default();

    let bar = spinner("Fetching incidents...", global);
    let incidents = store.get_all().await.map_err(CliError::from_core)?;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    let groups = project(&incidents, &search, &criteria);
    render_groups(&groups, global);
    Ok(())
}

fn render_groups(groups: &[SectionGroup], global: &GlobalOpts) {
    match global.output {
        OutputFormat::Table => {
            if groups.is_empty() {
                output::print_output("No incidents match.", global.quiet);
                return;
            }
            let color = output::should_color(global.color);
            let mut sections = Vec::with_capacity(groups.len());
            for group in groups {
                let rows: Vec<IncidentRow> = group.items.iter().map(IncidentRow::from).collect();
                sections.push(format!(
                    "{}\n{}",
                    output::section_heading(group, color),
                    output::render_table(&rows)
                ));
            }
            output::print_output(&sections.join("\n\n"), global.quiet);
        }
        OutputFormat::Json => output::print_output(&output::render_json_pretty(groups), global.quiet),
        OutputFormat::JsonCompact => {
            output::print_output(&output::render_json_compact(groups), global.quiet);
        }
        OutputFormat::Plain => {
            let ids: Vec<String> = groups
                .iter()
                .flat_map(|g| g.items.iter())
                .map(|i| i.id.to_string())
                .collect();
            output::print_output(&ids.join("\n"), global.quiet);
        }
    }
}

pub async fn show(store: &dyn IncidentStore, id: i64, global: &GlobalOpts) -> Result<(), CliError> {
    let bar = spinner("Fetching incident...", global);
    let incident = store.get_by_id(id).await.map_err(CliError::from_core)?;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
    let incident = incident.ok_or(CliError::NotFound { id })?;

    let rendered = match global.output {
        OutputFormat::Table => detail(&incident),
        OutputFormat::Json => output::render_json_pretty(&incident),
        OutputFormat::JsonCompact => output::render_json_compact(&incident),
        OutputFormat::Plain => incident.id.to_string(),
    };
    output::print_output(&rendered, global.quiet);
    Ok(())
}

pub async fn report(
    store: &dyn IncidentStore,
    args: ReportArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let kind = catalog::incident_type(args.type_id).ok_or_else(|| CliError::Validation {
        field: "type".into(),
        reason: format!("unknown type id {} (see: alerta types)", args.type_id),
    })?;

    // Explicit title wins; otherwise the chosen subtype's label is the
    // title, exactly as on the mobile form.
    let title = match (args.title, args.subtype) {
        (Some(title), _) => title,
        (None, Some(subtype_id)) => catalog::subtypes(args.type_id)
            .iter()
            .find(|entry| entry.id == subtype_id)
            .map(|entry| entry.label.to_owned())
            .ok_or_else(|| CliError::Validation {
                field: "subtype".into(),
                reason: format!("unknown subtype id {subtype_id} for type {}", args.type_id),
            })?,
        (None, None) => String::new(),
    };

    // The form pre-fills the current date and time.
    let now = Local::now().naive_local();
    let date = args
        .date
        .map_or_else(|| now.format("%d/%m/%Y").to_string(), |raw| mask_date(&raw));
    let time = args
        .time
        .map_or_else(|| now.format("%H:%M").to_string(), |raw| mask_time(&raw));

    let form = IncidentForm {
        title,
        kind: Some(kind),
        date,
        time,
        priority: Some(args.priority.into()),
        victims: args.victims,
        details: args.details,
        street: args.street,
        number: args.number,
        complement: args.complement,
        district_id: args.district,
        latitude: args.lat,
        longitude: args.lng,
    };

    let bar = spinner("Submitting incident...", global);
    let created = submit_new(store, &form).await.map_err(CliError::from_core)?;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    match created {
        Some(incident) => output::print_output(
            &format!("Incident #{} registered.", incident.id),
            global.quiet,
        ),
        None => output::print_output("Incident registered.", global.quiet),
    }
    Ok(())
}

pub async fn update(
    store: &dyn IncidentStore,
    args: UpdateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    // The edit screen starts from the existing record; flags overlay it.
    let existing = store
        .get_by_id(args.id)
        .await
        .map_err(CliError::from_core)?
        .ok_or(CliError::NotFound { id: args.id })?;

    let patch = UpdatePatch {
        title: args
            .title
            .or(existing.title)
            .unwrap_or_default(),
        victims: args
            .victims
            .or(existing.victims)
            .unwrap_or_default(),
        details: args
            .details
            .or(existing.details)
            .unwrap_or_default(),
        status: args
            .status
            .map(Into::into)
            .or(existing.status)
            .ok_or_else(|| CliError::Validation {
                field: "status".into(),
                reason: "record has no recognizable status; pass --status".into(),
            })?,
        priority: args
            .priority
            .map(Into::into)
            .or(existing.priority)
            .ok_or_else(|| CliError::Validation {
                field: "priority".into(),
                reason: "record has no recognizable priority; pass --priority".into(),
            })?,
    };

    let bar = spinner("Saving changes...", global);
    submit_update(store, args.id, &patch)
        .await
        .map_err(CliError::from_core)?;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    output::print_output(&format!("Incident #{} updated.", args.id), global.quiet);
    Ok(())
}

// ── Catalogs ────────────────────────────────────────────────────────

#[derive(Tabled)]
struct TypeRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Type")]
    label: &'static str,
    #[tabled(rename = "Subtypes")]
    subtypes: String,
}

pub fn types(global: &GlobalOpts) -> Result<(), CliError> {
    let rows: Vec<TypeRow> = catalog::INCIDENT_TYPES
        .iter()
        .map(|entry| TypeRow {
            id: entry.id,
            label: entry.label,
            subtypes: catalog::subtypes(entry.id)
                .iter()
                .map(|sub| format!("{} {}", sub.id, sub.label))
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect();

    let mut out = output::render_table(&rows);
    out.push_str("\n\nRegions: ");
    out.push_str(&catalog::REGIONS.join(", "));
    output::print_output(&out, global.quiet);
    Ok(())
}
