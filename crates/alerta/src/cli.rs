//! Clap derive structures for the `alerta` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. The
//! mobile app's screens map onto subcommands: login, the searchable
//! incident list, the detail view, and the create/edit forms.

use clap::{Args, Parser, Subcommand, ValueEnum};

use alerta_core::{Priority, Status};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// alerta -- field-reporting CLI for emergency-response personnel
#[derive(Debug, Parser)]
#[command(
    name = "alerta",
    version,
    about = "Report and track emergency incidents from the command line",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "ALERTA_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend root URL (overrides profile)
    #[arg(long, short = 'b', env = "ALERTA_BACKEND", global = true)]
    pub backend: Option<String>,

    /// Use the seeded offline fixture backend instead of the network
    #[arg(long, env = "ALERTA_FIXTURES", global = true)]
    pub fixtures: bool,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "ALERTA_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "ALERTA_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds [default: 30, or the profile's value]
    #[arg(long, env = "ALERTA_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Grouped tables (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

// ── Shared value enums ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    InProgress,
    Closed,
    Cancelled,
}

impl From<StatusArg> for Status {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::InProgress => Self::InProgress,
            StatusArg::Closed => Self::Closed,
            StatusArg::Cancelled => Self::Cancelled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
    Critical,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Low => Self::Low,
            PriorityArg::Medium => Self::Medium,
            PriorityArg::High => Self::High,
            PriorityArg::Critical => Self::Critical,
        }
    }
}

// ── Command Tree ─────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and persist the session token
    Login(LoginArgs),

    /// Drop the persisted session token
    Logout,

    /// List incidents, grouped by status
    List(ListArgs),

    /// Show one incident in detail
    Show {
        /// Incident id
        id: i64,
    },

    /// Report a new incident
    Report(ReportArgs),

    /// Update an existing incident
    Update(UpdateArgs),

    /// Show the incident type / subtype / region catalogs
    Types,
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// CPF of the responder account
    pub cpf: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Free-text search over incident ids and titles
    pub search: Option<String>,

    /// Only incidents with this status
    #[arg(long)]
    pub status: Option<StatusArg>,

    /// Only incidents of this type id (see `alerta types`)
    #[arg(long = "type")]
    pub type_id: Option<i64>,

    /// Only incidents whose address mentions this region
    #[arg(long)]
    pub region: Option<String>,

    /// Start of the date range, DD/MM/YYYY (inclusive)
    #[arg(long)]
    pub from: Option<String>,

    /// End of the date range, DD/MM/YYYY (inclusive, whole day)
    #[arg(long)]
    pub to: Option<String>,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Main incident type id (see `alerta types`)
    #[arg(long = "type")]
    pub type_id: i64,

    /// Subtype id; its label becomes the incident title
    #[arg(long)]
    pub subtype: Option<i64>,

    /// Explicit title (overrides the subtype label)
    #[arg(long)]
    pub title: Option<String>,

    /// Date of the event, DD/MM/YYYY (defaults to today)
    #[arg(long)]
    pub date: Option<String>,

    /// Time of the event, HH:MM (defaults to now)
    #[arg(long)]
    pub time: Option<String>,

    /// Priority
    #[arg(long, default_value = "medium")]
    pub priority: PriorityArg,

    /// People involved / casualties
    #[arg(long, default_value = "")]
    pub victims: String,

    /// Free-text description
    #[arg(long, default_value = "")]
    pub details: String,

    /// Street name
    #[arg(long, default_value = "")]
    pub street: String,

    /// Street number
    #[arg(long, default_value = "")]
    pub number: String,

    /// Address complement
    #[arg(long, default_value = "")]
    pub complement: String,

    /// District id
    #[arg(long)]
    pub district: Option<i64>,

    /// Latitude of the event
    #[arg(long)]
    pub lat: Option<f64>,

    /// Longitude of the event
    #[arg(long)]
    pub lng: Option<f64>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Incident id
    pub id: i64,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New status
    #[arg(long)]
    pub status: Option<StatusArg>,

    /// New priority
    #[arg(long)]
    pub priority: Option<PriorityArg>,

    /// New victims text
    #[arg(long)]
    pub victims: Option<String>,

    /// New details text
    #[arg(long)]
    pub details: Option<String>,
}
