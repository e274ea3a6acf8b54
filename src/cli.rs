//! CLI interface for worklog.
//!
//! Each subcommand is non-interactive: arguments in, plain text out.
//! Ids are printed to stdout; confirmations and warnings go to stderr.
//!
//! Log ids may be given in full or as an unambiguous prefix (e.g. `a3b`).

mod format;
mod log;
mod repo;
mod transfer;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::model::{SortKey, SortOrder, TaskStatus, WorkLog};
use crate::store::LogStore;

use format::short_id;
use repo::RepoCommand;

/// Worklog: track work items, their branches, and where they stand.
#[derive(Debug, Parser)]
#[command(name = "worklog", version, after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r#"Workflow: tracking a change
  1. worklog add "Fix login redirect" --ticket YX-1024 --repo frontend-repo:fix/login
     → prints a log ID (e.g. a3b0fc12-...)
  2. worklog edit a3b --status testing
  3. worklog list --status testing --repo frontend-repo
  4. worklog edit a3b --status released --note "shipped in 2.4.1"

Data:
  worklog export --out backup.json
  worklog import backup.json"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a new work log. Prints the log ID.
    Add {
        /// What the work is about.
        requirement: String,

        #[command(flatten)]
        fields: LogFields,
    },

    /// Change fields of an existing log.
    ///
    /// Only the given fields change. `--repo` replaces the whole
    /// repository list; an empty `--note ""` removes the note.
    Edit {
        /// Log ID: full or unambiguous prefix.
        id: String,

        /// New requirement text.
        #[arg(long)]
        requirement: Option<String>,

        #[command(flatten)]
        fields: LogFields,

        /// Remove all repository branches.
        #[arg(long, conflicts_with = "repos")]
        clear_repos: bool,
    },

    /// Delete a log.
    Rm {
        /// Log ID: full or unambiguous prefix.
        id: String,
    },

    /// Show one log in full.
    Show {
        /// Log ID: full or unambiguous prefix.
        id: String,
    },

    /// List logs, filtered and sorted.
    ///
    /// Search is a case-insensitive substring match over requirement,
    /// ticket, note, repositories, and branches.
    List(ListArgs),

    /// Manage the list of known repositories.
    Repo {
        #[command(subcommand)]
        command: RepoCommand,
    },

    /// Export all logs as JSON.
    ///
    /// Writes `work-logs-<date>.json` in the current directory unless
    /// `--out` is given. `--out -` writes to stdout.
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Import logs from a JSON export.
    ///
    /// Entries whose ID already exists are skipped; existing logs are never overwritten.
    Import {
        /// The JSON file to read.
        file: PathBuf,
    },

    /// Show the display title, or set it.
    Title {
        /// New title.
        title: Option<String>,
    },
}

/// Form fields shared by `add` and `edit`.
#[derive(Debug, Args)]
pub struct LogFields {
    /// Free-text note.
    #[arg(long)]
    note: Option<String>,

    /// External ticket reference.
    #[arg(long)]
    ticket: Option<String>,

    /// Status (new logs default to development).
    #[arg(long, value_enum)]
    status: Option<StatusArg>,

    /// Repository and optional branch. Can be specified multiple times.
    #[arg(long = "repo", value_name = "REPOSITORY[:BRANCH]")]
    repos: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Search text.
    #[arg(long, short)]
    search: Option<String>,

    /// Only logs with this status (all when omitted).
    #[arg(long, value_enum)]
    status: Option<StatusArg>,

    /// Only logs touching this exact repository (all when omitted).
    #[arg(long)]
    repo: Option<String>,

    /// Timestamp to sort by.
    #[arg(long, value_enum, default_value_t = SortArg::Created)]
    sort: SortArg,

    /// Sort direction.
    #[arg(long, value_enum, default_value_t = OrderArg::Desc)]
    order: OrderArg,
}

/// CLI-facing status, mapped to the domain `TaskStatus`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Development,
    Testing,
    Staging,
    Released,
}

impl StatusArg {
    fn to_domain(self) -> TaskStatus {
        match self {
            Self::Development => TaskStatus::Development,
            Self::Testing => TaskStatus::Testing,
            Self::Staging => TaskStatus::Staging,
            Self::Released => TaskStatus::Released,
        }
    }
}

/// CLI-facing sort key, mapped to the domain `SortKey`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    /// Creation time.
    Created,
    /// Last update time.
    Updated,
}

impl SortArg {
    fn to_domain(self) -> SortKey {
        match self {
            Self::Created => SortKey::CreatedAt,
            Self::Updated => SortKey::UpdatedAt,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OrderArg {
    /// Oldest first.
    Asc,
    /// Newest first.
    Desc,
}

impl OrderArg {
    fn to_domain(self) -> SortOrder {
        match self {
            Self::Asc => SortOrder::Asc,
            Self::Desc => SortOrder::Desc,
        }
    }
}

/// Run a parsed command against the store, returning an error message on failure.
pub fn run(cli: Cli, store: &mut LogStore) -> Result<(), String> {
    match cli.command {
        Command::Add {
            requirement,
            fields,
        } => log::cmd_add(store, requirement, fields),
        Command::Edit {
            id,
            requirement,
            fields,
            clear_repos,
        } => log::cmd_edit(store, &id, requirement, fields, clear_repos),
        Command::Rm { id } => log::cmd_rm(store, &id),
        Command::Show { id } => log::cmd_show(store, &id),
        Command::List(args) => log::cmd_list(store, args),
        Command::Repo { command } => match command {
            RepoCommand::Add { name } => repo::cmd_add(store, &name),
            RepoCommand::Rm { name } => repo::cmd_rm(store, &name),
            RepoCommand::List => repo::cmd_list(store),
        },
        Command::Export { out } => transfer::cmd_export(store, out),
        Command::Import { file } => transfer::cmd_import(store, &file),
        Command::Title { title } => cmd_title(store, title.as_deref()),
    }
}

fn cmd_title(store: &mut LogStore, title: Option<&str>) -> Result<(), String> {
    let Some(title) = title else {
        println!("{}", store.app_title());
        return Ok(());
    };

    let title = title.trim();
    if title.is_empty() {
        return Err("title must not be empty".to_string());
    }
    store
        .set_app_title(title)
        .map_err(|e| format!("failed to save title: {e}"))?;
    eprintln!("Title set to {title}");
    Ok(())
}

/// Resolve a log reference (full id or unambiguous prefix) to a log.
fn resolve_log<'a>(store: &'a LogStore, reference: &str) -> Result<&'a WorkLog, String> {
    // Exact id first.
    if let Some(log) = store.get(reference) {
        return Ok(log);
    }

    let matches: Vec<&WorkLog> = store
        .logs()
        .iter()
        .filter(|log| log.id.starts_with(reference))
        .collect();

    match matches.len() {
        0 => Err(format!("no work log matching '{reference}'")),
        1 => Ok(matches[0]),
        n => {
            let ids: Vec<&str> = matches.iter().map(|log| short_id(&log.id)).collect();
            Err(format!(
                "'{reference}' is ambiguous: matches {n} logs: {}",
                ids.join(", ")
            ))
        }
    }
}
