//! Work log commands: add, edit, rm, show, list.

use jiff::tz::TimeZone;

use crate::form::{self, FieldError};
use crate::model::{RepoBranch, RepoFilter, StatusFilter, WorkLogFormData, WorkLogPatch};
use crate::store::LogStore;

use super::format::{format_detail, format_summary, short_id};
use super::{ListArgs, LogFields, StatusArg, resolve_log};

pub(super) fn cmd_add(
    store: &mut LogStore,
    requirement: String,
    fields: LogFields,
) -> Result<(), String> {
    let data = WorkLogFormData {
        requirement,
        note: fields.note,
        repo_branches: form::prune_blank_rows(parse_repo_branches(&fields.repos)),
        ticket_id: fields.ticket.unwrap_or_default(),
        status: fields
            .status
            .map(StatusArg::to_domain)
            .unwrap_or_default(),
    };
    form::validate(&data).map_err(|errors| describe_field_errors(&errors))?;

    let log = store
        .add(data)
        .map_err(|e| format!("failed to save work log: {e}"))?;

    println!("{}", log.id);
    Ok(())
}

pub(super) fn cmd_edit(
    store: &mut LogStore,
    reference: &str,
    requirement: Option<String>,
    fields: LogFields,
    clear_repos: bool,
) -> Result<(), String> {
    let id = resolve_log(store, reference)?.id.clone();

    let repo_branches = if clear_repos {
        Some(Vec::new())
    } else if fields.repos.is_empty() {
        None
    } else {
        let rows = form::prune_blank_rows(parse_repo_branches(&fields.repos));
        if rows.is_empty() {
            return Err("--repo values are all blank; use --clear-repos to remove repositories"
                .to_string());
        }
        Some(rows)
    };
    let patch = WorkLogPatch {
        requirement,
        note: fields.note,
        repo_branches,
        ticket_id: fields.ticket,
        status: fields.status.map(StatusArg::to_domain),
    };
    if patch.is_empty() {
        return Err("nothing to change: pass at least one field to edit".to_string());
    }
    form::validate_patch(&patch).map_err(|errors| describe_field_errors(&errors))?;

    store.set_editing(Some(id.clone()));
    store
        .update(&id, patch)
        .map_err(|e| format!("failed to save work log: {e}"))?;

    eprintln!("Updated {}", short_id(&id));
    Ok(())
}

pub(super) fn cmd_rm(store: &mut LogStore, reference: &str) -> Result<(), String> {
    let id = resolve_log(store, reference)?.id.clone();

    store
        .delete(&id)
        .map_err(|e| format!("failed to save work logs: {e}"))?;

    eprintln!("Deleted {}", short_id(&id));
    Ok(())
}

pub(super) fn cmd_show(store: &LogStore, reference: &str) -> Result<(), String> {
    let log = resolve_log(store, reference)?;
    println!("{}", format_detail(log, &TimeZone::system()));
    Ok(())
}

pub(super) fn cmd_list(store: &mut LogStore, args: ListArgs) -> Result<(), String> {
    store.set_search_query(args.search.unwrap_or_default());
    store.set_status_filter(match args.status {
        Some(status) => StatusFilter::Only(status.to_domain()),
        None => StatusFilter::All,
    });
    store.set_repo_filter(match args.repo {
        Some(repo) => RepoFilter::Only(repo),
        None => RepoFilter::All,
    });
    store.set_sort_key(args.sort.to_domain());
    store.set_sort_order(args.order.to_domain());

    println!("{}", store.app_title());

    let logs = store.filtered_logs();
    if logs.is_empty() {
        println!("No work logs");
        return Ok(());
    }

    let tz = TimeZone::system();
    for log in &logs {
        println!("{}", format_summary(log, &tz));
    }
    if logs.len() < store.logs().len() {
        eprintln!("{} of {} logs shown", logs.len(), store.logs().len());
    }
    Ok(())
}

/// Parses `repository[:branch]` values.
fn parse_repo_branches(values: &[String]) -> Vec<RepoBranch> {
    values
        .iter()
        .map(|value| match value.split_once(':') {
            Some((repository, branch)) => RepoBranch::new(repository.trim(), branch.trim()),
            None => RepoBranch::new(value.trim(), ""),
        })
        .collect()
}

fn describe_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
