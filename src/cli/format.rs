//! Output formatting for CLI display.

use jiff::{Timestamp, tz::TimeZone};

use crate::model::{RepoBranch, WorkLog};

/// The first eight characters of an id, or the whole id if shorter.
pub(super) fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Formats epoch milliseconds with `pattern` in `tz`.
///
/// Out-of-range values are shown as the raw number.
pub(super) fn format_millis(ms: i64, tz: &TimeZone, pattern: &str) -> String {
    match Timestamp::from_millisecond(ms) {
        Ok(ts) => ts.to_zoned(tz.clone()).strftime(pattern).to_string(),
        Err(_) => ms.to_string(),
    }
}

/// `frontend-repo:main, backend-repo`
pub(super) fn format_repo_branches(repo_branches: &[RepoBranch]) -> String {
    repo_branches
        .iter()
        .map(|rb| {
            if rb.branch.is_empty() {
                rb.repository.clone()
            } else {
                format!("{}:{}", rb.repository, rb.branch)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// One line per log for `list`.
pub(super) fn format_summary(log: &WorkLog, tz: &TimeZone) -> String {
    let mut line = format!(
        "{}  {:<11}  {}  {}",
        short_id(&log.id),
        log.status,
        format_millis(log.created_at, tz, "%Y-%m-%d"),
        log.requirement,
    );
    if !log.ticket_id.is_empty() {
        line.push_str(&format!("  ({})", log.ticket_id));
    }
    if !log.repo_branches.is_empty() {
        line.push_str(&format!("  [{}]", format_repo_branches(&log.repo_branches)));
    }
    line
}

/// The full record for `show`.
pub(super) fn format_detail(log: &WorkLog, tz: &TimeZone) -> String {
    let ticket = if log.ticket_id.is_empty() {
        "none"
    } else {
        &log.ticket_id
    };

    let mut lines = vec![
        format!("ID:          {}", log.id),
        format!("Requirement: {}", log.requirement),
        format!("Status:      {}", log.status.label()),
        format!("Ticket:      {ticket}"),
    ];
    if let Some(note) = &log.note {
        lines.push(format!("Note:        {note}"));
    }
    lines.push("Repositories:".to_string());
    if log.repo_branches.is_empty() {
        lines.push("  (none)".to_string());
    }
    lines.extend(log.repo_branches.iter().map(|rb| {
        let branch = if rb.branch.is_empty() { "-" } else { &rb.branch };
        format!("  - {}: {branch}", rb.repository)
    }));
    lines.push(format!(
        "Created:     {}",
        format_millis(log.created_at, tz, "%Y-%m-%d %H:%M")
    ));
    lines.push(format!(
        "Updated:     {}",
        format_millis(log.updated_at, tz, "%Y-%m-%d %H:%M")
    ));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::TaskStatus;

    fn sample_log() -> WorkLog {
        WorkLog {
            id: "a3b0fc12-0000-4000-8000-000000000000".into(),
            requirement: "write docs".into(),
            note: None,
            repo_branches: vec![
                RepoBranch::new("frontend-repo", "main"),
                RepoBranch::new("backend-repo", ""),
            ],
            ticket_id: String::new(),
            status: TaskStatus::Released,
            // 2026-01-02T03:04:00Z
            created_at: 1_767_323_040_000,
            updated_at: 1_767_323_040_000,
        }
    }

    #[test]
    fn short_id_truncates_long_ids_only() {
        assert_eq!(short_id("a3b0fc12-0000"), "a3b0fc12");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn format_millis_in_utc() {
        assert_eq!(
            format_millis(1_767_323_040_000, &TimeZone::UTC, "%Y-%m-%d %H:%M"),
            "2026-01-02 03:04"
        );
    }

    #[test]
    fn format_millis_out_of_range_falls_back() {
        assert_eq!(
            format_millis(i64::MAX, &TimeZone::UTC, "%Y-%m-%d"),
            i64::MAX.to_string()
        );
    }

    #[test]
    fn summary_line() {
        assert_eq!(
            format_summary(&sample_log(), &TimeZone::UTC),
            "a3b0fc12  released     2026-01-02  write docs  [frontend-repo:main, backend-repo]"
        );
    }

    #[test]
    fn summary_includes_ticket() {
        let mut log = sample_log();
        log.ticket_id = "YX-7".into();
        log.repo_branches.clear();

        assert_eq!(
            format_summary(&log, &TimeZone::UTC),
            "a3b0fc12  released     2026-01-02  write docs  (YX-7)"
        );
    }

    #[test]
    fn detail_lists_every_field() {
        let mut log = sample_log();
        log.note = Some("needs review".into());

        let detail = format_detail(&log, &TimeZone::UTC);

        assert!(detail.contains("Requirement: write docs"));
        assert!(detail.contains("Status:      released"));
        assert!(detail.contains("Ticket:      none"));
        assert!(detail.contains("Note:        needs review"));
        assert!(detail.contains("  - frontend-repo: main"));
        assert!(detail.contains("  - backend-repo: -"));
        assert!(detail.ends_with("Updated:     2026-01-02 03:04"));
    }

    #[test]
    fn detail_without_repositories() {
        let mut log = sample_log();
        log.repo_branches.clear();
        log.ticket_id = "YX-7".into();

        assert_eq!(
            format_detail(&log, &TimeZone::UTC),
            "ID:          a3b0fc12-0000-4000-8000-000000000000\n\
             Requirement: write docs\n\
             Status:      released\n\
             Ticket:      YX-7\n\
             Repositories:\n  (none)\n\
             Created:     2026-01-02 03:04\n\
             Updated:     2026-01-02 03:04"
        );
    }
}
