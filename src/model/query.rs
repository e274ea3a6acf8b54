//! Query types: the filtered, sorted view over the work log collection.

use std::cmp::Ordering;

use super::{TaskStatus, WorkLog};

/// Status dimension of a query. `All` disables filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TaskStatus),
}

/// Repository dimension of a query. `All` disables filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RepoFilter {
    #[default]
    All,
    Only(String),
}

/// Which timestamp orders the view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    CreatedAt,
    UpdatedAt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Search text, filters, and sort for the log view.
///
/// Defaults to no search, no filters, newest created first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub search: String,
    pub status: StatusFilter,
    pub repository: RepoFilter,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
}

impl Query {
    /// Whether `log` passes the search, status, and repository stages.
    pub fn matches(&self, log: &WorkLog) -> bool {
        self.matches_search(log) && self.matches_status(log) && self.matches_repository(log)
    }

    /// Filters and sorts `logs` without touching them.
    ///
    /// The sort is stable: entries with equal keys keep their collection order.
    pub fn apply<'a>(&self, logs: &'a [WorkLog]) -> Vec<&'a WorkLog> {
        let mut view: Vec<&WorkLog> = logs.iter().filter(|log| self.matches(log)).collect();
        view.sort_by(|a, b| {
            self.sort_order
                .compare(self.sort_value(a), self.sort_value(b))
        });
        view
    }

    // Blank queries match everything; otherwise the untrimmed query is matched.
    fn matches_search(&self, log: &WorkLog) -> bool {
        if self.search.trim().is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);

        contains(&log.requirement)
            || contains(&log.ticket_id)
            || log.note.as_deref().is_some_and(contains)
            || log
                .repo_branches
                .iter()
                .any(|rb| contains(&rb.repository) || contains(&rb.branch))
    }

    fn matches_status(&self, log: &WorkLog) -> bool {
        match self.status {
            StatusFilter::All => true,
            StatusFilter::Only(status) => log.status == status,
        }
    }

    fn matches_repository(&self, log: &WorkLog) -> bool {
        match &self.repository {
            RepoFilter::All => true,
            RepoFilter::Only(name) => log.references_repository(name),
        }
    }

    fn sort_value(&self, log: &WorkLog) -> i64 {
        match self.sort_key {
            SortKey::CreatedAt => log.created_at,
            SortKey::UpdatedAt => log.updated_at,
        }
    }
}

impl SortOrder {
    /// Orders two timestamps in this direction.
    pub fn compare(self, a: i64, b: i64) -> Ordering {
        match self {
            Self::Asc => a.cmp(&b),
            Self::Desc => b.cmp(&a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::RepoBranch;

    fn log(id: &str, requirement: &str, status: TaskStatus, created_at: i64) -> WorkLog {
        WorkLog {
            id: id.into(),
            requirement: requirement.into(),
            note: None,
            repo_branches: vec![],
            ticket_id: String::new(),
            status,
            created_at,
            updated_at: created_at,
        }
    }

    fn ids(view: &[&WorkLog]) -> Vec<String> {
        view.iter().map(|l| l.id.clone()).collect()
    }

    fn sample() -> Vec<WorkLog> {
        let mut b = log("b", "write docs", TaskStatus::Released, 2_000);
        b.repo_branches = vec![RepoBranch::new("frontend-repo", "main")];
        let mut c = log("c", "Refactor Parser", TaskStatus::Testing, 3_000);
        c.note = Some("touches the BUG tracker export".into());
        c.ticket_id = "YX-77".into();
        c.updated_at = 9_000;
        let a = log("a", "fix bug", TaskStatus::Development, 1_000);
        vec![c, b, a]
    }

    #[test]
    fn default_query_returns_everything_newest_first() {
        let logs = sample();
        let view = Query::default().apply(&logs);

        assert_eq!(ids(&view), ["c", "b", "a"]);
    }

    #[test]
    fn ascending_created_order() {
        let logs = sample();
        let query = Query {
            sort_order: SortOrder::Asc,
            ..Query::default()
        };

        assert_eq!(ids(&query.apply(&logs)), ["a", "b", "c"]);
    }

    #[test]
    fn sort_by_updated_at() {
        let mut logs = sample();
        logs[2].updated_at = 10_000;
        let query = Query {
            sort_key: SortKey::UpdatedAt,
            ..Query::default()
        };

        assert_eq!(ids(&query.apply(&logs)), ["a", "c", "b"]);
    }

    #[test]
    fn search_is_case_insensitive_and_spans_note() {
        let logs = sample();
        let query = Query {
            search: "bug".into(),
            ..Query::default()
        };

        // "c" matches only through its note.
        assert_eq!(ids(&query.apply(&logs)), ["c", "a"]);
    }

    #[test]
    fn search_spans_ticket_repository_and_branch() {
        let logs = sample();
        let by_ticket = Query {
            search: "yx-77".into(),
            ..Query::default()
        };
        let by_repo = Query {
            search: "FRONTEND".into(),
            ..Query::default()
        };
        let by_branch = Query {
            search: "mai".into(),
            ..Query::default()
        };

        assert_eq!(ids(&by_ticket.apply(&logs)), ["c"]);
        assert_eq!(ids(&by_repo.apply(&logs)), ["b"]);
        assert_eq!(ids(&by_branch.apply(&logs)), ["b"]);
    }

    #[test]
    fn blank_search_matches_all() {
        let logs = sample();
        let query = Query {
            search: "   ".into(),
            ..Query::default()
        };

        assert_eq!(query.apply(&logs).len(), 3);
    }

    #[test]
    fn status_filter_is_exact() {
        let logs = sample();
        let query = Query {
            status: StatusFilter::Only(TaskStatus::Released),
            ..Query::default()
        };

        assert_eq!(ids(&query.apply(&logs)), ["b"]);
    }

    #[test]
    fn repository_filter_requires_exact_name() {
        let logs = sample();
        let exact = Query {
            repository: RepoFilter::Only("frontend-repo".into()),
            ..Query::default()
        };
        let partial = Query {
            repository: RepoFilter::Only("frontend".into()),
            ..Query::default()
        };

        assert_eq!(ids(&exact.apply(&logs)), ["b"]);
        assert!(partial.apply(&logs).is_empty());
    }

    #[test]
    fn stages_combine_with_and() {
        let logs = sample();
        let query = Query {
            search: "bug".into(),
            status: StatusFilter::Only(TaskStatus::Development),
            ..Query::default()
        };

        assert_eq!(ids(&query.apply(&logs)), ["a"]);
    }

    #[test]
    fn equal_keys_keep_collection_order() {
        let logs = vec![
            log("x", "one", TaskStatus::Testing, 1_000),
            log("y", "two", TaskStatus::Testing, 1_000),
            log("z", "three", TaskStatus::Testing, 1_000),
        ];

        let desc = Query::default();
        let asc = Query {
            sort_order: SortOrder::Asc,
            ..Query::default()
        };

        assert_eq!(ids(&desc.apply(&logs)), ["x", "y", "z"]);
        assert_eq!(ids(&asc.apply(&logs)), ["x", "y", "z"]);
    }

    #[test]
    fn apply_does_not_reorder_source() {
        let logs = sample();
        let before = logs.clone();
        let query = Query {
            sort_order: SortOrder::Asc,
            ..Query::default()
        };

        let first = ids(&query.apply(&logs));
        let second = ids(&query.apply(&logs));

        assert_eq!(first, second);
        assert_eq!(logs, before);
    }
}
