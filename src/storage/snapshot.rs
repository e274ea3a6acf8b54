//! Snapshot codec: the persisted subset of store state.

use serde::{Deserialize, Serialize};

use crate::model::WorkLog;

use super::{KeyValueStore, Result};

/// Key under which the snapshot is stored.
pub const SNAPSHOT_KEY: &str = "work-log-storage";

/// Key holding the last snapshot that failed to load.
pub const BACKUP_KEY: &str = "work-log-storage-backup";

const DEFAULT_REPOSITORIES: [&str; 3] = ["frontend-repo", "backend-repo", "mobile-app"];
const DEFAULT_TITLE: &str = "Work Log Pro";

/// Everything that survives a restart: logs, the repository registry, and the title.
///
/// Fields missing from stored data fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub logs: Vec<WorkLog>,
    pub repositories: Vec<String>,
    pub app_title: String,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            logs: Vec::new(),
            repositories: DEFAULT_REPOSITORIES.map(String::from).to_vec(),
            app_title: DEFAULT_TITLE.to_string(),
        }
    }
}

/// Reads the snapshot, or `None` if none has been saved.
pub fn load_snapshot(kv: &dyn KeyValueStore) -> Result<Option<Snapshot>> {
    let Some(json) = kv.get(SNAPSHOT_KEY)? else {
        return Ok(None);
    };
    Ok(Some(serde_json::from_str(&json)?))
}

/// Overwrites the stored snapshot with `snapshot`.
pub fn save_snapshot(kv: &mut dyn KeyValueStore, snapshot: &Snapshot) -> Result<()> {
    let json = serde_json::to_string(snapshot)?;
    kv.set(SNAPSHOT_KEY, &json)
}

/// Copies the raw stored snapshot to [`BACKUP_KEY`].
///
/// Returns `false` if there was nothing to copy.
pub fn back_up_snapshot(kv: &mut dyn KeyValueStore) -> Result<bool> {
    let Some(raw) = kv.get(SNAPSHOT_KEY)? else {
        return Ok(false);
    };
    kv.set(BACKUP_KEY, &raw)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::{RepoBranch, TaskStatus};
    use crate::storage::MemoryStore;

    fn sample_snapshot() -> Snapshot {
        Snapshot {
            logs: vec![WorkLog {
                id: "log-1".into(),
                requirement: "write docs".into(),
                note: Some("include the import format".into()),
                repo_branches: vec![RepoBranch::new("frontend-repo", "main")],
                ticket_id: "YX-1".into(),
                status: TaskStatus::Released,
                created_at: 2_000,
                updated_at: 2_500,
            }],
            repositories: vec!["frontend-repo".into()],
            app_title: "Team Log".into(),
        }
    }

    #[test]
    fn load_returns_none_when_empty() {
        let kv = MemoryStore::default();
        assert!(load_snapshot(&kv).unwrap().is_none());
    }

    #[test]
    fn save_then_load_is_deep_equal() {
        let mut kv = MemoryStore::default();
        let snapshot = sample_snapshot();

        save_snapshot(&mut kv, &snapshot).unwrap();
        let loaded = load_snapshot(&kv).unwrap().unwrap();

        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn stored_json_uses_camel_case_field_names() {
        let mut kv = MemoryStore::default();
        save_snapshot(&mut kv, &sample_snapshot()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&kv.get(SNAPSHOT_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(raw["appTitle"], "Team Log");
        assert_eq!(raw["logs"][0]["yunxiaoId"], "YX-1");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let mut kv = MemoryStore::default();
        kv.set(SNAPSHOT_KEY, r#"{"logs": []}"#).unwrap();

        let loaded = load_snapshot(&kv).unwrap().unwrap();
        assert_eq!(loaded.app_title, DEFAULT_TITLE);
        assert_eq!(loaded.repositories.len(), 3);
    }

    #[test]
    fn corrupt_json_is_an_error() {
        let mut kv = MemoryStore::default();
        kv.set(SNAPSHOT_KEY, "{not json").unwrap();

        assert!(load_snapshot(&kv).is_err());
    }

    #[test]
    fn backup_copies_raw_blob() {
        let mut kv = MemoryStore::default();
        assert!(!back_up_snapshot(&mut kv).unwrap());

        kv.set(SNAPSHOT_KEY, "{not json").unwrap();
        assert!(back_up_snapshot(&mut kv).unwrap());

        assert_eq!(kv.get(BACKUP_KEY).unwrap().as_deref(), Some("{not json"));
        assert_eq!(kv.get(SNAPSHOT_KEY).unwrap().as_deref(), Some("{not json"));
    }
}
