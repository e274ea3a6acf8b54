//! Repository registry commands: add, rm, list.

use clap::Subcommand;

use crate::store::LogStore;

#[derive(Debug, Subcommand)]
pub enum RepoCommand {
    /// Add a repository name to the list.
    Add {
        /// Repository name.
        name: String,
    },

    /// Remove a repository name from the list.
    ///
    /// Logs that reference it keep their entries.
    Rm {
        /// Repository name.
        name: String,
    },

    /// List known repositories.
    List,
}

pub(super) fn cmd_add(store: &mut LogStore, name: &str) -> Result<(), String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("repository name must not be empty".to_string());
    }

    let added = store
        .add_repository(name)
        .map_err(|e| format!("failed to save repositories: {e}"))?;

    if added {
        eprintln!("Added repository {name}");
    } else {
        eprintln!("Repository {name} is already listed");
    }
    Ok(())
}

pub(super) fn cmd_rm(store: &mut LogStore, name: &str) -> Result<(), String> {
    let name = name.trim();
    let removed = store
        .delete_repository(name)
        .map_err(|e| format!("failed to save repositories: {e}"))?;

    if !removed {
        return Err(format!("no repository named '{name}'"));
    }

    eprintln!("Removed repository {name}");
    let referencing = store
        .logs()
        .iter()
        .filter(|log| log.references_repository(name))
        .count();
    if referencing > 0 {
        eprintln!("{referencing} log(s) still reference it");
    }
    Ok(())
}

pub(super) fn cmd_list(store: &LogStore) -> Result<(), String> {
    if store.repositories().is_empty() {
        println!("No repositories");
        return Ok(());
    }

    for name in store.repositories() {
        println!("{name}");
    }
    Ok(())
}
