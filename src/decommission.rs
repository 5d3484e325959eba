//! Decommissioning - remove the manifest from a target project tree
//!
//! The removal half mirrors provisioning: every manifest destination is
//! deleted when present, absence is an outcome rather than an error, and a
//! failure on one entry never aborts the batch. Afterwards, watched
//! directories that ended up empty are pruned. A directory holding anything
//! else is left alone; user content is never deleted. The database client
//! module is deliberately outside the removal manifest.

use std::path::{Path, PathBuf};

use crate::manifest::{MANIFEST, WATCHED_DIRS};

/// Outcome of removing a single manifest entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// Destination existed and has been deleted
    Deleted,
    /// Destination was already absent
    NotFound,
    /// Entry could not be deleted; the rest of the batch still ran
    Failed(String),
}

impl std::fmt::Display for RemovalOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemovalOutcome::Deleted => write!(f, "deleted"),
            RemovalOutcome::NotFound => write!(f, "not found"),
            RemovalOutcome::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// Per-entry result of a removal run
#[derive(Debug, Clone)]
pub struct RemovedFile {
    /// Manifest entry name
    pub name: &'static str,
    /// Destination relative to the project root
    pub dest: &'static str,
    /// What happened to this entry
    pub outcome: RemovalOutcome,
}

/// Result of a removal run: per-file outcomes in manifest order, then the
/// watched directories that were pruned because they ended up empty
#[derive(Debug, Clone, Default)]
pub struct RemovalReport {
    pub files: Vec<RemovedFile>,
    pub pruned_dirs: Vec<PathBuf>,
    /// Prune failures; per-file failures live in `files`
    pub errors: Vec<String>,
}

impl RemovalReport {
    pub fn deleted(&self) -> impl Iterator<Item = &RemovedFile> {
        self.files
            .iter()
            .filter(|f| f.outcome == RemovalOutcome::Deleted)
    }

    pub fn missing(&self) -> impl Iterator<Item = &RemovedFile> {
        self.files
            .iter()
            .filter(|f| f.outcome == RemovalOutcome::NotFound)
    }

    pub fn failed(&self) -> impl Iterator<Item = &RemovedFile> {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, RemovalOutcome::Failed(_)))
    }

    pub fn is_clean(&self) -> bool {
        self.failed().next().is_none() && self.errors.is_empty()
    }
}

/// Manifest destinations currently present under `root`, in manifest order.
///
/// Used to preview what a removal run would delete before asking the user to
/// confirm.
pub fn present_files(root: &Path) -> Vec<&'static str> {
    MANIFEST
        .iter()
        .filter(|e| root.join(e.dest).exists())
        .map(|e| e.dest)
        .collect()
}

/// Remove the fixed manifest from `root`, then prune empty watched dirs
pub fn decommission(root: &Path) -> RemovalReport {
    let mut report = RemovalReport::default();

    for entry in MANIFEST {
        let dest = root.join(entry.dest);
        let outcome = if !dest.exists() {
            RemovalOutcome::NotFound
        } else {
            match std::fs::remove_file(&dest) {
                Ok(()) => RemovalOutcome::Deleted,
                Err(e) => RemovalOutcome::Failed(e.to_string()),
            }
        };
        report.files.push(RemovedFile {
            name: entry.name,
            dest: entry.dest,
            outcome,
        });
    }

    prune_watched_dirs(root, &mut report);
    report
}

/// Remove each watched directory that exists and is empty. Anything else,
/// including a directory holding unmanaged user files, stays.
fn prune_watched_dirs(root: &Path, report: &mut RemovalReport) {
    for dir in WATCHED_DIRS {
        let path = root.join(dir);
        if !path.is_dir() {
            continue;
        }
        match dir_is_empty(&path) {
            Ok(true) => match std::fs::remove_dir(&path) {
                Ok(()) => report.pruned_dirs.push(PathBuf::from(dir)),
                Err(e) => report.errors.push(format!("failed to prune {}: {}", dir, e)),
            },
            Ok(false) => {}
            Err(e) => report.errors.push(format!("failed to inspect {}: {}", dir, e)),
        }
    }
}

fn dir_is_empty(path: &Path) -> std::io::Result<bool> {
    Ok(std::fs::read_dir(path)?.next().is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{CLIENT_MODULE_DEST, MANIFEST};
    use crate::provision::{ensure_client_module, provision};
    use tempfile::tempdir;

    #[test]
    fn decommission_without_prior_setup_is_all_not_found() {
        let dir = tempdir().unwrap();

        let report = decommission(dir.path());

        assert_eq!(report.missing().count(), MANIFEST.len());
        assert_eq!(report.deleted().count(), 0);
        assert!(report.pruned_dirs.is_empty());
        assert!(report.is_clean());
    }

    #[test]
    fn setup_then_remove_restores_the_tree() {
        let dir = tempdir().unwrap();
        provision(dir.path());
        ensure_client_module(dir.path());

        let report = decommission(dir.path());

        assert_eq!(report.deleted().count(), MANIFEST.len());
        for entry in MANIFEST {
            assert!(!dir.path().join(entry.dest).exists(), "{} remains", entry.dest);
        }
        // The client module is not in the removal manifest.
        assert!(dir.path().join(CLIENT_MODULE_DEST).exists());
        // Emptied directories are pruned; utils keeps the client module.
        assert_eq!(
            report.pruned_dirs,
            vec![PathBuf::from("app/api/keep-alive"), PathBuf::from("config")]
        );
        assert!(dir.path().join("utils/db").is_dir());
    }

    #[test]
    fn non_empty_watched_dir_is_left_alone() {
        let dir = tempdir().unwrap();
        provision(dir.path());
        let extra = dir.path().join("config/custom.ts");
        std::fs::write(&extra, "export const custom = 1;\n").unwrap();

        let report = decommission(dir.path());

        assert!(extra.exists(), "unmanaged file must survive");
        assert!(dir.path().join("config").is_dir());
        assert!(!report.pruned_dirs.contains(&PathBuf::from("config")));
        assert!(report.is_clean());
    }

    #[test]
    fn present_files_previews_what_would_be_deleted() {
        let dir = tempdir().unwrap();
        assert!(present_files(dir.path()).is_empty());

        provision(dir.path());
        assert_eq!(present_files(dir.path()).len(), MANIFEST.len());

        std::fs::remove_file(dir.path().join("vercel.json")).unwrap();
        let present = present_files(dir.path());
        assert_eq!(present.len(), MANIFEST.len() - 1);
        assert!(!present.contains(&"vercel.json"));
    }

    #[test]
    fn removal_is_idempotent() {
        let dir = tempdir().unwrap();
        provision(dir.path());

        decommission(dir.path());
        let second = decommission(dir.path());

        assert_eq!(second.missing().count(), MANIFEST.len());
        assert!(second.pruned_dirs.is_empty());
        assert!(second.is_clean());
    }

    #[test]
    fn outcome_display_is_stable() {
        assert_eq!(RemovalOutcome::Deleted.to_string(), "deleted");
        assert_eq!(RemovalOutcome::NotFound.to_string(), "not found");
        assert_eq!(
            RemovalOutcome::Failed("busy".to_string()).to_string(),
            "failed: busy"
        );
    }
}
