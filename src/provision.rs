//! Provisioning - apply the manifest onto a target project tree
//!
//! Entries are processed one at a time in manifest order. An existing
//! destination is never overwritten, even when its contents differ from the
//! template. A failure on one entry is recorded and processing continues;
//! the overall result is the ordered list of per-entry outcomes.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::manifest::{
    ManifestEntry, CLIENT_MODULE_ALT_PATHS, CLIENT_MODULE_DEST, DB_CLIENT_MODULE, MANIFEST,
};

/// Outcome of provisioning a single manifest entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// Destination was absent and has been written
    Created,
    /// Destination already existed and was left untouched
    SkippedExisting,
    /// Entry could not be written; the rest of the batch still ran
    Failed(String),
}

impl std::fmt::Display for ProvisionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProvisionOutcome::Created => write!(f, "created"),
            ProvisionOutcome::SkippedExisting => write!(f, "skipped (exists)"),
            ProvisionOutcome::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// Per-entry result of a provisioning run
#[derive(Debug, Clone)]
pub struct ProvisionedFile {
    /// Manifest entry name
    pub name: &'static str,
    /// Destination relative to the project root
    pub dest: &'static str,
    /// What happened to this entry
    pub outcome: ProvisionOutcome,
}

/// Result of a provisioning run, in manifest order
#[derive(Debug, Clone, Default)]
pub struct ProvisionReport {
    pub files: Vec<ProvisionedFile>,
}

impl ProvisionReport {
    pub fn created(&self) -> impl Iterator<Item = &ProvisionedFile> {
        self.files
            .iter()
            .filter(|f| f.outcome == ProvisionOutcome::Created)
    }

    pub fn skipped(&self) -> impl Iterator<Item = &ProvisionedFile> {
        self.files
            .iter()
            .filter(|f| f.outcome == ProvisionOutcome::SkippedExisting)
    }

    pub fn failed(&self) -> impl Iterator<Item = &ProvisionedFile> {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, ProvisionOutcome::Failed(_)))
    }

    /// No entry failed (skips are fine)
    pub fn is_clean(&self) -> bool {
        self.failed().next().is_none()
    }
}

/// Outcome of the conditional database client module check
#[derive(Debug, Clone)]
pub struct ClientModuleReport {
    /// What happened at the canonical path
    pub outcome: ProvisionOutcome,
    /// Client modules found at known non-canonical locations
    pub alternates: Vec<PathBuf>,
}

/// Apply the fixed manifest onto `root`, one entry at a time
pub fn provision(root: &Path) -> ProvisionReport {
    let mut report = ProvisionReport::default();
    for entry in MANIFEST {
        report.files.push(ProvisionedFile {
            name: entry.name,
            dest: entry.dest,
            outcome: provision_entry(root, entry),
        });
    }
    report
}

/// Create the database client module at its canonical path when absent.
///
/// A client found at a known alternate path is reported so the caller can
/// warn, but the canonical copy is still created. Removing or merging an
/// alternate client is left to the user.
pub fn ensure_client_module(root: &Path) -> ClientModuleReport {
    let alternates = CLIENT_MODULE_ALT_PATHS
        .iter()
        .map(PathBuf::from)
        .filter(|rel| root.join(rel).exists())
        .collect();

    let dest = root.join(CLIENT_MODULE_DEST);
    let outcome = if dest.exists() {
        ProvisionOutcome::SkippedExisting
    } else {
        match write_new_file(&dest, DB_CLIENT_MODULE) {
            Ok(()) => ProvisionOutcome::Created,
            Err(e) => ProvisionOutcome::Failed(e.to_string()),
        }
    };

    ClientModuleReport { outcome, alternates }
}

fn provision_entry(root: &Path, entry: &ManifestEntry) -> ProvisionOutcome {
    let dest = root.join(entry.dest);
    if dest.exists() {
        return ProvisionOutcome::SkippedExisting;
    }
    match write_new_file(&dest, entry.template) {
        Ok(()) => ProvisionOutcome::Created,
        Err(e) => ProvisionOutcome::Failed(e.to_string()),
    }
}

/// Write content to a fresh file, creating parent directories first.
///
/// Uses the tempfile + rename pattern so a crash mid-write never leaves a
/// truncated destination behind.
fn write_new_file(dest: &Path, content: &str) -> std::io::Result<()> {
    let parent = dest.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(content.as_bytes())?;
    tmp.persist(dest).map_err(|e| e.error)?;
    Ok(())
}
