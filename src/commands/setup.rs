//! Setup command handler
//!
//! Provisions the keep-alive files, creates the database client module when
//! absent, and checks the client library dependency. Per-file problems are
//! reported and never abort the run; the process still exits 0 so that a
//! partially provisioned tree can be inspected and retried.

use std::path::Path;

use anyhow::Result;

use wakeful::config::{Config, EnvFileStatus, ENV_FILE_NAME};
use wakeful::manifest::{CLIENT_LIBRARY, CLIENT_MODULE_DEST, MANIFEST};
use wakeful::package;
use wakeful::provision::{ensure_client_module, provision, ProvisionOutcome};

use crate::commands::emit;

/// Execute the setup command
pub fn cmd_setup(
    project: &Path,
    dry_run: bool,
    skip_install: bool,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let config = Config::from_env();

    if json {
        let _ = emit(serde_json::json!({
            "event": "setup_start",
            "project": project.display().to_string(),
            "dry_run": dry_run,
        }));
    } else {
        println!("📦 Wakeful Setup");
        println!("Project: {}", project.display());
        if dry_run {
            println!("Mode: Dry run");
        }
        println!();
    }

    report_env(&config, project, json, verbose);

    if dry_run {
        preview(project, json);
        return Ok(());
    }

    // Provision the manifest
    let report = provision(project);

    if json {
        for file in &report.files {
            let event = match &file.outcome {
                ProvisionOutcome::Created => serde_json::json!({
                    "event": "file_created", "path": file.dest
                }),
                ProvisionOutcome::SkippedExisting => serde_json::json!({
                    "event": "file_skipped", "path": file.dest
                }),
                ProvisionOutcome::Failed(reason) => serde_json::json!({
                    "event": "file_failed", "path": file.dest, "reason": reason
                }),
            };
            let _ = emit(event);
        }
    }

    // Database client module: created only when absent, never removed later
    let client = ensure_client_module(project);
    for alt in &client.alternates {
        if json {
            let _ = emit(serde_json::json!({
                "event": "client_module_alternate",
                "path": alt.display().to_string(),
            }));
        } else {
            println!(
                "⚠ A database client already exists at {} - creating the canonical one at {} anyway; consolidating them is up to you",
                alt.display(),
                CLIENT_MODULE_DEST
            );
        }
    }
    if json {
        let _ = emit(serde_json::json!({
            "event": "client_module",
            "path": CLIENT_MODULE_DEST,
            "outcome": client.outcome.to_string(),
        }));
    }

    // Client library dependency
    let dependency = check_dependency(project, skip_install, json);

    if json {
        let _ = emit(serde_json::json!({
            "event": "setup_complete",
            "status": if report.is_clean() { "success" } else { "partial" },
            "created": report.created().count(),
            "skipped": report.skipped().count(),
            "errors": report.failed().count(),
        }));
    } else {
        println!();
        println!("📊 Setup Results:");
        let created: Vec<_> = report.created().collect();
        if !created.is_empty() {
            println!("  ✓ Created: {} files", created.len());
            for file in created {
                println!("    - {}", file.dest);
            }
        }
        let skipped: Vec<_> = report.skipped().collect();
        if !skipped.is_empty() {
            println!("  ⚠ Skipped: {} files (already present, left untouched)", skipped.len());
            for file in skipped {
                println!("    - {}", file.dest);
            }
        }
        let failed: Vec<_> = report.failed().collect();
        if !failed.is_empty() {
            println!("  ✗ Errors: {}", failed.len());
            for file in failed {
                println!("    - {}: {}", file.dest, file.outcome);
            }
        }
        println!("  Client module: {} ({})", CLIENT_MODULE_DEST, client.outcome);
        if let Some(note) = dependency {
            println!("  Dependency: {}", note);
        }
        println!();
        match report.failed().count() {
            0 => println!("🟢 Setup complete. Run the SQL script against your database, then deploy."),
            n => println!("🟡 Setup finished with {} error(s). Fix them and run setup again.", n),
        }
    }

    Ok(())
}

/// Warn about missing configuration; never fail the provisioning flow.
fn report_env(config: &Config, project: &Path, json: bool, verbose: u8) {
    for name in config.missing() {
        if json {
            let _ = emit(serde_json::json!({"event": "env_warning", "name": name}));
        } else {
            println!("⚠ {} is not set - the keep-alive route needs it at runtime", name);
        }
    }

    if verbose > 0 && !json {
        match Config::env_file_status(project) {
            EnvFileStatus::Missing => {
                println!("  ↳ no {} found in the project", ENV_FILE_NAME);
            }
            EnvFileStatus::Found {
                declares_url,
                declares_key,
            } => {
                println!(
                    "  ↳ {} declares url: {}, key: {}",
                    ENV_FILE_NAME, declares_url, declares_key
                );
            }
        }
    }
}

/// Dry run: report what a real run would do, without touching the tree.
fn preview(project: &Path, json: bool) {
    let mut would_create = 0usize;
    for entry in MANIFEST {
        let exists = project.join(entry.dest).exists();
        if json {
            let _ = emit(serde_json::json!({
                "event": "preview",
                "path": entry.dest,
                "action": if exists { "skip" } else { "create" },
            }));
        } else {
            let icon = if exists { "⚠ would skip " } else { "+ would create" };
            println!("  {} {}", icon, entry.dest);
        }
        if !exists {
            would_create += 1;
        }
    }

    let client_exists = project.join(CLIENT_MODULE_DEST).exists();
    if json {
        let _ = emit(serde_json::json!({
            "event": "preview",
            "path": CLIENT_MODULE_DEST,
            "action": if client_exists { "skip" } else { "create" },
        }));
        let _ = emit(serde_json::json!({
            "event": "setup_complete",
            "status": "dry_run",
            "would_create": would_create + usize::from(!client_exists),
        }));
    } else {
        let icon = if client_exists { "⚠ would skip " } else { "+ would create" };
        println!("  {} {}", icon, CLIENT_MODULE_DEST);
        println!();
        println!("Dry run - nothing was written.");
    }
}

/// Returns a human-readable note about the dependency step, or None in
/// JSON mode where events were already emitted.
fn check_dependency(project: &Path, skip_install: bool, json: bool) -> Option<String> {
    let note = match package::dependency_declared(project, CLIENT_LIBRARY) {
        Ok(true) => format!("{} already declared", CLIENT_LIBRARY),
        Ok(false) if skip_install => format!("{} missing (install skipped)", CLIENT_LIBRARY),
        Ok(false) => match package::install_dependency(project, CLIENT_LIBRARY) {
            Ok(()) => format!("{} installed", CLIENT_LIBRARY),
            Err(e) => format!("{} install failed: {}", CLIENT_LIBRARY, e),
        },
        Err(e) => format!("check skipped: {}", e),
    };

    if json {
        let _ = emit(serde_json::json!({
            "event": "dependency",
            "name": CLIENT_LIBRARY,
            "note": note,
        }));
        None
    } else {
        Some(note)
    }
}
