//! Remove command handler
//!
//! Deletes the files setup added and prunes watched directories that ended
//! up empty. Destructive, so it previews and asks for confirmation unless
//! --yes is given; in a non-interactive session --yes is required. The
//! database client module is never touched.

use std::path::Path;

use anyhow::Result;
use is_terminal::IsTerminal;

use wakeful::decommission::{decommission, present_files, RemovalOutcome};
use wakeful::manifest::CLIENT_MODULE_DEST;

use crate::commands::emit;

/// Execute the remove command
pub fn cmd_remove(project: &Path, dry_run: bool, yes: bool, json: bool, verbose: u8) -> Result<()> {
    if json {
        let _ = emit(serde_json::json!({
            "event": "remove_start",
            "project": project.display().to_string(),
            "dry_run": dry_run,
        }));
    } else {
        println!("🧹 Wakeful Remove");
        println!("Project: {}", project.display());
        if dry_run {
            println!("Mode: Dry run");
        }
        println!();
    }

    let present = present_files(project);

    if dry_run {
        if json {
            for dest in &present {
                let _ = emit(serde_json::json!({"event": "preview", "path": dest, "action": "delete"}));
            }
            let _ = emit(serde_json::json!({
                "event": "remove_complete",
                "status": "dry_run",
                "would_delete": present.len(),
            }));
        } else {
            if present.is_empty() {
                println!("Nothing to remove.");
            } else {
                for dest in &present {
                    println!("  - would delete {}", dest);
                }
                println!();
                println!("Dry run - nothing was deleted.");
            }
        }
        return Ok(());
    }

    // Confirm before deleting, unless told not to ask
    if !present.is_empty() && !yes && !json {
        if !std::io::stdin().is_terminal() {
            eprintln!("Refusing to remove without --yes in a non-interactive session.");
            return Ok(());
        }

        for dest in &present {
            println!("  - {}", dest);
        }
        println!();

        use dialoguer::Confirm;
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {} files?", present.len()))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    } else if !present.is_empty() && !yes && json {
        let _ = emit(serde_json::json!({
            "event": "error",
            "kind": "confirmation_required",
            "message": "pass --yes to remove in JSON mode",
        }));
        return Ok(());
    }

    let report = decommission(project);

    if json {
        for file in &report.files {
            let event = match &file.outcome {
                RemovalOutcome::Deleted => serde_json::json!({
                    "event": "file_deleted", "path": file.dest
                }),
                RemovalOutcome::NotFound => serde_json::json!({
                    "event": "file_missing", "path": file.dest
                }),
                RemovalOutcome::Failed(reason) => serde_json::json!({
                    "event": "file_failed", "path": file.dest, "reason": reason
                }),
            };
            let _ = emit(event);
        }
        for dir in &report.pruned_dirs {
            let _ = emit(serde_json::json!({
                "event": "dir_pruned",
                "path": dir.display().to_string(),
            }));
        }
        let _ = emit(serde_json::json!({
            "event": "remove_complete",
            "status": if report.is_clean() { "success" } else { "partial" },
            "deleted": report.deleted().count(),
            "missing": report.missing().count(),
            "errors": report.failed().count() + report.errors.len(),
        }));
    } else {
        println!("📊 Remove Results:");
        let deleted: Vec<_> = report.deleted().collect();
        if !deleted.is_empty() {
            println!("  ✓ Deleted: {} files", deleted.len());
            for file in deleted {
                println!("    - {}", file.dest);
            }
        }
        let missing: Vec<_> = report.missing().collect();
        if !missing.is_empty() {
            println!("  ⚠ Not found: {} files", missing.len());
            for file in missing {
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
        for err in &report.errors {
            println!("  ✗ {}", err);
        }
        if !report.pruned_dirs.is_empty() {
            println!("  ✓ Pruned empty directories:");
            for dir in &report.pruned_dirs {
                println!("    - {}", dir.display());
            }
        }
        if verbose > 0 {
            println!("  ↳ {} is left in place; remove it manually if nothing else imports it", CLIENT_MODULE_DEST);
        }
        println!();
        if report.is_clean() {
            println!("🟢 Remove complete.");
        } else {
            println!("🟡 Remove finished with errors; see above.");
        }
    }

    Ok(())
}
