//! Package metadata - dependency detection and installation
//!
//! The consumer project's `package.json` is inspected to see whether the
//! database client library is already declared. Installation shells out to
//! the package manager and is judged by exit status alone.

use std::path::Path;
use std::process::Command;

use crate::error::{SetupError, SetupResult};

const PACKAGE_MANIFEST: &str = "package.json";

/// Check whether `name` is declared in the project's dependencies or
/// devDependencies.
pub fn dependency_declared(root: &Path, name: &str) -> SetupResult<bool> {
    let path = root.join(PACKAGE_MANIFEST);
    if !path.exists() {
        return Err(SetupError::ManifestNotFound { path });
    }

    let content = std::fs::read_to_string(&path)?;
    let manifest: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| SetupError::InvalidManifest {
            path: path.clone(),
            message: e.to_string(),
        })?;

    let declared = ["dependencies", "devDependencies"]
        .iter()
        .any(|section| manifest[section].get(name).is_some());
    Ok(declared)
}

/// Install `name` into the project with `npm install`.
///
/// The package manager is a black box: a zero exit status is success,
/// anything else is a failure surfaced to the caller.
pub fn install_dependency(root: &Path, name: &str) -> SetupResult<()> {
    let status = Command::new("npm")
        .arg("install")
        .arg(name)
        .current_dir(root)
        .status()?;

    if status.success() {
        Ok(())
    } else {
        Err(SetupError::InstallFailed {
            command: format!("npm install {}", name),
            status: status.code().unwrap_or(-1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_manifest(dir: &Path, content: &str) {
        std::fs::write(dir.join(PACKAGE_MANIFEST), content).unwrap();
    }

    #[test]
    fn declared_in_dependencies() {
        let dir = tempdir().unwrap();
        write_manifest(
            dir.path(),
            r#"{"dependencies": {"@supabase/supabase-js": "^2.39.0"}}"#,
        );

        assert!(dependency_declared(dir.path(), "@supabase/supabase-js").unwrap());
    }

    #[test]
    fn declared_in_dev_dependencies() {
        let dir = tempdir().unwrap();
        write_manifest(
            dir.path(),
            r#"{"dependencies": {}, "devDependencies": {"@supabase/supabase-js": "2.x"}}"#,
        );

        assert!(dependency_declared(dir.path(), "@supabase/supabase-js").unwrap());
    }

    #[test]
    fn absent_dependency_reports_false() {
        let dir = tempdir().unwrap();
        write_manifest(dir.path(), r#"{"dependencies": {"next": "14.0.0"}}"#);

        assert!(!dependency_declared(dir.path(), "@supabase/supabase-js").unwrap());
    }

    #[test]
    fn missing_manifest_is_an_error() {
        let dir = tempdir().unwrap();

        let err = dependency_declared(dir.path(), "@supabase/supabase-js").unwrap_err();
        assert!(matches!(err, SetupError::ManifestNotFound { .. }));
    }

    #[test]
    fn malformed_manifest_is_an_error() {
        let dir = tempdir().unwrap();
        write_manifest(dir.path(), "{ not json");

        let err = dependency_declared(dir.path(), "@supabase/supabase-js").unwrap_err();
        assert!(matches!(err, SetupError::InvalidManifest { .. }));
    }
}
