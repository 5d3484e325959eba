//! Configuration module for Wakeful
//!
//! Two environment variables supply the connection settings for the hosted
//! database: the project URL and the service API key. Both are read once at
//! startup. A missing value is a warning for the provisioning flow, never a
//! failure; only the data-access layer requires both.

use std::path::Path;

/// Environment variable holding the project URL
pub const ENV_PROJECT_URL: &str = "SUPABASE_URL";

/// Environment variable holding the service API key
pub const ENV_SERVICE_KEY: &str = "SUPABASE_SERVICE_ROLE_KEY";

/// Name of the env file consumer projects conventionally keep settings in
pub const ENV_FILE_NAME: &str = ".env.local";

/// Connection settings for the hosted database
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Project URL (e.g. `https://abc.supabase.co`)
    pub project_url: Option<String>,
    /// Service API key used for REST calls
    pub service_key: Option<String>,
}

/// Result of inspecting the consumer project's env file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvFileStatus {
    /// No env file present in the project
    Missing,
    /// Env file present; flags report which variable names it declares
    Found {
        declares_url: bool,
        declares_key: bool,
    },
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(ENV_PROJECT_URL).ok(),
            std::env::var(ENV_SERVICE_KEY).ok(),
        )
    }

    /// Build configuration from explicit values (empty strings count as unset)
    pub fn from_vars(project_url: Option<String>, service_key: Option<String>) -> Self {
        Self {
            project_url: project_url.filter(|v| !v.trim().is_empty()),
            service_key: service_key.filter(|v| !v.trim().is_empty()),
        }
    }

    /// Both values are present
    pub fn is_complete(&self) -> bool {
        self.project_url.is_some() && self.service_key.is_some()
    }

    /// Names of the environment variables that are missing
    pub fn missing(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.project_url.is_none() {
            names.push(ENV_PROJECT_URL);
        }
        if self.service_key.is_none() {
            names.push(ENV_SERVICE_KEY);
        }
        names
    }

    /// Check whether the project's env file declares the two variable names.
    ///
    /// This is a plain string inspection; values are never read or validated.
    pub fn env_file_status(root: &Path) -> EnvFileStatus {
        let path = root.join(ENV_FILE_NAME);
        match std::fs::read_to_string(&path) {
            Ok(content) => EnvFileStatus::Found {
                declares_url: declares_var(&content, ENV_PROJECT_URL),
                declares_key: declares_var(&content, ENV_SERVICE_KEY),
            },
            Err(_) => EnvFileStatus::Missing,
        }
    }
}

/// A variable is declared when a non-comment line starts with `NAME=`
fn declares_var(content: &str, name: &str) -> bool {
    content.lines().any(|line| {
        let line = line.trim_start();
        !line.starts_with('#') && line.starts_with(name) && line[name.len()..].trim_start().starts_with('=')
    })
}
