//! Wakeful - keep-alive scaffolding and data-access toolkit
//!
//! Wakeful provisions a periodic keep-alive mechanism into a hosted-database
//! web project: an HTTP route, a helper module, a configuration module, a SQL
//! script and a deployment cron descriptor. It can later remove everything it
//! added, and ships a thin typed data-access layer over the database's REST
//! interface.

pub mod config;
pub mod decommission;
pub mod error;
pub mod manifest;
pub mod package;
pub mod provision;
pub mod store;

// Re-exports for convenience
pub use config::{Config, EnvFileStatus};
pub use decommission::{decommission, RemovalOutcome, RemovalReport};
pub use error::{SetupError, SetupResult};
pub use manifest::{ManifestEntry, CLIENT_LIBRARY, CLIENT_MODULE_DEST, MANIFEST, WATCHED_DIRS};
pub use provision::{ensure_client_module, provision, ProvisionOutcome, ProvisionReport};
pub use store::{NewPage, Page, PageStatus, StoreClient, StoreError};
