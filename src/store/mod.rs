//! Thin data-access layer over the hosted database's REST interface
//!
//! Four pass-through operations on the `pages` collection: insert, list by
//! owner, fetch by slug, delete by id. The remote store owns uniqueness and
//! existence; this layer performs no validation, no retries and no caching,
//! and surfaces every remote error verbatim. One configured handle is built
//! at startup and passed explicitly to call sites.

mod record;

use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

use crate::config::{Config, ENV_PROJECT_URL, ENV_SERVICE_KEY};

pub use record::{NewPage, Page, PageStatus};

/// Collection the data-access layer operates on
const PAGES_TABLE: &str = "pages";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors surfaced by the data-access layer
#[derive(Error, Debug)]
pub enum StoreError {
    /// The remote store reported an error; status and body are passed
    /// through untouched
    #[error("remote store error ({status}): {message}")]
    Remote { status: u16, message: String },

    /// The request never reached the store
    #[error("transport error: {0}")]
    Transport(String),

    /// A slug lookup matched nothing
    #[error("no page found for slug '{slug}'")]
    NotFound { slug: String },

    /// The client was constructed without the required settings
    #[error("store is not configured: {0}")]
    Config(String),
}

/// One configured connection handle, shared by all data-access calls
#[derive(Debug)]
pub struct StoreClient {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
}

impl StoreClient {
    /// Build a client from configuration. Fails when either the project URL
    /// or the service key is missing; the scaffolding commands never need
    /// this, only callers of the data-access operations do.
    pub fn new(config: &Config) -> Result<Self, StoreError> {
        let base_url = config
            .project_url
            .as_deref()
            .ok_or_else(|| StoreError::Config(format!("{} is not set", ENV_PROJECT_URL)))?
            .trim_end_matches('/')
            .to_string();
        let api_key = config
            .service_key
            .clone()
            .ok_or_else(|| StoreError::Config(format!("{} is not set", ENV_SERVICE_KEY)))?;

        Ok(Self {
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
            base_url,
            api_key,
        })
    }

    /// Insert a page and return the stored record, including the generated
    /// id and creation timestamp.
    pub fn create_page(&self, new: &NewPage) -> Result<Page, StoreError> {
        let response = self
            .request("POST", &self.table_url())
            .set("Prefer", "return=representation")
            .send_json(new)
            .map_err(map_ureq_error)?;

        let status = response.status();
        let mut rows: Vec<Page> = response.into_json().map_err(map_body_error)?;
        rows.pop().ok_or_else(|| StoreError::Remote {
            status,
            message: "insert returned no representation".to_string(),
        })
    }

    /// All pages owned by `owner_id`, most recently created first
    pub fn list_pages(&self, owner_id: &str) -> Result<Vec<Page>, StoreError> {
        self.request("GET", &self.table_url())
            .query("select", "*")
            .query("owner_id", &eq(owner_id))
            .query("order", "created_at.desc")
            .call()
            .map_err(map_ureq_error)?
            .into_json()
            .map_err(map_body_error)
    }

    /// The page with the given unique slug
    pub fn get_page_by_slug(&self, slug: &str) -> Result<Page, StoreError> {
        let mut rows: Vec<Page> = self
            .request("GET", &self.table_url())
            .query("select", "*")
            .query("slug", &eq(slug))
            .query("limit", "1")
            .call()
            .map_err(map_ureq_error)?
            .into_json()
            .map_err(map_body_error)?;

        rows.pop().ok_or_else(|| StoreError::NotFound {
            slug: slug.to_string(),
        })
    }

    /// Delete the page with the given id. Deleting an id that does not
    /// exist is a no-op on the remote side and succeeds here too.
    pub fn delete_page(&self, id: Uuid) -> Result<(), StoreError> {
        self.request("DELETE", &self.table_url())
            .query("id", &eq(&id.to_string()))
            .call()
            .map_err(map_ureq_error)?;
        Ok(())
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, PAGES_TABLE)
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        self.agent
            .request(method, url)
            .set("apikey", &self.api_key)
            .set("Authorization", &format!("Bearer {}", self.api_key))
    }
}

/// PostgREST-style equality filter value
fn eq(value: &str) -> String {
    format!("eq.{}", value)
}

fn map_ureq_error(err: ureq::Error) -> StoreError {
    match err {
        ureq::Error::Status(status, response) => StoreError::Remote {
            status,
            message: response.into_string().unwrap_or_default(),
        },
        ureq::Error::Transport(transport) => StoreError::Transport(transport.to_string()),
    }
}

fn map_body_error(err: std::io::Error) -> StoreError {
    StoreError::Transport(err.to_string())
}
