use bookscout_common::MaxResults;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub images: ImagesConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Volumes search endpoint; `q` and `maxResults` are appended per search
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Deadline for establishing the TCP/TLS connection
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Deadline for receiving the response once connected
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/books/v1/volumes";

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_read_timeout() -> u64 {
    15
}
fn default_user_agent() -> String {
    format!("bookscout/{}", env!("CARGO_PKG_VERSION"))
}

impl CatalogConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            connect_timeout_secs: default_connect_timeout(),
            read_timeout_secs: default_read_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImagesConfig {
    /// Per-thumbnail request deadline
    #[serde(default = "default_image_timeout")]
    pub timeout_secs: u64,

    /// Upper bound on concurrent thumbnail downloads per search (unset = one per book)
    #[serde(default)]
    pub max_concurrent: Option<usize>,

    /// Rewrite `http://` thumbnail links to `https://`
    #[serde(default)]
    pub force_https: bool,
}

fn default_image_timeout() -> u64 {
    5
}

impl ImagesConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_image_timeout(),
            max_concurrent: None,
            force_https: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub default_max_results: MaxResults,

    /// Author line used for books the catalog lists without authors
    #[serde(default = "default_no_author")]
    pub no_author: String,
}

pub const DEFAULT_NO_AUTHOR: &str = "Unknown author";

fn default_no_author() -> String {
    DEFAULT_NO_AUTHOR.to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_max_results: MaxResults::default(),
            no_author: default_no_author(),
        }
    }
}
