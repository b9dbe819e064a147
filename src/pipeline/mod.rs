//! The search pipeline: catalog fetch, parse, and thumbnail enrichment.
//!
//! Every call to [`SearchPipeline::run`] issues a new [`Generation`] and
//! works in the background. Finished runs are delivered on the channel
//! returned by [`SearchPipeline::new`] as [`SearchDelivery`] values. A run
//! that finishes after a newer one was started is dropped instead of
//! delivered, so the consumer only ever sees the latest search.
//!
//! ```rust,ignore
//! let (pipeline, mut deliveries) = SearchPipeline::from_config(&config)?;
//! pipeline.run("android", MaxResults::DEFAULT)?;
//!
//! while let Some(delivery) = deliveries.recv().await {
//!     match delivery.outcome {
//!         Ok(result) => println!("{} books", result.books.len()),
//!         Err(e) => eprintln!("search failed: {e}"),
//!     }
//! }
//! ```

mod enrich;
mod search;

use std::fmt;

use bookscout_common::{Generation, Result};
use serde::Serialize;

use crate::catalog::CatalogResult;

pub use search::{PipelineOptions, RunHandle, RunReport, SearchPipeline};

/// Stage of a search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    /// No run has been started.
    Idle,
    /// Waiting for the catalog response.
    Fetching,
    /// Decoding the catalog response.
    Parsing,
    /// Downloading thumbnails.
    Enriching,
    /// Finished with a result.
    Done,
    /// Finished with a transport or parse error.
    Failed,
}

impl RunPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Fetching => write!(f, "fetching"),
            Self::Parsing => write!(f, "parsing"),
            Self::Enriching => write!(f, "enriching"),
            Self::Done => write!(f, "done"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Phase of the most recently started run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunStatus {
    pub generation: Generation,
    pub phase: RunPhase,
}

/// Terminal outcome of the latest run, as seen by the consumer.
///
/// `outcome` is either the assembled [`CatalogResult`] (whose `generation`
/// equals `generation`) or the [`Error::Transport`] / [`Error::Parse`] that
/// ended the run.
///
/// [`Error::Transport`]: bookscout_common::Error::Transport
/// [`Error::Parse`]: bookscout_common::Error::Parse
#[derive(Debug)]
pub struct SearchDelivery {
    pub generation: Generation,
    pub outcome: Result<CatalogResult>,
}
