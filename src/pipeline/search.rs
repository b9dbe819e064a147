use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use bookscout_common::{Error, Generation, MaxResults, Result};
use parking_lot::{Mutex, RwLock};
use reqwest::Url;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::enrich::enrich;
use super::{RunPhase, RunStatus, SearchDelivery};
use crate::catalog::{CatalogClient, CatalogParser, CatalogResult, CatalogSource, SearchRequest};
use crate::config::{self, Config, DEFAULT_NO_AUTHOR};
use crate::images::{ImageFetcher, ThumbnailSource};

/// Settings that shape every run of a [`SearchPipeline`].
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Volumes endpoint the search parameters are appended to.
    pub endpoint: Url,
    /// Maximum concurrent thumbnail downloads per run; `None` spawns one
    /// download per book at once.
    pub max_concurrent_images: Option<NonZeroUsize>,
    /// Author entry for books listed without authors.
    pub no_author: String,
}

impl PipelineOptions {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            max_concurrent_images: None,
            no_author: DEFAULT_NO_AUTHOR.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let endpoint =
            config::endpoint_url(&config.catalog).map_err(|e| Error::config(format!("{e:#}")))?;

        Ok(Self {
            endpoint,
            max_concurrent_images: config.images.max_concurrent.and_then(NonZeroUsize::new),
            no_author: config.search.no_author.clone(),
        })
    }
}

/// Runs searches and delivers only the newest run's outcome.
///
/// Cloning is cheap; clones share the generation counter and the delivery
/// channel.
#[derive(Clone)]
pub struct SearchPipeline {
    inner: Arc<Inner>,
}

struct Inner {
    catalog: Arc<dyn CatalogSource>,
    thumbnails: Arc<dyn ThumbnailSource>,
    parser: CatalogParser,
    endpoint: Url,
    image_limit: Option<NonZeroUsize>,
    /// Latest generation issued. Only written while `delivery` is locked.
    latest: AtomicU64,
    status: RwLock<RunStatus>,
    delivery: Mutex<mpsc::UnboundedSender<SearchDelivery>>,
}

impl SearchPipeline {
    /// Create a pipeline and the receiving end of its delivery channel.
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        thumbnails: Arc<dyn ThumbnailSource>,
        options: PipelineOptions,
    ) -> (Self, mpsc::UnboundedReceiver<SearchDelivery>) {
        let (tx, rx) = mpsc::unbounded_channel();

        let inner = Inner {
            catalog,
            thumbnails,
            parser: CatalogParser::new(options.no_author),
            endpoint: options.endpoint,
            image_limit: options.max_concurrent_images,
            latest: AtomicU64::new(Generation::ZERO.get()),
            status: RwLock::new(RunStatus {
                generation: Generation::ZERO,
                phase: RunPhase::Idle,
            }),
            delivery: Mutex::new(tx),
        };

        (
            Self {
                inner: Arc::new(inner),
            },
            rx,
        )
    }

    /// Create a pipeline backed by [`CatalogClient`] and [`ImageFetcher`].
    pub fn from_config(
        config: &Config,
    ) -> Result<(Self, mpsc::UnboundedReceiver<SearchDelivery>)> {
        let catalog = Arc::new(CatalogClient::new(&config.catalog)?);
        let thumbnails = Arc::new(ImageFetcher::new(&config.images)?);
        let options = PipelineOptions::from_config(config)?;

        Ok(Self::new(catalog, thumbnails, options))
    }

    /// Start a search for `query` and return immediately.
    ///
    /// The run executes on a spawned Tokio task, so this must be called from
    /// within a runtime. Any run still in progress is superseded: it keeps
    /// going, but its outcome will not be delivered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidQuery`] for a blank query. No generation is
    /// issued and earlier runs are not superseded in that case.
    pub fn run(&self, query: &str, max_results: MaxResults) -> Result<RunHandle> {
        let request = SearchRequest::new(query, max_results)?;
        let url = request.url(&self.inner.endpoint);
        let generation = self.inner.issue_generation();

        info!(
            generation = %generation,
            query = request.query(),
            max_results = %max_results,
            "Starting search"
        );

        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move { inner.execute(generation, url).await });

        Ok(RunHandle { generation, task })
    }

    /// The newest generation issued by [`run`](Self::run).
    pub fn latest_generation(&self) -> Generation {
        Generation::from(self.inner.latest.load(Ordering::SeqCst))
    }

    /// Phase of the newest run.
    pub fn status(&self) -> RunStatus {
        *self.inner.status.read()
    }
}

impl Inner {
    fn issue_generation(&self) -> Generation {
        let _delivery = self.delivery.lock();
        let generation = Generation::from(self.latest.load(Ordering::SeqCst)).next();
        self.latest.store(generation.get(), Ordering::SeqCst);
        self.enter(generation, RunPhase::Fetching);
        generation
    }

    fn is_latest(&self, generation: Generation) -> bool {
        self.latest.load(Ordering::SeqCst) == generation.get()
    }

    /// Record a phase change. Only the newest run is reflected in `status`.
    fn enter(&self, generation: Generation, phase: RunPhase) {
        debug!(generation = %generation, phase = %phase, "Search phase");

        let mut status = self.status.write();
        if generation >= status.generation {
            *status = RunStatus { generation, phase };
        }
    }

    async fn execute(self: Arc<Self>, generation: Generation, url: Url) -> RunReport {
        let outcome = self.search(generation, &url).await;

        let phase = match &outcome {
            Ok(result) => {
                info!(
                    generation = %generation,
                    total_items = result.total_items,
                    books = result.books.len(),
                    "Search finished"
                );
                RunPhase::Done
            }
            Err(e) => {
                warn!(generation = %generation, error = %e, "Search failed");
                RunPhase::Failed
            }
        };

        let delivered = self.deliver(generation, phase, outcome);
        RunReport {
            generation,
            phase,
            delivered,
        }
    }

    async fn search(&self, generation: Generation, url: &Url) -> Result<CatalogResult> {
        let body = self.catalog.fetch(url).await?;

        self.enter(generation, RunPhase::Parsing);
        let mut result = self.parser.parse(&body)?;
        result.generation = generation;

        if result.books.is_empty() {
            return Ok(result);
        }

        self.enter(generation, RunPhase::Enriching);
        enrich(&self.thumbnails, &mut result.books, self.image_limit).await;

        Ok(result)
    }

    /// Send a terminal outcome unless a newer run has been issued.
    ///
    /// Holding the delivery lock orders this check against
    /// [`issue_generation`](Self::issue_generation).
    fn deliver(&self, generation: Generation, phase: RunPhase, outcome: Result<CatalogResult>) -> bool {
        let sender = self.delivery.lock();

        if !self.is_latest(generation) {
            debug!(
                generation = %generation,
                latest = self.latest.load(Ordering::SeqCst),
                "Discarding superseded search result"
            );
            return false;
        }

        self.enter(generation, phase);

        if sender
            .send(SearchDelivery {
                generation,
                outcome,
            })
            .is_err()
        {
            debug!(generation = %generation, "Result receiver dropped; nothing to deliver to");
            return false;
        }

        true
    }
}

/// Handle to a started run.
#[derive(Debug)]
pub struct RunHandle {
    generation: Generation,
    task: JoinHandle<RunReport>,
}

impl RunHandle {
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Wait for the run to finish, whether or not its outcome was delivered.
    pub async fn wait(self) -> RunReport {
        match self.task.await {
            Ok(report) => report,
            Err(e) => {
                warn!(generation = %self.generation, error = %e, "Search task aborted");
                RunReport {
                    generation: self.generation,
                    phase: RunPhase::Failed,
                    delivered: false,
                }
            }
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub generation: Generation,
    pub phase: RunPhase,
    /// `false` when the run was superseded or nobody was listening.
    pub delivered: bool,
}
