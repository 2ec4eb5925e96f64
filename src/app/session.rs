//! Search session: the observable query, result and selection, plus the
//! controller task that drives them.
//!
//! # Architecture
//!
//! ```text
//! set_query ──► command channel ──► controller task ──► handle_event ──► actions
//!                                        ▲                                 │
//!                                        │  debounce timer, fetch tasks ◄──┘
//!                                        └──────── completions ◄───────────┘
//!
//! controller ──► watch<String>       (current query)
//!            ──► watch<FetchResult>  (current result)
//! select_photo ─► watch<SelectedPhoto>
//! ```
//!
//! The controller task is the only writer of the query and result values, so no
//! locking is involved. Fetches run as separate tasks; replacing one aborts its
//! task, which drops the in-flight HTTP request.

use crate::app::{handle_event, Action, Event, PipelineState};
use crate::domain::{FetchResult, Photo, PhotoSearchError, Result, SelectedPhoto};
use crate::feed::{FeedFetcher, Fetcher, HttpFeedSource};
use crate::Config;
use futures_util::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// Default quiet interval before a query is acted upon.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug)]
enum Command {
    SetQuery(String),
    Reset,
}

#[derive(Debug)]
struct Completion {
    generation: u64,
    result: FetchResult,
}

/// One search session.
///
/// Must be created inside a Tokio runtime; the controller runs as a spawned
/// task until [`SearchSession::dispose`] is awaited or the session is dropped.
///
/// # Example
///
/// ```no_run
/// use photosearch::{Config, SearchSession};
///
/// # async fn demo() -> photosearch::Result<()> {
/// let session = SearchSession::from_config(&Config::default())?;
/// let mut results = session.subscribe_results();
///
/// session.set_query("sunset")?;
/// results.changed().await.ok();
/// println!("{:?}", *results.borrow());
///
/// session.dispose().await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SearchSession {
    commands: mpsc::UnboundedSender<Command>,
    query: watch::Receiver<String>,
    result: watch::Receiver<FetchResult>,
    selection: watch::Sender<SelectedPhoto>,
    shutdown: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl SearchSession {
    /// Starts a session over `fetcher` with the given quiet interval.
    pub fn new<F: Fetcher>(fetcher: F, debounce: Duration) -> Self {
        Self::with_shared(Arc::new(fetcher), debounce)
    }

    /// Starts a session over a shared fetcher.
    pub fn with_shared(fetcher: Arc<dyn Fetcher>, debounce: Duration) -> Self {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let (query_tx, query_rx) = watch::channel(String::new());
        let (result_tx, result_rx) = watch::channel(FetchResult::Idle);
        let (selection_tx, _) = watch::channel(SelectedPhoto::placeholder());
        let shutdown = CancellationToken::new();

        let controller = Controller {
            state: PipelineState::new(),
            fetcher,
            debounce,
            deadline: None,
            in_flight: None,
            commands: commands_rx,
            completions_tx,
            completions: completions_rx,
            query: query_tx,
            result: result_tx,
            shutdown: shutdown.clone(),
        };

        let span = tracing::debug_span!("search_controller", debounce_ms = debounce.as_millis());
        let task = tokio::spawn(controller.run().instrument(span));

        Self {
            commands: commands_tx,
            query: query_rx,
            result: result_rx,
            selection: selection_tx,
            shutdown,
            task: Some(task),
        }
    }

    /// Starts a session that queries the configured feed endpoint over HTTP.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is invalid or the HTTP client cannot be
    /// built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = FeedFetcher::new(HttpFeedSource::new(config)?);
        Ok(Self::new(fetcher, config.debounce()))
    }

    /// Records a new query. The fetch, if any, happens after the quiet interval.
    ///
    /// Every call notifies query observers, even when the text is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoSearchError::Session`] if the controller has stopped.
    pub fn set_query(&self, text: impl Into<String>) -> Result<()> {
        self.send(Command::SetQuery(text.into()))
    }

    /// Restores the initial state: empty query, `Idle`, nothing selected.
    ///
    /// Any pending debounce and in-flight fetch are abandoned.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoSearchError::Session`] if the controller has stopped.
    pub fn reset(&self) -> Result<()> {
        self.selection.send_replace(SelectedPhoto::placeholder());
        self.send(Command::Reset)
    }

    /// Hands `photo` to the detail view.
    pub fn select_photo(&self, photo: Photo) {
        tracing::debug!(title = %photo.title, "photo selected");
        self.selection.send_replace(SelectedPhoto::new(photo));
    }

    /// Current query text as last recorded by the controller.
    #[must_use]
    pub fn query(&self) -> String {
        self.query.borrow().clone()
    }

    /// Current result.
    #[must_use]
    pub fn result(&self) -> FetchResult {
        self.result.borrow().clone()
    }

    /// Currently selected photo, or the placeholder.
    #[must_use]
    pub fn selected(&self) -> SelectedPhoto {
        self.selection.borrow().clone()
    }

    #[must_use]
    pub fn subscribe_query(&self) -> watch::Receiver<String> {
        self.query.clone()
    }

    #[must_use]
    pub fn subscribe_results(&self) -> watch::Receiver<FetchResult> {
        self.result.clone()
    }

    #[must_use]
    pub fn subscribe_selection(&self) -> watch::Receiver<SelectedPhoto> {
        self.selection.subscribe()
    }

    /// Stops the controller and waits for it to finish.
    ///
    /// Any in-flight fetch is aborted. Observers keep the last published values.
    pub async fn dispose(mut self) {
        self.shutdown.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::debug!(error = %e, "controller task ended abnormally");
            }
        }
        tracing::debug!("search session disposed");
    }

    fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| PhotoSearchError::Session("search controller has stopped".to_string()))
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

struct Controller {
    state: PipelineState,
    fetcher: Arc<dyn Fetcher>,
    debounce: Duration,
    deadline: Option<Instant>,
    in_flight: Option<(u64, JoinHandle<()>)>,
    commands: mpsc::UnboundedReceiver<Command>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions: mpsc::UnboundedReceiver<Completion>,
    query: watch::Sender<String>,
    result: watch::Sender<FetchResult>,
    shutdown: CancellationToken,
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

impl Controller {
    async fn run(mut self) {
        tracing::debug!("search controller started");

        loop {
            let event = tokio::select! {
                biased;

                () = self.shutdown.cancelled() => break,

                command = self.commands.recv() => match command {
                    Some(Command::SetQuery(text)) => {
                        self.query.send_replace(text.clone());
                        Event::QueryChanged(text)
                    }
                    Some(Command::Reset) => {
                        self.query.send_replace(String::new());
                        Event::Reset
                    }
                    None => break,
                },

                Some(done) = self.completions.recv() => Event::FetchCompleted {
                    generation: done.generation,
                    result: done.result,
                },

                () = wait_until(self.deadline) => {
                    self.deadline = None;
                    Event::DebounceElapsed
                }
            };

            for action in handle_event(&mut self.state, event) {
                self.execute(action);
            }
        }

        if let Some((generation, task)) = self.in_flight.take() {
            tracing::debug!(generation = generation, "aborting fetch on shutdown");
            task.abort();
        }
        tracing::debug!("search controller stopped");
    }

    fn execute(&mut self, action: Action) {
        match action {
            Action::ArmDebounce => {
                self.deadline = Some(Instant::now() + self.debounce);
            }

            Action::DisarmDebounce => {
                self.deadline = None;
            }

            Action::CancelFetch { generation } => {
                if let Some((running, task)) = self.in_flight.take() {
                    if running == generation {
                        tracing::debug!(generation = generation, "cancelling superseded fetch");
                        task.abort();
                    } else {
                        self.in_flight = Some((running, task));
                    }
                }
            }

            Action::ReleaseFetch { generation } => {
                if self.in_flight.as_ref().is_some_and(|(running, _)| *running == generation) {
                    self.in_flight = None;
                }
            }

            Action::StartFetch { generation, query } => {
                let task = self.spawn_fetch(generation, query);
                if let Some((previous, old)) = self.in_flight.replace((generation, task)) {
                    tracing::debug!(generation = previous, "aborting orphaned fetch");
                    old.abort();
                }
            }

            Action::Publish(result) => {
                self.result.send_replace(result);
            }
        }
    }

    fn spawn_fetch(&self, generation: u64, query: String) -> JoinHandle<()> {
        let fetcher = Arc::clone(&self.fetcher);
        let completions = self.completions_tx.clone();
        let span = tracing::debug_span!("fetch", generation = generation, query = %query);

        tokio::spawn(
            async move {
                let result = AssertUnwindSafe(fetcher.fetch(&query))
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|_| {
                        tracing::error!("fetch panicked");
                        FetchResult::generic_failure()
                    });

                if completions.send(Completion { generation, result }).is_err() {
                    tracing::debug!("controller gone, dropping fetch result");
                }
            }
            .instrument(span),
        )
    }
}
