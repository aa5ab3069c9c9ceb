//! The mass-call engine.

use std::mem;
use std::sync::Arc;

use futures::future::join_all;

use crate::clients::{EndpointId, Transport};
use crate::mass_call::{
    BatchWindow, FibonacciBackoff, HookError, MassCallError, MassCallHooks, MassCallOptions,
    QueuedRequest, ResultMap,
};

/// Settled state of one dispatched request.
enum Outcome {
    Succeeded {
        key: String,
        data: serde_json::Value,
        hook_error: Option<HookError>,
    },
    Failed {
        retry: Option<QueuedRequest>,
        hook_error: Option<HookError>,
    },
}

/// Runs queued requests in adaptively sized concurrent windows.
///
/// The engine is driven by one caller: `enqueue`, `execute`, `retry` and
/// `reset` take `&mut self`, and a window always settles completely before
/// the next one is sized and dispatched.
///
/// See the [module documentation](crate::mass_call) for the concurrency rules.
///
/// # Example
///
/// ```rust,ignore
/// use crystallize_api::{ApiClient, CrystallizeConfig, EndpointId, MassCallClient, MassCallOptions};
///
/// let api = ApiClient::new(CrystallizeConfig::from_env()?);
/// let options = MassCallOptions::builder().initial_spawn(1).max_spawn(5).build();
/// let mut client = MassCallClient::new(api, options);
///
/// let key = client.enqueue(EndpointId::Orders, "query { orders { getMany { edges { node { id } } } } }", None);
/// let results = client.execute().await?;
/// println!("{}", results[&key]);
/// ```
pub struct MassCallClient<T: Transport> {
    transport: T,
    options: MassCallOptions,
    pending: Vec<QueuedRequest>,
    failed: Vec<QueuedRequest>,
    seek: usize,
    concurrency: usize,
    backoff: FibonacciBackoff,
    counter: u64,
}

impl<T: Transport> MassCallClient<T> {
    /// Creates an engine sending requests through `transport`.
    #[must_use]
    pub fn new(transport: T, options: MassCallOptions) -> Self {
        let concurrency = options.initial_spawn();
        Self {
            transport,
            options,
            pending: Vec::new(),
            failed: Vec::new(),
            seek: 0,
            concurrency,
            backoff: FibonacciBackoff::new(),
            counter: 0,
        }
    }

    /// Returns the transport, for direct single calls.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the options the engine was built with.
    #[must_use]
    pub const fn options(&self) -> &MassCallOptions {
        &self.options
    }

    /// Queues a request and returns its key.
    ///
    /// Keys are `{endpoint}-{n}`, `n` counting from 1 for each engine, so
    /// they never repeat within one engine.
    pub fn enqueue(
        &mut self,
        endpoint: EndpointId,
        query: impl Into<String>,
        variables: Option<serde_json::Value>,
    ) -> String {
        self.counter += 1;
        let key = format!("{endpoint}-{}", self.counter);
        self.pending.push(QueuedRequest::new(
            key.clone(),
            endpoint,
            query.into(),
            variables,
        ));
        key
    }

    /// Queues a catalogue API request.
    pub fn enqueue_catalogue(
        &mut self,
        query: impl Into<String>,
        variables: Option<serde_json::Value>,
    ) -> String {
        self.enqueue(EndpointId::Catalogue, query, variables)
    }

    /// Queues a search API request.
    pub fn enqueue_search(
        &mut self,
        query: impl Into<String>,
        variables: Option<serde_json::Value>,
    ) -> String {
        self.enqueue(EndpointId::Search, query, variables)
    }

    /// Queues an orders API request.
    pub fn enqueue_order(
        &mut self,
        query: impl Into<String>,
        variables: Option<serde_json::Value>,
    ) -> String {
        self.enqueue(EndpointId::Orders, query, variables)
    }

    /// Queues a subscriptions API request.
    pub fn enqueue_subscription(
        &mut self,
        query: impl Into<String>,
        variables: Option<serde_json::Value>,
    ) -> String {
        self.enqueue(EndpointId::Subscriptions, query, variables)
    }

    /// Queues a PIM API request.
    pub fn enqueue_pim(
        &mut self,
        query: impl Into<String>,
        variables: Option<serde_json::Value>,
    ) -> String {
        self.enqueue(EndpointId::Pim, query, variables)
    }

    /// Queues a shop cart API request.
    pub fn enqueue_shop_cart(
        &mut self,
        query: impl Into<String>,
        variables: Option<serde_json::Value>,
    ) -> String {
        self.enqueue(EndpointId::ShopCart, query, variables)
    }

    /// Runs every pending request from the cursor to the end of the queue.
    ///
    /// Returns the results of the requests that succeeded during this call.
    /// Requests that failed are moved to the failed queue (unless
    /// [`MassCallHooks::on_failure`] drops them) and never abort the call.
    ///
    /// # Errors
    ///
    /// Returns [`MassCallError::Hook`] when a hook failed, once the window it
    /// failed in has settled. A later call resumes with the next window.
    pub async fn execute(&mut self) -> Result<ResultMap, MassCallError> {
        let mut results = ResultMap::new();

        while self.seek < self.pending.len() {
            let to = (self.seek + self.concurrency).min(self.pending.len());
            let window = BatchWindow::new(self.seek, to);

            let outcomes = join_all(
                self.pending[window.from..window.to]
                    .iter()
                    .map(|request| self.dispatch(window, request)),
            )
            .await;

            let mut error_count = 0;
            let mut hook_error = None;
            for outcome in outcomes {
                match outcome {
                    Outcome::Succeeded {
                        key,
                        data,
                        hook_error: error,
                    } => {
                        results.insert(key, data);
                        hook_error = hook_error.or(error);
                    }
                    Outcome::Failed {
                        retry,
                        hook_error: error,
                    } => {
                        error_count += 1;
                        if let Some(request) = retry {
                            self.failed.push(request);
                        }
                        hook_error = hook_error.or(error);
                    }
                }
            }

            tracing::debug!(
                "Mass call window {} done with concurrency {}: {} failed",
                window,
                self.concurrency,
                error_count
            );

            self.notify_batch_done(window);
            self.seek += window.len();
            self.adjust(window.len(), error_count).await;

            if let Some(source) = hook_error {
                return Err(MassCallError::Hook {
                    window,
                    source,
                    partial: results,
                });
            }
        }

        Ok(results)
    }

    /// Runs the failed requests again.
    ///
    /// The failed queue becomes the pending queue and the cursor restarts at
    /// 0, then this behaves as [`execute`](Self::execute). Call it until
    /// [`has_failed`](Self::has_failed) is `false`, or give up.
    ///
    /// Requests still pending are replaced, so after a hook error resume with
    /// `execute` before calling this.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute).
    pub async fn retry(&mut self) -> Result<ResultMap, MassCallError> {
        let unattempted = self.pending_count();
        if unattempted > 0 {
            tracing::warn!(
                "Retrying failed requests discards {} pending requests never attempted",
                unattempted
            );
        }

        self.pending = mem::take(&mut self.failed);
        self.seek = 0;
        self.execute().await
    }

    /// Returns `true` if requests are waiting in the failed queue.
    #[must_use]
    pub fn has_failed(&self) -> bool {
        !self.failed.is_empty()
    }

    /// Number of requests in the failed queue.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }

    /// The requests in the failed queue.
    #[must_use]
    pub fn failed_requests(&self) -> &[QueuedRequest] {
        &self.failed
    }

    /// Number of queued requests not attempted yet.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len() - self.seek
    }

    /// The concurrency the next window will use.
    #[must_use]
    pub const fn current_concurrency(&self) -> usize {
        self.concurrency
    }

    /// Empties both queues and rewinds the cursor.
    ///
    /// The concurrency and backoff state are kept.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.failed.clear();
        self.seek = 0;
    }

    fn hooks(&self) -> Option<&Arc<dyn MassCallHooks>> {
        self.options.hooks()
    }

    async fn dispatch(&self, window: BatchWindow, queued: &QueuedRequest) -> Outcome {
        let substitute = match self.hooks() {
            Some(hooks) => match hooks.before_request(window, queued).await {
                Ok(substitute) => substitute,
                Err(error) => {
                    return Outcome::Failed {
                        retry: Some(queued.clone()),
                        hook_error: Some(error),
                    };
                }
            },
            None => None,
        };
        let request = substitute.as_ref().unwrap_or(queued);

        match self
            .transport
            .call(request.endpoint(), request.query(), request.variables())
            .await
        {
            Ok(data) => {
                let hook_error = match self.hooks() {
                    Some(hooks) => hooks.after_request(window, queued, &data).await.err(),
                    None => None,
                };
                Outcome::Succeeded {
                    key: queued.key().to_string(),
                    data,
                    hook_error,
                }
            }
            Err(error) => {
                tracing::debug!("Request {} failed: {}", request.key(), error);

                let (enqueue, hook_error) = match self.hooks() {
                    Some(hooks) => match hooks.on_failure(window, &error, request).await {
                        Ok(enqueue) => (enqueue, None),
                        Err(hook_error) => (true, Some(hook_error)),
                    },
                    None => (true, None),
                };

                if !enqueue {
                    tracing::debug!("Request {} dropped by on_failure hook", request.key());
                }

                Outcome::Failed {
                    retry: enqueue.then(|| request.clone()),
                    hook_error,
                }
            }
        }
    }

    /// Fires `on_batch_done` on a detached task.
    fn notify_batch_done(&self, window: BatchWindow) {
        if let Some(hooks) = self.hooks().cloned() {
            tokio::spawn(async move {
                if let Err(error) = hooks.on_batch_done(window).await {
                    tracing::warn!("on_batch_done hook failed for window {}: {}", window, error);
                }
            });
        }
    }

    async fn adjust(&mut self, window_len: usize, error_count: usize) {
        if window_len > 0 && error_count == window_len {
            let delay = self.backoff.next_delay(self.options.backoff_unit());
            tracing::warn!(
                "All {} requests of the window failed, backing off for {:?}",
                window_len,
                delay
            );
            tokio::time::sleep(delay).await;
            return;
        }

        self.backoff.reset();
        self.concurrency = next_concurrency(
            self.concurrency,
            self.options.max_spawn(),
            window_len,
            error_count,
        );
    }
}

impl<T: Transport + std::fmt::Debug> std::fmt::Debug for MassCallClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MassCallClient")
            .field("transport", &self.transport)
            .field("options", &self.options)
            .field("pending", &self.pending.len())
            .field("failed", &self.failed.len())
            .field("seek", &self.seek)
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}

/// Concurrency after a window that was not a total failure.
fn next_concurrency(current: usize, max: usize, window_len: usize, error_count: usize) -> usize {
    if error_count * 2 > window_len {
        1
    } else if error_count > 0 {
        current.saturating_sub(1).max(1)
    } else {
        (current + 1).min(max)
    }
}
