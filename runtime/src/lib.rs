//! # Figures State Runtime
//!
//! The Store that holds the dashboard's whole state and runs the root reducer.
//!
//! ## Core Components
//!
//! - **Store**: Holds the current state snapshot and serializes dispatch
//! - **Subscriptions**: Watch channel delivering each new snapshot
//! - **History**: Bounded log of dispatched actions for debugging
//!
//! Every dispatch produces a brand-new `Arc` snapshot, so subscribers can
//! detect changes with [`Arc::ptr_eq`].
//!
//! ## Example
//!
//! ```ignore
//! use figures_state_runtime::{Store, StoreConfig};
//!
//! let store = Store::new(root_reducer(), StoreConfig::default());
//!
//! // Send an action
//! store.send(Action::new("REQUEST_COURSES_INDEX")).await?;
//!
//! // Read state
//! let fetching = store.state(|s| s.courses_index.is_fetching);
//! ```

use figures_state_core::{action::InitAction, reducer::Reducer};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError};
use std::time::Instant;
use tokio::sync::{watch, Mutex};

/// Metric names and descriptions recorded by the store
pub mod metrics;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after `shutdown()`.
        #[error("Store is shutting down")]
        ShutdownInProgress,
    }
}

pub use error::StoreError;

/// Configuration for a [`Store`]
///
/// # Example
///
/// ```
/// use figures_state_runtime::StoreConfig;
///
/// let config = StoreConfig::default()
///     .with_name("dashboard")
///     .with_history_capacity(50);
/// assert_eq!(config.history_capacity, 50);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Name attached to the store's tracing spans
    pub name: String,
    /// Number of dispatched actions kept in the history (0 disables it)
    pub history_capacity: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub fn new(name: impl Into<String>, history_capacity: usize) -> Self {
        Self {
            name: name.into(),
            history_capacity,
        }
    }

    /// Set the store name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the history capacity
    #[must_use]
    pub const fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "store".to_string(),
            history_capacity: 100,
        }
    }
}

/// One entry of the dispatch history
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchRecord<A> {
    /// 1-based position of this dispatch (INIT is not counted)
    pub sequence: u64,
    /// The dispatched action
    pub action: A,
}

/// The Store - runtime for the root reducer
///
/// The Store manages:
/// 1. The current state snapshot (an `Arc` replaced on every dispatch)
/// 2. The root reducer
/// 3. Serialized dispatch: one reducer call at a time, in arrival order
/// 4. Change notification through a watch channel
///
/// Cloning a Store yields another handle to the same state.
///
/// # Example
///
/// ```ignore
/// let store = Store::new(root_reducer(), StoreConfig::default());
/// let mut updates = store.subscribe();
///
/// store.send(Action::new("REQUEST_REPORTS_LIST")).await?;
/// updates.changed().await?;
/// ```
pub struct Store<R: Reducer> {
    inner: Arc<Inner<R>>,
}

struct Inner<R: Reducer> {
    reducer: R,
    config: StoreConfig,
    /// Held for the whole reducer call so dispatches never interleave
    current: Mutex<Arc<R::State>>,
    updates: watch::Sender<Arc<R::State>>,
    history: std::sync::Mutex<VecDeque<DispatchRecord<R::Action>>>,
    shutdown: AtomicBool,
    dispatched: AtomicU64,
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R> Store<R>
where
    R: Reducer + Send + Sync + 'static,
    R::State: Send + Sync + 'static,
    R::Action: Clone + Send + 'static,
{
    /// Create a new store whose initial state is the reducer's defaults
    ///
    /// The initialization action is dispatched to the reducer with no prior
    /// state; it does not appear in the history.
    #[must_use]
    pub fn new(reducer: R, config: StoreConfig) -> Self
    where
        R::Action: InitAction,
    {
        let initial = reducer.reduce(None, &<R::Action as InitAction>::init());
        Self::from_parts(reducer, initial, config)
    }

    /// Create a store from a preloaded state
    ///
    /// The initialization action is still dispatched, against the preloaded
    /// state, so slices missing from it get their defaults.
    #[must_use]
    pub fn with_state(reducer: R, preloaded: R::State, config: StoreConfig) -> Self
    where
        R::Action: InitAction,
    {
        let initial = reducer.reduce(Some(&preloaded), &<R::Action as InitAction>::init());
        Self::from_parts(reducer, initial, config)
    }

    fn from_parts(reducer: R, initial: R::State, config: StoreConfig) -> Self {
        let initial = Arc::new(initial);
        let (updates, _) = watch::channel(Arc::clone(&initial));
        let history = VecDeque::with_capacity(config.history_capacity);

        tracing::debug!(store = %config.name, "Store created");

        Self {
            inner: Arc::new(Inner {
                reducer,
                config,
                current: Mutex::new(initial),
                updates,
                history: std::sync::Mutex::new(history),
                shutdown: AtomicBool::new(false),
                dispatched: AtomicU64::new(0),
            }),
        }
    }

    /// Send an action through the root reducer
    ///
    /// Waits for any in-flight dispatch to finish, runs the reducer against
    /// the current snapshot, installs the result and notifies subscribers.
    ///
    /// # Returns
    ///
    /// The new state snapshot
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    #[tracing::instrument(skip(self, action), fields(store = %self.inner.config.name), name = "store_send")]
    pub async fn send(&self, action: R::Action) -> Result<Arc<R::State>, StoreError> {
        if self.inner.shutdown.load(Ordering::Acquire) {
            tracing::warn!("Rejected action: store is shutting down");
            metrics::counter!(metrics::REJECTED_ACTIONS).increment(1);
            return Err(StoreError::ShutdownInProgress);
        }

        let mut current = self.inner.current.lock().await;
        tracing::trace!("Acquired dispatch lock");

        let next = {
            let span = tracing::debug_span!("reducer_execution");
            let _enter = span.enter();

            let start = Instant::now();
            let next = self.inner.reducer.reduce(Some(&**current), &action);
            metrics::histogram!(metrics::REDUCER_DURATION).record(start.elapsed().as_secs_f64());

            Arc::new(next)
        };

        *current = Arc::clone(&next);
        let sequence = self.inner.dispatched.fetch_add(1, Ordering::AcqRel) + 1;
        self.record(sequence, action);
        self.inner.updates.send_replace(Arc::clone(&next));
        drop(current);

        metrics::counter!(metrics::ACTIONS_TOTAL).increment(1);
        tracing::debug!(sequence, "Action processed");

        Ok(next)
    }

    fn record(&self, sequence: u64, action: R::Action) {
        let capacity = self.inner.config.history_capacity;
        if capacity == 0 {
            return;
        }

        let mut history = self
            .inner
            .history
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        while history.len() >= capacity {
            history.pop_front();
        }
        history.push_back(DispatchRecord { sequence, action });
    }

    /// The current state snapshot
    #[must_use]
    pub fn snapshot(&self) -> Arc<R::State> {
        Arc::clone(&self.inner.updates.borrow())
    }

    /// Read current state via a closure
    ///
    /// ```ignore
    /// let course_count = store.state(|s| s.courses_index.data.len());
    /// ```
    pub fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&R::State) -> T,
    {
        let state = self.inner.updates.borrow();
        f(&state)
    }

    /// Subscribe to state changes
    ///
    /// The receiver starts at the current snapshot and is marked changed
    /// after every subsequent dispatch.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<R::State>> {
        self.inner.updates.subscribe()
    }

    /// The most recent dispatches, oldest first
    #[must_use]
    pub fn history(&self) -> Vec<DispatchRecord<R::Action>> {
        self.inner
            .history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Number of actions dispatched since creation (INIT excluded)
    #[must_use]
    pub fn dispatched(&self) -> u64 {
        self.inner.dispatched.load(Ordering::Acquire)
    }

    /// Stop accepting actions
    ///
    /// Dispatches already waiting on the lock still complete.
    pub fn shutdown(&self) {
        if !self.inner.shutdown.swap(true, Ordering::AcqRel) {
            tracing::info!(store = %self.inner.config.name, "Store shutting down");
        }
    }

    /// Whether `shutdown()` has been called
    #[must_use]
    pub fn is_shutting_down(&self) -> bool {
        self.inner.shutdown.load(Ordering::Acquire)
    }

    /// The store configuration
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }
}
