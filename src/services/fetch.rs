/// Reactive fetch coordination
///
/// One coordinator per logical query. Callers `submit` a fresh fetch every
/// time the query's reactive input changes; the coordinator guarantees
/// last-input-wins by tagging each fetch with a monotonically increasing
/// token and discarding any completion whose token is no longer current.
/// There is no transport-level cancellation; a superseded request runs to
/// completion and its result is dropped silently.
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::error::AppResult;

/// Lifecycle of one reactive query.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// Nothing to show: the input was degenerate (or never supplied), so no
    /// request was issued. Distinct from both `Pending` and `Error`.
    Idle,
    Pending,
    Success(T),
    Error(String),
}

impl<T> FetchState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, FetchState::Pending)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Success(data) => Some(data),
            _ => None,
        }
    }
}

/// Progressive loading copy shown while a fetch is pending: an initial
/// message, then two replacements at fixed delays from entering `Pending`.
#[derive(Debug, Clone)]
pub struct LoadingLadder {
    rungs: [String; 3],
    second_after: Duration,
    third_after: Duration,
}

impl LoadingLadder {
    pub fn new(
        initial: impl Into<String>,
        second: impl Into<String>,
        third: impl Into<String>,
        second_after: Duration,
        third_after: Duration,
    ) -> Self {
        Self {
            rungs: [initial.into(), second.into(), third.into()],
            second_after,
            third_after,
        }
    }
}

struct Inner<T> {
    token: u64,
    state: FetchState<T>,
    rung: usize,
    timers: Vec<JoinHandle<()>>,
}

impl<T> Inner<T> {
    /// Ladder timers are scoped to the `Pending` interval: released on every
    /// exit path (result applied, input superseded, reset, drop).
    fn release_timers(&mut self) {
        for timer in self.timers.drain(..) {
            timer.abort();
        }
    }
}

pub struct FetchCoordinator<T> {
    inner: Arc<Mutex<Inner<T>>>,
    ladder: Option<Arc<LoadingLadder>>,
}

fn lock<T>(inner: &Arc<Mutex<Inner<T>>>) -> MutexGuard<'_, Inner<T>> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T> FetchCoordinator<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                token: 0,
                state: FetchState::Idle,
                rung: 0,
                timers: Vec::new(),
            })),
            ladder: None,
        }
    }

    pub fn with_ladder(ladder: LoadingLadder) -> Self {
        let mut coordinator = Self::new();
        coordinator.ladder = Some(Arc::new(ladder));
        coordinator
    }

    /// Degenerate input: issue no request and reset to the nothing-to-show
    /// state. Any in-flight fetch becomes stale.
    pub fn reset_idle(&self) {
        let mut inner = lock(&self.inner);
        inner.token += 1;
        inner.state = FetchState::Idle;
        inner.rung = 0;
        inner.release_timers();
    }

    /// Current rung of the loading ladder, present only while `Pending`.
    pub fn loading_message(&self) -> Option<String> {
        let inner = lock(&self.inner);
        match (&inner.state, &self.ladder) {
            (FetchState::Pending, Some(ladder)) => Some(ladder.rungs[inner.rung].clone()),
            _ => None,
        }
    }
}

impl<T: Send + 'static> FetchCoordinator<T> {
    /// Issue a fetch for the current input. Supersedes any outstanding fetch:
    /// the token advances, state moves to `Pending`, the ladder restarts.
    pub fn submit<Fut>(&self, fetch: Fut)
    where
        Fut: Future<Output = AppResult<T>> + Send + 'static,
    {
        let token = {
            let mut inner = lock(&self.inner);
            inner.token += 1;
            inner.state = FetchState::Pending;
            inner.rung = 0;
            inner.release_timers();

            let token = inner.token;
            if let Some(ladder) = &self.ladder {
                for (rung, delay) in [(1, ladder.second_after), (2, ladder.third_after)] {
                    let shared = Arc::clone(&self.inner);
                    inner.timers.push(tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        let mut inner = lock(&shared);
                        if inner.token == token && inner.state.is_pending() && inner.rung < rung {
                            inner.rung = rung;
                        }
                    }));
                }
            }
            token
        };

        let shared = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let result = fetch.await;
            let mut inner = lock(&shared);
            if inner.token != token {
                // Stale response: a later input owns the state now. Dropped
                // silently: no mutation, no surfaced error.
                return;
            }
            inner.release_timers();
            match result {
                Ok(data) => inner.state = FetchState::Success(data),
                Err(e) => {
                    tracing::warn!(error = %e, "Fetch failed");
                    inner.state = FetchState::Error(e.to_string());
                }
            }
        });
    }
}

impl<T: Clone> FetchCoordinator<T> {
    pub fn state(&self) -> FetchState<T> {
        lock(&self.inner).state.clone()
    }
}

impl<T> Default for FetchCoordinator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for FetchCoordinator<T> {
    fn drop(&mut self) {
        // Teardown of the owning screen releases the timers too.
        lock(&self.inner).release_timers();
    }
}
