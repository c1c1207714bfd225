//! Debounced address suggestions
//!
//! Collapses bursts of keystrokes into single geocoder calls and keeps
//! the visible candidate list consistent when responses come back out of
//! order. Every outbound call carries a monotonically increasing sequence
//! number; only the latest issued one may update visible state
//! (last-issued-wins).

use crate::error::{Error, Result};
use crate::geocode::{AddressCandidate, GeocodeClient};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Lifecycle of one input session
///
/// Re-enters `Pending` on every keystroke that is long enough to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending,
    Fulfilled,
    Failed,
}

/// Snapshot of the visible suggestion state
#[derive(Debug, Clone)]
pub struct Suggestions {
    /// Candidates ordered by provider relevance
    pub candidates: Vec<AddressCandidate>,
    pub loading: bool,
    /// Set when the provider failed; the caller should fall back to
    /// manual address entry instead of blocking
    pub degraded: bool,
    pub phase: Phase,
}

/// Debounce tuning
#[derive(Debug, Clone, Copy)]
pub struct DebouncePolicy {
    /// Quiet period the input must hold before a call is issued
    pub quiet: Duration,
    /// Queries shorter than this never reach the provider
    pub min_query_len: usize,
    /// Window in which re-issuing the identical query is served from the
    /// result already on screen. Must stay shorter than `quiet` so the
    /// provider sees at most one call per settled query.
    pub cooldown: Duration,
}

impl Default for DebouncePolicy {
    fn default() -> Self {
        Self {
            quiet: Duration::from_millis(500),
            min_query_len: 3,
            cooldown: Duration::from_millis(250),
        }
    }
}

struct ControllerState {
    candidates: Vec<AddressCandidate>,
    loading: bool,
    degraded: bool,
    phase: Phase,
    last_issued: Option<(String, Instant)>,
    pending: Option<JoinHandle<()>>,
}

struct Inner<G> {
    client: G,
    policy: DebouncePolicy,
    country_filter: Option<String>,
    seq: AtomicU64,
    state: Mutex<ControllerState>,
}

/// Stateful suggestion controller, one per input session
///
/// Owns its own timer and sequence-number fields; `reset` tears both
/// down explicitly when the address-entry view goes away.
pub struct SuggestionController<G> {
    inner: Arc<Inner<G>>,
}

impl<G> Clone for SuggestionController<G> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<G: GeocodeClient + 'static> SuggestionController<G> {
    pub fn new(client: G, policy: DebouncePolicy, country_filter: Option<String>) -> Self {
        Self {
            inner: Arc::new(Inner {
                client,
                policy,
                country_filter,
                seq: AtomicU64::new(0),
                state: Mutex::new(ControllerState {
                    candidates: Vec::new(),
                    loading: false,
                    degraded: false,
                    phase: Phase::Idle,
                    last_issued: None,
                    pending: None,
                }),
            }),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, ControllerState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Feed one keystroke worth of input
    ///
    /// Returns the sequence number issued for this input. A query shorter
    /// than the minimum length clears the candidate list and never
    /// reaches the provider; anything else schedules a call for after the
    /// quiet period, superseding whatever was previously in flight.
    pub fn input(&self, text: &str) -> u64 {
        let query = text.trim().to_string();
        let seq = self.inner.seq.fetch_add(1, Ordering::SeqCst) + 1;

        let mut state = self.lock_state();
        if let Some(handle) = state.pending.take() {
            handle.abort();
        }

        if query.chars().count() < self.inner.policy.min_query_len {
            state.candidates.clear();
            state.loading = false;
            state.degraded = false;
            state.phase = Phase::Idle;
            return seq;
        }

        state.phase = Phase::Pending;
        state.loading = true;

        // Identical query re-issued inside the cooldown window: the
        // result already on screen still answers it.
        if let Some((last, at)) = &state.last_issued {
            if *last == query && at.elapsed() < self.inner.policy.cooldown {
                state.loading = false;
                state.phase = if state.degraded {
                    Phase::Failed
                } else {
                    Phase::Fulfilled
                };
                return seq;
            }
        }

        let controller = self.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(controller.inner.policy.quiet).await;
            if controller.inner.seq.load(Ordering::SeqCst) != seq {
                return; // superseded while waiting out the quiet period
            }

            controller.lock_state().last_issued = Some((query.clone(), Instant::now()));

            let result = controller
                .inner
                .client
                .search(&query, controller.inner.country_filter.as_deref())
                .await;

            if let Err(Error::StaleResponse { seq, latest }) = controller.apply(seq, result) {
                debug!(seq, latest, "discarded stale suggestion response");
            }
        });
        state.pending = Some(handle);

        seq
    }

    /// Apply a completed geocoder call
    ///
    /// Only the most recently issued sequence number may touch visible
    /// state; anything older is reported as stale and dropped.
    pub fn apply(&self, seq: u64, result: Result<Vec<AddressCandidate>>) -> Result<()> {
        let latest = self.inner.seq.load(Ordering::SeqCst);
        if seq != latest {
            return Err(Error::StaleResponse { seq, latest });
        }

        let mut state = self.lock_state();
        state.loading = false;
        match result {
            Ok(candidates) => {
                state.candidates = candidates;
                state.degraded = false;
                state.phase = Phase::Fulfilled;
            }
            Err(err) => {
                warn!("address search failed, degrading to manual entry: {}", err);
                state.candidates.clear();
                state.degraded = true;
                state.phase = Phase::Failed;
            }
        }
        Ok(())
    }

    /// Current visible state
    pub fn snapshot(&self) -> Suggestions {
        let state = self.lock_state();
        Suggestions {
            candidates: state.candidates.clone(),
            loading: state.loading,
            degraded: state.degraded,
            phase: state.phase,
        }
    }

    /// Pick a candidate by index, clearing the list
    ///
    /// The returned candidate's coordinate is meant to move into the
    /// session's location state.
    pub fn select(&self, index: usize) -> Option<AddressCandidate> {
        let mut state = self.lock_state();
        if index >= state.candidates.len() {
            return None;
        }
        let candidate = state.candidates.swap_remove(index);
        state.candidates.clear();
        state.loading = false;
        state.phase = Phase::Idle;
        Some(candidate)
    }

    /// Cancel any in-flight request and drop all visible state
    ///
    /// Bumps the sequence counter so a response that is already on the
    /// wire is discarded as stale when it lands.
    pub fn reset(&self) {
        self.inner.seq.fetch_add(1, Ordering::SeqCst);
        let mut state = self.lock_state();
        if let Some(handle) = state.pending.take() {
            handle.abort();
        }
        state.candidates.clear();
        state.loading = false;
        state.degraded = false;
        state.phase = Phase::Idle;
        state.last_issued = None;
    }
}
