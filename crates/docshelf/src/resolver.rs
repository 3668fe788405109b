//! Resolution and deferred loading
//!
//! The only component that does asynchronous work. Each id moves through
//!
//! ```text
//! Unloaded → Loading → Ready(content)
//!                   └→ Failed(error) → Loading   (explicit retry only)
//! ```
//!
//! and at most one loader invocation is in flight per id. Concurrent
//! callers for the same id subscribe to the in-flight load instead of
//! starting their own.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::content::{Content, DeferredLoader};
use crate::error::LoadError;
use crate::identifier::DocumentEntry;
use crate::registry::Registry;

type Settled = Option<Result<Content, LoadError>>;

/// Per-document load state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Never requested
    Unloaded,

    /// A load is in flight
    Loading,

    /// Loaded successfully
    Ready(Content),

    /// The last attempt failed
    Failed(LoadError),
}

/// Tagged result of a load request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The document body
    Ready(Content),

    /// A load is in flight (only from [`Resolver::request`])
    Pending,

    /// No loader is registered for the id
    NotFound,

    /// The loader failed; see [`Resolver::retry`]
    Failed(LoadError),
}

impl LoadOutcome {
    /// The content, if ready.
    pub fn content(&self) -> Option<&Content> {
        match self {
            LoadOutcome::Ready(content) => Some(content),
            _ => None,
        }
    }

    /// Whether the outcome is final for now (not pending).
    pub fn is_settled(&self) -> bool {
        !matches!(self, LoadOutcome::Pending)
    }

    fn from_settled(settled: Result<Content, LoadError>) -> Self {
        match settled {
            Ok(content) => LoadOutcome::Ready(content),
            Err(err) => LoadOutcome::Failed(err),
        }
    }
}

enum Slot {
    Loading(watch::Receiver<Settled>),
    Ready(Content),
    Failed(LoadError),
}

enum Start {
    Settled(LoadOutcome),
    Waiting(watch::Receiver<Settled>),
}

/// Looks up documents and drives their deferred loaders.
///
/// Loads run on spawned Tokio tasks, so a caller that stops waiting does
/// not cancel the load; its result is still cached for the next request.
/// Every loading method must be called from within a Tokio runtime.
#[derive(Clone)]
pub struct Resolver {
    registry: Arc<Registry>,
    slots: Arc<DashMap<String, Slot>>,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("documents", &self.registry.len())
            .field("touched", &self.slots.len())
            .finish()
    }
}

impl Resolver {
    /// Create a resolver over a built registry.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            slots: Arc::new(DashMap::new()),
        }
    }

    /// The registry being served.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Pure lookup; never triggers a load.
    pub fn resolve(&self, id: &str) -> Option<&DocumentEntry> {
        self.registry.resolve(id)
    }

    /// Current state of `id`, or `None` if it is not registered.
    pub fn state(&self, id: &str) -> Option<LoadState> {
        if !self.registry.contains(id) {
            return None;
        }
        let state = match self.slots.get(id).as_deref() {
            None => LoadState::Unloaded,
            Some(Slot::Loading(_)) => LoadState::Loading,
            Some(Slot::Ready(content)) => LoadState::Ready(content.clone()),
            Some(Slot::Failed(err)) => LoadState::Failed(err.clone()),
        };
        Some(state)
    }

    /// Load `id`, waiting for the result.
    ///
    /// Starts the loader if the document is unloaded, joins the in-flight
    /// load if one exists, and returns cached results otherwise. A cached
    /// failure is returned as-is; use [`retry`](Self::retry) to try again.
    pub async fn load(&self, id: &str) -> LoadOutcome {
        match self.start(id, false) {
            Start::Settled(outcome) => outcome,
            Start::Waiting(rx) => self.wait(id, rx).await,
        }
    }

    /// Like [`load`](Self::load) but restarts a failed document.
    pub async fn retry(&self, id: &str) -> LoadOutcome {
        match self.start(id, true) {
            Start::Settled(outcome) => outcome,
            Start::Waiting(rx) => self.wait(id, rx).await,
        }
    }

    /// Start loading `id` if needed without waiting for it.
    ///
    /// Returns [`LoadOutcome::Pending`] while the load is in flight.
    pub fn request(&self, id: &str) -> LoadOutcome {
        match self.start(id, false) {
            Start::Settled(outcome) => outcome,
            Start::Waiting(rx) => {
                let current = rx.borrow().clone();
                if let Some(settled) = current {
                    return LoadOutcome::from_settled(settled);
                }
                if rx.has_changed().is_err() {
                    // Sender dropped without a result
                    return LoadOutcome::Failed(self.abandon(id, &rx));
                }
                LoadOutcome::Pending
            }
        }
    }

    fn start(&self, id: &str, retry: bool) -> Start {
        let Some(loader) = self.registry.loader(id) else {
            debug!(id, "no loader registered");
            return Start::Settled(LoadOutcome::NotFound);
        };

        match self.slots.entry(id.to_string()) {
            Entry::Occupied(mut occupied) => match occupied.get() {
                Slot::Ready(content) => Start::Settled(LoadOutcome::Ready(content.clone())),
                Slot::Loading(rx) => Start::Waiting(rx.clone()),
                Slot::Failed(err) if !retry => Start::Settled(LoadOutcome::Failed(err.clone())),
                Slot::Failed(_) => {
                    debug!(id, "retrying failed load");
                    let rx = self.spawn(id, loader);
                    occupied.insert(Slot::Loading(rx.clone()));
                    Start::Waiting(rx)
                }
            },
            Entry::Vacant(vacant) => {
                let rx = self.spawn(id, loader);
                vacant.insert(Slot::Loading(rx.clone()));
                Start::Waiting(rx)
            }
        }
    }

    /// Run the loader on its own task under a supervising task.
    ///
    /// The supervisor settles the slot even when the loader panics or is
    /// cancelled, so no slot is left `Loading` without a live load behind it.
    fn spawn(&self, id: &str, loader: &DeferredLoader) -> watch::Receiver<Settled> {
        let (tx, rx) = watch::channel(None);
        let slots = Arc::clone(&self.slots);
        let own = rx.clone();
        let id = id.to_string();
        let loader = loader.clone();

        debug!(id = %id, "load started");
        tokio::spawn(async move {
            let load = tokio::spawn(async move { loader.invoke().await });
            let settled = match load.await {
                Ok(result) => result.map_err(|err| LoadError::failed(&id, err)),
                Err(join_error) => {
                    warn!(id = %id, error = %join_error, "loader task aborted");
                    Err(LoadError::Aborted { id: id.clone() })
                }
            };
            match &settled {
                Ok(_) => debug!(id = %id, "load finished"),
                Err(err) => debug!(id = %id, error = %err, "load failed"),
            }
            settle(&slots, &id, &own, &settled);
            let _ = tx.send(Some(settled));
        });

        rx
    }

    async fn wait(&self, id: &str, mut rx: watch::Receiver<Settled>) -> LoadOutcome {
        let waited = rx.wait_for(Option::is_some).await.map(|settled| settled.clone());
        match waited {
            Ok(settled) => match settled {
                Some(settled) => LoadOutcome::from_settled(settled),
                None => LoadOutcome::Pending,
            },
            // Sender dropped without a result: the supervisor itself was torn down
            Err(_) => LoadOutcome::Failed(self.abandon(id, &rx)),
        }
    }

    fn abandon(&self, id: &str, rx: &watch::Receiver<Settled>) -> LoadError {
        let err = LoadError::Aborted { id: id.to_string() };
        settle(&self.slots, id, rx, &Err(err.clone()));
        err
    }
}

/// Record a result in the slot, but only if the slot still belongs to the
/// load that produced it; a newer in-flight load is left alone.
fn settle(
    slots: &DashMap<String, Slot>,
    id: &str,
    owner: &watch::Receiver<Settled>,
    settled: &Result<Content, LoadError>,
) {
    // The entry lock may be held by `start` while this runs on another
    // worker; it is never held across an await.
    if let Some(mut slot) = slots.get_mut(id) {
        if matches!(&*slot, Slot::Loading(current) if current.same_channel(owner)) {
            *slot = match settled {
                Ok(content) => Slot::Ready(content.clone()),
                Err(err) => Slot::Failed(err.clone()),
            };
        }
    }
}
