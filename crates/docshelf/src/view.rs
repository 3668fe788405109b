//! Current-document view state
//!
//! Rapid navigation can leave several loads in flight. Each navigation
//! bumps an epoch and hands out a [`ViewTicket`]; a load result is
//! committed only if its ticket is still current, so a stale result never
//! lands in the view. Superseded loads are not cancelled, only ignored.

use tracing::debug;

use crate::content::Content;
use crate::error::LoadError;
use crate::resolver::{LoadOutcome, Resolver};

/// Proof of which navigation a load belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewTicket {
    epoch: u64,
    id: String,
}

impl ViewTicket {
    /// The id this ticket was issued for.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Navigation epoch of the ticket.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// What the view currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    /// Nothing navigated yet
    #[default]
    Empty,

    /// Waiting on the load for `id`
    Loading {
        /// Document being loaded
        id: String,
    },

    /// Body ready for rendering
    Ready {
        /// Document shown
        id: String,
        /// Its body
        content: Content,
    },

    /// `id` is not registered
    NotFound {
        /// Requested id
        id: String,
    },

    /// The load for `id` failed
    Failed {
        /// Document that failed
        id: String,
        /// Why
        error: LoadError,
    },
}

/// The "who is current" marker for one view.
#[derive(Debug, Clone, Default)]
pub struct ViewSession {
    epoch: u64,
    state: ViewState,
}

impl ViewSession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to `id`, superseding any earlier navigation.
    pub fn navigate(&mut self, id: impl Into<String>) -> ViewTicket {
        self.epoch += 1;
        let id = id.into();
        self.state = ViewState::Loading { id: id.clone() };
        ViewTicket {
            epoch: self.epoch,
            id,
        }
    }

    /// Apply a load result if `ticket` is still current.
    ///
    /// Returns `false` and leaves the view untouched for a stale ticket or a
    /// pending outcome.
    pub fn commit(&mut self, ticket: &ViewTicket, outcome: LoadOutcome) -> bool {
        if ticket.epoch != self.epoch {
            debug!(
                id = %ticket.id,
                ticket_epoch = ticket.epoch,
                current_epoch = self.epoch,
                "discarding stale load result"
            );
            return false;
        }

        let id = ticket.id.clone();
        self.state = match outcome {
            LoadOutcome::Ready(content) => ViewState::Ready { id, content },
            LoadOutcome::NotFound => ViewState::NotFound { id },
            LoadOutcome::Failed(error) => ViewState::Failed { id, error },
            LoadOutcome::Pending => return false,
        };
        true
    }

    /// Navigate to `id` and load it through `resolver` in one step.
    ///
    /// This holds `&mut self` until the load settles, so nothing can
    /// navigate away in the meantime and the result is always committed.
    /// Callers that need a newer navigation to supersede an in-flight load
    /// must use [`navigate`](Self::navigate) and [`commit`](Self::commit)
    /// instead.
    pub async fn open(&mut self, resolver: &Resolver, id: &str) -> &ViewState {
        let ticket = self.navigate(id);
        let outcome = resolver.load(id).await;
        self.commit(&ticket, outcome);
        &self.state
    }

    /// Id of the current navigation target.
    pub fn current(&self) -> Option<&str> {
        match &self.state {
            ViewState::Empty => None,
            ViewState::Loading { id }
            | ViewState::Ready { id, .. }
            | ViewState::NotFound { id }
            | ViewState::Failed { id, .. } => Some(id),
        }
    }

    /// Whether `ticket` is the latest navigation.
    pub fn is_current(&self, ticket: &ViewTicket) -> bool {
        ticket.epoch == self.epoch
    }

    /// What the view shows now.
    pub fn state(&self) -> &ViewState {
        &self.state
    }
}
