// src/console/mod.rs

//! Presentation-side state: the backend, the last accepted search, and the
//! optimistic mutations applied to it.

mod sequencer;

pub use sequencer::{SearchSequencer, SearchTicket};

use crate::backend::ProposalBackend;
use crate::domain::{
    CancelConfirmation, Listing, Proposal, ProposalDraft, ProposalFilters, ProposalStatus,
    ProposalUpdate, TransitionError, User,
};
use crate::fixtures::FixtureStore;
use crate::gateway::GatewayError;
use chrono::{DateTime, Utc};
use std::sync::{PoisonError, RwLock, RwLockWriteGuard};
use thiserror::Error;

/// Reason recorded on operator cancellations.
pub const CANCEL_REASON: &str = "Cancelled by admin";

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Backend(#[from] GatewayError),

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// Result of a search. Either way the caller gets the records it asked for;
/// only an accepted result replaced the cached view.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Accepted(Vec<Proposal>),
    Superseded(Vec<Proposal>),
}

impl SearchOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SearchOutcome::Accepted(_))
    }

    pub fn into_proposals(self) -> Vec<Proposal> {
        match self {
            SearchOutcome::Accepted(p) | SearchOutcome::Superseded(p) => p,
        }
    }
}

#[derive(Debug, Default)]
struct View {
    filters: ProposalFilters,
    proposals: Vec<Proposal>,
}

pub struct Console {
    backend: Box<dyn ProposalBackend>,
    view: RwLock<View>,
    searches: SearchSequencer,
}

impl Console {
    pub fn new(backend: Box<dyn ProposalBackend>) -> Self {
        Self {
            backend,
            view: RwLock::new(View::default()),
            searches: SearchSequencer::default(),
        }
    }

    pub fn with_fixtures() -> Self {
        Self::new(Box::new(FixtureStore::with_samples()))
    }

    fn view_mut(&self) -> RwLockWriteGuard<'_, View> {
        self.view.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records from the last accepted search, with optimistic edits applied.
    pub fn view(&self) -> Vec<Proposal> {
        self.view
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .proposals
            .clone()
    }

    pub fn search(&self, filters: &ProposalFilters) -> Result<SearchOutcome, ConsoleError> {
        let ticket = self.searches.begin();
        let found = self.backend.search_proposals(filters)?;

        let mut view = self.view_mut();
        if self.searches.is_current(ticket) {
            view.filters = filters.clone();
            view.proposals = found.clone();
            tracing::debug!(count = found.len(), "search accepted");
            Ok(SearchOutcome::Accepted(found))
        } else {
            tracing::debug!(count = found.len(), "stale search discarded");
            Ok(SearchOutcome::Superseded(found))
        }
    }

    /// The record as the current view holds it, without touching the backend.
    pub fn cached(&self, id: &str) -> Option<Proposal> {
        self.view
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .proposals
            .iter()
            .find(|p| p.unique_id == id)
            .cloned()
    }

    /// The cached copy if the view holds one, otherwise a backend lookup.
    pub fn proposal(&self, id: &str) -> Result<Proposal, ConsoleError> {
        match self.cached(id) {
            Some(p) => Ok(p),
            None => Ok(self.backend.get_proposal(id)?),
        }
    }

    pub fn change_status(&self, id: &str, status: ProposalStatus) -> Result<Proposal, ConsoleError> {
        tracing::info!(proposal_id = id, status = %status, "changing status");
        self.optimistically(
            id,
            |p, now| p.set_status(status, now),
            |backend| backend.update_status(id, status),
        )
    }

    pub fn cancel(&self, id: &str, confirmed: CancelConfirmation) -> Result<Proposal, ConsoleError> {
        tracing::info!(proposal_id = id, "cancelling proposal");
        self.optimistically(
            id,
            |p, now| {
                p.cancel(confirmed, now);
                Ok(())
            },
            |backend| backend.cancel_proposal(id, CANCEL_REASON, confirmed),
        )
    }

    pub fn update_terms(&self, id: &str, update: &ProposalUpdate) -> Result<Proposal, ConsoleError> {
        tracing::info!(proposal_id = id, "updating reservation terms");
        self.optimistically(
            id,
            |p, now| {
                p.apply_terms(update, now);
                Ok(())
            },
            |backend| backend.update_proposal(id, update),
        )
    }

    pub fn remind_guest(&self, id: &str) -> Result<(), ConsoleError> {
        self.backend.remind_guest(id)?;
        tracing::info!(proposal_id = id, "guest reminded");
        Ok(())
    }

    pub fn remind_host(&self, id: &str) -> Result<(), ConsoleError> {
        self.backend.remind_host(id)?;
        tracing::info!(proposal_id = id, "host reminded");
        Ok(())
    }

    pub fn create(&self, draft: &ProposalDraft) -> Result<Proposal, ConsoleError> {
        let created = self.backend.create_proposal(draft)?;
        let mut view = self.view_mut();
        if view.filters.matches(&created) {
            view.proposals.push(created.clone());
        }
        Ok(created)
    }

    pub fn search_listings(&self, term: &str) -> Result<Vec<Listing>, ConsoleError> {
        Ok(self.backend.search_listings(term)?)
    }

    pub fn search_users(&self, term: &str) -> Result<Vec<User>, ConsoleError> {
        Ok(self.backend.search_users(term)?)
    }

    pub fn find_listing(&self, id: &str) -> Result<Option<Listing>, ConsoleError> {
        let found = self.backend.search_listings(id)?;
        Ok(found.into_iter().find(|l| l.unique_id == id))
    }

    pub fn find_user(&self, key: &str) -> Result<Option<User>, ConsoleError> {
        let found = self.backend.search_users(key)?;
        Ok(found.into_iter().find(|u| u.key() == key))
    }

    /// Apply `local` to the cached record, then run `remote`. A failure puts the
    /// snapshot back unless something else has replaced the entry meanwhile.
    fn optimistically(
        &self,
        id: &str,
        local: impl FnOnce(&mut Proposal, DateTime<Utc>) -> Result<(), TransitionError>,
        remote: impl FnOnce(&dyn ProposalBackend) -> Result<Proposal, GatewayError>,
    ) -> Result<Proposal, ConsoleError> {
        let pending = {
            let mut view = self.view_mut();
            match view.proposals.iter_mut().find(|p| p.unique_id == id) {
                Some(cached) => {
                    let snapshot = cached.clone();
                    local(cached, Utc::now())?;
                    Some((snapshot, cached.clone()))
                }
                None => None,
            }
        };

        match remote(self.backend.as_ref()) {
            Ok(updated) => {
                self.replace_cached(id, |_| true, updated.clone());
                Ok(updated)
            }
            Err(e) => {
                if let Some((snapshot, optimistic)) = pending {
                    self.replace_cached(id, |current| *current == optimistic, snapshot);
                    tracing::warn!(proposal_id = id, error = %e, "rolled back optimistic update");
                }
                Err(e.into())
            }
        }
    }

    fn replace_cached(&self, id: &str, only_if: impl Fn(&Proposal) -> bool, with: Proposal) {
        let mut view = self.view_mut();
        if let Some(cached) = view.proposals.iter_mut().find(|p| p.unique_id == id) {
            if only_if(cached) {
                *cached = with;
            }
        }
    }
}
