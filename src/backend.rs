// src/backend.rs

use crate::domain::{
    CancelConfirmation, Listing, Proposal, ProposalDraft, ProposalFilters, ProposalStatus,
    ProposalUpdate, User,
};
use crate::gateway::GatewayError;

/// Where proposals live. Implemented by the remote [`crate::gateway::ProposalGateway`]
/// and the in-memory [`crate::fixtures::FixtureStore`].
///
/// Every call is blocking and returns records already normalized.
pub trait ProposalBackend: Send + Sync {
    fn search_proposals(&self, filters: &ProposalFilters) -> Result<Vec<Proposal>, GatewayError>;

    fn get_proposal(&self, id: &str) -> Result<Proposal, GatewayError>;

    fn create_proposal(&self, draft: &ProposalDraft) -> Result<Proposal, GatewayError>;

    fn update_status(&self, id: &str, status: ProposalStatus) -> Result<Proposal, GatewayError>;

    fn update_proposal(&self, id: &str, update: &ProposalUpdate)
        -> Result<Proposal, GatewayError>;

    fn cancel_proposal(
        &self,
        id: &str,
        reason: &str,
        confirmed: CancelConfirmation,
    ) -> Result<Proposal, GatewayError>;

    fn remind_guest(&self, id: &str) -> Result<(), GatewayError>;

    fn remind_host(&self, id: &str) -> Result<(), GatewayError>;

    fn search_listings(&self, term: &str) -> Result<Vec<Listing>, GatewayError>;

    fn search_users(&self, term: &str) -> Result<Vec<User>, GatewayError>;
}
