// src/domain/mod.rs

pub mod changes;
pub mod fields;
pub mod listing;
pub mod logic;
pub mod pricing;
pub mod proposal;
pub mod query;

pub use changes::{ProposalDraft, ProposalUpdate};
pub use listing::{Listing, User};
pub use logic::{CancelConfirmation, ProposalStatus, TransitionError};
pub use pricing::{calculate, PricingBreakdown, PricingInput, MAX_SPAN_WEEKS};
pub use proposal::{Proposal, DAYS_OF_WEEK};
pub use query::{query, FilterError, ProposalFilters, SortDirection};
