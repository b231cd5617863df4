// src/domain/logic.rs

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Lifecycle label of a proposal. The wire value is the exact label text;
/// `Unset` is the empty label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProposalStatus {
    SubmittedForGuestAwaitingApplication,
    SubmittedByGuestAwaitingApplication,
    SubmittedForGuestPendingConfirmation,
    HostReview,
    HostCounteroffer,
    AcceptedDraftingLease,
    LeaseSentForReview,
    LeaseSentForSignatures,
    LeaseSignedAwaitingPayment,
    LeaseActivated,
    CancelledByGuest,
    RejectedByHost,
    CancelledByOperator,
    GuestIgnoredSuggestion,
    #[default]
    Unset,
}

impl ProposalStatus {
    /// Every status, in the order the console offers them.
    pub const ALL: [ProposalStatus; 15] = [
        Self::SubmittedForGuestAwaitingApplication,
        Self::SubmittedByGuestAwaitingApplication,
        Self::SubmittedForGuestPendingConfirmation,
        Self::HostReview,
        Self::HostCounteroffer,
        Self::AcceptedDraftingLease,
        Self::LeaseSentForReview,
        Self::LeaseSentForSignatures,
        Self::LeaseSignedAwaitingPayment,
        Self::LeaseActivated,
        Self::CancelledByGuest,
        Self::RejectedByHost,
        Self::CancelledByOperator,
        Self::GuestIgnoredSuggestion,
        Self::Unset,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::SubmittedForGuestAwaitingApplication => {
                "Proposal Submitted for guest by Split Lease - Awaiting Rental Application"
            }
            Self::SubmittedByGuestAwaitingApplication => {
                "Proposal Submitted by guest - Awaiting Rental Application"
            }
            Self::SubmittedForGuestPendingConfirmation => {
                "Proposal Submitted for guest by Split Lease - Pending Confirmation"
            }
            Self::HostReview => "Host Review",
            Self::HostCounteroffer => "Host Counteroffer Submitted / Awaiting Guest Review",
            Self::AcceptedDraftingLease => {
                "Proposal or Counteroffer Accepted / Drafting Lease Documents"
            }
            Self::LeaseSentForReview => "Lease Documents Sent for Review",
            Self::LeaseSentForSignatures => "Lease Documents Sent for Signatures",
            Self::LeaseSignedAwaitingPayment => "Lease Documents Signed / Awaiting Initial payment",
            Self::LeaseActivated => "Initial Payment Submitted / Lease activated",
            Self::CancelledByGuest => "Proposal Cancelled by Guest",
            Self::RejectedByHost => "Proposal Rejected by Host",
            Self::CancelledByOperator => "Proposal Cancelled by Split Lease",
            Self::GuestIgnoredSuggestion => "Guest Ignored Suggestion",
            Self::Unset => "",
        }
    }

    /// Label for select boxes, where the empty status still needs visible text.
    pub fn display_label(&self) -> &'static str {
        match self {
            Self::Unset => "(empty)",
            other => other.label(),
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.label() == label)
    }

    /// Transition rule between statuses. Operators may override any status
    /// with any other; cancellation has its own confirmed path.
    pub const fn permits(&self, _next: ProposalStatus) -> bool {
        true
    }

    /// Statuses the operator can pick from the current one.
    pub fn successors(&self) -> impl Iterator<Item = ProposalStatus> + '_ {
        Self::ALL.iter().copied().filter(move |next| self.permits(*next))
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_label())
    }
}

impl Serialize for ProposalStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for ProposalStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Self::from_label(&label)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown proposal status '{label}'")))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("status '{from}' cannot move to '{to}'")]
pub struct TransitionError {
    pub from: ProposalStatus,
    pub to: ProposalStatus,
}

/// Proof that an operator answered "yes" to the cancellation prompt.
/// Cancelling a proposal requires one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelConfirmation {
    _confirmed: (),
}

impl CancelConfirmation {
    pub fn from_answer(answer: &str) -> Option<Self> {
        match answer.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "true" => Some(Self { _confirmed: () }),
            _ => None,
        }
    }
}
