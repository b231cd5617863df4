// src/domain/changes.rs

use crate::domain::listing::{Listing, User};
use crate::domain::logic::ProposalStatus;
use crate::domain::pricing::PricingBreakdown;
use crate::domain::proposal::{Guest, Pricing, Proposal, Reservation};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

/// Reservation terms an operator may modify on an existing proposal.
/// `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_span_weeks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_schedule: Option<[bool; 7]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_in_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict_move_in: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_full_time: Option<bool>,
}

impl ProposalUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Everything the creation wizard collected for a new suggested proposal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalDraft {
    pub listing: Listing,
    pub guest: User,
    pub guest_about: String,
    pub guest_need_for_space: String,
    pub guest_special_needs: String,
    pub status: ProposalStatus,
    pub move_in_date: Option<NaiveDate>,
    pub reservation_span_weeks: u32,
    pub weekly_schedule: [bool; 7],
    pub strict_move_in: bool,
    pub is_full_time: bool,
    /// Locked at creation; `None` while the span is zero weeks.
    pub pricing: Option<PricingBreakdown>,
}

impl ProposalDraft {
    /// The record a local store keeps for this draft.
    pub fn into_proposal(self, unique_id: String, now: DateTime<Utc>) -> Proposal {
        let guest = Guest {
            first_name: self.guest.first_name,
            last_name: self.guest.last_name,
            email: self.guest.email,
            phone_number: self.guest.phone_number,
            profile_photo: self.guest.profile_photo,
            about_me: self.guest_about,
            need_for_space: self.guest_need_for_space,
            special_needs: self.guest_special_needs,
            is_usability_tester: self.guest.is_usability_tester,
        };
        let host = self
            .listing
            .host
            .as_ref()
            .map(User::as_host)
            .unwrap_or_default();
        let check_out_date = self.move_in_date.and_then(|move_in| {
            let days = i64::from(self.reservation_span_weeks) * 7 - 1;
            if days < 0 {
                return None;
            }
            move_in.checked_add_signed(Duration::days(days))
        });

        Proposal {
            unique_id,
            status: self.status,
            created_date: now,
            modified_date: now,
            guest,
            host,
            listing: self.listing.summary(),
            pricing: self
                .pricing
                .map(PricingBreakdown::into_pricing)
                .unwrap_or_else(Pricing::default),
            reservation: Reservation {
                move_in_date: self.move_in_date,
                check_in_date: self.move_in_date,
                check_out_date,
                reservation_span_weeks: self.reservation_span_weeks,
                weekly_schedule: self.weekly_schedule,
                guest_desired_pattern: desired_pattern(&self.weekly_schedule).to_string(),
                strict_move_in: self.strict_move_in,
                is_full_time: self.is_full_time,
            },
        }
    }
}

/// Short description of a weekly schedule, as shown to hosts.
pub fn desired_pattern(schedule: &[bool; 7]) -> &'static str {
    match schedule {
        [true, true, true, true, true, true, true] => "Full Time",
        [false, true, true, true, true, true, false] => "Weekdays Only",
        [true, false, false, false, false, false, true] => "Weekends Only",
        _ => "",
    }
}
