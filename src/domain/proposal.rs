// src/domain/proposal.rs

use crate::domain::changes::ProposalUpdate;
use crate::domain::fields;
use crate::domain::logic::{CancelConfirmation, ProposalStatus, TransitionError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Day initials for the Sunday-first weekly schedule.
pub const DAYS_OF_WEEK: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

/// A lease proposal connecting a guest, a host and a listing.
///
/// Built from loosely-shaped input by [`Proposal::from_value`], which acts as
/// an anti-corruption layer between fixtures / remote payloads and the console:
/// every nested record is fully populated, whatever the input looked like.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub unique_id: String,
    pub status: ProposalStatus,
    pub created_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
    pub guest: Guest,
    pub host: Host,
    pub listing: ListingSummary,
    pub pricing: Pricing,
    pub reservation: Reservation,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub profile_photo: String,
    pub about_me: String,
    pub need_for_space: String,
    pub special_needs: String,
    pub is_usability_tester: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Host {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub profile_photo: String,
    pub is_usability_tester: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingSummary {
    pub name: String,
    pub unique_id: String,
    pub address: String,
    pub rental_type: String,
    pub photos: Vec<String>,
    pub damage_deposit: f64,
    pub cleaning_cost: f64,
    pub last_modified: DateTime<Utc>,
    pub house_rules: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    pub nightly_price: f64,
    pub total_reservation_price: f64,
    pub host_compensation: f64,
    pub total_compensation: f64,
    pub price_per_four_weeks: f64,
    pub initial_payment: f64,
    pub number_of_nights: u32,
    pub number_of_weeks: u32,
    pub security_deposit: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub move_in_date: Option<NaiveDate>,
    pub check_in_date: Option<NaiveDate>,
    pub check_out_date: Option<NaiveDate>,
    pub reservation_span_weeks: u32,
    /// Sunday first.
    pub weekly_schedule: [bool; 7],
    pub guest_desired_pattern: String,
    pub strict_move_in: bool,
    pub is_full_time: bool,
}

impl Guest {
    pub fn full_name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }

    fn from_value(v: &Value) -> Self {
        Self {
            first_name: fields::text(v, "firstName"),
            last_name: fields::text(v, "lastName"),
            email: fields::text(v, "email"),
            phone_number: fields::text(v, "phoneNumber"),
            profile_photo: fields::text(v, "profilePhoto"),
            about_me: fields::text(v, "aboutMe"),
            need_for_space: fields::text(v, "needForSpace"),
            special_needs: fields::text(v, "specialNeeds"),
            is_usability_tester: fields::flag(v, "isUsabilityTester"),
        }
    }
}

impl Host {
    pub fn full_name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }

    fn from_value(v: &Value) -> Self {
        Self {
            first_name: fields::text(v, "firstName"),
            last_name: fields::text(v, "lastName"),
            email: fields::text(v, "email"),
            phone_number: fields::text(v, "phoneNumber"),
            profile_photo: fields::text(v, "profilePhoto"),
            is_usability_tester: fields::flag(v, "isUsabilityTester"),
        }
    }
}

impl ListingSummary {
    fn from_value(v: &Value, now: DateTime<Utc>) -> Self {
        Self {
            name: fields::text(v, "name"),
            unique_id: fields::text(v, "uniqueId"),
            address: fields::text(v, "address"),
            rental_type: fields::text(v, "rentalType"),
            photos: fields::texts(v, "photos"),
            damage_deposit: fields::number(v, "damageDeposit"),
            cleaning_cost: fields::number(v, "cleaningCost"),
            last_modified: fields::timestamp(v, "lastModified", now),
            house_rules: fields::texts(v, "houseRules"),
        }
    }
}

impl Pricing {
    fn from_value(v: &Value) -> Self {
        Self {
            nightly_price: fields::number(v, "nightlyPrice"),
            total_reservation_price: fields::number(v, "totalReservationPrice"),
            host_compensation: fields::number(v, "hostCompensation"),
            total_compensation: fields::number(v, "totalCompensation"),
            price_per_four_weeks: fields::number(v, "pricePerFourWeeks"),
            initial_payment: fields::number(v, "initialPayment"),
            number_of_nights: fields::count(v, "numberOfNights"),
            number_of_weeks: fields::count(v, "numberOfWeeks"),
            security_deposit: fields::number(v, "securityDeposit"),
        }
    }
}

impl Reservation {
    fn from_value(v: &Value) -> Self {
        Self {
            move_in_date: fields::date(v, "moveInDate"),
            check_in_date: fields::date(v, "checkInDate"),
            check_out_date: fields::date(v, "checkOutDate"),
            reservation_span_weeks: fields::count(v, "reservationSpanWeeks"),
            weekly_schedule: fields::schedule(v, "weeklySchedule"),
            guest_desired_pattern: fields::text(v, "guestDesiredPattern"),
            strict_move_in: fields::flag(v, "strictMoveIn"),
            is_full_time: fields::flag(v, "isFullTime"),
        }
    }

    pub fn active_days(&self) -> usize {
        self.weekly_schedule.iter().filter(|d| **d).count()
    }
}

impl Proposal {
    /// Normalize arbitrary input, defaulting absent timestamps to the current time.
    pub fn from_value(data: &Value) -> Self {
        Self::from_value_at(data, Utc::now())
    }

    /// Normalize arbitrary input; `now` stands in for absent timestamps.
    pub fn from_value_at(data: &Value, now: DateTime<Utc>) -> Self {
        Self {
            unique_id: fields::text(data, "uniqueId"),
            status: status_from(data),
            created_date: fields::timestamp(data, "createdDate", now),
            modified_date: fields::timestamp(data, "modifiedDate", now),
            guest: Guest::from_value(fields::nested(data, "guest")),
            host: Host::from_value(fields::nested(data, "host")),
            listing: ListingSummary::from_value(fields::nested(data, "listing"), now),
            pricing: Pricing::from_value(fields::nested(data, "pricing")),
            reservation: Reservation::from_value(fields::nested(data, "reservation")),
        }
    }

    /// Refresh the modification time. Never moves it backwards.
    fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.modified_date {
            self.modified_date = now;
        }
    }

    /// Operator override of the status. Setting the current status again
    /// still counts as a mutation and refreshes `modified_date`.
    pub fn set_status(
        &mut self,
        status: ProposalStatus,
        now: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        if !self.status.permits(status) {
            return Err(TransitionError {
                from: self.status,
                to: status,
            });
        }
        self.status = status;
        self.touch(now);
        Ok(())
    }

    /// Cancel on behalf of the operator. Cancelling twice leaves the status
    /// as is but refreshes `modified_date` again.
    pub fn cancel(&mut self, _confirmed: CancelConfirmation, now: DateTime<Utc>) {
        self.status = ProposalStatus::CancelledByOperator;
        self.touch(now);
    }

    /// Apply modified reservation terms. Stored pricing is left as it was
    /// locked at creation.
    pub fn apply_terms(&mut self, update: &ProposalUpdate, now: DateTime<Utc>) {
        let reservation = &mut self.reservation;
        if let Some(weeks) = update.reservation_span_weeks {
            reservation.reservation_span_weeks = weeks;
        }
        if let Some(schedule) = update.weekly_schedule {
            reservation.weekly_schedule = schedule;
        }
        if let Some(move_in) = update.move_in_date {
            reservation.move_in_date = Some(move_in);
        }
        if let Some(strict) = update.strict_move_in {
            reservation.strict_move_in = strict;
        }
        if let Some(full_time) = update.is_full_time {
            reservation.is_full_time = full_time;
        }
        self.touch(now);
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(
            self.status,
            ProposalStatus::CancelledByOperator | ProposalStatus::CancelledByGuest
        )
    }
}

impl<'de> Deserialize<'de> for Proposal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Proposal::from_value(&value))
    }
}

fn status_from(data: &Value) -> ProposalStatus {
    let label = fields::text(data, "status");
    ProposalStatus::from_label(&label).unwrap_or_else(|| {
        tracing::warn!(status = %label, "unknown proposal status, treating as unset");
        ProposalStatus::Unset
    })
}

pub(crate) fn join_name(first: &str, last: &str) -> String {
    format!("{first} {last}").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fields::parse_timestamp_str;
    use serde_json::json;

    fn at(raw: &str) -> DateTime<Utc> {
        parse_timestamp_str(raw).unwrap()
    }

    #[test]
    fn empty_input_yields_fully_defaulted_proposal() {
        let now = at("2026-02-01");
        let p = Proposal::from_value_at(&json!({}), now);

        assert_eq!(p.unique_id, "");
        assert_eq!(p.status, ProposalStatus::Unset);
        assert_eq!(p.created_date, now);
        assert_eq!(p.modified_date, now);
        assert_eq!(p.guest, Guest::default());
        assert_eq!(p.host, Host::default());
        assert_eq!(p.listing.damage_deposit, 0.0);
        assert_eq!(p.listing.cleaning_cost, 0.0);
        assert_eq!(p.listing.last_modified, now);
        assert!(p.listing.photos.is_empty());
        assert_eq!(p.pricing, Pricing::default());
        assert_eq!(p.reservation.reservation_span_weeks, 0);
        assert_eq!(p.reservation.weekly_schedule, [false; 7]);
        assert_eq!(p.reservation.move_in_date, None);
    }

    #[test]
    fn missing_nested_objects_do_not_fail() {
        let p = Proposal::from_value(&json!({ "uniqueId": "P-1", "guest": null, "listing": 7 }));
        assert_eq!(p.unique_id, "P-1");
        assert_eq!(p.guest.first_name, "");
        assert_eq!(p.listing.name, "");
    }

    #[test]
    fn nested_leaves_are_read_independently() {
        let p = Proposal::from_value(&json!({
            "status": "Host Review",
            "guest": { "firstName": "Emily", "isUsabilityTester": true },
            "pricing": { "nightlyPrice": 85, "numberOfWeeks": 4 },
            "reservation": {
                "moveInDate": "2026-02-01",
                "weeklySchedule": [true, true, true, true, true, false, false]
            }
        }));
        assert_eq!(p.status, ProposalStatus::HostReview);
        assert_eq!(p.guest.first_name, "Emily");
        assert_eq!(p.guest.last_name, "");
        assert!(p.guest.is_usability_tester);
        assert_eq!(p.pricing.nightly_price, 85.0);
        assert_eq!(p.pricing.number_of_weeks, 4);
        assert_eq!(p.reservation.move_in_date, NaiveDate::from_ymd_opt(2026, 2, 1));
        assert_eq!(p.reservation.active_days(), 5);
    }

    #[test]
    fn unknown_status_resolves_to_unset() {
        let p = Proposal::from_value(&json!({ "status": "Teleported" }));
        assert_eq!(p.status, ProposalStatus::Unset);
    }

    #[test]
    fn deserialize_goes_through_the_normalizer() {
        let p: Proposal = serde_json::from_str(r#"{"uniqueId":"P-9","pricing":{}}"#).unwrap();
        assert_eq!(p.unique_id, "P-9");
        assert_eq!(p.reservation.weekly_schedule, [false; 7]);
    }

    #[test]
    fn setting_same_status_only_refreshes_modified_date() {
        let mut p = Proposal::from_value_at(
            &json!({ "uniqueId": "P-1", "status": "Host Review", "modifiedDate": "2026-01-20" }),
            at("2026-01-01"),
        );
        let before = p.clone();

        p.set_status(ProposalStatus::HostReview, at("2026-01-25"))
            .unwrap();

        assert_eq!(p.modified_date, at("2026-01-25"));
        let mut expected = before;
        expected.modified_date = at("2026-01-25");
        assert_eq!(p, expected);
    }

    #[test]
    fn modified_date_never_moves_backwards() {
        let mut p = Proposal::from_value(&json!({ "modifiedDate": "2026-01-20" }));
        p.set_status(ProposalStatus::RejectedByHost, at("2026-01-10"))
            .unwrap();
        assert_eq!(p.status, ProposalStatus::RejectedByHost);
        assert_eq!(p.modified_date, at("2026-01-20"));
    }

    #[test]
    fn cancelling_twice_stays_cancelled_and_refreshes_timestamp() {
        let yes = CancelConfirmation::from_answer("yes").unwrap();
        let mut p = Proposal::from_value(&json!({ "status": "Host Review", "modifiedDate": "2026-01-20" }));

        p.cancel(yes, at("2026-01-21"));
        assert_eq!(p.status, ProposalStatus::CancelledByOperator);
        assert_eq!(p.modified_date, at("2026-01-21"));

        p.cancel(yes, at("2026-01-22"));
        assert_eq!(p.status, ProposalStatus::CancelledByOperator);
        assert_eq!(p.modified_date, at("2026-01-22"));
        assert!(p.is_cancelled());
    }

    #[test]
    fn apply_terms_keeps_locked_pricing() {
        let mut p = Proposal::from_value(&json!({
            "pricing": { "initialPayment": 4030 },
            "reservation": { "reservationSpanWeeks": 4 }
        }));
        let update = ProposalUpdate {
            reservation_span_weeks: Some(8),
            strict_move_in: Some(true),
            ..ProposalUpdate::default()
        };

        p.apply_terms(&update, Utc::now());

        assert_eq!(p.reservation.reservation_span_weeks, 8);
        assert!(p.reservation.strict_move_in);
        assert_eq!(p.pricing.initial_payment, 4030.0);
    }

    #[test]
    fn full_names_skip_missing_parts() {
        let p = Proposal::from_value(&json!({ "guest": { "firstName": "Emily" } }));
        assert_eq!(p.guest.full_name(), "Emily");
    }
}
