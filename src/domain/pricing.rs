// src/domain/pricing.rs

use crate::domain::listing::Listing;
use crate::domain::proposal::Pricing;
use serde::Serialize;

/// Longest reservation span the console accepts, ten years.
pub const MAX_SPAN_WEEKS: u32 = 520;

/// What the calculator needs to price a reservation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingInput {
    pub nightly_price: f64,
    pub reservation_span_weeks: u32,
    /// Sunday first.
    pub weekly_schedule: [bool; 7],
    pub damage_deposit: f64,
    pub cleaning_cost: f64,
}

/// Derived cost breakdown. Amounts are unrounded; presentation rounds to cents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingBreakdown {
    pub nightly_price: f64,
    pub total_nights: u32,
    pub number_of_weeks: u32,
    pub total_reservation_price: f64,
    pub price_per_four_weeks: f64,
    pub security_deposit: f64,
    pub cleaning_cost: f64,
    pub initial_payment: f64,
}

impl PricingInput {
    pub fn for_listing(listing: &Listing, weeks: u32, schedule: [bool; 7]) -> Self {
        Self {
            nightly_price: listing.nightly_price,
            reservation_span_weeks: weeks,
            weekly_schedule: schedule,
            damage_deposit: listing.damage_deposit,
            cleaning_cost: listing.cleaning_cost,
        }
    }
}

/// Price a reservation. Returns `None` while the span is zero weeks (the
/// per-four-weeks rate is undefined until a span is chosen) and when the
/// night count does not fit a `u32`.
pub fn calculate(input: &PricingInput) -> Option<PricingBreakdown> {
    let weeks = input.reservation_span_weeks;
    if weeks == 0 {
        return None;
    }

    let active_days = input.weekly_schedule.iter().filter(|d| **d).count() as u32;
    let total_nights = active_days.checked_mul(weeks)?;
    let total_reservation_price = input.nightly_price * f64::from(total_nights);
    let price_per_four_weeks = (total_reservation_price / f64::from(weeks)) * 4.0;
    let initial_payment = price_per_four_weeks + input.damage_deposit + input.cleaning_cost;

    Some(PricingBreakdown {
        nightly_price: input.nightly_price,
        total_nights,
        number_of_weeks: weeks,
        total_reservation_price,
        price_per_four_weeks,
        security_deposit: input.damage_deposit,
        cleaning_cost: input.cleaning_cost,
        initial_payment,
    })
}

impl PricingBreakdown {
    /// Stored pricing block for a newly created proposal. Compensation
    /// figures are negotiated elsewhere and start at zero.
    pub fn into_pricing(self) -> Pricing {
        Pricing {
            nightly_price: self.nightly_price,
            total_reservation_price: self.total_reservation_price,
            host_compensation: 0.0,
            total_compensation: 0.0,
            price_per_four_weeks: self.price_per_four_weeks,
            initial_payment: self.initial_payment,
            number_of_nights: self.total_nights,
            number_of_weeks: self.number_of_weeks,
            security_deposit: self.security_deposit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(nightly: f64, weeks: u32, schedule: [bool; 7]) -> PricingInput {
        PricingInput {
            nightly_price: nightly,
            reservation_span_weeks: weeks,
            weekly_schedule: schedule,
            damage_deposit: 1500.0,
            cleaning_cost: 150.0,
        }
    }

    #[test]
    fn full_time_four_weeks() {
        let b = calculate(&input(85.0, 4, [true; 7])).unwrap();

        assert_eq!(b.total_nights, 28);
        assert_eq!(b.total_reservation_price, 2380.0);
        assert_eq!(b.price_per_four_weeks, 2380.0);
        assert_eq!(b.initial_payment, 4030.0);
        assert_eq!(b.security_deposit, 1500.0);
    }

    #[test]
    fn weekdays_only_over_twelve_weeks() {
        let weekdays = [false, true, true, true, true, true, false];
        let b = calculate(&input(95.0, 12, weekdays)).unwrap();

        assert_eq!(b.total_nights, 60);
        assert_eq!(b.total_reservation_price, 5700.0);
        assert_eq!(b.price_per_four_weeks, 1900.0);
        assert_eq!(b.initial_payment, 3550.0);
    }

    #[test]
    fn zero_weeks_is_not_computable() {
        assert_eq!(calculate(&input(85.0, 0, [true; 7])), None);
    }

    #[test]
    fn overflowing_night_count_is_not_computable() {
        assert_eq!(calculate(&input(85.0, u32::MAX, [true; 7])), None);
        assert_eq!(calculate(&input(85.0, 700_000_000, [true; 7])), None);
        assert!(calculate(&input(85.0, u32::MAX, [true, false, false, false, false, false, false])).is_some());
    }

    #[test]
    fn empty_schedule_prices_only_deposits() {
        let b = calculate(&input(85.0, 4, [false; 7])).unwrap();
        assert_eq!(b.total_nights, 0);
        assert_eq!(b.price_per_four_weeks, 0.0);
        assert_eq!(b.initial_payment, 1650.0);
    }

    #[test]
    fn breakdown_becomes_stored_pricing() {
        let pricing = calculate(&input(85.0, 4, [true; 7])).unwrap().into_pricing();
        assert_eq!(pricing.number_of_nights, 28);
        assert_eq!(pricing.number_of_weeks, 4);
        assert_eq!(pricing.initial_payment, 4030.0);
        assert_eq!(pricing.host_compensation, 0.0);
    }
}
