// src/wizard.rs

//! State of the suggested-proposal creation wizard. The whole form travels in
//! query parameters between steps, so every step is a plain GET.

use crate::console::{Console, ConsoleError};
use crate::domain::{
    calculate, Listing, PricingBreakdown, PricingInput, ProposalDraft, ProposalStatus, User,
    MAX_SPAN_WEEKS,
};
use crate::params::Params;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("invalid {field}: '{value}'")]
    InvalidField { field: &'static str, value: String },

    #[error("pick a listing first")]
    MissingListing,

    #[error("pick a guest first")]
    MissingGuest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    PickListing,
    PickGuest,
    Details,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WizardForm {
    pub listing_search: String,
    pub listing_id: Option<String>,
    pub listing: Option<Listing>,
    pub guest_search: String,
    pub guest_key: Option<String>,
    pub guest: Option<User>,
    pub about: Option<String>,
    pub need_for_space: Option<String>,
    pub special_needs: Option<String>,
    pub status: ProposalStatus,
    pub move_in: Option<NaiveDate>,
    pub weeks: u32,
    /// Sunday first.
    pub days: [bool; 7],
    pub strict_move_in: bool,
    pub full_time: bool,
}

impl WizardForm {
    pub fn from_params(params: &Params) -> Result<Self, WizardError> {
        let text = |key: &str| params.get(key).map(str::to_string);

        let status = match params.get("status") {
            None => ProposalStatus::Unset,
            Some(label) => ProposalStatus::from_label(label).ok_or_else(|| invalid("status", label))?,
        };
        let move_in = params
            .get("moveIn")
            .map(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| invalid("move-in date", raw)))
            .transpose()?;
        let weeks = params
            .get("weeks")
            .map(|raw| parse_span(raw, 0))
            .transpose()?
            .unwrap_or(0);

        let (days, full_time) = schedule_from_params(params)?;

        Ok(Self {
            listing_search: text("listingSearch").unwrap_or_default(),
            listing_id: text("listing"),
            listing: None,
            guest_search: text("guestSearch").unwrap_or_default(),
            guest_key: text("guest"),
            guest: None,
            about: text("about"),
            need_for_space: text("needForSpace"),
            special_needs: text("specialNeeds"),
            status,
            move_in,
            weeks,
            days,
            strict_move_in: params.is_checked("strictMoveIn"),
            full_time,
        })
    }

    /// Look up the chosen listing and guest. Bios not yet entered start from
    /// the guest's profile.
    pub fn resolve(mut self, console: &Console) -> Result<Self, ConsoleError> {
        if let Some(id) = &self.listing_id {
            self.listing = console.find_listing(id)?;
        }
        if self.listing.is_some() {
            if let Some(key) = &self.guest_key {
                self.guest = console.find_user(key)?;
            }
        }
        if let Some(guest) = &self.guest {
            let prefill = |entered: &mut Option<String>, profile: &str| {
                if entered.is_none() && !profile.is_empty() {
                    *entered = Some(profile.to_string());
                }
            };
            prefill(&mut self.about, &guest.about_me);
            prefill(&mut self.need_for_space, &guest.need_for_space);
            prefill(&mut self.special_needs, &guest.special_needs);
        }
        Ok(self)
    }

    pub fn step(&self) -> WizardStep {
        match (&self.listing, &self.guest) {
            (None, _) => WizardStep::PickListing,
            (Some(_), None) => WizardStep::PickGuest,
            (Some(_), Some(_)) => WizardStep::Details,
        }
    }

    /// Pricing preview for the current form; `None` until a listing and a
    /// non-zero span are chosen.
    pub fn pricing(&self) -> Option<PricingBreakdown> {
        let listing = self.listing.as_ref()?;
        calculate(&PricingInput::for_listing(listing, self.weeks, self.days))
    }

    pub fn to_draft(&self) -> Result<ProposalDraft, WizardError> {
        let listing = self.listing.clone().ok_or(WizardError::MissingListing)?;
        let guest = self.guest.clone().ok_or(WizardError::MissingGuest)?;

        Ok(ProposalDraft {
            pricing: self.pricing(),
            listing,
            guest,
            guest_about: self.about.clone().unwrap_or_default(),
            guest_need_for_space: self.need_for_space.clone().unwrap_or_default(),
            guest_special_needs: self.special_needs.clone().unwrap_or_default(),
            status: self.status,
            move_in_date: self.move_in,
            reservation_span_weeks: self.weeks,
            weekly_schedule: self.days,
            strict_move_in: self.strict_move_in,
            is_full_time: self.full_time,
        })
    }

    /// Form state as query parameters, minus the per-step search boxes.
    pub fn to_params(&self) -> Params {
        let mut params = Params::default();
        if let Some(id) = &self.listing_id {
            params.push("listing", id.as_str());
        }
        if let Some(key) = &self.guest_key {
            params.push("guest", key.as_str());
        }
        let bios = [
            ("about", &self.about),
            ("needForSpace", &self.need_for_space),
            ("specialNeeds", &self.special_needs),
        ];
        for (key, value) in bios {
            if let Some(v) = value {
                params.push(key, v.as_str());
            }
        }
        if self.status != ProposalStatus::Unset {
            params.push("status", self.status.label());
        }
        if let Some(date) = self.move_in {
            params.push("moveIn", date.format("%Y-%m-%d").to_string());
        }
        if self.weeks > 0 {
            params.push("weeks", self.weeks.to_string());
        }
        for (i, on) in self.days.iter().enumerate() {
            if *on {
                params.push("day", i.to_string());
            }
        }
        if self.strict_move_in {
            params.push("strictMoveIn", "on");
        }
        if self.full_time {
            params.push("fullTime", "on");
        }
        params
    }
}

/// Weekly schedule from repeated `day=<0..6>` pairs. A checked `fullTime`
/// selects every day.
pub fn schedule_from_params(params: &Params) -> Result<([bool; 7], bool), WizardError> {
    if params.is_checked("fullTime") {
        return Ok(([true; 7], true));
    }
    let mut days = [false; 7];
    for raw in params.get_all("day") {
        let index = raw
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|i| *i < 7)
            .ok_or_else(|| invalid("day", raw))?;
        days[index] = true;
    }
    Ok((days, false))
}

/// Reservation span in weeks, between `min` and [`MAX_SPAN_WEEKS`].
pub fn parse_span(raw: &str, min: u32) -> Result<u32, WizardError> {
    raw.parse::<u32>()
        .ok()
        .filter(|weeks| (min..=MAX_SPAN_WEEKS).contains(weeks))
        .ok_or_else(|| invalid("reservation span", raw))
}

fn invalid(field: &'static str, value: &str) -> WizardError {
    WizardError::InvalidField {
        field,
        value: value.to_string(),
    }
}
