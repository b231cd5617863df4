// src/domain/query.rs

use crate::domain::fields::parse_timestamp_str;
use crate::domain::logic::ProposalStatus;
use crate::domain::proposal::Proposal;
use crate::params::Params;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// Filter and sort specification for the proposals list.
/// Every field is optional; `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProposalStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposal_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("unknown proposal status '{0}'")]
    UnknownStatus(String),
    #[error("invalid date '{0}'")]
    InvalidDate(String),
    #[error("invalid sort direction '{0}'")]
    InvalidSort(String),
}

/// Return the proposals matching every filter, ordered by `sort_direction`
/// when one is set and by input order otherwise. Ties keep input order.
pub fn query(records: &[Proposal], filters: &ProposalFilters) -> Vec<Proposal> {
    let mut results: Vec<Proposal> = records
        .iter()
        .filter(|p| filters.matches(p))
        .cloned()
        .collect();

    if let Some(direction) = filters.sort_direction {
        results.sort_by(|a, b| {
            let order = a.modified_date.cmp(&b.modified_date);
            match direction {
                SortDirection::Asc => order,
                SortDirection::Desc => order.reverse(),
            }
        });
    }

    results
}

impl ProposalFilters {
    /// Console defaults: newest first, nothing else constrained.
    pub fn console_default() -> Self {
        Self {
            sort_direction: Some(SortDirection::Desc),
            ..Self::default()
        }
    }

    pub fn matches(&self, p: &Proposal) -> bool {
        if let Some(term) = search_term(&self.guest_search) {
            let g = &p.guest;
            if !any_contains(&[&g.first_name, &g.last_name, &g.email, &g.phone_number], &term) {
                return false;
            }
        }
        if let Some(term) = search_term(&self.host_search) {
            let h = &p.host;
            if !any_contains(&[&h.first_name, &h.last_name, &h.email, &h.phone_number], &term) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if p.status != status {
                return false;
            }
        }
        if let Some(id) = self.proposal_id.as_deref().map(str::trim) {
            if !id.is_empty() && !p.unique_id.contains(id) {
                return false;
            }
        }
        if let Some(term) = search_term(&self.listing_search) {
            let l = &p.listing;
            if !any_contains(&[&l.name, &l.unique_id, &l.rental_type], &term) {
                return false;
            }
        }
        if let Some(start) = self.start_date {
            if p.modified_date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if p.modified_date > end {
                return false;
            }
        }
        true
    }

    /// Build filters from list-page query parameters.
    ///
    /// `proposal` is accepted as an alias for `proposalId` so that deep links
    /// can pre-seed the id filter. A missing `sortDirection` falls back to
    /// newest-first; an empty one means unsorted. A date-only `endDate`
    /// covers the whole of that day.
    pub fn from_params(params: &Params) -> Result<Self, FilterError> {
        let text = |key: &str| params.get(key).map(str::to_string);

        let status = match params.get("status") {
            None => None,
            Some(label) => Some(
                ProposalStatus::from_label(label)
                    .ok_or_else(|| FilterError::UnknownStatus(label.to_string()))?,
            ),
        };

        let sort_direction = match params.raw("sortDirection") {
            None => Some(SortDirection::Desc),
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => Some(
                SortDirection::parse(raw).ok_or_else(|| FilterError::InvalidSort(raw.to_string()))?,
            ),
        };

        Ok(Self {
            guest_search: text("guestSearch"),
            host_search: text("hostSearch"),
            status,
            proposal_id: text("proposalId").or_else(|| text("proposal")),
            listing_search: text("listingSearch"),
            start_date: params.get("startDate").map(parse_start).transpose()?,
            end_date: params.get("endDate").map(parse_end).transpose()?,
            sort_direction,
        })
    }

    /// Inverse of [`ProposalFilters::from_params`], for links and redirects.
    pub fn to_params(&self) -> Params {
        let mut params = Params::default();
        let texts = [
            ("guestSearch", &self.guest_search),
            ("hostSearch", &self.host_search),
            ("proposalId", &self.proposal_id),
            ("listingSearch", &self.listing_search),
        ];
        for (key, value) in texts {
            if let Some(v) = value {
                params.push(key, v.as_str());
            }
        }
        if let Some(status) = self.status {
            params.push("status", status.label());
        }
        if let Some(start) = self.start_date {
            params.push("startDate", start.to_rfc3339_opts(SecondsFormat::Millis, true));
        }
        if let Some(end) = self.end_date {
            params.push("endDate", end.to_rfc3339_opts(SecondsFormat::Millis, true));
        }
        params.push(
            "sortDirection",
            self.sort_direction.map(|d| d.as_str()).unwrap_or(""),
        );
        params
    }

    pub fn is_filtering(&self) -> bool {
        let cleared = Self {
            sort_direction: self.sort_direction,
            ..Self::default()
        };
        *self != cleared
    }
}

fn search_term(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

fn any_contains(fields: &[&String], lowered_term: &str) -> bool {
    fields
        .iter()
        .any(|f| f.to_lowercase().contains(lowered_term))
}

fn parse_start(raw: &str) -> Result<DateTime<Utc>, FilterError> {
    parse_timestamp_str(raw).ok_or_else(|| FilterError::InvalidDate(raw.to_string()))
}

fn parse_end(raw: &str) -> Result<DateTime<Utc>, FilterError> {
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return day
            .and_hms_milli_opt(23, 59, 59, 999)
            .map(|dt| dt.and_utc())
            .ok_or_else(|| FilterError::InvalidDate(raw.to_string()));
    }
    parse_start(raw)
}
