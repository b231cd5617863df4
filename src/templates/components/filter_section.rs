use crate::domain::{ProposalFilters, ProposalStatus, SortDirection};
use chrono::{DateTime, Utc};
use maud::{html, Markup};

fn date_value(at: Option<DateTime<Utc>>) -> String {
    at.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Filter controls for the proposals list. Submits as a GET so the current
/// filters always live in the URL.
pub fn filter_section(filters: &ProposalFilters) -> Markup {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();
    let sort = filters.sort_direction;

    html! {
        form class="filter-section" method="get" action="/proposals" {
            div class="filter-row filter-row-1" {
                div class="filter-item" {
                    input type="text" class="searchbox" name="guestSearch"
                        placeholder="Search Guest Name, email, phone number"
                        value=(text(&filters.guest_search));
                }
                div class="filter-item" {
                    input type="text" class="searchbox" name="hostSearch"
                        placeholder="Search Host Name, email, phone number"
                        value=(text(&filters.host_search));
                }
                div class="filter-item" {
                    select name="status" {
                        option value="" selected[filters.status.is_none()] { "Filter by proposal status" }
                        @for status in ProposalStatus::ALL.iter().filter(|s| **s != ProposalStatus::Unset) {
                            option value=(status.label()) selected[filters.status == Some(*status)] {
                                (status.display_label())
                            }
                        }
                    }
                }
                div class="filter-item sort-section" {
                    label class="filter-label" { "Sort by Proposal Modified Date" }
                    select name="sortDirection" {
                        option value="desc" selected[sort == Some(SortDirection::Desc)] { "Newest first" }
                        option value="asc" selected[sort == Some(SortDirection::Asc)] { "Oldest first" }
                        option value="" selected[sort.is_none()] { "Unsorted" }
                    }
                }
            }
            div class="filter-row filter-row-2" {
                div class="filter-item" {
                    label class="filter-label" { "Filter by Proposal unique ID" }
                    input type="text" class="searchbox" name="proposalId"
                        placeholder="search by ID"
                        value=(text(&filters.proposal_id));
                }
                div class="filter-item" {
                    label class="filter-label" { "Filter by listing (name, rental type, unique id)" }
                    input type="text" class="searchbox" name="listingSearch"
                        placeholder="Search Listing by name, unique id, rental type"
                        value=(text(&filters.listing_search));
                }
            }
            div class="filter-row filter-row-3" {
                div class="filter-item date-range" {
                    label class="filter-label" { "Display Proposal Modified Between Dates:" }
                    input type="date" name="startDate" placeholder="Start date" value=(date_value(filters.start_date));
                    input type="date" name="endDate" placeholder="End date" value=(date_value(filters.end_date));
                }
                div class="filter-item" {
                    button type="submit" class="btn btn-primary" { "Apply" }
                    a class="clear-all-btn" href="/proposals" { "Clear All" }
                }
            }
        }
    }
}
