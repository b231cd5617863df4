// components/proposal_card.rs
use crate::domain::{Proposal, MAX_SPAN_WEEKS};
use crate::params::{proposal_path, Params};
use crate::templates::components::schedule::{day_checkboxes, schedule_cells};
use crate::templates::format::{format_currency, format_date, format_timestamp};
use maud::{html, Markup};

fn person(
    first: &str,
    last: &str,
    email: &str,
    phone: &str,
    photo: &str,
    tester: bool,
) -> Markup {
    html! {
        div class="user-info" {
            @if !photo.is_empty() {
                img class="profile-photo" src=(photo) alt={ (first) " " (last) };
            }
            div class="user-details" {
                p class="user-name" {
                    (first) " " (last)
                    @if tester {
                        span class="badge usability-tester" { "Usability Tester" }
                    }
                }
                p class="user-contact" { (email) }
                p class="user-contact" { (phone) }
            }
        }
    }
}

fn pricing_item(label: &str, amount: f64) -> Markup {
    html! {
        div class="pricing-item" {
            span class="pricing-label" { (label) }
            span class="pricing-value" { (format_currency(amount)) }
        }
    }
}

fn info_item(label: &str, value: &str) -> Markup {
    html! {
        div class="info-item" {
            span class="info-label" { (label) }
            span class="info-value" { (value) }
        }
    }
}

/// First and last photo of a listing, as the list shows them.
fn photo_pair(photos: &[String]) -> Markup {
    html! {
        @if let Some(first) = photos.first() {
            div class="listing-photos" {
                img class="listing-photo" src=(first) alt="Listing";
                @if photos.len() > 1 {
                    @if let Some(last) = photos.last() {
                        img class="listing-photo" src=(last) alt="Listing";
                    }
                }
            }
        }
    }
}

fn status_form(p: &Proposal, return_to: &str) -> Markup {
    html! {
        form class="status-form" method="post" action=(proposal_path(&p.unique_id, "status")) {
            input type="hidden" name="return_to" value=(return_to);
            select class="status-select" name="status" {
                @for status in p.status.successors() {
                    option value=(status.label()) selected[status == p.status] {
                        (status.display_label())
                    }
                }
            }
            button type="submit" class="btn btn-secondary" { "Update status" }
        }
    }
}

fn terms_form(p: &Proposal, return_to: &str) -> Markup {
    let r = &p.reservation;
    let move_in = r
        .move_in_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();

    html! {
        details class="terms-editor" {
            summary class="btn btn-primary" { "Modify Terms" }
            form method="post" action=(proposal_path(&p.unique_id, "terms")) {
                input type="hidden" name="return_to" value=(return_to);
                label class="form-label" {
                    "Move-in From"
                    input type="date" name="moveIn" value=(move_in);
                }
                label class="form-label" {
                    "Reservation Span (# of Weeks)"
                    input type="number" name="weeks" min="1" max=(MAX_SPAN_WEEKS) value=(r.reservation_span_weeks);
                }
                input type="hidden" name="schedule" value="1";
                (day_checkboxes(&r.weekly_schedule))
                label class="checkbox-label" {
                    input type="checkbox" name="fullTime" checked[r.is_full_time];
                    "Full Time"
                }
                label class="checkbox-label" {
                    input type="checkbox" name="strictMoveIn" checked[r.strict_move_in];
                    "Strict (no negotiation on exact move in)"
                }
                button type="submit" class="btn btn-primary" { "Save terms" }
            }
        }
    }
}

fn action_form(p: &Proposal, action: &str, label: &str, return_to: &str) -> Markup {
    html! {
        form class="inline" method="post" action=(proposal_path(&p.unique_id, action)) {
            input type="hidden" name="return_to" value=(return_to);
            button type="submit" class="btn btn-secondary" { (label) }
        }
    }
}

/// One proposal with its guest, listing, host, pricing, reservation and
/// status sections, followed by the operator actions. `return_to` is the
/// list URL the action forms come back to.
pub fn proposal_card(p: &Proposal, return_to: &str) -> Markup {
    let g = &p.guest;
    let h = &p.host;
    let l = &p.listing;
    let r = &p.reservation;
    let cancel_href = format!(
        "{}?{}",
        proposal_path(&p.unique_id, "cancel"),
        Params::from_pairs([("return_to", return_to)]).to_query_string()
    );
    let listing_href = format!(
        "/_listing-internal?{}",
        Params::from_pairs([("id", l.unique_id.as_str())]).to_query_string()
    );

    html! {
        article class="proposal-item" id=(p.unique_id) {
            div class="proposal-grid" {
                section class="section guest-section" {
                    h3 class="section-title" { "Guest Information" }
                    (person(&g.first_name, &g.last_name, &g.email, &g.phone_number, &g.profile_photo, g.is_usability_tester))
                    @if !g.about_me.is_empty() {
                        div class="guest-bio" {
                            p class="bio-label" { "About:" }
                            p class="bio-text" { (g.about_me) }
                        }
                    }
                }

                section class="section listing-section" {
                    h3 class="section-title" { "Listing Information" }
                    div class="listing-info" {
                        p class="listing-name" { (l.name) }
                        p class="listing-address" { (l.address) }
                        p class="listing-id" { "ID: " (l.unique_id) }
                        (photo_pair(&l.photos))
                    }
                }

                section class="section host-section" {
                    h3 class="section-title" { "Host Information" }
                    (person(&h.first_name, &h.last_name, &h.email, &h.phone_number, &h.profile_photo, h.is_usability_tester))
                }

                section class="section pricing-section" {
                    h3 class="section-title" { "Pricing" }
                    div class="pricing-grid" {
                        (pricing_item("Nightly Price:", p.pricing.nightly_price))
                        (pricing_item("Total Reservation:", p.pricing.total_reservation_price))
                        (pricing_item("Damage Deposit:", l.damage_deposit))
                        (pricing_item("Cleaning Cost:", l.cleaning_cost))
                        (pricing_item("Host Compensation:", p.pricing.host_compensation))
                        (pricing_item("Total Compensation:", p.pricing.total_compensation))
                    }
                }

                section class="section reservation-section" {
                    h3 class="section-title" { "Reservation Details" }
                    div class="reservation-info" {
                        (info_item("Move-in Date:", &format_date(r.move_in_date)))
                        (info_item("Check-in:", &format_date(r.check_in_date)))
                        (info_item("Check-out:", &format_date(r.check_out_date)))
                        (info_item("Reservation Span:", &format!("{} weeks", r.reservation_span_weeks)))
                        div class="weekly-schedule" {
                            span class="info-label" { "Weekly Schedule:" }
                            (schedule_cells(&r.weekly_schedule))
                        }
                    }
                }

                section class="section status-section" {
                    h3 class="section-title" { "Proposal Status" }
                    (status_form(p, return_to))
                    div class="proposal-meta" {
                        p class="meta-item" {
                            span class="meta-label" { "Proposal ID:" }
                            span class="meta-value" { (p.unique_id) }
                        }
                        p class="meta-item" {
                            span class="meta-label" { "Created:" }
                            span class="meta-value" { (format_timestamp(p.created_date)) }
                        }
                        p class="meta-item" {
                            span class="meta-label" { "Modified:" }
                            span class="meta-value" { (format_timestamp(p.modified_date)) }
                        }
                    }
                }

                @if !l.house_rules.is_empty() {
                    section class="section rules-section" {
                        h3 class="section-title" { "House Rules" }
                        ul class="rules-list" {
                            @for rule in &l.house_rules {
                                li class="rule-item" { (rule) }
                            }
                        }
                    }
                }
            }

            div class="action-buttons" {
                a class="btn btn-link" target="_blank" href=(listing_href) {
                    "View listing (internal)"
                }
                (terms_form(p, return_to))
                (action_form(p, "remind-guest", "Send reminder to guest", return_to))
                (action_form(p, "remind-host", "Send reminder to host", return_to))
                a class="btn btn-danger" href=(cancel_href) { "Cancel Proposal by SplitLease" }
            }
        }
    }
}
