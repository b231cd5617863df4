use crate::domain::{Listing, Proposal, ProposalStatus, User, MAX_SPAN_WEEKS};
use crate::params::Params;
use crate::templates::components::{day_checkboxes, notice_banner, Notice};
use crate::templates::desktop_layout;
use crate::templates::format::{format_currency, format_date};
use crate::wizard::{WizardForm, WizardStep};
use maud::{html, Markup};

pub struct WizardVm<'a> {
    pub form: &'a WizardForm,
    pub listings: &'a [Listing],
    pub users: &'a [User],
    pub notice: Option<&'a Notice>,
}

fn wizard_href(params: &Params) -> String {
    format!("/proposals/new?{}", params.to_query_string())
}

/// Hidden inputs carrying every pair of `params`.
fn carry(params: &Params) -> Markup {
    html! {
        @for (key, value) in params.pairs() {
            input type="hidden" name=(key) value=(value);
        }
    }
}

fn step_badge(number: u8, done: bool) -> Markup {
    html! {
        div class="step-badge" {
            @if done { "✓" } @else { (number) }
        }
    }
}

fn photos(listing: &Listing) -> Markup {
    html! {
        @if let Some(first) = listing.photos.first() {
            div class="selected-photos" {
                img class="selected-photo" src=(first) alt="Listing";
                @if listing.photos.len() > 1 {
                    @if let Some(last) = listing.photos.last() {
                        img class="selected-photo" src=(last) alt="Listing";
                    }
                }
            }
        }
    }
}

fn listing_step(vm: &WizardVm) -> Markup {
    let form = vm.form;
    let active = form.step() == WizardStep::PickListing;

    html! {
        div.creation-step.active[active].completed[!active] {
            div class="step-header" {
                (step_badge(1, !active))
                div class="step-content" {
                    label class="step-label" {
                        "Filter by host name, email, listing name, unique id of listing, etc"
                    }
                    @if active {
                        form method="get" action="/proposals/new" {
                            input type="text" class="searchbox" name="listingSearch"
                                placeholder="Search Host Name, email, listing name, unique id, rental type"
                                value=(form.listing_search);
                            button type="submit" class="btn" { "Search" }
                        }
                        ul class="search-results" {
                            @for listing in vm.listings {
                                li class="search-result" {
                                    p class="selected-name" { (listing.name) }
                                    p class="listing-meta" {
                                        (listing.rental_type) " · " (listing.unique_id)
                                        @if let Some(host) = &listing.host {
                                            " · Host: " (host.full_name())
                                        }
                                    }
                                    (photos(listing))
                                    a class="btn btn-select" href=(wizard_href(&Params::from_pairs([("listing", listing.unique_id.as_str())]))) {
                                        "Select Listing"
                                    }
                                }
                            }
                        }
                    }
                    @if let Some(listing) = &form.listing {
                        div class="selected-item" {
                            p class="selected-name" { (listing.name) }
                            (photos(listing))
                        }
                    }
                }
            }
        }
    }
}

fn guest_step(vm: &WizardVm) -> Markup {
    let form = vm.form;
    let active = form.step() == WizardStep::PickGuest;
    let base = form.to_params().without(&["guest", "about", "needForSpace", "specialNeeds"]);
    let picks: Vec<(&User, String)> = vm
        .users
        .iter()
        .map(|user| {
            let mut pick = base.clone();
            pick.push("guest", user.key());
            (user, wizard_href(&pick))
        })
        .collect();

    html! {
        div.creation-step.active[active].completed[!active] {
            div class="step-header" {
                (step_badge(2, !active))
                div class="step-content" {
                    label class="step-label" { "Filter by Guest" }
                    @if active {
                        form method="get" action="/proposals/new" {
                            (carry(&base))
                            input type="text" class="searchbox" name="guestSearch"
                                placeholder="Search Guest Name, email, phone number"
                                value=(form.guest_search);
                            button type="submit" class="btn" { "Search" }
                        }
                        ul class="search-results" {
                            @for (user, href) in &picks {
                                li class="search-result" {
                                    p class="selected-name" { (user.full_name()) }
                                    p class="user-contact" { (user.email) " · " (user.phone_number) }
                                    a class="btn btn-select-user" href=(href) { "Select User" }
                                }
                            }
                        }
                    }
                    @if let Some(guest) = &form.guest {
                        div class="selected-item" {
                            div class="selected-user" {
                                @if !guest.profile_photo.is_empty() {
                                    img class="selected-user-photo" src=(guest.profile_photo) alt="Guest";
                                }
                                p class="selected-name" { (guest.full_name()) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn pricing_summary(form: &WizardForm) -> Markup {
    html! {
        @match form.pricing() {
            Some(p) => {
                div class="pricing-summary" {
                    h3 class="pricing-title" { "Pricing Summary" }
                    div class="pricing-details" {
                        div class="pricing-row" { span { "Price per night:" } span class="price-value" { (format_currency(p.nightly_price)) } }
                        div class="pricing-row" { span { "Number of nights:" } span class="price-value" { (p.total_nights) } }
                        div class="pricing-row" { span { "Number of weeks:" } span class="price-value" { (p.number_of_weeks) } }
                        div class="pricing-row" { span { "Total Reservation Price:" } span class="price-value" { (format_currency(p.total_reservation_price)) } }
                        div class="pricing-row" { span { "Price per 4 weeks:" } span class="price-value" { (format_currency(p.price_per_four_weeks)) } }
                        div class="pricing-row" { span { "Security Deposit:" } span class="price-value" { (format_currency(p.security_deposit)) } }
                        div class="pricing-row" { span { "Cleaning Cost:" } span class="price-value" { (format_currency(p.cleaning_cost)) } }
                        div class="pricing-row total" { span { "Initial Payment:" } span class="price-value" { (format_currency(p.initial_payment)) } }
                    }
                }
            }
            None => {
                p class="pricing-pending" { "Pricing appears once a reservation span is set." }
            }
        }
    }
}

fn details_step(form: &WizardForm) -> Markup {
    let Some(guest) = &form.guest else {
        return html! {};
    };
    let name = &guest.first_name;
    let move_in = form
        .move_in
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let weeks = if form.weeks > 0 { form.weeks.to_string() } else { String::new() };

    html! {
        div class="creation-step active proposal-details" {
            form class="proposal-form" method="post" action="/proposals" {
                @if let Some(id) = &form.listing_id {
                    input type="hidden" name="listing" value=(id);
                }
                @if let Some(key) = &form.guest_key {
                    input type="hidden" name="guest" value=(key);
                }

                div class="form-group" {
                    label class="form-label" { "Tell us about " (name) ":" }
                    textarea class="form-textarea" name="about" rows="3" placeholder="About Me / Bio" {
                        (form.about.as_deref().unwrap_or_default())
                    }
                }
                div class="form-group" {
                    label class="form-label" { "Why does " (name) " want this space?" }
                    textarea class="form-textarea" name="needForSpace" rows="3" placeholder="Need for Space" {
                        (form.need_for_space.as_deref().unwrap_or_default())
                    }
                }
                div class="form-group" {
                    label class="form-label" { "Write " (name) "'s unique requirements" }
                    textarea class="form-textarea" name="specialNeeds" rows="3" placeholder="Special needs" {
                        (form.special_needs.as_deref().unwrap_or_default())
                    }
                }
                div class="form-group" {
                    label class="form-label" { "Proposal status" }
                    select name="status" {
                        @for status in ProposalStatus::ALL {
                            option value=(status.label()) selected[status == form.status] { (status.display_label()) }
                        }
                    }
                }
                div class="form-group" {
                    label class="form-label" { "Move-in From" }
                    input type="date" class="date-picker" name="moveIn" value=(move_in);
                    @if form.move_in.is_some() {
                        span class="date-preview" { (format_date(form.move_in)) }
                    }
                }
                div class="form-group" {
                    label class="form-label" { "Reservation Span (# of Weeks)" }
                    input type="number" class="form-input" name="weeks" min="1" max=(MAX_SPAN_WEEKS) value=(weeks);
                }
                div class="form-group" {
                    label class="form-label" { "Weekly Schedule" }
                    (day_checkboxes(&form.days))
                    label class="checkbox-label" {
                        input type="checkbox" name="fullTime" checked[form.full_time];
                        "Select Full Time"
                    }
                }
                div class="form-group" {
                    label class="checkbox-label" {
                        input type="checkbox" name="strictMoveIn" checked[form.strict_move_in];
                        "Strict (no negotiation on exact move in)"
                    }
                }

                (pricing_summary(form))

                div class="form-actions" {
                    button type="submit" class="btn" formmethod="get" formaction="/proposals/new" { "Update pricing" }
                    button type="submit" class="btn btn-create" { "Create Proposal" }
                }
            }
        }
    }
}

/// Steps 1 to 3 of the creation wizard.
pub fn wizard_page(vm: &WizardVm) -> Markup {
    let step = vm.form.step();
    desktop_layout(
        "Quick Proposal Creation",
        html! {
            div class="quick-proposal-creation" {
                div class="creation-header" {
                    h2 class="creation-title" { "Quick Proposal Creation" }
                    a class="close-btn" href="/proposals" { "✕" }
                }
                (notice_banner(vm.notice))
                (listing_step(vm))
                @if step != WizardStep::PickListing {
                    (guest_step(vm))
                }
                @if step == WizardStep::Details {
                    (details_step(vm.form))
                }
            }
        },
    )
}

/// Step 4: confirmation after a proposal was created.
pub fn created_page(created: &Proposal) -> Markup {
    let in_list = format!(
        "/proposals?{}",
        Params::from_pairs([("proposal", created.unique_id.as_str())]).to_query_string()
    );
    desktop_layout(
        "Proposal created",
        html! {
            div class="creation-step active confirmation" {
                div class="confirmation-content" {
                    div class="success-icon" { "✓" }
                    h3 class="confirmation-title" { "Proposal Created Successfully!" }
                    div class="confirmation-details" {
                        p { strong { "Recently Created Proposal ID:" } " " (created.unique_id) }
                        p { strong { "Initial Payment:" } " " (format_currency(created.pricing.initial_payment)) }
                    }
                    a class="btn" href=(in_list) { "View in list" }
                    a class="btn btn-create-another" href="/proposals/new" { "Go To Create Another Proposal" }
                }
            }
        },
    )
}
