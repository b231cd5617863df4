use crate::console::Console;
use crate::router::handle;
use crate::tests::utils::{body_string, get, location, post_form, MockApi};

const LISTING: &str = "listing=LIST-2026-A101";
const GUEST: &str = "guest=david.kim%40example.com";

#[test]
fn first_step_lists_listings() {
    let console = Console::with_fixtures();

    let resp = handle(get("/proposals/new"), &console).unwrap();

    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Quick Proposal Creation"));
    assert!(body.contains("Modern Downtown Apartment"));
    assert!(body.contains("Select Listing"));
    assert!(!body.contains("Select User"));
}

#[test]
fn listing_search_narrows_the_results() {
    let console = Console::with_fixtures();

    let resp = handle(get("/proposals/new?listingSearch=loft"), &console).unwrap();

    let body = body_string(resp);
    assert!(body.contains("Bright Loft Space"));
    assert!(!body.contains("Modern Downtown Apartment"));
}

#[test]
fn picking_a_listing_moves_to_guest_search() {
    let console = Console::with_fixtures();

    let resp = handle(get(&format!("/proposals/new?{LISTING}")), &console).unwrap();

    let body = body_string(resp);
    assert!(body.contains("Filter by Guest"));
    assert!(body.contains("Select User"));
    assert!(body.contains("David Kim"));
}

#[test]
fn details_step_shows_pricing() {
    let console = Console::with_fixtures();

    let resp = handle(
        get(&format!("/proposals/new?{LISTING}&{GUEST}&weeks=4&fullTime=on")),
        &console,
    )
    .unwrap();

    let body = body_string(resp);
    assert!(body.contains("Tell us about David:"));
    assert!(body.contains("Pricing Summary"));
    assert!(body.contains("$4,030.00"));
    assert!(body.contains("Create Proposal"));
}

#[test]
fn bad_wizard_input_is_rejected() {
    let console = Console::with_fixtures();
    let err = handle(get("/proposals/new?weeks=several"), &console).unwrap_err();
    assert_eq!(err.status(), 400);
}

#[test]
fn creating_shows_confirmation_and_joins_the_list() {
    let console = Console::with_fixtures();
    handle(get("/proposals"), &console).unwrap();

    let resp = handle(
        post_form("/proposals", &format!("{LISTING}&{GUEST}&weeks=4&day=1&day=2&about=Quiet")),
        &console,
    )
    .unwrap();

    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Proposal Created Successfully!"));
    assert!(body.contains("Recently Created Proposal ID:"));
    assert!(body.contains("Go To Create Another Proposal"));

    let created = console
        .view()
        .into_iter()
        .find(|p| p.guest.about_me == "Quiet")
        .expect("created proposal in view");
    assert_eq!(created.listing.unique_id, "LIST-2026-A101");
    assert_eq!(created.reservation.reservation_span_weeks, 4);

    let resp = handle(get("/proposals"), &console).unwrap();
    assert!(body_string(resp).contains("List of Proposals:6 results"));
}

#[test]
fn creating_without_a_guest_returns_to_the_wizard() {
    let console = Console::with_fixtures();

    let resp = handle(post_form("/proposals", LISTING), &console).unwrap();

    assert_eq!(resp.status(), 302);
    let target = location(&resp);
    assert!(target.starts_with("/proposals/new?listing=LIST-2026-A101"));
    assert!(target.ends_with("level=error"));
}

#[test]
fn oversized_span_is_rejected_before_pricing() {
    let console = Console::with_fixtures();

    let err = handle(
        get(&format!("/proposals/new?{LISTING}&{GUEST}&weeks=700000000&fullTime=on")),
        &console,
    )
    .unwrap_err();
    assert_eq!(err.status(), 400);

    let err = handle(
        post_form(
            "/proposals",
            &format!("{LISTING}&{GUEST}&weeks=20000000&day=0&moveIn=2026-03-01"),
        ),
        &console,
    )
    .unwrap_err();
    assert_eq!(err.status(), 400);
    assert_eq!(console.view().len(), 0);
}

#[test]
fn longest_span_still_creates() {
    let console = Console::with_fixtures();

    let resp = handle(
        post_form(
            "/proposals",
            &format!("{LISTING}&{GUEST}&weeks=520&fullTime=on&moveIn=2026-03-01"),
        ),
        &console,
    )
    .unwrap();

    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Proposal Created Successfully!"));
}

#[test]
fn failed_lookups_render_with_an_error_notice() {
    let api = MockApi::start(|_, _| (500, "boom".to_string()));
    let console = api.console();

    let resp = handle(get(&format!("/proposals/new?{LISTING}")), &console).unwrap();

    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("notice-error"));
    assert!(body.contains("Lookup failed"));
}

#[test]
fn failed_lookup_on_create_returns_to_the_wizard() {
    let api = MockApi::start(|_, _| (500, "boom".to_string()));
    let console = api.console();

    let resp = handle(post_form("/proposals", &format!("{LISTING}&{GUEST}")), &console).unwrap();

    assert_eq!(resp.status(), 302);
    let target = location(&resp);
    assert!(target.starts_with("/proposals/new?listing=LIST-2026-A101"));
    assert!(target.ends_with("level=error"));
}
