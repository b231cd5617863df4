use crate::console::Console;
use crate::domain::ProposalStatus;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, get, location, post_form, MockApi};

#[test]
fn cancel_asks_for_confirmation_first() {
    let console = Console::with_fixtures();

    let resp = handle(
        get("/proposals/PROP-2026-002/cancel?return_to=%2Fproposals%3FsortDirection%3Dasc"),
        &console,
    )
    .unwrap();

    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Are you sure you want to cancel proposal PROP-2026-002?"));
    assert!(body.contains(r#"value="/proposals?sortDirection=asc""#));
    assert_eq!(
        console.proposal("PROP-2026-002").unwrap().status,
        ProposalStatus::SubmittedByGuestAwaitingApplication
    );
}

#[test]
fn declining_leaves_the_proposal_alone() {
    let console = Console::with_fixtures();
    let before = console.proposal("PROP-2026-002").unwrap();

    let resp = handle(
        post_form("/proposals/PROP-2026-002/cancel", "confirm=no"),
        &console,
    )
    .unwrap();

    assert_eq!(resp.status(), 302);
    assert!(location(&resp).ends_with("level=info"));
    assert_eq!(console.proposal("PROP-2026-002").unwrap(), before);
}

#[test]
fn confirming_cancels_as_operator() {
    let console = Console::with_fixtures();

    let resp = handle(
        post_form("/proposals/PROP-2026-002/cancel", "confirm=yes"),
        &console,
    )
    .unwrap();

    assert!(location(&resp).ends_with("level=success"));
    let cancelled = console.proposal("PROP-2026-002").unwrap();
    assert_eq!(cancelled.status, ProposalStatus::CancelledByOperator);
    assert!(cancelled.is_cancelled());
}

#[test]
fn cancelling_an_unknown_proposal_is_not_found() {
    let console = Console::with_fixtures();
    let err = handle(get("/proposals/PROP-0000/cancel"), &console).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
}

#[test]
fn unreachable_backend_on_confirmation_is_an_error_notice() {
    let api = MockApi::start(|_, _| (503, "down".to_string()));
    let console = api.console();

    let resp = handle(
        get("/proposals/PROP-2026-002/cancel?return_to=%2Fproposals%3FsortDirection%3Ddesc"),
        &console,
    )
    .unwrap();

    assert_eq!(resp.status(), 302);
    let target = location(&resp);
    assert!(target.starts_with("/proposals?sortDirection=desc&notice="));
    assert!(target.ends_with("level=error"));
}
