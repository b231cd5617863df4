use crate::console::Console;
use crate::domain::ProposalStatus;
use crate::errors::ServerError;
use crate::params::Params;
use crate::router::handle;
use crate::tests::utils::{get, location, post_form, MockApi};

fn form(pairs: &[(&str, &str)]) -> String {
    Params::from_pairs(pairs.iter().copied()).to_query_string()
}

#[test]
fn status_change_redirects_back_with_a_notice() {
    let console = Console::with_fixtures();
    let body = form(&[
        ("status", "Proposal Rejected by Host"),
        ("return_to", "/proposals?guestSearch=emily&notice=old&level=error"),
    ]);

    let resp = handle(post_form("/proposals/PROP-2026-001/status", &body), &console).unwrap();

    assert_eq!(resp.status(), 302);
    let target = location(&resp);
    assert!(target.starts_with("/proposals?guestSearch=emily&notice="));
    assert!(target.ends_with("level=success"));
    assert!(!target.contains("old"));
    assert_eq!(
        console.proposal("PROP-2026-001").unwrap().status,
        ProposalStatus::RejectedByHost
    );
}

#[test]
fn empty_label_clears_the_status() {
    let console = Console::with_fixtures();
    let body = form(&[("status", "")]);

    let resp = handle(post_form("/proposals/PROP-2026-002/status", &body), &console).unwrap();

    assert_eq!(resp.status(), 302);
    assert_eq!(
        console.proposal("PROP-2026-002").unwrap().status,
        ProposalStatus::Unset
    );
}

#[test]
fn unknown_status_label_is_a_bad_request() {
    let console = Console::with_fixtures();
    let body = form(&[("status", "Almost Done")]);

    let err = handle(post_form("/proposals/PROP-2026-001/status", &body), &console).unwrap_err();

    assert!(matches!(err, ServerError::BadRequest(_)));
    assert_eq!(
        console.proposal("PROP-2026-001").unwrap().status,
        ProposalStatus::HostReview
    );
}

#[test]
fn failed_update_turns_into_an_error_notice() {
    let console = Console::with_fixtures();
    let body = form(&[("status", "Host Review")]);

    let resp = handle(post_form("/proposals/PROP-9999/status", &body), &console).unwrap();

    assert_eq!(resp.status(), 302);
    assert!(location(&resp).ends_with("level=error"));
}

#[test]
fn offsite_return_targets_fall_back_to_the_list() {
    let console = Console::with_fixtures();
    let body = form(&[("status", "Host Review"), ("return_to", "//evil.example.com/")]);

    let resp = handle(post_form("/proposals/PROP-2026-001/status", &body), &console).unwrap();

    assert!(location(&resp).starts_with("/proposals?notice="));
}

#[test]
fn terms_form_updates_schedule_and_span() {
    let console = Console::with_fixtures();
    let body = form(&[
        ("weeks", "10"),
        ("moveIn", "2026-04-01"),
        ("schedule", "1"),
        ("day", "1"),
        ("day", "2"),
        ("strictMoveIn", "on"),
    ]);

    let resp = handle(post_form("/proposals/PROP-2026-001/terms", &body), &console).unwrap();

    assert_eq!(resp.status(), 302);
    assert!(location(&resp).ends_with("level=success"));
    let r = console.proposal("PROP-2026-001").unwrap().reservation;
    assert_eq!(r.reservation_span_weeks, 10);
    assert_eq!(r.weekly_schedule, [false, true, true, false, false, false, false]);
    assert!(r.strict_move_in);
    assert!(!r.is_full_time);
    assert_eq!(r.move_in_date.map(|d| d.to_string()).as_deref(), Some("2026-04-01"));
}

#[test]
fn empty_terms_form_changes_nothing() {
    let console = Console::with_fixtures();
    let before = console.proposal("PROP-2026-001").unwrap();

    let resp = handle(post_form("/proposals/PROP-2026-001/terms", ""), &console).unwrap();

    assert!(location(&resp).ends_with("level=info"));
    assert_eq!(console.proposal("PROP-2026-001").unwrap(), before);
}

#[test]
fn bad_terms_are_rejected() {
    let console = Console::with_fixtures();
    let err = handle(
        post_form("/proposals/PROP-2026-001/terms", "weeks=many"),
        &console,
    )
    .unwrap_err();
    assert_eq!(err.status(), 400);
}

#[test]
fn terms_span_is_bounded() {
    let console = Console::with_fixtures();
    for weeks in ["0", "521", "700000000"] {
        let err = handle(
            post_form("/proposals/PROP-2026-001/terms", &form(&[("weeks", weeks)])),
            &console,
        )
        .unwrap_err();
        assert_eq!(err.status(), 400, "weeks={weeks}");
    }
    assert_eq!(
        console.proposal("PROP-2026-001").unwrap().reservation.reservation_span_weeks,
        4
    );

    let resp = handle(
        post_form("/proposals/PROP-2026-001/terms", "weeks=520"),
        &console,
    )
    .unwrap();
    assert!(location(&resp).ends_with("level=success"));
}

#[test]
fn reminders_name_the_recipient() {
    let console = Console::with_fixtures();
    handle(get("/proposals"), &console).unwrap();

    let resp = handle(post_form("/proposals/PROP-2026-001/remind-guest", ""), &console).unwrap();
    assert!(location(&resp).contains("Reminder+sent+to+Emily+Rodriguez"));

    let resp = handle(post_form("/proposals/PROP-2026-001/remind-host", ""), &console).unwrap();
    assert!(location(&resp).contains("Reminder+sent+to+Michael+Chen"));
}

#[test]
fn uncached_reminder_is_named_by_id() {
    let console = Console::with_fixtures();

    let resp = handle(post_form("/proposals/PROP-2026-001/remind-host", ""), &console).unwrap();

    let target = location(&resp);
    assert!(target.contains("Reminder+sent+to+proposal+PROP-2026-001"));
    assert!(target.ends_with("level=success"));
}

#[test]
fn reminder_for_unknown_proposal_is_an_error_notice() {
    let console = Console::with_fixtures();

    let resp = handle(post_form("/proposals/PROP-0000/remind-guest", ""), &console).unwrap();

    assert_eq!(resp.status(), 302);
    assert!(location(&resp).ends_with("level=error"));
}

#[test]
fn remote_reminder_is_a_single_call() {
    let api = MockApi::start(|_, _| (200, String::new()));
    let console = api.console();

    let resp = handle(post_form("/proposals/a%2Fb/remind-guest", ""), &console).unwrap();

    assert!(location(&resp).ends_with("level=success"));
    let seen = api.requests();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, "POST");
    assert_eq!(seen[0].path, "/api/proposals/a%2Fb/remind-guest");
}
