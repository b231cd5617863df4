use crate::console::Console;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, get};

#[test]
fn list_page_shows_every_sample() {
    let console = Console::with_fixtures();

    let resp = handle(get("/proposals"), &console).expect("Failed to handle request");

    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("List of Proposals:5 results"));
    for id in ["PROP-2026-001", "PROP-2026-003", "PROP-2026-005"] {
        assert!(body.contains(id), "missing {id}");
    }
}

#[test]
fn root_and_legacy_path_render_the_list() {
    let console = Console::with_fixtures();
    for path in ["/", "/_proposal-manage"] {
        let resp = handle(get(path), &console).unwrap();
        assert_eq!(resp.status(), 200);
        assert!(body_string(resp).contains("List of Proposals:5 results"));
    }
}

#[test]
fn proposal_alias_narrows_to_one_record() {
    let console = Console::with_fixtures();

    let resp = handle(get("/proposals?proposal=PROP-2026-003"), &console).unwrap();

    let body = body_string(resp);
    assert!(body.contains("List of Proposals:1 results"));
    assert!(body.contains("PROP-2026-003"));
    assert!(!body.contains("PROP-2026-001"));
}

#[test]
fn no_match_shows_the_empty_state() {
    let console = Console::with_fixtures();

    let resp = handle(get("/proposals?guestSearch=nobody-here"), &console).unwrap();

    let body = body_string(resp);
    assert!(body.contains("List of Proposals:0 results"));
    assert!(body.contains("No proposals found matching your filters."));
}

#[test]
fn notice_from_the_query_is_shown() {
    let console = Console::with_fixtures();

    let resp = handle(get("/proposals?notice=Saved&level=success"), &console).unwrap();

    let body = body_string(resp);
    assert!(body.contains("notice-success"));
    assert!(body.contains("Saved"));
}

#[test]
fn bad_filter_values_are_rejected() {
    let console = Console::with_fixtures();

    let err = handle(get("/proposals?startDate=yesterday"), &console).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));

    let err = handle(get("/proposals?status=Nope"), &console).unwrap_err();
    assert_eq!(err.status(), 400);
}

#[test]
fn unknown_route_is_not_found() {
    let console = Console::with_fixtures();
    let err = handle(get("/campaigns"), &console).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
}
