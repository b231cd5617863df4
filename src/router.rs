use crate::console::{Console, ConsoleError};
use crate::domain::{query, CancelConfirmation, ProposalFilters, ProposalStatus, ProposalUpdate};
use crate::errors::ServerError;
use crate::params::{decode_segment, Params};
use crate::responses::{html_response, redirect, ResultResp};
use crate::templates::components::Notice;
use crate::templates::pages::{
    cancel_page, created_page, proposals_page, wizard_page, ProposalsVm, WizardVm,
};
use crate::wizard::{parse_span, schedule_from_params, WizardForm, WizardStep};
use astra::Request;
use chrono::NaiveDate;
use std::io::Read;

const LIST_PATH: &str = "/proposals";

pub fn handle(mut req: Request, console: &Console) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let params = Params::parse(req.uri().query().unwrap_or(""));
    let decoded: Vec<String> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(decode_segment)
        .collect();
    let segments: Vec<&str> = decoded.iter().map(String::as_str).collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", [] | ["proposals"] | ["_proposal-manage"]) => list(console, &params),
        ("GET", ["proposals", "new"]) => wizard(console, &params),
        ("POST", ["proposals"]) => create(console, &read_form(&mut req)?),
        ("GET", ["proposals", id, "cancel"]) => confirm_cancel(console, id, &params),
        ("POST", ["proposals", id, "cancel"]) => cancel(console, id, &read_form(&mut req)?),
        ("POST", ["proposals", id, "status"]) => change_status(console, id, &read_form(&mut req)?),
        ("POST", ["proposals", id, "terms"]) => update_terms(console, id, &read_form(&mut req)?),
        ("POST", ["proposals", id, "remind-guest"]) => remind(console, id, Party::Guest, &read_form(&mut req)?),
        ("POST", ["proposals", id, "remind-host"]) => remind(console, id, Party::Host, &read_form(&mut req)?),
        _ => Err(ServerError::NotFound),
    }
}

fn read_form(req: &mut Request) -> Result<Params, ServerError> {
    let mut raw = String::new();
    req.body_mut()
        .reader()
        .read_to_string(&mut raw)
        .map_err(|e| ServerError::BadRequest(format!("unreadable form body: {e}")))?;
    Ok(Params::parse(&raw))
}

fn bad_request(err: impl std::fmt::Display) -> ServerError {
    ServerError::BadRequest(err.to_string())
}

/// Only same-site paths are accepted as redirect targets.
fn return_target(params: &Params) -> String {
    match params.get("return_to") {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
        _ => LIST_PATH.to_string(),
    }
}

/// Back to `target` with `notice` replacing any notice it already carried.
fn redirect_with(target: &str, notice: &Notice) -> ResultResp {
    let (path, query) = target.split_once('?').unwrap_or((target, ""));
    let mut params = Params::parse(query).without(&["notice", "level"]);
    notice.push_into(&mut params);
    redirect(&format!("{path}?{}", params.to_query_string()))
}

fn list_url(filters: &ProposalFilters) -> String {
    format!("{LIST_PATH}?{}", filters.to_params().to_query_string())
}

fn list(console: &Console, params: &Params) -> ResultResp {
    let filters = ProposalFilters::from_params(params).map_err(bad_request)?;
    let mut notice = Notice::from_params(params);

    let proposals = match console.search(&filters) {
        Ok(outcome) => {
            if !outcome.is_accepted() {
                tracing::debug!("rendering a superseded search");
            }
            outcome.into_proposals()
        }
        Err(e) => {
            tracing::error!(error = %e, "proposal search failed");
            notice = Some(Notice::error(format!("Failed to load proposals: {e}")));
            query(&console.view(), &filters)
        }
    };

    let return_to = list_url(&filters);
    html_response(proposals_page(&ProposalsVm {
        filters: &filters,
        proposals: &proposals,
        notice: notice.as_ref(),
        return_to: &return_to,
    }))
}

fn change_status(console: &Console, id: &str, form: &Params) -> ResultResp {
    // The empty label is a real status, so read it raw.
    let label = form
        .raw("status")
        .ok_or_else(|| bad_request("missing status"))?;
    let status = ProposalStatus::from_label(label)
        .ok_or_else(|| bad_request(format!("unknown status '{label}'")))?;

    let notice = match console.change_status(id, status) {
        Ok(_) => Notice::success(format!("Status updated to {}", status.display_label())),
        Err(e) => Notice::error(format!("Failed to update status: {e}")),
    };
    redirect_with(&return_target(form), &notice)
}

fn confirm_cancel(console: &Console, id: &str, params: &Params) -> ResultResp {
    let return_to = return_target(params);
    match console.proposal(id) {
        Ok(proposal) => html_response(cancel_page(&proposal, &return_to)),
        Err(ConsoleError::Backend(e)) if !e.is_not_found() => {
            redirect_with(&return_to, &Notice::error(format!("Failed to load proposal {id}: {e}")))
        }
        Err(e) => Err(e.into()),
    }
}

fn cancel(console: &Console, id: &str, form: &Params) -> ResultResp {
    let answer = form.get("confirm").unwrap_or_default();
    let notice = match CancelConfirmation::from_answer(answer) {
        None => Notice::info(format!("Proposal {id} was not cancelled")),
        Some(confirmed) => match console.cancel(id, confirmed) {
            Ok(_) => Notice::success(format!("Proposal {id} cancelled")),
            Err(e) => Notice::error(format!("Failed to cancel proposal: {e}")),
        },
    };
    redirect_with(&return_target(form), &notice)
}

/// Reads the terms form. Checkbox fields are only taken when the form says it
/// carried the schedule, since unchecked boxes are never submitted.
fn terms_update(form: &Params) -> Result<ProposalUpdate, ServerError> {
    let mut update = ProposalUpdate {
        reservation_span_weeks: form
            .get("weeks")
            .map(|raw| parse_span(raw, 1).map_err(bad_request))
            .transpose()?,
        move_in_date: form
            .get("moveIn")
            .map(|raw| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| bad_request(format!("invalid move-in date '{raw}'")))
            })
            .transpose()?,
        ..ProposalUpdate::default()
    };
    if form.contains("schedule") {
        let (days, full_time) = schedule_from_params(form).map_err(bad_request)?;
        update.weekly_schedule = Some(days);
        update.is_full_time = Some(full_time);
        update.strict_move_in = Some(form.is_checked("strictMoveIn"));
    }
    Ok(update)
}

fn update_terms(console: &Console, id: &str, form: &Params) -> ResultResp {
    let update = terms_update(form)?;
    let notice = if update.is_empty() {
        Notice::info("Nothing to update")
    } else {
        match console.update_terms(id, &update) {
            Ok(_) => Notice::success(format!("Terms updated for proposal {id}")),
            Err(e) => Notice::error(format!("Failed to update terms: {e}")),
        }
    };
    redirect_with(&return_target(form), &notice)
}

#[derive(Clone, Copy)]
enum Party {
    Guest,
    Host,
}

/// The recipient's name comes from the cached view; an uncached record is
/// named by its id so the reminder stays a single backend call.
fn remind(console: &Console, id: &str, party: Party, form: &Params) -> ResultResp {
    let cached = console.cached(id);
    let (name, sent) = match party {
        Party::Guest => (cached.map(|p| p.guest.full_name()), console.remind_guest(id)),
        Party::Host => (cached.map(|p| p.host.full_name()), console.remind_host(id)),
    };
    let name = name
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| format!("proposal {id}"));
    let notice = match sent {
        Ok(()) => Notice::success(format!("Reminder sent to {name}")),
        Err(e) => Notice::error(format!("Failed to send reminder: {e}")),
    };
    redirect_with(&return_target(form), &notice)
}

/// Lookup failures render the step anyway, with an error notice and no
/// results.
fn wizard(console: &Console, params: &Params) -> ResultResp {
    let parsed = WizardForm::from_params(params).map_err(bad_request)?;
    let mut notice = Notice::from_params(params);
    let mut failed = |e: ConsoleError| {
        tracing::error!(error = %e, "wizard lookup failed");
        notice = Some(Notice::error(format!("Lookup failed: {e}")));
    };

    let form = match parsed.clone().resolve(console) {
        Ok(form) => form,
        Err(e) => {
            failed(e);
            parsed
        }
    };
    let listings = match form.step() {
        WizardStep::PickListing => console
            .search_listings(&form.listing_search)
            .unwrap_or_else(|e| {
                failed(e);
                Vec::new()
            }),
        _ => Vec::new(),
    };
    let users = match form.step() {
        WizardStep::PickGuest => console.search_users(&form.guest_search).unwrap_or_else(|e| {
            failed(e);
            Vec::new()
        }),
        _ => Vec::new(),
    };

    html_response(wizard_page(&WizardVm {
        form: &form,
        listings: &listings,
        users: &users,
        notice: notice.as_ref(),
    }))
}

fn create(console: &Console, body: &Params) -> ResultResp {
    let parsed = WizardForm::from_params(body).map_err(bad_request)?;
    let back = format!("/proposals/new?{}", parsed.to_params().to_query_string());
    let form = match parsed.resolve(console) {
        Ok(form) => form,
        Err(e) => return redirect_with(&back, &Notice::error(format!("Lookup failed: {e}"))),
    };

    let draft = match form.to_draft() {
        Ok(draft) => draft,
        Err(e) => return redirect_with(&back, &Notice::error(e.to_string())),
    };
    match console.create(&draft) {
        Ok(created) => {
            tracing::info!(proposal_id = %created.unique_id, "proposal created");
            html_response(created_page(&created))
        }
        Err(e) => redirect_with(&back, &Notice::error(format!("Failed to create proposal: {e}"))),
    }
}
