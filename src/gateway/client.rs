// gateway/client.rs
use crate::backend::ProposalBackend;
use crate::domain::{
    CancelConfirmation, Listing, Proposal, ProposalDraft, ProposalFilters, ProposalStatus,
    ProposalUpdate, User,
};
use crate::gateway::{CredentialProvider, GatewayError};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("proposal-console/", env!("CARGO_PKG_VERSION"));

/// Blocking client for the proposals REST API.
pub struct ProposalGateway {
    client: Client,
    base_url: Url,
    credentials: Arc<dyn CredentialProvider>,
}

impl ProposalGateway {
    pub fn new(
        base_url: Url,
        credentials: Arc<dyn CredentialProvider>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    /// `base_url` joined with percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn send(&self, request: RequestBuilder, what: &str) -> Result<Response, GatewayError> {
        let request = match self.credentials.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().map_err(|e| {
            tracing::error!(error = %e, what, "proposals api unreachable");
            GatewayError::Transport(e)
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::error!(what, "proposals api answered 404");
            return Err(GatewayError::NotFound(what.to_string()));
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            tracing::error!(status = status.as_u16(), what, body = %body, "proposals api call failed");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    fn decode<T: DeserializeOwned>(response: Response, what: &str) -> Result<T, GatewayError> {
        let body = response.text()?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, what, "undecodable proposals api response");
            GatewayError::Decode(e.to_string())
        })
    }

    fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<T, GatewayError> {
        let response = self.send(request, what)?;
        Self::decode(response, what)
    }
}

impl ProposalBackend for ProposalGateway {
    fn search_proposals(&self, filters: &ProposalFilters) -> Result<Vec<Proposal>, GatewayError> {
        let mut url = self.endpoint(&["proposals", "search"]);
        url.set_query(Some(&filters.to_params().to_query_string()));

        let found: Vec<Proposal> = self.fetch(self.client.get(url), "proposal search")?;
        tracing::debug!(count = found.len(), "proposal search answered");
        Ok(found)
    }

    fn get_proposal(&self, id: &str) -> Result<Proposal, GatewayError> {
        let url = self.endpoint(&["proposals", id]);
        self.fetch(self.client.get(url), &format!("proposal {id}"))
    }

    fn create_proposal(&self, draft: &ProposalDraft) -> Result<Proposal, GatewayError> {
        let url = self.endpoint(&["proposals"]);
        let created: Proposal = self.fetch(self.client.post(url).json(draft), "proposal creation")?;
        tracing::info!(proposal_id = %created.unique_id, "proposal created");
        Ok(created)
    }

    fn update_status(&self, id: &str, status: ProposalStatus) -> Result<Proposal, GatewayError> {
        let url = self.endpoint(&["proposals", id, "status"]);
        let body = json!({ "status": status });
        self.fetch(self.client.patch(url).json(&body), &format!("proposal {id}"))
    }

    fn update_proposal(
        &self,
        id: &str,
        update: &ProposalUpdate,
    ) -> Result<Proposal, GatewayError> {
        let url = self.endpoint(&["proposals", id]);
        self.fetch(self.client.patch(url).json(update), &format!("proposal {id}"))
    }

    fn cancel_proposal(
        &self,
        id: &str,
        reason: &str,
        _confirmed: CancelConfirmation,
    ) -> Result<Proposal, GatewayError> {
        let url = self.endpoint(&["proposals", id, "cancel"]);
        let body = json!({ "reason": reason });
        self.fetch(self.client.post(url).json(&body), &format!("proposal {id}"))
    }

    fn remind_guest(&self, id: &str) -> Result<(), GatewayError> {
        let url = self.endpoint(&["proposals", id, "remind-guest"]);
        self.send(self.client.post(url), &format!("proposal {id}"))?;
        Ok(())
    }

    fn remind_host(&self, id: &str) -> Result<(), GatewayError> {
        let url = self.endpoint(&["proposals", id, "remind-host"]);
        self.send(self.client.post(url), &format!("proposal {id}"))?;
        Ok(())
    }

    fn search_listings(&self, term: &str) -> Result<Vec<Listing>, GatewayError> {
        let mut url = self.endpoint(&["listings", "search"]);
        url.query_pairs_mut().append_pair("q", term);
        self.fetch(self.client.get(url), "listing search")
    }

    fn search_users(&self, term: &str) -> Result<Vec<User>, GatewayError> {
        let mut url = self.endpoint(&["users", "search"]);
        url.query_pairs_mut().append_pair("q", term);
        self.fetch(self.client.get(url), "user search")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::StaticToken;
    use crate::tests::utils::MockApi;
    use serde_json::json;

    fn gateway(api: &MockApi, token: Option<&str>) -> ProposalGateway {
        ProposalGateway::new(
            api.base_url(),
            Arc::new(StaticToken::new(token.map(str::to_string))),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn search_sends_filters_and_bearer_token() {
        let api = MockApi::start(|_, _| {
            (200, json!([{ "uniqueId": "PROP-1", "status": "Host Review" }]).to_string())
        });
        let gw = gateway(&api, Some("secret"));
        let filters = ProposalFilters {
            guest_search: Some("emily".to_string()),
            ..ProposalFilters::console_default()
        };

        let found = gw.search_proposals(&filters).unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].status, ProposalStatus::HostReview);
        let seen = api.requests();
        assert_eq!(seen[0].method, "GET");
        assert_eq!(seen[0].path, "/api/proposals/search");
        assert!(seen[0].query.contains("guestSearch=emily"));
        assert_eq!(seen[0].authorization.as_deref(), Some("Bearer secret"));
    }

    #[test]
    fn no_token_means_no_authorization_header() {
        let api = MockApi::start(|_, _| (200, "[]".to_string()));
        let gw = gateway(&api, None);

        gw.search_users("david").unwrap();

        let seen = api.requests();
        assert_eq!(seen[0].path, "/api/users/search");
        assert_eq!(seen[0].query, "q=david");
        assert_eq!(seen[0].authorization, None);
    }

    #[test]
    fn status_patch_carries_exact_label() {
        let api = MockApi::start(|_, body| {
            let sent: serde_json::Value = serde_json::from_str(body).unwrap_or_default();
            (200, json!({ "uniqueId": "PROP-1", "status": sent["status"] }).to_string())
        });
        let gw = gateway(&api, Some("t"));

        let updated = gw
            .update_status("PROP-1", ProposalStatus::RejectedByHost)
            .unwrap();

        assert_eq!(updated.status, ProposalStatus::RejectedByHost);
        let seen = api.requests();
        assert_eq!(seen[0].method, "PATCH");
        assert_eq!(seen[0].path, "/api/proposals/PROP-1/status");
        assert_eq!(seen[0].body, r#"{"status":"Proposal Rejected by Host"}"#);
    }

    #[test]
    fn cancel_posts_reason() {
        let api = MockApi::start(|_, _| {
            (200, json!({ "uniqueId": "PROP-1", "status": "Proposal Cancelled by Split Lease" }).to_string())
        });
        let gw = gateway(&api, None);
        let yes = CancelConfirmation::from_answer("yes").unwrap();

        let cancelled = gw.cancel_proposal("PROP-1", "Cancelled by admin", yes).unwrap();

        assert!(cancelled.is_cancelled());
        let seen = api.requests();
        assert_eq!(seen[0].path, "/api/proposals/PROP-1/cancel");
        assert_eq!(seen[0].body, r#"{"reason":"Cancelled by admin"}"#);
    }

    #[test]
    fn not_found_and_server_errors_are_distinguished() {
        let api = MockApi::start(|path, _| {
            if path.ends_with("/missing") {
                (404, String::new())
            } else {
                (500, "boom".to_string())
            }
        });
        let gw = gateway(&api, None);

        assert!(gw.get_proposal("missing").unwrap_err().is_not_found());
        match gw.remind_guest("PROP-1") {
            Err(GatewayError::Status { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn garbage_body_is_a_decode_error() {
        let api = MockApi::start(|_, _| (200, "<html>".to_string()));
        let gw = gateway(&api, None);
        assert!(matches!(
            gw.search_listings("loft"),
            Err(GatewayError::Decode(_))
        ));
    }

    #[test]
    fn ids_are_percent_encoded_in_paths() {
        let api = MockApi::start(|_, _| (200, "{}".to_string()));
        let gw = gateway(&api, None);
        gw.get_proposal("a/b").unwrap();
        assert_eq!(api.requests()[0].path, "/api/proposals/a%2Fb");
    }
}
