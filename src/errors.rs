use crate::console::ConsoleError;
use crate::gateway::GatewayError;
use astra::Response;
use thiserror::Error;
// errors.rs

/// Errors a route handler can end with. The server loop turns each one into
/// an HTML error page with the matching status code.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Backend Error: {0}")]
    Backend(GatewayError),

    #[error("Internal Server Error")]
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Backend(_) => 502,
            ServerError::InternalError => 500,
        }
    }
}

impl From<GatewayError> for ServerError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::NotFound(_) => ServerError::NotFound,
            other => ServerError::Backend(other),
        }
    }
}

impl From<ConsoleError> for ServerError {
    fn from(err: ConsoleError) -> Self {
        match err {
            ConsoleError::Backend(e) => e.into(),
            ConsoleError::Transition(e) => ServerError::BadRequest(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProposalStatus, TransitionError};

    #[test]
    fn backend_errors_map_to_status_codes() {
        let missing: ServerError = GatewayError::NotFound("proposal X".into()).into();
        assert_eq!(missing.status(), 404);

        let down: ServerError = ConsoleError::Backend(GatewayError::Status {
            status: 503,
            body: String::new(),
        })
        .into();
        assert_eq!(down.status(), 502);

        let refused: ServerError = ConsoleError::Transition(TransitionError {
            from: ProposalStatus::HostReview,
            to: ProposalStatus::Unset,
        })
        .into();
        assert_eq!(refused.status(), 400);
    }
}
