use crate::errors::ServerError;
use crate::templates::components::error_page;
use astra::{Body, Response, ResponseBuilder};

/// Convert a ServerError into an HTML error page with its status code.
pub fn error_response(err: ServerError) -> Response {
    let status = err.status();
    match &err {
        ServerError::Backend(e) => tracing::error!(error = %e, "backend failure"),
        ServerError::InternalError => tracing::error!("internal error"),
        other => tracing::debug!(error = %other, "request rejected"),
    }

    let page = error_page(status, &err.to_string()).into_string();
    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(page))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
