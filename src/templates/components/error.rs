use crate::templates::desktop_layout;
use maud::{html, Markup};

/// Error page body for a failed request.
pub fn error_page(status: u16, message: &str) -> Markup {
    desktop_layout(
        &format!("Error {status}"),
        html! {
            section class="error-page" {
                h1 { "Error " (status) }
                p { (message) }
                p { a href="/proposals" { "← Back to proposals" } }
            }
        },
    )
}
