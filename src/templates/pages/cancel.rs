use crate::domain::Proposal;
use crate::params::proposal_path;
use crate::templates::desktop_layout;
use maud::{html, Markup};

/// Explicit yes/no step in front of an operator cancellation.
pub fn cancel_page(p: &Proposal, return_to: &str) -> Markup {
    desktop_layout(
        "Cancel proposal",
        html! {
            section class="confirm-cancel" {
                h2 { "Are you sure you want to cancel proposal " (p.unique_id) "?" }
                p {
                    (p.guest.full_name()) " · " (p.listing.name) " · " (p.status.display_label())
                }
                form method="post" action=(proposal_path(&p.unique_id, "cancel")) {
                    input type="hidden" name="return_to" value=(return_to);
                    button type="submit" name="confirm" value="yes" class="btn btn-danger" { "Yes, cancel proposal" }
                    button type="submit" name="confirm" value="no" class="btn btn-secondary" { "No, keep it" }
                }
            }
        },
    )
}
