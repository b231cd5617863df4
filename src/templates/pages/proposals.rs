use crate::domain::{Proposal, ProposalFilters};
use crate::templates::components::{filter_section, notice_banner, proposal_card, Notice};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub struct ProposalsVm<'a> {
    pub filters: &'a ProposalFilters,
    pub proposals: &'a [Proposal],
    pub notice: Option<&'a Notice>,
    /// List URL with the current filters, for forms to return to.
    pub return_to: &'a str,
}

pub fn proposals_page(vm: &ProposalsVm) -> Markup {
    desktop_layout(
        "Proposals",
        html! {
            div class="page-header" {
                div class="header-content" {
                    h1 class="page-title" {
                        "Proposals: RG: Proposals's List of Proposals:" (vm.proposals.len()) " results"
                    }
                    div class="header-actions" {
                        a class="btn btn-create-suggested" href="/proposals/new" { "Create Suggested Proposal" }
                        a class="btn btn-relationships" href="/_relationships" { "Go to relationships" }
                    }
                }
            }

            (notice_banner(vm.notice))
            (filter_section(vm.filters))

            div id="proposals-list" class="proposals-section" {
                @if vm.proposals.is_empty() {
                    div class="empty-state" {
                        p { "No proposals found matching your filters." }
                        @if vm.filters.is_filtering() {
                            a class="btn btn-clear" href="/proposals" { "Clear Filters" }
                        }
                    }
                } @else {
                    div class="proposals-list" {
                        @for p in vm.proposals {
                            (proposal_card(p, vm.return_to))
                        }
                    }
                }
            }
        },
    )
}
