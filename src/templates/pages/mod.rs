pub mod cancel;
pub mod proposals;
pub mod wizard;

pub use cancel::cancel_page;
pub use proposals::{proposals_page, ProposalsVm};
pub use wizard::{created_page, wizard_page, WizardVm};
