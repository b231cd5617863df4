pub mod error;
pub mod filter_section;
pub mod notice;
pub mod proposal_card;
pub mod schedule;

pub use error::error_page;
pub use filter_section::filter_section;
pub use notice::{notice_banner, Notice, NoticeLevel};
pub use proposal_card::proposal_card;
pub use schedule::{day_checkboxes, schedule_cells};
