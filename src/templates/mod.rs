pub mod components;
pub mod format;
pub mod layouts;
pub mod pages;

// Re-exports for convenience
pub use components::{error_page, Notice, NoticeLevel};
pub use layouts::desktop::desktop_layout;
