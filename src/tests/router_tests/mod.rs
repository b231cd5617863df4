mod cancel_tests;
mod list_tests;
mod status_tests;
mod wizard_tests;
