mod export_tests;
mod listings_tests;
mod status_tests;
