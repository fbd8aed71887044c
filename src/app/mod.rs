pub mod ecosort_app;
pub mod views;

pub use ecosort_app::EcoSortApp;
