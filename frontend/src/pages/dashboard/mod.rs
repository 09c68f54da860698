pub mod components;
pub mod panel;
pub mod repository;
pub mod upload;
pub mod utils;
pub mod view_model;

pub use panel::DashboardPage;
