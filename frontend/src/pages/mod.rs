pub mod admin;
pub mod dashboard;

pub use admin::AdminPage;
pub use dashboard::DashboardPage;
