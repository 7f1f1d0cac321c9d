//! Read-only pages. Each one performs its own store read when it is shown
//! and keeps no state once rendered.

pub mod dashboard;
pub mod detail;
pub mod list;
pub mod nav;

pub use dashboard::DashboardView;
pub use detail::{DetailView, MissingReason};
pub use list::{ListState, ListView};
pub use nav::Route;
