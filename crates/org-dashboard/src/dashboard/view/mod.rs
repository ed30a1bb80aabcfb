mod projection;
pub mod views;

pub use projection::project;
pub use views::{
    DashboardView, DepartmentDrilldown, ManagerDrilldown, ProjectRowView, Statistics,
};
