use super::super::aggregate::{
    DepartmentSummary, ManagerDirectoryEntry, ManagerSummary, StatusSummary,
};
use super::super::dataset::{ProjectRecord, ProjectStatus, ScoreBand};
use super::super::filter::{Drilldown, ScoreRange};
use chrono::NaiveDate;
use serde::Serialize;

/// Placeholder shown instead of an average when no project matches.
pub const NO_DATA_PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRowView {
    pub department: String,
    pub manager: String,
    pub project_name: String,
    pub start_date: NaiveDate,
    pub status: ProjectStatus,
    pub status_label: &'static str,
    pub score: u8,
    pub score_band: ScoreBand,
}

impl ProjectRecord {
    pub fn to_view(&self) -> ProjectRowView {
        ProjectRowView {
            department: self.department.clone(),
            manager: self.manager.clone(),
            project_name: self.project_name.clone(),
            start_date: self.start_date,
            status: self.status,
            status_label: self.status.label(),
            score: self.score,
            score_band: self.score_band(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentDrilldown {
    pub department: String,
    pub managers: Vec<ManagerSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagerDrilldown {
    pub department: String,
    pub manager: String,
    pub projects: Vec<ProjectRowView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total_projects: usize,
    /// `None` when no project falls inside the score range.
    pub avg_score: Option<f64>,
    pub department_count: usize,
    pub manager_count: usize,
}

impl Statistics {
    pub fn avg_score_label(&self) -> String {
        match self.avg_score {
            Some(avg) => format!("{avg:.1}"),
            None => NO_DATA_PLACEHOLDER.to_string(),
        }
    }
}

/// Everything the presentation layer needs to render one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub score_range: ScoreRange,
    pub range_label: String,
    pub drilldown: Drilldown,
    pub statistics: Statistics,
    pub overview_rows: Vec<ProjectRowView>,
    pub department_summaries: Vec<DepartmentSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_drilldown: Option<DepartmentDrilldown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_drilldown: Option<ManagerDrilldown>,
    pub department_hint: String,
    pub manager_hint: String,
    pub status_summary: Vec<StatusSummary>,
    pub manager_directory: Vec<ManagerDirectoryEntry>,
}
