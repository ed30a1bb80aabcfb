use super::dataset::Dataset;
use super::export::{self, ExportArtifact, ExportError, ExportFormat};
use super::filter::{FilterController, FilterError, FilterState, ScoreBounds};
use super::view::{project, DashboardView};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Navigation tabs of the dashboard shell. Purely presentational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavTab {
    #[default]
    Overview,
    Projects,
    Tasks,
    Members,
    Settings,
}

impl NavTab {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Overview => "نمای کلی",
            Self::Projects => "پروژه‌ها",
            Self::Tasks => "وضعیت‌ها",
            Self::Members => "مدیران پروژه",
            Self::Settings => "تنظیمات",
        }
    }
}

/// User interactions forwarded by the presentation shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    RangeChanged { low: u8, high: u8 },
    DepartmentClicked { name: String },
    DepartmentCleared,
    /// Row index into the manager table of the last rendered view.
    ManagerRowClicked { index: usize },
    ManagerCleared,
    NavTabSelected { tab: NavTab },
    ExportRequested { format: ExportFormat },
}

#[derive(Debug)]
pub struct EventOutcome {
    pub view: DashboardView,
    pub export: Option<ExportArtifact>,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// One user's dashboard: the dataset, its filter state and the active tab.
#[derive(Debug)]
pub struct DashboardSession {
    dataset: Dataset,
    controller: FilterController,
    active_tab: NavTab,
    last_view: DashboardView,
}

impl DashboardSession {
    pub fn new(dataset: Dataset, bounds: ScoreBounds) -> Self {
        let controller = FilterController::new(bounds);
        let last_view = project(&dataset, controller.state());
        Self {
            dataset,
            controller,
            active_tab: NavTab::default(),
            last_view,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn state(&self) -> &FilterState {
        self.controller.state()
    }

    pub fn bounds(&self) -> ScoreBounds {
        self.controller.bounds()
    }

    pub fn active_tab(&self) -> NavTab {
        self.active_tab
    }

    pub fn view(&self) -> &DashboardView {
        &self.last_view
    }

    /// Applies one event and re-derives the view. `InvalidRange` leaves state untouched.
    pub fn handle(&mut self, event: DashboardEvent) -> Result<EventOutcome, SessionError> {
        debug!(?event, "dashboard event");
        let mut artifact = None;

        match event {
            DashboardEvent::RangeChanged { low, high } => {
                self.controller.set_score_range(low, high)?;
                self.controller.reconcile(&self.dataset);
            }
            DashboardEvent::DepartmentClicked { name } => {
                let rendered = self
                    .last_view
                    .department_summaries
                    .iter()
                    .any(|summary| summary.department == name);
                if rendered {
                    self.controller.select_department(Some(name));
                } else {
                    debug!(department = %name, "ignoring click on department not in last render");
                }
            }
            DashboardEvent::DepartmentCleared => self.controller.select_department(None),
            DashboardEvent::ManagerRowClicked { index } => {
                let manager = self
                    .last_view
                    .department_drilldown
                    .as_ref()
                    .and_then(|drilldown| drilldown.managers.get(index))
                    .map(|summary| summary.manager.clone());
                match manager {
                    Some(manager) => self.controller.select_manager(Some(manager)),
                    None => debug!(index, "ignoring manager row outside last render"),
                }
            }
            DashboardEvent::ManagerCleared => self.controller.select_manager(None),
            DashboardEvent::NavTabSelected { tab } => self.active_tab = tab,
            DashboardEvent::ExportRequested { format } => {
                artifact = Some(self.export(format)?);
            }
        }

        self.last_view = project(&self.dataset, self.controller.state());
        Ok(EventOutcome {
            view: self.last_view.clone(),
            export: artifact,
        })
    }

    pub fn export(&self, format: ExportFormat) -> Result<ExportArtifact, ExportError> {
        let rows = export::export_rows(&self.dataset, self.controller.state());
        let artifact = export::render(format, &rows)?;
        info!(file = %artifact.file_name, rows = artifact.row_count, "export prepared");
        Ok(artifact)
    }
}
