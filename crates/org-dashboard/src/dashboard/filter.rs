use super::aggregate::{filter_by_department_and_manager, RowOrder};
use super::dataset::{Dataset, ProjectRecord, MAX_SCORE};
use serde::Serialize;
use tracing::debug;

/// Global limits of the score slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBounds {
    pub min: u8,
    pub max: u8,
}

impl ScoreBounds {
    pub const DEFAULT: Self = Self { min: 60, max: 100 };

    pub fn new(min: u8, max: u8) -> Option<Self> {
        (min <= max && max <= MAX_SCORE).then_some(Self { min, max })
    }

    pub fn full_range(self) -> ScoreRange {
        ScoreRange {
            low: self.min,
            high: self.max,
        }
    }

    fn clamp(self, value: u8) -> u8 {
        value.clamp(self.min, self.max)
    }
}

impl Default for ScoreBounds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Inclusive score interval. `low <= high` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreRange {
    low: u8,
    high: u8,
}

impl ScoreRange {
    pub fn new(low: u8, high: u8) -> Result<Self, FilterError> {
        if low > high {
            return Err(FilterError::InvalidRange { low, high });
        }
        Ok(Self { low, high })
    }

    pub const fn low(self) -> u8 {
        self.low
    }

    pub const fn high(self) -> u8 {
        self.high
    }

    pub const fn contains(self, score: u8) -> bool {
        self.low <= score && score <= self.high
    }
}

/// Drill-down selection. A manager can only be selected inside a department.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "level", rename_all = "snake_case")]
pub enum Drilldown {
    #[default]
    Overview,
    Department {
        department: String,
    },
    Manager {
        department: String,
        manager: String,
    },
}

impl Drilldown {
    pub fn department(&self) -> Option<&str> {
        match self {
            Self::Overview => None,
            Self::Department { department } | Self::Manager { department, .. } => {
                Some(department)
            }
        }
    }

    pub fn manager(&self) -> Option<&str> {
        match self {
            Self::Manager { manager, .. } => Some(manager),
            Self::Overview | Self::Department { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub score_range: ScoreRange,
    pub drilldown: Drilldown,
}

impl FilterState {
    pub fn new(score_range: ScoreRange) -> Self {
        Self {
            score_range,
            drilldown: Drilldown::Overview,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("score range {low}..={high} is inverted")]
    InvalidRange { low: u8, high: u8 },
}

/// Sole mutator of [`FilterState`].
#[derive(Debug, Clone)]
pub struct FilterController {
    bounds: ScoreBounds,
    state: FilterState,
}

impl FilterController {
    pub fn new(bounds: ScoreBounds) -> Self {
        Self {
            bounds,
            state: FilterState::new(bounds.full_range()),
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn bounds(&self) -> ScoreBounds {
        self.bounds
    }

    /// Rejects inverted input before clamping into the global bounds.
    pub fn set_score_range(&mut self, low: u8, high: u8) -> Result<ScoreRange, FilterError> {
        ScoreRange::new(low, high)?;
        let range = ScoreRange::new(self.bounds.clamp(low), self.bounds.clamp(high))?;
        self.state.score_range = range;
        Ok(range)
    }

    /// Switching to a different department (or to none) drops the manager.
    pub fn select_department(&mut self, department: Option<String>) {
        self.state.drilldown = match (department, &self.state.drilldown) {
            (None, _) => Drilldown::Overview,
            (Some(department), current) if current.department() == Some(department.as_str()) => {
                return;
            }
            (Some(department), _) => Drilldown::Department { department },
        };
    }

    /// No-op while no department is selected.
    pub fn select_manager(&mut self, manager: Option<String>) {
        let Some(department) = self.state.drilldown.department().map(str::to_string) else {
            debug!("manager selection ignored without a department");
            return;
        };

        self.state.drilldown = match manager {
            Some(manager) => Drilldown::Manager {
                department,
                manager,
            },
            None => Drilldown::Department { department },
        };
    }

    /// Collapses selections that no longer match any row under the current range.
    pub fn reconcile(&mut self, dataset: &Dataset) {
        let range = self.state.score_range;
        let rows = dataset.records();

        let next = match &self.state.drilldown {
            Drilldown::Overview => return,
            Drilldown::Department { department } => {
                if has_rows(rows, department, None, range) {
                    return;
                }
                Drilldown::Overview
            }
            Drilldown::Manager {
                department,
                manager,
            } => {
                if has_rows(rows, department, Some(manager.as_str()), range) {
                    return;
                }
                Drilldown::Overview
            }
        };

        debug!(from = ?self.state.drilldown, to = ?next, "drill-down collapsed on empty selection");
        self.state.drilldown = next;
    }
}

fn has_rows(
    rows: &[ProjectRecord],
    department: &str,
    manager: Option<&str>,
    range: ScoreRange,
) -> bool {
    match manager {
        Some(manager) => {
            !filter_by_department_and_manager(rows, department, manager, range, RowOrder::Dataset)
                .is_empty()
        }
        None => rows
            .iter()
            .any(|row| row.department == department && range.contains(row.score)),
    }
}
