use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MAX_SCORE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    InProgress,
    NearCompletion,
}

impl ProjectStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::InProgress => "در حال انجام",
            Self::NearCompletion => "نزدیک به اتمام",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim() {
            "در حال انجام" | "in_progress" => Some(Self::InProgress),
            "نزدیک به اتمام" | "near_completion" => Some(Self::NearCompletion),
            _ => None,
        }
    }
}

/// Colour band applied to score cells in every project table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    pub const fn for_score(score: u8) -> Self {
        if score >= 85 {
            Self::High
        } else if score >= 70 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRecord {
    pub department: String,
    pub manager: String,
    pub project_name: String,
    pub start_date: NaiveDate,
    pub status: ProjectStatus,
    pub score: u8,
}

impl ProjectRecord {
    pub fn score_band(&self) -> ScoreBand {
        ScoreBand::for_score(self.score)
    }

    fn validate(&self, index: usize) -> Result<(), DatasetIntegrityError> {
        let required = [
            ("department", &self.department),
            ("manager", &self.manager),
            ("project_name", &self.project_name),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DatasetIntegrityError::MissingField { index, field });
            }
        }

        if self.score > MAX_SCORE {
            return Err(DatasetIntegrityError::ScoreOutOfRange {
                index,
                score: self.score,
            });
        }

        Ok(())
    }
}

/// Raw, unvalidated row as it appears in static source data.
#[derive(Debug, Clone, Copy)]
pub struct RawProjectRow {
    pub department: &'static str,
    pub manager: &'static str,
    pub project_name: &'static str,
    pub start_date: &'static str,
    pub status: &'static str,
    pub score: u8,
}

impl RawProjectRow {
    fn parse(&self, index: usize) -> Result<ProjectRecord, DatasetIntegrityError> {
        let start_date = NaiveDate::parse_from_str(self.start_date.trim(), "%Y-%m-%d").map_err(
            |source| DatasetIntegrityError::InvalidDate {
                index,
                value: self.start_date.to_string(),
                source,
            },
        )?;
        let status =
            ProjectStatus::from_label(self.status).ok_or(DatasetIntegrityError::UnknownStatus {
                index,
                value: self.status.to_string(),
            })?;

        Ok(ProjectRecord {
            department: self.department.to_string(),
            manager: self.manager.to_string(),
            project_name: self.project_name.to_string(),
            start_date,
            status,
            score: self.score,
        })
    }
}

/// Immutable, validated collection of projects. Insertion order is display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<ProjectRecord>,
}

impl Dataset {
    pub fn new(records: Vec<ProjectRecord>) -> Result<Self, DatasetIntegrityError> {
        for (index, record) in records.iter().enumerate() {
            record.validate(index)?;
        }
        Ok(Self { records })
    }

    pub fn from_raw(rows: &[RawProjectRow]) -> Result<Self, DatasetIntegrityError> {
        let records = rows
            .iter()
            .enumerate()
            .map(|(index, row)| row.parse(index))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(records)
    }

    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Lowest and highest observed score, `None` for an empty dataset.
    pub fn score_bounds(&self) -> Option<(u8, u8)> {
        let min = self.records.iter().map(|record| record.score).min()?;
        let max = self.records.iter().map(|record| record.score).max()?;
        Some((min, max))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetIntegrityError {
    #[error("record {index} is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },
    #[error("record {index} has score {score} outside 0..=100")]
    ScoreOutOfRange { index: usize, score: u8 },
    #[error("record {index} has unparseable start date '{value}'")]
    InvalidDate {
        index: usize,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("record {index} has unknown status '{value}'")]
    UnknownStatus { index: usize, value: String },
}
