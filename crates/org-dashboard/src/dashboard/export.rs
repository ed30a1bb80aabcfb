use super::aggregate::{
    filter_by_department_and_manager, filter_by_score_range, sort_for_export, RowOrder,
};
use super::dataset::{Dataset, ProjectRecord};
use super::filter::{Drilldown, FilterState};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use serde::{Deserialize, Serialize};
use tracing::info;

const COLUMNS: [&str; 6] = [
    "department",
    "manager",
    "project_name",
    "start_date",
    "status",
    "score",
];

const FILE_STEM: &str = "projects";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }

    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Csv => "text/csv; charset=utf-8",
        }
    }

    pub fn file_name(self) -> String {
        format!("{FILE_STEM}.{}", self.extension())
    }
}

/// A downloadable file produced for one export request.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub row_count: usize,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to build workbook: {0}")]
    Workbook(#[from] XlsxError),
    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush export buffer: {0}")]
    Io(#[from] std::io::Error),
}

/// Rows an export contains for `state`, in export order.
pub fn export_rows(dataset: &Dataset, state: &FilterState) -> Vec<ProjectRecord> {
    let range = state.score_range;
    match &state.drilldown {
        Drilldown::Overview => {
            let mut rows = filter_by_score_range(dataset.records(), range);
            sort_for_export(&mut rows);
            rows
        }
        Drilldown::Department { department } => {
            let mut rows: Vec<ProjectRecord> = filter_by_score_range(dataset.records(), range)
                .into_iter()
                .filter(|row| &row.department == department)
                .collect();
            sort_for_export(&mut rows);
            rows
        }
        Drilldown::Manager {
            department,
            manager,
        } => filter_by_department_and_manager(
            dataset.records(),
            department,
            manager,
            range,
            RowOrder::Export,
        ),
    }
}

pub fn render(format: ExportFormat, rows: &[ProjectRecord]) -> Result<ExportArtifact, ExportError> {
    let bytes = match format {
        ExportFormat::Xlsx => render_xlsx(rows)?,
        ExportFormat::Csv => render_csv(rows)?,
    };

    info!(
        format = format.extension(),
        rows = rows.len(),
        bytes = bytes.len(),
        "project export rendered"
    );

    Ok(ExportArtifact {
        file_name: format.file_name(),
        content_type: format.content_type(),
        row_count: rows.len(),
        bytes,
    })
}

fn render_xlsx(rows: &[ProjectRecord]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(FILE_STEM)?;
    worksheet.set_right_to_left(true);

    for (col, title) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header)?;
    }

    for (index, row) in rows.iter().enumerate() {
        let line = (index + 1) as u32;
        worksheet.write_string(line, 0, row.department.as_str())?;
        worksheet.write_string(line, 1, row.manager.as_str())?;
        worksheet.write_string(line, 2, row.project_name.as_str())?;
        worksheet.write_string(line, 3, row.start_date.format("%Y-%m-%d").to_string())?;
        worksheet.write_string(line, 4, row.status.label())?;
        worksheet.write_number(line, 5, f64::from(row.score))?;
    }

    Ok(workbook.save_to_buffer()?)
}

#[derive(Serialize)]
struct CsvRow<'a> {
    department: &'a str,
    manager: &'a str,
    project_name: &'a str,
    start_date: String,
    status: &'static str,
    score: u8,
}

fn render_csv(rows: &[ProjectRecord]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    if rows.is_empty() {
        writer.write_record(COLUMNS)?;
    }

    for row in rows {
        writer.serialize(CsvRow {
            department: &row.department,
            manager: &row.manager,
            project_name: &row.project_name,
            start_date: row.start_date.format("%Y-%m-%d").to_string(),
            status: row.status.label(),
            score: row.score,
        })?;
    }

    writer.into_inner().map_err(|err| err.into_error().into())
}
