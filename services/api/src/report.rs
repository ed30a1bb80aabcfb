use clap::{Args, ValueEnum};
use org_dashboard::config::AppConfig;
use org_dashboard::dashboard::{
    DashboardEvent, DashboardSession, DashboardView, Dataset, ExportFormat, ScoreBand,
};
use org_dashboard::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct SelectionArgs {
    /// Lower score bound (defaults to the configured minimum)
    #[arg(long)]
    pub(crate) low: Option<u8>,
    /// Upper score bound (defaults to the configured maximum)
    #[arg(long)]
    pub(crate) high: Option<u8>,
    /// Drill into a department by name
    #[arg(long)]
    pub(crate) department: Option<String>,
    /// Drill into a manager of the selected department
    #[arg(long, requires = "department")]
    pub(crate) manager: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    #[command(flatten)]
    pub(crate) selection: SelectionArgs,
    /// Include every project inside the score range
    #[arg(long)]
    pub(crate) list_projects: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum FormatArg {
    Xlsx,
    Csv,
}

impl From<FormatArg> for ExportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Xlsx => ExportFormat::Xlsx,
            FormatArg::Csv => ExportFormat::Csv,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    #[command(flatten)]
    pub(crate) selection: SelectionArgs,
    /// Output format
    #[arg(long, value_enum, default_value_t = FormatArg::Xlsx)]
    pub(crate) format: FormatArg,
    /// Directory the file is written to (defaults to the current directory)
    #[arg(long)]
    pub(crate) output_dir: Option<PathBuf>,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let session = build_session(args.selection)?;
    render_dashboard(session.view(), args.list_projects);
    Ok(())
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let session = build_session(args.selection)?;
    let artifact = session.export(args.format.into())?;

    let path = args
        .output_dir
        .unwrap_or_else(|| PathBuf::from("."))
        .join(&artifact.file_name);
    std::fs::write(&path, &artifact.bytes)?;

    println!(
        "Wrote {} project(s) to {}",
        artifact.row_count,
        path.display()
    );
    Ok(())
}

/// Replays the CLI selection as the same events the HTTP shell would send.
pub(crate) fn build_session(selection: SelectionArgs) -> Result<DashboardSession, AppError> {
    let config = AppConfig::load()?;
    let dataset = Dataset::sample()?;
    let mut session = DashboardSession::new(dataset, config.dashboard.score_bounds);
    apply_selection(&mut session, selection)?;
    Ok(session)
}

fn apply_selection(
    session: &mut DashboardSession,
    selection: SelectionArgs,
) -> Result<(), AppError> {
    let SelectionArgs {
        low,
        high,
        department,
        manager,
    } = selection;

    if low.is_some() || high.is_some() {
        let bounds = session.bounds();
        session.handle(DashboardEvent::RangeChanged {
            low: low.unwrap_or(bounds.min),
            high: high.unwrap_or(bounds.max),
        })?;
    }

    if let Some(name) = department {
        session.handle(DashboardEvent::DepartmentClicked { name })?;
    }

    if let Some(manager) = manager {
        let row = session
            .view()
            .department_drilldown
            .as_ref()
            .and_then(|drilldown| {
                drilldown
                    .managers
                    .iter()
                    .position(|summary| summary.manager == manager)
            });
        match row {
            Some(index) => {
                session.handle(DashboardEvent::ManagerRowClicked { index })?;
            }
            None => eprintln!("Manager '{manager}' has no projects in the selected department"),
        }
    }

    Ok(())
}

fn band_marker(band: ScoreBand) -> &'static str {
    match band {
        ScoreBand::High => "+",
        ScoreBand::Medium => "~",
        ScoreBand::Low => "-",
    }
}

pub(crate) fn render_dashboard(view: &DashboardView, list_projects: bool) {
    println!("Organizational project dashboard");
    println!("{}", view.range_label);

    let stats = &view.statistics;
    println!(
        "\nProjects {} | Avg score {} | Departments {} | Managers {}",
        stats.total_projects,
        stats.avg_score_label(),
        stats.department_count,
        stats.manager_count
    );

    if view.department_summaries.is_empty() {
        println!("\nDepartments: no projects in range");
    } else {
        println!("\nDepartments");
        for summary in &view.department_summaries {
            println!(
                "- {}: {} project(s), avg {:.1}",
                summary.department, summary.project_count, summary.avg_score
            );
        }
    }

    match &view.department_drilldown {
        Some(drilldown) => {
            println!("\nManagers in {}", drilldown.department);
            for (row, manager) in drilldown.managers.iter().enumerate() {
                println!(
                    "  [{row}] {}: {} project(s), avg {:.1}",
                    manager.manager, manager.project_count, manager.avg_score
                );
            }
        }
        None => println!("\n{}", view.department_hint),
    }

    match &view.manager_drilldown {
        Some(drilldown) => {
            println!("\n{}", view.manager_hint);
            for project in &drilldown.projects {
                println!(
                    "  {} {} | {} | {} | {}",
                    band_marker(project.score_band),
                    project.score,
                    project.project_name,
                    project.start_date,
                    project.status_label
                );
            }
        }
        None if view.department_drilldown.is_some() => println!("{}", view.manager_hint),
        None => {}
    }

    if list_projects {
        println!("\nProjects in range");
        for project in &view.overview_rows {
            println!(
                "- {} {} | {} | {} | {} | {}",
                band_marker(project.score_band),
                project.score,
                project.department,
                project.manager,
                project.project_name,
                project.status_label
            );
        }
    }

    println!("\nStatus overview");
    for status in &view.status_summary {
        println!("- {}: {}", status.status_label, status.project_count);
    }
}
