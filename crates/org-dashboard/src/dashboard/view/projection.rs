use super::super::aggregate::{
    filter_by_department_and_manager, filter_by_score_range, mean_one_decimal,
    summarize_by_department, summarize_by_manager, summarize_by_status, summarize_managers,
    RowOrder,
};
use super::super::dataset::{Dataset, ProjectRecord};
use super::super::filter::{FilterState, ScoreRange};
use super::views::{DashboardView, DepartmentDrilldown, ManagerDrilldown, Statistics};
use std::collections::HashSet;

const DEPARTMENT_PROMPT: &str =
    "برای مشاهده مدیران، روی نوار واحد سازمانی در نمودار بالا کلیک کنید.";
const DEPARTMENT_EMPTY: &str = "برای این واحد، داده‌ای ثبت نشده است.";
const MANAGER_PROMPT: &str = "برای مشاهده جزئیات یک مدیر، روی نام او در جدول بالا کلیک کنید.";
const MANAGER_EMPTY: &str = "برای این مدیر در واحد انتخاب‌شده، پروژه فعالی ثبت نشده است.";

/// Derives the full view for `state`. Pure: equal inputs give equal views.
pub fn project(dataset: &Dataset, state: &FilterState) -> DashboardView {
    let range = state.score_range;
    let overview_rows = filter_by_score_range(dataset.records(), range);
    let department_summaries = summarize_by_department(&overview_rows);
    let statistics = statistics(&overview_rows);

    let department_drilldown = state.drilldown.department().and_then(|department| {
        let managers = summarize_by_manager(&overview_rows, department);
        (!managers.is_empty()).then(|| DepartmentDrilldown {
            department: department.to_string(),
            managers,
        })
    });

    let manager_drilldown = match (&department_drilldown, state.drilldown.manager()) {
        (Some(drilldown), Some(manager)) => {
            let projects = filter_by_department_and_manager(
                &overview_rows,
                &drilldown.department,
                manager,
                range,
                RowOrder::Dataset,
            );
            (!projects.is_empty()).then(|| ManagerDrilldown {
                department: drilldown.department.clone(),
                manager: manager.to_string(),
                projects: projects.iter().map(ProjectRecord::to_view).collect(),
            })
        }
        _ => None,
    };

    let department_hint = match (&department_drilldown, state.drilldown.department()) {
        (Some(drilldown), _) => format!(
            "واحد انتخاب‌شده: {}؛ برای مشاهده جزئیات، روی نام مدیر کلیک کنید.",
            drilldown.department
        ),
        (None, Some(_)) => DEPARTMENT_EMPTY.to_string(),
        (None, None) => DEPARTMENT_PROMPT.to_string(),
    };

    let manager_hint = match (&manager_drilldown, state.drilldown.manager()) {
        (Some(drilldown), _) => format!(
            "مدیر انتخاب‌شده: {}؛ تعداد پروژه‌ها: {}",
            drilldown.manager,
            drilldown.projects.len()
        ),
        (None, Some(_)) => MANAGER_EMPTY.to_string(),
        (None, None) => MANAGER_PROMPT.to_string(),
    };

    DashboardView {
        score_range: range,
        range_label: range_label(range),
        drilldown: state.drilldown.clone(),
        statistics,
        overview_rows: overview_rows.iter().map(ProjectRecord::to_view).collect(),
        department_summaries,
        department_drilldown,
        manager_drilldown,
        department_hint,
        manager_hint,
        status_summary: summarize_by_status(dataset.records()),
        manager_directory: summarize_managers(dataset.records()),
    }
}

fn statistics(rows: &[ProjectRecord]) -> Statistics {
    let sum: u64 = rows.iter().map(|row| u64::from(row.score)).sum();
    let departments: HashSet<&str> = rows.iter().map(|row| row.department.as_str()).collect();
    let managers: HashSet<&str> = rows.iter().map(|row| row.manager.as_str()).collect();

    Statistics {
        total_projects: rows.len(),
        avg_score: mean_one_decimal(sum, rows.len() as u64),
        department_count: departments.len(),
        manager_count: managers.len(),
    }
}

fn range_label(range: ScoreRange) -> String {
    format!(
        "نمایش پروژه‌ها با امتیاز بین {} تا {}",
        range.low(),
        range.high()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::filter::Drilldown;

    fn state(low: u8, high: u8, drilldown: Drilldown) -> FilterState {
        FilterState {
            score_range: ScoreRange::new(low, high).expect("valid range"),
            drilldown,
        }
    }

    #[test]
    fn overview_has_no_drilldowns() {
        let dataset = Dataset::sample().expect("sample dataset");
        let view = project(&dataset, &state(60, 100, Drilldown::Overview));
        assert_eq!(view.statistics.total_projects, 16);
        assert_eq!(view.statistics.avg_score, Some(86.6));
        assert_eq!(view.statistics.department_count, 5);
        assert_eq!(view.statistics.manager_count, 10);
        assert!(view.department_drilldown.is_none());
        assert!(view.manager_drilldown.is_none());
        assert_eq!(view.department_hint, DEPARTMENT_PROMPT);
        assert_eq!(view.range_label, "نمایش پروژه‌ها با امتیاز بین 60 تا 100");
    }

    #[test]
    fn empty_range_reports_no_data_sentinel() {
        let dataset = Dataset::sample().expect("sample dataset");
        let view = project(&dataset, &state(60, 70, Drilldown::Overview));
        assert_eq!(view.statistics.total_projects, 0);
        assert_eq!(view.statistics.avg_score, None);
        assert_eq!(view.statistics.avg_score_label(), "—");
        assert_eq!(view.statistics.department_count, 0);
        assert!(view.department_summaries.is_empty());
        assert_eq!(view.status_summary.len(), 2, "status panel ignores the range");
    }

    #[test]
    fn stale_department_selection_hides_section_with_hint() {
        let dataset = Dataset::sample().expect("sample dataset");
        let drilldown = Drilldown::Manager {
            department: "مالی".to_string(),
            manager: "نگار احمدی".to_string(),
        };
        let view = project(&dataset, &state(85, 100, drilldown));
        assert!(view.department_drilldown.is_none());
        assert!(view.manager_drilldown.is_none());
        assert_eq!(view.department_hint, DEPARTMENT_EMPTY);
        assert_eq!(view.manager_hint, MANAGER_EMPTY);
    }

    #[test]
    fn manager_hint_counts_projects() {
        let dataset = Dataset::sample().expect("sample dataset");
        let drilldown = Drilldown::Manager {
            department: "منابع انسانی".to_string(),
            manager: "سارا محمدی".to_string(),
        };
        let view = project(&dataset, &state(60, 100, drilldown));
        let manager = view.manager_drilldown.expect("manager drilldown present");
        assert_eq!(manager.projects.len(), 2);
        assert!(view.manager_hint.contains("سارا محمدی"));
        assert!(view.manager_hint.ends_with('2'));
    }
}
