use org_dashboard::dashboard::{
    project, DashboardEvent, DashboardSession, Dataset, Drilldown, FilterError, FilterState,
    ScoreBounds, ScoreRange, SessionError,
};

const IT: &str = "فناوری اطلاعات";
const FINANCE: &str = "مالی";
const MARKETING: &str = "بازاریابی";

fn session() -> DashboardSession {
    let dataset = Dataset::sample().expect("sample dataset is valid");
    DashboardSession::new(dataset, ScoreBounds::DEFAULT)
}

fn click_department(session: &mut DashboardSession, name: &str) {
    session
        .handle(DashboardEvent::DepartmentClicked {
            name: name.to_string(),
        })
        .expect("department click handled");
}

#[test]
fn narrowed_range_recomputes_overview() {
    let mut session = session();
    let outcome = session
        .handle(DashboardEvent::RangeChanged { low: 85, high: 100 })
        .expect("range accepted");
    let view = outcome.view;

    assert_eq!(view.overview_rows.len(), 11);
    assert!(view
        .overview_rows
        .iter()
        .all(|row| (85..=100).contains(&row.score)));

    let it = view
        .department_summaries
        .iter()
        .find(|summary| summary.department == IT)
        .expect("IT department still present");
    assert_eq!(it.project_count, 3);
    assert_eq!(it.avg_score, 88.7);

    assert!(view
        .department_summaries
        .iter()
        .all(|summary| summary.department != FINANCE));
    let total: usize = view
        .department_summaries
        .iter()
        .map(|summary| summary.project_count)
        .sum();
    assert_eq!(total, view.overview_rows.len());
    assert_eq!(view.statistics.department_count, 4);
}

#[test]
fn marketing_manager_drilldown_lists_projects_in_dataset_order() {
    let mut session = session();
    click_department(&mut session, MARKETING);

    let managers = &session
        .view()
        .department_drilldown
        .as_ref()
        .expect("department drilldown visible")
        .managers;
    let row = managers
        .iter()
        .position(|summary| summary.manager == "الهام صادقی")
        .expect("manager listed");

    let outcome = session
        .handle(DashboardEvent::ManagerRowClicked { index: row })
        .expect("manager click handled");
    let drilldown = outcome.view.manager_drilldown.expect("manager drilldown");
    let scores: Vec<u8> = drilldown.projects.iter().map(|p| p.score).collect();
    assert_eq!(scores, vec![91, 87]);
    assert_eq!(drilldown.projects[0].project_name, "کمپین دیجیتال برندینگ");
}

#[test]
fn narrowing_range_collapses_empty_department() {
    let mut session = session();
    click_department(&mut session, FINANCE);
    session
        .handle(DashboardEvent::ManagerRowClicked { index: 0 })
        .expect("manager click handled");
    assert!(session.view().manager_drilldown.is_some());

    let outcome = session
        .handle(DashboardEvent::RangeChanged { low: 85, high: 100 })
        .expect("range accepted");

    assert!(outcome.view.department_drilldown.is_none());
    assert!(outcome.view.manager_drilldown.is_none());
    assert_eq!(session.state().drilldown, Drilldown::Overview);
    assert_eq!(session.state().drilldown.manager(), None);
}

#[test]
fn valid_selection_survives_range_change() {
    let mut session = session();
    click_department(&mut session, IT);
    session
        .handle(DashboardEvent::ManagerRowClicked { index: 0 })
        .expect("manager click handled");

    let outcome = session
        .handle(DashboardEvent::RangeChanged { low: 90, high: 100 })
        .expect("range accepted");
    let drilldown = outcome.view.manager_drilldown.expect("still selected");
    assert_eq!(drilldown.manager, "علی رضایی");
    let scores: Vec<u8> = drilldown.projects.iter().map(|p| p.score).collect();
    assert_eq!(scores, vec![92]);
}

#[test]
fn manager_losing_rows_collapses_to_overview() {
    let mut session = session();
    click_department(&mut session, IT);
    let maryam = session
        .view()
        .department_drilldown
        .as_ref()
        .and_then(|d| d.managers.iter().position(|m| m.manager == "مریم کریمی"))
        .expect("manager listed");
    session
        .handle(DashboardEvent::ManagerRowClicked { index: maryam })
        .expect("manager click handled");

    let outcome = session
        .handle(DashboardEvent::RangeChanged { low: 88, high: 100 })
        .expect("range accepted");
    assert_eq!(session.state().drilldown, Drilldown::Overview);
    assert!(outcome.view.department_drilldown.is_none());
    assert!(outcome.view.manager_drilldown.is_none());

    // IT still has rows in range; only the explicit click drills back in.
    click_department(&mut session, IT);
    let department = session
        .view()
        .department_drilldown
        .as_ref()
        .expect("department selectable again");
    assert_eq!(department.managers.len(), 1);
}

#[test]
fn reclicking_another_department_replaces_selection() {
    let mut session = session();
    click_department(&mut session, IT);
    session
        .handle(DashboardEvent::ManagerRowClicked { index: 0 })
        .expect("manager click handled");
    click_department(&mut session, MARKETING);

    assert_eq!(
        session.state().drilldown,
        Drilldown::Department {
            department: MARKETING.to_string()
        }
    );
    assert!(session.view().manager_drilldown.is_none());
}

#[test]
fn inverted_range_keeps_previous_state() {
    let mut session = session();
    session
        .handle(DashboardEvent::RangeChanged { low: 80, high: 95 })
        .expect("range accepted");
    let before = session.view().clone();

    let err = session
        .handle(DashboardEvent::RangeChanged { low: 96, high: 81 })
        .expect_err("inverted range rejected");
    assert!(matches!(
        err,
        SessionError::Filter(FilterError::InvalidRange { low: 96, high: 81 })
    ));
    assert_eq!(session.view(), &before);
    assert_eq!(session.state().score_range.low(), 80);
}

#[test]
fn projection_is_idempotent() {
    let dataset = Dataset::sample().expect("sample dataset is valid");
    let state = FilterState {
        score_range: ScoreRange::new(82, 93).expect("valid range"),
        drilldown: Drilldown::Manager {
            department: "منابع انسانی".to_string(),
            manager: "سارا محمدی".to_string(),
        },
    };

    let first = project(&dataset, &state);
    let second = project(&dataset, &state);
    assert_eq!(first, second);
}

#[test]
fn manager_drilldown_never_appears_without_department() {
    let dataset = Dataset::sample().expect("sample dataset is valid");
    for (low, high) in [(60, 100), (80, 90), (85, 100), (95, 100)] {
        let state = FilterState {
            score_range: ScoreRange::new(low, high).expect("valid range"),
            drilldown: Drilldown::Manager {
                department: IT.to_string(),
                manager: "مریم کریمی".to_string(),
            },
        };
        let view = project(&dataset, &state);
        if view.manager_drilldown.is_some() {
            assert!(view.department_drilldown.is_some());
        }
    }
}
