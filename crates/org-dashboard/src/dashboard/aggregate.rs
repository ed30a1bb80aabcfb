use super::dataset::{ProjectRecord, ProjectStatus};
use super::filter::ScoreRange;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentSummary {
    pub department: String,
    pub project_count: usize,
    pub avg_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagerSummary {
    pub manager: String,
    pub project_count: usize,
    pub avg_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSummary {
    pub status: ProjectStatus,
    pub status_label: &'static str,
    pub project_count: usize,
}

/// One row of the manager directory: a manager within one department.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagerDirectoryEntry {
    pub manager: String,
    pub department: String,
    pub project_count: usize,
    pub avg_score: f64,
}

/// Ordering applied to project listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOrder {
    /// Dataset insertion order, used by on-screen tables.
    Dataset,
    /// Department asc, manager asc, score desc.
    Export,
}

#[derive(Debug, Default, Clone, Copy)]
struct ScoreTally {
    count: usize,
    sum: u64,
}

impl ScoreTally {
    fn push(&mut self, score: u8) {
        self.count += 1;
        self.sum += u64::from(score);
    }

    fn mean(self) -> f64 {
        mean_one_decimal(self.sum, self.count as u64).unwrap_or_default()
    }
}

/// Mean of `sum / count` rounded to one decimal, ties to even.
///
/// The arithmetic is done on integers so a value such as `80.05` rounds to
/// `80.0` and `80.15` to `80.2` regardless of binary float representation.
pub fn mean_one_decimal(sum: u64, count: u64) -> Option<f64> {
    if count == 0 {
        return None;
    }

    let scaled = sum * 10;
    let mut tenths = scaled / count;
    let remainder = scaled % count;

    match (remainder * 2).cmp(&count) {
        Ordering::Greater => tenths += 1,
        Ordering::Equal if tenths % 2 == 1 => tenths += 1,
        _ => {}
    }

    Some(tenths as f64 / 10.0)
}

/// Groups rows by `key`, keeping groups in first-seen order.
fn tally_by<'a, I, K, F>(rows: I, key: F) -> Vec<(K, ScoreTally)>
where
    I: IntoIterator<Item = &'a ProjectRecord>,
    K: Eq + Hash + Copy,
    F: Fn(&'a ProjectRecord) -> K,
{
    let mut positions: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, ScoreTally)> = Vec::new();

    for row in rows {
        let group_key = key(row);
        let index = *positions.entry(group_key).or_insert_with(|| {
            groups.push((group_key, ScoreTally::default()));
            groups.len() - 1
        });
        groups[index].1.push(row.score);
    }

    groups
}

pub fn summarize_by_department(rows: &[ProjectRecord]) -> Vec<DepartmentSummary> {
    tally_by(rows, |row| row.department.as_str())
        .into_iter()
        .map(|(department, tally)| DepartmentSummary {
            department: department.to_string(),
            project_count: tally.count,
            avg_score: tally.mean(),
        })
        .collect()
}

pub fn summarize_by_manager(rows: &[ProjectRecord], department: &str) -> Vec<ManagerSummary> {
    let in_department = rows.iter().filter(|row| row.department == department);

    tally_by(in_department, |row| row.manager.as_str())
        .into_iter()
        .map(|(manager, tally)| ManagerSummary {
            manager: manager.to_string(),
            project_count: tally.count,
            avg_score: tally.mean(),
        })
        .collect()
}

pub fn summarize_by_status(rows: &[ProjectRecord]) -> Vec<StatusSummary> {
    tally_by(rows, |row| row.status)
        .into_iter()
        .map(|(status, tally)| StatusSummary {
            status,
            status_label: status.label(),
            project_count: tally.count,
        })
        .collect()
}

pub fn summarize_managers(rows: &[ProjectRecord]) -> Vec<ManagerDirectoryEntry> {
    tally_by(rows, |row| (row.manager.as_str(), row.department.as_str()))
        .into_iter()
        .map(|((manager, department), tally)| ManagerDirectoryEntry {
            manager: manager.to_string(),
            department: department.to_string(),
            project_count: tally.count,
            avg_score: tally.mean(),
        })
        .collect()
}

pub fn filter_by_score_range(rows: &[ProjectRecord], range: ScoreRange) -> Vec<ProjectRecord> {
    rows.iter()
        .filter(|row| range.contains(row.score))
        .cloned()
        .collect()
}

pub fn filter_by_department_and_manager(
    rows: &[ProjectRecord],
    department: &str,
    manager: &str,
    range: ScoreRange,
    order: RowOrder,
) -> Vec<ProjectRecord> {
    let mut matched: Vec<ProjectRecord> = rows
        .iter()
        .filter(|row| row.department == department && row.manager == manager)
        .filter(|row| range.contains(row.score))
        .cloned()
        .collect();

    if order == RowOrder::Export {
        sort_for_export(&mut matched);
    }

    matched
}

/// Stable sort by department asc, manager asc, score desc.
pub fn sort_for_export(rows: &mut [ProjectRecord]) {
    rows.sort_by(|a, b| {
        a.department
            .cmp(&b.department)
            .then_with(|| a.manager.cmp(&b.manager))
            .then_with(|| b.score.cmp(&a.score))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::dataset::Dataset;

    fn range(low: u8, high: u8) -> ScoreRange {
        ScoreRange::new(low, high).expect("valid range")
    }

    fn sample() -> Dataset {
        Dataset::sample().expect("sample dataset")
    }

    #[test]
    fn mean_rounds_half_to_even() {
        // 19 x 80 + 81 over 20 rows = 80.05
        assert_eq!(mean_one_decimal(19 * 80 + 81, 20), Some(80.0));
        // 19 x 80 + 83 over 20 rows = 80.15
        assert_eq!(mean_one_decimal(19 * 80 + 83, 20), Some(80.2));
        assert_eq!(mean_one_decimal(266, 3), Some(88.7));
        assert_eq!(mean_one_decimal(250, 3), Some(83.3));
        assert_eq!(mean_one_decimal(0, 0), None);
    }

    #[test]
    fn departments_keep_first_seen_order() {
        let dataset = sample();
        let summaries = summarize_by_department(dataset.records());
        let names: Vec<&str> = summaries.iter().map(|s| s.department.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "فناوری اطلاعات",
                "مالی",
                "منابع انسانی",
                "بازاریابی",
                "تحقیق و توسعه"
            ]
        );
        assert_eq!(summaries[0].project_count, 4);
        // 89 + 92 + 85 + 81 = 347 / 4 = 86.75
        assert_eq!(summaries[0].avg_score, 86.8);
        // 78 + 83 + 80 = 241 / 3
        assert_eq!(summaries[1].avg_score, 80.3);
    }

    #[test]
    fn empty_input_yields_no_summaries() {
        assert!(summarize_by_department(&[]).is_empty());
        assert!(summarize_by_manager(&[], "مالی").is_empty());
        assert!(summarize_by_status(&[]).is_empty());
    }

    #[test]
    fn managers_are_scoped_to_department() {
        let dataset = sample();
        let managers = summarize_by_manager(dataset.records(), "بازاریابی");
        assert_eq!(managers.len(), 2);
        assert_eq!(managers[0].manager, "الهام صادقی");
        assert_eq!(managers[0].project_count, 2);
        assert_eq!(managers[0].avg_score, 89.0);
        assert_eq!(managers[1].manager, "امیر تقوی");
        assert_eq!(managers[1].avg_score, 84.0);
    }

    #[test]
    fn unknown_department_has_no_managers() {
        let dataset = sample();
        assert!(summarize_by_manager(dataset.records(), "حقوقی").is_empty());
    }

    #[test]
    fn score_filter_is_inclusive_and_stable() {
        let dataset = sample();
        let rows = filter_by_score_range(dataset.records(), range(85, 100));
        let scores: Vec<u8> = rows.iter().map(|row| row.score).collect();
        assert_eq!(scores, vec![89, 92, 85, 90, 88, 86, 91, 87, 94, 89, 88]);
    }

    #[test]
    fn status_counts_cover_every_row() {
        let dataset = sample();
        let statuses = summarize_by_status(dataset.records());
        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[0].status, ProjectStatus::InProgress);
        assert_eq!(statuses[0].project_count, 13);
        assert_eq!(statuses[1].status, ProjectStatus::NearCompletion);
        assert_eq!(statuses[1].project_count, 3);
    }

    #[test]
    fn manager_directory_pairs_manager_with_department() {
        let dataset = sample();
        let directory = summarize_managers(dataset.records());
        assert_eq!(directory.len(), 10);
        let reza = directory
            .iter()
            .find(|entry| entry.manager == "رضا کاظمی")
            .expect("manager present");
        assert_eq!(reza.department, "تحقیق و توسعه");
        assert_eq!(reza.project_count, 2);
        assert_eq!(reza.avg_score, 91.5);
    }

    #[test]
    fn joint_filter_supports_both_orders() {
        let dataset = sample();
        let on_screen = filter_by_department_and_manager(
            dataset.records(),
            "فناوری اطلاعات",
            "مریم کریمی",
            range(60, 100),
            RowOrder::Dataset,
        );
        let scores: Vec<u8> = on_screen.iter().map(|row| row.score).collect();
        assert_eq!(scores, vec![85, 81]);

        let exported = filter_by_department_and_manager(
            dataset.records(),
            "فناوری اطلاعات",
            "علی رضایی",
            range(60, 100),
            RowOrder::Export,
        );
        let scores: Vec<u8> = exported.iter().map(|row| row.score).collect();
        assert_eq!(scores, vec![92, 89]);
    }

    #[test]
    fn export_sort_orders_department_manager_then_score_desc() {
        let dataset = sample();
        let mut rows = dataset.records().to_vec();
        sort_for_export(&mut rows);

        for pair in rows.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let ordered = match a.department.cmp(&b.department) {
                Ordering::Less => true,
                Ordering::Greater => false,
                Ordering::Equal => match a.manager.cmp(&b.manager) {
                    Ordering::Less => true,
                    Ordering::Greater => false,
                    Ordering::Equal => a.score >= b.score,
                },
            };
            assert!(ordered, "{a:?} should precede {b:?}");
        }
    }
}
