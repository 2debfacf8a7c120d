//! Dashboard statistics: SDG, status, campus, and yearly aggregation over project rows.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::project::{parse_sdg_token, ProjectStatus, SDG_MAX, SDG_MIN};

/// First year of the yearly program series.
pub const YEAR_FLOOR: i32 = 2020;

/// The four columns the aggregator reads from each project.
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct DashboardRow {
    pub sdg: Option<String>,
    pub projectstatus: Option<String>,
    pub collegecampus: Option<String>,
    pub projectdate: Option<String>,
}

/// Completed / in-progress counts for a single SDG.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct SdgCounts {
    pub completed: i64,
    pub in_progress: i64,
}

/// Project count for one campus.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CampusCount {
    pub campus: String,
    pub count: i64,
}

/// Project count for one calendar year.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct YearCount {
    pub year: i32,
    pub count: i64,
}

/// Aggregated statistics for the dashboard.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardStats {
    /// Always holds all 17 goals.
    pub sdg_stats: BTreeMap<u8, SdgCounts>,
    pub total_projects: i64,
    pub completed_count: i64,
    pub in_progress_count: i64,
    /// First-seen order.
    pub campus_counts: Vec<CampusCount>,
    /// Contiguous from [`YEAR_FLOOR`] to the latest observed year.
    pub yearly_counts: Vec<YearCount>,
}

/// Chart-ready dashboard payload.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardView {
    pub sdg_stats: BTreeMap<u8, SdgCounts>,
    pub total_projects: i64,
    pub completed_count: i64,
    pub in_progress_count: i64,
    pub collegecampus_labels: Vec<String>,
    pub collegecampus_data: Vec<i64>,
    pub years: Vec<i32>,
    pub program_counts: Vec<i64>,
}

impl From<DashboardStats> for DashboardView {
    fn from(stats: DashboardStats) -> Self {
        let (collegecampus_labels, collegecampus_data) = stats
            .campus_counts
            .into_iter()
            .map(|c| (c.campus, c.count))
            .unzip();
        let (years, program_counts) = stats
            .yearly_counts
            .iter()
            .map(|y| (y.year, y.count))
            .unzip();

        Self {
            sdg_stats: stats.sdg_stats,
            total_projects: stats.total_projects,
            completed_count: stats.completed_count,
            in_progress_count: stats.in_progress_count,
            collegecampus_labels,
            collegecampus_data,
            years,
            program_counts,
        }
    }
}

/// Load every project row and aggregate it.
pub async fn get_stats(pool: &PgPool) -> Result<DashboardStats, AppError> {
    let rows = sqlx::query_as::<_, DashboardRow>(
        "SELECT sdg, projectstatus, collegecampus, projectdate FROM projects ORDER BY projectid",
    )
    .fetch_all(pool)
    .await?;

    tracing::debug!(rows = rows.len(), "Aggregating dashboard statistics");
    Ok(aggregate(&rows))
}

/// Aggregate project rows into dashboard statistics.
///
/// Status totals count projects, not SDG tags: a project tagged with three
/// goals adds one to `completed_count` and one to each of its three goals.
pub fn aggregate(rows: &[DashboardRow]) -> DashboardStats {
    let mut sdg_stats: BTreeMap<u8, SdgCounts> =
        (SDG_MIN..=SDG_MAX).map(|n| (n, SdgCounts::default())).collect();
    let mut total_projects = 0;
    let mut completed_count = 0;
    let mut in_progress_count = 0;
    let mut campus_counts: Vec<CampusCount> = Vec::new();
    let mut yearly: BTreeMap<i32, i64> = BTreeMap::new();

    for row in rows {
        total_projects += 1;

        let status = row.projectstatus.as_deref().and_then(ProjectStatus::from_label);
        match status {
            Some(ProjectStatus::Completed) => completed_count += 1,
            Some(ProjectStatus::InProgress) => in_progress_count += 1,
            None => {}
        }

        for token in row.sdg.as_deref().unwrap_or_default().split(',') {
            if token.trim().is_empty() {
                continue;
            }
            let Some(goal) = parse_sdg_token(token) else {
                tracing::warn!(sdg = %token, "Skipping invalid SDG value");
                continue;
            };
            if let Some(counts) = sdg_stats.get_mut(&goal) {
                match status {
                    Some(ProjectStatus::Completed) => counts.completed += 1,
                    Some(ProjectStatus::InProgress) => counts.in_progress += 1,
                    None => {}
                }
            }
        }

        let campus = row.collegecampus.as_deref().unwrap_or_default();
        match campus_counts.iter_mut().find(|c| c.campus == campus) {
            Some(entry) => entry.count += 1,
            None => campus_counts.push(CampusCount {
                campus: campus.to_string(),
                count: 1,
            }),
        }

        if let Some(year) = row.projectdate.as_deref().and_then(parse_project_year) {
            *yearly.entry(year).or_insert(0) += 1;
        }
    }

    let end_year = yearly
        .keys()
        .next_back()
        .copied()
        .unwrap_or(YEAR_FLOOR)
        .max(YEAR_FLOOR);
    let yearly_counts = (YEAR_FLOOR..=end_year)
        .map(|year| YearCount {
            year,
            count: yearly.get(&year).copied().unwrap_or(0),
        })
        .collect();

    DashboardStats {
        sdg_stats,
        total_projects,
        completed_count,
        in_progress_count,
        campus_counts,
        yearly_counts,
    }
}

/// Extract the year from a free-text project date.
///
/// Accepts "March 2024" first, then "March 14, 2022". The month must be spelled
/// out in full and the year must be exactly four digits.
pub fn parse_project_year(raw: &str) -> Option<i32> {
    let (_, year) = raw.rsplit_once(' ')?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // "%B %Y" has no day component, which NaiveDate cannot represent; pin day 1.
    let date = NaiveDate::parse_from_str(&format!("1 {raw}"), "%d %B %Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%B %d, %Y"))
        .ok()?;

    // chrono's %B also takes abbreviations like "Mar".
    let month = raw.split_whitespace().next()?;
    if !month.eq_ignore_ascii_case(&date.format("%B").to_string()) {
        return None;
    }
    Some(date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(sdg: Option<&str>, status: &str, campus: &str, date: Option<&str>) -> DashboardRow {
        DashboardRow {
            sdg: sdg.map(str::to_string),
            projectstatus: Some(status.to_string()),
            collegecampus: Some(campus.to_string()),
            projectdate: date.map(str::to_string),
        }
    }

    #[test]
    fn two_row_example() {
        let rows = vec![
            row(Some("1,2"), "Completed", "Main", Some("March 2024")),
            row(Some("2"), "In Progress", "Satellite", Some("March 14, 2022")),
        ];
        let stats = aggregate(&rows);

        assert_eq!(stats.total_projects, 2);
        assert_eq!(stats.completed_count, 1);
        assert_eq!(stats.in_progress_count, 1);
        assert_eq!(stats.sdg_stats[&1], SdgCounts { completed: 1, in_progress: 0 });
        assert_eq!(stats.sdg_stats[&2], SdgCounts { completed: 1, in_progress: 1 });
        assert_eq!(stats.sdg_stats[&3], SdgCounts::default());
        assert_eq!(
            stats.campus_counts,
            vec![
                CampusCount { campus: "Main".to_string(), count: 1 },
                CampusCount { campus: "Satellite".to_string(), count: 1 },
            ]
        );

        let view = DashboardView::from(stats);
        assert_eq!(view.years, vec![2020, 2021, 2022, 2023, 2024]);
        assert_eq!(view.program_counts, vec![0, 0, 1, 0, 1]);
        assert_eq!(view.collegecampus_labels, vec!["Main", "Satellite"]);
        assert_eq!(view.collegecampus_data, vec![1, 1]);
    }

    #[test]
    fn all_seventeen_goals_present() {
        let stats = aggregate(&[]);
        assert_eq!(stats.sdg_stats.len(), 17);
        assert_eq!(stats.sdg_stats.keys().next(), Some(&1));
        assert_eq!(stats.sdg_stats.keys().last(), Some(&17));
    }

    #[test]
    fn invalid_sdg_tokens_are_skipped() {
        let rows = vec![row(Some("3,abc,,0,18, 5 ,3"), "Completed", "Main", None)];
        let stats = aggregate(&rows);

        assert_eq!(stats.total_projects, 1);
        assert_eq!(stats.completed_count, 1);
        assert_eq!(stats.sdg_stats[&3].completed, 2);
        assert_eq!(stats.sdg_stats[&5].completed, 1);
        let tagged: i64 = stats.sdg_stats.values().map(|c| c.completed + c.in_progress).sum();
        assert_eq!(tagged, 3);
    }

    #[test]
    fn empty_sdg_still_counts_project() {
        let rows = vec![
            row(None, "Completed", "Main", None),
            row(Some(""), "In Progress", "Main", None),
        ];
        let stats = aggregate(&rows);

        assert_eq!(stats.total_projects, 2);
        assert_eq!(stats.completed_count, 1);
        assert_eq!(stats.in_progress_count, 1);
        assert!(stats.sdg_stats.values().all(|c| *c == SdgCounts::default()));
    }

    #[test]
    fn status_counts_are_per_project() {
        let rows = vec![row(Some("1,2,3"), "Completed", "Main", None)];
        let stats = aggregate(&rows);
        assert_eq!(stats.completed_count, 1);
        assert_eq!(stats.sdg_stats[&1].completed, 1);
        assert_eq!(stats.sdg_stats[&3].completed, 1);
    }

    #[test]
    fn unknown_status_counts_only_in_total() {
        let mut unset = row(Some("4"), "Completed", "Main", None);
        unset.projectstatus = None;
        let rows = vec![row(Some("4"), "Cancelled", "Main", None), unset];
        let stats = aggregate(&rows);

        assert_eq!(stats.total_projects, 2);
        assert_eq!(stats.completed_count, 0);
        assert_eq!(stats.in_progress_count, 0);
        assert_eq!(stats.sdg_stats[&4], SdgCounts::default());
    }

    #[test]
    fn campus_order_is_first_seen() {
        let rows = vec![
            row(None, "Completed", "Tanauan", None),
            row(None, "Completed", "Main", None),
            row(None, "Completed", "Tanauan", None),
        ];
        let stats = aggregate(&rows);
        let labels: Vec<_> = stats.campus_counts.iter().map(|c| c.campus.as_str()).collect();
        assert_eq!(labels, vec!["Tanauan", "Main"]);
        assert_eq!(stats.campus_counts[0].count, 2);
    }

    #[test]
    fn no_dates_yields_floor_year_only() {
        let rows = vec![row(None, "Completed", "Main", Some("sometime soon"))];
        let stats = aggregate(&rows);
        assert_eq!(stats.yearly_counts, vec![YearCount { year: 2020, count: 0 }]);
    }

    #[test]
    fn years_before_floor_are_dropped() {
        let rows = vec![row(None, "Completed", "Main", Some("June 2018"))];
        let stats = aggregate(&rows);
        assert_eq!(stats.yearly_counts, vec![YearCount { year: 2020, count: 0 }]);
    }

    #[test]
    fn project_date_formats() {
        assert_eq!(parse_project_year("March 2024"), Some(2024));
        assert_eq!(parse_project_year("March 14, 2022"), Some(2022));
        assert_eq!(parse_project_year("December 1, 2021"), Some(2021));
        assert_eq!(parse_project_year("2024-03-14"), None);
        assert_eq!(parse_project_year("Smarch 2024"), None);
        assert_eq!(parse_project_year(""), None);
        assert_eq!(parse_project_year("march 2024"), Some(2024));
    }

    #[test]
    fn project_date_requires_full_month_and_four_digit_year() {
        assert_eq!(parse_project_year("Mar 2024"), None);
        assert_eq!(parse_project_year("Mar 14, 2022"), None);
        assert_eq!(parse_project_year("Sept 2023"), None);
        assert_eq!(parse_project_year("March +200000"), None);
        assert_eq!(parse_project_year("March +2024"), None);
        assert_eq!(parse_project_year("March 30000"), None);
        assert_eq!(parse_project_year("March 14, 202"), None);
        assert_eq!(parse_project_year("March 14, -2022"), None);
    }

    #[test]
    fn far_future_year_does_not_stretch_series() {
        let rows = vec![
            row(Some("1"), "Completed", "Main", Some("March +200000")),
            row(Some("1"), "Completed", "Main", Some("March 2021")),
        ];
        let stats = aggregate(&rows);
        assert_eq!(stats.total_projects, 2);
        let years: Vec<i32> = stats.yearly_counts.iter().map(|y| y.year).collect();
        assert_eq!(years, vec![2020, 2021]);
    }

    #[test]
    fn view_serializes_sdg_keys_as_strings() {
        let view = DashboardView::from(aggregate(&[]));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["sdg_stats"]["17"]["completed"], 0);
        assert_eq!(json["years"][0], 2020);
    }
}
