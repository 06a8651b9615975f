use crate::models::{
    CategoryGroup, CategoryPerformance, DashboardResponse, DataSource, Habit, HabitStatus,
    Overview, StatusBreakdown,
};
use chrono::{Local, NaiveDate};
use std::collections::BTreeMap;

pub fn build_dashboard(source: DataSource, habits: &[Habit]) -> DashboardResponse {
    build_dashboard_at(Local::now().date_naive(), source, habits)
}

pub fn build_dashboard_at(today: NaiveDate, source: DataSource, habits: &[Habit]) -> DashboardResponse {
    DashboardResponse {
        date: today.to_string(),
        source,
        overview: overview(habits),
        status_breakdown: status_breakdown(habits),
        category_performance: category_performance(habits),
    }
}

pub fn overview(habits: &[Habit]) -> Overview {
    let rates: Vec<f64> = habits.iter().map(|habit| habit.completion_rate).collect();
    let categories = group_by_category(habits).len();

    Overview {
        active_habits: habits.len(),
        completion_rate: rounded_mean(&rates),
        longest_streak: habits.iter().map(|habit| habit.streak).max().unwrap_or(0),
        categories,
    }
}

pub fn status_breakdown(habits: &[Habit]) -> StatusBreakdown {
    let mut breakdown = StatusBreakdown::default();
    for habit in habits {
        let slot = match habit.status {
            HabitStatus::Completed => &mut breakdown.completed,
            HabitStatus::Missed => &mut breakdown.missed,
            HabitStatus::Pending => &mut breakdown.pending,
        };
        *slot += 1;
    }
    breakdown
}

/// Average completion rate per category, ordered by category name.
pub fn category_performance(habits: &[Habit]) -> Vec<CategoryPerformance> {
    group_by_category(habits)
        .into_iter()
        .map(|(name, members)| {
            let rates: Vec<f64> = members.iter().map(|habit| habit.completion_rate).collect();
            CategoryPerformance {
                name: name.to_string(),
                habits: members.len(),
                completion_rate: rounded_mean(&rates),
            }
        })
        .collect()
}

/// Habits grouped by category; groups ordered by name, members keep list order.
pub fn category_groups(habits: &[Habit]) -> Vec<CategoryGroup> {
    group_by_category(habits)
        .into_iter()
        .map(|(name, members)| CategoryGroup {
            name: name.to_string(),
            habits: members.into_iter().cloned().collect(),
        })
        .collect()
}

fn group_by_category(habits: &[Habit]) -> BTreeMap<&str, Vec<&Habit>> {
    let mut groups: BTreeMap<&str, Vec<&Habit>> = BTreeMap::new();
    for habit in habits {
        groups.entry(habit.category.as_str()).or_default().push(habit);
    }
    groups
}

fn rounded_mean(values: &[f64]) -> u32 {
    if values.is_empty() {
        return 0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    mean.round().clamp(0.0, 100.0) as u32
}
