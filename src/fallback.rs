//! Data returned when the remote store cannot be reached.

use crate::mapping::{DEFAULT_FREQUENCY, HabitFields, NEW_HABIT_CATEGORY};
use crate::models::{Habit, HabitStatus};
use rand::Rng;

const LOCAL_ID_LEN: usize = 7;
const LOCAL_ID_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

pub fn demo_habits() -> Vec<Habit> {
    vec![
        demo("1", "Morning Run", "Health", "Daily", 12, 94.0, HabitStatus::Completed),
        demo("2", "Read 30 Minutes", "Skills", "Daily", 8, 87.0, HabitStatus::Completed),
        demo("3", "Meditate", "Mental Health", "Daily", 24, 92.0, HabitStatus::Completed),
        demo("4", "Project Work", "Productivity", "Weekdays", 5, 78.0, HabitStatus::Missed),
        demo("5", "Journal", "Mental Health", "Daily", 15, 85.0, HabitStatus::Pending),
    ]
}

fn demo(
    id: &str,
    name: &str,
    category: &str,
    frequency: &str,
    streak: u32,
    completion_rate: f64,
    status: HabitStatus,
) -> Habit {
    Habit {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        frequency: frequency.to_string(),
        streak,
        completion_rate,
        status,
    }
}

/// Short lowercase alphanumeric id for records that were never persisted.
/// Collisions are not guarded against.
pub fn local_id() -> String {
    let mut rng = rand::thread_rng();
    (0..LOCAL_ID_LEN)
        .map(|_| LOCAL_ID_CHARS[rng.gen_range(0..LOCAL_ID_CHARS.len())] as char)
        .collect()
}

pub fn local_habit(fields: HabitFields) -> Habit {
    Habit {
        id: local_id(),
        name: fields.name,
        category: fields.category,
        frequency: fields.frequency,
        streak: 0,
        completion_rate: 0.0,
        status: HabitStatus::Pending,
    }
}

pub fn local_status_update(id: &str, status: HabitStatus) -> Habit {
    let completed = status == HabitStatus::Completed;
    Habit {
        id: id.to_string(),
        name: "Updated Habit".to_string(),
        category: NEW_HABIT_CATEGORY.to_string(),
        frequency: DEFAULT_FREQUENCY.to_string(),
        streak: u32::from(completed),
        completion_rate: if completed { 100.0 } else { 0.0 },
        status,
    }
}
