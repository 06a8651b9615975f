pub mod app;
pub mod config;
pub mod errors;
pub mod fallback;
pub mod handlers;
pub mod mapping;
pub mod models;
pub mod repository;
pub mod state;
pub mod stats;

pub use app::router;
pub use config::StoreConfig;
pub use models::{Habit, HabitStatus, NewHabit, Sourced};
pub use repository::HabitRepository;
pub use state::AppState;
