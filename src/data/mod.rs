pub mod app_settings;
pub mod task;

pub use app_settings::AppSettings;
pub use task::{Task, TaskStore};
