use clap::ValueEnum;

mod config_cmd;
mod grocery;
mod meals;
mod plan;
mod schedule;

pub use config_cmd::ConfigCommand;
pub use grocery::GroceryCommand;
pub use meals::MealsCommand;
pub use plan::PlanCommand;
pub use schedule::ScheduleCommand;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn check_mark(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

#[cfg(test)]
pub(crate) fn test_planner() -> (crate::planner::Planner, tempfile::TempDir) {
    use chrono::NaiveDate;
    use foodinator_core::{Catalog, PlannerState, StateStorage};

    let temp_dir = tempfile::TempDir::new().unwrap();
    let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
    let planner = crate::planner::Planner::in_memory(
        Catalog::builtin().unwrap(),
        PlannerState::new(7, start),
        StateStorage::new(temp_dir.path().to_path_buf()),
    );
    (planner, temp_dir)
}
