//! Foodinator Core Library
//!
//! Meal catalog, weekly plan state and the grocery/schedule views derived
//! from it.

pub mod catalog;
pub mod debounce;
pub mod filter;
pub mod grocery;
pub mod models;
pub mod plan;
pub mod schedule;
pub mod search;
pub mod storage;

pub use catalog::{Catalog, CatalogData, CatalogError, MealDetails};
pub use debounce::{Debouncer, NOTES_DEBOUNCE};
pub use filter::{filter_catalog, FilterResult};
pub use grocery::{derive_grocery_view, GroceryItem, GrocerySort, GroceryView, MealGroup};
pub use models::{Ingredient, Meal, MealSlot, MealSteps, MealTags, Tag, TagCategory};
pub use plan::{
    PlanError, PlanState, PlanSummary, SelectedMeal, DEFAULT_TOTAL_SLOTS, NOTES_MAX_CHARS,
};
pub use schedule::{derive_schedule_view, format_day_label, format_full_date, ScheduleEntry};
pub use search::SearchState;
pub use storage::{PlannerState, StateStorage, StorageError};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
