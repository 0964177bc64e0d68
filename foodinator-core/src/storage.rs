//! JSON snapshot storage for the planner state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::plan::PlanState;
use crate::search::SearchState;

const STATE_FILENAME: &str = "planner.json";

/// Everything that survives between sessions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlannerState {
    pub plan: PlanState,
    #[serde(default)]
    pub search: SearchState,
}

impl PlannerState {
    pub fn new(total_slots: usize, start_date: NaiveDate) -> Self {
        Self {
            plan: PlanState::new(total_slots, start_date),
            search: SearchState::new(),
        }
    }
}

/// Loads and saves [`PlannerState`] snapshots in a data directory.
#[derive(Clone)]
pub struct StateStorage {
    data_dir: PathBuf,
}

impl StateStorage {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of the snapshot file.
    pub fn path(&self) -> PathBuf {
        self.data_dir.join(STATE_FILENAME)
    }

    pub fn exists(&self) -> bool {
        self.path().exists()
    }

    /// Loads the snapshot and repairs any plan inconsistencies in it.
    ///
    /// Returns `Ok(None)` if the file doesn't exist.
    pub fn load(&self) -> Result<Option<PlannerState>, StorageError> {
        let path = self.path();

        match fs::read_to_string(&path) {
            Ok(contents) => {
                let mut state: PlannerState = serde_json::from_str(&contents)
                    .map_err(|e| StorageError::ParseError(path, e))?;
                state.plan.normalize();
                Ok(Some(state))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::IoError(path, e)),
        }
    }

    /// Loads the snapshot, or starts a fresh plan when none is stored.
    ///
    /// A stored plan whose slot count differs from `total_slots` is resized.
    pub fn load_or_else(
        &self,
        total_slots: usize,
        start_date: NaiveDate,
    ) -> Result<PlannerState, StorageError> {
        match self.load()? {
            Some(mut state) => {
                if state.plan.total_slots() != total_slots {
                    let actual = state.plan.resize(total_slots);
                    tracing::debug!(requested = total_slots, actual, "resized stored plan");
                }
                Ok(state)
            }
            None => Ok(PlannerState::new(total_slots, start_date)),
        }
    }

    /// Saves the snapshot as pretty-printed JSON.
    ///
    /// Creates the data directory if it doesn't exist.
    pub fn save(&self, state: &PlannerState) -> Result<(), StorageError> {
        fs::create_dir_all(&self.data_dir)
            .map_err(|e| StorageError::IoError(self.data_dir.clone(), e))?;

        let path = self.path();
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| StorageError::ParseError(path.clone(), e))?;
        fs::write(&path, json).map_err(|e| StorageError::IoError(path, e))?;

        tracing::debug!(path = %self.path().display(), "saved planner state");
        Ok(())
    }
}

#[derive(Debug)]
pub enum StorageError {
    /// I/O error reading or writing a file.
    IoError(PathBuf, io::Error),
    /// Snapshot could not be encoded or decoded.
    ParseError(PathBuf, serde_json::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::IoError(path, e) => {
                write!(f, "I/O error for {}: {}", path.display(), e)
            }
            StorageError::ParseError(path, e) => {
                write!(f, "Invalid planner state in {}: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::IoError(_, e) => Some(e),
            StorageError::ParseError(_, e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::NOTES_MAX_CHARS;
    use tempfile::TempDir;

    fn test_storage() -> (StateStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = StateStorage::new(temp_dir.path().to_path_buf());
        (storage, temp_dir)
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
    }

    #[test]
    fn test_storage_path() {
        let (storage, _temp) = test_storage();
        assert!(storage.path().ends_with("planner.json"));
    }

    #[test]
    fn test_load_nonexistent_returns_none() {
        let (storage, _temp) = test_storage();
        assert!(storage.load().unwrap().is_none());
        assert!(!storage.exists());
    }

    #[test]
    fn test_load_or_else_builds_fresh_plan() {
        let (storage, _temp) = test_storage();
        let state = storage.load_or_else(5, monday()).unwrap();

        assert_eq!(state.plan.total_slots(), 5);
        assert_eq!(state.plan.used_slots(), 0);
        assert_eq!(state.plan.start_date(), monday());
        assert!(!state.search.has_active_filters());
    }

    #[test]
    fn test_save_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested_dir = temp_dir.path().join("nested").join("data");
        let storage = StateStorage::new(nested_dir.clone());

        storage.save(&PlannerState::new(7, monday())).unwrap();

        assert!(nested_dir.exists());
        assert!(storage.exists());
    }

    #[test]
    fn test_save_and_load_preserves_plan() {
        let (storage, _temp) = test_storage();

        let mut state = PlannerState::new(7, monday());
        state.plan.add_meal("burgers", 2).unwrap();
        state.plan.toggle_meal_cooked(1);
        state.plan.toggle_item_checked("beef-mince");
        state.plan.update_notes("buy extra buns");
        state.search.set_search_term("pasta");
        storage.save(&state).unwrap();

        let loaded = storage.load().unwrap().unwrap();
        assert_eq!(loaded, state);
        assert_eq!(loaded.plan.meal_quantity("burgers"), 2);
        assert!(loaded.plan.is_item_checked("beef-mince"));
        assert_eq!(loaded.plan.notes(), "buy extra buns");
        assert_eq!(loaded.search.search_term, "pasta");
    }

    #[test]
    fn test_load_or_else_grows_stored_plan() {
        let (storage, _temp) = test_storage();
        let mut state = PlannerState::new(3, monday());
        state.plan.add_meal("burgers", 3).unwrap();
        storage.save(&state).unwrap();

        let loaded = storage.load_or_else(7, monday()).unwrap();
        assert_eq!(loaded.plan.total_slots(), 7);
        assert_eq!(loaded.plan.meal_quantity("burgers"), 3);
        assert_eq!(loaded.plan.remaining_slots(), 4);
    }

    #[test]
    fn test_load_or_else_keeps_occupied_slots_when_shrinking() {
        let (storage, _temp) = test_storage();
        let mut state = PlannerState::new(7, monday());
        state.plan.add_meal("burgers", 5).unwrap();
        storage.save(&state).unwrap();

        let loaded = storage.load_or_else(3, monday()).unwrap();
        assert_eq!(loaded.plan.total_slots(), 5);
        assert_eq!(loaded.plan.meal_quantity("burgers"), 5);
    }

    #[test]
    fn test_load_invalid_json_is_error() {
        let (storage, _temp) = test_storage();
        fs::write(storage.path(), "{ not json").unwrap();

        let err = storage.load().unwrap_err();
        assert!(matches!(err, StorageError::ParseError(_, _)));
        assert!(err.to_string().contains("planner.json"));
    }

    #[test]
    fn test_load_repairs_hand_edited_plan() {
        let (storage, _temp) = test_storage();
        let json = serde_json::json!({
            "plan": {
                "mealSlots": [
                    { "index": 0, "mealId": "burgers" },
                    { "index": 5 }
                ],
                "notes": "x".repeat(NOTES_MAX_CHARS + 1),
                "startDate": "2026-01-05"
            }
        });
        fs::write(storage.path(), json.to_string()).unwrap();

        let mut loaded = storage.load().unwrap().unwrap();
        assert!(loaded.plan.meal_slots()[0].instance_id.is_some());
        assert_eq!(loaded.plan.meal_slots()[1].index, 1);
        assert_eq!(loaded.plan.notes().chars().count(), NOTES_MAX_CHARS);
        assert_eq!(loaded.plan.toggle_meal_cooked(0), Some(true));
    }

    #[test]
    fn test_missing_search_defaults() {
        let (storage, _temp) = test_storage();
        let plan = PlanState::new(2, monday());
        let json = serde_json::json!({ "plan": plan });
        fs::write(storage.path(), json.to_string()).unwrap();

        let loaded = storage.load().unwrap().unwrap();
        assert_eq!(loaded.search, SearchState::default());
    }
}
