//! Catalog plus persisted planner state for a single CLI invocation.

use chrono::Local;
use foodinator_core::{Catalog, Ingredient, Meal, PlannerState, StateStorage, StorageError};

use crate::config::Config;

pub struct Planner {
    pub catalog: Catalog,
    pub state: PlannerState,
    storage: StateStorage,
}

impl Planner {
    /// Load the catalog and the stored state. A fresh plan starts today.
    pub fn open(config: &Config) -> Result<Self, Box<dyn std::error::Error>> {
        let catalog = match &config.catalog_path.value {
            Some(path) => Catalog::load(path)?,
            None => Catalog::builtin()?,
        };
        let storage = StateStorage::new(config.data_dir.value.clone());
        let state = storage.load_or_else(config.total_slots.value, Local::now().date_naive())?;

        tracing::debug!(
            meals = catalog.meals().len(),
            slots = state.plan.total_slots(),
            "opened planner"
        );

        Ok(Self {
            catalog,
            state,
            storage,
        })
    }

    #[cfg(test)]
    pub fn in_memory(catalog: Catalog, state: PlannerState, storage: StateStorage) -> Self {
        Self {
            catalog,
            state,
            storage,
        }
    }

    pub fn save(&self) -> Result<(), StorageError> {
        self.storage.save(&self.state)
    }

    pub fn require_meal(&self, meal_id: &str) -> Result<&Meal, String> {
        self.catalog
            .get_meal_by_id(meal_id)
            .ok_or_else(|| format!("Meal not found: {}", meal_id))
    }

    pub fn require_ingredient(&self, ingredient_id: &str) -> Result<&Ingredient, String> {
        self.catalog
            .get_ingredient_by_id(ingredient_id)
            .ok_or_else(|| format!("Ingredient not found: {}", ingredient_id))
    }

    /// Display name for a meal, falling back to its id.
    pub fn meal_name<'a>(&'a self, meal_id: &'a str) -> &'a str {
        self.catalog
            .get_meal_by_id(meal_id)
            .map(|m| m.name.as_str())
            .unwrap_or(meal_id)
    }

    /// Display name for an ingredient, falling back to its id.
    pub fn ingredient_name<'a>(&'a self, ingredient_id: &'a str) -> &'a str {
        match self.catalog.ingredient_name(ingredient_id) {
            "" => ingredient_id,
            name => name,
        }
    }
}
