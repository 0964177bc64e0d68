//! Weekly plan state: the single source of truth for selected meals,
//! cooked flags, grocery check-marks and notes.
//!
//! All writes go through the named operations on [`PlanState`]; the derived
//! grocery and schedule views are recomputed from it after every change.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

use crate::models::MealSlot;

/// Default number of slots in a weekly plan (one dinner per day).
pub const DEFAULT_TOTAL_SLOTS: usize = 7;

/// Upper bound on grocery notes, in characters.
pub const NOTES_MAX_CHARS: usize = 1000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// The request needs more free slots than the plan has.
    #[error("Only {available} slots remaining")]
    InsufficientSlots { requested: usize, available: usize },

    #[error("Quantity must be at least 1")]
    InvalidQuantity,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanState {
    meal_slots: Vec<MealSlot>,
    #[serde(default)]
    checked_items: BTreeMap<String, bool>,
    #[serde(default)]
    cooked_meals: BTreeMap<Uuid, bool>,
    #[serde(default)]
    notes: String,
    start_date: NaiveDate,
}

impl PlanState {
    /// Create a plan with `total_slots` empty slots starting on `start_date`.
    pub fn new(total_slots: usize, start_date: NaiveDate) -> Self {
        Self {
            meal_slots: (0..total_slots).map(MealSlot::empty).collect(),
            checked_items: BTreeMap::new(),
            cooked_meals: BTreeMap::new(),
            notes: String::new(),
            start_date,
        }
    }

    pub fn meal_slots(&self) -> &[MealSlot] {
        &self.meal_slots
    }

    pub fn checked_items(&self) -> &BTreeMap<String, bool> {
        &self.checked_items
    }

    pub fn cooked_meals(&self) -> &BTreeMap<Uuid, bool> {
        &self.cooked_meals
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn total_slots(&self) -> usize {
        self.meal_slots.len()
    }

    pub fn used_slots(&self) -> usize {
        self.meal_slots.iter().filter(|s| !s.is_empty()).count()
    }

    pub fn remaining_slots(&self) -> usize {
        self.total_slots() - self.used_slots()
    }

    /// Number of slots currently holding `meal_id`.
    pub fn meal_quantity(&self, meal_id: &str) -> usize {
        self.meal_slots.iter().filter(|s| s.holds(meal_id)).count()
    }

    pub fn is_item_checked(&self, ingredient_id: &str) -> bool {
        self.checked_items
            .get(ingredient_id)
            .copied()
            .unwrap_or(false)
    }

    pub fn is_instance_cooked(&self, instance_id: &Uuid) -> bool {
        self.cooked_meals.get(instance_id).copied().unwrap_or(false)
    }

    /// Occupy `quantity` empty slots with new instances of `meal_id`, lowest
    /// index first. Occupied slots are never overwritten.
    pub fn add_meal(&mut self, meal_id: &str, quantity: usize) -> Result<(), PlanError> {
        if quantity == 0 {
            return Err(PlanError::InvalidQuantity);
        }
        let available = self.remaining_slots();
        if quantity > available {
            tracing::debug!(meal_id, quantity, available, "add_meal rejected");
            return Err(PlanError::InsufficientSlots {
                requested: quantity,
                available,
            });
        }

        self.fill_empty_slots(meal_id, quantity);
        tracing::debug!(meal_id, quantity, "added meal to plan");
        Ok(())
    }

    /// Grow or shrink the number of instances of `meal_id` to `new_quantity`.
    ///
    /// Growing fills the first empty slots; shrinking frees the
    /// highest-indexed instances first and forgets their cooked flags.
    /// A quantity of zero removes the meal entirely.
    pub fn update_meal_quantity(
        &mut self,
        meal_id: &str,
        new_quantity: usize,
    ) -> Result<(), PlanError> {
        let current = self.meal_quantity(meal_id);
        let available = self.total_slots() - (self.used_slots() - current);
        if new_quantity > available {
            tracing::debug!(meal_id, new_quantity, available, "update_meal_quantity rejected");
            return Err(PlanError::InsufficientSlots {
                requested: new_quantity,
                available,
            });
        }

        if new_quantity > current {
            self.fill_empty_slots(meal_id, new_quantity - current);
        } else if new_quantity < current {
            let mut excess = current - new_quantity;
            for slot in self.meal_slots.iter_mut().rev() {
                if excess == 0 {
                    break;
                }
                if slot.holds(meal_id) {
                    if let Some(instance_id) = slot.clear() {
                        self.cooked_meals.remove(&instance_id);
                    }
                    excess -= 1;
                }
            }
        }

        tracing::debug!(meal_id, current, new_quantity, "updated meal quantity");
        Ok(())
    }

    /// Free every slot holding `meal_id`. Returns how many were freed.
    ///
    /// Cooked flags of the freed instances are discarded; ingredient
    /// check-marks are left alone.
    pub fn remove_meal(&mut self, meal_id: &str) -> usize {
        let mut freed = 0;
        for slot in self.meal_slots.iter_mut().filter(|s| s.holds(meal_id)) {
            if let Some(instance_id) = slot.clear() {
                self.cooked_meals.remove(&instance_id);
            }
            freed += 1;
        }
        tracing::debug!(meal_id, freed, "removed meal from plan");
        freed
    }

    /// Empty every slot and drop all cooked flags.
    ///
    /// Check-marks and notes survive a reset; use [`clear_checked_items`]
    /// and [`update_notes`] to clear those explicitly.
    ///
    /// [`clear_checked_items`]: PlanState::clear_checked_items
    /// [`update_notes`]: PlanState::update_notes
    pub fn reset_plan(&mut self) {
        for slot in &mut self.meal_slots {
            slot.clear();
        }
        self.cooked_meals.clear();
        tracing::debug!(total_slots = self.total_slots(), "reset plan");
    }

    /// Flip the cooked flag of the instance in slot `index`.
    ///
    /// Returns the new flag, or `None` when the slot is empty or out of range.
    pub fn toggle_meal_cooked(&mut self, index: usize) -> Option<bool> {
        let instance_id = self.meal_slots.get(index)?.instance_id?;
        let cooked = !self.is_instance_cooked(&instance_id);
        self.cooked_meals.insert(instance_id, cooked);
        tracing::debug!(index, cooked, "toggled meal cooked");
        Some(cooked)
    }

    /// Flip the check-mark of a grocery ingredient. Returns the new state.
    pub fn toggle_item_checked(&mut self, ingredient_id: &str) -> bool {
        let checked = !self.is_item_checked(ingredient_id);
        self.checked_items.insert(ingredient_id.to_string(), checked);
        tracing::debug!(ingredient_id, checked, "toggled grocery item");
        checked
    }

    pub fn set_item_checked(&mut self, ingredient_id: &str, checked: bool) {
        self.checked_items.insert(ingredient_id.to_string(), checked);
    }

    /// Forget every check-mark. Returns how many items were checked.
    pub fn clear_checked_items(&mut self) -> usize {
        let count = self.checked_items.values().filter(|&&c| c).count();
        self.checked_items.clear();
        tracing::debug!(count, "cleared checked items");
        count
    }

    /// Replace the grocery notes, keeping at most [`NOTES_MAX_CHARS`]
    /// characters. Returns true if the input had to be clamped.
    pub fn update_notes(&mut self, notes: impl Into<String>) -> bool {
        let mut notes = notes.into();
        let clamped = match notes.char_indices().nth(NOTES_MAX_CHARS) {
            Some((byte_index, _)) => {
                notes.truncate(byte_index);
                true
            }
            None => false,
        };
        self.notes = notes;
        tracing::debug!(len = self.notes.chars().count(), clamped, "updated notes");
        clamped
    }

    pub fn update_start_date(&mut self, start_date: NaiveDate) {
        self.start_date = start_date;
        tracing::debug!(%start_date, "updated start date");
    }

    /// Move the start date by `days` (negative moves back). Week navigation
    /// uses multiples of seven. Offsets outside the calendar range leave the
    /// date unchanged.
    pub fn shift_start_date(&mut self, days: i64) -> NaiveDate {
        if let Some(date) =
            Duration::try_days(days).and_then(|d| self.start_date.checked_add_signed(d))
        {
            self.start_date = date;
        }
        tracing::debug!(days, start_date = %self.start_date, "shifted start date");
        self.start_date
    }

    /// Change the plan capacity.
    ///
    /// Growing appends empty slots. Shrinking drops trailing slots only while
    /// they are empty, so the result may be larger than requested.
    pub fn resize(&mut self, total_slots: usize) -> usize {
        while self.meal_slots.len() < total_slots {
            let index = self.meal_slots.len();
            self.meal_slots.push(MealSlot::empty(index));
        }
        while self.meal_slots.len() > total_slots
            && self.meal_slots.last().is_some_and(MealSlot::is_empty)
        {
            self.meal_slots.pop();
        }
        self.meal_slots.len()
    }

    /// Repair a state read from outside: slot indexes follow positions, an
    /// occupied slot always has an instance id and an empty one has none,
    /// cooked flags of unknown instances are dropped and notes are clamped.
    pub fn normalize(&mut self) {
        for (index, slot) in self.meal_slots.iter_mut().enumerate() {
            slot.index = index;
            match (&slot.meal_id, slot.instance_id) {
                (Some(meal_id), None) => {
                    let meal_id = meal_id.clone();
                    slot.occupy(&meal_id);
                }
                (None, Some(_)) => slot.instance_id = None,
                _ => {}
            }
        }

        let live: Vec<Uuid> = self
            .meal_slots
            .iter()
            .filter_map(|s| s.instance_id)
            .collect();
        self.cooked_meals.retain(|id, _| live.contains(id));

        let notes = std::mem::take(&mut self.notes);
        if self.update_notes(notes) {
            tracing::debug!("clamped stored notes");
        }
    }

    /// Selected meals with their quantities, in first-appearance slot order.
    pub fn summary(&self) -> PlanSummary {
        let mut selected_meals: Vec<SelectedMeal> = Vec::new();
        for meal_id in self.meal_slots.iter().filter_map(|s| s.meal_id.as_deref()) {
            match selected_meals.iter_mut().find(|m| m.meal_id == meal_id) {
                Some(selected) => selected.quantity += 1,
                None => selected_meals.push(SelectedMeal {
                    meal_id: meal_id.to_string(),
                    quantity: 1,
                }),
            }
        }

        PlanSummary {
            selected_meals,
            used_slots: self.used_slots(),
            total_slots: self.total_slots(),
        }
    }

    fn fill_empty_slots(&mut self, meal_id: &str, count: usize) {
        for slot in self
            .meal_slots
            .iter_mut()
            .filter(|s| s.is_empty())
            .take(count)
        {
            slot.occupy(meal_id);
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SelectedMeal {
    pub meal_id: String,
    pub quantity: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    pub selected_meals: Vec<SelectedMeal>,
    pub used_slots: usize,
    pub total_slots: usize,
}

impl PlanSummary {
    pub fn remaining_slots(&self) -> usize {
        self.total_slots - self.used_slots
    }

    /// Largest quantity `meal` may be updated to.
    pub fn available_slots_for(&self, meal: &SelectedMeal) -> usize {
        self.total_slots - (self.used_slots - meal.quantity)
    }

    pub fn remaining_message(&self) -> String {
        match self.remaining_slots() {
            0 => "All slots filled! Your weekly plan is complete.".to_string(),
            n => format!("{} slots remaining to fill.", n),
        }
    }
}
