use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One position in the weekly plan.
///
/// An occupied slot carries both the meal it references and an instance id
/// identifying this particular serving; an empty slot carries neither.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MealSlot {
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_id: Option<String>,
}

impl MealSlot {
    pub fn empty(index: usize) -> Self {
        Self {
            index,
            instance_id: None,
            meal_id: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.meal_id.is_none()
    }

    pub fn holds(&self, meal_id: &str) -> bool {
        self.meal_id.as_deref() == Some(meal_id)
    }

    /// Place a fresh instance of `meal_id` into this slot.
    pub(crate) fn occupy(&mut self, meal_id: &str) -> Uuid {
        let instance_id = Uuid::new_v4();
        self.instance_id = Some(instance_id);
        self.meal_id = Some(meal_id.to_string());
        instance_id
    }

    /// Empty the slot, returning the instance that was freed.
    pub(crate) fn clear(&mut self) -> Option<Uuid> {
        self.meal_id = None;
        self.instance_id.take()
    }
}
