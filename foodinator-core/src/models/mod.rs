mod ingredient;
mod meal;
mod meal_slot;
mod tag;

pub use ingredient::Ingredient;
pub use meal::{Meal, MealSteps, MealTags};
pub use meal_slot::MealSlot;
pub use tag::{Tag, TagCategory};
