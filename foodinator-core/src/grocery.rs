//! Grocery list derivation.
//!
//! The grocery view is never stored: it is recomputed from the plan and the
//! catalog on every read. A portion is one meal instance that needs the
//! ingredient, so a meal planned three times contributes three portions of
//! each of its ingredients. Seasoning is collected separately as staples with
//! a fixed portion of one.

use serde::Serialize;
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::catalog::Catalog;
use crate::plan::PlanState;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroceryItem {
    pub ingredient_id: String,
    pub portions: u32,
    pub checked: bool,
}

/// Ingredients first needed by one meal, in that meal's ingredient order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MealGroup {
    pub meal_id: String,
    pub items: Vec<GroceryItem>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroceryView {
    /// One item per distinct ingredient, in first-needed order.
    pub flat: Vec<GroceryItem>,
    pub is_empty: bool,
    /// Each ingredient appears in at most one group: the earliest meal (by
    /// slot order) that needs it. Meals left with nothing are omitted.
    pub grouped_by_meal: Vec<MealGroup>,
    pub seasoning_staples: Vec<GroceryItem>,
}

/// Presentation ordering of the grocery list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GrocerySort {
    /// Keep meal-group order.
    #[default]
    Meal,
    Name,
    /// Most portions first.
    Portions,
}

impl fmt::Display for GrocerySort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrocerySort::Meal => write!(f, "meal"),
            GrocerySort::Name => write!(f, "name"),
            GrocerySort::Portions => write!(f, "portions"),
        }
    }
}

impl FromStr for GrocerySort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "meal" => Ok(GrocerySort::Meal),
            "name" => Ok(GrocerySort::Name),
            "portions" | "quantity" => Ok(GrocerySort::Portions),
            _ => Err(format!(
                "Invalid sort '{}'. Valid options: meal, name, portions",
                s
            )),
        }
    }
}

/// Derive the grocery list for the current plan.
///
/// Pure and deterministic: slots whose meal is unknown are treated as empty,
/// and ingredient ids missing from the catalog contribute nothing.
pub fn derive_grocery_view(plan: &PlanState, catalog: &Catalog) -> GroceryView {
    let meal_ids_in_order: Vec<&str> = plan
        .meal_slots()
        .iter()
        .filter_map(|slot| slot.meal_id.as_deref())
        .collect();

    let mut portions: HashMap<&str, u32> = HashMap::new();
    let mut ingredient_order: Vec<&str> = Vec::new();
    let mut staples: Vec<&str> = Vec::new();
    let mut staples_seen: HashSet<&str> = HashSet::new();

    for meal in meal_ids_in_order
        .iter()
        .filter_map(|id| catalog.get_meal_by_id(id))
    {
        for ingredient_id in known_ingredients(catalog, &meal.ingredients) {
            let count = portions.entry(ingredient_id).or_insert_with(|| {
                ingredient_order.push(ingredient_id);
                0
            });
            *count += 1;
        }

        for seasoning_id in known_ingredients(catalog, &meal.seasoning) {
            if staples_seen.insert(seasoning_id) {
                staples.push(seasoning_id);
            }
        }
    }

    if portions.is_empty() {
        return GroceryView {
            is_empty: true,
            ..Default::default()
        };
    }

    let item = |ingredient_id: &str, portions: u32| GroceryItem {
        ingredient_id: ingredient_id.to_string(),
        portions,
        checked: plan.is_item_checked(ingredient_id),
    };

    let flat: Vec<GroceryItem> = ingredient_order
        .iter()
        .map(|id| item(id, portions[id]))
        .collect();

    let mut unique_meals: Vec<&str> = Vec::new();
    for &id in &meal_ids_in_order {
        if !unique_meals.contains(&id) {
            unique_meals.push(id);
        }
    }

    let mut assigned: HashSet<&str> = HashSet::new();
    let mut grouped_by_meal = Vec::new();
    for meal in unique_meals
        .iter()
        .filter_map(|id| catalog.get_meal_by_id(id))
    {
        let items: Vec<GroceryItem> = meal
            .ingredients
            .iter()
            .map(String::as_str)
            .filter(|id| portions.contains_key(*id) && assigned.insert(*id))
            .map(|id| item(id, portions[id]))
            .collect();

        if !items.is_empty() {
            grouped_by_meal.push(MealGroup {
                meal_id: meal.id.clone(),
                items,
            });
        }
    }

    let seasoning_staples = staples.iter().map(|id| item(id, 1)).collect();

    GroceryView {
        is_empty: flat.is_empty(),
        flat,
        grouped_by_meal,
        seasoning_staples,
    }
}

fn known_ingredients<'a>(
    catalog: &'a Catalog,
    ids: &'a [String],
) -> impl Iterator<Item = &'a str> + 'a {
    ids.iter()
        .map(String::as_str)
        .filter(move |id| catalog.get_ingredient_by_id(id).is_some())
}

fn visible(item: &GroceryItem, show_checked: bool) -> bool {
    show_checked || !item.checked
}

impl GroceryView {
    /// The flat list filtered by check state and ordered for display.
    ///
    /// Sorting never touches portion counts. `Meal` keeps derivation order.
    pub fn sorted_items(
        &self,
        catalog: &Catalog,
        sort: GrocerySort,
        show_checked: bool,
    ) -> Vec<&GroceryItem> {
        let mut items: Vec<&GroceryItem> = self
            .flat
            .iter()
            .filter(|i| visible(i, show_checked))
            .collect();

        match sort {
            GrocerySort::Meal => {}
            GrocerySort::Name => {
                items.sort_by_cached_key(|i| catalog.ingredient_name(&i.ingredient_id).to_lowercase());
            }
            GrocerySort::Portions => items.sort_by_key(|i| Reverse(i.portions)),
        }
        items
    }

    /// Meal groups with checked items optionally hidden. Groups that end up
    /// empty are dropped.
    pub fn visible_groups(&self, show_checked: bool) -> Vec<(&str, Vec<&GroceryItem>)> {
        self.grouped_by_meal
            .iter()
            .map(|group| {
                let items: Vec<&GroceryItem> = group
                    .items
                    .iter()
                    .filter(|i| visible(i, show_checked))
                    .collect();
                (group.meal_id.as_str(), items)
            })
            .filter(|(_, items)| !items.is_empty())
            .collect()
    }

    pub fn visible_staples(&self, show_checked: bool) -> Vec<&GroceryItem> {
        self.seasoning_staples
            .iter()
            .filter(|i| visible(i, show_checked))
            .collect()
    }

    /// (checked, total) over the flat list and staples combined.
    pub fn checked_count(&self) -> (usize, usize) {
        let all = self.flat.iter().chain(self.seasoning_staples.iter());
        let (checked, total) = all.fold((0, 0), |(c, t), i| (c + usize::from(i.checked), t + 1));
        (checked, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogData;
    use crate::models::{Ingredient, Meal};
    use chrono::NaiveDate;

    fn catalog() -> Catalog {
        Catalog::new(CatalogData {
            ingredients: vec![
                Ingredient::new("A", "Zucchini"),
                Ingredient::new("B", "Butter"),
                Ingredient::new("C", "Apples"),
                Ingredient::new("S1", "Salt"),
                Ingredient::new("S2", "Pepper"),
            ],
            tags: vec![],
            meals: vec![
                Meal::new("M1", "First")
                    .with_ingredients(["A", "B"])
                    .with_seasoning(["S1"]),
                Meal::new("M2", "Second")
                    .with_ingredients(["B", "C"])
                    .with_seasoning(["S1", "S2"]),
                Meal::new("M3", "Ghostly").with_ingredients(["ghost", "C"]),
                Meal::new("M4", "Nothing").with_seasoning(["S2"]),
            ],
        })
        .unwrap()
    }

    fn plan_with(meals: &[(&str, usize)]) -> PlanState {
        let mut plan = PlanState::new(7, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        for (meal_id, quantity) in meals {
            plan.add_meal(meal_id, *quantity).unwrap();
        }
        plan
    }

    fn portions(items: &[GroceryItem]) -> Vec<(&str, u32)> {
        items
            .iter()
            .map(|i| (i.ingredient_id.as_str(), i.portions))
            .collect()
    }

    #[test]
    fn test_empty_plan() {
        let view = derive_grocery_view(&plan_with(&[]), &catalog());
        assert!(view.is_empty);
        assert!(view.flat.is_empty());
        assert!(view.grouped_by_meal.is_empty());
        assert!(view.seasoning_staples.is_empty());
    }

    #[test]
    fn test_portions_count_meal_instances() {
        let plan = plan_with(&[("M1", 2), ("M2", 1)]);
        let view = derive_grocery_view(&plan, &catalog());

        assert!(!view.is_empty);
        assert_eq!(portions(&view.flat), vec![("A", 2), ("B", 3), ("C", 1)]);
    }

    #[test]
    fn test_grouped_by_meal_attributes_shared_ingredient_to_first_meal() {
        let plan = plan_with(&[("M1", 2), ("M2", 1)]);
        let view = derive_grocery_view(&plan, &catalog());

        assert_eq!(view.grouped_by_meal.len(), 2);
        assert_eq!(view.grouped_by_meal[0].meal_id, "M1");
        assert_eq!(portions(&view.grouped_by_meal[0].items), vec![("A", 2), ("B", 3)]);
        assert_eq!(view.grouped_by_meal[1].meal_id, "M2");
        assert_eq!(portions(&view.grouped_by_meal[1].items), vec![("C", 1)]);
    }

    #[test]
    fn test_group_order_follows_slot_order() {
        let plan = plan_with(&[("M2", 1), ("M1", 1)]);
        let view = derive_grocery_view(&plan, &catalog());

        let meal_ids: Vec<&str> = view
            .grouped_by_meal
            .iter()
            .map(|g| g.meal_id.as_str())
            .collect();
        assert_eq!(meal_ids, vec!["M2", "M1"]);
        assert_eq!(portions(&view.grouped_by_meal[1].items), vec![("A", 1)]);
    }

    #[test]
    fn test_groups_partition_flat_list() {
        let plan = plan_with(&[("M1", 1), ("M2", 2), ("M3", 1)]);
        let view = derive_grocery_view(&plan, &catalog());

        let mut grouped: Vec<&str> = view
            .grouped_by_meal
            .iter()
            .flat_map(|g| g.items.iter().map(|i| i.ingredient_id.as_str()))
            .collect();
        let mut flat: Vec<&str> = view.flat.iter().map(|i| i.ingredient_id.as_str()).collect();
        let total = grouped.len();
        grouped.sort();
        grouped.dedup();
        flat.sort();

        assert_eq!(total, grouped.len());
        assert_eq!(grouped, flat);
    }

    #[test]
    fn test_seasoning_staples_are_deduplicated() {
        let plan = plan_with(&[("M1", 2), ("M2", 1)]);
        let view = derive_grocery_view(&plan, &catalog());

        assert_eq!(portions(&view.seasoning_staples), vec![("S1", 1), ("S2", 1)]);
        assert!(view.flat.iter().all(|i| i.ingredient_id != "S1"));
    }

    #[test]
    fn test_unknown_ingredient_contributes_nothing() {
        let plan = plan_with(&[("M3", 2)]);
        let view = derive_grocery_view(&plan, &catalog());
        assert_eq!(portions(&view.flat), vec![("C", 2)]);
    }

    #[test]
    fn test_unknown_meal_treated_as_empty_slot() {
        let plan = plan_with(&[("deleted-meal", 3)]);
        let view = derive_grocery_view(&plan, &catalog());
        assert!(view.is_empty);
    }

    #[test]
    fn test_meal_with_only_seasoning_is_empty() {
        let plan = plan_with(&[("M4", 1)]);
        let view = derive_grocery_view(&plan, &catalog());
        assert!(view.is_empty);
        assert!(view.seasoning_staples.is_empty());
    }

    #[test]
    fn test_checked_state_comes_from_plan() {
        let mut plan = plan_with(&[("M1", 1)]);
        plan.toggle_item_checked("B");
        plan.toggle_item_checked("S1");
        let view = derive_grocery_view(&plan, &catalog());

        let checked: Vec<&str> = view
            .flat
            .iter()
            .chain(view.seasoning_staples.iter())
            .filter(|i| i.checked)
            .map(|i| i.ingredient_id.as_str())
            .collect();
        assert_eq!(checked, vec!["B", "S1"]);
        assert!(view.grouped_by_meal[0].items[1].checked);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let plan = plan_with(&[("M2", 1), ("M1", 3), ("M3", 1)]);
        let catalog = catalog();
        assert_eq!(
            derive_grocery_view(&plan, &catalog),
            derive_grocery_view(&plan, &catalog)
        );
    }

    #[test]
    fn test_sorted_items_by_name_and_portions() {
        let plan = plan_with(&[("M1", 2), ("M2", 1)]);
        let catalog = catalog();
        let view = derive_grocery_view(&plan, &catalog);

        let ids = |items: Vec<&GroceryItem>| -> Vec<String> {
            items.iter().map(|i| i.ingredient_id.clone()).collect()
        };

        assert_eq!(
            ids(view.sorted_items(&catalog, GrocerySort::Meal, true)),
            vec!["A", "B", "C"]
        );
        // Apples, Butter, Zucchini
        assert_eq!(
            ids(view.sorted_items(&catalog, GrocerySort::Name, true)),
            vec!["C", "B", "A"]
        );
        assert_eq!(
            ids(view.sorted_items(&catalog, GrocerySort::Portions, true)),
            vec!["B", "A", "C"]
        );
        assert_eq!(portions(&view.flat), vec![("A", 2), ("B", 3), ("C", 1)]);
    }

    #[test]
    fn test_hide_checked_filters_groups_and_staples() {
        let mut plan = plan_with(&[("M1", 1), ("M2", 1)]);
        plan.toggle_item_checked("C");
        plan.toggle_item_checked("S2");
        let catalog = catalog();
        let view = derive_grocery_view(&plan, &catalog);

        let groups = view.visible_groups(false);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, "M1");
        assert_eq!(view.visible_groups(true).len(), 2);

        assert_eq!(view.visible_staples(false).len(), 1);
        assert_eq!(view.sorted_items(&catalog, GrocerySort::Meal, false).len(), 2);
        assert_eq!(view.checked_count(), (2, 5));
    }

    #[test]
    fn test_grocery_sort_from_str() {
        assert_eq!(GrocerySort::from_str("Name").unwrap(), GrocerySort::Name);
        assert_eq!(
            GrocerySort::from_str("quantity").unwrap(),
            GrocerySort::Portions
        );
        assert!(GrocerySort::from_str("price").is_err());
    }
}
