//! Meal search: free-text term, required ingredients and tags, all ANDed.

use crate::catalog::Catalog;
use crate::models::{Ingredient, Meal};
use crate::search::SearchState;

#[derive(Debug, Clone)]
pub struct FilterResult<'a> {
    pub candidate_meals: Vec<&'a Meal>,
    /// Ingredients whose name matches the term and that are not yet selected.
    pub ingredient_suggestions: Vec<&'a Ingredient>,
    /// A filter is active but nothing matched. Not set when no filter is
    /// applied at all.
    pub no_results: bool,
}

pub fn filter_catalog<'a>(catalog: &'a Catalog, search: &SearchState) -> FilterResult<'a> {
    let term = search.normalized_term();

    let ingredient_suggestions = if term.is_empty() {
        Vec::new()
    } else {
        catalog
            .ingredients()
            .iter()
            .filter(|i| i.name_matches(&term))
            .filter(|i| !search.selected_ingredients.contains(&i.id))
            .collect()
    };

    let candidate_meals: Vec<&Meal> = catalog
        .meals()
        .iter()
        .filter(|meal| term.is_empty() || meal.name.to_lowercase().contains(&term))
        .filter(|meal| {
            search
                .selected_ingredients
                .iter()
                .all(|id| meal.contains_ingredient(id))
        })
        .filter(|meal| {
            search.selected_tags.is_empty() || matches_all_tags(catalog, meal, &search.selected_tags)
        })
        .collect();

    let no_results = search.has_active_filters() && candidate_meals.is_empty();

    FilterResult {
        candidate_meals,
        ingredient_suggestions,
        no_results,
    }
}

/// Unknown tag ids never match.
fn matches_all_tags(catalog: &Catalog, meal: &Meal, tag_ids: &[String]) -> bool {
    meal.tags.is_some()
        && tag_ids.iter().all(|tag_id| {
            catalog
                .get_tag_by_id(tag_id)
                .is_some_and(|tag| meal.has_tag(tag.category, tag_id))
        })
}
