//! Transient search and filter selections made while browsing meals.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::models::TagCategory;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub selected_ingredients: Vec<String>,
    #[serde(default)]
    pub selected_tags: Vec<String>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lowercased, trimmed search term used for matching.
    pub fn normalized_term(&self) -> String {
        self.search_term.trim().to_lowercase()
    }

    /// True when any of term, ingredient or tag filters is set.
    pub fn has_active_filters(&self) -> bool {
        !self.search_term.trim().is_empty()
            || !self.selected_ingredients.is_empty()
            || !self.selected_tags.is_empty()
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn add_ingredient(&mut self, ingredient_id: &str) {
        if !self.selected_ingredients.iter().any(|i| i == ingredient_id) {
            self.selected_ingredients.push(ingredient_id.to_string());
            tracing::debug!(ingredient_id, "selected ingredient filter");
        }
    }

    pub fn remove_ingredient(&mut self, ingredient_id: &str) -> bool {
        let len_before = self.selected_ingredients.len();
        self.selected_ingredients.retain(|i| i != ingredient_id);
        self.selected_ingredients.len() != len_before
    }

    pub fn clear_ingredients(&mut self) {
        self.selected_ingredients.clear();
    }

    pub fn is_tag_selected(&self, tag_id: &str) -> bool {
        self.selected_tags.iter().any(|t| t == tag_id)
    }

    /// The active tag of a category, if any.
    pub fn selected_tag_in_category(&self, catalog: &Catalog, category: TagCategory) -> Option<&str> {
        self.selected_tags
            .iter()
            .find(|id| {
                catalog
                    .get_tag_by_id(id)
                    .is_some_and(|t| t.category == category)
            })
            .map(String::as_str)
    }

    /// Activate a tag.
    ///
    /// In a single-select category any other active tag of that category is
    /// deactivated first. Unknown tag ids are ignored and return false.
    pub fn add_tag(&mut self, catalog: &Catalog, tag_id: &str) -> bool {
        let Some(tag) = catalog.get_tag_by_id(tag_id) else {
            return false;
        };
        if self.is_tag_selected(tag_id) {
            return true;
        }

        if tag.category.is_single_select() {
            self.selected_tags.retain(|id| {
                catalog
                    .get_tag_by_id(id)
                    .map_or(true, |t| t.category != tag.category)
            });
        }

        self.selected_tags.push(tag_id.to_string());
        tracing::debug!(tag_id, category = %tag.category, "selected tag filter");
        true
    }

    pub fn remove_tag(&mut self, tag_id: &str) -> bool {
        let len_before = self.selected_tags.len();
        self.selected_tags.retain(|t| t != tag_id);
        self.selected_tags.len() != len_before
    }

    /// Deactivate the tag if active, otherwise activate it with
    /// [`add_tag`](SearchState::add_tag) semantics. Returns whether the tag
    /// is now active.
    pub fn toggle_tag(&mut self, catalog: &Catalog, tag_id: &str) -> bool {
        if self.remove_tag(tag_id) {
            false
        } else {
            self.add_tag(catalog, tag_id)
        }
    }

    pub fn clear_tags(&mut self) {
        self.selected_tags.clear();
    }
}
