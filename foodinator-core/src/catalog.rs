//! Static, read-only tables of ingredients, tags and meals.
//!
//! The catalog is loaded once at start-up, either from the data embedded in
//! the crate or from a JSON file with the same shape. Lookups never fail: an
//! unknown id simply resolves to `None`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{Ingredient, Meal, Tag, TagCategory};

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate {kind} id in catalog: {id}")]
    DuplicateId { kind: &'static str, id: String },
}

/// On-disk shape of a catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub meals: Vec<Meal>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    ingredients: Vec<Ingredient>,
    tags: Vec<Tag>,
    meals: Vec<Meal>,
    ingredient_index: HashMap<String, usize>,
    tag_index: HashMap<String, usize>,
    meal_index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids within each table.
    pub fn new(data: CatalogData) -> Result<Self, CatalogError> {
        let ingredient_index = index_by_id("ingredient", &data.ingredients, |i| &i.id)?;
        let tag_index = index_by_id("tag", &data.tags, |t| &t.id)?;
        let meal_index = index_by_id("meal", &data.meals, |m| &m.id)?;

        Ok(Self {
            ingredients: data.ingredients,
            tags: data.tags,
            meals: data.meals,
            ingredient_index,
            tag_index,
            meal_index,
        })
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;
        Self::new(data)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn get_meal_by_id(&self, id: &str) -> Option<&Meal> {
        self.meal_index.get(id).map(|&i| &self.meals[i])
    }

    pub fn get_ingredient_by_id(&self, id: &str) -> Option<&Ingredient> {
        self.ingredient_index.get(id).map(|&i| &self.ingredients[i])
    }

    pub fn get_tag_by_id(&self, id: &str) -> Option<&Tag> {
        self.tag_index.get(id).map(|&i| &self.tags[i])
    }

    /// Tags of one category, in catalog order.
    pub fn get_tags_by_category(&self, category: TagCategory) -> Vec<&Tag> {
        self.tags
            .iter()
            .filter(|t| t.category == category)
            .collect()
    }

    /// Display name of an ingredient, or an empty string for unknown ids.
    pub fn ingredient_name(&self, id: &str) -> &str {
        self.get_ingredient_by_id(id)
            .map(|i| i.name.as_str())
            .unwrap_or("")
    }

    fn ingredient_names(&self, ids: &[String]) -> Vec<&str> {
        ids.iter()
            .filter_map(|id| self.get_ingredient_by_id(id))
            .map(|i| i.name.as_str())
            .collect()
    }

    /// Resolve everything needed to present a meal's recipe card.
    pub fn meal_details(&self, id: &str) -> Option<MealDetails<'_>> {
        let meal = self.get_meal_by_id(id)?;

        let convenience_tags = meal
            .tags
            .as_ref()
            .map(|tags| {
                tags.convenience
                    .iter()
                    .filter_map(|id| self.get_tag_by_id(id))
                    .map(|t| t.name.as_str())
                    .collect()
            })
            .unwrap_or_default();

        Some(MealDetails {
            meal,
            ingredient_names: self.ingredient_names(&meal.ingredients),
            seasoning_names: self.ingredient_names(&meal.seasoning),
            convenience_tags,
        })
    }
}

fn index_by_id<T>(
    kind: &'static str,
    items: &[T],
    id_of: impl Fn(&T) -> &String,
) -> Result<HashMap<String, usize>, CatalogError> {
    let mut index = HashMap::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let id = id_of(item);
        if index.insert(id.clone(), i).is_some() {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.clone(),
            });
        }
    }
    Ok(index)
}

/// A meal with its catalog references resolved to display names.
///
/// Dangling ingredient and tag ids are dropped.
#[derive(Debug, Clone)]
pub struct MealDetails<'a> {
    pub meal: &'a Meal,
    pub ingredient_names: Vec<&'a str>,
    pub seasoning_names: Vec<&'a str>,
    pub convenience_tags: Vec<&'a str>,
}

impl fmt::Display for MealDetails<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = &self.meal.name;
        writeln!(f, "{}", name)?;
        writeln!(f, "{}", "=".repeat(name.chars().count()))?;

        if !self.convenience_tags.is_empty() {
            writeln!(f, "Tags: {}", self.convenience_tags.join(", "))?;
        }

        writeln!(f, "\nIngredients:")?;
        for ingredient in &self.ingredient_names {
            writeln!(f, "  - {}", ingredient)?;
        }

        if !self.seasoning_names.is_empty() {
            writeln!(f, "\nSeasoning: {}", self.seasoning_names.join(", "))?;
        }

        writeln!(f, "\nTools:")?;
        if self.meal.tools.is_empty() {
            writeln!(f, "  - No tools specified")?;
        } else {
            for tool in &self.meal.tools {
                writeln!(f, "  - {}", tool)?;
            }
        }

        if let Some(steps) = &self.meal.steps {
            for (title, list) in [("Prep", &steps.prep), ("Cook", &steps.cook)] {
                if list.is_empty() {
                    continue;
                }
                writeln!(f, "\n{}:", title)?;
                for (n, step) in list.iter().enumerate() {
                    writeln!(f, "  {}. {}", n + 1, step)?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealTags;

    fn small_catalog() -> Catalog {
        Catalog::new(CatalogData {
            ingredients: vec![
                Ingredient::new("a", "Apples"),
                Ingredient::new("b", "Butter"),
                Ingredient::new("s1", "Salt"),
            ],
            tags: vec![
                Tag::new("oven", "Oven", TagCategory::CookingMethod),
                Tag::new("quick", "Quick", TagCategory::Convenience),
                Tag::new("grill", "Grill", TagCategory::CookingMethod),
            ],
            meals: vec![Meal::new("m1", "Apple Crumble")
                .with_ingredients(["a", "b", "ghost"])
                .with_seasoning(["s1"])
                .with_tags(MealTags {
                    cooking_method: Some("oven".into()),
                    convenience: vec!["quick".into(), "missing".into()],
                    ..Default::default()
                })],
        })
        .unwrap()
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.meals().is_empty());
        assert!(!catalog.ingredients().is_empty());
        for category in TagCategory::ALL {
            assert!(!catalog.get_tags_by_category(category).is_empty());
        }
    }

    #[test]
    fn test_builtin_catalog_references_resolve() {
        let catalog = Catalog::builtin().unwrap();
        for meal in catalog.meals() {
            for id in meal.ingredients.iter().chain(meal.seasoning.iter()) {
                assert!(
                    catalog.get_ingredient_by_id(id).is_some(),
                    "{} references unknown ingredient {}",
                    meal.id,
                    id
                );
            }
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = small_catalog();
        assert_eq!(catalog.get_meal_by_id("m1").unwrap().name, "Apple Crumble");
        assert_eq!(catalog.get_ingredient_by_id("b").unwrap().name, "Butter");
        assert_eq!(
            catalog.get_tag_by_id("quick").unwrap().category,
            TagCategory::Convenience
        );
        assert!(catalog.get_meal_by_id("nope").is_none());
        assert!(catalog.get_ingredient_by_id("nope").is_none());
        assert!(catalog.get_tag_by_id("nope").is_none());
    }

    #[test]
    fn test_tags_by_category_preserves_order() {
        let catalog = small_catalog();
        let ids: Vec<&str> = catalog
            .get_tags_by_category(TagCategory::CookingMethod)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["oven", "grill"]);
        assert!(catalog.get_tags_by_category(TagCategory::Base).is_empty());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = Catalog::new(CatalogData {
            ingredients: vec![Ingredient::new("a", "A"), Ingredient::new("a", "Again")],
            ..Default::default()
        });
        let err = result.unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { kind: "ingredient", .. }));
        assert!(err.to_string().contains("Duplicate ingredient id"));
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            Catalog::from_json("{ not json"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{"ingredients": [{"id": "x", "name": "X"}], "meals": [{"id": "m", "name": "M", "ingredients": ["x"]}]}"#,
        )
        .unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.meals().len(), 1);
        assert!(catalog.tags().is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Catalog::load(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read catalog"));
    }

    #[test]
    fn test_meal_details_skips_dangling_ids() {
        let catalog = small_catalog();
        let details = catalog.meal_details("m1").unwrap();
        assert_eq!(details.ingredient_names, vec!["Apples", "Butter"]);
        assert_eq!(details.seasoning_names, vec!["Salt"]);
        assert_eq!(details.convenience_tags, vec!["Quick"]);
        assert!(catalog.meal_details("nope").is_none());
    }

    #[test]
    fn test_meal_details_display() {
        let catalog = small_catalog();
        let output = catalog.meal_details("m1").unwrap().to_string();
        assert!(output.starts_with("Apple Crumble\n============="));
        assert!(output.contains("  - Apples"));
        assert!(output.contains("No tools specified"));
        assert!(output.contains("Seasoning: Salt"));
    }

    #[test]
    fn test_ingredient_name_unknown_is_empty() {
        let catalog = small_catalog();
        assert_eq!(catalog.ingredient_name("a"), "Apples");
        assert_eq!(catalog.ingredient_name("ghost"), "");
    }
}
