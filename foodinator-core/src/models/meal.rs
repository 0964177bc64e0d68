use serde::{Deserialize, Serialize};

use super::tag::TagCategory;

/// Tag assignment of a meal, one optional tag per single-select category
/// plus any number of convenience tags.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MealTags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_source: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub convenience: Vec<String>,
}

impl MealTags {
    /// Whether this assignment satisfies a selected tag of the given category.
    ///
    /// Single-select categories need exact equality, convenience needs membership.
    pub fn matches(&self, category: TagCategory, tag_id: &str) -> bool {
        match category {
            TagCategory::CookingMethod => self.cooking_method.as_deref() == Some(tag_id),
            TagCategory::Base => self.base.as_deref() == Some(tag_id),
            TagCategory::ProteinSource => self.protein_source.as_deref() == Some(tag_id),
            TagCategory::Convenience => self.convenience.iter().any(|t| t == tag_id),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MealSteps {
    #[serde(default)]
    pub prep: Vec<String>,
    #[serde(default)]
    pub cook: Vec<String>,
}

/// A recipe from the static catalog.
///
/// Ingredients and seasoning reference catalog ingredients by id; they are
/// resolved at display time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    pub ingredients: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub seasoning: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<MealTags>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<MealSteps>,
}

impl Meal {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_ref: None,
            ingredients: Vec::new(),
            seasoning: Vec::new(),
            tags: None,
            tools: Vec::new(),
            steps: None,
        }
    }

    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_seasoning<I, S>(mut self, seasoning: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.seasoning = seasoning.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags(mut self, tags: MealTags) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    pub fn with_tools(mut self, tools: Vec<String>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_steps(mut self, prep: Vec<String>, cook: Vec<String>) -> Self {
        self.steps = Some(MealSteps { prep, cook });
        self
    }

    pub fn contains_ingredient(&self, ingredient_id: &str) -> bool {
        self.ingredients.iter().any(|id| id == ingredient_id)
    }

    /// A meal without a tag assignment fails every tag filter.
    pub fn has_tag(&self, category: TagCategory, tag_id: &str) -> bool {
        self.tags
            .as_ref()
            .is_some_and(|tags| tags.matches(category, tag_id))
    }
}
