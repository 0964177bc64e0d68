use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The dimension a tag classifies a meal along.
///
/// `CookingMethod`, `Base` and `ProteinSource` are single-select while
/// filtering: at most one tag of each may be active. `Convenience` tags
/// accumulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TagCategory {
    CookingMethod,
    Base,
    ProteinSource,
    Convenience,
}

impl TagCategory {
    pub const ALL: [TagCategory; 4] = [
        TagCategory::CookingMethod,
        TagCategory::Base,
        TagCategory::ProteinSource,
        TagCategory::Convenience,
    ];

    pub fn is_single_select(&self) -> bool {
        !matches!(self, TagCategory::Convenience)
    }

    /// Human-readable heading for the category.
    pub fn label(&self) -> &'static str {
        match self {
            TagCategory::CookingMethod => "Cooking method",
            TagCategory::Base => "Base",
            TagCategory::ProteinSource => "Protein source",
            TagCategory::Convenience => "Convenience",
        }
    }
}

impl fmt::Display for TagCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagCategory::CookingMethod => write!(f, "cookingMethod"),
            TagCategory::Base => write!(f, "base"),
            TagCategory::ProteinSource => write!(f, "proteinSource"),
            TagCategory::Convenience => write!(f, "convenience"),
        }
    }
}

impl FromStr for TagCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(&['-', '_'][..], "").as_str() {
            "cookingmethod" => Ok(TagCategory::CookingMethod),
            "base" => Ok(TagCategory::Base),
            "proteinsource" => Ok(TagCategory::ProteinSource),
            "convenience" => Ok(TagCategory::Convenience),
            _ => Err(format!(
                "Invalid tag category '{}'. Valid options: cookingMethod, base, proteinSource, convenience",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub category: TagCategory,
}

impl Tag {
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: TagCategory) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
