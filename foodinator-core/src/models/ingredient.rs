use serde::{Deserialize, Serialize};
use std::fmt;

/// A grocery ingredient from the static catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
}

impl Ingredient {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Case-insensitive substring match against the ingredient name.
    ///
    /// `term` is expected to be lowercased and trimmed already.
    pub fn name_matches(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(term)
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
