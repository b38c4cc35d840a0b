use serde::{Deserialize, Serialize};
use std::fmt;

/// Message shown when a submission fails without a structured explanation.
pub const GENERIC_ERROR_MESSAGE: &str = "Unexpected error occurred.";

/// Ingredient lookup entry as served by `GET /ingredients`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientRef {
    pub id: i64,
    pub name: String,
}

/// Author lookup entry as served by `GET /authors`.
///
/// The backend also sends an email address; it is not needed here and is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRef {
    pub id: i64,
    pub name: String,
}

/// A stored recipe as returned by `GET /recipes` and `POST /recipes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author: Option<AuthorRef>,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
}

/// One ingredient line of a stored recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    #[serde(default)]
    pub ingredient_id: Option<i64>,
    pub quantity: f64,
    pub unit: String,
    #[serde(default)]
    pub ingredient_name: Option<String>,
}

/// Body of `POST /recipes`.
///
/// Numeric fields are `None` when the draft text did not parse; they are
/// serialized as `null` and left for the backend to reject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeCreateRequest {
    pub title: String,
    pub description: String,
    pub author_id: Option<i64>,
    pub ingredients: Vec<IngredientLine>,
}

/// One line item of a [`RecipeCreateRequest`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientLine {
    pub ingredient_id: Option<i64>,
    pub quantity: Option<f64>,
    pub unit: String,
}

/// A path segment of a validation error location, e.g. `"body"` or `0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocSegment {
    Index(i64),
    Name(String),
}

impl fmt::Display for LocSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocSegment::Index(i) => write!(f, "{}", i),
            LocSegment::Name(name) => f.write_str(name),
        }
    }
}

impl From<&str> for LocSegment {
    fn from(name: &str) -> Self {
        LocSegment::Name(name.to_string())
    }
}

impl From<usize> for LocSegment {
    fn from(index: usize) -> Self {
        LocSegment::Index(index as i64)
    }
}

/// A single validation problem, in the backend's `{loc, msg}` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorEntry {
    #[serde(rename = "loc")]
    pub location: Vec<LocSegment>,
    #[serde(rename = "msg")]
    pub message: String,
}

impl ValidationErrorEntry {
    pub fn new(location: Vec<LocSegment>, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
        }
    }

    /// The catch-all entry used for failures that carry no field information.
    pub fn generic() -> Self {
        Self::new(Vec::new(), GENERIC_ERROR_MESSAGE)
    }

    /// Location segments joined with `.`, e.g. `body.ingredients.0.unit`.
    pub fn path(&self) -> String {
        self.location
            .iter()
            .map(|segment| segment.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for ValidationErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.location.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{} → {}", self.path(), self.message)
        }
    }
}

/// Error body of a 422 response.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationErrorBody {
    pub detail: Vec<ValidationErrorEntry>,
}
