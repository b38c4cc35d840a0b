use log::{debug, error};

use crate::api::RecipeApi;
use crate::form::row::SelectOption;
use crate::model::{AuthorRef, IngredientRef};

/// Label of the empty choice in the author selector.
pub const AUTHOR_PLACEHOLDER: &str = "-- choose author --";

/// Lookup lists used to populate the form's selectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    pub ingredients: Vec<IngredientRef>,
    pub authors: Vec<AuthorRef>,
}

impl ReferenceData {
    /// Fetch ingredients and authors concurrently.
    ///
    /// A failed fetch is logged and leaves its list empty; the other list is
    /// unaffected.
    pub async fn load<A: RecipeApi + ?Sized>(api: &A) -> Self {
        let (ingredients, authors) = tokio::join!(api.list_ingredients(), api.list_authors());

        let ingredients = ingredients.unwrap_or_else(|e| {
            error!("Error fetching ingredients: {}", e);
            Vec::new()
        });
        let authors = authors.unwrap_or_else(|e| {
            error!("Error fetching authors: {}", e);
            Vec::new()
        });
        debug!(
            "Loaded {} ingredients and {} authors",
            ingredients.len(),
            authors.len()
        );

        Self {
            ingredients,
            authors,
        }
    }

    pub fn ingredient(&self, id: &str) -> Option<&IngredientRef> {
        let id: i64 = id.trim().parse().ok()?;
        self.ingredients.iter().find(|ingredient| ingredient.id == id)
    }

    pub fn author(&self, id: &str) -> Option<&AuthorRef> {
        let id: i64 = id.trim().parse().ok()?;
        self.authors.iter().find(|author| author.id == id)
    }

    /// Choices for the author selector, with `selected` marked.
    pub fn author_options(&self, selected: &str) -> Vec<SelectOption> {
        SelectOption::list(
            AUTHOR_PLACEHOLDER,
            self.authors.iter().map(|a| (a.id, a.name.as_str())),
            selected,
        )
    }
}
