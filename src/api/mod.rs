mod http;

pub use http::HttpRecipeApi;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::model::{AuthorRef, IngredientRef, Recipe, RecipeCreateRequest};

/// Operations the client needs from the recipe backend
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// `GET /recipes`
    async fn list_recipes(&self) -> Result<Vec<Recipe>, ApiError>;

    /// `GET /ingredients`
    async fn list_ingredients(&self) -> Result<Vec<IngredientRef>, ApiError>;

    /// `GET /authors`
    async fn list_authors(&self) -> Result<Vec<AuthorRef>, ApiError>;

    /// `POST /recipes`
    ///
    /// Any 2xx counts as created. The stored recipe is returned when the
    /// response body decodes as one, `None` otherwise.
    async fn create_recipe(
        &self,
        request: &RecipeCreateRequest,
    ) -> Result<Option<Recipe>, ApiError>;
}
