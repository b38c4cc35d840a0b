pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod form;
pub mod model;

pub use api::{HttpRecipeApi, RecipeApi};
pub use catalog::RecipeCatalog;
pub use crate::config::{load_config, ClientConfig};
pub use error::{ApiError, ClientError};
pub use form::{
    DraftField, FormState, IngredientRow, LineField, LineItem, Phase, RecipeDraft, RecipeForm,
    ReferenceData, RowEvent, SelectOption, SubmitOutcome,
};
pub use model::{
    AuthorRef, IngredientLine, IngredientRef, LocSegment, Recipe, RecipeCreateRequest,
    RecipeIngredient, ValidationErrorEntry,
};

/// Build a client for the backend at `base_url` using default settings.
pub fn connect(base_url: &str) -> Result<HttpRecipeApi, ClientError> {
    HttpRecipeApi::new(&ClientConfig::default().with_base_url(base_url))
}

/// Fetch the ingredient and author lists from the backend at `base_url`.
///
/// Fetch failures are logged and yield empty lists.
pub async fn load_reference_data(base_url: &str) -> Result<ReferenceData, ClientError> {
    let api = connect(base_url)?;
    Ok(ReferenceData::load(&api).await)
}

/// Fetch every recipe from the backend at `base_url`.
pub async fn fetch_recipes(base_url: &str) -> Result<Vec<Recipe>, ClientError> {
    let api = connect(base_url)?;
    Ok(api.list_recipes().await?)
}
