use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::api::RecipeApi;
use crate::config::ClientConfig;
use crate::error::{ApiError, ClientError};
use crate::model::{
    AuthorRef, IngredientRef, Recipe, RecipeCreateRequest, ValidationErrorBody,
};

/// [`RecipeApi`] over HTTP/JSON
#[derive(Debug, Clone)]
pub struct HttpRecipeApi {
    client: Client,
    base_url: String,
}

impl HttpRecipeApi {
    /// Create a client from configuration
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = normalize_base_url(&config.base_url)?;

        let mut builder =
            Client::builder().user_agent(concat!("recipe-client/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ClientError::HttpClient)?;

        Ok(Self { client, base_url })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        HttpRecipeApi {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(format!("{}: {}", path, e)))
    }
}

fn normalize_base_url(base_url: &str) -> Result<String, ClientError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Classify a non-success response to `POST /recipes`.
///
/// Only a 422 whose body carries a `detail` list of `{loc, msg}` entries is a
/// structured validation failure; everything else is opaque.
pub(crate) fn interpret_failure(status: StatusCode, body: String) -> ApiError {
    if status == StatusCode::UNPROCESSABLE_ENTITY {
        match serde_json::from_str::<ValidationErrorBody>(&body) {
            Ok(parsed) => return ApiError::Validation(parsed.detail),
            Err(e) => warn!("422 response without a usable detail list: {}", e),
        }
    }

    ApiError::Status {
        status: status.as_u16(),
        body,
    }
}

#[async_trait]
impl RecipeApi for HttpRecipeApi {
    async fn list_recipes(&self) -> Result<Vec<Recipe>, ApiError> {
        self.get_json("/recipes").await
    }

    async fn list_ingredients(&self) -> Result<Vec<IngredientRef>, ApiError> {
        self.get_json("/ingredients").await
    }

    async fn list_authors(&self) -> Result<Vec<AuthorRef>, ApiError> {
        self.get_json("/authors").await
    }

    async fn create_recipe(
        &self,
        request: &RecipeCreateRequest,
    ) -> Result<Option<Recipe>, ApiError> {
        let url = self.url("/recipes");
        debug!("POST {}", url);

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(interpret_failure(status, body));
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Recipe created but the response body could not be read: {}", e);
                return Ok(None);
            }
        };
        match serde_json::from_str::<Recipe>(&body) {
            Ok(recipe) => Ok(Some(recipe)),
            Err(e) => {
                warn!("Recipe created but the response is not a recipe: {}", e);
                Ok(None)
            }
        }
    }
}
