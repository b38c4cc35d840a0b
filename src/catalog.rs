use log::{error, info};

use crate::api::RecipeApi;
use crate::model::Recipe;

/// The recipe list shown by the parent view, refreshed after each creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
}

impl From<Vec<Recipe>> for RecipeCatalog {
    fn from(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }
}

impl RecipeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Replace the list with the backend's current one.
    ///
    /// On failure the error is logged, the previous list is kept, and `false`
    /// is returned.
    pub async fn refresh<A: RecipeApi + ?Sized>(&mut self, api: &A) -> bool {
        match api.list_recipes().await {
            Ok(recipes) => {
                info!("Fetched {} recipes", recipes.len());
                self.recipes = recipes;
                true
            }
            Err(e) => {
                error!("Error fetching recipes: {}", e);
                false
            }
        }
    }

    /// Plain-text listing of every recipe.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for recipe in &self.recipes {
            render_recipe(recipe, &mut out);
        }
        out
    }
}

fn render_recipe(recipe: &Recipe, out: &mut String) {
    match recipe.description.as_deref() {
        Some(description) if !description.is_empty() => {
            out.push_str(&format!("{}: {}\n", recipe.title, description));
        }
        _ => out.push_str(&format!("{}\n", recipe.title)),
    }

    if let Some(author) = &recipe.author {
        out.push_str(&format!("  Author: {}\n", author.name));
    }

    out.push_str("  Ingredients:\n");
    for ingredient in &recipe.ingredients {
        let name = match (&ingredient.ingredient_name, ingredient.ingredient_id) {
            (Some(name), _) => name.clone(),
            (None, Some(id)) => format!("ingredient #{}", id),
            (None, None) => "unknown ingredient".to_string(),
        };
        out.push_str(&format!(
            "    - {} {} of {}\n",
            ingredient.quantity, ingredient.unit, name
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AuthorRef, RecipeIngredient};

    fn pasta() -> Recipe {
        Recipe {
            id: 1,
            title: "Pasta".to_string(),
            description: Some("Simple pasta".to_string()),
            author: Some(AuthorRef { id: 2, name: "Ben".to_string() }),
            ingredients: vec![
                RecipeIngredient {
                    ingredient_id: Some(5),
                    quantity: 200.0,
                    unit: "g".to_string(),
                    ingredient_name: Some("Spaghetti".to_string()),
                },
                RecipeIngredient {
                    ingredient_id: Some(8),
                    quantity: 0.5,
                    unit: "tsp".to_string(),
                    ingredient_name: None,
                },
            ],
        }
    }

    #[test]
    fn test_render_recipe() {
        let catalog = RecipeCatalog::from(vec![pasta()]);
        assert_eq!(
            catalog.render(),
            "Pasta: Simple pasta\n  Author: Ben\n  Ingredients:\n    - 200 g of Spaghetti\n    - 0.5 tsp of ingredient #8\n"
        );
    }

    #[test]
    fn test_render_without_author_or_description() {
        let mut recipe = pasta();
        recipe.author = None;
        recipe.description = None;
        recipe.ingredients.clear();

        let catalog = RecipeCatalog::from(vec![recipe]);
        assert_eq!(catalog.render(), "Pasta\n  Ingredients:\n");
    }

    #[test]
    fn test_empty_catalog_renders_nothing() {
        let catalog = RecipeCatalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.render(), "");
    }
}
