use clap::{Parser, Subcommand};
use log::warn;
use std::process::ExitCode;

use recipe_client::{
    load_config, ClientError, DraftField, HttpRecipeApi, LineField, RecipeApi, RecipeCatalog,
    RecipeForm, SubmitOutcome,
};

#[derive(Parser)]
#[command(name = "recipe-client")]
#[command(version, about = "Browse and create recipes on a recipe backend", long_about = None)]
struct Cli {
    /// Backend address (overrides recipes.toml and RECIPES__BASE_URL)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all recipes
    List,
    /// List known ingredients
    Ingredients,
    /// List known authors
    Authors,
    /// Create a recipe
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Author id
        #[arg(long)]
        author: String,
        /// Ingredient line, repeatable (e.g. 5:200:g)
        #[arg(long = "ingredient", value_name = "ID:QTY:UNIT", value_parser = parse_ingredient, required = true)]
        ingredients: Vec<IngredientArg>,
    },
}

#[derive(Debug, Clone)]
struct IngredientArg {
    ingredient_id: String,
    quantity: String,
    unit: String,
}

fn parse_ingredient(value: &str) -> Result<IngredientArg, String> {
    let parts: Vec<&str> = value.splitn(3, ':').collect();
    match parts.as_slice() {
        [ingredient_id, quantity, unit] => Ok(IngredientArg {
            ingredient_id: ingredient_id.to_string(),
            quantity: quantity.to_string(),
            unit: unit.to_string(),
        }),
        _ => Err(format!("expected ID:QTY:UNIT, got '{}'", value)),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, ClientError> {
    let mut config = load_config()?;
    if let Some(server) = cli.server {
        config = config.with_base_url(server);
    }
    let api = HttpRecipeApi::new(&config)?;

    match cli.command {
        Commands::List => {
            let catalog = RecipeCatalog::from(api.list_recipes().await?);
            print!("{}", catalog.render());
        }
        Commands::Ingredients => {
            for ingredient in api.list_ingredients().await? {
                println!("{:>4}  {}", ingredient.id, ingredient.name);
            }
        }
        Commands::Authors => {
            for author in api.list_authors().await? {
                println!("{:>4}  {}", author.id, author.name);
            }
        }
        Commands::Create {
            title,
            description,
            author,
            ingredients,
        } => return Ok(create(api, title, description, author, ingredients).await),
    }

    Ok(ExitCode::SUCCESS)
}

async fn create(
    api: HttpRecipeApi,
    title: String,
    description: String,
    author: String,
    ingredients: Vec<IngredientArg>,
) -> ExitCode {
    let form = RecipeForm::mount(api).await;

    form.set_field(DraftField::Title, title);
    form.set_field(DraftField::Description, description);
    form.set_field(DraftField::AuthorId, author);
    for (index, line) in ingredients.into_iter().enumerate() {
        if index > 0 {
            form.add_ingredient();
        }
        form.update_ingredient(index, LineField::IngredientId, line.ingredient_id);
        form.update_ingredient(index, LineField::Quantity, line.quantity);
        form.update_ingredient(index, LineField::Unit, line.unit);
    }

    let state = form.snapshot();
    let author_id = state.draft.author_id();
    if !state.reference.authors.is_empty() && state.reference.author(author_id).is_none() {
        warn!("Author {} is not one of the known authors", author_id);
    }
    for row in state.rows() {
        if !state.reference.ingredients.is_empty() && row.selected_ingredient().is_none() {
            warn!(
                "Ingredient {} is not one of the known ingredients",
                row.value(LineField::IngredientId)
            );
        }
    }

    match form.submit().await {
        SubmitOutcome::Created(_) => {
            println!("Recipe created successfully!");
            if let Some(listing) = refreshed_listing(form.api()).await {
                print!("{}", listing);
            }
            ExitCode::SUCCESS
        }
        SubmitOutcome::Busy => {
            eprintln!("A submission is already in progress.");
            ExitCode::FAILURE
        }
        SubmitOutcome::Invalid(_) | SubmitOutcome::Failed => {
            eprintln!("Validation Errors:");
            for message in form.snapshot().error_messages() {
                eprintln!("  {}", message);
            }
            ExitCode::FAILURE
        }
    }
}

/// Re-fetch the recipe list, or `None` if the backend could not be reached.
async fn refreshed_listing<A: RecipeApi>(api: &A) -> Option<String> {
    let mut catalog = RecipeCatalog::new();
    if catalog.refresh(api).await {
        Some(catalog.render())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ingredient() {
        let arg = parse_ingredient("5:200:g").unwrap();
        assert_eq!(arg.ingredient_id, "5");
        assert_eq!(arg.quantity, "200");
        assert_eq!(arg.unit, "g");
    }

    #[test]
    fn test_parse_ingredient_unit_may_contain_colon() {
        let arg = parse_ingredient("3:1:cup:packed").unwrap();
        assert_eq!(arg.unit, "cup:packed");
    }

    #[test]
    fn test_parse_ingredient_rejects_short_form() {
        assert!(parse_ingredient("5:200").is_err());
    }

    #[test]
    fn test_cli_requires_an_ingredient() {
        let result = Cli::try_parse_from([
            "recipe-client",
            "create",
            "--title",
            "Pasta",
            "--description",
            "Simple pasta",
            "--author",
            "2",
        ]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_refreshed_listing_renders_recipes() {
        let mut server = mockito::Server::new_async().await;
        let _recipes = server
            .mock("GET", "/recipes")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"id":1,"title":"Pasta","description":"Simple pasta","author":null,
                    "ingredients":[{"ingredient_id":5,"ingredient_name":"Spaghetti","quantity":200,"unit":"g"}]}]"#,
            )
            .create_async()
            .await;

        let api = HttpRecipeApi::with_base_url(server.url());
        let listing = refreshed_listing(&api).await.unwrap();
        assert!(listing.starts_with("Pasta: Simple pasta\n"));
        assert!(listing.contains("    - 200 g of Spaghetti\n"));
    }

    #[tokio::test]
    async fn test_refreshed_listing_unreachable_backend() {
        let api = HttpRecipeApi::with_base_url("http://127.0.0.1:9");
        assert_eq!(refreshed_listing(&api).await, None);
    }
}
