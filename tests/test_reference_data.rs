use mockito::Server;
use recipe_client::{fetch_recipes, load_reference_data, ClientError, RecipeCatalog};

#[tokio::test]
async fn test_loads_both_lists() {
    let mut server = Server::new_async().await;
    let ingredients = server
        .mock("GET", "/ingredients")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id":1,"name":"Flour"},{"id":2,"name":"Egg"}]"#)
        .create_async()
        .await;
    let authors = server
        .mock("GET", "/authors")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id":4,"name":"Dana","email":"dana@example.com"}]"#)
        .create_async()
        .await;

    let data = load_reference_data(&server.url()).await.unwrap();

    ingredients.assert_async().await;
    authors.assert_async().await;
    let names: Vec<_> = data.ingredients.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Flour", "Egg"]);
    assert_eq!(data.author("4").map(|a| a.name.as_str()), Some("Dana"));
}

#[tokio::test]
async fn test_failed_list_stays_empty() {
    let mut server = Server::new_async().await;
    let _ingredients = server
        .mock("GET", "/ingredients")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id":1,"name":"Flour"}]"#)
        .create_async()
        .await;
    let _authors = server
        .mock("GET", "/authors")
        .with_status(503)
        .with_body("unavailable")
        .create_async()
        .await;

    let data = load_reference_data(&server.url()).await.unwrap();

    assert_eq!(data.ingredients.len(), 1);
    assert!(data.authors.is_empty());
}

#[tokio::test]
async fn test_invalid_base_url() {
    let result = load_reference_data("ftp://example.com").await;
    assert!(matches!(result, Err(ClientError::InvalidBaseUrl(_))));
}

#[tokio::test]
async fn test_fetch_and_render_recipes() {
    let mut server = Server::new_async().await;
    let _recipes = server
        .mock("GET", "/recipes")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{
                "id": 1,
                "title": "Omelette",
                "description": "Eggs in a pan",
                "author": {"id": 4, "name": "Dana", "email": "dana@example.com"},
                "ingredients": [{"ingredient_id": 2, "quantity": 3, "unit": "pcs", "ingredient_name": "Egg"}]
            }]"#,
        )
        .create_async()
        .await;

    let recipes = fetch_recipes(&server.url()).await.unwrap();
    let catalog = RecipeCatalog::from(recipes);

    assert_eq!(
        catalog.render(),
        "Omelette: Eggs in a pan\n  Author: Dana\n  Ingredients:\n    - 3 pcs of Egg\n"
    );
}

#[tokio::test]
async fn test_refresh_keeps_previous_list_on_failure() {
    let mut server = Server::new_async().await;
    let ok = server
        .mock("GET", "/recipes")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id": 1, "title": "Toast", "ingredients": []}]"#)
        .expect(1)
        .create_async()
        .await;

    let api = recipe_client::connect(&server.url()).unwrap();
    let mut catalog = RecipeCatalog::new();
    assert!(catalog.refresh(&api).await);
    ok.assert_async().await;
    ok.remove_async().await;

    let _failing = server
        .mock("GET", "/recipes")
        .with_status(500)
        .create_async()
        .await;

    assert!(!catalog.refresh(&api).await);
    assert_eq!(catalog.recipes().len(), 1);
    assert_eq!(catalog.recipes()[0].title, "Toast");
}
