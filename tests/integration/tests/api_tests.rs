//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;

/// Register a fresh user and log them in
async fn register_and_login(server: &TestServer) -> (RegisteredUser, String) {
    let request = RegisterRequest::unique();
    let response = server.post("/api/users", &request).await.unwrap();
    let user: RegisteredUser = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post("/api/auth/token/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    let token: TokenResponse = assert_json(response, StatusCode::OK).await.unwrap();

    (user, token.auth_token)
}

async fn error_code(response: reqwest::Response) -> String {
    let body: ErrorResponse = response.json().await.unwrap();
    body.error.code
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth and User Tests
// ============================================================================

#[tokio::test]
async fn test_register_login_and_me() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (user, token) = register_and_login(&server).await;
    assert!(!token.is_empty());

    let response = server.get_auth("/api/users/me", &token).await.unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(me.id, user.id);
    assert_eq!(me.email, user.email);
    assert_eq!(me.username, user.username);
    assert!(!me.is_subscribed);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/api/users", &request).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let mut again = RegisterRequest::unique();
    again.email = request.email.clone();
    let response = server.post("/api/users", &again).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await, "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let login_req = LoginRequest {
        email: "nobody@example.com".to_string(),
        password: "wrong-password".to_string(),
    };

    let response = server.post("/api/auth/token/login", &login_req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await, "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_logout_revokes_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = register_and_login(&server).await;

    let response = server
        .post_auth_empty("/api/auth/token/logout", &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_auth("/api/users/me", &token).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_get_current_user_unauthorized() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/users/me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_page_past_the_end_is_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/users?page=1000000&limit=100").await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(error_code(response).await, "INVALID_PAGE");
}

// ============================================================================
// Subscription Tests
// ============================================================================

#[tokio::test]
async fn test_subscription_guards() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (reader, token) = register_and_login(&server).await;
    let (author, _) = register_and_login(&server).await;

    // Following oneself is rejected
    let response = server
        .post_auth_empty(&format!("/api/users/{}/subscribe", reader.id), &token)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await, "CANNOT_SUBSCRIBE_TO_SELF");

    let path = format!("/api/users/{}/subscribe", author.id);
    let response = server.post_auth_empty(&path, &token).await.unwrap();
    let subscription: SubscriptionResponse =
        assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(subscription.id, author.id);
    assert!(subscription.is_subscribed);
    assert_eq!(subscription.recipes_count, 0);

    let response = server.post_auth_empty(&path, &token).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await, "ALREADY_SUBSCRIBED");

    let response = server
        .get_auth("/api/users/subscriptions", &token)
        .await
        .unwrap();
    let page: Paginated<SubscriptionResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.count, 1);
    assert_eq!(page.results[0].username, author.username);

    let response = server.delete_auth(&path, &token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.delete_auth(&path, &token).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await, "NOT_SUBSCRIBED");
}

// ============================================================================
// Recipe, Favorite and Shopping Cart Tests
// ============================================================================

#[tokio::test]
async fn test_recipe_author_only_update() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author_token) = register_and_login(&server).await;
    let (_, other_token) = register_and_login(&server).await;

    let flour = server.seed_ingredient("Flour", "g").await.unwrap();
    let tag = server.seed_tag().await.unwrap();

    let request = CreateRecipeRequest::new(
        "Bread",
        vec![IngredientAmount { id: flour.into_inner(), amount: 500 }],
        vec![tag.into_inner()],
    );
    let response = server.post_auth("/api/recipes", &author_token, &request).await.unwrap();
    let recipe: RecipeResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(recipe.ingredients.len(), 1);
    assert_eq!(recipe.ingredients[0].amount, 500);
    assert!(recipe.image.ends_with(".png"));

    let patch = serde_json::json!({ "name": "Stolen bread" });
    let path = format!("/api/recipes/{}", recipe.id);
    let response = server.patch_auth(&path, &other_token, &patch).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let patch = serde_json::json!({ "cooking_time": 45 });
    let response = server.patch_auth(&path, &author_token, &patch).await.unwrap();
    let updated: RecipeResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.cooking_time, 45);
    assert_eq!(updated.name, "Bread");

    let response = server.delete_auth(&path, &author_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_favorite_guards() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = register_and_login(&server).await;

    let sugar = server.seed_ingredient("Sugar", "g").await.unwrap();
    let tag = server.seed_tag().await.unwrap();
    let request = CreateRecipeRequest::new(
        "Caramel",
        vec![IngredientAmount { id: sugar.into_inner(), amount: 100 }],
        vec![tag.into_inner()],
    );
    let response = server.post_auth("/api/recipes", &token, &request).await.unwrap();
    let recipe: RecipeResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let path = format!("/api/recipes/{}/favorite", recipe.id);
    let response = server.post_auth_empty(&path, &token).await.unwrap();
    let short: ShortRecipeResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(short.id, recipe.id);
    assert_eq!(short.name, "Caramel");

    let response = server.post_auth_empty(&path, &token).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await, "ALREADY_IN_FAVORITES");

    let response = server
        .get_auth("/api/recipes?is_favorited=1", &token)
        .await
        .unwrap();
    let page: Paginated<RecipeResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.count, 1);
    assert!(page.results[0].is_favorited);

    let response = server.delete_auth(&path, &token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.delete_auth(&path, &token).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await, "NOT_IN_FAVORITES");
}

#[tokio::test]
async fn test_shopping_cart_download() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = register_and_login(&server).await;

    let flour = server.seed_ingredient("Flour", "g").await.unwrap();
    let milk = server.seed_ingredient("Milk", "ml").await.unwrap();
    let tag = server.seed_tag().await.unwrap();

    let pancakes = CreateRecipeRequest::new(
        "Pancakes",
        vec![
            IngredientAmount { id: flour.into_inner(), amount: 500 },
            IngredientAmount { id: milk.into_inner(), amount: 200 },
        ],
        vec![tag.into_inner()],
    );
    let bread = CreateRecipeRequest::new(
        "Flatbread",
        vec![IngredientAmount { id: flour.into_inner(), amount: 200 }],
        vec![tag.into_inner()],
    );

    let mut recipes = Vec::new();
    for request in [&pancakes, &bread] {
        let response = server.post_auth("/api/recipes", &token, request).await.unwrap();
        let recipe: RecipeResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
        recipes.push(recipe);
    }

    for recipe in &recipes {
        let path = format!("/api/recipes/{}/shopping_cart", recipe.id);
        let response = server.post_auth_empty(&path, &token).await.unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    // Adding twice is rejected
    let path = format!("/api/recipes/{}/shopping_cart", recipes[0].id);
    let response = server.post_auth_empty(&path, &token).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await, "ALREADY_IN_SHOPPING_CART");

    let response = server
        .get_auth("/api/recipes/download_shopping_cart", &token)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=\"shopping_list.txt\""
    );

    let flour_name = &recipes[0].ingredients.iter().find(|i| i.id == flour.into_inner()).unwrap().name;
    let milk_name = &recipes[0].ingredients.iter().find(|i| i.id == milk.into_inner()).unwrap().name;
    // Names are title-cased in the file
    let body = response.text().await.unwrap().to_lowercase();
    assert_eq!(
        body,
        format!(" - {flour_name} (g) - 700\n - {milk_name} (ml) - 200\n").to_lowercase()
    );

    // Removing a recipe changes the totals
    let path = format!("/api/recipes/{}/shopping_cart", recipes[1].id);
    let response = server.delete_auth(&path, &token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.delete_auth(&path, &token).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(response).await, "NOT_IN_SHOPPING_CART");

    let response = server
        .get_auth("/api/recipes/download_shopping_cart", &token)
        .await
        .unwrap();
    let body = response.text().await.unwrap().to_lowercase();
    assert_eq!(
        body,
        format!(" - {flour_name} (g) - 500\n - {milk_name} (ml) - 200\n").to_lowercase()
    );
}
