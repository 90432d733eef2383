//! Procedure façade over HTTP, against the fake catalog.

#![allow(clippy::unwrap_used)]

use dashcart_integration_tests::{ACCESS_TOKEN, CATALOG_SIZE, PASSWORD, TestApp, USERNAME};
use reqwest::{Response, StatusCode};
use serde_json::{Value, json};

async fn post(app: &TestApp, procedure: &str, body: &Value) -> Response {
    app.http()
        .post(app.at(&format!("/api/orpc/{procedure}")))
        .json(body)
        .send()
        .await
        .unwrap()
}

async fn status_and_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    (status, response.json().await.unwrap())
}

fn product_ids(page: &Value) -> Vec<i64> {
    page["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::start().await;
    let response = app.http().get(app.at("/health")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_unknown_router_and_procedure() {
    let app = TestApp::start().await;

    let (status, body) = status_and_body(post(&app, "foo.bar", &json!({})).await).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Router not found"}));

    let (status, body) = status_and_body(post(&app, "products.nope", &json!({})).await).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Procedure not found"}));

    assert!(app.remote.requests().is_empty());
}

#[tokio::test]
async fn test_nested_procedure_path_gets_json_not_found() {
    let app = TestApp::start().await;

    let (status, body) =
        status_and_body(post(&app, "products/getProduct", &json!({"id": 1})).await).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Router not found"}));

    let response = app
        .http()
        .get(app.at("/api/orpc/auth/login/extra"))
        .send()
        .await
        .unwrap();
    let (status, body) = status_and_body(response).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Router not found"}));

    assert!(app.remote.requests().is_empty());
}

#[tokio::test]
async fn test_get_uses_default_input() {
    let app = TestApp::start().await;
    let response = app
        .http()
        .get(app.at("/api/orpc/products.getProducts"))
        .send()
        .await
        .unwrap();

    let (status, body) = status_and_body(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], CATALOG_SIZE);
    assert_eq!(body["limit"], 10);
    assert_eq!(app.remote.requests(), vec!["GET /products?limit=10&skip=0"]);
}

#[tokio::test]
async fn test_unparsable_body_falls_back_to_empty_input() {
    let app = TestApp::start().await;
    let response = app
        .http()
        .post(app.at("/api/orpc/products.getCategories"))
        .body("{definitely not json")
        .send()
        .await
        .unwrap();

    let (status, body) = status_and_body(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_search_takes_precedence_and_is_encoded() {
    let app = TestApp::start().await;
    let (status, body) = status_and_body(
        post(
            &app,
            "products.getProducts",
            &json!({"search": "red lipstick", "category": "fragrances", "limit": 5}),
        )
        .await,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(product_ids(&body), vec![4]);
    assert_eq!(
        app.remote.requests(),
        vec!["GET /products/search?q=red%20lipstick&limit=5&skip=0"]
    );
}

#[tokio::test]
async fn test_category_listing() {
    let app = TestApp::start().await;
    let (_, body) = status_and_body(
        post(&app, "products.getProducts", &json!({"category": "fragrances"})).await,
    )
    .await;
    assert_eq!(product_ids(&body), vec![5, 6]);
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn test_price_filter_trims_page_but_keeps_total() {
    let app = TestApp::start().await;
    let (status, body) = status_and_body(
        post(
            &app,
            "products.getProducts",
            &json!({"minPrice": 10, "maxPrice": 50}),
        )
        .await,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(product_ids(&body), vec![2, 3, 4, 5]);
    assert_eq!(body["total"], CATALOG_SIZE);
    assert_eq!(body["limit"], 10);
}

#[tokio::test]
async fn test_get_product() {
    let app = TestApp::start().await;

    let (status, body) =
        status_and_body(post(&app, "products.getProduct", &json!({"id": 6})).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Chanel Coco Noir Eau De");

    let (status, body) =
        status_and_body(post(&app, "products.getProduct", &json!({"id": 999})).await).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Product not found"}));
}

#[tokio::test]
async fn test_malformed_input_is_rejected_before_remote_call() {
    let app = TestApp::start().await;
    let (status, body) =
        status_and_body(post(&app, "products.getProduct", &json!({"id": "abc"})).await).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().starts_with("input:"));
    assert!(app.remote.requests().is_empty());
}

#[tokio::test]
async fn test_add_product_validation_and_success() {
    let app = TestApp::start().await;

    let (status, body) = status_and_body(
        post(
            &app,
            "products.addProduct",
            &json!({"title": "", "description": "x", "price": 0, "category": "beauty"}),
        )
        .await,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("Title is required"));
    assert!(message.contains("Price must be positive"));

    let (status, body) = status_and_body(
        post(
            &app,
            "products.addProduct",
            &json!({"title": "Lip Balm", "description": "Soft", "price": 4.5, "category": "beauty", "stock": 12}),
        )
        .await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], CATALOG_SIZE + 1);
    assert_eq!(body["title"], "Lip Balm");
    assert_eq!(app.remote.requests(), vec!["POST /products/add"]);
}

#[tokio::test]
async fn test_update_and_delete_product() {
    let app = TestApp::start().await;

    let (status, body) = status_and_body(
        post(
            &app,
            "products.updateProduct",
            &json!({"id": 2, "data": {"price": 17.5}}),
        )
        .await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], 17.5);

    let (status, body) = status_and_body(
        post(
            &app,
            "products.updateProduct",
            &json!({"id": 2, "data": {"stock": -1}}),
        )
        .await,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("Stock must be non-negative"));

    let (status, body) =
        status_and_body(post(&app, "products.deleteProduct", &json!({"id": 2})).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isDeleted"], true);

    let (status, body) =
        status_and_body(post(&app, "products.deleteProduct", &json!({"id": 404})).await).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to delete product"}));
}

#[tokio::test]
async fn test_login() {
    let app = TestApp::start().await;

    let (status, body) = status_and_body(
        post(
            &app,
            "auth.login",
            &json!({"username": USERNAME, "password": "wrong"}),
        )
        .await,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Invalid credentials"}));

    let (status, body) = status_and_body(
        post(
            &app,
            "auth.login",
            &json!({"username": USERNAME, "password": PASSWORD}),
        )
        .await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accessToken"], ACCESS_TOKEN);
    assert_eq!(body["username"], USERNAME);
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let app = TestApp::start().await;
    let (status, body) = status_and_body(
        post(&app, "auth.login", &json!({"username": "", "password": ""})).await,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "username: Username is required; password: Password is required"
    );
}

#[tokio::test]
async fn test_current_user_follows_session_cookie() {
    let app = TestApp::start().await;
    let call = |cookie: Option<&'static str>| {
        let mut request = app
            .http()
            .post(app.at("/api/orpc/auth.getCurrentUser"))
            .json(&json!({}));
        if let Some(cookie) = cookie {
            request = request.header("cookie", cookie);
        }
        request.send()
    };

    let (status, body) = status_and_body(call(None).await.unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (_, body) = status_and_body(call(Some("auth_token=stale")).await.unwrap()).await;
    assert_eq!(body, Value::Null);

    let cookie: &'static str = "theme=dark; auth_token=fake-access-token";
    let (_, body) = status_and_body(call(Some(cookie)).await.unwrap()).await;
    assert_eq!(body["username"], USERNAME);
}

#[tokio::test]
async fn test_user_carts_and_failed_cart_creation() {
    let app = TestApp::start().await;

    let (status, body) =
        status_and_body(post(&app, "carts.getUserCarts", &json!({"userId": 1})).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["carts"][0]["id"], 50);

    app.remote.fail_cart_creation(true);
    let (status, body) = status_and_body(
        post(
            &app,
            "carts.addCart",
            &json!({"userId": 1, "products": [{"id": 1, "quantity": 2}]}),
        )
        .await,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to create cart"}));
}

#[tokio::test]
async fn test_request_id_header() {
    let app = TestApp::start().await;

    let response = post(&app, "products.getCategories", &json!({})).await;
    assert!(response.headers().contains_key("x-request-id"));

    let response = app
        .http()
        .get(app.at("/health"))
        .header("x-request-id", "trace-42")
        .send()
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "trace-42");
}
