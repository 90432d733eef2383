//! Integration test harness for DashCart.
//!
//! [`FakeDummyJson`] is an in-process stand-in for the catalog service with a
//! small fixed catalog and one known user. [`TestApp`] starts the real server
//! against it; both listen on ephemeral local ports.
//!
//! # Fixtures
//!
//! - user `emilys` / `emilyspass` (id 1), access token [`ACCESS_TOKEN`]
//! - seven products across `beauty`, `fragrances` and `groceries`; product 1
//!   has stock 5, product 3 is out of stock

#![allow(clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    Json, Router,
    extract::{Path, Query, Request, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use dashcart_cli::{ApiClient, Dashboard, MemoryStorage, Storage, Stores};
use dashcart_server::{config::ServerConfig, state::AppState};
use serde_json::{Value, json};
use url::Url;

/// Username accepted by the fake login.
pub const USERNAME: &str = "emilys";

/// Password accepted by the fake login.
pub const PASSWORD: &str = "emilyspass";

/// Access token issued by the fake login.
pub const ACCESS_TOKEN: &str = "fake-access-token";

/// Number of products in the fake catalog.
pub const CATALOG_SIZE: usize = 7;

/// Serve `router` on an ephemeral local port.
pub async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server error");
    });
    addr
}

fn base_url(addr: SocketAddr) -> Url {
    Url::parse(&format!("http://{addr}")).expect("Invalid test server URL")
}

#[derive(Default)]
struct FakeState {
    requests: Mutex<Vec<String>>,
    fail_cart_creation: AtomicBool,
}

/// Stand-in for the remote catalog service.
#[derive(Clone)]
pub struct FakeDummyJson {
    pub url: Url,
    state: Arc<FakeState>,
}

impl FakeDummyJson {
    pub async fn start() -> Self {
        let state = Arc::new(FakeState::default());
        let router = Router::new()
            .route("/auth/login", post(login))
            .route("/auth/me", get(me))
            .route("/products", get(list_products))
            .route("/products/search", get(search_products))
            .route("/products/categories", get(categories))
            .route("/products/category/{slug}", get(category_products))
            .route("/products/add", post(add_product))
            .route(
                "/products/{id}",
                get(get_product).put(update_product).delete(delete_product),
            )
            .route("/carts/user/{id}", get(user_carts))
            .route("/carts/add", post(add_cart))
            .layer(middleware::from_fn_with_state(
                Arc::clone(&state),
                record_request,
            ))
            .with_state(Arc::clone(&state));

        let addr = serve(router).await;
        Self {
            url: base_url(addr),
            state,
        }
    }

    /// `METHOD /path?query` of every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.state
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Make `POST /carts/add` answer 500.
    pub fn fail_cart_creation(&self, fail: bool) {
        self.state.fail_cart_creation.store(fail, Ordering::SeqCst);
    }
}

/// The server under test wired to a [`FakeDummyJson`].
pub struct TestApp {
    pub remote: FakeDummyJson,
    pub url: Url,
}

impl TestApp {
    pub async fn start() -> Self {
        let remote = FakeDummyJson::start().await;

        let mut vars = HashMap::new();
        vars.insert("DUMMYJSON_BASE_URL", remote.url.to_string());
        vars.insert(
            "DASHCART_STATIC_DIR",
            static_dir().to_string_lossy().into_owned(),
        );
        let config = ServerConfig::from_lookup(|key| vars.get(key).cloned())
            .expect("Invalid test configuration");
        let state = AppState::new(config).expect("Failed to build app state");

        let addr = serve(dashcart_server::app(state)).await;
        Self {
            remote,
            url: base_url(addr),
        }
    }

    /// Absolute URL of `path` on the server.
    #[must_use]
    pub fn at(&self, path: &str) -> String {
        format!("{}{}", self.url.as_str().trim_end_matches('/'), path)
    }

    /// HTTP client that does not follow redirects.
    #[must_use]
    pub fn http(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to build HTTP client")
    }

    /// A client dashboard over fresh in-memory stores.
    #[must_use]
    pub fn dashboard(&self) -> Dashboard {
        self.dashboard_with(Arc::new(MemoryStorage::new()))
    }

    /// A client dashboard over `storage`.
    #[must_use]
    pub fn dashboard_with(&self, storage: Arc<dyn Storage>) -> Dashboard {
        let api = ApiClient::new(&self.url).expect("Failed to build API client");
        Dashboard::new(api, Stores::open(storage).expect("Failed to open stores"))
    }
}

fn static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../server/static")
}

async fn record_request(
    State(state): State<Arc<FakeState>>,
    request: Request,
    next: Next,
) -> Response {
    let line = format!("{} {}", request.method(), request.uri());
    state
        .requests
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(line);
    next.run(request).await
}

fn not_found(message: String) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
}

fn user() -> Value {
    json!({
        "id": 1,
        "username": USERNAME,
        "email": "emily.johnson@x.dummyjson.com",
        "firstName": "Emily",
        "lastName": "Johnson",
        "gender": "female",
        "image": "https://dummyjson.com/icon/emilys/128"
    })
}

fn catalog() -> Vec<Value> {
    let product = |id: u32, title: &str, price: f64, category: &str, stock: u32| {
        json!({
            "id": id,
            "title": title,
            "description": format!("{title} description"),
            "price": price,
            "category": category,
            "stock": stock,
            "thumbnail": format!("https://cdn.dummyjson.com/products/{id}/thumbnail.png"),
            "discountPercentage": 7.17
        })
    };
    vec![
        product(1, "Essence Mascara Lash Princess", 9.99, "beauty", 5),
        product(2, "Eyeshadow Palette with Mirror", 19.99, "beauty", 34),
        product(3, "Powder Canister", 14.99, "beauty", 0),
        product(4, "Red Lipstick", 12.99, "beauty", 23),
        product(5, "Calvin Klein CK One", 49.99, "fragrances", 17),
        product(6, "Chanel Coco Noir Eau De", 129.99, "fragrances", 41),
        product(7, "Apple", 1.99, "groceries", 8),
    ]
}

fn find_product(id: &str) -> Option<Value> {
    catalog()
        .into_iter()
        .find(|p| p["id"].to_string() == id)
}

fn page(products: Vec<Value>, params: &HashMap<String, String>) -> Json<Value> {
    let number = |key: &str, default: usize| {
        params
            .get(key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    };
    let limit = number("limit", 30);
    let skip = number("skip", 0);
    let total = products.len();
    let products: Vec<Value> = products.into_iter().skip(skip).take(limit).collect();
    Json(json!({ "products": products, "total": total, "skip": skip, "limit": limit }))
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["username"] == USERNAME && body["password"] == PASSWORD {
        let mut response = user();
        response["accessToken"] = json!(ACCESS_TOKEN);
        response["refreshToken"] = json!("fake-refresh-token");
        Json(response).into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Invalid credentials" })),
        )
            .into_response()
    }
}

async fn me(headers: HeaderMap) -> Response {
    let expected = format!("Bearer {ACCESS_TOKEN}");
    match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Json(user()).into_response(),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid/Expired Token!" })),
        )
            .into_response(),
    }
}

async fn list_products(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    page(catalog(), &params)
}

async fn search_products(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let q = params.get("q").cloned().unwrap_or_default().to_lowercase();
    let matches = catalog()
        .into_iter()
        .filter(|p| {
            p["title"]
                .as_str()
                .is_some_and(|t| t.to_lowercase().contains(&q))
        })
        .collect();
    page(matches, &params)
}

async fn category_products(
    Path(slug): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let matches = catalog()
        .into_iter()
        .filter(|p| p["category"] == slug.as_str())
        .collect();
    page(matches, &params)
}

async fn categories() -> Json<Value> {
    Json(json!([
        {"slug": "beauty", "name": "Beauty", "url": "https://dummyjson.com/products/category/beauty"},
        {"slug": "fragrances", "name": "Fragrances", "url": "https://dummyjson.com/products/category/fragrances"},
        {"slug": "groceries", "name": "Groceries", "url": "https://dummyjson.com/products/category/groceries"}
    ]))
}

async fn get_product(Path(id): Path<String>) -> Response {
    find_product(&id).map_or_else(
        || not_found(format!("Product with id '{id}' not found")),
        |product| Json(product).into_response(),
    )
}

async fn add_product(Json(mut body): Json<Value>) -> Json<Value> {
    body["id"] = json!(CATALOG_SIZE + 1);
    Json(body)
}

async fn update_product(Path(id): Path<String>, Json(patch): Json<Value>) -> Response {
    let Some(mut product) = find_product(&id) else {
        return not_found(format!("Product with id '{id}' not found"));
    };
    if let (Some(target), Some(fields)) = (product.as_object_mut(), patch.as_object()) {
        for (key, value) in fields {
            target.insert(key.clone(), value.clone());
        }
    }
    Json(product).into_response()
}

async fn delete_product(Path(id): Path<String>) -> Response {
    let Some(mut product) = find_product(&id) else {
        return not_found(format!("Product with id '{id}' not found"));
    };
    product["isDeleted"] = json!(true);
    product["deletedOn"] = json!("2024-06-10T06:13:20.500Z");
    Json(product).into_response()
}

async fn user_carts(Path(id): Path<String>) -> Json<Value> {
    let carts = if id == "1" {
        json!([{
            "id": 50,
            "products": [{"id": 5, "title": "Calvin Klein CK One", "price": 49.99, "quantity": 2, "total": 99.98}],
            "total": 99.98,
            "discountedTotal": 90.0,
            "userId": 1,
            "totalProducts": 1,
            "totalQuantity": 2
        }])
    } else {
        json!([])
    };
    let total = carts.as_array().map_or(0, Vec::len);
    Json(json!({ "carts": carts, "total": total, "skip": 0, "limit": total }))
}

async fn add_cart(State(state): State<Arc<FakeState>>, Json(body): Json<Value>) -> Response {
    if state.fail_cart_creation.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "cart service unavailable" })),
        )
            .into_response();
    }

    let mut cart = body;
    cart["id"] = json!(51);
    Json(cart).into_response()
}
