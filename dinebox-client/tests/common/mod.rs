// dinebox-client/tests/common/mod.rs
// In-memory Order/Catalog backend for integration tests

#![allow(dead_code)]

use axum::extract::{Path, Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use dinebox_client::{DineboxApi, MemoryNotifier, OneshotHttpClient, OrderBoard};
use serde_json::{Value, json};
use shared::models::{DeliveryFeeRef, Order, OrderItem, OrderItemOption};
use shared::order::OrderStatus;
use std::sync::{Arc, Mutex};

pub const TOKEN: &str = "test-token";

#[derive(Debug, Default)]
pub struct Backend {
    /// `None` makes the profile endpoint fail
    pub roles: Option<Vec<String>>,
    pub branch_id: Option<i64>,
    /// Every order in the system
    pub orders: Vec<Order>,
    /// Ids returned by GetAllForUser
    pub mine: Vec<i64>,
    pub reject_status_updates: bool,
    /// Both list endpoints answer 503
    pub fail_lists: bool,
    /// `"METHOD /path"` per request received
    pub calls: Vec<String>,
    pub last_search: Option<Value>,
    pub last_status_body: Option<Value>,
}

pub type SharedBackend = Arc<Mutex<Backend>>;

impl Backend {
    pub fn with_roles(roles: &[&str]) -> Self {
        Self {
            roles: Some(roles.iter().map(|r| r.to_string()).collect()),
            ..Default::default()
        }
    }

    pub fn shared(self) -> SharedBackend {
        Arc::new(Mutex::new(self))
    }
}

pub fn calls(backend: &SharedBackend) -> Vec<String> {
    backend.lock().unwrap().calls.clone()
}

pub fn count_calls(backend: &SharedBackend, prefix: &str) -> usize {
    backend
        .lock()
        .unwrap()
        .calls
        .iter()
        .filter(|c| c.starts_with(prefix))
        .count()
}

pub fn order(id: i64, status: OrderStatus) -> Order {
    Order {
        id,
        order_number: Some(format!("A-{:04}", id)),
        status,
        user_id: Some(format!("user-{}", id % 2)),
        user_name: Some(format!("Customer {}", id)),
        delivery_fee: Some(DeliveryFeeRef {
            fee: Some(15.0),
            ..Default::default()
        }),
        items: Some(vec![OrderItem {
            quantity: 2,
            base_price_snapshot: Some(45.99),
            options: Some(vec![OrderItemOption {
                name: Some("Cheese".into()),
                option_price_at_order: Some(5.0),
                ..Default::default()
            }]),
            total_discount: Some(10.0),
            ..Default::default()
        }]),
        ..Default::default()
    }
}

fn ok(data: Value) -> Response {
    Json(json!({ "isSuccess": true, "message": "Success", "data": data })).into_response()
}

fn ok_empty() -> Response {
    Json(json!({ "isSuccess": true })).into_response()
}

async fn track(State(backend): State<SharedBackend>, request: Request, next: Next) -> Response {
    backend
        .lock()
        .unwrap()
        .calls
        .push(format!("{} {}", request.method(), request.uri().path()));

    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", TOKEN));
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    next.run(request).await
}

async fn profile(State(backend): State<SharedBackend>) -> Response {
    let backend = backend.lock().unwrap();
    match &backend.roles {
        Some(roles) => ok(json!({
            "id": "me",
            "fullName": "Test Viewer",
            "branchId": backend.branch_id,
            "roles": roles,
        })),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "profile service down" })),
        )
            .into_response(),
    }
}

async fn my_orders(State(backend): State<SharedBackend>) -> Response {
    let backend = backend.lock().unwrap();
    if backend.fail_lists {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    let mine: Vec<&Order> = backend
        .orders
        .iter()
        .filter(|o| backend.mine.contains(&o.id))
        .collect();
    ok(json!(mine))
}

async fn search(State(backend): State<SharedBackend>, Json(body): Json<Value>) -> Response {
    let mut backend = backend.lock().unwrap();
    backend.last_search = Some(body.clone());
    if backend.fail_lists {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }

    let page_number = body["pageNumber"].as_u64().unwrap_or(1).max(1);
    let page_size = body["pageSize"].as_u64().unwrap_or(10).max(1);
    let status_filter = body["filters"]
        .as_array()
        .into_iter()
        .flatten()
        .find(|f| f["propertyName"] == "Status")
        .and_then(|f| f["propertyValue"].as_str())
        .and_then(OrderStatus::parse);

    let matching: Vec<&Order> = backend
        .orders
        .iter()
        .filter(|o| status_filter.is_none_or(|s| o.status == s))
        .collect();
    let total = matching.len() as u64;
    let items: Vec<&Order> = matching
        .into_iter()
        .skip(((page_number - 1) * page_size) as usize)
        .take(page_size as usize)
        .collect();

    ok(json!({
        "items": items,
        "totalCount": total,
        "pageNumber": page_number,
        "pageSize": page_size,
        "totalPages": total.div_ceil(page_size),
    }))
}

async fn by_id(State(backend): State<SharedBackend>, Path(id): Path<i64>) -> Response {
    let backend = backend.lock().unwrap();
    match backend.orders.iter().find(|o| o.id == id) {
        Some(order) => ok(json!(order)),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("Order {} not found", id) })),
        )
            .into_response(),
    }
}

async fn update_status(
    State(backend): State<SharedBackend>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = backend.lock().unwrap();
    backend.last_status_body = Some(body.clone());
    if backend.reject_status_updates {
        return (
            StatusCode::CONFLICT,
            Json(json!({
                "message": "Order is already delivered",
                "errors": [{ "code": "4002" }],
            })),
        )
            .into_response();
    }
    let Some(status) = body["orderStatus"].as_str().and_then(OrderStatus::parse) else {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": "bad status" }))).into_response();
    };
    match backend.orders.iter_mut().find(|o| o.id == id) {
        Some(order) => {
            order.status = status;
            ok_empty()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn reprint(Path(_id): Path<i64>) -> Response {
    // Older backends answer with an empty 200
    StatusCode::OK.into_response()
}

async fn add_to_cart(Json(body): Json<Value>) -> Response {
    let selected = body["selectedOptionIds"].as_array().map_or(0, Vec::len);
    if selected == 0 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "title": "One or more validation errors occurred.",
                "errors": [{
                    "code": "MissingRequiredOptions",
                    "description": "Required options are missing",
                    "data": ["Size", "Sauce"],
                }],
            })),
        )
            .into_response();
    }
    ok_empty()
}

async fn branch_list() -> Response {
    ok(json!([{ "id": 1, "name": "Downtown" }, { "id": 2, "name": "Airport" }]))
}

async fn users() -> Response {
    ok(json!([{ "id": "u-1", "fullName": "Ana", "roles": ["Customer"] }, { "id": "u-2", "email": "b@x.io" }]))
}

async fn menu_items() -> Response {
    ok(json!([{
        "id": 7, "name": "Pizza", "price": "80",
        "optionTypes": [{ "id": 1, "name": "Size", "isRequired": true,
                          "options": [{ "id": 11, "name": "Large", "additionalPrice": 12.5 }] }]
    }]))
}

async fn disabled() -> Response {
    Json(json!({ "isSuccess": false, "message": "Feature disabled", "errors": [{ "code": "2002" }] }))
        .into_response()
}

pub fn router(backend: SharedBackend) -> Router {
    Router::new()
        .route("/api/Account/Profile", get(profile))
        .route("/api/Orders/GetAllForUser", get(my_orders))
        .route("/api/Orders/GetAllWithPagination", post(search))
        .route("/api/Orders/GetById/{id}", get(by_id))
        .route("/api/Orders/UpdateStatus/{id}", put(update_status))
        .route("/api/Orders/ReprintOrder/{id}", get(reprint))
        .route("/api/Cart/AddToCart", post(add_to_cart))
        .route("/api/Branches/GetList", get(branch_list))
        .route("/api/Branches/GetAll", get(disabled))
        .route("/api/Users/GetAll", get(users))
        .route("/api/MenuItems/GetAll", get(menu_items))
        .layer(middleware::from_fn_with_state(backend.clone(), track))
        .with_state(backend)
}

pub fn api(backend: &SharedBackend, token: Option<&str>) -> DineboxApi<OneshotHttpClient> {
    let http = OneshotHttpClient::new(router(backend.clone())).with_token(token.map(str::to_string));
    DineboxApi::new(http)
}

pub fn board(
    backend: &SharedBackend,
    token: Option<&str>,
) -> (Arc<OrderBoard<OneshotHttpClient, MemoryNotifier>>, MemoryNotifier) {
    let notifier = MemoryNotifier::new();
    let board = OrderBoard::new(api(backend, token), notifier.clone(), 10);
    (Arc::new(board), notifier)
}
