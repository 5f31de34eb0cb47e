use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use store::OrderStatus;
use uuid::Uuid;

use crate::admin::{self, StatusFilter};
use crate::cart::Cart;
use crate::error::AppError;
use crate::menu;
use crate::orders::{self, CustomerInfo};
use crate::pages;
use crate::state::AppState;

pub async fn home_handler() -> impl IntoResponse {
    Json(pages::home())
}

pub async fn about_handler() -> impl IntoResponse {
    Json(pages::about())
}

pub async fn contact_handler() -> impl IntoResponse {
    Json(pages::contact())
}

#[derive(Deserialize)]
pub struct MenuParams {
    category: Option<String>,
}

pub async fn menu_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MenuParams>,
) -> Result<impl IntoResponse, AppError> {
    let items = menu::list_available(&state.store, params.category.as_deref()).await?;

    let body = match params.category {
        Some(category) => json!({ "category": category, "items": items }),
        None => json!({
            "sections": menu::group_by_category(items),
            "notes": pages::menu_notes(),
        }),
    };
    Ok(Json(body))
}

pub async fn create_cart_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let cart_id = state.carts.create();
    (StatusCode::CREATED, Json(json!({ "cart_id": cart_id })))
}

pub async fn view_cart_handler(
    State(state): State<Arc<AppState>>,
    Path(cart_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    state
        .carts
        .with(cart_id, cart_view)
        .map(Json)
        .ok_or(AppError::CartNotFound)
}

#[derive(Deserialize)]
pub struct AddItemBody {
    item_id: String,
}

pub async fn add_item_handler(
    State(state): State<Arc<AppState>>,
    Path(cart_id): Path<Uuid>,
    Json(body): Json<AddItemBody>,
) -> Result<impl IntoResponse, AppError> {
    let item = menu::available_item(&state.store, &body.item_id).await?;

    state
        .carts
        .with(cart_id, |cart| {
            cart.add_item(&item);
            cart_view(cart)
        })
        .map(Json)
        .ok_or(AppError::CartNotFound)
}

#[derive(Deserialize)]
pub struct QuantityBody {
    quantity: i64,
}

pub async fn update_quantity_handler(
    State(state): State<Arc<AppState>>,
    Path((cart_id, item_id)): Path<(Uuid, String)>,
    Json(body): Json<QuantityBody>,
) -> Result<impl IntoResponse, AppError> {
    state
        .carts
        .with(cart_id, |cart| {
            cart.update_quantity(&item_id, body.quantity);
            cart_view(cart)
        })
        .map(Json)
        .ok_or(AppError::CartNotFound)
}

pub async fn remove_item_handler(
    State(state): State<Arc<AppState>>,
    Path((cart_id, item_id)): Path<(Uuid, String)>,
) -> Result<impl IntoResponse, AppError> {
    state
        .carts
        .with(cart_id, |cart| {
            cart.remove_item(&item_id);
            cart_view(cart)
        })
        .map(Json)
        .ok_or(AppError::CartNotFound)
}

pub async fn clear_cart_handler(
    State(state): State<Arc<AppState>>,
    Path(cart_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    state
        .carts
        .with(cart_id, |cart| {
            cart.clear();
            cart_view(cart)
        })
        .map(Json)
        .ok_or(AppError::CartNotFound)
}

#[derive(Deserialize)]
pub struct OrderBody {
    cart_id: Uuid,
    name: String,
    phone: String,
    email: Option<String>,
    address: Option<String>,
    notes: Option<String>,
}

pub async fn submit_order_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<OrderBody>,
) -> Result<impl IntoResponse, AppError> {
    let info = CustomerInfo {
        name: body.name,
        phone: body.phone,
        email: body.email,
        address: body.address,
        notes: body.notes,
    };

    let receipt = orders::submit_order(&state.store, &state.carts, body.cart_id, &info).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

#[derive(Deserialize)]
pub struct AdminParams {
    status: Option<String>,
}

pub async fn admin_orders_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AdminParams>,
) -> Result<impl IntoResponse, AppError> {
    require_signed_in(&state)?;

    let filter = match params.status.as_deref() {
        None => StatusFilter::All,
        Some(raw) => {
            StatusFilter::parse(raw).ok_or_else(|| AppError::InvalidStatus(raw.to_string()))?
        }
    };

    let orders = admin::list_orders(&state.store, filter).await?;
    Ok(Json(json!({ "orders": orders })))
}

#[derive(Deserialize)]
pub struct StatusBody {
    status: String,
}

pub async fn set_status_handler(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<String>,
    Json(body): Json<StatusBody>,
) -> Result<impl IntoResponse, AppError> {
    require_signed_in(&state)?;

    let status = OrderStatus::parse(&body.status)
        .ok_or_else(|| AppError::InvalidStatus(body.status.clone()))?;
    admin::set_status(&state.store, &order_id, status).await?;

    Ok(Json(json!({ "order_id": order_id, "status": status })))
}

#[derive(Deserialize)]
pub struct SignupBody {
    email: String,
    password: String,
    name: String,
    phone: Option<String>,
}

pub async fn signup_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SignupBody>,
) -> Result<impl IntoResponse, AppError> {
    state
        .auth
        .sign_up(&body.email, &body.password, &body.name, body.phone.as_deref())
        .await
        .map_err(AppError::Auth)?;

    Ok(Json(json!({
        "message": "Check your email to confirm your account"
    })))
}

#[derive(Deserialize)]
pub struct LoginBody {
    email: String,
    password: String,
}

pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginBody>,
) -> Result<impl IntoResponse, AppError> {
    let session = state
        .auth
        .sign_in(&body.email, &body.password)
        .await
        .map_err(AppError::Auth)?;

    Ok(Json(json!({
        "message": "Welcome back!",
        "user": session.user,
    })))
}

pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    state.auth.sign_out().await.map_err(AppError::Auth)?;
    Ok(Json(json!({ "message": "Signed out" })))
}

pub async fn session_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let current = state.session.current();
    Json(json!({
        "user": current.user,
        "loading": current.loading,
    }))
}

pub async fn not_found_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}

fn cart_view(cart: &mut Cart) -> serde_json::Value {
    json!({
        "lines": cart.lines(),
        "total": cart.total(),
        "item_count": cart.item_count(),
    })
}

fn require_signed_in(state: &AppState) -> Result<(), AppError> {
    if state.session.signed_in() {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}
