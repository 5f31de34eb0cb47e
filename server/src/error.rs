use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use store::StoreError;
use thiserror::Error;

/// Every variant is terminal for the triggering request and never fatal to
/// the process; the client retries by repeating the action.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Customer name and phone are required")]
    MissingCustomerInfo,

    #[error("Cart not found")]
    CartNotFound,

    #[error("Unknown menu item: {0}")]
    UnknownMenuItem(String),

    #[error("Item is currently unavailable: {0}")]
    ItemUnavailable(String),

    #[error("Unknown order status: {0}")]
    InvalidStatus(String),

    #[error("Sign in required")]
    Unauthorized,

    #[error("Menu query failed: {0}")]
    RemoteQuery(#[source] StoreError),

    #[error("Order submission failed: {0}")]
    OrderSubmission(#[source] StoreError),

    #[error("{0}")]
    Auth(#[source] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::EmptyCart
            | AppError::MissingCustomerInfo
            | AppError::InvalidStatus { .. } => StatusCode::BAD_REQUEST,
            AppError::CartNotFound | AppError::UnknownMenuItem { .. } => StatusCode::NOT_FOUND,
            AppError::ItemUnavailable { .. } => StatusCode::CONFLICT,
            AppError::Unauthorized | AppError::Auth { .. } => StatusCode::UNAUTHORIZED,
            AppError::RemoteQuery { .. } | AppError::OrderSubmission { .. } => {
                StatusCode::BAD_GATEWAY
            }
        };

        (status, self.to_string()).into_response()
    }
}
