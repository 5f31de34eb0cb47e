//! Restaurant ordering backend for Telia Restaurant.
//!
//! # General Infrastructure
//! - All persistence, auth, and query logic live in a hosted backend
//!   service; this process is the site's application layer
//! - The hosted service is consumed through the `store` crate: row-level
//!   table reads/writes plus the auth subsystem, nothing else
//! - Carts are the only state held here, in memory, one per browsing
//!   session, swept when idle
//! - Orders are written through a three-step insert flow (customer,
//!   order, order items) with no rollback across steps; the store's own
//!   consistency governs partial failures
//!
//! # Route Surface
//! - `/`, `/menu`, `/about`, `/contact` — page payloads
//! - `/cart`, `/cart/{id}`, `/cart/{id}/items/...` — cart session
//! - `/orders` — checkout
//! - `/admin/orders` — staff listing and status updates, sign-in required
//! - `/auth/...` — proxied to the hosted auth subsystem
//!
//! # Notes
//!
//! ## Overlapping requests
//! Store calls are independent and uncancelled; when rapid UI actions
//! overlap, the last response to resolve determines what the client
//! shows. No sequencing is implemented.
//!
//! ## Timeouts
//! None are configured. A hung store call hangs that request's loading
//! state, nothing else.

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, patch, post},
    Router,
};

use signal::{
    ctrl_c,
    unix::{signal, SignalKind},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod admin;
pub mod cart;
pub mod config;
pub mod error;
pub mod menu;
pub mod orders;
pub mod pages;
pub mod routes;
pub mod session;
pub mod state;

use state::AppState;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new();

    info!("Starting server...");

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let app = Router::new()
        .route("/", get(routes::home_handler))
        .route("/menu", get(routes::menu_handler))
        .route("/about", get(routes::about_handler))
        .route("/contact", get(routes::contact_handler))
        .route("/cart", post(routes::create_cart_handler))
        .route(
            "/cart/{cart_id}",
            get(routes::view_cart_handler).delete(routes::clear_cart_handler),
        )
        .route("/cart/{cart_id}/items", post(routes::add_item_handler))
        .route(
            "/cart/{cart_id}/items/{item_id}",
            patch(routes::update_quantity_handler).delete(routes::remove_item_handler),
        )
        .route("/orders", post(routes::submit_order_handler))
        .route("/admin/orders", get(routes::admin_orders_handler))
        .route(
            "/admin/orders/{order_id}/status",
            patch(routes::set_status_handler),
        )
        .route("/auth/signup", post(routes::signup_handler))
        .route("/auth/login", post(routes::login_handler))
        .route("/auth/logout", post(routes::logout_handler))
        .route("/auth/session", get(routes::session_handler))
        .fallback(routes::not_found_handler)
        .layer(cors)
        .with_state(state.clone());

    tokio::spawn(sweep_carts(state.clone()));

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn sweep_carts(state: Arc<AppState>) {
    let idle = Duration::from_secs(state.config.cart_idle_seconds);
    let mut ticker = tokio::time::interval(idle.min(Duration::from_secs(300)));

    loop {
        ticker.tick().await;
        let dropped = state.carts.sweep(idle);
        if dropped > 0 {
            info!("Dropped {dropped} idle carts");
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
