//! Router construction for the fulfilment server.

use std::sync::Arc;

use axum::{
    middleware as axum_mw,
    routing::{get, post},
    Extension, Router,
};
use fulfilment_core::{FulfilmentService, WarehouseService};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::error_path;

/// Build the full axum router with all routes and middleware.
pub fn build_router(fulfilment: Arc<FulfilmentService>, warehouses: Arc<WarehouseService>) -> Router {
    let api = Router::new()
        .route("/fulfilment", post(handlers::fulfilment::assign))
        .route(
            "/warehouse",
            get(handlers::warehouses::list).post(handlers::warehouses::create),
        )
        .route(
            "/warehouse/:business_unit_code",
            get(handlers::warehouses::get).delete(handlers::warehouses::archive),
        )
        .route(
            "/warehouse/:business_unit_code/replacement",
            post(handlers::warehouses::replace),
        )
        .layer(axum_mw::from_fn(error_path));

    let public = Router::new().route("/health", get(handlers::health::health));

    public
        .merge(api)
        .layer(Extension(fulfilment))
        .layer(Extension(warehouses))
        .layer(TraceLayer::new_for_http())
}
