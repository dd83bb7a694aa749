pub mod routes;
pub mod ws;

use crate::state::AppState;
use std::sync::Arc;

/// All API routes plus the static dashboard fallback.
pub fn router(state: Arc<AppState>) -> axum::Router {
    let dashboard = state.config.dashboard_dir.clone();

    axum::Router::new()
        .route("/api/portfolio", axum::routing::get(routes::get_portfolio))
        .route("/api/contracts", axum::routing::post(routes::add_contract))
        .route(
            "/api/contracts/{index}",
            axum::routing::delete(routes::remove_contract),
        )
        .route("/api/payoff", axum::routing::get(routes::get_payoff))
        .route("/api/counters", axum::routing::get(routes::get_counters))
        .route("/ws", axum::routing::get(ws::ws_handler))
        .fallback_service(
            tower_http::services::ServeDir::new(&dashboard)
                .fallback(tower_http::services::ServeFile::new(dashboard.join("index.html"))),
        )
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .with_state(state)
}
