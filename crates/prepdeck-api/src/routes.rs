use crate::{handlers, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Question lookup
        .route("/api/company", get(handlers::company_query))
        .route("/api/companies-list", get(handlers::companies_list))
        .route(
            "/api/company/{slug}/{period}",
            get(handlers::company_period),
        )
        .route("/api/company/{slug}", get(handlers::company_all_periods))
        // Complexity analysis
        .route("/api/analyze", post(handlers::analyze))
        // Add state
        .with_state(state)
        // Add middleware
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(TraceLayer::new_for_http())
}
