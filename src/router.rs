use crate::handlers::{
    auth::{login, login_page, logout, register, register_page},
    health::health_check,
    home::{home, not_found},
    notes::{add_note, dashboard, delete_note, edit_note, edit_page},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{routing::get, Router};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Landing page
        .route("/", get(home))
        // Account routes
        .route("/register", get(register_page).post(register))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
        // Note routes, all behind the session check
        .route("/dashboard", get(dashboard).post(add_note))
        .route("/edit/:note_id", get(edit_page).post(edit_note))
        .route("/delete/:note_id", get(delete_note))
        // Health check
        .route("/health", get(health_check))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30))),
        )
        .with_state(state)
}
