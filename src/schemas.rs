use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use moka::future::Cache;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use service::OwnershipPolicy;
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Session username to user id, filled on first resolution
    pub user_ids: Cache<String, i32>,
    /// Signs the session and flash cookies
    pub key: Key,
    /// Whether edit/delete require the acting user to own the note
    pub ownership: OwnershipPolicy,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db)
            .field("ownership", &self.ownership)
            .finish_non_exhaustive()
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
    /// Active note ownership policy ("shared" or "strict")
    pub ownership: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
    ),
    components(
        schemas(
            HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
    ),
    info(
        title = "Notekeeper",
        description = "Multi-user note taking service. Notes are managed through HTML forms; only the health endpoint is JSON.",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
