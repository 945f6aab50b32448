use crate::config::user_id_cache;
use crate::handlers::auth::{LoginForm, RegisterForm};
use crate::router::create_router;
use crate::schemas::AppState;
use axum::http::StatusCode;
use axum::Router;
use axum_extra::extract::cookie::Key;
use axum_test::{TestServer, TestServerConfig};
use migration::{Migrator, MigratorTrait};
use model::entities::note;
use sea_orm::{Database, DatabaseConnection};
use service::{CredentialStore, NoteStore, OwnershipPolicy, UserId};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Create an in-memory SQLite database for testing
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    // Run migrations
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Create AppState for testing
pub async fn setup_test_app_state(ownership: OwnershipPolicy) -> AppState {
    AppState {
        db: setup_test_db().await,
        user_ids: user_id_cache(),
        key: Key::generate(),
        ownership,
    }
}

/// Initialize tracing for tests with output captured by the test harness.
///
/// The log level is determined by the RUST_LOG environment variable,
/// defaulting to WARN if not set. Installed once for the whole test binary.
pub fn init_test_tracing() {
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| level.parse::<Level>().ok())
        .unwrap_or(Level::WARN);

    // Another test may have installed the subscriber already
    let _ = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_test_writer()
        .try_init();
}

/// Create axum app for testing, returning the state so tests can inspect storage
pub async fn setup_test_app(ownership: OwnershipPolicy) -> (Router, AppState) {
    init_test_tracing();

    let state = setup_test_app_state(ownership).await;
    (create_router(state.clone()), state)
}

/// A client that keeps cookies between requests, like a browser would.
pub fn browser(app: &Router) -> TestServer {
    let config = TestServerConfig {
        save_cookies: true,
        ..TestServerConfig::default()
    };
    TestServer::new_with_config(app.clone(), config).expect("Failed to start test server")
}

pub async fn register(server: &TestServer, username: &str, password: &str) {
    server
        .post("/register")
        .form(&RegisterForm {
            username: username.to_string(),
            password: password.to_string(),
        })
        .await
        .assert_status(StatusCode::SEE_OTHER);
}

pub async fn login(server: &TestServer, username: &str, password: &str) -> axum_test::TestResponse {
    server
        .post("/login")
        .form(&LoginForm {
            username: username.to_string(),
            password: password.to_string(),
        })
        .await
}

/// Register and log in on `server` in one go.
pub async fn signed_in(server: &TestServer, username: &str, password: &str) {
    register(server, username, password).await;
    login(server, username, password)
        .await
        .assert_status(StatusCode::SEE_OTHER);
}

pub async fn user_id(state: &AppState, username: &str) -> UserId {
    CredentialStore::new(&state.db)
        .find_id(username)
        .await
        .unwrap()
        .expect("user should exist")
}

pub async fn notes_of(state: &AppState, username: &str) -> Vec<note::Model> {
    let owner = user_id(state, username).await;
    NoteStore::new(&state.db).list_by_owner(owner).await.unwrap()
}
