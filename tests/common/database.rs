//! Test application fixture
//!
//! Every test gets its own in-memory SQLite database, so tests are isolated
//! without any cleanup.

use axum_test::TestServer;
use regain::backend::routes::create_router;
use regain::backend::server::{memory_pool, AppState};
use regain::shared::ServerConfig;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Server under test plus the state behind it
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

/// Configuration for tests: fast bcrypt, fixed secret
pub fn test_config() -> ServerConfig {
    ServerConfig::builder()
        .jwt_secret(TEST_JWT_SECRET)
        .bcrypt_cost(regain::shared::config::MIN_BCRYPT_COST)
        .build()
        .expect("test config")
}

/// Create a test server with the default test configuration
pub async fn test_app() -> TestApp {
    test_app_with(test_config()).await
}

/// Create a test server with a custom configuration
pub async fn test_app_with(config: ServerConfig) -> TestApp {
    let pool = memory_pool().await.expect("Failed to create test database");
    let state = AppState::new(pool, config);
    let server = TestServer::new(create_router(state.clone())).expect("Failed to create test server");
    TestApp { server, state }
}
