//! Authentication and fixture helpers
//!
//! Users and sites are created through the HTTP API so that the tests
//! exercise the same path as real clients.

use axum::http::{header::AUTHORIZATION, HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

pub const TEST_PASSWORD: &str = "password123";

/// Registered test user
pub struct TestUser {
    pub id: String,
    pub email: String,
    pub token: String,
}

impl TestUser {
    /// `Authorization` header carrying this user's token
    pub fn auth(&self) -> (HeaderName, HeaderValue) {
        bearer(&self.token)
    }
}

pub fn bearer(token: &str) -> (HeaderName, HeaderValue) {
    (
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).expect("valid header"),
    )
}

/// Register a user through `POST /register`
pub async fn register_user(server: &TestServer, email: &str) -> TestUser {
    let response = server
        .post("/register")
        .json(&json!({
            "email": email,
            "password": TEST_PASSWORD,
            "firstName": "Test",
            "lastName": "User",
            "phone": "9000000000"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "register {}", email);

    let body: Value = response.json();
    TestUser {
        id: body["data"]["user"]["id"].as_str().expect("user id").to_string(),
        email: body["data"]["user"]["email"].as_str().expect("email").to_string(),
        token: body["data"]["token"].as_str().expect("token").to_string(),
    }
}

/// Create a site for `owner` through `POST /registerSite`; returns its ID
pub async fn create_site(server: &TestServer, owner: &TestUser, name: &str, lat: f64, lng: f64) -> String {
    create_site_with(
        server,
        owner,
        json!({
            "name": name,
            "phone": "9111111111",
            "materials": {
                "bricks": { "stock": 1000, "price": 10 },
                "cement": { "stock": 50, "price": 20 }
            },
            "location": { "type": "Point", "coordinates": [lat, lng] }
        }),
    )
    .await
}

/// Create a site from a raw body; returns its ID
pub async fn create_site_with(server: &TestServer, owner: &TestUser, body: Value) -> String {
    let (name, value) = owner.auth();
    let response = server.post("/registerSite").add_header(name, value).json(&body).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let body: Value = response.json();
    body["data"]["id"].as_str().expect("site id").to_string()
}
