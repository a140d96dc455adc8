//! Site API integration tests
//!
//! Site creation, owner-scoped listing and updates, and proximity search.

#[macro_use]
mod common;

use axum::http::StatusCode;
use common::*;
use pretty_assertions::assert_eq;
use regain::shared::ServerConfig;
use serde_json::{json, Value};

/// Search centre (Mumbai)
const CENTRE: (f64, f64) = (19.0760, 72.8777);

/// Latitude `km` kilometres due north of the centre
fn north_of_centre(km: f64) -> f64 {
    CENTRE.0 + km / 111.195
}

fn names(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .expect("array data")
        .iter()
        .map(|site| site["name"].as_str().unwrap().to_string())
        .collect()
}

async fn seed_search_sites(app: &TestApp) -> TestUser {
    let owner = register_user(&app.server, "owner@example.com").await;
    for (name, km) in [("Near", 5.0), ("Mid", 12.0), ("Far", 40.0), ("Distant", 150.0)] {
        create_site(&app.server, &owner, name, north_of_centre(km), CENTRE.1).await;
    }
    owner
}

#[tokio::test]
async fn test_register_site_and_list() {
    let app = test_app().await;
    let owner = register_user(&app.server, "owner@example.com").await;

    let (name, value) = owner.auth();
    let response = app
        .server
        .post("/registerSite")
        .add_header(name, value)
        .json(&json!({
            "name": "Andheri Tower",
            "phone": "9876543210",
            "email": "spoofed@example.com",
            "materials": { "bricks": { "stock": 500, "price": 8.5 } },
            "location": { "type": "Point", "coordinates": [19.1136, 72.8697] }
        }))
        .await;

    let body = assert_envelope!(response, StatusCode::CREATED, "success");
    assert_eq!(body["data"]["email"], "owner@example.com");
    assert_eq!(body["data"]["isActive"], true);
    assert_eq!(body["data"]["location"]["coordinates"], json!([19.1136, 72.8697]));

    let body = assert_envelope!(app.server.get("/getSites").await, StatusCode::OK, "success");
    assert_eq!(names(&body), vec!["Andheri Tower"]);
}

#[tokio::test]
async fn test_add_my_site_requires_login() {
    let app = test_app().await;

    let response = app
        .server
        .post("/addMySite")
        .json(&json!({
            "name": "Anonymous",
            "phone": "1",
            "location": { "type": "Point", "coordinates": [19.0, 72.0] }
        }))
        .await;

    assert_failed!(response, StatusCode::UNAUTHORIZED, "Please login first");
}

#[tokio::test]
async fn test_register_site_validation() {
    let app = test_app().await;
    let owner = register_user(&app.server, "owner@example.com").await;

    let (name, value) = owner.auth();
    let response = app
        .server
        .post("/addMySite")
        .add_header(name, value)
        .json(&json!({
            "name": "Off the map",
            "phone": "1",
            "location": { "type": "Point", "coordinates": [95.0, 72.0] }
        }))
        .await;

    assert_failed!(response, StatusCode::BAD_REQUEST, "Latitude must be between -90 and 90");
}

#[tokio::test]
async fn test_get_my_sites_is_scoped() {
    let app = test_app().await;
    let alice = register_user(&app.server, "alice@example.com").await;
    let bob = register_user(&app.server, "bob@example.com").await;
    create_site(&app.server, &alice, "Alice Yard", 19.0, 72.0).await;
    create_site(&app.server, &bob, "Bob Yard", 19.0, 72.0).await;

    let (name, value) = alice.auth();
    let response = app.server.get("/getMySites").add_header(name, value).await;

    let body = assert_envelope!(response, StatusCode::OK, "success");
    assert_eq!(names(&body), vec!["Alice Yard"]);
}

#[tokio::test]
async fn test_update_my_site_owner_only() {
    let app = test_app().await;
    let owner = register_user(&app.server, "owner@example.com").await;
    let intruder = register_user(&app.server, "intruder@example.com").await;
    let site_id = create_site(&app.server, &owner, "Yard", 19.0, 72.0).await;

    let update = json!({ "siteId": site_id, "update": { "name": "Hijacked" } });

    let (name, value) = intruder.auth();
    let response = app.server.post("/updateMySite").add_header(name, value).json(&update).await;
    assert_failed!(response, StatusCode::NOT_FOUND, "Invalid ID");

    let (name, value) = owner.auth();
    let response = app
        .server
        .post("/updateMySite")
        .add_header(name, value)
        .json(&json!({
            "siteId": site_id,
            "update": { "isActive": false, "materials": { "steel": { "stock": 5, "price": 700 } } }
        }))
        .await;
    let body = assert_envelope!(response, StatusCode::OK, "success");
    assert_eq!(body["data"]["name"], "Yard");
    assert_eq!(body["data"]["isActive"], false);
    assert_eq!(body["data"]["materials"], json!({ "steel": { "stock": 5.0, "price": 700.0 } }));
}

#[tokio::test]
async fn test_update_my_site_bad_requests() {
    let app = test_app().await;
    let owner = register_user(&app.server, "owner@example.com").await;
    let site_id = create_site(&app.server, &owner, "Yard", 19.0, 72.0).await;

    let (name, value) = owner.auth();
    let response = app
        .server
        .post("/updateMySite")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "siteId": "not-an-id", "update": { "name": "X" } }))
        .await;
    assert_failed!(response, StatusCode::BAD_REQUEST, "Invalid ID");

    let response = app
        .server
        .post("/updateMySite")
        .add_header(name, value)
        .json(&json!({ "siteId": site_id, "update": {} }))
        .await;
    assert_failed!(response, StatusCode::BAD_REQUEST, "Nothing to update");
}

#[tokio::test]
async fn test_nearest_sites_default_radius() {
    let app = test_app().await;
    seed_search_sites(&app).await;

    let response = app
        .server
        .post("/getNearestSites")
        .json(&json!({ "userCords": [CENTRE.0, CENTRE.1] }))
        .await;

    let body = assert_envelope!(response, StatusCode::OK, "success");
    assert_eq!(names(&body), vec!["Near", "Mid"]);
    let first = body["data"][0]["distanceKm"].as_f64().unwrap();
    assert!((first - 5.0).abs() < 0.1, "distance was {}", first);
}

#[tokio::test]
async fn test_nearest_sites_respects_radius() {
    let app = test_app().await;
    seed_search_sites(&app).await;

    let response = app
        .server
        .post("/getNearestSites")
        .json(&json!({ "userCords": [CENTRE.0, CENTRE.1], "radius": 10 }))
        .await;
    let body = assert_envelope!(response, StatusCode::OK, "success");
    assert_eq!(names(&body), vec!["Near"]);
    for site in body["data"].as_array().unwrap() {
        assert!(site["distanceKm"].as_f64().unwrap() <= 10.0);
    }

    // Oversized radii are capped at the configured maximum (100 km)
    let response = app
        .server
        .post("/getNearestSites")
        .json(&json!({ "userCords": [CENTRE.0, CENTRE.1], "radius": 1000 }))
        .await;
    let body = assert_envelope!(response, StatusCode::OK, "success");
    assert_eq!(names(&body), vec!["Near", "Mid", "Far"]);
}

#[tokio::test]
async fn test_nearest_sites_skips_inactive() {
    let app = test_app().await;
    let owner = seed_search_sites(&app).await;
    let closed = create_site(&app.server, &owner, "Closed", north_of_centre(1.0), CENTRE.1).await;

    let (name, value) = owner.auth();
    app.server
        .post("/updateMySite")
        .add_header(name, value)
        .json(&json!({ "siteId": closed, "update": { "isActive": false } }))
        .await;

    let response = app
        .server
        .post("/getNearestSites")
        .json(&json!({ "userCords": [CENTRE.0, CENTRE.1], "radius": 15 }))
        .await;
    let body = assert_envelope!(response, StatusCode::OK, "success");
    assert_eq!(names(&body), vec!["Near", "Mid"]);
}

#[tokio::test]
async fn test_site_found_with_same_coordinate_order_as_search() {
    let app = test_app().await;
    let owner = register_user(&app.server, "owner@example.com").await;
    create_site_with(
        &app.server,
        &owner,
        json!({
            "name": "Andheri Tower",
            "phone": "9876543210",
            "location": { "type": "Point", "coordinates": [19.1136, 72.8697] }
        }),
    )
    .await;

    let response = app
        .server
        .post("/getNearestSites")
        .json(&json!({ "userCords": [19.1136, 72.8697] }))
        .await;
    let body = assert_envelope!(response, StatusCode::OK, "success");
    assert_eq!(names(&body), vec!["Andheri Tower"]);
    assert_eq!(body["data"][0]["location"]["coordinates"], json!([19.1136, 72.8697]));
    assert!(body["data"][0]["distanceKm"].as_f64().unwrap() < 0.01);
}

#[tokio::test]
async fn test_nearest_sites_result_limit() {
    let config = ServerConfig::builder()
        .jwt_secret(TEST_JWT_SECRET)
        .bcrypt_cost(regain::shared::config::MIN_BCRYPT_COST)
        .max_search_results(1)
        .build()
        .unwrap();
    let app = test_app_with(config).await;
    seed_search_sites(&app).await;

    let response = app
        .server
        .post("/getNearestSites")
        .json(&json!({ "userCords": [CENTRE.0, CENTRE.1], "radius": 100 }))
        .await;
    let body = assert_envelope!(response, StatusCode::OK, "success");
    assert_eq!(names(&body), vec!["Near"]);
}

#[tokio::test]
async fn test_nearest_sites_rejects_bad_input() {
    let app = test_app().await;

    let response = app
        .server
        .post("/getNearestSites")
        .json(&json!({ "userCords": [CENTRE.0, CENTRE.1], "radius": -5 }))
        .await;
    assert_failed!(response, StatusCode::BAD_REQUEST, "Radius must be a positive number");

    let response = app
        .server
        .post("/getNearestSites")
        .json(&json!({ "userCords": [120.0, 72.0] }))
        .await;
    assert_failed!(response, StatusCode::BAD_REQUEST, "Latitude must be between -90 and 90");
}
