// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # API Integration Tests
//!
//! The HTTP edge driven in-process:
//!
//! - Guarded page navigation and redirects
//! - Session cookie endpoints
//! - Landing, unauthorized and navigation endpoints
//! - Health and error bodies
//!
//! ## Test Categories
//!
//! - `test_edge_*`: Guard layer
//! - `test_session_*`: Cookie endpoints
//! - `test_page_*`: Landing and unauthorized pages
//! - `test_api_*`: Health, navigation and errors

use axum::http::StatusCode;
use brandis_config::BrandisConfig;
use brandis_core::{MatchMode, Role};
use brandis_tests::prelude::*;
use serde_json::json;

// =============================================================================
// Test Helpers
// =============================================================================

fn app() -> TestApp {
    TestApp::new()
}

fn nav_paths(body: &serde_json::Value) -> Vec<String> {
    body["data"]["entries"]
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|e| e["path"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

// =============================================================================
// Edge Guard Tests
// =============================================================================

#[tokio::test]
async fn test_edge_every_path_and_role() {
    let app = app();
    for (path, permitted) in RouteFixtures::access_matrix() {
        for role in Role::ALL {
            let credential = CredentialFixtures::for_role(role);
            let response = app.get(path, Some(&credential)).await;
            if permitted.contains(&role) {
                response.assert_ok();
                assert_eq!(response.json()["path"], path);
                assert_eq!(response.json()["role"], role.as_str());
            } else {
                response.assert_see_other("/unauthorized");
            }
        }
    }
}

#[tokio::test]
async fn test_edge_no_cookie_redirects_to_login() {
    let app = app();
    for (path, _) in RouteFixtures::access_matrix() {
        app.get(path, None).await.assert_see_other("/");
    }
}

#[tokio::test]
async fn test_edge_foreign_role_redirects_to_login() {
    let credential = CredentialFixtures::foreign_role();
    app()
        .get("/products", Some(&credential))
        .await
        .assert_see_other("/");
}

#[tokio::test]
async fn test_edge_sub_paths_follow_match_mode() {
    let credential = CredentialFixtures::for_role(Role::Bendahara);

    let prefix = app();
    prefix
        .get("/inventory/batchManagement/42", Some(&credential))
        .await
        .assert_see_other("/unauthorized");
    prefix
        .get("/financialReports/2025", Some(&credential))
        .await
        .assert_ok();

    let mut config = BrandisConfig::default();
    config.guard.match_mode = MatchMode::Exact;
    let exact = TestApp::with_config(&config);
    let response = exact
        .get("/inventory/batchManagement/42", Some(&credential))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edge_custom_redirect_targets() {
    let mut config = BrandisConfig::default();
    config.guard.login_path = "/login".into();
    config.guard.unauthorized_path = "/denied".into();
    let app = TestApp::with_config(&config);

    app.get("/products", None).await.assert_see_other("/login");

    let login = app.get("/login", None).await;
    login.assert_ok();
    assert_eq!(login.json()["path"], "/login");

    let credential = CredentialFixtures::for_role(Role::Pemasaran);
    let denied = app.get("/financialReports", Some(&credential)).await;
    denied.assert_see_other("/denied");

    let target = denied.location().unwrap().to_string();
    let notice = app.get(&target, Some(&credential)).await;
    notice.assert_ok();
    notice.assert_clears_session_cookie();
    assert_eq!(notice.json()["action_path"], "/login");

    let stale = app.get("/unauthorized", Some(&credential)).await;
    assert_eq!(stale.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edge_custom_cookie_name() {
    let mut config = BrandisConfig::default();
    config.cookie.name = "brandis_session".into();
    let app = TestApp::with_config(&config);

    let credential = CredentialFixtures::for_role(Role::Pimpinan);
    app.get("/userManagement", Some(&credential)).await.assert_ok();
}

// =============================================================================
// Session Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_session_login_sets_cookie() {
    let credential = CredentialFixtures::for_role(Role::Manajer);
    let response = app()
        .post_json("/api/session", None, &json!({ "credential": credential }))
        .await;

    response.assert_ok();
    let body = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["authenticated"], true);
    assert_eq!(body["data"]["role"], "Manajer");
    assert_eq!(body["data"]["dashboard"], "/dashboard/manajer");

    assert_eq!(response.session_cookie_value(), Some(credential));
    let header = response.session_set_cookie().unwrap();
    assert!(header.contains("Path=/"));
    assert!(header.contains("SameSite=Lax"));
    assert!(header.contains(&format!("Max-Age={}", 7 * 24 * 60 * 60)));
}

#[tokio::test]
async fn test_session_login_then_navigate() {
    let app = app();
    let credential = CredentialFixtures::for_role(Role::Pimpinan);
    let login = app
        .post_json("/api/session", None, &json!({ "credential": credential }))
        .await;
    let cookie = login.session_cookie_value().unwrap();

    app.get("/dashboard/pimpinan", Some(&cookie)).await.assert_ok();
    app.get("/dashboard/manajer", Some(&cookie))
        .await
        .assert_see_other("/unauthorized");
}

#[tokio::test]
async fn test_session_login_unknown_role_is_stored() {
    let credential = CredentialFixtures::foreign_role();
    let response = app()
        .post_json("/api/session", None, &json!({ "credential": credential }))
        .await;

    response.assert_ok();
    assert_eq!(response.json()["data"]["authenticated"], true);
    assert!(response.json()["data"]["role"].is_null());
    assert_eq!(response.session_cookie_value(), Some(credential));
}

#[tokio::test]
async fn test_session_login_rejects_empty_credential() {
    let response = app()
        .post_json("/api/session", None, &json!({ "credential": "  " }))
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json()["error"]["code"], "VALIDATION_ERROR");
    assert!(response.session_set_cookie().is_none());
}

#[tokio::test]
async fn test_session_login_rejects_cookie_unsafe_credential() {
    let app = app();
    let credential = CredentialFixtures::for_role(Role::Pimpinan);

    for tampered in [
        format!("{credential}; Path=/admin"),
        format!("{credential},other"),
        format!("{} {}", credential, "x"),
        format!("\"{credential}\""),
    ] {
        let response = app
            .post_json("/api/session", None, &json!({ "credential": tampered }))
            .await;
        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY, "{}", tampered);
        assert_eq!(response.json()["error"]["details"]["field"], "credential");
        assert!(response.session_set_cookie().is_none());
    }
}

#[tokio::test]
async fn test_session_login_rejects_bad_body() {
    let response = app()
        .post_json("/api/session", None, &json!({ "token": "x.y.z" }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_session_logout_is_idempotent() {
    let app = app();
    let credential = CredentialFixtures::for_role(Role::Bendahara);

    let first = app.post("/api/session/logout", Some(&credential)).await;
    first.assert_ok();
    first.assert_clears_session_cookie();
    assert_eq!(first.json()["data"]["authenticated"], false);

    let second = app.post("/api/session/logout", None).await;
    second.assert_ok();
    second.assert_clears_session_cookie();
    assert_eq!(second.json(), first.json());
}

#[tokio::test]
async fn test_session_current() {
    let app = app();

    let anonymous = app.get("/api/session", None).await.json();
    assert_eq!(anonymous["data"]["authenticated"], false);

    let credential = CredentialFixtures::for_role(Role::Pemasaran);
    let current = app.get("/api/session", Some(&credential)).await.json();
    assert_eq!(current["data"]["role"], "Pemasaran");
    assert_eq!(current["data"]["dashboard"], "/dashboard/pemasaran");
}

// =============================================================================
// Page Tests
// =============================================================================

#[tokio::test]
async fn test_page_landing_redirects_to_dashboard() {
    let app = app();
    for role in Role::ALL {
        let credential = CredentialFixtures::for_role(role);
        app.get("/dashboard", Some(&credential))
            .await
            .assert_see_other(role.dashboard_path());
    }
}

#[tokio::test]
async fn test_page_landing_without_role_is_pending() {
    let response = app().get("/dashboard", None).await;
    response.assert_ok();
    let body = response.json();
    assert_eq!(body["landing"]["state"], "pending");
    assert_eq!(body["message"], "Loading...");
}

#[tokio::test]
async fn test_page_manajer_denied_then_logged_out() {
    let app = app();
    let credential = CredentialFixtures::for_role(Role::Manajer);

    app.get("/userManagement", Some(&credential))
        .await
        .assert_see_other("/unauthorized");

    let response = app.get("/unauthorized", Some(&credential)).await;
    response.assert_ok();
    response.assert_clears_session_cookie();
    let body = response.json();
    assert_eq!(body["action_path"], "/");
    assert_eq!(body["title"], "Akses Ditolak");

    app.get("/dashboard/manajer", None).await.assert_see_other("/");
}

#[tokio::test]
async fn test_page_login_is_public() {
    let response = app().get("/", None).await;
    response.assert_ok();
    assert_eq!(response.json()["path"], "/");
}

// =============================================================================
// API Tests
// =============================================================================

#[tokio::test]
async fn test_api_health() {
    let response = app().get("/health", None).await;
    response.assert_ok();
    assert_eq!(response.json()["status"], "healthy");
}

#[tokio::test]
async fn test_api_navigation_bendahara() {
    let credential = CredentialFixtures::for_role(Role::Bendahara);
    let body = app().get("/api/navigation", Some(&credential)).await.json();
    let paths = nav_paths(&body);

    assert_eq!(body["data"]["role"], "Bendahara");
    assert!(paths.contains(&"/financialReports".to_string()));
    assert!(!paths.contains(&"/outlets".to_string()));
    assert!(!paths.contains(&"/inventory".to_string()));
}

#[tokio::test]
async fn test_api_navigation_without_session_is_empty() {
    let body = app().get("/api/navigation", None).await.json();
    assert!(nav_paths(&body).is_empty());
}

#[tokio::test]
async fn test_api_navigation_inventory_children() {
    let credential = CredentialFixtures::for_role(Role::Manajer);
    let body = app().get("/api/navigation", Some(&credential)).await.json();
    let inventory = body["data"]["entries"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["path"] == "/inventory")
        .cloned()
        .unwrap();

    let children: Vec<_> = inventory["children"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["path"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        children,
        vec!["/inventory/stockManagement", "/inventory/batchManagement"]
    );
}

#[tokio::test]
async fn test_api_unknown_path_is_not_found() {
    let response = app().get("/nowhere", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["error"]["code"], "NOT_FOUND");
}
