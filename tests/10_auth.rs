mod common;

use anyhow::Result;
use axum::http::{header, StatusCode};
use serde_json::json;

use common::{body_bytes, body_json, register_tenant, send, test_app};

#[tokio::test]
async fn register_derives_slug_and_creates_schooladmin_owner() -> Result<()> {
    let app = test_app();
    let data = register_tenant(&app, "Greenwood High School", "a@x.com").await?;

    assert_eq!(data["tenant"]["slug"], "greenwood-high-school");
    assert_eq!(data["owner"]["role"], "schooladmin");
    assert_eq!(data["owner"]["email"], "a@x.com");
    // The password never appears in any outbound shape
    assert!(data["owner"].get("password").is_none());
    assert!(data["owner"].get("passwordHash").is_none());
    // The scoping identifier is distinct from the storage primary key
    assert_ne!(data["tenant"]["tenantId"], data["tenant"]["id"]);
    Ok(())
}

#[tokio::test]
async fn register_rejects_missing_fields() -> Result<()> {
    let app = test_app();
    let response = send(
        &app,
        "POST",
        "/tenants/register",
        None,
        Some(json!({ "name": "Greenwood" })),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Missing required fields");
    Ok(())
}

#[tokio::test]
async fn duplicate_owner_email_conflicts_even_across_tenants() -> Result<()> {
    let app = test_app();
    register_tenant(&app, "First School", "a@x.com").await?;

    let response = send(
        &app,
        "POST",
        "/tenants/register",
        None,
        Some(json!({
            "name": "Second School",
            "ownerName": "Owner",
            "ownerEmail": "A@X.com",
            "ownerPassword": "pw123456",
        })),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await?;
    assert_eq!(body["message"], "Email is already in use");
    Ok(())
}

#[tokio::test]
async fn duplicate_slug_conflicts() -> Result<()> {
    let app = test_app();
    register_tenant(&app, "Greenwood", "a@x.com").await?;

    let response = send(
        &app,
        "POST",
        "/tenants/register",
        None,
        Some(json!({
            "name": "GREENWOOD",
            "ownerName": "Owner",
            "ownerEmail": "b@x.com",
            "ownerPassword": "pw123456",
        })),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await?;
    assert_eq!(body["message"], "Tenant slug already exists");
    Ok(())
}

#[tokio::test]
async fn login_returns_token_and_sets_cookie() -> Result<()> {
    let app = test_app();
    register_tenant(&app, "Greenwood", "a@x.com").await?;

    let response = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "a@x.com", "password": "pw123456", "tenantSlug": "greenwood" })),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login sets a cookie")
        .to_str()?
        .to_string();
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));

    let body = body_json(response).await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Login successful");
    assert!(!body["data"]["token"].as_str().unwrap().is_empty());
    assert!(body["data"]["user"].get("passwordHash").is_none());
    Ok(())
}

#[tokio::test]
async fn login_by_tenant_id_also_works() -> Result<()> {
    let app = test_app();
    let data = register_tenant(&app, "Greenwood", "a@x.com").await?;
    let tenant_id = data["tenant"]["tenantId"].as_str().unwrap();

    let response = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "a@x.com", "password": "pw123456", "tenantId": tenant_id })),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_byte_identical() -> Result<()> {
    let app = test_app();
    register_tenant(&app, "Greenwood", "a@x.com").await?;

    let wrong_password = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "a@x.com", "password": "not-the-password", "tenantSlug": "greenwood" })),
    )
    .await?;
    let unknown_email = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "ghost@x.com", "password": "pw123456", "tenantSlug": "greenwood" })),
    )
    .await?;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    let first = body_bytes(wrong_password).await?;
    let second = body_bytes(unknown_email).await?;
    assert_eq!(first, second);
    assert_eq!(
        serde_json::from_slice::<serde_json::Value>(&first)?,
        json!({ "success": false, "message": "Invalid credentials" })
    );
    Ok(())
}

#[tokio::test]
async fn login_against_unknown_slug_is_not_found() -> Result<()> {
    let app = test_app();
    register_tenant(&app, "Greenwood", "a@x.com").await?;

    let response = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "a@x.com", "password": "pw123456", "tenantSlug": "nowhere" })),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn protected_routes_require_a_token() -> Result<()> {
    let app = test_app();

    let response = send(&app, "GET", "/students", None, None).await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await?;
    assert_eq!(body, json!({ "success": false, "message": "Missing token" }));
    Ok(())
}

#[tokio::test]
async fn garbage_tokens_are_rejected_without_detail() -> Result<()> {
    let app = test_app();

    let response = send(&app, "GET", "/students", Some("not.a.token"), None).await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await?;
    assert_eq!(body, json!({ "success": false, "message": "Invalid token" }));
    Ok(())
}

#[tokio::test]
async fn cookie_token_authenticates_as_fallback() -> Result<()> {
    let app = test_app();
    register_tenant(&app, "Greenwood", "a@x.com").await?;
    let token = common::login(&app, "a@x.com", "pw123456", "greenwood").await?;

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/students")
        .header(header::COOKIE, format!("theme=dark; token={}", token))
        .body(axum::body::Body::empty())?;
    let response = tower::ServiceExt::oneshot(app.clone(), request).await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn unmatched_routes_return_the_uniform_404() -> Result<()> {
    let app = test_app();
    let response = send(&app, "GET", "/no/such/route", None, None).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await?;
    assert_eq!(body, json!({ "success": false, "message": "Route not found" }));
    Ok(())
}

#[tokio::test]
async fn health_reports_liveness() -> Result<()> {
    let app = test_app();
    let response = send(&app, "GET", "/health", None, None).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["data"]["status"], "ok");
    Ok(())
}
