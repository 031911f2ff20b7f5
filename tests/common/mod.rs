#![allow(dead_code)]

//! Shared test harness: builds the real router over the in-memory store and
//! drives it in-process, no network or database required.

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use school_api_rust::app::{app, AppState};
use school_api_rust::database::Store;

pub fn test_app() -> Router {
    app(AppState {
        store: Store::memory(),
    })
}

/// Read a response body as JSON
pub async fn body_json(response: Response<Body>) -> Result<Value> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(serde_json::from_slice(&bytes)?)
}

/// Read a response body as raw bytes (for byte-identity assertions)
pub async fn body_bytes(response: Response<Body>) -> Result<Vec<u8>> {
    Ok(response.into_body().collect().await?.to_bytes().to_vec())
}

/// Fire one request at the router. `token` becomes a Bearer header.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Result<Response<Body>> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&value)?))?,
        None => builder.body(Body::empty())?,
    };
    Ok(app.clone().oneshot(request).await?)
}

/// Register a tenant; returns the response `data` (tenant + owner)
pub async fn register_tenant(app: &Router, name: &str, email: &str) -> Result<Value> {
    let response = send(
        app,
        "POST",
        "/tenants/register",
        None,
        Some(json!({
            "name": name,
            "ownerName": "Owner",
            "ownerEmail": email,
            "ownerPassword": "pw123456",
        })),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await?;
    Ok(body["data"].clone())
}

/// Login; returns the token
pub async fn login(app: &Router, email: &str, password: &str, slug: &str) -> Result<String> {
    let response = send(
        app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": password, "tenantSlug": slug })),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    Ok(body["data"]["token"].as_str().expect("token").to_string())
}

/// Register a tenant and login as its schooladmin owner in one step
pub async fn tenant_with_admin(app: &Router, name: &str, slug: &str, email: &str) -> Result<String> {
    register_tenant(app, name, email).await?;
    login(app, email, "pw123456", slug).await
}

/// Create a teacher record; returns its id
pub async fn create_teacher(app: &Router, token: &str, name: &str) -> Result<String> {
    let response = send(
        app,
        "POST",
        "/teachers",
        Some(token),
        Some(json!({
            "employeeName": name,
            "mobileNumber": "0300-1234567",
            "joiningDate": "2026-01-05T00:00:00Z",
            "role": "Teacher",
            "monthlySalary": 45000,
        })),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await?;
    Ok(body["data"]["id"].as_str().expect("teacher id").to_string())
}

/// Create a class taught by `teacher_id`; returns its id
pub async fn create_class(app: &Router, token: &str, name: &str, teacher_id: &str) -> Result<String> {
    let response = send(
        app,
        "POST",
        "/classes",
        Some(token),
        Some(json!({
            "className": name,
            "monthlyTuitionFee": 1500,
            "classTeacher": teacher_id,
        })),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await?;
    Ok(body["data"]["id"].as_str().expect("class id").to_string())
}

/// Create a student in `class_id`; returns the whole student object
pub async fn create_student(app: &Router, token: &str, name: &str, class_id: &str) -> Result<Value> {
    let response = send(
        app,
        "POST",
        "/students",
        Some(token),
        Some(json!({
            "studentName": name,
            "mobileNumber": "0311-7654321",
            "classId": class_id,
            "admissionDate": "2026-02-01T00:00:00Z",
        })),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await?;
    Ok(body["data"].clone())
}

/// Create a user account in the active tenant and login as them
pub async fn user_with_role(
    app: &Router,
    admin_token: &str,
    email: &str,
    role: &str,
    slug: &str,
) -> Result<String> {
    let response = send(
        app,
        "POST",
        "/users",
        Some(admin_token),
        Some(json!({
            "name": "Member",
            "email": email,
            "password": "pw123456",
            "role": role,
        })),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    login(app, email, "pw123456", slug).await
}
