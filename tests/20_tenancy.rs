//! Tenant isolation properties: entities created under tenant A must be
//! invisible to tenant B through every access path, indistinguishable from
//! records that do not exist.

mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::{
    body_json, create_class, create_student, create_teacher, send, tenant_with_admin, test_app,
};

struct TwoTenants {
    app: axum::Router,
    token_a: String,
    token_b: String,
}

async fn two_tenants() -> Result<TwoTenants> {
    let app = test_app();
    let token_a = tenant_with_admin(&app, "Alpha School", "alpha-school", "admin@alpha.test").await?;
    let token_b = tenant_with_admin(&app, "Beta School", "beta-school", "admin@beta.test").await?;
    Ok(TwoTenants { app, token_a, token_b })
}

#[tokio::test]
async fn cross_tenant_reads_are_not_found() -> Result<()> {
    let t = two_tenants().await?;
    let teacher_id = create_teacher(&t.app, &t.token_a, "Ms Alpha").await?;
    let class_id = create_class(&t.app, &t.token_a, "Grade 1", &teacher_id).await?;
    let student = create_student(&t.app, &t.token_a, "Zain", &class_id).await?;
    let student_id = student["id"].as_str().unwrap();

    // The owner sees the record
    let own = send(
        &t.app,
        "GET",
        &format!("/students/{}", student_id),
        Some(&t.token_a),
        None,
    )
    .await?;
    assert_eq!(own.status(), StatusCode::OK);

    // The other tenant gets 404, for every entity kind
    for uri in [
        format!("/students/{}", student_id),
        format!("/teachers/{}", teacher_id),
        format!("/classes/{}", class_id),
    ] {
        let response = send(&t.app, "GET", &uri, Some(&t.token_b), None).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "leaked: {}", uri);
        let body = body_json(response).await?;
        assert_eq!(body["success"], false);
    }
    Ok(())
}

#[tokio::test]
async fn cross_tenant_updates_and_deletes_are_not_found() -> Result<()> {
    let t = two_tenants().await?;
    let teacher_id = create_teacher(&t.app, &t.token_a, "Ms Alpha").await?;
    let class_id = create_class(&t.app, &t.token_a, "Grade 1", &teacher_id).await?;
    let student = create_student(&t.app, &t.token_a, "Zain", &class_id).await?;
    let student_id = student["id"].as_str().unwrap();

    let update = send(
        &t.app,
        "PUT",
        &format!("/students/{}", student_id),
        Some(&t.token_b),
        Some(json!({ "studentName": "Hijacked" })),
    )
    .await?;
    assert_eq!(update.status(), StatusCode::NOT_FOUND);

    let delete = send(
        &t.app,
        "DELETE",
        &format!("/students/{}", student_id),
        Some(&t.token_b),
        None,
    )
    .await?;
    assert_eq!(delete.status(), StatusCode::NOT_FOUND);

    // Still intact for the owner
    let own = send(
        &t.app,
        "GET",
        &format!("/students/{}", student_id),
        Some(&t.token_a),
        None,
    )
    .await?;
    assert_eq!(own.status(), StatusCode::OK);
    let body = body_json(own).await?;
    assert_eq!(body["data"]["studentName"], "Zain");
    Ok(())
}

#[tokio::test]
async fn lists_only_contain_own_tenant_records() -> Result<()> {
    let t = two_tenants().await?;
    let teacher_id = create_teacher(&t.app, &t.token_a, "Ms Alpha").await?;
    let class_id = create_class(&t.app, &t.token_a, "Grade 1", &teacher_id).await?;
    create_student(&t.app, &t.token_a, "Zain", &class_id).await?;

    let response = send(&t.app, "GET", "/students", Some(&t.token_b), None).await?;
    let body = body_json(response).await?;
    assert_eq!(body["data"]["pagination"]["total"], 0);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 0);

    let response = send(&t.app, "GET", "/students", Some(&t.token_a), None).await?;
    let body = body_json(response).await?;
    assert_eq!(body["data"]["pagination"]["total"], 1);
    Ok(())
}

#[tokio::test]
async fn payload_tenant_id_is_ignored() -> Result<()> {
    let t = two_tenants().await?;
    let teacher_id = create_teacher(&t.app, &t.token_a, "Ms Alpha").await?;
    let class_id = create_class(&t.app, &t.token_a, "Grade 1", &teacher_id).await?;

    // Attempt to plant a record into tenant B by naming its id in the body
    let response = send(
        &t.app,
        "POST",
        "/students",
        Some(&t.token_a),
        Some(json!({
            "studentName": "Drifter",
            "mobileNumber": "0311-0000000",
            "classId": class_id,
            "admissionDate": "2026-02-01T00:00:00Z",
            "tenantId": "11111111-1111-1111-1111-111111111111",
        })),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await?;
    let student_id = body["data"]["id"].as_str().unwrap().to_string();

    // It landed in the caller's tenant, not the named one
    let own = send(
        &t.app,
        "GET",
        &format!("/students/{}", student_id),
        Some(&t.token_a),
        None,
    )
    .await?;
    assert_eq!(own.status(), StatusCode::OK);

    let other = send(
        &t.app,
        "GET",
        &format!("/students/{}", student_id),
        Some(&t.token_b),
        None,
    )
    .await?;
    assert_eq!(other.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn cross_tenant_references_are_rejected() -> Result<()> {
    let t = two_tenants().await?;
    let teacher_a = create_teacher(&t.app, &t.token_a, "Ms Alpha").await?;

    // Tenant B may not hang a class off tenant A's teacher
    let response = send(
        &t.app,
        "POST",
        "/classes",
        Some(&t.token_b),
        Some(json!({
            "className": "Grade 1",
            "monthlyTuitionFee": 1500,
            "classTeacher": teacher_a,
        })),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await?;
    assert_eq!(body["message"], "Class teacher not found");
    Ok(())
}

#[tokio::test]
async fn same_email_can_exist_under_both_tenants() -> Result<()> {
    let t = two_tenants().await?;

    for token in [&t.token_a, &t.token_b] {
        let response = send(
            &t.app,
            "POST",
            "/users",
            Some(token),
            Some(json!({
                "name": "Shared Name",
                "email": "shared@example.test",
                "password": "pw123456",
                "role": "teacher",
            })),
        )
        .await?;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    Ok(())
}
