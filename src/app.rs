use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::database::Store;
use crate::handlers;
use crate::middleware::{auth_middleware, tenant_middleware};

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
}

/// Assemble the full router. Protected routes run the pipeline
/// authentication gate -> tenant scoper -> handler; role checks happen
/// inside the handlers against the policy table.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .route("/tenants/register", post(handlers::tenants::register))
        .route("/auth/login", post(handlers::auth::login))
        // Protected resources
        .merge(protected_routes())
        .fallback(route_not_found)
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn protected_routes() -> Router<AppState> {
    Router::new()
        .merge(student_routes())
        .merge(teacher_routes())
        .merge(class_routes())
        .merge(attendance_routes())
        .merge(user_routes())
        // Layer order: the last layer added runs first, so every request
        // is authenticated before it is tenant-scoped
        .layer(middleware::from_fn(tenant_middleware))
        .layer(middleware::from_fn(auth_middleware))
}

fn student_routes() -> Router<AppState> {
    use handlers::students;

    Router::new()
        .route("/students/search", get(students::search))
        .route("/students/class/:class_id", get(students::by_class))
        .route("/students", get(students::list).post(students::create))
        .route(
            "/students/:id",
            get(students::get)
                .put(students::update)
                .delete(students::delete),
        )
}

fn teacher_routes() -> Router<AppState> {
    use handlers::teachers;

    Router::new()
        .route("/teachers/search", get(teachers::search))
        .route("/teachers/role/:role", get(teachers::by_role))
        .route("/teachers", get(teachers::list).post(teachers::create))
        .route(
            "/teachers/:id",
            get(teachers::get)
                .put(teachers::update)
                .delete(teachers::delete),
        )
}

fn class_routes() -> Router<AppState> {
    use handlers::classes;

    Router::new()
        .route("/classes/teacher/:teacher_id", get(classes::by_teacher))
        .route("/classes", get(classes::list).post(classes::create))
        .route(
            "/classes/:id",
            get(classes::get)
                .put(classes::update)
                .delete(classes::delete),
        )
}

fn attendance_routes() -> Router<AppState> {
    use handlers::attendance;

    Router::new()
        .route(
            "/attendance",
            get(attendance::list).post(attendance::create),
        )
        .route(
            "/attendance/:id",
            get(attendance::get)
                .put(attendance::update)
                .delete(attendance::delete),
        )
}

fn user_routes() -> Router<AppState> {
    use handlers::users;

    Router::new().route("/users", get(users::list).post(users::create))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "School API (Rust)",
            "version": version,
            "description": "Multi-tenant school management backend built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "register": "POST /tenants/register (public)",
                "login": "POST /auth/login (public - token acquisition)",
                "students": "/students[/:id] (protected)",
                "teachers": "/teachers[/:id] (protected)",
                "classes": "/classes[/:id] (protected)",
                "attendance": "/attendance[/:id] (protected)",
                "users": "/users (protected, schooladmin)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "OK",
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "message": "database unavailable"
                })),
            )
        }
    }
}

async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "message": "Route not found" })),
    )
}
