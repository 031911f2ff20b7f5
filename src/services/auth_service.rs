use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{self, password, Identity};
use crate::database::models::{AuthSession, User};
use crate::database::store::Store;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub tenant_id: Option<Uuid>,
    pub tenant_slug: Option<String>,
}

/// Request metadata captured for the login audit trail
#[derive(Debug, Default, Clone)]
pub struct ClientInfo {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResult {
    pub token: String,
    pub user: User,
}

pub struct AuthService {
    store: Store,
}

impl AuthService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Authenticate a user within a tenant and issue a token.
    ///
    /// An unknown email and a wrong password both fail with the identical
    /// `Unauthorized("Invalid credentials")` so callers cannot probe which
    /// emails exist.
    pub async fn login(
        &self,
        request: LoginRequest,
        client: ClientInfo,
    ) -> Result<LoginResult, ApiError> {
        let email = request.email.as_deref().unwrap_or("").trim().to_lowercase();
        let password_plain = request.password.unwrap_or_default();

        if email.is_empty() || password_plain.is_empty() {
            return Err(ApiError::bad_request("Missing credentials"));
        }

        let tenant_id = match (request.tenant_id, request.tenant_slug) {
            (Some(id), _) => id,
            (None, Some(slug)) => {
                self.store
                    .tenants
                    .find_by_slug(&slug.to_lowercase())
                    .await?
                    .ok_or_else(|| ApiError::not_found("Tenant not found"))?
                    .tenant_id
            }
            (None, None) => return Err(ApiError::bad_request("Missing credentials")),
        };

        let user = self
            .store
            .users
            .find_by_email(tenant_id, &email)
            .await?
            .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

        let matches = password::verify(password_plain, user.password_hash.clone())
            .await
            .map_err(|e| ApiError::internal(e.to_string()))?;
        if !matches {
            return Err(ApiError::unauthorized("Invalid credentials"));
        }

        let identity = Identity {
            user_id: user.id,
            tenant_id: user.tenant_id,
            role: user.role,
        };
        let token =
            auth::issue_token(&identity).map_err(|e| ApiError::internal(e.to_string()))?;

        let session = AuthSession::new(user.id, user.tenant_id, client.ip, client.user_agent);
        self.store.sessions.insert(&session).await?;

        tracing::info!(user = %user.email, tenant = %user.tenant_id, "login successful");
        Ok(LoginResult { token, user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::tenant_service::{RegisterTenantRequest, TenantService};

    async fn store_with_tenant() -> Store {
        let store = Store::memory();
        TenantService::new(store.clone())
            .register(RegisterTenantRequest {
                name: Some("Greenwood".into()),
                slug: None,
                owner_name: Some("Alice".into()),
                owner_email: Some("a@x.com".into()),
                owner_password: Some("pw123456".into()),
            })
            .await
            .unwrap();
        store
    }

    fn login_request(email: &str, password: &str, slug: &str) -> LoginRequest {
        LoginRequest {
            email: Some(email.into()),
            password: Some(password.into()),
            tenant_id: None,
            tenant_slug: Some(slug.into()),
        }
    }

    #[tokio::test]
    async fn login_round_trip() {
        let store = store_with_tenant().await;
        let service = AuthService::new(store);
        let result = service
            .login(login_request("a@x.com", "pw123456", "greenwood"), ClientInfo::default())
            .await
            .unwrap();

        assert!(!result.token.is_empty());
        let identity = auth::verify_token(&result.token).unwrap();
        assert_eq!(identity.user_id, result.user.id);
        assert_eq!(identity.tenant_id, result.user.tenant_id);
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_are_indistinguishable() {
        let store = store_with_tenant().await;
        let service = AuthService::new(store);

        let missing = service
            .login(login_request("nobody@x.com", "pw123456", "greenwood"), ClientInfo::default())
            .await
            .unwrap_err();
        let mismatch = service
            .login(login_request("a@x.com", "wrong-password", "greenwood"), ClientInfo::default())
            .await
            .unwrap_err();

        assert_eq!(missing.status_code(), 401);
        assert_eq!(missing.status_code(), mismatch.status_code());
        assert_eq!(missing.message(), mismatch.message());
        assert_eq!(missing.to_json(), mismatch.to_json());
    }

    #[tokio::test]
    async fn unknown_slug_is_not_found() {
        let store = store_with_tenant().await;
        let err = AuthService::new(store)
            .login(login_request("a@x.com", "pw123456", "nowhere"), ClientInfo::default())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn missing_tenant_reference_is_bad_request() {
        let store = store_with_tenant().await;
        let err = AuthService::new(store)
            .login(
                LoginRequest {
                    email: Some("a@x.com".into()),
                    password: Some("pw123456".into()),
                    tenant_id: None,
                    tenant_slug: None,
                },
                ClientInfo::default(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
