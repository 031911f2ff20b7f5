use serde::Deserialize;
use uuid::Uuid;

use crate::auth::password;
use crate::database::models::User;
use crate::database::store::Store;
use crate::error::ApiError;
use crate::services::tenant_service::MIN_PASSWORD_LENGTH;
use crate::types::Role;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub profile_image: Option<String>,
}

pub struct UserService {
    store: Store,
}

impl UserService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Create an account inside the active tenant. Email uniqueness is per
    /// tenant; the same address may exist under a different tenant.
    pub async fn create(
        &self,
        tenant_id: Uuid,
        request: CreateUserRequest,
    ) -> Result<User, ApiError> {
        let (name, email, password_plain) =
            match (request.name, request.email, request.password) {
                (Some(name), Some(email), Some(password))
                    if !name.trim().is_empty()
                        && !email.trim().is_empty()
                        && !password.is_empty() =>
                {
                    (name, email, password)
                }
                _ => return Err(ApiError::bad_request("Missing required fields")),
            };

        if password_plain.len() < MIN_PASSWORD_LENGTH {
            return Err(ApiError::bad_request(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let password_hash = password::hash(password_plain)
            .await
            .map_err(|e| ApiError::internal(e.to_string()))?;

        let mut user = User::new(
            tenant_id,
            name.trim().to_string(),
            email.trim().to_lowercase(),
            password_hash,
            request.role.unwrap_or(Role::Student),
        );
        user.profile_image = request.profile_image;

        self.store.users.insert(&user).await?;
        Ok(user)
    }

    pub async fn list(&self, tenant_id: Uuid) -> Result<Vec<User>, ApiError> {
        Ok(self.store.users.list(tenant_id).await?)
    }
}
