use serde::{Deserialize, Serialize};

use crate::auth::password;
use crate::database::models::{Tenant, User};
use crate::database::store::Store;
use crate::error::ApiError;
use crate::types::Role;

/// Minimum password length accepted for new accounts
pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTenantRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub owner_name: Option<String>,
    pub owner_email: Option<String>,
    pub owner_password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegistrationResult {
    pub tenant: Tenant,
    pub owner: User,
}

/// Normalize a display name into a URL-safe slug: lowercase, runs of
/// non-alphanumerics collapsed to single hyphens, edges trimmed
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut last_was_hyphen = true; // trims leading hyphens
    for ch in value.to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

pub struct TenantService {
    store: Store,
}

impl TenantService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Register a new tenant together with its owning schooladmin account.
    ///
    /// The owner email must be unused across the whole system: this is the
    /// one deliberately tenant-free uniqueness check, since no tenant
    /// context exists yet at registration time.
    pub async fn register(
        &self,
        request: RegisterTenantRequest,
    ) -> Result<RegistrationResult, ApiError> {
        let (name, owner_name, owner_email, owner_password) = match (
            request.name,
            request.owner_name,
            request.owner_email,
            request.owner_password,
        ) {
            (Some(name), Some(owner_name), Some(owner_email), Some(owner_password))
                if !name.trim().is_empty()
                    && !owner_name.trim().is_empty()
                    && !owner_email.trim().is_empty()
                    && !owner_password.is_empty() =>
            {
                (name, owner_name, owner_email, owner_password)
            }
            _ => return Err(ApiError::bad_request("Missing required fields")),
        };

        if owner_password.len() < MIN_PASSWORD_LENGTH {
            return Err(ApiError::bad_request(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let normalized_email = owner_email.trim().to_lowercase();
        if self
            .store
            .users
            .find_by_email_any_tenant(&normalized_email)
            .await?
            .is_some()
        {
            return Err(ApiError::conflict("Email is already in use"));
        }

        let tenant_slug = match request.slug {
            Some(raw) => slugify(&raw),
            None => slugify(&name),
        };
        if tenant_slug.is_empty() {
            return Err(ApiError::bad_request("Slug must contain letters or digits"));
        }
        if self.store.tenants.find_by_slug(&tenant_slug).await?.is_some() {
            return Err(ApiError::conflict("Tenant slug already exists"));
        }

        // Mints a fresh tenant_id, distinct from the row's primary key
        let tenant = Tenant::new(name.trim().to_string(), tenant_slug);
        self.store.tenants.insert(&tenant).await?;

        let password_hash = password::hash(owner_password)
            .await
            .map_err(|e| ApiError::internal(e.to_string()))?;
        let owner = User::new(
            tenant.tenant_id,
            owner_name.trim().to_string(),
            normalized_email,
            password_hash,
            Role::Schooladmin,
        );
        self.store.users.insert(&owner).await?;
        self.store.tenants.set_owner(tenant.id, owner.id).await?;

        let tenant = Tenant {
            owner_user_id: Some(owner.id),
            ..tenant
        };

        tracing::info!(tenant = %tenant.slug, "tenant registered");
        Ok(RegistrationResult { tenant, owner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(
        name: &str,
        slug: Option<&str>,
        email: &str,
        password: &str,
    ) -> RegisterTenantRequest {
        RegisterTenantRequest {
            name: Some(name.to_string()),
            slug: slug.map(|s| s.to_string()),
            owner_name: Some("Owner".to_string()),
            owner_email: Some(email.to_string()),
            owner_password: Some(password.to_string()),
        }
    }

    #[test]
    fn slugify_normalizes() {
        assert_eq!(slugify("Greenwood"), "greenwood");
        assert_eq!(slugify("  Green Wood   High!  "), "green-wood-high");
        assert_eq!(slugify("--Éé@#ABC--123--"), "abc-123");
        assert_eq!(slugify("###"), "");
    }

    #[tokio::test]
    async fn register_derives_slug_and_owner_role() {
        let service = TenantService::new(Store::memory());
        let result = service
            .register(request("Greenwood", None, "a@x.com", "pw123456"))
            .await
            .unwrap();

        assert_eq!(result.tenant.slug, "greenwood");
        assert_eq!(result.tenant.owner_user_id, Some(result.owner.id));
        assert_eq!(result.owner.role, Role::Schooladmin);
        assert_eq!(result.owner.tenant_id, result.tenant.tenant_id);
        assert_ne!(result.tenant.id, result.tenant.tenant_id);
        assert_ne!(result.owner.password_hash, "pw123456");
    }

    #[tokio::test]
    async fn duplicate_owner_email_conflicts_across_tenants() {
        let service = TenantService::new(Store::memory());
        service
            .register(request("First School", None, "a@x.com", "pw123456"))
            .await
            .unwrap();

        let err = service
            .register(request("Second School", None, "A@X.COM", "pw123456"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.message(), "Email is already in use");
    }

    #[tokio::test]
    async fn duplicate_slug_conflicts() {
        let service = TenantService::new(Store::memory());
        service
            .register(request("Greenwood", None, "a@x.com", "pw123456"))
            .await
            .unwrap();

        let err = service
            .register(request("Another Greenwood", Some("  GREENWOOD  "), "b@x.com", "pw123456"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.message(), "Tenant slug already exists");
    }

    #[tokio::test]
    async fn missing_fields_are_rejected() {
        let service = TenantService::new(Store::memory());
        let err = service
            .register(RegisterTenantRequest {
                name: Some("Greenwood".into()),
                slug: None,
                owner_name: None,
                owner_email: Some("a@x.com".into()),
                owner_password: Some("pw123456".into()),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let service = TenantService::new(Store::memory());
        let err = service
            .register(request("Greenwood", None, "a@x.com", "short"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
