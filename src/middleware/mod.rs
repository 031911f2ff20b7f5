pub mod auth;
pub mod role;
pub mod tenant;

pub use auth::auth_middleware;
pub use role::{authorize, Action, Resource};
pub use tenant::{tenant_middleware, TenantScope};
