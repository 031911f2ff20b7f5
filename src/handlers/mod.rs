pub mod attendance;
pub mod auth;
pub mod classes;
pub mod students;
pub mod teachers;
pub mod tenants;
pub mod users;
