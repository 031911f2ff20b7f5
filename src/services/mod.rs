pub mod attendance_service;
pub mod auth_service;
pub mod class_service;
pub mod sequence;
pub mod student_service;
pub mod teacher_service;
pub mod tenant_service;
pub mod user_service;
