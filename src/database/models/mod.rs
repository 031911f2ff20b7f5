pub mod attendance;
pub mod class;
pub mod session;
pub mod student;
pub mod teacher;
pub mod tenant;
pub mod user;

pub use attendance::Attendance;
pub use class::Class;
pub use session::AuthSession;
pub use student::{ParentInfo, Student};
pub use teacher::Teacher;
pub use tenant::Tenant;
pub use user::User;
