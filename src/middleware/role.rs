//! Role gate.
//!
//! One declarative table maps (resource, action) to the roles allowed to
//! perform it, checked by a single `authorize` call at the top of each
//! handler. Keeping the whole policy in one match makes missing checks easy
//! to audit.

use crate::auth::Identity;
use crate::error::ApiError;
use crate::types::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Students,
    Teachers,
    Classes,
    Attendance,
    Users,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Read,
    Create,
    Update,
    Delete,
}

const ANY_AUTHENTICATED: &[Role] = &[
    Role::Superadmin,
    Role::Schooladmin,
    Role::Teacher,
    Role::Student,
];
const SCHOOLADMIN: &[Role] = &[Role::Schooladmin];
const SCHOOLADMIN_OR_TEACHER: &[Role] = &[Role::Schooladmin, Role::Teacher];

/// The authorization table. Reads are open to every authenticated role in
/// the tenant; writes are restricted per resource. Note that superadmin is
/// deliberately absent from the write sets.
pub fn allowed_roles(resource: Resource, action: Action) -> &'static [Role] {
    use Action::*;
    use Resource::*;

    match (resource, action) {
        (Students, List | Read) => ANY_AUTHENTICATED,
        (Students, Create | Update) => SCHOOLADMIN_OR_TEACHER,
        (Students, Delete) => SCHOOLADMIN,

        (Teachers, List | Read) => ANY_AUTHENTICATED,
        (Teachers, Create | Update | Delete) => SCHOOLADMIN,

        (Classes, List | Read) => ANY_AUTHENTICATED,
        (Classes, Create | Update | Delete) => SCHOOLADMIN,

        (Attendance, List | Read) => ANY_AUTHENTICATED,
        (Attendance, Create | Update) => SCHOOLADMIN_OR_TEACHER,
        (Attendance, Delete) => SCHOOLADMIN,

        (Users, _) => SCHOOLADMIN,
    }
}

/// Allow or reject the request based on the identity's role
pub fn authorize(identity: &Identity, resource: Resource, action: Action) -> Result<(), ApiError> {
    if allowed_roles(resource, action).contains(&identity.role) {
        Ok(())
    } else {
        Err(ApiError::forbidden("Insufficient role"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn identity(role: Role) -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            role,
        }
    }

    #[test]
    fn any_authenticated_role_can_read() {
        for role in [Role::Superadmin, Role::Schooladmin, Role::Teacher, Role::Student] {
            assert!(authorize(&identity(role), Resource::Students, Action::List).is_ok());
            assert!(authorize(&identity(role), Resource::Classes, Action::Read).is_ok());
        }
    }

    #[test]
    fn student_cannot_write() {
        let who = identity(Role::Student);
        let err = authorize(&who, Resource::Students, Action::Create).unwrap_err();
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.message(), "Insufficient role");
        assert!(authorize(&who, Resource::Attendance, Action::Update).is_err());
    }

    #[test]
    fn teacher_can_create_students_but_not_delete() {
        let who = identity(Role::Teacher);
        assert!(authorize(&who, Resource::Students, Action::Create).is_ok());
        assert!(authorize(&who, Resource::Students, Action::Delete).is_err());
        assert!(authorize(&who, Resource::Classes, Action::Create).is_err());
    }

    #[test]
    fn users_resource_is_schooladmin_only() {
        assert!(authorize(&identity(Role::Schooladmin), Resource::Users, Action::List).is_ok());
        for role in [Role::Superadmin, Role::Teacher, Role::Student] {
            assert!(authorize(&identity(role), Resource::Users, Action::List).is_err());
        }
    }
}
