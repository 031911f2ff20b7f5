/// Shared enums used across models, policy checks and the wire format

use serde::{Deserialize, Serialize};

/// Account role carried in the token and checked by the role gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum Role {
    Superadmin,
    Schooladmin,
    Teacher,
    Student,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "gender_kind")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Staff role for teacher records. Distinct from the account `Role`:
/// a clerk or accountant is staff without being a login role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "staff_role")]
pub enum StaffRole {
    Teacher,
    Admin,
    Accountant,
    Principal,
    Clerk,
    Other,
}

impl StaffRole {
    /// Parse a path/query value like "Teacher" or "Accountant"
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Teacher" => Some(Self::Teacher),
            "Admin" => Some(Self::Admin),
            "Accountant" => Some(Self::Accountant),
            "Principal" => Some(Self::Principal),
            "Clerk" => Some(Self::Clerk),
            "Other" => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "staff_status")]
pub enum StaffStatus {
    Active,
    Inactive,
    #[serde(rename = "On Leave")]
    #[sqlx(rename = "On Leave")]
    OnLeave,
}

impl StaffStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Active" => Some(Self::Active),
            "Inactive" => Some(Self::Inactive),
            "On Leave" => Some(Self::OnLeave),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "attendance_status", rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "present" => Some(Self::Present),
            "absent" => Some(Self::Absent),
            "late" => Some(Self::Late),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Role::Schooladmin).unwrap(), "schooladmin");
        assert_eq!(serde_json::to_value(Role::Superadmin).unwrap(), "superadmin");
    }

    #[test]
    fn staff_status_on_leave_round_trips() {
        let v = serde_json::to_value(StaffStatus::OnLeave).unwrap();
        assert_eq!(v, "On Leave");
        let back: StaffStatus = serde_json::from_value(v).unwrap();
        assert_eq!(back, StaffStatus::OnLeave);
    }

    #[test]
    fn staff_role_parse_rejects_unknown() {
        assert_eq!(StaffRole::parse("Principal"), Some(StaffRole::Principal));
        assert_eq!(StaffRole::parse("principal"), None);
        assert_eq!(StaffRole::parse("Janitor"), None);
    }
}
