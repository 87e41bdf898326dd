use std::fmt::{Display, Formatter};
use std::str::FromStr;

use examboard_core::AppError;
use serde::{Deserialize, Serialize};

use crate::permission_matrix::PermissionMatrix;
use crate::role_permissions;

/// Globally known roles, used at both the organization and procedure tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Procedure secretary with full access across the organization.
    Admin,
    /// Authors professional knowledge exams from provided templates.
    SubjectExpert,
    /// Leads the commission and closes evaluation.
    CommissionChair,
    /// Scores candidates, cannot close evaluation.
    CommissionMember,
    /// Applicant taking exams.
    Candidate,
    /// Base organization role for users invited into individual procedures.
    Member,
}

impl Role {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::SubjectExpert => "subject_expert",
            Self::CommissionChair => "commission_chair",
            Self::CommissionMember => "commission_member",
            Self::Candidate => "candidate",
            Self::Member => "member",
        }
    }

    /// Returns all known roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[
            Role::Admin,
            Role::SubjectExpert,
            Role::CommissionChair,
            Role::CommissionMember,
            Role::Candidate,
            Role::Member,
        ];

        ALL
    }

    /// Roles an organization admin may assign to staff working a procedure.
    #[must_use]
    pub fn staff_roles() -> &'static [Self] {
        const STAFF: &[Role] = &[
            Role::SubjectExpert,
            Role::CommissionChair,
            Role::CommissionMember,
        ];

        STAFF
    }

    /// Returns whether this is the organization admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns whether the role may be assigned to procedure staff.
    #[must_use]
    pub fn is_staff(&self) -> bool {
        Self::staff_roles().contains(self)
    }

    /// Returns the label shown in the Slovak UI.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Admin => "Tajomník VK",
            Self::SubjectExpert => "Vecný gestor",
            Self::CommissionChair => "Predseda komisie",
            Self::CommissionMember => "Člen komisie",
            Self::Candidate => "Uchádzač",
            Self::Member => "Pozvaný člen",
        }
    }

    /// Returns the permission matrix granted by this role.
    #[must_use]
    pub fn permissions(&self) -> PermissionMatrix {
        match self {
            Self::Admin => role_permissions::ADMIN,
            Self::SubjectExpert => role_permissions::SUBJECT_EXPERT,
            Self::CommissionChair => role_permissions::COMMISSION_CHAIR,
            Self::CommissionMember => role_permissions::COMMISSION_MEMBER,
            Self::Candidate => role_permissions::CANDIDATE,
            Self::Member => role_permissions::MEMBER,
        }
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|role| role.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown role '{value}'")))
    }
}

impl Display for Role {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Resolves the permission matrix for a stored role name.
///
/// Total: names outside the known role set resolve to
/// [`PermissionMatrix::DENY_ALL`] so role-table drift fails closed.
#[must_use]
pub fn resolve_permissions(role_name: &str) -> PermissionMatrix {
    Role::from_str(role_name)
        .map(|role| role.permissions())
        .unwrap_or(PermissionMatrix::DENY_ALL)
}
