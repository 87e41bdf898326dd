use std::str::FromStr;

use chrono::{DateTime, Utc};
use examboard_core::{AppError, OrganizationId, ProcedureId, UserId};
use serde::{Deserialize, Serialize};

use crate::permission_matrix::PermissionMatrix;
use crate::role::{Role, resolve_permissions};

/// A user's role within one organization.
///
/// At most one membership exists per `(user_id, organization_id)` pair.
/// The role is kept as the stored name so unknown roles resolve to no
/// permissions instead of failing the lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationMembership {
    /// Member user.
    pub user_id: UserId,
    /// Organization the membership belongs to.
    pub organization_id: OrganizationId,
    /// Stored organization role name.
    pub role_name: String,
}

impl OrganizationMembership {
    /// Creates a membership with a known role.
    #[must_use]
    pub fn new(user_id: UserId, organization_id: OrganizationId, role: Role) -> Self {
        Self {
            user_id,
            organization_id,
            role_name: role.as_str().to_owned(),
        }
    }

    /// Returns the parsed role, if the stored name is known.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        Role::from_str(self.role_name.as_str()).ok()
    }

    /// Returns whether the member is an organization admin.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role().is_some_and(|role| role.is_admin())
    }

    /// Resolves the organization-tier permission matrix.
    #[must_use]
    pub fn permissions(&self) -> PermissionMatrix {
        resolve_permissions(self.role_name.as_str())
    }
}

/// Lifecycle of a procedure assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    /// Invited, not logged in yet.
    Pending,
    /// Logged in at least once since the invitation.
    Accepted,
}

impl AssignmentStatus {
    /// Returns a stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
        }
    }
}

impl FromStr for AssignmentStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            _ => Err(AppError::Validation(format!(
                "unknown assignment status '{value}'"
            ))),
        }
    }
}

/// A user's role within one procedure, independent of their organization role.
///
/// At most one assignment exists per `(user_id, procedure_id)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcedureAssignment {
    /// Assigned user.
    pub user_id: UserId,
    /// Procedure the assignment scopes.
    pub procedure_id: ProcedureId,
    /// Stored procedure role name.
    pub role_name: String,
    /// Invitation lifecycle state.
    pub status: AssignmentStatus,
    /// When the assignment was created.
    pub assigned_at: DateTime<Utc>,
    /// When the assignee first logged in afterwards.
    pub accepted_at: Option<DateTime<Utc>>,
}

impl ProcedureAssignment {
    /// Creates a pending assignment.
    #[must_use]
    pub fn pending(
        user_id: UserId,
        procedure_id: ProcedureId,
        role: Role,
        assigned_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            procedure_id,
            role_name: role.as_str().to_owned(),
            status: AssignmentStatus::Pending,
            assigned_at,
            accepted_at: None,
        }
    }

    /// Marks the assignment accepted. Already accepted assignments keep
    /// their original acceptance time.
    #[must_use]
    pub fn accept(mut self, at: DateTime<Utc>) -> Self {
        if self.status == AssignmentStatus::Pending {
            self.status = AssignmentStatus::Accepted;
            self.accepted_at = Some(at);
        }
        self
    }

    /// Returns the parsed procedure role, if the stored name is known.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        Role::from_str(self.role_name.as_str()).ok()
    }

    /// Resolves the procedure-tier permission matrix.
    #[must_use]
    pub fn permissions(&self) -> PermissionMatrix {
        resolve_permissions(self.role_name.as_str())
    }
}
