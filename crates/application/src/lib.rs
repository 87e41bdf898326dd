//! Application services and ports.

#![forbid(unsafe_code)]

mod access_guard;
mod access_ports;
mod candidate_scope;
mod membership_service;
mod staff_assignment_service;

#[cfg(test)]
mod test_support;

pub use access_guard::{AccessGuard, ProcedureAccess, ProcedurePermissions};
pub use access_ports::{OrganizationMembershipRepository, ProcedureAssignmentRepository};
pub use candidate_scope::require_candidate_procedure;
pub use membership_service::MembershipService;
pub use staff_assignment_service::StaffAssignmentService;
