use std::sync::Arc;

use examboard_core::{AppError, Principal, ProcedureId, UserId};
use examboard_domain::{AssignmentStatus, Role};

use crate::AccessGuard;
use crate::test_support::FakeAccessStore;

use super::StaffAssignmentService;

const ORGANIZATION: i64 = 10;
const PROCEDURE: i64 = 100;

fn service(store: &Arc<FakeAccessStore>) -> StaffAssignmentService {
    StaffAssignmentService::new(
        AccessGuard::new(store.clone(), store.clone()),
        store.clone(),
        store.clone(),
    )
}

fn staff(user: i64) -> Principal {
    Principal::staff(UserId::new(user), format!("user-{user}"), None)
}

fn procedure() -> ProcedureId {
    ProcedureId::new(PROCEDURE)
}

async fn organization_with_admin() -> FakeAccessStore {
    FakeAccessStore::default()
        .with_member(1, ORGANIZATION, "admin")
        .await
        .with_procedure(PROCEDURE, ORGANIZATION)
        .await
}

#[tokio::test]
async fn assigning_outsider_adds_member_membership_and_pending_assignment() {
    let store = Arc::new(organization_with_admin().await);

    let result = service(&store)
        .assign_staff(&staff(1), procedure(), UserId::new(2), Role::CommissionChair)
        .await;

    assert!(result.is_ok());
    assert_eq!(
        store
            .membership(2, ORGANIZATION)
            .await
            .map(|membership| membership.role_name),
        Some("member".to_owned())
    );
    let assignment = store.assignment(2, PROCEDURE).await;
    assert_eq!(
        assignment.as_ref().map(|assignment| assignment.status),
        Some(AssignmentStatus::Pending)
    );
    assert_eq!(
        assignment.map(|assignment| assignment.role_name),
        Some("commission_chair".to_owned())
    );
}

#[tokio::test]
async fn assigning_existing_member_keeps_organization_role() {
    let store = Arc::new(
        organization_with_admin()
            .await
            .with_member(2, ORGANIZATION, "subject_expert")
            .await,
    );

    let result = service(&store)
        .assign_staff(&staff(1), procedure(), UserId::new(2), Role::CommissionMember)
        .await;

    assert!(result.is_ok());
    assert_eq!(
        store
            .membership(2, ORGANIZATION)
            .await
            .map(|membership| membership.role_name),
        Some("subject_expert".to_owned())
    );
}

#[tokio::test]
async fn non_staff_roles_are_rejected() {
    let store = Arc::new(organization_with_admin().await);
    let service = service(&store);

    for role in [Role::Admin, Role::Candidate, Role::Member] {
        let result = service
            .assign_staff(&staff(1), procedure(), UserId::new(2), role)
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))), "{role}");
    }
}

#[tokio::test]
async fn duplicate_assignment_conflicts() {
    let store = Arc::new(
        organization_with_admin()
            .await
            .with_member(2, ORGANIZATION, "member")
            .await
            .with_assignment(2, PROCEDURE, "commission_member")
            .await,
    );

    let result = service(&store)
        .assign_staff(&staff(1), procedure(), UserId::new(2), Role::CommissionChair)
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn procedure_chair_cannot_assign_staff() {
    let store = Arc::new(
        organization_with_admin()
            .await
            .with_member(3, ORGANIZATION, "member")
            .await
            .with_assignment(3, PROCEDURE, "commission_chair")
            .await,
    );

    let result = service(&store)
        .assign_staff(&staff(3), procedure(), UserId::new(4), Role::CommissionMember)
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
    assert!(store.assignment(4, PROCEDURE).await.is_none());
}

#[tokio::test]
async fn assigning_to_unknown_procedure_is_not_found() {
    let store = Arc::new(organization_with_admin().await);

    let result = service(&store)
        .assign_staff(
            &staff(1),
            ProcedureId::new(PROCEDURE + 1),
            UserId::new(2),
            Role::SubjectExpert,
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn assigned_member_lists_procedure_assignments() {
    let store = Arc::new(
        organization_with_admin()
            .await
            .with_member(3, ORGANIZATION, "member")
            .await
            .with_assignment(3, PROCEDURE, "commission_member")
            .await,
    );
    let service = service(&store);

    let assigned = service.list_procedure_assignments(&staff(3), procedure()).await;
    let outsider = service.list_procedure_assignments(&staff(4), procedure()).await;

    assert_eq!(assigned.map(|assignments| assignments.len()).ok(), Some(1));
    assert!(matches!(outsider, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn remove_assignment_keeps_membership() {
    let store = Arc::new(
        organization_with_admin()
            .await
            .with_member(2, ORGANIZATION, "member")
            .await
            .with_assignment(2, PROCEDURE, "subject_expert")
            .await,
    );
    let service = service(&store);

    let removed = service
        .remove_assignment(&staff(1), procedure(), UserId::new(2))
        .await;
    let missing = service
        .remove_assignment(&staff(1), procedure(), UserId::new(2))
        .await;

    assert!(removed.is_ok());
    assert!(matches!(missing, Err(AppError::NotFound(_))));
    assert!(store.assignment(2, PROCEDURE).await.is_none());
    assert!(store.membership(2, ORGANIZATION).await.is_some());
}

#[tokio::test]
async fn accepting_pending_assignments_is_idempotent() {
    let store = Arc::new(
        organization_with_admin()
            .await
            .with_procedure(PROCEDURE + 1, ORGANIZATION)
            .await
            .with_assignment(2, PROCEDURE, "commission_member")
            .await
            .with_assignment(2, PROCEDURE + 1, "commission_chair")
            .await,
    );
    let service = service(&store);
    let principal = staff(2);

    let first = service
        .accept_pending_assignments(&principal)
        .await
        .unwrap_or_default();
    let second = service
        .accept_pending_assignments(&principal)
        .await
        .unwrap_or_default();
    let mine = service
        .list_my_assignments(&principal)
        .await
        .unwrap_or_default();

    assert_eq!(first.len(), 2);
    assert!(second.is_empty());
    assert!(
        mine.iter()
            .all(|assignment| assignment.status == AssignmentStatus::Accepted
                && assignment.accepted_at.is_some())
    );
}
