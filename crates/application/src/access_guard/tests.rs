use std::sync::Arc;

use examboard_core::{AppError, OrganizationId, Principal, ProcedureId, UserId};
use examboard_domain::{
    Capability, EvaluationAction, ProcedureAction, SurveyAction, UserAction,
};

use crate::test_support::FakeAccessStore;

use super::AccessGuard;

const ORGANIZATION: i64 = 10;
const PROCEDURE: i64 = 100;

fn guard(store: FakeAccessStore) -> AccessGuard {
    let store = Arc::new(store);
    AccessGuard::new(store.clone(), store)
}

fn staff(user: i64) -> Principal {
    Principal::staff(UserId::new(user), format!("user-{user}"), None)
}

fn organization() -> OrganizationId {
    OrganizationId::new(ORGANIZATION)
}

fn procedure() -> ProcedureId {
    ProcedureId::new(PROCEDURE)
}

#[tokio::test]
async fn organization_access_returns_membership_for_granted_capability() {
    let guard = guard(
        FakeAccessStore::default()
            .with_member(1, ORGANIZATION, "admin")
            .await,
    );

    let membership = guard
        .require_organization_access(
            &staff(1),
            organization(),
            Capability::Users(UserAction::Invite),
        )
        .await;

    assert_eq!(
        membership.map(|membership| membership.role_name).ok(),
        Some("admin".to_owned())
    );
}

#[tokio::test]
async fn organization_access_without_membership_is_forbidden() {
    let guard = guard(
        FakeAccessStore::default()
            .with_member(1, ORGANIZATION + 1, "admin")
            .await,
    );

    let result = guard
        .require_organization_access(
            &staff(1),
            organization(),
            Capability::Surveys(SurveyAction::Read),
        )
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn organization_access_denies_missing_grant() {
    let guard = guard(
        FakeAccessStore::default()
            .with_member(1, ORGANIZATION, "subject_expert")
            .await,
    );

    let result = guard
        .require_organization_access(
            &staff(1),
            organization(),
            Capability::Evaluation(EvaluationAction::Finalize),
        )
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(message)) if message.contains("evaluation.finalize")));
}

#[tokio::test]
async fn legacy_owner_role_fails_closed() {
    let guard = guard(
        FakeAccessStore::default()
            .with_member(1, ORGANIZATION, "owner")
            .await,
    );

    let result = guard
        .require_organization_access(
            &staff(1),
            organization(),
            Capability::Surveys(SurveyAction::Read),
        )
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn organization_access_is_idempotent() {
    let guard = guard(
        FakeAccessStore::default()
            .with_member(1, ORGANIZATION, "commission_chair")
            .await,
    );
    let principal = staff(1);
    let capability = Capability::Procedures(ProcedureAction::ViewResults);

    let first = guard
        .require_organization_access(&principal, organization(), capability)
        .await;
    let second = guard
        .require_organization_access(&principal, organization(), capability)
        .await;

    assert_eq!(first.ok(), second.ok());
}

#[tokio::test]
async fn procedure_role_overrides_organization_role() {
    let guard = guard(
        FakeAccessStore::default()
            .with_member(1, ORGANIZATION, "subject_expert")
            .await
            .with_procedure(PROCEDURE, ORGANIZATION)
            .await
            .with_assignment(1, PROCEDURE, "commission_chair")
            .await,
    );
    let principal = staff(1);
    let capability = Capability::Evaluation(EvaluationAction::Finalize);

    let procedure_access = guard
        .require_procedure_access(&principal, procedure(), capability)
        .await;
    let organization_access = guard
        .require_organization_access(&principal, organization(), capability)
        .await;

    assert!(procedure_access.is_ok());
    assert!(matches!(organization_access, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn assigned_chair_gets_points_while_candidate_org_role_is_denied() {
    let guard = guard(
        FakeAccessStore::default()
            .with_member(1, ORGANIZATION, "candidate")
            .await
            .with_procedure(PROCEDURE, ORGANIZATION)
            .await
            .with_assignment(1, PROCEDURE, "commission_chair")
            .await,
    );
    let principal = staff(1);
    let capability = Capability::Evaluation(EvaluationAction::AssignPoints);

    let access = guard
        .require_procedure_access(&principal, procedure(), capability)
        .await;
    let organization_access = guard
        .require_organization_access(&principal, organization(), capability)
        .await;

    let access = access.ok();
    assert_eq!(
        access.as_ref().map(|access| access.procedure_role.as_str()),
        Some("commission_chair")
    );
    assert_eq!(access.map(|access| access.is_admin), Some(false));
    assert!(matches!(organization_access, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn organization_admin_bypasses_missing_assignment_for_every_capability() {
    let guard = guard(
        FakeAccessStore::default()
            .with_member(1, ORGANIZATION, "admin")
            .await
            .with_procedure(PROCEDURE, ORGANIZATION)
            .await,
    );
    let principal = staff(1);

    for capability in Capability::all() {
        let access = guard
            .require_procedure_access(&principal, procedure(), capability)
            .await;
        let access = access.ok();

        assert_eq!(access.as_ref().map(|access| access.is_admin), Some(true));
        assert_eq!(
            access.and_then(|access| access.assignment),
            None,
            "{capability} should be granted without an assignment"
        );
    }
}

#[tokio::test]
async fn member_without_assignment_is_forbidden_for_every_capability() {
    let guard = guard(
        FakeAccessStore::default()
            .with_member(1, ORGANIZATION, "member")
            .await
            .with_procedure(PROCEDURE, ORGANIZATION)
            .await,
    );
    let principal = staff(1);

    for capability in Capability::all() {
        let result = guard
            .require_procedure_access(&principal, procedure(), capability)
            .await;

        assert!(
            matches!(result, Err(AppError::Forbidden(_))),
            "{capability} should be denied"
        );
    }
}

#[tokio::test]
async fn assignment_in_other_organization_does_not_grant_access() {
    let guard = guard(
        FakeAccessStore::default()
            .with_procedure(PROCEDURE, ORGANIZATION)
            .await
            .with_assignment(1, PROCEDURE, "commission_chair")
            .await,
    );

    let result = guard
        .require_procedure_access(
            &staff(1),
            procedure(),
            Capability::Procedures(ProcedureAction::Read),
        )
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn assigned_role_without_grant_is_forbidden() {
    let guard = guard(
        FakeAccessStore::default()
            .with_member(1, ORGANIZATION, "member")
            .await
            .with_procedure(PROCEDURE, ORGANIZATION)
            .await
            .with_assignment(1, PROCEDURE, "commission_member")
            .await,
    );

    let result = guard
        .require_procedure_access(
            &staff(1),
            procedure(),
            Capability::Evaluation(EvaluationAction::Finalize),
        )
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn unknown_procedure_is_not_found() {
    let guard = guard(
        FakeAccessStore::default()
            .with_member(1, ORGANIZATION, "admin")
            .await,
    );

    let result = guard
        .require_procedure_access(
            &staff(1),
            procedure(),
            Capability::Procedures(ProcedureAction::Read),
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn has_organization_permission_reports_missing_grant_as_false() {
    let guard = guard(
        FakeAccessStore::default()
            .with_member(1, ORGANIZATION, "commission_member")
            .await,
    );
    let principal = staff(1);

    let assign_points = guard
        .has_organization_permission(
            &principal,
            organization(),
            Capability::Evaluation(EvaluationAction::AssignPoints),
        )
        .await;
    let finalize = guard
        .has_organization_permission(
            &principal,
            organization(),
            Capability::Evaluation(EvaluationAction::Finalize),
        )
        .await;
    let outsider = guard
        .has_organization_permission(
            &staff(2),
            organization(),
            Capability::Evaluation(EvaluationAction::AssignPoints),
        )
        .await;

    assert_eq!(assign_points.ok(), Some(true));
    assert_eq!(finalize.ok(), Some(false));
    assert!(matches!(outsider, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn organization_permissions_return_role_matrix() {
    let guard = guard(
        FakeAccessStore::default()
            .with_member(1, ORGANIZATION, "member")
            .await,
    );

    let permissions = guard
        .organization_permissions(&staff(1), organization())
        .await;

    assert_eq!(
        permissions.ok().map(|(_, matrix)| matrix.is_empty()),
        Some(true)
    );
}

#[tokio::test]
async fn procedure_permissions_use_assignment_role() {
    let guard = guard(
        FakeAccessStore::default()
            .with_member(1, ORGANIZATION, "member")
            .await
            .with_member(2, ORGANIZATION, "admin")
            .await
            .with_procedure(PROCEDURE, ORGANIZATION)
            .await
            .with_assignment(1, PROCEDURE, "commission_member")
            .await,
    );

    let member = guard
        .procedure_permissions(&staff(1), procedure())
        .await
        .ok();
    let admin = guard
        .procedure_permissions(&staff(2), procedure())
        .await
        .ok();

    let member_matrix = member.as_ref().map(|permissions| permissions.permissions);
    assert_eq!(
        member.map(|permissions| permissions.procedure_role),
        Some("commission_member".to_owned())
    );
    assert_eq!(
        member_matrix.map(|matrix| {
            matrix.allows(Capability::Evaluation(EvaluationAction::AssignPoints))
        }),
        Some(true)
    );
    assert_eq!(
        member_matrix
            .map(|matrix| matrix.allows(Capability::Evaluation(EvaluationAction::Finalize))),
        Some(false)
    );
    assert_eq!(admin.map(|permissions| permissions.is_admin), Some(true));
}
