use std::sync::Arc;

use examboard_core::{AppError, OrganizationId, Principal, UserId};
use examboard_domain::Role;

use crate::AccessGuard;
use crate::test_support::FakeAccessStore;

use super::MembershipService;

const ORGANIZATION: i64 = 10;

fn service(store: &Arc<FakeAccessStore>) -> MembershipService {
    MembershipService::new(AccessGuard::new(store.clone(), store.clone()), store.clone())
}

fn staff(user: i64) -> Principal {
    Principal::staff(UserId::new(user), format!("user-{user}"), None)
}

fn organization() -> OrganizationId {
    OrganizationId::new(ORGANIZATION)
}

#[tokio::test]
async fn admin_lists_members_in_user_order() {
    let store = Arc::new(
        FakeAccessStore::default()
            .with_member(3, ORGANIZATION, "member")
            .await
            .with_member(1, ORGANIZATION, "admin")
            .await
            .with_member(2, ORGANIZATION + 1, "member")
            .await,
    );

    let members = service(&store)
        .list_members(&staff(1), organization())
        .await
        .unwrap_or_default();

    let user_ids: Vec<_> = members.iter().map(|member| member.user_id.get()).collect();
    assert_eq!(user_ids, vec![1, 3]);
}

#[tokio::test]
async fn non_admin_cannot_list_members() {
    let store = Arc::new(
        FakeAccessStore::default()
            .with_member(1, ORGANIZATION, "commission_chair")
            .await,
    );

    let result = service(&store).list_members(&staff(1), organization()).await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn invite_member_creates_membership() {
    let store = Arc::new(
        FakeAccessStore::default()
            .with_member(1, ORGANIZATION, "admin")
            .await,
    );

    let result = service(&store)
        .invite_member(&staff(1), organization(), UserId::new(2), Role::SubjectExpert)
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
async fn invite_existing_member_conflicts() {
    let store = Arc::new(
        FakeAccessStore::default()
            .with_member(1, ORGANIZATION, "admin")
            .await
            .with_member(2, ORGANIZATION, "member")
            .await,
    );

    let result = service(&store)
        .invite_member(&staff(1), organization(), UserId::new(2), Role::CommissionChair)
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn change_role_of_missing_member_is_not_found() {
    let store = Arc::new(
        FakeAccessStore::default()
            .with_member(1, ORGANIZATION, "admin")
            .await,
    );

    let result = service(&store)
        .change_member_role(&staff(1), organization(), UserId::new(9), Role::Member)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn change_role_updates_stored_role() {
    let store = Arc::new(
        FakeAccessStore::default()
            .with_member(1, ORGANIZATION, "admin")
            .await
            .with_member(2, ORGANIZATION, "member")
            .await,
    );

    let result = service(&store)
        .change_member_role(&staff(1), organization(), UserId::new(2), Role::Admin)
        .await;

    assert!(result.is_ok());
    assert_eq!(
        store.membership(2, ORGANIZATION).await.map(|membership| membership.is_admin()),
        Some(true)
    );
}

#[tokio::test]
async fn last_admin_cannot_demote_themselves() {
    let store = Arc::new(
        FakeAccessStore::default()
            .with_member(1, ORGANIZATION, "admin")
            .await,
    );

    let result = service(&store)
        .change_member_role(&staff(1), organization(), UserId::new(1), Role::Member)
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
    assert_eq!(
        store.membership(1, ORGANIZATION).await.map(|membership| membership.is_admin()),
        Some(true)
    );
}

#[tokio::test]
async fn admin_can_be_removed_while_another_admin_remains() {
    let store = Arc::new(
        FakeAccessStore::default()
            .with_member(1, ORGANIZATION, "admin")
            .await
            .with_member(2, ORGANIZATION, "admin")
            .await,
    );
    let service = service(&store);

    let first = service
        .remove_member(&staff(1), organization(), UserId::new(2))
        .await;
    let second = service
        .remove_member(&staff(1), organization(), UserId::new(1))
        .await;

    assert!(first.is_ok());
    assert!(matches!(second, Err(AppError::Forbidden(_))));
    assert!(store.membership(2, ORGANIZATION).await.is_none());
}

#[tokio::test]
async fn remove_missing_member_is_not_found() {
    let store = Arc::new(
        FakeAccessStore::default()
            .with_member(1, ORGANIZATION, "admin")
            .await,
    );

    let result = service(&store)
        .remove_member(&staff(1), organization(), UserId::new(5))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}
