use async_trait::async_trait;
use examboard_application::OrganizationMembershipRepository;
use examboard_core::{AppError, AppResult, OrganizationId, UserId};
use examboard_domain::OrganizationMembership;
use sqlx::{FromRow, PgPool};

/// PostgreSQL-backed organization membership repository.
#[derive(Clone)]
pub struct PostgresMembershipRepository {
    pool: PgPool,
}

impl PostgresMembershipRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MembershipRow {
    user_id: i64,
    organization_id: i64,
    role_name: String,
}

impl From<MembershipRow> for OrganizationMembership {
    fn from(row: MembershipRow) -> Self {
        Self {
            user_id: UserId::new(row.user_id),
            organization_id: OrganizationId::new(row.organization_id),
            role_name: row.role_name,
        }
    }
}

#[async_trait]
impl OrganizationMembershipRepository for PostgresMembershipRepository {
    async fn find_organization_membership(
        &self,
        user_id: UserId,
        organization_id: OrganizationId,
    ) -> AppResult<Option<OrganizationMembership>> {
        let row = sqlx::query_as::<_, MembershipRow>(
            r#"
            SELECT user_id, organization_id, role_name
            FROM organization_memberships
            WHERE user_id = $1 AND organization_id = $2
            "#,
        )
        .bind(user_id.get())
        .bind(organization_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to find organization membership: {error}"))
        })?;

        Ok(row.map(OrganizationMembership::from))
    }

    async fn list_organization_memberships(
        &self,
        organization_id: OrganizationId,
    ) -> AppResult<Vec<OrganizationMembership>> {
        let rows = sqlx::query_as::<_, MembershipRow>(
            r#"
            SELECT user_id, organization_id, role_name
            FROM organization_memberships
            WHERE organization_id = $1
            ORDER BY user_id
            "#,
        )
        .bind(organization_id.get())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list organization memberships: {error}"))
        })?;

        Ok(rows.into_iter().map(OrganizationMembership::from).collect())
    }

    async fn create_organization_membership(
        &self,
        membership: OrganizationMembership,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO organization_memberships (user_id, organization_id, role_name)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(membership.user_id.get())
        .bind(membership.organization_id.get())
        .bind(membership.role_name.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| membership_conflict_or_internal(error, "create organization membership"))?;

        Ok(())
    }

    async fn update_organization_membership_role(
        &self,
        user_id: UserId,
        organization_id: OrganizationId,
        role_name: &str,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE organization_memberships
            SET role_name = $3
            WHERE user_id = $1 AND organization_id = $2
            "#,
        )
        .bind(user_id.get())
        .bind(organization_id.get())
        .bind(role_name)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to update organization membership: {error}"))
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "user '{user_id}' is not a member of organization '{organization_id}'"
            )));
        }

        Ok(())
    }

    async fn delete_organization_membership(
        &self,
        user_id: UserId,
        organization_id: OrganizationId,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM organization_memberships
            WHERE user_id = $1 AND organization_id = $2
            "#,
        )
        .bind(user_id.get())
        .bind(organization_id.get())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to delete organization membership: {error}"))
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "user '{user_id}' is not a member of organization '{organization_id}'"
            )));
        }

        Ok(())
    }
}

fn membership_conflict_or_internal(error: sqlx::Error, operation: &str) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict("organization membership already exists".to_owned());
    }

    AppError::Internal(format!("failed to {operation}: {error}"))
}
