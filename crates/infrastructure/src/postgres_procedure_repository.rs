use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use examboard_application::ProcedureAssignmentRepository;
use examboard_core::{AppError, AppResult, OrganizationId, ProcedureId, UserId};
use examboard_domain::{AssignmentStatus, ProcedureAssignment};
use sqlx::{FromRow, PgPool};
use tracing::warn;

/// PostgreSQL-backed repository for procedures and their staff assignments.
#[derive(Clone)]
pub struct PostgresProcedureRepository {
    pool: PgPool,
}

impl PostgresProcedureRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AssignmentRow {
    user_id: i64,
    procedure_id: i64,
    role_name: String,
    status: String,
    assigned_at: DateTime<Utc>,
    accepted_at: Option<DateTime<Utc>>,
}

impl TryFrom<AssignmentRow> for ProcedureAssignment {
    type Error = AppError;

    fn try_from(row: AssignmentRow) -> Result<Self, Self::Error> {
        let status = AssignmentStatus::from_str(row.status.as_str()).map_err(|error| {
            warn!(
                user_id = row.user_id,
                procedure_id = row.procedure_id,
                status = %row.status,
                "stored procedure assignment has an unknown status"
            );
            AppError::Internal(format!(
                "failed to decode procedure assignment status: {error}"
            ))
        })?;

        Ok(Self {
            user_id: UserId::new(row.user_id),
            procedure_id: ProcedureId::new(row.procedure_id),
            role_name: row.role_name,
            status,
            assigned_at: row.assigned_at,
            accepted_at: row.accepted_at,
        })
    }
}

fn decode_assignments(rows: Vec<AssignmentRow>) -> AppResult<Vec<ProcedureAssignment>> {
    rows.into_iter().map(ProcedureAssignment::try_from).collect()
}

#[async_trait]
impl ProcedureAssignmentRepository for PostgresProcedureRepository {
    async fn find_procedure_owning_organization(
        &self,
        procedure_id: ProcedureId,
    ) -> AppResult<Option<OrganizationId>> {
        let organization_id = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT organization_id
            FROM procedures
            WHERE id = $1
            "#,
        )
        .bind(procedure_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to resolve procedure organization: {error}"))
        })?;

        Ok(organization_id.map(OrganizationId::new))
    }

    async fn find_procedure_assignment(
        &self,
        user_id: UserId,
        procedure_id: ProcedureId,
    ) -> AppResult<Option<ProcedureAssignment>> {
        let row = sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT user_id, procedure_id, role_name, status, assigned_at, accepted_at
            FROM procedure_assignments
            WHERE user_id = $1 AND procedure_id = $2
            "#,
        )
        .bind(user_id.get())
        .bind(procedure_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to find procedure assignment: {error}"))
        })?;

        row.map(ProcedureAssignment::try_from).transpose()
    }

    async fn list_procedure_assignments(
        &self,
        procedure_id: ProcedureId,
    ) -> AppResult<Vec<ProcedureAssignment>> {
        let rows = sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT user_id, procedure_id, role_name, status, assigned_at, accepted_at
            FROM procedure_assignments
            WHERE procedure_id = $1
            ORDER BY assigned_at, user_id
            "#,
        )
        .bind(procedure_id.get())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list procedure assignments: {error}"))
        })?;

        decode_assignments(rows)
    }

    async fn list_assignments_for_user(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<ProcedureAssignment>> {
        let rows = sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT user_id, procedure_id, role_name, status, assigned_at, accepted_at
            FROM procedure_assignments
            WHERE user_id = $1
            ORDER BY assigned_at DESC, procedure_id DESC
            "#,
        )
        .bind(user_id.get())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list user assignments: {error}"))
        })?;

        decode_assignments(rows)
    }

    async fn create_procedure_assignment(&self, assignment: ProcedureAssignment) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO procedure_assignments (
                user_id, procedure_id, role_name, status, assigned_at, accepted_at
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(assignment.user_id.get())
        .bind(assignment.procedure_id.get())
        .bind(assignment.role_name.as_str())
        .bind(assignment.status.as_str())
        .bind(assignment.assigned_at)
        .bind(assignment.accepted_at)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            if let sqlx::Error::Database(ref database_error) = error
                && database_error.code().as_deref() == Some("23505")
            {
                return AppError::Conflict(format!(
                    "user '{}' is already assigned to procedure '{}'",
                    assignment.user_id, assignment.procedure_id
                ));
            }

            AppError::Internal(format!("failed to create procedure assignment: {error}"))
        })?;

        Ok(())
    }

    async fn update_procedure_assignment(&self, assignment: ProcedureAssignment) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE procedure_assignments
            SET role_name = $3, status = $4, accepted_at = $5
            WHERE user_id = $1 AND procedure_id = $2
            "#,
        )
        .bind(assignment.user_id.get())
        .bind(assignment.procedure_id.get())
        .bind(assignment.role_name.as_str())
        .bind(assignment.status.as_str())
        .bind(assignment.accepted_at)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to update procedure assignment: {error}"))
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "user '{}' is not assigned to procedure '{}'",
                assignment.user_id, assignment.procedure_id
            )));
        }

        Ok(())
    }

    async fn delete_procedure_assignment(
        &self,
        user_id: UserId,
        procedure_id: ProcedureId,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM procedure_assignments
            WHERE user_id = $1 AND procedure_id = $2
            "#,
        )
        .bind(user_id.get())
        .bind(procedure_id.get())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to delete procedure assignment: {error}"))
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "user '{user_id}' is not assigned to procedure '{procedure_id}'"
            )));
        }

        Ok(())
    }
}
