//! PostgreSQL implementation of MemberRepository.
//!
//! Email uniqueness rides on the `members_email_key` constraint; unique
//! violations are translated to `Conflict` here.

use std::collections::BTreeSet;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, Timestamp};
use crate::domain::member::{Member, MemberDetails, Role};
use crate::ports::MemberRepository;

use super::col;

/// PostgreSQL implementation of MemberRepository.
#[derive(Clone)]
pub struct PostgresMemberRepository {
    pool: PgPool,
}

impl PostgresMemberRepository {
    /// Creates a new repository over the shared pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn save(&self, member: &Member) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO members (
                id, name, email, password_hash, roles, active, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(member.id().as_uuid())
        .bind(member.name())
        .bind(member.email())
        .bind(member.password_hash())
        .bind(roles_to_vec(member.roles()))
        .bind(member.is_active())
        .bind(member.created_at().as_datetime())
        .bind(member.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_member_error("Failed to insert member", member.email(), e))?;

        Ok(())
    }

    async fn update(&self, member: &Member) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE members SET
                name = $2, email = $3, password_hash = $4, roles = $5, active = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(member.id().as_uuid())
        .bind(member.name())
        .bind(member.email())
        .bind(member.password_hash())
        .bind(roles_to_vec(member.roles()))
        .bind(member.is_active())
        .bind(member.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_member_error("Failed to update member", member.email(), e))?;

        if result.rows_affected() == 0 {
            return Err(member_not_found(member.id()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError> {
        let row = sqlx::query("SELECT * FROM members WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch member", e))?;

        row.map(row_to_member).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, DomainError> {
        let row = sqlx::query("SELECT * FROM members WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch member by email", e))?;

        row.map(row_to_member).transpose()
    }

    async fn list(&self) -> Result<Vec<Member>, DomainError> {
        let rows = sqlx::query("SELECT * FROM members ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to list members", e))?;

        rows.into_iter().map(row_to_member).collect()
    }

    async fn delete(&self, id: &MemberId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete member", e))?;

        if result.rows_affected() == 0 {
            return Err(member_not_found(id));
        }
        Ok(())
    }
}

fn map_member_error(context: &str, email: &str, err: sqlx::Error) -> DomainError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return DomainError::new(
                ErrorCode::Conflict,
                format!("Email already in use: {}", email),
            );
        }
    }
    DomainError::database(context, err)
}

fn member_not_found(id: &MemberId) -> DomainError {
    DomainError::new(ErrorCode::MemberNotFound, format!("Member not found: {}", id))
}

fn roles_to_vec(roles: &BTreeSet<Role>) -> Vec<String> {
    roles.iter().map(|r| role_to_str(*r).to_string()).collect()
}

fn role_to_str(role: Role) -> &'static str {
    match role {
        Role::Admin => "admin",
        Role::Finance => "finance",
        Role::Projects => "projects",
        Role::Sales => "sales",
    }
}

fn str_to_role(s: &str) -> Result<Role, DomainError> {
    match s {
        "admin" => Ok(Role::Admin),
        "finance" => Ok(Role::Finance),
        "projects" => Ok(Role::Projects),
        "sales" => Ok(Role::Sales),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid role: {}", s),
        )),
    }
}

fn row_to_member(row: PgRow) -> Result<Member, DomainError> {
    let roles: Vec<String> = col(&row, "roles")?;
    let roles = roles
        .iter()
        .map(|s| str_to_role(s))
        .collect::<Result<BTreeSet<_>, _>>()?;
    Ok(Member::reconstitute(
        MemberId::from_uuid(col(&row, "id")?),
        MemberDetails {
            name: col(&row, "name")?,
            email: col(&row, "email")?,
            roles,
            active: col(&row, "active")?,
        },
        col(&row, "password_hash")?,
        Timestamp::from_datetime(col(&row, "created_at")?),
        Timestamp::from_datetime(col(&row, "updated_at")?),
    ))
}
