//! PostgreSQL implementation of SuggestionRepository.
//!
//! Votes and comments are owned rows: updates rewrite both sets inside the
//! suggestion's transaction so the aggregate and its rows stay in lockstep.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Transaction as SqlxTransaction};
use uuid::Uuid;

use crate::domain::foundation::{
    CommentId, DomainError, ErrorCode, MemberId, SuggestionId, Timestamp,
};
use crate::domain::suggestion::{Comment, Suggestion, SuggestionStatus, Vote};
use crate::ports::SuggestionRepository;

use super::col;

/// PostgreSQL implementation of SuggestionRepository.
#[derive(Clone)]
pub struct PostgresSuggestionRepository {
    pool: PgPool,
}

impl PostgresSuggestionRepository {
    /// Creates a new repository over the shared pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_votes(&self, suggestion_id: &Uuid) -> Result<Vec<Vote>, DomainError> {
        let rows = sqlx::query(
            "SELECT * FROM suggestion_votes WHERE suggestion_id = $1 ORDER BY voted_at ASC",
        )
        .bind(suggestion_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch votes", e))?;

        rows.into_iter().map(row_to_vote).collect()
    }

    async fn load_comments(&self, suggestion_id: &Uuid) -> Result<Vec<Comment>, DomainError> {
        let rows = sqlx::query(
            "SELECT * FROM suggestion_comments WHERE suggestion_id = $1 ORDER BY created_at ASC",
        )
        .bind(suggestion_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch comments", e))?;

        rows.into_iter().map(row_to_comment).collect()
    }

    async fn hydrate(&self, row: PgRow) -> Result<Suggestion, DomainError> {
        let id: Uuid = col(&row, "id")?;
        let votes = self.load_votes(&id).await?;
        let comments = self.load_comments(&id).await?;
        row_to_suggestion(row, votes, comments)
    }
}

#[async_trait]
impl SuggestionRepository for PostgresSuggestionRepository {
    async fn save(&self, suggestion: &Suggestion) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin suggestion transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO suggestions (id, title, body, status, author_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(suggestion.id().as_uuid())
        .bind(suggestion.title())
        .bind(suggestion.body())
        .bind(status_to_str(suggestion.status()))
        .bind(suggestion.author_id().as_uuid())
        .bind(suggestion.created_at().as_datetime())
        .bind(suggestion.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to insert suggestion", e))?;

        insert_children(&mut tx, suggestion).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit suggestion transaction", e))?;
        Ok(())
    }

    async fn update(&self, suggestion: &Suggestion) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin suggestion transaction", e))?;

        let result = sqlx::query(
            r#"
            UPDATE suggestions SET title = $2, body = $3, status = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(suggestion.id().as_uuid())
        .bind(suggestion.title())
        .bind(suggestion.body())
        .bind(status_to_str(suggestion.status()))
        .bind(suggestion.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to update suggestion", e))?;

        if result.rows_affected() == 0 {
            return Err(suggestion_not_found(suggestion.id()));
        }

        sqlx::query("DELETE FROM suggestion_votes WHERE suggestion_id = $1")
            .bind(suggestion.id().as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to clear votes", e))?;

        sqlx::query("DELETE FROM suggestion_comments WHERE suggestion_id = $1")
            .bind(suggestion.id().as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to clear comments", e))?;

        insert_children(&mut tx, suggestion).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit suggestion transaction", e))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &SuggestionId) -> Result<Option<Suggestion>, DomainError> {
        let row = sqlx::query("SELECT * FROM suggestions WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch suggestion", e))?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Suggestion>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT s.* FROM suggestions s
            LEFT JOIN suggestion_votes v ON v.suggestion_id = s.id
            GROUP BY s.id
            ORDER BY COUNT(v.member_id) DESC, s.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list suggestions", e))?;

        let mut suggestions = Vec::with_capacity(rows.len());
        for row in rows {
            suggestions.push(self.hydrate(row).await?);
        }
        Ok(suggestions)
    }

    async fn delete(&self, id: &SuggestionId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM suggestions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete suggestion", e))?;

        if result.rows_affected() == 0 {
            return Err(suggestion_not_found(id));
        }
        Ok(())
    }
}

async fn insert_children(
    tx: &mut SqlxTransaction<'_, Postgres>,
    suggestion: &Suggestion,
) -> Result<(), DomainError> {
    for vote in suggestion.votes() {
        sqlx::query(
            "INSERT INTO suggestion_votes (suggestion_id, member_id, voted_at) VALUES ($1, $2, $3)",
        )
        .bind(suggestion.id().as_uuid())
        .bind(vote.member_id.as_uuid())
        .bind(vote.voted_at.as_datetime())
        .execute(&mut **tx)
        .await
        .map_err(|e| DomainError::database("Failed to insert vote", e))?;
    }

    for comment in suggestion.comments() {
        sqlx::query(
            r#"
            INSERT INTO suggestion_comments (id, suggestion_id, author_id, body, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(comment.id().as_uuid())
        .bind(suggestion.id().as_uuid())
        .bind(comment.author_id().as_uuid())
        .bind(comment.body())
        .bind(comment.created_at().as_datetime())
        .execute(&mut **tx)
        .await
        .map_err(|e| DomainError::database("Failed to insert comment", e))?;
    }
    Ok(())
}

fn suggestion_not_found(id: &SuggestionId) -> DomainError {
    DomainError::new(
        ErrorCode::SuggestionNotFound,
        format!("Suggestion not found: {}", id),
    )
}

fn status_to_str(status: SuggestionStatus) -> &'static str {
    match status {
        SuggestionStatus::Open => "open",
        SuggestionStatus::Planned => "planned",
        SuggestionStatus::Done => "done",
        SuggestionStatus::Declined => "declined",
    }
}

fn str_to_status(s: &str) -> Result<SuggestionStatus, DomainError> {
    match s {
        "open" => Ok(SuggestionStatus::Open),
        "planned" => Ok(SuggestionStatus::Planned),
        "done" => Ok(SuggestionStatus::Done),
        "declined" => Ok(SuggestionStatus::Declined),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid suggestion status: {}", s),
        )),
    }
}

fn row_to_vote(row: PgRow) -> Result<Vote, DomainError> {
    Ok(Vote {
        member_id: MemberId::from_uuid(col(&row, "member_id")?),
        voted_at: Timestamp::from_datetime(col(&row, "voted_at")?),
    })
}

fn row_to_comment(row: PgRow) -> Result<Comment, DomainError> {
    Ok(Comment::reconstitute(
        CommentId::from_uuid(col(&row, "id")?),
        MemberId::from_uuid(col(&row, "author_id")?),
        col(&row, "body")?,
        Timestamp::from_datetime(col(&row, "created_at")?),
    ))
}

fn row_to_suggestion(
    row: PgRow,
    votes: Vec<Vote>,
    comments: Vec<Comment>,
) -> Result<Suggestion, DomainError> {
    let status: String = col(&row, "status")?;
    Ok(Suggestion::reconstitute(
        SuggestionId::from_uuid(col(&row, "id")?),
        col(&row, "title")?,
        col(&row, "body")?,
        str_to_status(&status)?,
        MemberId::from_uuid(col(&row, "author_id")?),
        votes,
        comments,
        Timestamp::from_datetime(col(&row, "created_at")?),
        Timestamp::from_datetime(col(&row, "updated_at")?),
    ))
}
