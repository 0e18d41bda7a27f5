//! Suggestion aggregate - the internal suggestions board.
//!
//! Votes and comments are owned by the suggestion. A member gets one vote
//! per suggestion; voting again is a conflict rather than a silent no-op so
//! the client can tell a double-click from a state drift.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CommentId, DomainError, ErrorCode, MemberId, SuggestionId, Timestamp, ValidationError,
};

/// Board status of a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionStatus {
    Open,
    Planned,
    Done,
    Declined,
}

/// One member's vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub member_id: MemberId,
    pub voted_at: Timestamp,
}

/// A comment on a suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    author_id: MemberId,
    body: String,
    created_at: Timestamp,
}

impl Comment {
    /// Creates a comment.
    pub fn new(id: CommentId, author_id: MemberId, body: String) -> Result<Self, DomainError> {
        if body.trim().is_empty() {
            return Err(ValidationError::empty_field("body").into());
        }
        Ok(Self {
            id,
            author_id,
            body,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitutes a comment from persistence.
    pub fn reconstitute(
        id: CommentId,
        author_id: MemberId,
        body: String,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            author_id,
            body,
            created_at,
        }
    }

    pub fn id(&self) -> &CommentId {
        &self.id
    }

    pub fn author_id(&self) -> &MemberId {
        &self.author_id
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

/// Suggestion record.
///
/// # Invariants
///
/// - `title` is non-empty
/// - at most one vote per member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    id: SuggestionId,
    title: String,
    body: Option<String>,
    status: SuggestionStatus,
    author_id: MemberId,
    votes: Vec<Vote>,
    comments: Vec<Comment>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Suggestion {
    /// Creates a new open suggestion.
    pub fn new(
        id: SuggestionId,
        author_id: MemberId,
        title: String,
        body: Option<String>,
    ) -> Result<Self, DomainError> {
        validate_title(&title)?;
        let now = Timestamp::now();
        Ok(Self {
            id,
            title,
            body,
            status: SuggestionStatus::Open,
            author_id,
            votes: Vec::new(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitutes a suggestion from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SuggestionId,
        title: String,
        body: Option<String>,
        status: SuggestionStatus,
        author_id: MemberId,
        votes: Vec<Vote>,
        comments: Vec<Comment>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            title,
            body,
            status,
            author_id,
            votes,
            comments,
            created_at,
            updated_at,
        }
    }

    /// Replaces title, body and board status.
    pub fn update(
        &mut self,
        title: String,
        body: Option<String>,
        status: SuggestionStatus,
    ) -> Result<(), DomainError> {
        validate_title(&title)?;
        self.title = title;
        self.body = body;
        self.status = status;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Records a vote by `member_id`.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the member already voted
    pub fn add_vote(&mut self, member_id: MemberId) -> Result<(), DomainError> {
        if self.votes.iter().any(|v| v.member_id == member_id) {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "Member already voted for this suggestion",
            ));
        }
        self.votes.push(Vote {
            member_id,
            voted_at: Timestamp::now(),
        });
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Withdraws `member_id`'s vote, if any. Removing a missing vote is fine.
    pub fn remove_vote(&mut self, member_id: &MemberId) {
        let before = self.votes.len();
        self.votes.retain(|v| &v.member_id != member_id);
        if self.votes.len() != before {
            self.updated_at = Timestamp::now();
        }
    }

    /// Appends a comment.
    pub fn add_comment(
        &mut self,
        id: CommentId,
        author_id: MemberId,
        body: String,
    ) -> Result<&Comment, DomainError> {
        let comment = Comment::new(id, author_id, body)?;
        self.comments.push(comment);
        self.updated_at = Timestamp::now();
        Ok(self.comments.last().unwrap_or_else(|| unreachable!()))
    }

    /// Removes a comment.
    ///
    /// # Errors
    ///
    /// - `CommentNotFound` if no such comment exists on this suggestion
    pub fn remove_comment(&mut self, comment_id: &CommentId) -> Result<(), DomainError> {
        let before = self.comments.len();
        self.comments.retain(|c| c.id() != comment_id);
        if self.comments.len() == before {
            return Err(DomainError::new(
                ErrorCode::CommentNotFound,
                format!("Comment not found: {}", comment_id),
            ));
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Finds a comment by id.
    pub fn comment(&self, comment_id: &CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id() == comment_id)
    }

    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }

    pub fn id(&self) -> &SuggestionId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn status(&self) -> SuggestionStatus {
        self.status
    }

    pub fn author_id(&self) -> &MemberId {
        &self.author_id
    }

    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }
}

fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(ValidationError::empty_field("title").into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion() -> Suggestion {
        Suggestion::new(
            SuggestionId::new(),
            MemberId::new(),
            "Standing desks".to_string(),
            None,
        )
        .unwrap()
    }

    #[test]
    fn new_suggestion_is_open_with_no_votes() {
        let s = suggestion();
        assert_eq!(s.status(), SuggestionStatus::Open);
        assert_eq!(s.vote_count(), 0);
    }

    #[test]
    fn double_vote_is_a_conflict() {
        let mut s = suggestion();
        let voter = MemberId::new();
        s.add_vote(voter).unwrap();

        let err = s.add_vote(voter).unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(s.vote_count(), 1);
    }

    #[test]
    fn removing_a_vote_allows_revoting() {
        let mut s = suggestion();
        let voter = MemberId::new();
        s.add_vote(voter).unwrap();
        s.remove_vote(&voter);
        assert_eq!(s.vote_count(), 0);
        assert!(s.add_vote(voter).is_ok());
    }

    #[test]
    fn comments_append_and_remove() {
        let mut s = suggestion();
        let author = MemberId::new();
        let comment_id = *s
            .add_comment(CommentId::new(), author, "Love it".to_string())
            .unwrap()
            .id();

        assert_eq!(s.comments().len(), 1);
        s.remove_comment(&comment_id).unwrap();
        assert!(s.comments().is_empty());
    }

    #[test]
    fn blank_comment_is_rejected() {
        let mut s = suggestion();
        let err = s
            .add_comment(CommentId::new(), MemberId::new(), "   ".to_string())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyField);
    }

    #[test]
    fn removing_missing_comment_fails() {
        let mut s = suggestion();
        let err = s.remove_comment(&CommentId::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::CommentNotFound);
    }
}
