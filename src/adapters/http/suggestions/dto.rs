//! Data transfer objects for suggestion endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CommentId, MemberId, SuggestionId, Timestamp};
use crate::domain::suggestion::{Comment, Suggestion, SuggestionStatus};

/// Create payload. New suggestions open in the `open` status, authored by
/// the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSuggestionRequest {
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
}

/// Update payload - title, body and board status.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSuggestionRequest {
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub status: SuggestionStatus,
}

/// Payload for commenting.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommentRequest {
    pub body: String,
}

/// Comment as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: CommentId,
    pub author_id: MemberId,
    pub body: String,
    pub created_at: Timestamp,
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: *comment.id(),
            author_id: *comment.author_id(),
            body: comment.body().to_string(),
            created_at: *comment.created_at(),
        }
    }
}

/// Suggestion as returned by the API, with vote count and comments.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionResponse {
    pub id: SuggestionId,
    pub title: String,
    pub body: Option<String>,
    pub status: SuggestionStatus,
    pub author_id: MemberId,
    pub vote_count: usize,
    /// True when the requesting member has voted.
    pub voted_by_me: bool,
    pub comments: Vec<CommentResponse>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SuggestionResponse {
    /// Builds the view for a particular caller.
    pub fn for_member(suggestion: &Suggestion, member_id: &MemberId) -> Self {
        Self {
            id: *suggestion.id(),
            title: suggestion.title().to_string(),
            body: suggestion.body().map(String::from),
            status: suggestion.status(),
            author_id: *suggestion.author_id(),
            vote_count: suggestion.vote_count(),
            voted_by_me: suggestion
                .votes()
                .iter()
                .any(|v| &v.member_id == member_id),
            comments: suggestion.comments().iter().map(CommentResponse::from).collect(),
            created_at: *suggestion.created_at(),
            updated_at: *suggestion.updated_at(),
        }
    }
}
