//! Shared value objects and error types for the domain layer.

mod errors;
mod ids;
mod money;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    ClientId, CommentId, ContractId, LeadId, MeetingId, MemberId, PaymentId, ProjectId,
    SuggestionId, TaskId, TransactionId,
};
pub use money::Money;
pub use timestamp::Timestamp;
