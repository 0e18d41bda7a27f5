//! Strongly-typed identifier value objects.
//!
//! Every persisted record gets its own UUID newtype so a `TaskId` can never
//! be passed where a `ProjectId` is expected. The shapes are identical, so
//! they are stamped out by a local macro.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a client record.
    ClientId
);
uuid_id!(
    /// Unique identifier for a lead.
    LeadId
);
uuid_id!(
    /// Unique identifier for a project (client-facing or internal).
    ProjectId
);
uuid_id!(
    /// Unique identifier for a task on a project board.
    TaskId
);
uuid_id!(
    /// Unique identifier for a contract.
    ContractId
);
uuid_id!(
    /// Unique identifier for a payment installment.
    PaymentId
);
uuid_id!(
    /// Unique identifier for a ledger transaction.
    TransactionId
);
uuid_id!(
    /// Unique identifier for a staff member.
    MemberId
);
uuid_id!(
    /// Unique identifier for a meeting.
    MeetingId
);
uuid_id!(
    /// Unique identifier for a suggestion.
    SuggestionId
);
uuid_id!(
    /// Unique identifier for a suggestion comment.
    CommentId
);
