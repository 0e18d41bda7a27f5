//! Authentication adapters: password hashing and access tokens.

mod jwt;
mod password;

pub use jwt::{AuthenticatedMember, TokenService};
pub use password::PasswordHasher;
