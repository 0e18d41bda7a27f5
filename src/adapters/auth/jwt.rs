//! Access token issuing and verification (HS256 JWT).

use std::collections::BTreeSet;
use std::time::Duration;

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, MemberId};
use crate::domain::member::{Member, Role};

/// The verified identity attached to a request after auth middleware runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedMember {
    pub id: MemberId,
    pub email: String,
    pub roles: BTreeSet<Role>,
}

impl AuthenticatedMember {
    /// True when the member holds the role, or is an admin.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&Role::Admin) || self.roles.contains(&role)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Member id.
    sub: String,
    email: String,
    roles: Vec<Role>,
    /// Expiry, seconds since epoch.
    exp: i64,
    /// Issued at, seconds since epoch.
    iat: i64,
}

/// Issues and verifies bearer tokens for logged-in members.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    /// Creates a token service from the configured HS256 secret.
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Issues a token for a member.
    pub fn issue(&self, member: &Member) -> Result<String, DomainError> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: member.id().to_string(),
            email: member.email().to_string(),
            roles: member.roles().iter().copied().collect(),
            exp: now + self.ttl.as_secs() as i64,
            iat: now,
        };
        encode(&Header::default(), &claims, &self.encoding).map_err(|e| {
            DomainError::new(ErrorCode::InternalError, format!("Failed to sign token: {}", e))
        })
    }

    /// Verifies a bearer token and extracts the member identity.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` for expired, malformed, or badly-signed tokens
    pub fn verify(&self, token: &str) -> Result<AuthenticatedMember, DomainError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|e| DomainError::new(ErrorCode::Unauthorized, format!("Invalid token: {}", e)))?;

        let id = data.claims.sub.parse::<MemberId>().map_err(|_| {
            DomainError::new(ErrorCode::Unauthorized, "Invalid token subject")
        })?;

        Ok(AuthenticatedMember {
            id,
            email: data.claims.email,
            roles: data.claims.roles.into_iter().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::member::MemberDetails;

    fn member(roles: &[Role]) -> Member {
        Member::new(
            MemberId::new(),
            MemberDetails {
                name: "Ana".to_string(),
                email: "ana@studio.com".to_string(),
                roles: roles.iter().copied().collect(),
                active: true,
            },
            "hash".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn issue_then_verify_roundtrips_identity() {
        let service = TokenService::new("test-secret", Duration::from_secs(60));
        let member = member(&[Role::Finance, Role::Projects]);

        let token = service.issue(&member).unwrap();
        let auth = service.verify(&token).unwrap();

        assert_eq!(&auth.id, member.id());
        assert_eq!(auth.email, "ana@studio.com");
        assert!(auth.has_role(Role::Finance));
        assert!(!auth.has_role(Role::Admin));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let issuer = TokenService::new("secret-a", Duration::from_secs(60));
        let verifier = TokenService::new("secret-b", Duration::from_secs(60));

        let token = issuer.issue(&member(&[Role::Sales])).unwrap();
        let err = verifier.verify(&token).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[test]
    fn garbage_token_is_rejected() {
        let service = TokenService::new("test-secret", Duration::from_secs(60));
        assert!(service.verify("not.a.jwt").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = TokenService::new("test-secret", Duration::from_secs(60));
        let member = member(&[Role::Sales]);

        // Expiry well past the default 60s validation leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: member.id().to_string(),
            email: member.email().to_string(),
            roles: vec![Role::Sales],
            exp: now - 300,
            iat: now - 600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let err = service.verify(&token).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[test]
    fn admin_claim_grants_all_roles() {
        let service = TokenService::new("test-secret", Duration::from_secs(60));
        let token = service.issue(&member(&[Role::Admin])).unwrap();
        let auth = service.verify(&token).unwrap();
        assert!(auth.has_role(Role::Finance));
        assert!(auth.has_role(Role::Sales));
    }
}
