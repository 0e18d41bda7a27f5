//! Authentication configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum JWT secret length accepted in production.
const MIN_PRODUCTION_SECRET_LENGTH: usize = 32;

/// Authentication configuration (first-party JWT)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret for access tokens
    #[serde(default)]
    pub jwt_secret: String,

    /// Access token lifetime in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
}

impl AuthConfig {
    /// Get token lifetime as Duration
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }

    /// Validate authentication configuration
    ///
    /// Production requires a secret of at least 32 bytes; development only
    /// requires one to be present.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.jwt_secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH_JWT_SECRET"));
        }
        if *environment == Environment::Production
            && self.jwt_secret.len() < MIN_PRODUCTION_SECRET_LENGTH
        {
            return Err(ValidationError::JwtSecretTooShort);
        }
        if self.token_ttl_secs == 0 {
            return Err(ValidationError::InvalidTokenTtl);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_secs: default_token_ttl(),
        }
    }
}

fn default_token_ttl() -> u64 {
    // 8 hours, roughly a workday.
    8 * 60 * 60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_secret_allowed_in_development() {
        let config = AuthConfig {
            jwt_secret: "dev".to_string(),
            token_ttl_secs: default_token_ttl(),
        };
        assert!(config.validate(&Environment::Development).is_ok());
    }

    #[test]
    fn short_secret_rejected_in_production() {
        let config = AuthConfig {
            jwt_secret: "dev".to_string(),
            token_ttl_secs: default_token_ttl(),
        };
        assert!(config.validate(&Environment::Production).is_err());
    }

    #[test]
    fn zero_ttl_is_invalid() {
        let config = AuthConfig {
            jwt_secret: "a-long-enough-development-secret".to_string(),
            token_ttl_secs: 0,
        };
        assert!(config.validate(&Environment::Development).is_err());
    }
}
