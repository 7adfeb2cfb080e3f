//! Identity-provider access-token verification.
//!
//! The identity provider issues HS256-signed bearer tokens carrying an
//! opaque subject. This service only verifies them; issuance, refresh, and
//! session management are the provider's concern.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Claims this service reads from a provider token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the provider's opaque user identifier.
    pub sub: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// Configuration for verifying provider tokens.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 secret shared with the identity provider.
    pub token_secret: String,
}

impl AuthConfig {
    /// Load auth configuration from environment variables.
    ///
    /// # Panics
    ///
    /// Panics if `AUTH_TOKEN_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let token_secret = std::env::var("AUTH_TOKEN_SECRET")
            .expect("AUTH_TOKEN_SECRET must be set in the environment");
        assert!(
            !token_secret.is_empty(),
            "AUTH_TOKEN_SECRET must not be empty"
        );
        Self { token_secret }
    }
}

/// Validate and decode a provider token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration automatically.
pub fn verify_token(
    token: &str,
    config: &AuthConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.token_secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn test_config() -> AuthConfig {
        AuthConfig {
            token_secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        }
    }

    fn mint(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("encoding should succeed")
    }

    #[test]
    fn test_valid_token_yields_subject() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();
        let token = mint(
            &Claims {
                sub: "user_2NqyX".to_string(),
                exp: now + 3600,
                iat: now,
            },
            &config.token_secret,
        );

        let claims = verify_token(&token, &config).expect("verification should succeed");
        assert_eq!(claims.sub, "user_2NqyX");
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();
        // Expired well past the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let token = mint(
            &Claims {
                sub: "user_expired".to_string(),
                exp: now - 300,
                iat: now - 600,
            },
            &config.token_secret,
        );

        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_wrong_secret_fails() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();
        let token = mint(
            &Claims {
                sub: "user_forged".to_string(),
                exp: now + 3600,
                iat: now,
            },
            "a-different-secret-entirely",
        );

        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_garbage_token_fails() {
        let config = test_config();
        assert!(verify_token("not-a-token", &config).is_err());
    }
}
