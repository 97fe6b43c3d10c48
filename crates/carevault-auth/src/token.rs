//! Bearer token issuance and verification (HS256 JWT).

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// JWT claims embedded in every bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — account ID (UUID string).
    pub sub: String,
    /// Account email at issuance time.
    pub email: String,
    /// Issuer.
    pub iss: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp) — issuance + configured TTL.
    pub exp: i64,
    /// Unique token ID (UUID string). Makes any two issued tokens
    /// distinct even for identical subject and instant.
    pub jti: String,
}

/// Issue a signed bearer token for an account.
///
/// The token is self-contained: identity and expiry travel inside it and
/// nothing is persisted. It stays valid until its `exp` instant — there
/// is no server-side revocation.
pub fn issue_access_token(
    account_id: Uuid,
    email: &str,
    config: &AuthConfig,
) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: account_id.to_string(),
        email: email.to_string(),
        iss: config.jwt_issuer.clone(),
        iat: now,
        exp: now + config.token_ttl_secs as i64,
        jti: Uuid::new_v4().to_string(),
    };

    let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
    jsonwebtoken::encode(&Header::default(), &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("JWT encode: {e}")))
}

/// Decode and verify a bearer token (signature, expiry, issuer).
pub fn decode_access_token(token: &str, config: &AuthConfig) -> Result<Claims, AuthError> {
    let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.jwt_issuer]);
    validation.set_required_spec_claims(&["sub", "exp", "iat", "iss"]);

    jsonwebtoken::decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid(e.to_string()),
        })
}

/// Verified JWT claims — a newtype proving the token was validated.
///
/// Used by the HTTP layer to carry authenticated identity extracted
/// from an incoming request.
#[derive(Debug, Clone)]
pub struct ValidatedClaims(pub Claims);

/// Validate a bearer token and return the verified claims.
///
/// This is the entry point for the request-level auth gate. It is
/// purely stateless — no store lookup is performed, and it never blocks
/// on I/O.
pub fn validate_access_token(token: &str, config: &AuthConfig) -> Result<ValidatedClaims, AuthError> {
    decode_access_token(token, config).map(ValidatedClaims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret-not-for-production".into(),
            token_ttl_secs: 604_800,
            jwt_issuer: "carevault-test".into(),
            ..AuthConfig::default()
        }
    }

    /// Encode claims directly with the config's secret, bypassing
    /// `issue_access_token`, to control `iat`/`exp`.
    fn encode_raw(claims: &Claims, config: &AuthConfig) -> String {
        jsonwebtoken::encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn token_roundtrip() {
        let config = test_config();
        let account_id = Uuid::new_v4();

        let token = issue_access_token(account_id, "ada@example.com", &config).unwrap();
        let claims = decode_access_token(&token, &config).unwrap();

        assert_eq!(claims.sub, account_id.to_string());
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.iss, "carevault-test");
        assert_eq!(claims.exp - claims.iat, 604_800);
    }

    #[test]
    fn two_issuances_differ() {
        let config = test_config();
        let id = Uuid::new_v4();

        let t1 = issue_access_token(id, "a@b.com", &config).unwrap();
        let t2 = issue_access_token(id, "a@b.com", &config).unwrap();
        assert_ne!(t1, t2);

        let c1 = decode_access_token(&t1, &config).unwrap();
        let c2 = decode_access_token(&t2, &config).unwrap();
        assert_ne!(c1.jti, c2.jti);
    }

    #[test]
    fn tampered_token_is_invalid() {
        let config = test_config();
        let token = issue_access_token(Uuid::new_v4(), "a@b.com", &config).unwrap();

        let tampered = format!("{token}x");
        assert!(matches!(
            validate_access_token(&tampered, &config),
            Err(AuthError::TokenInvalid(_))
        ));
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let config = test_config();
        let token = issue_access_token(Uuid::new_v4(), "a@b.com", &config).unwrap();

        let other = AuthConfig {
            jwt_secret: "a-different-secret".into(),
            ..test_config()
        };
        assert!(matches!(
            decode_access_token(&token, &other),
            Err(AuthError::TokenInvalid(_))
        ));
    }

    #[test]
    fn wrong_issuer_is_invalid() {
        let config = test_config();
        let token = issue_access_token(Uuid::new_v4(), "a@b.com", &config).unwrap();

        let other = AuthConfig {
            jwt_issuer: "someone-else".into(),
            ..test_config()
        };
        assert!(decode_access_token(&token, &other).is_err());
    }

    #[test]
    fn seven_day_token_is_valid_at_six_days() {
        let config = test_config();
        let now = Utc::now().timestamp();
        // Issued six days ago with a 7-day TTL.
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: "a@b.com".into(),
            iss: config.jwt_issuer.clone(),
            iat: now - 6 * 86_400,
            exp: now - 6 * 86_400 + 604_800,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode_raw(&claims, &config);
        assert!(decode_access_token(&token, &config).is_ok());
    }

    #[test]
    fn seven_day_token_is_expired_at_eight_days() {
        let config = test_config();
        let now = Utc::now().timestamp();
        // Issued eight days ago with a 7-day TTL.
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: "a@b.com".into(),
            iss: config.jwt_issuer.clone(),
            iat: now - 8 * 86_400,
            exp: now - 8 * 86_400 + 604_800,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode_raw(&claims, &config);
        assert!(matches!(
            decode_access_token(&token, &config),
            Err(AuthError::TokenExpired)
        ));
    }
}
