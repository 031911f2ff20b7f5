use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config;
use crate::types::Role;

pub mod password;

/// Authenticated principal resolved from a verified token.
///
/// Constructed per-request by the authentication middleware and discarded at
/// response time; never derived from a request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub role: Role,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub tenant_id: Uuid,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(identity: &Identity) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: identity.user_id,
            tenant_id: identity.tenant_id,
            role: identity.role,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug)]
pub enum TokenError {
    Generation(String),
    InvalidSecret,
    /// Any verification failure: bad signature, malformed structure or
    /// expired token. Deliberately carries no detail.
    Invalid,
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::Generation(msg) => write!(f, "JWT generation error: {}", msg),
            TokenError::InvalidSecret => write!(f, "Invalid JWT secret"),
            TokenError::Invalid => write!(f, "Invalid token"),
        }
    }
}

impl std::error::Error for TokenError {}

/// Issue a signed, time-limited token for the given identity
pub fn issue_token(identity: &Identity) -> Result<String, TokenError> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err(TokenError::InvalidSecret);
    }

    let claims = Claims::new(identity);
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| TokenError::Generation(e.to_string()))
}

/// Verify a token and recover the identity it encodes.
///
/// All-or-nothing: any failure (signature, structure, expiry) collapses to
/// `TokenError::Invalid` so callers cannot distinguish the reason.
pub fn verify_token(token: &str) -> Result<Identity, TokenError> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err(TokenError::Invalid);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data =
        decode::<Claims>(token, &decoding_key, &validation).map_err(|_| TokenError::Invalid)?;

    Ok(Identity {
        user_id: token_data.claims.sub,
        tenant_id: token_data.claims.tenant_id,
        role: token_data.claims.role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            role: Role::Schooladmin,
        }
    }

    #[test]
    fn token_round_trip_preserves_identity() {
        let original = identity();
        let token = issue_token(&original).expect("issue");
        let recovered = verify_token(&token).expect("verify");
        assert_eq!(recovered, original);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let token = issue_token(&identity()).expect("issue");
        // Flip a character in the signature segment
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });
        assert!(matches!(verify_token(&tampered), Err(TokenError::Invalid)));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(matches!(verify_token("not-a-jwt"), Err(TokenError::Invalid)));
        assert!(matches!(verify_token(""), Err(TokenError::Invalid)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let who = identity();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: who.user_id,
            tenant_id: who.tenant_id,
            role: who.role,
            iat: now - 7200,
            exp: now - 3600,
        };
        let secret = &config::config().security.jwt_secret;
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();
        assert!(matches!(verify_token(&token), Err(TokenError::Invalid)));
    }
}
