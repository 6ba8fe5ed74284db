//! Bearer-token signing for API requests.
//!
//! Every outgoing request is authenticated with a short-lived JWT signed
//! with the service secret (HMAC-SHA256). Tokens carry only an issuer and
//! an issued-at claim; the remote verifier enforces its own acceptance
//! window, so no expiry claim is set locally.

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// JWT claims attached to every request token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Issuer (the service id)
    pub iss: String,
    /// Issued at (seconds since epoch)
    pub iat: i64,
}

impl Claims {
    /// Creates claims for one request issued at the given time
    pub fn new(service_id: &str, issued_at: i64) -> Self {
        Self {
            iss: service_id.to_string(),
            iat: issued_at,
        }
    }
}

/// Generates a signed bearer token for a single request
///
/// The token must be minted immediately before the request is sent: the
/// issued-at claim has to reflect the real send time or the remote
/// verifier will reject it as stale.
///
/// # Arguments
/// * `service_id` - The service identifier, used as the `iss` claim
/// * `secret` - The shared secret key for signing the token
///
/// # Returns
/// The encoded compact JWT string (`header.claims.signature`)
pub fn create_token(service_id: &str, secret: &str) -> ClientResult<String> {
    create_token_at(service_id, secret, Utc::now().timestamp())
}

/// Same as [`create_token`] with an explicit issued-at timestamp
///
/// The clock is a parameter so tests can pin it deterministically.
pub fn create_token_at(service_id: &str, secret: &str, issued_at: i64) -> ClientResult<String> {
    let claims = Claims::new(service_id, issued_at);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|source| ClientError::Token { source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

    const TEST_SERVICE_ID: &str = "f47ac10b-58cc-4372-a567-0e02b2c3d479";
    const TEST_SECRET: &str = "3ec979b1-5d59-4e20-a1a0-80b41a2d4be6";

    fn decode_claims(token: &str, secret: &str) -> jsonwebtoken::errors::Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
    }

    #[test]
    fn test_token_has_three_sections() {
        let token = create_token(TEST_SERVICE_ID, TEST_SECRET).unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_claims_carry_issuer_and_issued_at() {
        let token = create_token_at(TEST_SERVICE_ID, TEST_SECRET, 1_700_000_000).unwrap();
        let claims = decode_claims(&token, TEST_SECRET).unwrap();

        assert_eq!(claims.iss, TEST_SERVICE_ID);
        assert_eq!(claims.iat, 1_700_000_000);
    }

    #[test]
    fn test_issued_at_tracks_wall_clock() {
        let before = Utc::now().timestamp();
        let token = create_token(TEST_SERVICE_ID, TEST_SECRET).unwrap();
        let after = Utc::now().timestamp();

        let claims = decode_claims(&token, TEST_SECRET).unwrap();
        assert!(claims.iat >= before && claims.iat <= after);
    }

    #[test]
    fn test_signature_rejected_with_wrong_secret() {
        let token = create_token(TEST_SERVICE_ID, TEST_SECRET).unwrap();
        let result = decode_claims(&token, "wrong-secret");

        assert!(matches!(
            result.unwrap_err().kind(),
            jsonwebtoken::errors::ErrorKind::InvalidSignature
        ));
    }

    #[test]
    fn test_same_second_is_deterministic() {
        let a = create_token_at(TEST_SERVICE_ID, TEST_SECRET, 1_700_000_000).unwrap();
        let b = create_token_at(TEST_SERVICE_ID, TEST_SECRET, 1_700_000_000).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_distinct_times_produce_distinct_tokens() {
        let a = create_token_at(TEST_SERVICE_ID, TEST_SECRET, 1_700_000_000).unwrap();
        let b = create_token_at(TEST_SERVICE_ID, TEST_SECRET, 1_700_000_001).unwrap();
        assert_ne!(a, b);
    }
}
