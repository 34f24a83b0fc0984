use std::collections::HashSet;

use chrono::Utc;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ExpiryClaim {
    exp: i64,
}

/// Reads the `exp` claim from a bearer token without verifying its signature.
///
/// The client holds no signing secret; the backend remains the authority on
/// validity. This only answers "is it worth sending".
pub fn expires_at(token: &str) -> Option<i64> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims = HashSet::new();

    decode::<ExpiryClaim>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims.exp)
        .ok()
}

/// A token is expired at `now` (epoch seconds) once `now >= exp`.
/// Tokens that cannot be decoded count as expired.
pub fn is_expired_at(token: &str, now: i64) -> bool {
    match expires_at(token) {
        Some(exp) => now >= exp,
        None => true,
    }
}

pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, Utc::now().timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    fn token_with_exp(exp: i64) -> String {
        encode(
            &Header::default(),
            &json!({ "id": "inst-1", "userType": "institution", "exp": exp }),
            &EncodingKey::from_secret(b"backend-secret"),
        )
        .unwrap()
    }

    #[test]
    fn test_reads_exp_without_secret() {
        let token = token_with_exp(1_900_000_000);
        assert_eq!(expires_at(&token), Some(1_900_000_000));
    }

    #[test]
    fn test_expiry_boundary() {
        let token = token_with_exp(1_000);
        assert!(!is_expired_at(&token, 999));
        assert!(is_expired_at(&token, 1_000));
        assert!(is_expired_at(&token, 1_001));
    }

    #[test]
    fn test_undecodable_tokens_are_expired() {
        assert!(is_expired("not-a-jwt"));
        assert!(is_expired("a.b.c"));
        assert!(is_expired(""));
    }

    #[test]
    fn test_missing_exp_is_expired() {
        let token = encode(
            &Header::default(),
            &json!({ "id": "inst-1" }),
            &EncodingKey::from_secret(b"backend-secret"),
        )
        .unwrap();
        assert!(is_expired(&token));
    }
}
