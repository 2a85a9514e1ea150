use chrono::Utc;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;

use crate::error::{Result, ScalerError};

#[derive(Debug, Deserialize)]
struct Claims {
    exp: i64,
}

/// Bearer token plus the expiry read from its own `exp` claim.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
    expires_at: i64,
}

impl Credential {
    pub fn from_token(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let expires_at = decode_expiry(&token)?;
        Ok(Self { token, expires_at })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Seconds since the epoch.
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp())
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Reads the `exp` claim without checking the signature; the client never
/// holds the signing key and only needs to know when to refresh.
pub fn decode_expiry(token: &str) -> Result<i64> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims = HashSet::from(["exp".to_string()]);

    let token_data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|e| ScalerError::Auth(format!("Invalid access token: {}", e)))?;

    Ok(token_data.claims.exp)
}
