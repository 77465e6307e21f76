use chrono::{DateTime, Duration, TimeZone, Utc};
use hmac::{Hmac, Mac};
use jwt::SignWithKey;
use jwt::VerifyWithKey;
use serde::Deserialize;
use serde::Serialize;
use sha2::Sha256;

use crate::constants::{REFRESH_TOKEN_LIFETIME, REFRESH_WINDOW, SIGN_IN_TOKEN_LIFETIME};
use crate::error::Error;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub username: String,
    iat: i64,
    exp: i64,
}

impl Claims {
    pub fn new(username: String, now: DateTime<Utc>, lifetime: Duration) -> Self {
        Self {
            username,
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// Seconds until expiry, negative once expired.
    pub fn remaining(&self, now: DateTime<Utc>) -> i64 {
        self.exp - now.timestamp()
    }
}

/// What sign-in and refresh hand back to the client.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies HMAC-SHA256 session tokens.
#[derive(Clone)]
pub struct Tokens {
    key: Hmac<Sha256>,
}

impl Tokens {
    pub fn new(secret: &str) -> Result<Self, Error> {
        let key: Hmac<Sha256> = Hmac::new_from_slice(secret.as_bytes())
            .map_err(|e| Error::internal(format!("Invalid signing key: {e}")))?;

        Ok(Self { key })
    }

    pub fn sign_in(&self, username: &str) -> Result<IssuedToken, Error> {
        self.issue_at(username, Utc::now(), Duration::seconds(SIGN_IN_TOKEN_LIFETIME))
    }

    pub fn issue_at(
        &self,
        username: &str,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<IssuedToken, Error> {
        let claims = Claims::new(username.to_owned(), now, lifetime);
        let expires_at = claims
            .expires_at()
            .ok_or_else(|| Error::internal("Token expiry out of range"))?;

        let token = claims
            .sign_with_key(&self.key)
            .map_err(|e| Error::internal(format!("Failed to sign token: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, Error> {
        self.verify_at(token, Utc::now())
    }

    /// Checks the signature first, then the expiry.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, Error> {
        let claims: Claims = token
            .verify_with_key(&self.key)
            .map_err(|_| Error::unauthorized("Invalid token"))?;

        if claims.remaining(now) <= 0 {
            return Err(Error::unauthorized("Token expired"));
        }
        Ok(claims)
    }

    pub fn refresh(&self, claims: &Claims) -> Result<IssuedToken, Error> {
        self.refresh_at(claims, Utc::now())
    }

    /// Re-issues a verified token that is about to expire.
    pub fn refresh_at(&self, claims: &Claims, now: DateTime<Utc>) -> Result<IssuedToken, Error> {
        if claims.remaining(now) <= 0 {
            return Err(Error::unauthorized("Token expired"));
        }
        if claims.remaining(now) > REFRESH_WINDOW {
            return Err(Error::invalid_request("Token is not expired yet"));
        }

        self.issue_at(&claims.username, now, Duration::seconds(REFRESH_TOKEN_LIFETIME))
    }
}
