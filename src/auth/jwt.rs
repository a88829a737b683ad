use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use crate::{config::JwtConfig, state::AppState};

/// JWT payload: the identity it was issued to, plus timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub name: String,
    pub email: String,
    pub iat: usize,
    pub exp: usize,
}

/// Signing and verification keys plus the configured token lifetime.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig {
            secret,
            ttl_minutes,
        } = state.config.jwt.clone();
        Self::new(&secret, ttl_minutes)
    }
}

impl JwtKeys {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::from_secs((ttl_minutes.max(0) as u64) * 60),
        }
    }

    /// Issue a token embedding {name, email} with the configured expiry.
    pub fn sign(&self, name: &str, email: &str) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            name: name.to_string(),
            email: email.to_string(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(name, email, "jwt signed");
        Ok(token)
    }

    /// Fails on bad signature or expired token.
    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        debug!(name = %data.claims.name, "jwt verified");
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Keys are built directly: no pool, no runtime, plain #[test] works.
    fn make_keys() -> JwtKeys {
        JwtKeys::new("test", 5)
    }

    #[test]
    fn sign_and_verify_roundtrip() {
        let keys = make_keys();
        let token = keys.sign("ana", "ana@example.com").expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.name, "ana");
        assert_eq!(claims.email, "ana@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let keys = make_keys();
        let other = JwtKeys::new("different-secret", 5);
        let token = keys.sign("ana", "ana@example.com").expect("sign");
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_expired_token() {
        let keys = make_keys();
        // Forge a token whose expiry is further in the past than the default
        // validation leeway (60s).
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = Claims {
            name: "ana".into(),
            email: "ana@example.com".into(),
            iat: (now - 3600) as usize,
            exp: (now - 600) as usize,
        };
        let token = encode(&Header::default(), &claims, &keys.encoding).expect("encode");
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_garbage() {
        let keys = make_keys();
        assert!(keys.verify("not-a-token").is_err());
    }
}
