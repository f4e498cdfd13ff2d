use std::env;

use crate::env_parse;

const DEV_SECRET: &str = "ridebook-dev-secret-change-in-production";

/// Settings shared with the auth service that signs session tokens.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Lifetime in seconds of tokens minted by this service (CLI, tests).
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using the development secret");
            DEV_SECRET.to_string()
        });

        Self {
            secret,
            access_token_expiry: env_parse("JWT_ACCESS_EXPIRY").unwrap_or(3600), // 1 hour
        }
    }

    pub fn new(secret: impl Into<String>, access_token_expiry: i64) -> Self {
        Self {
            secret: secret.into(),
            access_token_expiry,
        }
    }
}
