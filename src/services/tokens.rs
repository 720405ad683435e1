//! Signed single-purpose tokens for emailed links.
//!
//! Set-password invitations and email-verification links carry a JWT
//! scoped to one purpose, so a verification token can never be used to
//! set a password and vice versa.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{Config, SET_PASSWORD_TOKEN_HOURS, VERIFY_EMAIL_TOKEN_HOURS};
use crate::errors::{AppError, AppResult};

/// What an emailed link is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    SetPassword,
    VerifyEmail,
}

impl TokenPurpose {
    fn validity_hours(self) -> i64 {
        match self {
            TokenPurpose::SetPassword => SET_PASSWORD_TOKEN_HOURS,
            TokenPurpose::VerifyEmail => VERIFY_EMAIL_TOKEN_HOURS,
        }
    }
}

/// Claims payload of an action token.
#[derive(Debug, Serialize, Deserialize)]
pub struct ActionClaims {
    pub sub: Uuid,
    /// Address the action applies to (the NEW address for verification)
    pub email: String,
    pub purpose: TokenPurpose,
    pub exp: i64,
    pub iat: i64,
}

/// Issue a purpose-scoped token for a user and email address.
pub fn issue_action_token(
    config: &Config,
    user_id: Uuid,
    email: &str,
    purpose: TokenPurpose,
) -> AppResult<String> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(purpose.validity_hours());

    let claims = ActionClaims {
        sub: user_id,
        email: email.to_string(),
        purpose,
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(token)
}

/// Verify a token and check it carries the expected purpose.
pub fn verify_action_token(
    config: &Config,
    token: &str,
    expected: TokenPurpose,
) -> AppResult<ActionClaims> {
    let token_data = decode::<ActionClaims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    if token_data.claims.purpose != expected {
        return Err(AppError::Unauthorized);
    }

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        std::env::set_var("JWT_SECRET", "test-secret-key-for-testing-only-32chars");
        Config::from_env()
    }

    #[test]
    fn issued_token_round_trips() {
        let config = test_config();
        let user_id = Uuid::new_v4();
        let token =
            issue_action_token(&config, user_id, "j.jansen@hz.nl", TokenPurpose::SetPassword)
                .unwrap();

        let claims = verify_action_token(&config, &token, TokenPurpose::SetPassword).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "j.jansen@hz.nl");
    }

    #[test]
    fn purpose_mismatch_is_rejected() {
        let config = test_config();
        let token = issue_action_token(
            &config,
            Uuid::new_v4(),
            "j.jansen@hz.nl",
            TokenPurpose::VerifyEmail,
        )
        .unwrap();

        let result = verify_action_token(&config, &token, TokenPurpose::SetPassword);
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }
}
