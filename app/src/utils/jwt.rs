use chrono::Utc;
use jsonwebtoken::{Header, Validation, decode, encode};
use models::domains::{sea_orm_active_enums::UserRole, users};
use models::schemas::user::AuthUserSchema;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub email: String,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
    pub token_type: TokenType,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<Claims> for AuthUserSchema {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

fn encode_claims(
    config: &Config,
    user: &AuthUserSchema,
    token_type: TokenType,
) -> Result<String, AppError> {
    let now = Utc::now();
    let ttl = match token_type {
        TokenType::Access => config.access_token_ttl,
        TokenType::Refresh => config.refresh_token_ttl,
    };
    let exp = now
        + chrono::Duration::from_std(ttl)
            .map_err(|e| anyhow::anyhow!("Token lifetime out of range: {}", e))?;

    let claims = Claims {
        sub: user.id.clone(),
        email: user.email.clone(),
        role: user.role,
        exp: exp.timestamp(),
        iat: now.timestamp(),
        token_type,
    };

    encode(&Header::default(), &claims, &config.encoding_key)
        .map_err(|e| anyhow::anyhow!("Failed to encode {:?} token: {}", token_type, e).into())
}

pub fn generate_token_pair(config: &Config, user: &users::Model) -> Result<TokenPair, AppError> {
    let identity = AuthUserSchema {
        id: user.id.clone(),
        email: user.email.clone(),
        role: user.role,
    };

    Ok(TokenPair {
        access_token: encode_claims(config, &identity, TokenType::Access)?,
        refresh_token: encode_claims(config, &identity, TokenType::Refresh)?,
    })
}

/// Decodes `token` and checks it is of the `expected` kind.
pub fn verify_token(config: &Config, token: &str, expected: TokenType) -> Result<Claims, AppError> {
    let claims = decode::<Claims>(token, &config.decoding_key, &Validation::default())
        .map_err(|e| {
            tracing::debug!("Rejected token: {}", e);
            AppError::Unauthorized
        })?
        .claims;

    if claims.token_type != expected {
        return Err(AppError::Unauthorized);
    }
    Ok(claims)
}

pub fn refresh_access_token(config: &Config, refresh_token: &str) -> Result<String, AppError> {
    let claims = verify_token(config, refresh_token, TokenType::Refresh)?;
    encode_claims(config, &claims.into(), TokenType::Access)
}
