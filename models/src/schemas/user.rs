use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domains::{sea_orm_active_enums::UserRole, users};

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct UserSchema {
    pub id: String,
    pub email: String,
    pub username: Option<String>,
    pub role: UserRole,
}

impl From<users::Model> for UserSchema {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            role: user.role,
        }
    }
}

/// Identity carried by an access token.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct AuthUserSchema {
    pub id: String,
    pub email: String,
    pub role: UserRole,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, ToSchema)]
pub struct AuthSchema {
    pub user: Option<AuthUserSchema>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, ToSchema)]
pub struct SocialLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl SocialLinks {
    /// Reads the stored column; anything unreadable counts as no links.
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    pub fn to_json_text(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Overwrites only the keys that carry a non-blank value in `update`.
    pub fn merge(&mut self, update: SocialLinks) {
        fn apply(slot: &mut Option<String>, value: Option<String>) {
            if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
                *slot = Some(value);
            }
        }

        apply(&mut self.github, update.github);
        apply(&mut self.linkedin, update.linkedin);
        apply(&mut self.twitter, update.twitter);
        apply(&mut self.website, update.website);
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ProfileSchema {
    pub role: UserRole,
    pub username: Option<String>,
    pub date_joined: DateTime<Utc>,
    pub bio: Option<String>,
    pub email: String,
    pub profile: Option<String>,
    pub social_links: SocialLinks,
    pub name: Option<String>,
}

impl From<users::Model> for ProfileSchema {
    fn from(user: users::Model) -> Self {
        Self {
            role: user.role,
            username: user.username,
            date_joined: user.created_at.to_utc(),
            bio: user.bio,
            email: user.email,
            profile: user.profile,
            social_links: SocialLinks::parse(&user.social_links),
            name: user.name,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct TokensSchema {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct AccessTokenSchema {
    pub access_token: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct GoogleLoginSchema {
    pub access_token: String,
    pub refresh_token: String,
    pub username: Option<String>,
    pub email: String,
    pub is_new_user: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct UsernameAvailabilitySchema {
    pub available: bool,
    pub msg: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ProfileImageSchema {
    pub msg: String,
    pub url: String,
}
