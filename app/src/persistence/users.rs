use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, PaginatorTrait, QueryFilter, Set,
    SqlErr,
};

use models::domains::{sea_orm_active_enums::UserRole, users};
use models::params::user::UpdateProfileParams;
use models::schemas::user::SocialLinks;

use crate::error::AppError;

const USER_ID_LENGTH: usize = 24;
const MIN_USERNAME_LENGTH: usize = 2;

pub struct NewUser {
    pub email: String,
    pub username: Option<String>,
    pub passhash: Option<String>,
    pub role: UserRole,
}

fn duplicate_or_db(e: DbErr, what: &str) -> AppError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::DuplicateUser(what.to_string()),
        _ => AppError::Database(e),
    }
}

/// Both backends name the violated column or index in the message
/// (`users.username` on SQLite, `users_username_key` on Postgres).
fn duplicate_on_insert(e: DbErr) -> AppError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) if msg.contains("username") => {
            AppError::DuplicateUser("Username already exists.".to_string())
        }
        Some(SqlErr::UniqueConstraintViolation(msg)) if msg.contains("email") => {
            AppError::DuplicateUser("User with this email already exists.".to_string())
        }
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::DuplicateUser("User already exists.".to_string())
        }
        _ => AppError::Database(e),
    }
}

pub async fn find_by_email(db: &DbConn, email: &str) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await
}

pub async fn get_user(db: &DbConn, id: &str) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(id).one(db).await
}

pub async fn email_exists(db: &DbConn, email: &str) -> Result<bool, DbErr> {
    let count = users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .count(db)
        .await?;
    Ok(count > 0)
}

pub async fn username_exists(db: &DbConn, username: &str) -> Result<bool, DbErr> {
    let count = users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Local part of the email, with the first free numeric suffix appended
/// when it is taken (`jane`, `jane1`, `jane2`, ...). Local parts shorter
/// than the minimum username length get a `_user` suffix (`a` -> `a_user`).
pub async fn available_username(db: &DbConn, email: &str) -> Result<String, DbErr> {
    let local = email.split('@').next().unwrap_or(email);
    let base = if local.chars().count() < MIN_USERNAME_LENGTH {
        format!("{local}_user")
    } else {
        local.to_owned()
    };
    let mut candidate = base.clone();
    let mut counter = 1;
    while username_exists(db, &candidate).await? {
        candidate = format!("{base}{counter}");
        counter += 1;
    }
    Ok(candidate)
}

pub async fn create_user(db: &DbConn, new_user: NewUser) -> Result<users::Model, AppError> {
    let now = Utc::now().fixed_offset();
    users::ActiveModel {
        id: Set(nanoid::nanoid!(USER_ID_LENGTH, &super::ID_ALPHABET)),
        email: Set(new_user.email),
        username: Set(new_user.username),
        passhash: Set(new_user.passhash),
        role: Set(new_user.role),
        name: Set(None),
        bio: Set(None),
        profile: Set(None),
        social_links: Set(SocialLinks::default().to_json_text()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .map_err(duplicate_on_insert)
}

pub async fn set_password(
    db: &DbConn,
    user: users::Model,
    passhash: String,
) -> Result<users::Model, DbErr> {
    let mut active: users::ActiveModel = user.into();
    active.passhash = Set(Some(passhash));
    active.updated_at = Set(Utc::now().fixed_offset());
    active.update(db).await
}

pub async fn set_profile_image(
    db: &DbConn,
    user: users::Model,
    url: String,
) -> Result<users::Model, DbErr> {
    let mut active: users::ActiveModel = user.into();
    active.profile = Set(Some(url));
    active.updated_at = Set(Utc::now().fixed_offset());
    active.update(db).await
}

pub async fn update_profile(
    db: &DbConn,
    user: users::Model,
    params: UpdateProfileParams,
) -> Result<users::Model, AppError> {
    if let Some(username) = params.username.as_deref() {
        if user.username.as_deref() != Some(username) && username_exists(db, username).await? {
            return Err(AppError::DuplicateUser("Username already exists.".to_string()));
        }
    }

    let mut links = SocialLinks::parse(&user.social_links);
    links.merge(SocialLinks {
        github: params.github,
        linkedin: params.linkedin,
        twitter: params.twitter,
        website: params.website,
    });

    let mut active: users::ActiveModel = user.into();
    if let Some(bio) = params.bio {
        active.bio = Set(Some(bio));
    }
    if let Some(username) = params.username {
        active.username = Set(Some(username));
    }
    if let Some(profile) = params.profile {
        active.profile = Set(Some(profile));
    }
    if let Some(name) = params.name {
        active.name = Set(Some(name));
    }
    active.social_links = Set(links.to_json_text());
    active.updated_at = Set(Utc::now().fixed_offset());

    active
        .update(db)
        .await
        .map_err(|e| duplicate_or_db(e, "Username already exists."))
}
