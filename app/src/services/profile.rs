use sea_orm::DbConn;

use models::params::user::UpdateProfileParams;
use models::schemas::user::{ProfileSchema, UsernameAvailabilitySchema};

use crate::error::AppError;
use crate::persistence::users as user_store;
use crate::services::auth::signed_in_user;
use crate::utils::image::ImageHost;

const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

pub async fn get_profile(db: &DbConn, user_id: &str) -> Result<ProfileSchema, AppError> {
    Ok(signed_in_user(db, user_id).await?.into())
}

pub async fn update_profile(
    db: &DbConn,
    user_id: &str,
    params: UpdateProfileParams,
) -> Result<ProfileSchema, AppError> {
    let user = signed_in_user(db, user_id).await?;
    let user = user_store::update_profile(db, user, params).await?;
    Ok(user.into())
}

pub fn has_image_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Uploads the picture and stores its public URL. Returns the URL.
pub async fn upload_profile_image(
    db: &DbConn,
    images: &dyn ImageHost,
    user_id: &str,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<String, AppError> {
    if !has_image_extension(file_name) {
        return Err(AppError::Validation(
            "Only .png, .jpg and .jpeg files are allowed.".to_string(),
        ));
    }
    if bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty.".to_string()));
    }

    let user = signed_in_user(db, user_id).await?;
    let url = images.upload(file_name, bytes).await?;
    user_store::set_profile_image(db, user, url.clone()).await?;
    Ok(url)
}

pub async fn check_username(
    db: &DbConn,
    username: &str,
) -> Result<UsernameAvailabilitySchema, AppError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::Validation("Username is required.".to_string()));
    }

    Ok(if user_store::username_exists(db, username).await? {
        UsernameAvailabilitySchema {
            available: false,
            msg: "Username is already taken.".to_string(),
        }
    } else {
        UsernameAvailabilitySchema {
            available: true,
            msg: "Username is available.".to_string(),
        }
    })
}
