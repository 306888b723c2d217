use sea_orm::DatabaseConnection;

use app::error::AppError;
use app::persistence::users::{
    NewUser, available_username, create_user, email_exists, find_by_email, get_user,
    update_profile,
};
use models::domains::sea_orm_active_enums::UserRole;
use models::params::user::UpdateProfileParams;
use models::schemas::user::SocialLinks;

fn new_user(email: &str, username: Option<&str>) -> NewUser {
    NewUser {
        email: email.to_owned(),
        username: username.map(str::to_owned),
        passhash: None,
        role: UserRole::User,
    }
}

pub(super) async fn test_create_and_find(db: &DatabaseConnection) {
    let user = create_user(db, new_user("ada@example.com", Some("ada")))
        .await
        .expect("Create user failed!");
    assert_eq!(user.id.len(), 24);
    assert_eq!(user.role, UserRole::User);
    assert_eq!(user.social_links, "{}");

    let found = find_by_email(db, "ada@example.com").await.unwrap().unwrap();
    assert_eq!(found.id, user.id);
    assert_eq!(get_user(db, &user.id).await.unwrap().unwrap().email, "ada@example.com");
    assert!(email_exists(db, "ada@example.com").await.unwrap());
    assert!(!email_exists(db, "nobody@example.com").await.unwrap());

    let duplicate = create_user(db, new_user("ada@example.com", None)).await;
    match duplicate {
        Err(AppError::DuplicateUser(msg)) => {
            assert_eq!(msg, "User with this email already exists.")
        }
        other => panic!("expected duplicate email, got {other:?}"),
    }

    let taken_username = create_user(db, new_user("lovelace@example.com", Some("ada"))).await;
    match taken_username {
        Err(AppError::DuplicateUser(msg)) => assert_eq!(msg, "Username already exists."),
        other => panic!("expected duplicate username, got {other:?}"),
    }
}

pub(super) async fn test_available_username(db: &DatabaseConnection) {
    assert_eq!(available_username(db, "grace@example.com").await.unwrap(), "grace");

    create_user(db, new_user("grace@example.com", Some("grace")))
        .await
        .unwrap();
    assert_eq!(available_username(db, "grace@other.org").await.unwrap(), "grace1");

    create_user(db, new_user("grace@other.org", Some("grace1")))
        .await
        .unwrap();
    assert_eq!(available_username(db, "grace@third.net").await.unwrap(), "grace2");

    assert_eq!(available_username(db, "a@b.com").await.unwrap(), "a_user");
    create_user(db, new_user("a@b.com", Some("a_user")))
        .await
        .unwrap();
    assert_eq!(available_username(db, "a@c.org").await.unwrap(), "a_user1");
}

pub(super) async fn test_update_profile(db: &DatabaseConnection) {
    let user = create_user(db, new_user("linus@example.com", Some("linus")))
        .await
        .unwrap();

    let user = update_profile(
        db,
        user,
        UpdateProfileParams {
            bio: Some("Kernel hacker".into()),
            twitter: Some("https://twitter.com/linus".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(user.bio.as_deref(), Some("Kernel hacker"));

    let user = update_profile(
        db,
        user,
        UpdateProfileParams {
            twitter: Some("  ".into()),
            github: Some("https://github.com/linus".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let links = SocialLinks::parse(&user.social_links);
    assert_eq!(links.twitter.as_deref(), Some("https://twitter.com/linus"));
    assert_eq!(links.github.as_deref(), Some("https://github.com/linus"));
    assert_eq!(user.bio.as_deref(), Some("Kernel hacker"));

    let taken = update_profile(
        db,
        user,
        UpdateProfileParams {
            username: Some("ada".into()),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(taken, Err(AppError::DuplicateUser(_))));
}
