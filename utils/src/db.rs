use migration::{DbErr, Migrator, MigratorTrait, SchemaManager, sea_orm::DatabaseConnection};

use crate::file::touch;

pub async fn migrate(conn: &DatabaseConnection) -> Result<(), DbErr> {
    let schema_manager = SchemaManager::new(conn);
    Migrator::up(conn, None).await?;
    if !schema_manager.has_table("users").await? {
        return Err(DbErr::Migration("users table missing after migration".to_owned()));
    }
    Ok(())
}

/// SQLite refuses to open a missing database file, so local development
/// URLs like `sqlite://dev.db` get their file created up front.
pub fn create_dev_db(db_url: &str) {
    let Some(path) = db_url
        .strip_prefix("sqlite://")
        .or_else(|| db_url.strip_prefix("sqlite:"))
    else {
        return;
    };
    let path = path.split('?').next().unwrap_or_default();
    if path.is_empty() || path.starts_with(':') {
        return;
    }
    tracing::debug!("ensuring sqlite file {} exists", path);
    touch(path);
}
