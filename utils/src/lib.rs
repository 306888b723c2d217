mod db;
mod file;
pub mod testing;

pub use db::{create_dev_db, migrate};
