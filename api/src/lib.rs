mod error;
mod extractor;
mod init;
mod middleware;

pub mod models;
pub mod openapi;
pub mod routers;

pub use error::ApiError;
pub use init::{setup_config, setup_db, setup_router};
