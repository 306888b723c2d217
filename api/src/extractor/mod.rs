mod auth;
mod json;
mod valid;

pub use auth::CurrentUser;
pub use json::Json;
pub use valid::Valid;
