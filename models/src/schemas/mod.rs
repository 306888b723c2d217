pub mod message;
pub mod survey;
pub mod user;
