pub mod ai;
pub mod otp;
pub mod user;
