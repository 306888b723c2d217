pub mod cache;
pub mod config;
pub mod core;
pub mod error;
pub mod otp;
pub mod persistence;
pub mod services;
pub mod state;
pub mod utils;
