//! API handlers for PropDesk

pub mod auth;
pub mod health;
pub mod property;

pub use auth::{forgot_password, signin, signup};
pub use health::health_check;
pub use property::property_setup;
