//! Authentication module for PropDesk
//!
//! - bcrypt password hashing
//! - JWT access and password-reset tokens
//! - Account flows (sign-up, sign-in, password reset)

mod jwt;
mod password;
mod service;

pub use jwt::{issue_token, verify_token, Claims, JwtError, TokenPurpose};
pub use password::{hash_password, verify_password, PasswordError, HASH_COST};
pub use service::{AccountError, AccountService, TokenSettings};
