//! Account service
//!
//! Sign-up, sign-in and password-reset flows. Handlers stay thin and map
//! [`AccountError`] onto HTTP responses.

use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::mail::{reset_link, Email, MailError, Mailer};
use crate::models::{NewUser, SignupRequest, User};
use crate::store::{StoreError, UserStore};

use super::jwt::{issue_token, verify_token, Claims, JwtError, TokenPurpose};
use super::password::{hash_password, verify_password, PasswordError};

/// Account service errors
#[derive(Error, Debug)]
pub enum AccountError {
    #[error("User Already Exists, go Signin Chief!")]
    UserExists,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    #[error(transparent)]
    Store(StoreError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] JwtError),

    #[error(transparent)]
    Mail(#[from] MailError),
}

impl From<StoreError> for AccountError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail => AccountError::UserExists,
            other => AccountError::Store(other),
        }
    }
}

/// Token signing settings
#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub secret: String,
    pub access_ttl_seconds: i64,
    pub reset_ttl_seconds: i64,
}

/// Account service
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserStore>,
    mailer: Arc<dyn Mailer>,
    tokens: TokenSettings,
    reset_link_base: String,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserStore>,
        mailer: Arc<dyn Mailer>,
        tokens: TokenSettings,
        reset_link_base: String,
    ) -> Self {
        Self {
            users,
            mailer,
            tokens,
            reset_link_base,
        }
    }

    /// Register a new user.
    ///
    /// The email lookup runs first, so a taken email reports a conflict even
    /// when other fields are empty or the passwords differ. The insert itself
    /// is still guarded by the store's uniqueness rule.
    pub async fn signup(&self, req: SignupRequest) -> Result<User, AccountError> {
        if self.users.find_by_email(&req.email).await?.is_some() {
            tracing::info!(email = %req.email, "Signup rejected, user already exists");
            return Err(AccountError::UserExists);
        }

        req.validate()?;

        if req.password != req.confirm_password {
            return Err(AccountError::PasswordMismatch);
        }

        let password_hash = hash_password(&req.password).await?;

        let user = self
            .users
            .insert(NewUser {
                full_name: req.full_name,
                email: req.email,
                password_hash,
                receive_emails: req.receive_emails,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User created");

        Ok(user)
    }

    /// Check credentials and issue an access token
    pub async fn signin(&self, email: &str, password: &str) -> Result<(String, User), AccountError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !verify_password(password, &user.password).await? {
            return Err(AccountError::InvalidCredentials);
        }

        let token = issue_token(
            user.id,
            TokenPurpose::Access,
            &self.tokens.secret,
            self.tokens.access_ttl_seconds,
        )?;

        Ok((token, user))
    }

    /// Email a time-limited reset link to the user
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AccountError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        let reset_token = issue_token(
            user.id,
            TokenPurpose::PasswordReset,
            &self.tokens.secret,
            self.tokens.reset_ttl_seconds,
        )?;

        let link = reset_link(&self.reset_link_base, &reset_token);
        self.mailer
            .send(Email::password_reset(&user.email, &link))
            .await?;

        tracing::info!(user_id = %user.id, "Password reset email sent");

        Ok(())
    }

    /// Verify an access token and load its user
    pub async fn authenticate(&self, token: &str) -> Result<(Claims, User), AccountError> {
        let claims = verify_token(token, &self.tokens.secret, TokenPurpose::Access)?;
        let user_id: Uuid = claims.user_uuid()?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        Ok((claims, user))
    }
}
