/// Authentication and authorization
///
/// This module provides the identity-facing primitives of Worklane:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: JWT token generation and validation
/// - [`policy`]: The pure authorization policy engine
///
/// The credential-verification contract lives here:
/// [`verify_credentials`] resolves an email/password pair to a full
/// [`User`], failing with a uniform [`AuthError::InvalidCredentials`]
/// for both unknown emails and wrong passwords.

use crate::models::user::User;
use crate::store::{Store, StoreError};

pub mod jwt;
pub mod password;
pub mod policy;

/// Error type for credential verification
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Unknown email or wrong password; deliberately indistinguishable
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Password hashing backend failure
    #[error(transparent)]
    Password(#[from] password::PasswordError),

    /// Underlying persistence failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Verifies an email/password pair against the store
///
/// # Errors
///
/// Returns [`AuthError::InvalidCredentials`] if the email is unknown or
/// the password does not match; the caller cannot tell which.
pub async fn verify_credentials<S: Store + ?Sized>(
    store: &S,
    email: &str,
    plaintext: &str,
) -> Result<User, AuthError> {
    let user = store
        .find_user_by_email(email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !password::verify_password(plaintext, &user.password_hash)? {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(user)
}
