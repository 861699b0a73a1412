use crate::api::auth::error::AuthError;
use crate::api::auth::hashing::{hash_password, verify_password};
use crate::api::auth::interfaces::{AuthClaims, CreateUser};
use crate::database::app_user::{User, UserWithPassword};
use crate::database::user_store::UserStore;
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use sqlx::PgPool;
use tracing::info;

/// Authenticates a user based on email and password.
///
/// # Errors
///
/// * `AuthError::InvalidCredentials` if the email or password is incorrect.
/// * `AuthError::Database` for database-related issues.
pub async fn authenticate_user(
    pool: &PgPool,
    email: &str,
    password: &str,
) -> Result<UserWithPassword, AuthError> {
    let user = UserStore::find_by_email_with_password(pool, email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let valid = verify_password(password.as_ref(), &user.password)?;
    if !valid {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(user)
}

/// Creates a new user in the database.
///
/// # Errors
///
/// * `AuthError::UserAlreadyExists` if a user with the given email already exists.
/// * `AuthError::InvalidUsername` when the username contains illegal characters.
/// * `AuthError::InvalidEmail` when the email is obviously malformed.
/// * `AuthError::Internal` for hashing errors.
pub async fn create_user(pool: &PgPool, payload: &CreateUser) -> Result<User, AuthError> {
    let username = &payload.name;
    if username.is_empty()
        || !username.chars().all(|c| c.is_alphanumeric() || c == ' ')
        || username.starts_with(' ')
        || username.ends_with(' ')
    {
        return Err(AuthError::InvalidUsername);
    }
    if !payload.email.contains('@') || payload.email.trim() != payload.email {
        return Err(AuthError::InvalidEmail);
    }
    if UserStore::email_exists(pool, &payload.email).await? {
        return Err(AuthError::UserAlreadyExists);
    }

    let hashed = hash_password(payload.password.as_ref())?;
    info!(
        "Creating user email={}, name={}",
        payload.email, payload.name
    );
    Ok(UserStore::create(pool, &payload.email, &payload.name, &hashed).await?)
}

/// Creates a new access token for a given user ID.
///
/// Returns the encoded token and its expiry as a unix timestamp.
///
/// # Errors
///
/// * `AuthError::InvalidToken` if token encoding fails.
pub fn create_access_token(
    jwt_secret: &str,
    user_id: i32,
    expiry_hours: i64,
) -> Result<(String, i64), AuthError> {
    let exp = (Utc::now() + Duration::hours(expiry_hours)).timestamp();
    let claims = AuthClaims { sub: user_id, exp };
    let access_token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )?;

    Ok((access_token, exp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{DecodingKey, Validation, decode};

    #[test]
    fn access_token_roundtrips_through_decode() -> Result<(), AuthError> {
        let (token, exp) = create_access_token("test-secret", 42, 72)?;
        let decoded = decode::<AuthClaims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        )?;
        assert_eq!(decoded.claims.sub, 42);
        assert_eq!(decoded.claims.exp, exp);
        Ok(())
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() -> Result<(), AuthError> {
        let (token, _) = create_access_token("secret-a", 1, 1)?;
        let result = decode::<AuthClaims>(
            &token,
            &DecodingKey::from_secret(b"secret-b"),
            &Validation::default(),
        );
        assert!(result.is_err());
        Ok(())
    }
}
