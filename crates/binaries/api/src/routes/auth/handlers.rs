//! HTTP handlers for authentication-related routes.

use crate::api_state::ApiState;
use app_state::settings;
use axum::{Extension, Json, extract::State, http::StatusCode};
use common_services::api::auth::error::AuthError;
use common_services::api::auth::interfaces::{CreateUser, LoginUser, LoginResponse};
use common_services::api::auth::service::{authenticate_user, create_access_token, create_user};
use common_services::database::app_user::User;

/// Handles the registration of a new user.
///
/// # Errors
///
/// Returns `AuthError` if a user with the provided email already exists or
/// if a database error occurs during user creation.
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = CreateUser,
    responses(
        (status = 200, description = "User created successfully", body = User),
        (status = 409, description = "User with this email already exists"),
    )
)]
pub async fn register(
    State(api_state): State<ApiState>,
    Json(payload): Json<CreateUser>,
) -> Result<Json<User>, AuthError> {
    let user = create_user(&api_state.pool, &payload).await?;
    Ok(Json(user))
}

/// Handles user login and returns a bearer token plus the user.
///
/// # Errors
///
/// Returns `AuthError` if the user credentials are invalid or if there's a
/// problem creating the token.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginUser,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
    )
)]
pub async fn login(
    State(api_state): State<ApiState>,
    Json(payload): Json<LoginUser>,
) -> Result<Json<LoginResponse>, AuthError> {
    let user = authenticate_user(&api_state.pool, &payload.email, &payload.password).await?;
    let auth_settings = &settings().auth;
    let (token, expiry) = create_access_token(
        &auth_settings.jwt_secret,
        user.id,
        auth_settings.access_token_expiry_hours,
    )?;

    Ok(Json(LoginResponse {
        token,
        expiry,
        user: user.into(),
    }))
}

/// Get current user info.
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Current user data", body = User),
        (status = 401, description = "Authentication required"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(Extension(user): Extension<User>) -> Result<Json<User>, StatusCode> {
    Ok(Json(user))
}
