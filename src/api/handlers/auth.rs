use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    api::state::AppState,
    auth::{self, AuthService, SESSION_COOKIE},
    domain::{CreateUserRequest, User},
    error::{AppError, Result},
    repository::UserRepository,
};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 30))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: User,
}

pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<RegisterRequest>,
) -> Result<(CookieJar, (StatusCode, Json<AuthResponse>))> {
    req.validate()?;

    let users = &state.service_context.user_repo;
    if users.find_by_username(&req.username).await?.is_some() {
        return Err(AppError::Conflict("Username already taken".to_string()));
    }
    if users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = AuthService::hash_password(&req.password).await?;
    let user = users
        .create(CreateUserRequest {
            username: req.username,
            email: req.email,
            password_hash,
        })
        .await?;

    // Registration signs the new user straight in.
    let duration = state.settings.auth.session_duration_hours;
    let (_session, token) = state
        .service_context
        .auth_service
        .create_session(user.id, duration)
        .await?;
    let cookie = state
        .service_context
        .auth_service
        .create_session_cookie(&token, duration, false);

    Ok((
        jar.add(cookie),
        (
            StatusCode::CREATED,
            Json(AuthResponse {
                message: "Registration successful".to_string(),
                user,
            }),
        ),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    let password_hash =
        auth::get_password_hash(&state.service_context.db_pool, &req.username)
            .await?
            .ok_or(AppError::Unauthorized)?;

    if !AuthService::verify_password(&req.password, &password_hash).await? {
        return Err(AppError::Unauthorized);
    }

    let user = state
        .service_context
        .user_repo
        .find_by_username(&req.username)
        .await?
        .ok_or(AppError::Unauthorized)?;

    state
        .service_context
        .user_repo
        .touch_last_login(user.id)
        .await?;

    let duration = state.settings.auth.session_duration_hours;
    let (_session, token) = state
        .service_context
        .auth_service
        .create_session(user.id, duration)
        .await?;
    let cookie = state
        .service_context
        .auth_service
        .create_session_cookie(&token, duration, false);

    Ok((
        jar.add(cookie),
        Json(AuthResponse {
            message: "Login successful".to_string(),
            user,
        }),
    ))
}

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode)> {
    if let Some(session_cookie) = jar.get(SESSION_COOKIE) {
        // The cookie gets cleared either way, but a session left behind
        // in the store is worth knowing about.
        if let Err(e) = state
            .service_context
            .auth_service
            .invalidate_session(session_cookie.value())
            .await
        {
            tracing::warn!("Failed to invalidate session on logout: {}", e);
        }
    }

    let jar = jar.add(AuthService::create_logout_cookie());

    Ok((jar, StatusCode::NO_CONTENT))
}
