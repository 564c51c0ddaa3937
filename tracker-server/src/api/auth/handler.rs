//! Authentication Handlers
//!
//! Handles registration, login and current-user lookup

use std::time::Duration;

use axum::{Json, extract::State};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::AuthContext;
use crate::core::ServerState;
use crate::db::models::{Role, UserCreate, UserResponse};
use crate::db::repository::UserRepository;
use crate::utils::validation::validate_payload;
use crate::utils::{AppError, AppResult};

/// Fixed delay for credential checks to blunt timing probes
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Registration payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 200, message = "Name must be at least 2 characters long"))]
    pub name: String,
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
    #[validate(length(min = 6, max = 128, message = "Password must be at least 6 characters long"))]
    pub password: String,
    /// Defaults to `employee`; validated against the closed role set
    #[serde(default)]
    pub role: Option<String>,
}

/// Login payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token plus the authenticated user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Register handler
///
/// Creates a user and returns a token for it immediately
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    validate_payload(&payload)?;

    let role = match payload.role.as_deref() {
        None => Role::Employee,
        Some(raw) => raw
            .parse::<Role>()
            .map_err(|_| AppError::validation_field("role", "Invalid role"))?,
    };

    let repo = UserRepository::new(state.get_db());
    let user = repo
        .create(UserCreate {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            role,
            employee: None,
        })
        .await?;

    let user_id = user.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    let token = state
        .jwt
        .issue(&user_id)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(user_id = %user_id, email = %user.email, role = %user.role, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

/// Login handler
///
/// Authenticates user credentials and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    validate_payload(&payload)?;

    let repo = UserRepository::new(state.get_db());
    let user = repo.find_by_email(&payload.email).await?;

    // Fixed delay before the result is examined, so hit and miss look alike
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error for unknown email, deactivated account and wrong
    // password — no account enumeration through login
    let user = match user {
        Some(user) => user,
        None => {
            tracing::warn!(email = %payload.email, "Login failed - user not found");
            return Err(AppError::InvalidCredentials);
        }
    };

    if !user.is_active {
        tracing::warn!(email = %payload.email, "Login failed - account deactivated");
        return Err(AppError::InvalidCredentials);
    }

    let password_valid = user
        .verify_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

    if !password_valid {
        tracing::warn!(email = %payload.email, "Login failed - invalid credentials");
        return Err(AppError::InvalidCredentials);
    }

    let user_id = user.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    let token = state
        .jwt
        .issue(&user_id)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(user_id = %user_id, email = %user.email, role = %user.role, "User logged in");

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// Get current user info (fresh from the store, not from the token)
pub async fn me(
    State(state): State<ServerState>,
    ctx: AuthContext,
) -> AppResult<Json<UserResponse>> {
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .find_by_id(&ctx.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;
    Ok(Json(user.into()))
}
