//! Authentication handlers

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::extractors::AuthedUser;
use super::models::{Claims, LoginRequest, RegisterRequest, TokenResponse, User};
use crate::common::{generate_user_id, safe_email_log, ApiError, AppState};

/// Access tokens expire after 30 minutes, matching the login session length
/// the frontend expects.
const ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 30;

/// POST /api/v1/users - Register a new user
///
/// Checks if the email is taken, hashes the password with Argon2id, and
/// inserts the user row.
pub async fn register(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let state = state_lock.read().await;

    if !payload.email.contains('@') {
        return Err(ApiError::ValidationError(
            "Invalid email address".to_string(),
        ));
    }
    if payload.password.len() < 8 {
        return Err(ApiError::ValidationError(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let existing: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = ?")
        .bind(&payload.email)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    if existing.is_some() {
        warn!(
            email = %safe_email_log(&payload.email),
            "Registration rejected: email already registered"
        );
        return Err(ApiError::BadRequest("Email already registered".to_string()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(payload.password.as_bytes(), &salt)
        .map_err(|e| ApiError::InternalServer(format!("Password hashing failed: {}", e)))?
        .to_string();

    let user_id = generate_user_id();
    let user: User = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, password_hash)
        VALUES (?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&user_id)
    .bind(&payload.email)
    .bind(&password_hash)
    .fetch_one(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    info!(
        user_id = %user.id,
        email = %safe_email_log(&user.email),
        "User registered"
    );

    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/v1/users/login - Authenticate a user and return an access token
pub async fn login(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let state = state_lock.read().await;

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = ?")
        .bind(&payload.email)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    // A missing user and a bad password produce the same error so login
    // attempts cannot probe which emails are registered.
    let user = match user {
        Some(u) => u,
        None => {
            warn!(
                email = %safe_email_log(&payload.email),
                "Login failed: unknown email"
            );
            return Err(ApiError::Unauthorized(
                "Incorrect email or password".to_string(),
            ));
        }
    };

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|e| ApiError::InternalServer(format!("Password hash parse error: {}", e)))?;

    if Argon2::default()
        .verify_password(payload.password.as_bytes(), &parsed_hash)
        .is_err()
    {
        warn!(user_id = %user.id, "Login failed: wrong password");
        return Err(ApiError::Unauthorized(
            "Incorrect email or password".to_string(),
        ));
    }

    let exp = (Utc::now() + Duration::minutes(ACCESS_TOKEN_EXPIRE_MINUTES)).timestamp() as usize;
    let claims = Claims {
        sub: user.id.clone(),
        exp,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(state.jwt_secret.as_bytes()),
    )
    .map_err(|e| ApiError::InternalServer(format!("Token generation failed: {}", e)))?;

    info!(user_id = %user.id, "User logged in");

    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "bearer".to_string(),
    }))
}

/// GET /api/v1/users/me - Get current user information
pub async fn me_handler(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<User>, ApiError> {
    let state = state_lock.read().await;

    tracing::debug!(
        user_id = %authed.id,
        email = %safe_email_log(&authed.email),
        "Fetching current user"
    );

    let user: User = sqlx::query_as("SELECT * FROM users WHERE id = ?")
        .bind(&authed.id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    Ok(Json(user))
}
