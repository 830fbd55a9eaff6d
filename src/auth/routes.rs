//! Authentication routes

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `POST /api/v1/users` - Register a new user
/// - `POST /api/v1/users/login` - Authenticate and obtain a JWT
/// - `GET /api/v1/users/me` - Get current user information
pub fn auth_routes() -> Router {
    Router::new()
        .route("/api/v1/users", post(handlers::register))
        .route("/api/v1/users/login", post(handlers::login))
        .route("/api/v1/users/me", get(handlers::me_handler))
}
