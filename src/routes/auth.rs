use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use validator::Validate;

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        common::MessageResponse,
    },
    error::AppError,
    services::auth_service,
    state::SharedState,
};

/// Routes handling account registration and login.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Create a new user account.
#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = MessageResponse),
        (status = 400, description = "Missing fields or duplicate username")
    )
)]
pub async fn register(
    State(state): State<SharedState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    payload.validate()?;
    let username = payload.username.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    auth_service::register(&state, username, password).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully")),
    ))
}

/// Authenticate a user and return its opaque identifier.
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<SharedState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user_id = auth_service::login(&state, payload.username, payload.password).await?;
    Ok(Json(LoginResponse::new(user_id)))
}
