//! Authentication handlers.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use quill_core::domain::User;
use quill_core::ports::{PasswordService, TokenService, VerificationSender};
use quill_shared::dto::{
    AuthResponse, ChangePasswordRequest, LoginRequest, MessageResponse, RegisterRequest,
    RegisterResponse, UpdateProfileRequest, UserResponse, VerifyRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        avatar: user.avatar.clone(),
        bio: user.bio.clone(),
        created_at: user.created_at,
    }
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    verification_sender: web::Data<Arc<dyn VerificationSender>>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name must not be empty".to_string()));
    }
    if req.email.is_empty() || !req.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    // Check if user already exists
    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    // Hash password
    let password_hash = password_service
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    // Create user with a pending verification code
    let code = quill_infra::verification::generate_code();
    let user = User::new(req.name, req.email.clone(), password_hash, code.clone());
    let saved_user = state.users.save(user).await?;

    // The code goes out through the side channel, never in the response
    verification_sender
        .send(&saved_user.email, &saved_user.name, &code)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "User registered successfully. Please verify your email.".to_string(),
        email: req.email,
    }))
}

/// POST /api/auth/verify
pub async fn verify(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    body: web::Json<VerifyRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mut user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if user.is_verified {
        return Err(AppError::BadRequest("User already verified".to_string()));
    }

    if user.verification_expired(chrono::Utc::now()) {
        return Err(AppError::BadRequest(
            "Verification code expired. Please request a new one.".to_string(),
        ));
    }

    if !user.verify(&req.code) {
        return Err(AppError::BadRequest(
            "Invalid verification code".to_string(),
        ));
    }

    let user = state.users.save(user).await?;

    let token = token_service
        .generate_token(user.id, &user.email)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds() as u64,
        user: Some(user_response(&user)),
    }))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Find user by email
    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    // Verify password
    let valid = password_service
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::Unauthorized);
    }

    if !user.is_verified {
        return Err(AppError::Forbidden(
            "Please verify your email first".to_string(),
        ));
    }

    // Generate token
    let token = token_service
        .generate_token(user.id, &user.email)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds() as u64,
        user: None,
    }))
}

/// GET /api/auth/me - Protected route
pub async fn me(identity: Identity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(user_response(&user)))
}

/// PUT /api/auth/me - Update profile
pub async fn update_profile(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mut user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    // Email change requires a fresh uniqueness check
    if let Some(email) = req.email
        && email != user.email
    {
        if state.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("Email already in use".to_string()));
        }
        user.email = email;
    }

    if let Some(name) = req.name {
        user.name = name;
    }
    if let Some(bio) = req.bio {
        user.bio = Some(bio);
    }
    if let Some(avatar) = req.avatar {
        user.avatar = Some(avatar);
    }
    user.updated_at = chrono::Utc::now();

    let user = state.users.save(user).await?;

    Ok(HttpResponse::Ok().json(user_response(&user)))
}

/// POST /api/auth/change-password
pub async fn change_password(
    identity: Identity,
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<ChangePasswordRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mut user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let valid = password_service
        .verify(&req.current_password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::BadRequest(
            "Current password is incorrect".to_string(),
        ));
    }

    if req.new_password != req.confirm_password {
        return Err(AppError::BadRequest(
            "New passwords do not match".to_string(),
        ));
    }
    if req.new_password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    user.password_hash = password_service
        .hash(&req.new_password)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    user.updated_at = chrono::Utc::now();

    state.users.save(user).await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Password changed successfully".to_string(),
    }))
}

/// POST /api/auth/logout (client should discard the token)
pub async fn logout() -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Logged out successfully".to_string(),
    }))
}
