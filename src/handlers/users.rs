use axum::extract::State;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    AppState,
    auth::{self, AdminUser, AuthUser},
    error::{AppError, AppResult, ensure_valid},
    extract::{Json, Path},
    models::{
        AuthResponse, LoginRequest, MessageResponse, RegisterRequest, Role, UpdateUserRequest,
        User, UserProfile,
    },
};

const RESOURCE: &str = "User";

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".to_string())
}

fn respond_with_token(state: &AppState, user: &User) -> AppResult<Json<AuthResponse>> {
    let token = auth::issue_token(user, &state.config)
        .map_err(|e| AppError::Internal(format!("token signing failed: {e}")))?;
    Ok(Json(AuthResponse {
        token,
        user: UserProfile::from(user),
    }))
}

/// register_user
///
/// [Public Route] Creates an account with the `user` role and signs the caller in.
#[utoipa::path(
    post,
    path = "/api/users/register",
    tag = "users",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registered", body = AuthResponse),
        (status = 400, description = "Validation failed or email taken", body = MessageResponse)
    )
)]
pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    ensure_valid(&payload)?;
    if state.repo.find_user_by_email(&payload.email).await?.is_some() {
        return Err(AppError::BadRequest("User already exists".to_string()));
    }

    let password_hash = auth::hash_password(&payload.password)
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?;
    let user = state
        .repo
        .insert_user(User::new(
            payload.name,
            &payload.email,
            password_hash,
            Role::User,
            Utc::now(),
        ))
        .await?;
    tracing::info!(user_id = %user.id, "User registered");

    respond_with_token(&state, &user)
}

/// login_user
///
/// [Public Route] Exchanges email and password for a bearer token. Unknown emails and
/// wrong passwords get the same 401; deactivated accounts get 403.
#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = "users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = MessageResponse),
        (status = 403, description = "Account deactivated", body = MessageResponse)
    )
)]
pub async fn login_user(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = state
        .repo
        .find_user_by_email(&payload.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let matches = auth::verify_password(&payload.password, &user.password_hash)
        .map_err(|e| AppError::Internal(format!("stored hash unreadable: {e}")))?;
    if !matches {
        tracing::debug!(user_id = %user.id, "Password mismatch");
        return Err(invalid_credentials());
    }
    if !user.active {
        return Err(AppError::Forbidden("Account is deactivated".to_string()));
    }

    respond_with_token(&state, &user)
}

/// get_me
///
/// [Authenticated Route] The caller's own profile.
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "users",
    responses(
        (status = 200, description = "Current user", body = UserProfile),
        (status = 401, description = "Not authenticated", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn get_me(
    AuthUser { id, .. }: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<UserProfile>> {
    state
        .repo
        .get_user(id)
        .await?
        .map(|u| Json(UserProfile::from(&u)))
        .ok_or(AppError::NotFound(RESOURCE))
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses((status = 200, description = "All accounts, oldest first", body = [UserProfile])),
    security(("bearer" = []))
)]
pub async fn list_users(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserProfile>>> {
    let users = state.repo.list_users().await?;
    Ok(Json(users.iter().map(UserProfile::from).collect()))
}

/// update_user
///
/// [Admin Route] Renames, promotes/demotes or (de)activates an account. An admin cannot
/// demote or deactivate themself, so the back office always keeps one working admin.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated", body = UserProfile),
        (status = 400, description = "Validation failed or self-lockout", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn update_user(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> AppResult<Json<UserProfile>> {
    ensure_valid(&payload)?;
    if admin.id == id && (payload.role == Some(Role::User) || payload.active == Some(false)) {
        return Err(AppError::BadRequest(
            "You cannot remove your own admin access".to_string(),
        ));
    }

    let mut user = state
        .repo
        .get_user(id)
        .await?
        .ok_or(AppError::NotFound(RESOURCE))?;
    payload.apply(&mut user);
    user.updated_at = Utc::now();

    state
        .repo
        .save_user(user)
        .await?
        .map(|u| Json(UserProfile::from(&u)))
        .ok_or(AppError::NotFound(RESOURCE))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Removed", body = MessageResponse),
        (status = 400, description = "Self-deletion", body = MessageResponse),
        (status = 404, description = "Not found", body = MessageResponse)
    ),
    security(("bearer" = []))
)]
pub async fn delete_user(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    if admin.id == id {
        return Err(AppError::BadRequest(
            "You cannot delete your own account".to_string(),
        ));
    }
    if !state.repo.delete_user(id).await? {
        return Err(AppError::NotFound(RESOURCE));
    }
    Ok(Json(MessageResponse::new(format!("{RESOURCE} removed"))))
}
