//! Users API handlers.
//!
//! ```text
//! POST /api/v1/users/register {"username":"ada","email":"ada@example.com","password":"secret"}
//! POST /api/v1/users/login {"email":"ada@example.com","password":"secret"}
//! POST /api/v1/users/logout
//! GET /api/v1/users/{id}
//! PUT /api/v1/users/{id} {"username":"countess"}
//! POST /api/v1/users/{id}/change-password {"oldPassword":"secret","newPassword":"secret2"}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::ports::BEARER_TOKEN_TYPE;
use crate::domain::{
    Error, LoginCredentials, PasswordChange, ProfileUpdate, Registration, User, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, credentials_error, parse_uuid};

const PASSWORD_UPDATED: &str = "Password updated successfully";

/// Registration request body for `POST /api/v1/users/register`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "ada")]
    pub username: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "secret1")]
    pub password: String,
}

/// Login request body for `POST /api/v1/users/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub password: String,
}

/// Successful login payload.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[schema(value_type = UserSchema)]
    pub user: User,
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
}

/// Partial profile update for `PUT /api/v1/users/{id}`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Body for `POST /api/v1/users/{id}/change-password`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Confirmation message returned by password changes.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DetailResponse {
    #[schema(example = "Password updated successfully")]
    pub detail: String,
}

fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    parse_uuid(raw, FieldName::new("id")).map(UserId::from_uuid)
}

/// Create a user account.
#[utoipa::path(
    post,
    path = "/api/v1/users/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Username or email taken", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        username,
        email,
        password,
    } = payload.into_inner();
    let registration = Registration::try_from_parts(&username, &email, &password)
        .map_err(|err| credentials_error(&err))?;
    let user = state.accounts.register(&registration).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Authenticate by email and password, establish a session and issue an
/// access token.
#[utoipa::path(
    post,
    path = "/api/v1/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse, headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error")
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/users/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials = LoginCredentials::try_from_parts(&payload.email, &payload.password)
        .map_err(|err| credentials_error(&err))?;
    let authenticated = state.login.authenticate(&credentials).await?;
    session.persist_user(authenticated.user.id())?;
    info!(user_id = %authenticated.user.id(), "session established");
    Ok(web::Json(LoginResponse {
        user: authenticated.user,
        access_token: authenticated.access_token.token,
        token_type: BEARER_TOKEN_TYPE.to_owned(),
    }))
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/v1/users/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout"
)]
#[post("/users/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Fetch a user by id.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser",
    security([])
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let user_id = parse_user_id(&path)?;
    let user = state.profile.fetch_user(&user_id).await?;
    Ok(web::Json(user))
}

/// Update the session user's username and/or email.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Another user's profile", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Username or email taken", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<web::Json<User>> {
    let user_id = parse_user_id(&path)?;
    session.require_user(&user_id)?;
    let update =
        ProfileUpdate::try_from_parts(payload.username.as_deref(), payload.email.as_deref())
            .map_err(|err| credentials_error(&err))?;
    let user = state.accounts.update_profile(&user_id, &update).await?;
    Ok(web::Json(user))
}

/// Replace the session user's password after checking the old one.
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/change-password",
    params(("id" = String, Path, description = "User id")),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = DetailResponse),
        (status = 400, description = "Invalid request or wrong old password", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Another user's account", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "changePassword"
)]
#[post("/users/{id}/change-password")]
pub async fn change_password(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ChangePasswordRequest>,
) -> ApiResult<web::Json<DetailResponse>> {
    let user_id = parse_user_id(&path)?;
    session.require_user(&user_id)?;
    let change = PasswordChange::try_from_parts(&payload.old_password, &payload.new_password)
        .map_err(|err| credentials_error(&err))?;
    state.accounts.change_password(&user_id, &change).await?;
    Ok(web::Json(DetailResponse {
        detail: PASSWORD_UPDATED.to_owned(),
    }))
}
