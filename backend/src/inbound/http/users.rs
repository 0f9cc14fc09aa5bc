//! Account and ranking HTTP handlers.
//!
//! ```text
//! POST /api/v1/users/register
//! GET  /api/v1/users/me
//! GET  /api/v1/users/leaderboard?limit=
//! GET  /api/v1/users/rank
//! PUT  /api/v1/users/onboarding
//! PUT  /api/v1/users/profile
//! PUT  /api/v1/users/avatar-seed
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::User;
use crate::domain::ports::{ProfileFields, Registration, Standing};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, StandingSchema, UserSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Registration payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "ada")]
    pub username: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
}

impl From<RegisterRequest> for Registration {
    fn from(value: RegisterRequest) -> Self {
        Self {
            username: value.username,
            email: value.email,
        }
    }
}

/// Profile payload. Onboarding requires every field; profile updates apply
/// only the fields present.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    pub full_name: Option<String>,
    pub contact_number: Option<String>,
    pub branch: Option<String>,
    #[schema(minimum = 1, maximum = 4)]
    pub year: Option<u8>,
    pub college_name: Option<String>,
}

/// Avatar seed payload. A missing, null, or blank seed clears it.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvatarSeedRequest {
    #[schema(example = "lovelace")]
    pub custom_avatar_seed: Option<String>,
}

impl From<ProfileRequest> for ProfileFields {
    fn from(value: ProfileRequest) -> Self {
        Self {
            full_name: value.full_name,
            contact_number: value.contact_number,
            branch: value.branch,
            year: value.year,
            college_name: value.college_name,
        }
    }
}

/// Query string for the leaderboard.
#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<u32>,
}

/// Create an account with the starting balance and sign it in.
#[utoipa::path(
    post,
    path = "/api/v1/users/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserSchema),
        (status = 400, description = "Invalid username or email", body = ErrorSchema),
        (status = 409, description = "Username or email already taken", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/users/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let user = state.accounts.register(payload.into_inner().into()).await?;
    session.persist_user(&user.id)?;
    Ok(HttpResponse::Created().json(user))
}

/// The signed-in account.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser",
    security(("SessionCookie" = []))
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<User>> {
    let user_id = session.require_user_id()?;
    let user = state.accounts_query.current(&user_id).await?;
    Ok(web::Json(user))
}

/// Top users by points, earliest registration first on ties.
#[utoipa::path(
    get,
    path = "/api/v1/users/leaderboard",
    params(
        ("limit" = Option<u32>, Query, description = "Number of users to return, default 50")
    ),
    responses(
        (status = 200, description = "Leaderboard", body = [StandingSchema]),
        (status = 400, description = "Limit out of range", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "leaderboard",
    security([])
)]
#[get("/users/leaderboard")]
pub async fn leaderboard(
    state: web::Data<HttpState>,
    query: web::Query<LeaderboardQuery>,
) -> ApiResult<web::Json<Vec<Standing>>> {
    let standings = state.ranking.leaderboard(query.limit).await?;
    Ok(web::Json(standings))
}

/// The signed-in user's position on the leaderboard.
#[utoipa::path(
    get,
    path = "/api/v1/users/rank",
    responses(
        (status = 200, description = "Current user's standing", body = StandingSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentRank",
    security(("SessionCookie" = []))
)]
#[get("/users/rank")]
pub async fn current_rank(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Standing>> {
    let user_id = session.require_user_id()?;
    let standing = state.ranking.rank(&user_id).await?;
    Ok(web::Json(standing))
}

/// Store the full profile and mark the account onboarded.
#[utoipa::path(
    put,
    path = "/api/v1/users/onboarding",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Onboarded user", body = UserSchema),
        (status = 400, description = "Missing field or year out of range", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "completeOnboarding",
    security(("SessionCookie" = []))
)]
#[put("/users/onboarding")]
pub async fn complete_onboarding(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileRequest>,
) -> ApiResult<web::Json<User>> {
    let user_id = session.require_user_id()?;
    let user = state
        .accounts
        .complete_onboarding(&user_id, payload.into_inner().into())
        .await?;
    Ok(web::Json(user))
}

/// Change the provided profile fields.
#[utoipa::path(
    put,
    path = "/api/v1/users/profile",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Updated user", body = UserSchema),
        (status = 400, description = "Year out of range", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateProfile",
    security(("SessionCookie" = []))
)]
#[put("/users/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileRequest>,
) -> ApiResult<web::Json<User>> {
    let user_id = session.require_user_id()?;
    let user = state
        .accounts
        .update_profile(&user_id, payload.into_inner().into())
        .await?;
    Ok(web::Json(user))
}

/// Choose the seed for the generated avatar.
#[utoipa::path(
    put,
    path = "/api/v1/users/avatar-seed",
    request_body = AvatarSeedRequest,
    responses(
        (status = 200, description = "Updated user", body = UserSchema),
        (status = 400, description = "Seed too long", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateAvatarSeed",
    security(("SessionCookie" = []))
)]
#[put("/users/avatar-seed")]
pub async fn update_avatar_seed(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AvatarSeedRequest>,
) -> ApiResult<web::Json<User>> {
    let user_id = session.require_user_id()?;
    let user = state
        .accounts
        .update_avatar_seed(&user_id, payload.into_inner().custom_avatar_seed)
        .await?;
    Ok(web::Json(user))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
