//! Authentication routes: login, sign-up, logout.

use axum::{extract::State, Json};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    CookieJar,
};
use serde::Serialize;
use validator::Validate;

use crate::errors::{ApiResponse, AppError, Status};
use crate::middleware::auth::SESSION_COOKIE;
use crate::middleware::form::FormData;
use crate::models::user::{LoginForm, SignupForm};
use crate::services::auth::{self as auth_service, SessionToken};
use crate::AppState;

/// Login envelope: `{status, message}` plus the session token for Bearer clients.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub envelope: ApiResponse,
    #[serde(flatten)]
    pub session: SessionToken,
}

/// POST /login — verify credentials, set the session cookie, and return the token.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    FormData(form): FormData<LoginForm>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let session = auth_service::login(
        &state.db,
        &form.username,
        &form.password,
        &state.config.session_secret,
        state.config.session_expiry_secs,
    )
    .await?;

    let cookie = Cookie::build((SESSION_COOKIE, session.token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    let body = LoginResponse {
        envelope: ApiResponse {
            status: Status::Success,
            message: "Logged in successfully".to_string(),
        },
        session,
    };
    Ok((jar.add(cookie), Json(body)))
}

/// POST /signup — create an account.
pub async fn signup(
    State(state): State<AppState>,
    FormData(form): FormData<SignupForm>,
) -> Result<Json<ApiResponse>, AppError> {
    form.validate()?;
    auth_service::create_user(&state.db, &form.username, &form.password).await?;
    Ok(ApiResponse::success("Account created successfully"))
}

/// GET /logout — drop the session cookie.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<ApiResponse>) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, ApiResponse::success("Logged out successfully"))
}
