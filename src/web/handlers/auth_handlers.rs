// src/web/handlers/auth_handlers.rs
//! Sign-in/sign-up, in demo mode or delegated to the hosted provider
use crate::auth::{AuthConfig, AuthenticatedUser};
use crate::database::{DatabaseConfig, UserRepository};
use crate::web::types::{
    AuthSession, CredentialsRequest, DataResponse, StandardErrorResponse, StandardRequest,
    UserInfo,
};

use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

fn auth_error(message: String) -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        message,
        "AUTH_ERROR".to_string(),
        vec![
            "Check your email and password".to_string(),
            "Sign up first if you don't have an account".to_string(),
        ],
    ))
}

pub async fn login_handler(
    request: Json<StandardRequest<CredentialsRequest>>,
    auth_config: &State<AuthConfig>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<AuthSession>>, Json<StandardErrorResponse>> {
    sign_in_or_up(request, auth_config, db_config, false).await
}

pub async fn signup_handler(
    request: Json<StandardRequest<CredentialsRequest>>,
    auth_config: &State<AuthConfig>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<AuthSession>>, Json<StandardErrorResponse>> {
    sign_in_or_up(request, auth_config, db_config, true).await
}

async fn sign_in_or_up(
    request: Json<StandardRequest<CredentialsRequest>>,
    auth_config: &State<AuthConfig>,
    db_config: &State<DatabaseConfig>,
    signup: bool,
) -> Result<Json<DataResponse<AuthSession>>, Json<StandardErrorResponse>> {
    let email = request.data.email.trim().to_lowercase();
    if email.is_empty() {
        return Err(auth_error("Email is required".to_string()));
    }

    let pool = match db_config.pool() {
        Ok(pool) => pool,
        Err(e) => {
            error!("Database unavailable during auth: {}", e);
            return Err(auth_error("Service temporarily unavailable".to_string()));
        }
    };
    let repo = UserRepository::new(pool);

    if auth_config.is_demo() {
        // Demo mode: any credentials are accepted, sign-up and sign-in
        // behave the same.
        info!("Demo {} for {}", if signup { "signup" } else { "login" }, email);

        let user = repo
            .get_or_create_by_email(&email)
            .await
            .map_err(|e| auth_error(format!("Failed to create demo user: {}", e)))?;
        let token = auth_config
            .issue_token(&user)
            .map_err(|e| auth_error(format!("Failed to issue token: {}", e)))?;

        return Ok(Json(DataResponse::success(
            "Signed in (demo mode)".to_string(),
            AuthSession {
                token,
                user: UserInfo::from(&user),
            },
        )));
    }

    let session = if signup {
        auth_config.hosted_sign_up(&email, &request.data.password).await
    } else {
        auth_config.hosted_sign_in(&email, &request.data.password).await
    };

    let session = match session {
        Ok(session) => session,
        Err(e) => {
            info!("Hosted auth rejected {}: {}", email, e);
            return Err(auth_error(e.to_string()));
        }
    };

    let user = repo
        .get_or_create(&session.user.id, &session.user.email)
        .await
        .map_err(|e| auth_error(format!("Failed to store user: {}", e)))?;

    Ok(Json(DataResponse::success(
        "Signed in".to_string(),
        AuthSession {
            token: session.access_token,
            user: UserInfo::from(&user),
        },
    )))
}

pub async fn get_current_user_handler(
    auth: AuthenticatedUser,
) -> Json<DataResponse<UserInfo>> {
    let user = auth.user();
    Json(DataResponse::success(
        format!("User authenticated: {}", user.email),
        UserInfo::from(user),
    ))
}

pub async fn get_current_user_error_handler() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Authentication required".to_string(),
        "AUTHORIZATION_ERROR".to_string(),
        vec![
            "Login is required".to_string(),
            "Send the token as an Authorization: Bearer header".to_string(),
        ],
    ))
}
