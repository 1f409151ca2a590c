// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

use crate::auth::{AuthConfig, AuthenticatedUser, OptionalAuth};
use crate::core::ConfigManager;
use crate::database::DatabaseConfig;
use crate::extraction::ExtractionClient;
use crate::outreach::OutreachBundle;
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Request, Response, State};
use tracing::{error, info};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

// API Routes

#[post("/generate", data = "<request>")]
pub async fn generate(
    request: Json<StandardRequest<GenerateRequest>>,
    auth: AuthenticatedUser,
    extraction: &State<ExtractionClient>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<OutreachBundle>>, Json<StandardErrorResponse>> {
    handlers::generate_handler(request, auth, extraction, db_config).await
}

#[get("/history")]
pub async fn list_history(
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<Vec<HistoryEntrySummary>>>, Json<StandardErrorResponse>> {
    handlers::list_history_handler(auth, db_config).await
}

#[post("/history/load", data = "<request>")]
pub async fn load_history(
    request: Json<StandardRequest<HistoryEntryRequest>>,
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<OutreachBundle>>, Json<StandardErrorResponse>> {
    handlers::load_history_handler(request, auth, db_config).await
}

#[post("/history/delete", data = "<request>")]
pub async fn delete_history(
    request: Json<StandardRequest<HistoryEntryRequest>>,
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::delete_history_handler(request, auth, db_config).await
}

#[post("/auth/login", data = "<request>")]
pub async fn login(
    request: Json<StandardRequest<CredentialsRequest>>,
    auth_config: &State<AuthConfig>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<AuthSession>>, Json<StandardErrorResponse>> {
    handlers::login_handler(request, auth_config, db_config).await
}

#[post("/auth/signup", data = "<request>")]
pub async fn signup(
    request: Json<StandardRequest<CredentialsRequest>>,
    auth_config: &State<AuthConfig>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<AuthSession>>, Json<StandardErrorResponse>> {
    handlers::signup_handler(request, auth_config, db_config).await
}

#[get("/me")]
pub async fn get_current_user(auth: AuthenticatedUser) -> Json<DataResponse<UserInfo>> {
    handlers::get_current_user_handler(auth).await
}

#[get("/me", rank = 2)]
pub async fn get_current_user_error() -> Json<StandardErrorResponse> {
    handlers::get_current_user_error_handler().await
}

#[get("/health")]
pub async fn health(auth: OptionalAuth) -> Json<TextResponse> {
    handlers::health_handler(auth).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
    ))
}

/// Assemble the Rocket instance with all managed state and routes.
pub fn build_rocket(
    figment: rocket::figment::Figment,
    auth_config: AuthConfig,
    db_config: DatabaseConfig,
    extraction: ExtractionClient,
) -> rocket::Rocket<rocket::Build> {
    rocket::custom(figment)
        .attach(Cors)
        .manage(auth_config)
        .manage(db_config)
        .manage(extraction)
        .register("/api", catchers![bad_request, internal_error])
        .mount(
            "/api",
            routes![
                generate,
                list_history,
                load_history,
                delete_history,
                login,
                signup,
                get_current_user,
                get_current_user_error,
                health,
                options,
            ],
        )
}

// Main server start function
pub async fn start_web_server(config: ConfigManager, port: u16) -> Result<()> {
    let mut db_config = DatabaseConfig::new(config.environment.database_path.clone());

    if let Err(e) = db_config.init_pool().await {
        error!("Failed to initialize database: {}", e);
        return Err(e);
    }

    if let Err(e) = db_config.migrate().await {
        error!("Failed to run database migrations: {}", e);
        return Err(e);
    }

    let auth_config = AuthConfig::new(config.auth.mode.clone(), config.auth.jwt_secret.clone())?;
    let extraction = ExtractionClient::new(
        config.service.extraction_url.clone(),
        config.service.extraction_token.clone(),
        config.service.timeout_seconds,
    )?;

    info!("Starting Hire Loophole API server");
    info!("Database: {}", db_config.database_path.display());
    info!(
        "Auth mode: {}",
        if auth_config.is_demo() { "demo" } else { "hosted" }
    );

    let figment = rocket::Config::figment().merge(("port", port));

    let _rocket = build_rocket(figment, auth_config, db_config, extraction)
        .launch()
        .await;

    Ok(())
}
