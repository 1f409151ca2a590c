// src/web/handlers/system_handlers.rs
use crate::auth::OptionalAuth;
use crate::web::types::TextResponse;

use rocket::serde::json::Json;
use tracing::info;

pub async fn health_handler(auth: OptionalAuth) -> Json<TextResponse> {
    if let Some(user) = auth.user {
        info!("Health check by authenticated user: {}", user.email());
    } else {
        info!("Health check by anonymous user");
    }
    Json(TextResponse::success("OK".to_string()))
}
