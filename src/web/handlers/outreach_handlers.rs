// src/web/handlers/outreach_handlers.rs
//! Outreach-kit generation handler
use crate::auth::AuthenticatedUser;
use crate::database::DatabaseConfig;
use crate::extraction::ExtractionClient;
use crate::history::SearchHistory;
use crate::outreach::OutreachBundle;
use crate::session::SessionStore;
use crate::utils::{format_file_size, validate_job_url};
use crate::web::types::{
    DataResponse, GenerateRequest, StandardErrorResponse, StandardRequest,
};

use chrono::Utc;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

pub async fn generate_handler(
    request: Json<StandardRequest<GenerateRequest>>,
    auth: AuthenticatedUser,
    extraction: &State<ExtractionClient>,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<OutreachBundle>>, Json<StandardErrorResponse>> {
    let user = auth.user();

    if let Some(resume) = &request.data.resume_file {
        // Metadata only; the file itself stays on the client.
        info!(
            "Resume context attached: {} ({}, {})",
            resume.name,
            format_file_size(resume.size),
            resume.content_type
        );
    }

    // Validation gates the outbound call: a bad URL never reaches the
    // extraction service.
    let job_url = match validate_job_url(&request.data.job_url) {
        Ok(url) => url,
        Err(message) => {
            info!(
                "Rejected invalid job URL from {}: {:?}",
                user.email, request.data.job_url
            );
            return Err(Json(StandardErrorResponse::new(
                message.to_string(),
                "INVALID_URL".to_string(),
                vec![
                    "Paste the full job posting URL, including https://".to_string(),
                    "Check the link opens in your browser first".to_string(),
                ],
            )));
        }
    };

    info!("Generating outreach kit for {}: {}", user.email, job_url);

    let output = extraction.extract(job_url.as_str()).await;
    let bundle = OutreachBundle::from_extraction(output);

    if let Err(e) = persist_bundle(db_config, auth.user_id(), &bundle).await {
        error!("Failed to persist outreach bundle: {}", e);
        return Err(Json(StandardErrorResponse::new(
            "Failed to generate outreach kit. Please try again.".to_string(),
            "STORAGE_ERROR".to_string(),
            vec!["Try again in a few moments".to_string()],
        )));
    }

    Ok(Json(DataResponse::success(
        "Outreach kit generated".to_string(),
        bundle,
    )))
}

/// Store the new active bundle and record it in the bounded history.
async fn persist_bundle(
    db_config: &DatabaseConfig,
    user_id: &str,
    bundle: &OutreachBundle,
) -> anyhow::Result<()> {
    let pool = db_config.pool()?;
    let store = SessionStore::new(pool);

    store.store_active_bundle(user_id, bundle).await?;

    let mut history: SearchHistory = store.load_history(user_id).await?;
    history.record(bundle, Utc::now());
    store.store_history(user_id, &history).await?;

    Ok(())
}
