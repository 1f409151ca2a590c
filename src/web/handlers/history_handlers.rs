// src/web/handlers/history_handlers.rs
//! Search-history sidebar endpoints
use crate::auth::AuthenticatedUser;
use crate::database::DatabaseConfig;
use crate::history::format_relative_time;
use crate::outreach::OutreachBundle;
use crate::session::SessionStore;
use crate::web::types::{
    ActionResponse, DataResponse, HistoryEntryRequest, HistoryEntrySummary,
    StandardErrorResponse, StandardRequest,
};

use chrono::Utc;
use rocket::serde::json::Json;
use rocket::State;
use tracing::error;

fn storage_error(e: anyhow::Error) -> Json<StandardErrorResponse> {
    error!("History storage error: {}", e);
    Json(StandardErrorResponse::new(
        "Failed to access search history".to_string(),
        "STORAGE_ERROR".to_string(),
        vec!["Try again in a few moments".to_string()],
    ))
}

pub async fn list_history_handler(
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<Vec<HistoryEntrySummary>>>, Json<StandardErrorResponse>> {
    let pool = db_config.pool().map_err(storage_error)?;
    let store = SessionStore::new(pool);

    let history = store
        .load_history(auth.user_id())
        .await
        .map_err(storage_error)?;

    let now = Utc::now();
    let entries: Vec<HistoryEntrySummary> = history
        .sorted_for_display()
        .into_iter()
        .map(|entry| HistoryEntrySummary {
            relative_time: format_relative_time(entry.timestamp, now),
            id: entry.id,
            job_title: entry.job_title,
            company: entry.company,
            url: entry.url,
            timestamp: entry.timestamp,
        })
        .collect();

    Ok(Json(DataResponse::success(
        format!("{} past searches", entries.len()),
        entries,
    )))
}

/// Re-display a past search: the stored bundle becomes the active one.
/// Selector state is not part of the bundle and starts over on the client.
pub async fn load_history_handler(
    request: Json<StandardRequest<HistoryEntryRequest>>,
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<OutreachBundle>>, Json<StandardErrorResponse>> {
    let pool = db_config.pool().map_err(storage_error)?;
    let store = SessionStore::new(pool);

    let history = store
        .load_history(auth.user_id())
        .await
        .map_err(storage_error)?;

    let Some(entry) = history.find(&request.data.id) else {
        return Err(Json(StandardErrorResponse::new(
            "Past search not found".to_string(),
            "HISTORY_ENTRY_NOT_FOUND".to_string(),
            vec!["Refresh the history list".to_string()],
        )));
    };

    // A copy becomes the active bundle; deleting the history entry later
    // leaves the displayed data untouched.
    let bundle = entry.data.clone();
    store
        .store_active_bundle(auth.user_id(), &bundle)
        .await
        .map_err(storage_error)?;

    Ok(Json(DataResponse::success(
        "Past search loaded".to_string(),
        bundle,
    )))
}

pub async fn delete_history_handler(
    request: Json<StandardRequest<HistoryEntryRequest>>,
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    let pool = db_config.pool().map_err(storage_error)?;
    let store = SessionStore::new(pool);

    let mut history = store
        .load_history(auth.user_id())
        .await
        .map_err(storage_error)?;

    if !history.delete(&request.data.id) {
        return Err(Json(StandardErrorResponse::new(
            "Past search not found".to_string(),
            "HISTORY_ENTRY_NOT_FOUND".to_string(),
            vec!["Refresh the history list".to_string()],
        )));
    }

    store
        .store_history(auth.user_id(), &history)
        .await
        .map_err(storage_error)?;

    Ok(Json(ActionResponse::success(
        "Past search deleted".to_string(),
        "history_entry_deleted".to_string(),
    )))
}
