// src/core/config_manager.rs
//! Unified configuration management - eliminates duplicate config loading

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::auth::{AuthMode, DEMO_PROVIDER_URL};

const DEFAULT_EXTRACTION_URL: &str = "https://api.logic.inc/2024-03-01/documents/\
    extract-company-and-executive-info-from-job-posting/executions";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: EnvironmentConfig,
    pub service: ServiceConfig,
    pub auth: AuthSettings,
}

#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub database_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub extraction_url: String,
    pub extraction_token: Option<String>,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub mode: AuthMode,
    pub jwt_secret: String,
}

impl ConfigManager {
    /// Load all configurations
    pub fn load() -> Result<Self> {
        let environment = Self::load_environment()?;
        let service = Self::load_service();
        let auth = Self::load_auth();

        Ok(Self {
            environment,
            service,
            auth,
        })
    }

    /// Load environment configuration
    fn load_environment() -> Result<EnvironmentConfig> {
        let env = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "local".to_string());
        info!("Loading environment configuration for: {}", env);

        let base_dir = if env == "production" {
            PathBuf::from("/app")
        } else {
            std::env::current_dir().context("Failed to get current directory")?
        };

        Ok(EnvironmentConfig {
            database_path: base_dir.join("hireloophole.db"),
        })
    }

    /// Load extraction-service configuration
    fn load_service() -> ServiceConfig {
        let extraction_url = std::env::var("EXTRACTION_API_URL")
            .unwrap_or_else(|_| DEFAULT_EXTRACTION_URL.to_string());

        // Server-side-only secret; when absent the service runs in
        // fallback-payload mode.
        let extraction_token = std::env::var("LOGIC_API_TOKEN").ok().filter(|t| !t.is_empty());
        if extraction_token.is_none() {
            warn!("LOGIC_API_TOKEN not set; extraction will serve fallback payloads");
        }

        ServiceConfig {
            extraction_url,
            extraction_token,
            timeout_seconds: 60,
        }
    }

    /// Load authentication configuration. Demo mode is active when no
    /// hosted provider is configured or the placeholder URL is used.
    fn load_auth() -> AuthSettings {
        let project_url = std::env::var("SUPABASE_URL").ok().filter(|u| !u.is_empty());
        let anon_key = std::env::var("SUPABASE_ANON_KEY").ok().filter(|k| !k.is_empty());

        let mode = match (project_url, anon_key) {
            (Some(url), Some(key)) if url != DEMO_PROVIDER_URL => AuthMode::Hosted {
                project_url: url.trim_end_matches('/').to_string(),
                anon_key: key,
            },
            _ => {
                info!("No hosted identity provider configured, running in demo mode");
                AuthMode::Demo
            }
        };

        let jwt_secret = std::env::var("SUPABASE_JWT_SECRET")
            .or_else(|_| std::env::var("AUTH_JWT_SECRET"))
            .unwrap_or_else(|_| {
                warn!("No JWT secret configured, using built-in demo secret");
                "hireloophole-demo-secret".to_string()
            });

        AuthSettings { mode, jwt_secret }
    }

    /// Ensure all required directories exist
    pub async fn ensure_directories(&self) -> Result<()> {
        if let Some(db_parent) = self.environment.database_path.parent() {
            tokio::fs::create_dir_all(db_parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", db_parent.display()))?;
        }

        Ok(())
    }
}
