// src/auth.rs
use crate::database::{DatabaseConfig, User, UserRepository};
use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::{Request, State};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// Hosted-provider URL that means "no real backend"; mirrors the demo
/// placeholder the front end shipped with.
pub const DEMO_PROVIDER_URL: &str = "https://demo.supabase.co";

const DEMO_TOKEN_TTL_HOURS: i64 = 24 * 7;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub email: String,
    pub exp: usize, // Expiration timestamp
    pub iat: usize, // Issued at timestamp
}

/// How sign-in requests are satisfied.
#[derive(Debug, Clone)]
pub enum AuthMode {
    /// Arbitrary credentials accepted; users exist only in the local
    /// database and tokens are signed locally.
    Demo,
    /// Password sign-in/sign-up delegated to a hosted identity provider.
    Hosted {
        project_url: String,
        anon_key: String,
    },
}

pub struct AuthConfig {
    pub mode: AuthMode,
    jwt_secret: String,
    client: reqwest::Client,
}

impl AuthConfig {
    pub fn new(mode: AuthMode, jwt_secret: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create auth HTTP client")?;

        Ok(Self {
            mode,
            jwt_secret,
            client,
        })
    }

    pub fn is_demo(&self) -> bool {
        matches!(self.mode, AuthMode::Demo)
    }

    /// Sign a token for a locally created demo user.
    pub fn issue_token(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            iat: now.timestamp() as usize,
            exp: (now + Duration::hours(DEMO_TOKEN_TTL_HOURS)).timestamp() as usize,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .context("Failed to sign token")
    }

    /// Verify a bearer token. Both locally issued demo tokens and hosted
    /// provider access tokens are HS256 over the configured secret.
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Hosted providers set aud to "authenticated"; demo tokens carry none.
        validation.validate_aud = false;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )?;

        Ok(token_data.claims)
    }

    /// Delegate password sign-in to the hosted provider.
    pub async fn hosted_sign_in(&self, email: &str, password: &str) -> Result<HostedSession> {
        let (project_url, anon_key) = self.hosted_credentials()?;
        let url = format!("{}/auth/v1/token?grant_type=password", project_url);
        self.hosted_password_call(&url, anon_key, email, password)
            .await
    }

    /// Delegate sign-up to the hosted provider.
    pub async fn hosted_sign_up(&self, email: &str, password: &str) -> Result<HostedSession> {
        let (project_url, anon_key) = self.hosted_credentials()?;
        let url = format!("{}/auth/v1/signup", project_url);
        self.hosted_password_call(&url, anon_key, email, password)
            .await
    }

    fn hosted_credentials(&self) -> Result<(&str, &str)> {
        match &self.mode {
            AuthMode::Hosted {
                project_url,
                anon_key,
            } => Ok((project_url.as_str(), anon_key.as_str())),
            AuthMode::Demo => anyhow::bail!("No hosted identity provider configured"),
        }
    }

    async fn hosted_password_call(
        &self,
        url: &str,
        anon_key: &str,
        email: &str,
        password: &str,
    ) -> Result<HostedSession> {
        let payload = serde_json::json!({ "email": email, "password": password });

        let response = self
            .client
            .post(url)
            .header("apikey", anon_key)
            .json(&payload)
            .send()
            .await
            .context("Identity provider request failed")?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<HostedSession>()
                .await
                .context("Failed to parse identity provider response")
        } else {
            let error_body: HostedErrorBody = response.json().await.unwrap_or_default();
            anyhow::bail!(
                "Identity provider returned {}: {}",
                status,
                error_body.message()
            )
        }
    }
}

/// Session payload returned by the hosted provider.
#[derive(Debug, Deserialize)]
pub struct HostedSession {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: HostedUser,
}

#[derive(Debug, Deserialize)]
pub struct HostedUser {
    pub id: String,
    pub email: String,
}

#[derive(Debug, Default, Deserialize)]
struct HostedErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
}

impl HostedErrorBody {
    fn message(&self) -> &str {
        self.error_description
            .as_deref()
            .or(self.msg.as_deref())
            .unwrap_or("Unknown error")
    }
}

/// Authenticated user resolved from a bearer token.
pub struct AuthenticatedUser {
    pub user: User,
}

impl AuthenticatedUser {
    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn email(&self) -> &str {
        &self.user.email
    }

    pub fn user_id(&self) -> &str {
        &self.user.id
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedUser {
    type Error = AuthError;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let auth_config = match req.guard::<&State<AuthConfig>>().await {
            Outcome::Success(config) => config,
            Outcome::Error((status, _)) => {
                return Outcome::Error((status, AuthError::DatabaseError))
            }
            Outcome::Forward(f) => return Outcome::Forward(f),
        };

        let db_config = match req.guard::<&State<DatabaseConfig>>().await {
            Outcome::Success(config) => config,
            Outcome::Error((status, _)) => {
                return Outcome::Error((status, AuthError::DatabaseError))
            }
            Outcome::Forward(f) => return Outcome::Forward(f),
        };

        // Extract Authorization header. Failures forward so lower-ranked
        // fallback routes can answer with the standard error envelope.
        let token = match req.headers().get_one("Authorization") {
            Some(header) if header.starts_with("Bearer ") => &header[7..],
            Some(_) => {
                warn!("Invalid Authorization header format");
                return Outcome::Forward(Status::Unauthorized);
            }
            None => {
                warn!("Missing Authorization header");
                return Outcome::Forward(Status::Unauthorized);
            }
        };

        let claims = match auth_config.verify_token(token) {
            Ok(claims) => claims,
            Err(e) => {
                warn!("Token verification failed: {}", e);
                return Outcome::Forward(Status::Unauthorized);
            }
        };

        let pool = match db_config.pool() {
            Ok(pool) => pool,
            Err(e) => {
                error!("Database connection failed: {}", e);
                return Outcome::Error((Status::InternalServerError, AuthError::DatabaseError));
            }
        };

        let repo = UserRepository::new(pool);
        let user = match repo.get_or_create(&claims.sub, &claims.email).await {
            Ok(user) => user,
            Err(e) => {
                error!("Failed to get or create user {}: {}", claims.email, e);
                return Outcome::Error((Status::InternalServerError, AuthError::DatabaseError));
            }
        };

        info!("User {} authenticated", user.email);
        Outcome::Success(AuthenticatedUser { user })
    }
}

/// Guard failure. Token problems forward to fallback routes instead of
/// erroring, so the only error the guard can surface is a database one.
#[derive(Debug)]
pub enum AuthError {
    DatabaseError,
}

// Optional auth guard that doesn't fail if no auth is provided
pub struct OptionalAuth {
    pub user: Option<AuthenticatedUser>,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for OptionalAuth {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match AuthenticatedUser::from_request(req).await {
            Outcome::Success(auth) => Outcome::Success(OptionalAuth { user: Some(auth) }),
            _ => Outcome::Success(OptionalAuth { user: None }),
        }
    }
}
