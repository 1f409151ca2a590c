// src/database.rs
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct DatabaseConfig {
    pub database_path: PathBuf,
    pub pool: Option<SqlitePool>,
}

impl DatabaseConfig {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            database_path,
            pool: None,
        }
    }

    /// Initialize the database connection pool
    pub async fn init_pool(&mut self) -> Result<()> {
        if let Some(parent) = self.database_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create database directory")?;
        }

        let database_url = format!("sqlite:{}?mode=rwc", self.database_path.display());
        let pool = SqlitePool::connect(&database_url)
            .await
            .context("Failed to connect to SQLite database")?;
        self.pool = Some(pool);

        info!("Database connection pool initialized: {}", database_url);
        Ok(())
    }

    /// Get the database pool
    pub fn pool(&self) -> Result<&SqlitePool> {
        self.pool
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Database pool not initialized. Call init_pool() first."))
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        let pool = self.pool()?;
        run_migrations(pool).await
    }
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_users_email
        ON users(email);
        "#,
    )
    .execute(pool)
    .await?;

    // Per-user JSON blobs under fixed keys (active bundle, history list).
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS client_state (
            user_id TEXT NOT NULL,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            PRIMARY KEY (user_id, key)
        );
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database migrations completed successfully");
    Ok(())
}

pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, created_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by id
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Create a new user with the given id (provider subject or generated)
    pub async fn create(&self, id: &str, email: &str) -> Result<User> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO users (id, email, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(now)
        .execute(self.pool)
        .await?;

        info!("Created user {} ({})", id, email);
        Ok(User {
            id: id.to_string(),
            email: email.to_string(),
            created_at: now,
        })
    }

    /// Get the user for an email, creating a record on first sight.
    pub async fn get_or_create_by_email(&self, email: &str) -> Result<User> {
        if let Some(user) = self.find_by_email(email).await? {
            return Ok(user);
        }
        self.create(&Uuid::new_v4().to_string(), email).await
    }

    /// Get the user for a provider subject, creating a record on first
    /// sight. An existing row for the same email keeps its id.
    pub async fn get_or_create(&self, id: &str, email: &str) -> Result<User> {
        if let Some(user) = self.find_by_id(id).await? {
            return Ok(user);
        }
        if let Some(user) = self.find_by_email(email).await? {
            return Ok(user);
        }
        self.create(id, email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> SqlitePool {
        // One connection: each in-memory SQLite connection is its own db.
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_get_or_create_by_email_is_stable() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        let first = repo.get_or_create_by_email("jane@example.com").await.unwrap();
        let second = repo.get_or_create_by_email("jane@example.com").await.unwrap();
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_get_or_create_prefers_existing_email_row() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        let demo = repo.get_or_create_by_email("jane@example.com").await.unwrap();
        let hosted = repo
            .get_or_create("provider-sub-1", "jane@example.com")
            .await
            .unwrap();
        assert_eq!(demo.id, hosted.id);
    }
}
