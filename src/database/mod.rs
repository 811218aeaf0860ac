use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;

use crate::error::BotError;
use crate::models::{ChatRole, StoredMessage, User};

/// Контракт хранилища. Все операции ходят в базу напрямую,
/// никакого кэширования поверх.
#[async_trait]
pub trait Store: Send + Sync {
    async fn ensure_schema(&self) -> Result<(), BotError>;
    async fn get_or_create_user(&self, user_id: i64) -> Result<User, BotError>;
    async fn update_free_count(&self, user_id: i64, count: i32) -> Result<(), BotError>;
    async fn update_sub_expiry(
        &self,
        user_id: i64,
        expiry: Option<NaiveDateTime>,
    ) -> Result<(), BotError>;
    async fn update_persona(&self, user_id: i64, persona: &str) -> Result<(), BotError>;
    async fn append_message(
        &self,
        user_id: i64,
        role: ChatRole,
        content: &str,
    ) -> Result<(), BotError>;
    /// Последние `limit` сообщений в хронологическом порядке.
    async fn fetch_recent_messages(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<StoredMessage>, BotError>;
    /// Удаляет всё, кроме `keep_limit` самых новых сообщений пользователя.
    async fn trim_messages(&self, user_id: i64, keep_limit: i64) -> Result<(), BotError>;
}

#[derive(Clone, Debug)]
pub struct Database {
    pub pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self, BotError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(300))
            .connect(database_url)
            .await?;

        Ok(Database { pool })
    }
}

#[async_trait]
impl Store for Database {
    async fn ensure_schema(&self) -> Result<(), BotError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                user_id     BIGINT PRIMARY KEY,
                free_count  INT DEFAULT 0,
                sub_expiry  TIMESTAMP NULL,
                persona     TEXT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS messages (
                id SERIAL PRIMARY KEY,
                user_id BIGINT,
                role TEXT,
                content TEXT,
                created_at TIMESTAMP DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        // Колонка persona появилась позже; старые базы дополняем без потери данных
        sqlx::query("ALTER TABLE IF EXISTS users ADD COLUMN IF NOT EXISTS persona TEXT NULL")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get_or_create_user(&self, user_id: i64) -> Result<User, BotError> {
        let found = sqlx::query_as::<_, User>(
            "SELECT user_id, free_count, sub_expiry, persona FROM users WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(user) = found {
            return Ok(user);
        }

        // Идемпотентная вставка: одновременный первый контакт не падает
        sqlx::query(
            "INSERT INTO users (user_id, free_count, sub_expiry, persona) \
             VALUES ($1, 0, NULL, NULL) ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        let user = sqlx::query_as::<_, User>(
            "SELECT user_id, free_count, sub_expiry, persona FROM users WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update_free_count(&self, user_id: i64, count: i32) -> Result<(), BotError> {
        sqlx::query("UPDATE users SET free_count = $1 WHERE user_id = $2")
            .bind(count)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update_sub_expiry(
        &self,
        user_id: i64,
        expiry: Option<NaiveDateTime>,
    ) -> Result<(), BotError> {
        sqlx::query("UPDATE users SET sub_expiry = $1 WHERE user_id = $2")
            .bind(expiry)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update_persona(&self, user_id: i64, persona: &str) -> Result<(), BotError> {
        sqlx::query("UPDATE users SET persona = $1 WHERE user_id = $2")
            .bind(persona)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn append_message(
        &self,
        user_id: i64,
        role: ChatRole,
        content: &str,
    ) -> Result<(), BotError> {
        sqlx::query("INSERT INTO messages (user_id, role, content) VALUES ($1, $2, $3)")
            .bind(user_id)
            .bind(role.as_str())
            .bind(content)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn fetch_recent_messages(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<StoredMessage>, BotError> {
        let rows = sqlx::query(
            "SELECT role, content FROM messages WHERE user_id = $1 ORDER BY id DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let mut messages: Vec<StoredMessage> = rows
            .into_iter()
            .map(|row| StoredMessage {
                role: ChatRole::parse(row.get::<String, _>("role").as_str()),
                content: row.get("content"),
            })
            .collect();
        messages.reverse();
        Ok(messages)
    }

    async fn trim_messages(&self, user_id: i64, keep_limit: i64) -> Result<(), BotError> {
        sqlx::query(
            r#"
            DELETE FROM messages
            WHERE user_id = $1
              AND id IN (
                  SELECT id FROM messages
                  WHERE user_id = $1
                  ORDER BY id DESC
                  OFFSET $2
              )
            "#,
        )
        .bind(user_id)
        .bind(keep_limit)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
