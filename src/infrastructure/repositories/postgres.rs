use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, Pool, Postgres, postgres::PgPoolOptions};

use crate::domain::{
    models::{DeliveryLogRecord, DeliveryStatus},
    repositories::{DeliveryLogRepository, LogMapper},
};

pub type PgPool = Pool<Postgres>;

pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}

#[derive(Clone)]
pub struct PostgresDeliveryLogRepository {
    pool: PgPool,
}

impl PostgresDeliveryLogRepository {
    pub fn new(pool: PgPool) -> Arc<Self> {
        Arc::new(Self { pool })
    }
}

#[async_trait]
impl DeliveryLogRepository for PostgresDeliveryLogRepository {
    async fn write(
        &self,
        category: &str,
        event: &Value,
        mapper: LogMapper<'_>,
    ) -> anyhow::Result<DeliveryLogRecord> {
        let record = mapper(event)?;
        sqlx::query(
            r#"
            INSERT INTO delivery_log (
                id, category, post_id, sender_number, recipient_number,
                message_content, status, retry_count, raw_event, updated_at
            )
            VALUES (gen_random_uuid(), $1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(category)
        .bind(&record.post_id)
        .bind(&record.sender_number)
        .bind(&record.recipient_number)
        .bind(&record.message_content)
        .bind(record.status.as_str())
        .bind(record.retry_count as i32)
        .bind(sqlx::types::Json(event.clone()))
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    async fn list_recent(
        &self,
        category: &str,
        limit: u32,
    ) -> anyhow::Result<Vec<DeliveryLogRecord>> {
        let rows = sqlx::query_as::<_, DeliveryLogRow>(
            r#"
            SELECT post_id, sender_number, recipient_number, message_content,
                   status, retry_count, updated_at
            FROM delivery_log
            WHERE category = $1
            ORDER BY updated_at DESC
            LIMIT $2
            "#,
        )
        .bind(category)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(DeliveryLogRecord::try_from).collect()
    }
}

#[derive(FromRow)]
struct DeliveryLogRow {
    post_id: String,
    sender_number: Option<String>,
    recipient_number: String,
    message_content: String,
    status: String,
    retry_count: i32,
    updated_at: DateTime<Utc>,
}

impl TryFrom<DeliveryLogRow> for DeliveryLogRecord {
    type Error = anyhow::Error;

    fn try_from(value: DeliveryLogRow) -> Result<Self, Self::Error> {
        let status = DeliveryStatus::from_str(&value.status)
            .ok_or_else(|| anyhow::anyhow!("unknown delivery status {}", value.status))?;
        Ok(Self {
            post_id: value.post_id,
            sender_number: value.sender_number,
            recipient_number: value.recipient_number,
            message_content: value.message_content,
            status,
            retry_count: value.retry_count.max(0) as u32,
            updated_at: value.updated_at,
        })
    }
}
