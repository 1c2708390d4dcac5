use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use crate::application::ports::{MessageStore, StoreError};
use crate::domain::{Conversation, ConversationId, Message};

const SELECT_CONVERSATION: &str = r#"
    SELECT conversation_id, title, mode, messages, created_at, updated_at
    FROM conversations
"#;

/// One row per conversation; `messages` is a JSONB array so each conversation
/// is a single document and appends are one `UPDATE`.
pub struct PgMessageStore {
    pool: Option<PgPool>,
}

#[derive(sqlx::FromRow)]
struct ConversationRow {
    conversation_id: String,
    title: Option<String>,
    mode: String,
    messages: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ConversationRow> for Conversation {
    type Error = StoreError;

    fn try_from(row: ConversationRow) -> Result<Self, Self::Error> {
        let messages: Vec<Message> = serde_json::from_value(row.messages).map_err(|e| {
            StoreError::MalformedDocument(format!(
                "conversation {}: {}",
                row.conversation_id, e
            ))
        })?;

        Ok(Conversation {
            id: ConversationId::from_string(row.conversation_id),
            title: row.title,
            mode: row.mode,
            messages,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl PgMessageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool: Some(pool) }
    }

    /// A store without a connection string; every operation fails with
    /// [`StoreError::Configuration`].
    pub fn unconfigured() -> Self {
        Self { pool: None }
    }

    fn pool(&self) -> Result<&PgPool, StoreError> {
        self.pool
            .as_ref()
            .ok_or_else(|| StoreError::Configuration("database url is not set".to_string()))
    }
}

fn map_sqlx_error(error: sqlx::Error) -> StoreError {
    match &error {
        sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
            StoreError::DuplicateId(db_error.message().to_string())
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            StoreError::MalformedDocument(error.to_string())
        }
        _ => StoreError::Unavailable(error.to_string()),
    }
}

#[async_trait]
impl MessageStore for PgMessageStore {
    #[instrument(skip(self, conversation), fields(conversation_id = %conversation.id))]
    async fn insert(&self, conversation: &Conversation) -> Result<(), StoreError> {
        let messages = serde_json::to_value(&conversation.messages)
            .map_err(|e| StoreError::MalformedDocument(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO conversations (conversation_id, title, mode, messages, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(conversation.id.as_str())
        .bind(&conversation.title)
        .bind(&conversation.mode)
        .bind(messages)
        .bind(conversation.created_at)
        .bind(conversation.updated_at)
        .execute(self.pool()?)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    #[instrument(skip(self), fields(conversation_id = %id))]
    async fn find_by_conversation_id(
        &self,
        id: &ConversationId,
    ) -> Result<Option<Conversation>, StoreError> {
        let row = sqlx::query_as::<_, ConversationRow>(&format!(
            "{SELECT_CONVERSATION} WHERE conversation_id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(self.pool()?)
        .await
        .map_err(map_sqlx_error)?;

        row.map(Conversation::try_from).transpose()
    }

    #[instrument(skip(self, message), fields(conversation_id = %id, role = %message.role))]
    async fn append_message(
        &self,
        id: &ConversationId,
        message: &Message,
    ) -> Result<u64, StoreError> {
        let document = serde_json::to_value(message)
            .map_err(|e| StoreError::MalformedDocument(e.to_string()))?;

        let result = sqlx::query(
            r#"
            UPDATE conversations
            SET messages = messages || jsonb_build_array($2::jsonb),
                updated_at = $3
            WHERE conversation_id = $1
            "#,
        )
        .bind(id.as_str())
        .bind(document)
        .bind(message.timestamp)
        .execute(self.pool()?)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self, title), fields(conversation_id = %id))]
    async fn set_title_if_unset(
        &self,
        id: &ConversationId,
        title: &str,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE conversations
            SET title = $2, updated_at = $3
            WHERE conversation_id = $1 AND title IS NULL
            "#,
        )
        .bind(id.as_str())
        .bind(title)
        .bind(Utc::now())
        .execute(self.pool()?)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), fields(conversation_id = %id))]
    async fn set_mode(&self, id: &ConversationId, mode: &str) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE conversations
            SET mode = $2, updated_at = $3
            WHERE conversation_id = $1
            "#,
        )
        .bind(id.as_str())
        .bind(mode)
        .bind(Utc::now())
        .execute(self.pool()?)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn list_sorted_by_updated_desc(
        &self,
        limit: usize,
    ) -> Result<Vec<Conversation>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows = sqlx::query_as::<_, ConversationRow>(&format!(
            "{SELECT_CONVERSATION} ORDER BY updated_at DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(self.pool()?)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(Conversation::try_from).collect()
    }

    #[instrument(skip(self), fields(conversation_id = %id))]
    async fn delete(&self, id: &ConversationId) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM conversations WHERE conversation_id = $1")
            .bind(id.as_str())
            .execute(self.pool()?)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
            tracing::info!("PostgreSQL connection pool closed");
        }
    }
}
