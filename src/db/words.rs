//! Words database operations

use crate::db::models::{WordRecord, LANGUAGE, SOURCE};
use crate::db::DbPool;
use crate::error::Result;
use crate::frequency::FrequencyInfo;
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::Row;

/// Storage seam used by the batch processor
#[async_trait]
pub trait WordStore: Send + Sync {
    /// Up to `limit` pending words, oldest first
    async fn select_pending(&self, limit: usize) -> Result<Vec<String>>;

    /// Write `info` for `word`; `Ok(false)` when no row matched
    async fn update_info(&self, word: &str, info: &FrequencyInfo) -> Result<bool>;
}

/// PostgreSQL-backed [`WordStore`]
#[derive(Clone)]
pub struct PgWordStore {
    pool: DbPool,
}

impl PgWordStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WordStore for PgWordStore {
    async fn select_pending(&self, limit: usize) -> Result<Vec<String>> {
        select_pending_words(&self.pool, limit).await
    }

    async fn update_info(&self, word: &str, info: &FrequencyInfo) -> Result<bool> {
        update_word_info(&self.pool, word, info).await
    }
}

/// Fetch words still lacking frequency metadata, ordered by creation time
pub async fn select_pending_words(pool: &DbPool, limit: usize) -> Result<Vec<String>> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);

    let words = sqlx::query_scalar::<_, String>(
        r#"
        SELECT word FROM words
        WHERE language = $1
          AND source = $2
          AND info IS NULL
        ORDER BY created_at ASC
        LIMIT $3
        "#,
    )
    .bind(LANGUAGE)
    .bind(SOURCE)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(words)
}

/// Store frequency metadata for one word
///
/// Returns false when no row matched the key.
pub async fn update_word_info(pool: &DbPool, word: &str, info: &FrequencyInfo) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE words
        SET info = $4
        WHERE word = $1
          AND language = $2
          AND source = $3
        "#,
    )
    .bind(word)
    .bind(LANGUAGE)
    .bind(SOURCE)
    .bind(Json(info))
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Count pending words for progress reporting
pub async fn count_pending_words(pool: &DbPool) -> Result<i64> {
    let row = sqlx::query(
        r#"
        SELECT COUNT(*) as count FROM words
        WHERE language = $1
          AND source = $2
          AND info IS NULL
        "#,
    )
    .bind(LANGUAGE)
    .bind(SOURCE)
    .fetch_one(pool)
    .await?;

    Ok(row.get("count"))
}

/// Get a word record by its key
pub async fn get_word(pool: &DbPool, word: &str) -> Result<Option<WordRecord>> {
    let record = sqlx::query_as::<_, WordRecord>(
        r#"
        SELECT word, language, source, info, created_at FROM words
        WHERE word = $1
          AND language = $2
          AND source = $3
        "#,
    )
    .bind(word)
    .bind(LANGUAGE)
    .bind(SOURCE)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_pool_from_env;
    use crate::frequency::FrequencyResult;

    #[tokio::test]
    #[ignore] // Requires database with a seeded words table
    async fn test_update_is_idempotent_and_removes_from_pending() {
        dotenvy::dotenv().ok();
        let pool = create_pool_from_env().await.unwrap();

        let pending = select_pending_words(&pool, 1).await.unwrap();
        let Some(word) = pending.first() else {
            pool.close().await;
            return;
        };

        let info = FrequencyResult::found(Some("1.0".to_string()), Some(10.0)).to_info();
        assert!(update_word_info(&pool, word, &info).await.unwrap());
        let first = get_word(&pool, word).await.unwrap().unwrap().info;
        assert!(update_word_info(&pool, word, &info).await.unwrap());
        let second = get_word(&pool, word).await.unwrap().unwrap().info;
        assert_eq!(first, second);

        let pending = select_pending_words(&pool, 1000).await.unwrap();
        assert!(!pending.contains(word));

        pool.close().await;
    }

    #[tokio::test]
    #[ignore] // Requires database
    async fn test_update_missing_word_returns_false() {
        dotenvy::dotenv().ok();
        let pool = create_pool_from_env().await.unwrap();

        let info = FrequencyResult::not_found().to_info();
        let updated = update_word_info(&pool, "__no_such_word__", &info).await;
        assert!(!updated.unwrap());

        pool.close().await;
    }
}
