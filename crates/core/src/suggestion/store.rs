//! Suggestion persistence: keyed lookup and idempotent upsert by canonical
//! emotion string.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// One stored suggestion document, keyed uniquely by `emotion`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionRecord {
    pub emotion: String,
    /// Ordered variant texts; one is picked at random when non-empty.
    pub suggestion_texts: Vec<String>,
    /// Legacy single-text field, used when `suggestion_texts` is empty.
    pub suggestion_text: Option<String>,
    pub category: String,
    pub language: String,
    pub updated_at: DateTime<Utc>,
}

impl SuggestionRecord {
    pub fn with_variants(
        emotion: impl Into<String>,
        suggestion_texts: Vec<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            emotion: emotion.into(),
            suggestion_texts,
            suggestion_text: None,
            category: category.into(),
            language: "tr".to_owned(),
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Listing row for admin tooling.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionSummary {
    pub emotion: String,
    pub variants: usize,
    pub category: String,
    pub language: String,
}

#[async_trait]
pub trait SuggestionStore: Send + Sync {
    async fn fetch(&self, emotion: &str) -> Result<Option<SuggestionRecord>, StoreError>;

    /// Upsert keyed on `emotion`. In append mode the stored variants become
    /// the order-preserving deduplicated union of existing and incoming
    /// texts; otherwise incoming texts replace them.
    async fn upsert(
        &self,
        record: SuggestionRecord,
        append: bool,
    ) -> Result<UpsertOutcome, StoreError>;

    async fn purge(&self) -> Result<u64, StoreError>;

    async fn list(&self, limit: i64) -> Result<Vec<SuggestionSummary>, StoreError>;
}

/// Order-preserving deduplicated union of variant texts.
pub fn merge_variants(existing: &[String], incoming: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(existing.len() + incoming.len());
    for text in existing.iter().chain(incoming) {
        if !merged.contains(text) {
            merged.push(text.clone());
        }
    }
    merged
}

// ── Postgres implementation ──

pub struct PgSuggestionStore {
    pool: PgPool,
}

impl PgSuggestionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Row type for sqlx deserialization from the `suggestion` table.
#[derive(sqlx::FromRow)]
struct SuggestionRow {
    emotion: String,
    suggestion_texts: serde_json::Value,
    suggestion_text: Option<String>,
    category: String,
    language: String,
    updated_at: DateTime<Utc>,
}

impl From<SuggestionRow> for SuggestionRecord {
    fn from(row: SuggestionRow) -> Self {
        Self {
            emotion: row.emotion,
            suggestion_texts: serde_json::from_value(row.suggestion_texts).unwrap_or_default(),
            suggestion_text: row.suggestion_text,
            category: row.category,
            language: row.language,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl SuggestionStore for PgSuggestionStore {
    async fn fetch(&self, emotion: &str) -> Result<Option<SuggestionRecord>, StoreError> {
        let row: Option<SuggestionRow> = sqlx::query_as(
            "SELECT emotion, suggestion_texts, suggestion_text, category, language, updated_at
             FROM suggestion WHERE emotion = $1",
        )
        .bind(emotion)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }

    async fn upsert(
        &self,
        mut record: SuggestionRecord,
        append: bool,
    ) -> Result<UpsertOutcome, StoreError> {
        let existing = self.fetch(&record.emotion).await?;
        if append {
            if let Some(existing) = &existing {
                record.suggestion_texts =
                    merge_variants(&existing.suggestion_texts, &record.suggestion_texts);
            }
        }

        let texts = serde_json::to_value(&record.suggestion_texts).unwrap_or_default();
        sqlx::query(
            "INSERT INTO suggestion (emotion, suggestion_texts, suggestion_text, category, language, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (emotion) DO UPDATE SET
                 suggestion_texts = EXCLUDED.suggestion_texts,
                 suggestion_text = EXCLUDED.suggestion_text,
                 category = EXCLUDED.category,
                 language = EXCLUDED.language,
                 updated_at = EXCLUDED.updated_at",
        )
        .bind(&record.emotion)
        .bind(&texts)
        .bind(&record.suggestion_text)
        .bind(&record.category)
        .bind(&record.language)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(if existing.is_some() {
            UpsertOutcome::Updated
        } else {
            UpsertOutcome::Inserted
        })
    }

    async fn purge(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM suggestion")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn list(&self, limit: i64) -> Result<Vec<SuggestionSummary>, StoreError> {
        let rows: Vec<SuggestionRow> = sqlx::query_as(
            "SELECT emotion, suggestion_texts, suggestion_text, category, language, updated_at
             FROM suggestion ORDER BY emotion LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(SuggestionRecord::from)
            .map(|r| SuggestionSummary {
                emotion: r.emotion,
                variants: r.suggestion_texts.len(),
                category: r.category,
                language: r.language,
            })
            .collect())
    }
}

// ── In-memory implementation (tests, ephemeral mode) ──

#[derive(Default)]
pub struct MemorySuggestionStore {
    records: RwLock<HashMap<String, SuggestionRecord>>,
}

impl MemorySuggestionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SuggestionStore for MemorySuggestionStore {
    async fn fetch(&self, emotion: &str) -> Result<Option<SuggestionRecord>, StoreError> {
        Ok(self.records.read().await.get(emotion).cloned())
    }

    async fn upsert(
        &self,
        mut record: SuggestionRecord,
        append: bool,
    ) -> Result<UpsertOutcome, StoreError> {
        let mut records = self.records.write().await;
        let outcome = match records.get(&record.emotion) {
            Some(existing) => {
                if append {
                    record.suggestion_texts =
                        merge_variants(&existing.suggestion_texts, &record.suggestion_texts);
                }
                UpsertOutcome::Updated
            }
            None => UpsertOutcome::Inserted,
        };
        records.insert(record.emotion.clone(), record);
        Ok(outcome)
    }

    async fn purge(&self) -> Result<u64, StoreError> {
        let mut records = self.records.write().await;
        let count = records.len() as u64;
        records.clear();
        Ok(count)
    }

    async fn list(&self, limit: i64) -> Result<Vec<SuggestionSummary>, StoreError> {
        let records = self.records.read().await;
        let mut summaries: Vec<SuggestionSummary> = records
            .values()
            .map(|r| SuggestionSummary {
                emotion: r.emotion.clone(),
                variants: r.suggestion_texts.len(),
                category: r.category.clone(),
                language: r.language.clone(),
            })
            .collect();
        summaries.sort_by(|a, b| a.emotion.cmp(&b.emotion));
        summaries.truncate(limit.max(0) as usize);
        Ok(summaries)
    }
}
