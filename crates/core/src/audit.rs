//! Analysis audit trail.
//!
//! Score distributions are never persisted on their own — only here, alongside
//! the chosen label, and always the post-bias distribution.

use crate::types::{Analysis, CrisisSignal, EmotionScores, ResolvedEmotion};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Row type for sqlx deserialization from the `analysis_log` table.
#[derive(sqlx::FromRow)]
struct AnalysisRow {
    id: Uuid,
    text: String,
    label: String,
    scores: serde_json::Value,
    uncertain: bool,
    crisis: bool,
    crisis_reason: Option<String>,
    created_at: DateTime<Utc>,
}

/// One persisted analysis, as read back for inspection.
#[derive(Debug, Clone)]
pub struct AnalysisLogEntry {
    pub analysis: Analysis,
    pub text: String,
}

impl From<AnalysisRow> for AnalysisLogEntry {
    fn from(row: AnalysisRow) -> Self {
        let scores: EmotionScores = serde_json::from_value(row.scores).unwrap_or_default();
        Self {
            analysis: Analysis {
                id: row.id,
                resolved: ResolvedEmotion {
                    label: row.label,
                    scores,
                    uncertain: row.uncertain,
                },
                crisis: CrisisSignal {
                    flagged: row.crisis,
                    reason: row.crisis_reason,
                },
                created_at: row.created_at,
            },
            text: row.text,
        }
    }
}

/// Persist one analysis outcome with its input text.
pub async fn record_analysis(
    pool: &PgPool,
    analysis: &Analysis,
    text: &str,
) -> Result<(), sqlx::Error> {
    let scores = serde_json::to_value(&analysis.resolved.scores).unwrap_or_default();
    sqlx::query(
        "INSERT INTO analysis_log (id, text, label, scores, uncertain, crisis, crisis_reason, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(analysis.id)
    .bind(text)
    .bind(&analysis.resolved.label)
    .bind(&scores)
    .bind(analysis.resolved.uncertain)
    .bind(analysis.crisis.flagged)
    .bind(&analysis.crisis.reason)
    .bind(analysis.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Most recent analyses, newest first.
pub async fn fetch_recent(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<AnalysisLogEntry>, sqlx::Error> {
    let rows: Vec<AnalysisRow> = sqlx::query_as(
        "SELECT id, text, label, scores, uncertain, crisis, crisis_reason, created_at
         FROM analysis_log ORDER BY created_at DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}
