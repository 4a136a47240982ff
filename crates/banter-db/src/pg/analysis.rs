//! PostgreSQL analysis repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::AnalysisRow;
use crate::repo::{AnalysisRepository, CreateAnalysis};

/// PostgreSQL analysis repository
#[derive(Clone)]
pub struct PgAnalysisRepository {
    pool: PgPool,
}

impl PgAnalysisRepository {
    /// Create a new analysis repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalysisRepository for PgAnalysisRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<AnalysisRow>> {
        let analysis = sqlx::query_as::<_, AnalysisRow>(
            r#"
            SELECT id, user_id, kind, conversation_text, image_base64,
                   context_hint, image_context, tone, goal, analysis,
                   suggestions, raw_response, tier, created_at
            FROM analyses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(analysis)
    }

    async fn list_recent(&self, user_id: Uuid, limit: i64) -> DbResult<Vec<AnalysisRow>> {
        let analyses = sqlx::query_as::<_, AnalysisRow>(
            r#"
            SELECT id, user_id, kind, conversation_text, image_base64,
                   context_hint, image_context, tone, goal, analysis,
                   suggestions, raw_response, tier, created_at
            FROM analyses
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(analyses)
    }

    async fn create(&self, analysis: CreateAnalysis) -> DbResult<AnalysisRow> {
        let row = sqlx::query_as::<_, AnalysisRow>(
            r#"
            INSERT INTO analyses (id, user_id, kind, conversation_text, image_base64,
                                  context_hint, image_context, tone, goal, analysis,
                                  suggestions, raw_response, tier)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id, user_id, kind, conversation_text, image_base64,
                      context_hint, image_context, tone, goal, analysis,
                      suggestions, raw_response, tier, created_at
            "#,
        )
        .bind(analysis.id)
        .bind(analysis.user_id)
        .bind(&analysis.kind)
        .bind(&analysis.conversation_text)
        .bind(&analysis.image_base64)
        .bind(&analysis.context_hint)
        .bind(&analysis.image_context)
        .bind(&analysis.tone)
        .bind(&analysis.goal)
        .bind(&analysis.analysis)
        .bind(&analysis.suggestions)
        .bind(&analysis.raw_response)
        .bind(&analysis.tier)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}
