//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;
use std::sync::Arc;

use crate::domain::entities::{LinkRecord, NewLink, VisitEvent};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Row shape shared by every query that returns a link.
#[derive(sqlx::FromRow)]
struct LinkRow {
    short_id: String,
    redirect_url: String,
    visit_history: Json<Vec<VisitEvent>>,
}

impl From<LinkRow> for LinkRecord {
    fn from(row: LinkRow) -> Self {
        LinkRecord {
            short_id: row.short_id,
            redirect_url: row.redirect_url,
            visit_history: row.visit_history.0,
        }
    }
}

/// PostgreSQL repository for link records.
///
/// Visit history lives in a JSONB array on the link row. Appends are a single
/// `UPDATE ... RETURNING` that also stamps the visit, so the row lock orders
/// concurrent visits and the returned row already contains the new event.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<LinkRecord, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (short_id, redirect_url)
            VALUES ($1, $2)
            RETURNING short_id, redirect_url, visit_history
            "#,
        )
        .bind(&new_link.short_id)
        .bind(&new_link.redirect_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<LinkRecord>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT short_id, redirect_url, visit_history
            FROM links
            WHERE short_id = $1
            "#,
        )
        .bind(short_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(LinkRecord::from))
    }

    async fn record_visit_and_fetch(&self, short_id: &str) -> Result<Option<LinkRecord>, AppError> {
        // GREATEST keeps the history ordered if the database clock steps back.
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            UPDATE links
            SET visit_history = visit_history || jsonb_build_array(
                jsonb_build_object(
                    'timestamp',
                    GREATEST(
                        (extract(epoch FROM clock_timestamp()) * 1000)::bigint,
                        COALESCE((visit_history -> -1 ->> 'timestamp')::bigint, 0)
                    )
                )
            )
            WHERE short_id = $1
            RETURNING short_id, redirect_url, visit_history
            "#,
        )
        .bind(short_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(LinkRecord::from))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
