use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Campaign record; immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Campaign {
    pub id: Uuid,
    pub title: String,
    pub article: String,
    pub img: String,
    pub created_at: OffsetDateTime,
}

impl Campaign {
    pub async fn insert(
        db: &PgPool,
        title: &str,
        article: &str,
        img: &str,
    ) -> anyhow::Result<Campaign> {
        let campaign = sqlx::query_as::<_, Campaign>(
            r#"
            INSERT INTO campaigns (title, article, img)
            VALUES ($1, $2, $3)
            RETURNING id, title, article, img, created_at
            "#,
        )
        .bind(title)
        .bind(article)
        .bind(img)
        .fetch_one(db)
        .await?;
        Ok(campaign)
    }

    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<Campaign>> {
        let campaigns = sqlx::query_as::<_, Campaign>(
            r#"
            SELECT id, title, article, img, created_at
            FROM campaigns
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(campaigns)
    }
}
