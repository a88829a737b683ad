use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::filters::{Drug, SeizureMeasure};

/// A user's saved seizure filter.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SavedFilter {
    pub id: i32,
    pub confiscari_subcategorie: String,
    pub confiscari_an: i32,
    pub tip: String,
    pub reprezentare: String,
    pub email: String,
}

/// Emergency admissions per category for one year and one filter.
pub async fn emergency_by_category(
    db: &PgPool,
    an: i32,
    filtru: &str,
    drug: Drug,
) -> anyhow::Result<Vec<(String, Option<f64>)>> {
    // The drug column comes from the allow-list enum, never from raw input.
    let sql = format!(
        "SELECT categorie, {} FROM urgente WHERE an = $1 AND filtru = $2",
        drug.column()
    );
    let rows = sqlx::query_as::<_, (String, Option<f64>)>(&sql)
        .bind(an)
        .bind(filtru)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

/// Emergency admissions over a year range for one category.
pub async fn emergency_interval(
    db: &PgPool,
    start_year: i32,
    end_year: i32,
    categorie: Option<&str>,
    drug: Drug,
) -> anyhow::Result<Vec<(i32, String, Option<f64>)>> {
    let sql = format!(
        "SELECT an, filtru, {} FROM urgente WHERE an BETWEEN $1 AND $2 AND categorie = $3",
        drug.column()
    );
    let rows = sqlx::query_as::<_, (i32, String, Option<f64>)>(&sql)
        .bind(start_year)
        .bind(end_year)
        .bind(categorie)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

/// Seized quantities over a year range for one drug.
pub async fn seizures_interval(
    db: &PgPool,
    start_year: i32,
    end_year: i32,
    drog: &str,
    measure: SeizureMeasure,
) -> anyhow::Result<Vec<(i32, Option<f64>)>> {
    let sql = format!(
        "SELECT an, {} FROM confiscari WHERE an BETWEEN $1 AND $2 AND drog = $3",
        measure.column()
    );
    let rows = sqlx::query_as::<_, (i32, Option<f64>)>(&sql)
        .bind(start_year)
        .bind(end_year)
        .bind(drog)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

/// Offence counts over a year range, optionally narrowed by a sub-filter.
pub async fn offences_interval(
    db: &PgPool,
    start_year: i32,
    end_year: i32,
    categorie: &str,
    filtru: Option<&str>,
    subfiltru: Option<&str>,
) -> anyhow::Result<Vec<(i32, Option<f64>)>> {
    let rows = if let Some(sub) = subfiltru {
        sqlx::query_as::<_, (i32, Option<f64>)>(
            r#"
            SELECT an, valoare FROM infractiuni
            WHERE an BETWEEN $1 AND $2 AND categorie = $3 AND filtru = $4 AND subfiltru = $5
            "#,
        )
        .bind(start_year)
        .bind(end_year)
        .bind(categorie)
        .bind(filtru)
        .bind(sub)
        .fetch_all(db)
        .await?
    } else {
        sqlx::query_as::<_, (i32, Option<f64>)>(
            r#"
            SELECT an, valoare FROM infractiuni
            WHERE an BETWEEN $1 AND $2 AND categorie = $3 AND filtru = $4
            "#,
        )
        .bind(start_year)
        .bind(end_year)
        .bind(categorie)
        .bind(filtru)
        .fetch_all(db)
        .await?
    };
    Ok(rows)
}

/// Check-then-insert; an identical row already on file suppresses the insert
/// and returns `None`. The race window under concurrent saves is accepted.
pub async fn save_filter(
    db: &PgPool,
    categorie: &str,
    an: i32,
    tip: &str,
    reprezentare: &str,
    email: &str,
) -> anyhow::Result<Option<SavedFilter>> {
    let existing = sqlx::query_as::<_, SavedFilter>(
        r#"
        SELECT id, confiscari_subcategorie, confiscari_an, tip, reprezentare, email
        FROM filtru_confiscari
        WHERE confiscari_subcategorie = $1
          AND confiscari_an = $2
          AND tip = $3
          AND reprezentare = $4
          AND email = $5
        "#,
    )
    .bind(categorie)
    .bind(an)
    .bind(tip)
    .bind(reprezentare)
    .bind(email)
    .fetch_optional(db)
    .await?;

    if existing.is_some() {
        return Ok(None);
    }

    let inserted = sqlx::query_as::<_, SavedFilter>(
        r#"
        INSERT INTO filtru_confiscari (confiscari_subcategorie, confiscari_an, tip, reprezentare, email)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, confiscari_subcategorie, confiscari_an, tip, reprezentare, email
        "#,
    )
    .bind(categorie)
    .bind(an)
    .bind(tip)
    .bind(reprezentare)
    .bind(email)
    .fetch_one(db)
    .await?;

    Ok(Some(inserted))
}
