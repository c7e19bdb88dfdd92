use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::profile::SemanticProfile;

/// Replaces the singleton profile in one transaction — assignment semantics,
/// with no transient window where the collection is empty.
pub async fn replace(pool: &SqlitePool, profile: &SemanticProfile) -> Result<(), AppError> {
    let doc = serde_json::to_string(profile).map_err(anyhow::Error::from)?;
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM profiles").execute(&mut *tx).await?;
    sqlx::query("INSERT INTO profiles (id, timestamp, doc) VALUES (?1, ?2, ?3)")
        .bind(&profile.id)
        .bind(profile.timestamp)
        .bind(doc)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(())
}

/// Most recent profile by analysis timestamp, if any.
pub async fn latest(pool: &SqlitePool) -> Result<Option<SemanticProfile>, AppError> {
    let row = sqlx::query("SELECT doc FROM profiles ORDER BY timestamp DESC LIMIT 1")
        .fetch_optional(pool)
        .await?;
    row.map(|r| decode(r.get("doc"))).transpose()
}

pub async fn clear(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::query("DELETE FROM profiles").execute(pool).await?;
    Ok(())
}

fn decode(doc: String) -> Result<SemanticProfile, AppError> {
    serde_json::from_str(&doc).map_err(|e| anyhow::anyhow!("corrupt profile record: {e}").into())
}
