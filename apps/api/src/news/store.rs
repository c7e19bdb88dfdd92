use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::news::NewsItem;

/// Clears and bulk-inserts the collection in one transaction.
pub async fn replace_all(pool: &SqlitePool, items: &[NewsItem]) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM news").execute(&mut *tx).await?;
    for item in items {
        let doc = serde_json::to_string(item).map_err(anyhow::Error::from)?;
        sqlx::query("INSERT INTO news (id, kind, timestamp, doc) VALUES (?1, ?2, ?3, ?4)")
            .bind(&item.id)
            .bind(item.kind.as_str())
            .bind(item.timestamp)
            .bind(doc)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(())
}

/// All items, newest first; capture order is the tiebreak within a batch.
pub async fn all_desc(pool: &SqlitePool) -> Result<Vec<NewsItem>, AppError> {
    let rows = sqlx::query("SELECT doc FROM news ORDER BY timestamp DESC, rowid ASC")
        .fetch_all(pool)
        .await?;
    rows.into_iter().map(|r| decode(r.get("doc"))).collect()
}

fn decode(doc: String) -> Result<NewsItem, AppError> {
    serde_json::from_str(&doc).map_err(|e| anyhow::anyhow!("corrupt news record: {e}").into())
}
