use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::lead::Lead;

/// Clears and bulk-inserts the collection in one transaction.
pub async fn replace_all(pool: &SqlitePool, leads: &[Lead]) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM leads").execute(&mut *tx).await?;
    for lead in leads {
        let doc = serde_json::to_string(lead).map_err(anyhow::Error::from)?;
        sqlx::query("INSERT INTO leads (id, status, timestamp, doc) VALUES (?1, ?2, ?3, ?4)")
            .bind(&lead.id)
            .bind(lead.status.as_str())
            .bind(lead.timestamp)
            .bind(doc)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(())
}

/// All leads, newest first. Leads captured in the same refresh share a
/// timestamp; rowid keeps their discovery order as the tiebreak.
pub async fn all_desc(pool: &SqlitePool) -> Result<Vec<Lead>, AppError> {
    let rows = sqlx::query("SELECT doc FROM leads ORDER BY timestamp DESC, rowid ASC")
        .fetch_all(pool)
        .await?;
    rows.into_iter().map(|r| decode(r.get("doc"))).collect()
}

pub async fn get(pool: &SqlitePool, id: &str) -> Result<Option<Lead>, AppError> {
    let row = sqlx::query("SELECT doc FROM leads WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(|r| decode(r.get("doc"))).transpose()
}

/// Rewrites an existing lead in place (status and outreach patches).
pub async fn put(pool: &SqlitePool, lead: &Lead) -> Result<(), AppError> {
    let doc = serde_json::to_string(lead).map_err(anyhow::Error::from)?;
    sqlx::query("UPDATE leads SET status = ?1, timestamp = ?2, doc = ?3 WHERE id = ?4")
        .bind(lead.status.as_str())
        .bind(lead.timestamp)
        .bind(doc)
        .bind(&lead.id)
        .execute(pool)
        .await?;
    Ok(())
}

fn decode(doc: String) -> Result<Lead, AppError> {
    serde_json::from_str(&doc).map_err(|e| anyhow::anyhow!("corrupt lead record: {e}").into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lead::{Funding, LeadStatus, PointOfContact};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::init_schema(&pool).await.unwrap();
        pool
    }

    fn sample(id: &str, timestamp: i64) -> Lead {
        Lead {
            id: id.to_string(),
            company_name: "Acme Bio".to_string(),
            website: None,
            description: String::new(),
            ai_summary: String::new(),
            employees: "Unknown".to_string(),
            funding: Funding {
                round: "Series A".to_string(),
                amount: None,
                amount_value: 0,
                date: None,
                lead_investor: None,
            },
            matched_keywords: vec![],
            poc: PointOfContact {
                role: "Unknown".to_string(),
                name: None,
                linkedin: None,
            },
            fit_statement: String::new(),
            contextual_links: vec![],
            outreach_email: None,
            outreach_linked_in: None,
            status: LeadStatus::NewLead,
            timestamp,
        }
    }

    #[tokio::test]
    async fn test_replace_all_round_trips() {
        let pool = test_pool().await;
        let leads = vec![sample("lead-5-0", 5), sample("lead-5-1", 5)];
        replace_all(&pool, &leads).await.unwrap();
        assert_eq!(all_desc(&pool).await.unwrap(), leads);
    }

    #[tokio::test]
    async fn test_replace_all_drops_previous_batch() {
        let pool = test_pool().await;
        replace_all(&pool, &[sample("lead-1-0", 1)]).await.unwrap();
        replace_all(&pool, &[sample("lead-2-0", 2)]).await.unwrap();

        let stored = all_desc(&pool).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, "lead-2-0");
    }

    #[tokio::test]
    async fn test_all_desc_is_newest_first_with_stable_batches() {
        let pool = test_pool().await;
        // Two capture batches; within the newer batch insertion order holds.
        replace_all(
            &pool,
            &[sample("lead-9-0", 9), sample("lead-9-1", 9), sample("lead-1-0", 1)],
        )
        .await
        .unwrap();

        let ids: Vec<String> = all_desc(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec!["lead-9-0", "lead-9-1", "lead-1-0"]);
    }

    #[tokio::test]
    async fn test_put_patches_status_and_drafts() {
        let pool = test_pool().await;
        replace_all(&pool, &[sample("lead-1-0", 1)]).await.unwrap();

        let mut lead = get(&pool, "lead-1-0").await.unwrap().unwrap();
        lead.status = LeadStatus::Contacted;
        lead.outreach_email = Some("Dear team...".to_string());
        lead.outreach_linked_in = Some("Quick note:".to_string());
        put(&pool, &lead).await.unwrap();

        let stored = get(&pool, "lead-1-0").await.unwrap().unwrap();
        assert_eq!(stored.status, LeadStatus::Contacted);
        assert_eq!(stored.outreach_email.as_deref(), Some("Dear team..."));
        assert_eq!(stored.outreach_linked_in.as_deref(), Some("Quick note:"));
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let pool = test_pool().await;
        assert!(get(&pool, "lead-404-0").await.unwrap().is_none());
    }
}
