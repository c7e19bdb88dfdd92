// One-click refresh: lead discovery and news discovery run concurrently, and
// the store is only touched after both have succeeded.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::leads::discover::find_leads;
use crate::news::fetch::fetch_news;
use crate::state::AppState;
use crate::{leads, news, profile};

/// Counts of the replaced collections after a successful sync.
#[derive(Debug, Serialize)]
pub struct SyncReport {
    pub leads: usize,
    pub news: usize,
}

/// POST /api/v1/sync
pub async fn handle_sync(State(state): State<AppState>) -> Result<Json<SyncReport>, AppError> {
    Ok(Json(run_sync(&state).await?))
}

/// Runs one refresh cycle. The gate admits a single sync at a time; both
/// result sets are staged in memory and committed only after the joint fetch
/// succeeds. A failed refresh leaves the store exactly as it was.
pub async fn run_sync(state: &AppState) -> Result<SyncReport, AppError> {
    let _gate = state
        .sync_gate
        .try_lock()
        .map_err(|_| AppError::Conflict("a sync is already in flight".to_string()))?;

    let profile = profile::store::latest(&state.db)
        .await?
        .ok_or_else(|| AppError::UnprocessableEntity("no profile to sync from".to_string()))?;

    info!("Running global system sync");
    let (new_leads, new_news) = tokio::try_join!(
        find_leads(state.model.as_ref(), &state.config, &profile),
        fetch_news(state.model.as_ref()),
    )?;

    leads::store::replace_all(&state.db, &new_leads).await?;
    news::store::replace_all(&state.db, &new_news).await?;

    info!(leads = new_leads.len(), news = new_news.len(), "Sync complete");
    Ok(SyncReport {
        leads: new_leads.len(),
        news: new_news.len(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use sqlx::sqlite::SqlitePoolOptions;
    use tokio::sync::Mutex;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::testing::{api_error, StubModel};
    use crate::llm_client::{CompletionRequest, GenerativeModel};
    use crate::models::profile::{RankedKeyword, SemanticProfile, PROFILE_ID};

    const LEADS_JSON: &str = r#"[{"companyName": "HemoGen"}, {"companyName": "VasculArt"}]"#;
    const NEWS_JSON: &str =
        r#"[{"title": "FDA update", "source": "FDA", "summary": "s", "isOpenAccess": true, "type": "Regulatory"}]"#;

    /// Routes discovery and news requests by which system instruction they
    /// carry — the two calls race, so ordering cannot be assumed.
    fn routing_stub(
        leads: Result<&'static str, ()>,
        news: Result<&'static str, ()>,
    ) -> Arc<dyn GenerativeModel> {
        Arc::new(StubModel(move |req: &CompletionRequest| {
            let canned = if req.instruction.contains("Lead Intelligence Feed") {
                leads
            } else {
                news
            };
            canned
                .map(str::to_string)
                .map_err(|_| api_error())
        }))
    }

    async fn test_state(model: Arc<dyn GenerativeModel>) -> AppState {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::init_schema(&pool).await.unwrap();

        AppState {
            db: pool,
            model,
            config: Config {
                database_url: "sqlite::memory:".to_string(),
                gemini_api_key: "test-key".to_string(),
                consultant: "Dr. Test".to_string(),
                port: 0,
                rust_log: "info".to_string(),
            },
            sync_gate: Arc::new(Mutex::new(())),
        }
    }

    async fn seed_profile(state: &AppState) {
        let profile = SemanticProfile {
            id: PROFILE_ID.to_string(),
            file_names: vec!["resume.pdf".to_string()],
            ranked_keywords: vec![RankedKeyword {
                keyword: "Vascular Biology".to_string(),
                base_score: 95.0,
                user_adjustment: 0,
                multiplier_applied: true,
                visual_boost_applied: false,
            }],
            summary: "Specialist.".to_string(),
            timestamp: 1,
        };
        profile::store::replace(&state.db, &profile).await.unwrap();
    }

    #[tokio::test]
    async fn test_sync_requires_a_profile() {
        let state = test_state(routing_stub(Ok(LEADS_JSON), Ok(NEWS_JSON))).await;
        let err = run_sync(&state).await.unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
        assert!(leads::store::all_desc(&state.db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sync_replaces_both_collections() {
        let state = test_state(routing_stub(Ok(LEADS_JSON), Ok(NEWS_JSON))).await;
        seed_profile(&state).await;

        let report = run_sync(&state).await.unwrap();
        assert_eq!(report.leads, 2);
        assert_eq!(report.news, 1);

        let stored_leads = leads::store::all_desc(&state.db).await.unwrap();
        assert_eq!(stored_leads.len(), 2);
        assert_eq!(stored_leads[0].company_name, "HemoGen");

        let stored_news = news::store::all_desc(&state.db).await.unwrap();
        assert_eq!(stored_news.len(), 1);
        assert_eq!(stored_news[0].title, "FDA update");
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_store_untouched() {
        // First sync succeeds and populates the store.
        let state = test_state(routing_stub(Ok(LEADS_JSON), Ok(NEWS_JSON))).await;
        seed_profile(&state).await;
        run_sync(&state).await.unwrap();

        // Second sync: news fails, so even the successful lead fetch must not
        // be committed.
        let failing = test_state(routing_stub(Ok(LEADS_JSON), Err(()))).await;
        let state = AppState {
            model: failing.model,
            ..state
        };
        let err = run_sync(&state).await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));

        assert_eq!(leads::store::all_desc(&state.db).await.unwrap().len(), 2);
        assert_eq!(news::store::all_desc(&state.db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sync_is_rejected_while_one_is_in_flight() {
        let state = test_state(routing_stub(Ok(LEADS_JSON), Ok(NEWS_JSON))).await;
        seed_profile(&state).await;

        let _held = state.sync_gate.try_lock().unwrap();
        let err = run_sync(&state).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_sync_releases_gate_after_failure() {
        let state = test_state(routing_stub(Err(()), Err(()))).await;
        seed_profile(&state).await;

        assert!(run_sync(&state).await.is_err());
        // Back to idle: the gate is free again.
        assert!(state.sync_gate.try_lock().is_ok());
    }
}
