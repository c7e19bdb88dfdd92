use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::leads::filter::{self, LeadFilter};
use crate::leads::{outreach, store};
use crate::models::lead::{Lead, LeadStatus};
use crate::profile;
use crate::state::AppState;

/// GET /api/v1/leads
/// The filtered intelligence feed. Archived leads never appear here.
pub async fn handle_list_leads(
    State(state): State<AppState>,
    Query(params): Query<LeadFilter>,
) -> Result<Json<Vec<Lead>>, AppError> {
    let leads = store::all_desc(&state.db).await?;
    Ok(Json(filter::apply(leads, &params.normalized())))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStats {
    pub new_leads: usize,
    pub in_progress: usize,
}

#[derive(Serialize)]
pub struct PipelineResponse {
    pub leads: Vec<Lead>,
    pub stats: PipelineStats,
}

/// GET /api/v1/pipeline
/// The unfiltered CRM view, with the dashboard's velocity counters.
pub async fn handle_pipeline(
    State(state): State<AppState>,
) -> Result<Json<PipelineResponse>, AppError> {
    let leads = store::all_desc(&state.db).await?;
    let stats = PipelineStats {
        new_leads: leads
            .iter()
            .filter(|l| l.status == LeadStatus::NewLead)
            .count(),
        in_progress: leads
            .iter()
            .filter(|l| l.status != LeadStatus::NewLead && l.status != LeadStatus::Archived)
            .count(),
    };
    Ok(Json(PipelineResponse { leads, stats }))
}

#[derive(Deserialize)]
pub struct StatusChange {
    pub status: LeadStatus,
}

/// PATCH /api/v1/leads/:id/status
pub async fn handle_set_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<StatusChange>,
) -> Result<Json<Lead>, AppError> {
    let mut lead = store::get(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Lead {id} not found")))?;
    lead.status = req.status;
    store::put(&state.db, &lead).await?;
    Ok(Json(lead))
}

/// POST /api/v1/leads/:id/outreach
/// Generates both drafts together and moves the lead to Contacted. Calling it
/// again overwrites both drafts.
pub async fn handle_generate_outreach(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Lead>, AppError> {
    let mut lead = store::get(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Lead {id} not found")))?;
    let profile = profile::store::latest(&state.db)
        .await?
        .ok_or_else(|| AppError::UnprocessableEntity("no profile to draft from".to_string()))?;

    let drafts =
        outreach::generate_outreach(state.model.as_ref(), &state.config, &lead, &profile).await?;

    lead.outreach_email = Some(drafts.email);
    lead.outreach_linked_in = Some(drafts.linked_in);
    lead.status = LeadStatus::Contacted;
    store::put(&state.db, &lead).await?;
    Ok(Json(lead))
}
