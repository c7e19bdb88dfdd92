use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::models::news::NewsItem;
use crate::news::store;
use crate::state::AppState;

/// GET /api/v1/news
pub async fn handle_list_news(
    State(state): State<AppState>,
) -> Result<Json<Vec<NewsItem>>, AppError> {
    let items = store::all_desc(&state.db).await?;
    Ok(Json(items))
}
