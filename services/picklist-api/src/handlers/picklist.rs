use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
};
use serde::Deserialize;
use tracing::info;

use picklist_models::{BatchPickListRequest, InventoryRegion, PickList, PickListRequest};
use picklist_utils::{BatchEntryOutcome, PickListError};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PickListQuery {
    pub fixture: String,
    pub quantity: i64,
    #[serde(default)]
    pub intl: bool,
}

pub async fn generate_pick_list(
    State(state): State<AppState>,
    query: Result<Query<PickListQuery>, QueryRejection>,
) -> Result<Json<PickList>, ApiError> {
    let Query(query) = query.map_err(|rejection| PickListError::validation("query", rejection.body_text()))?;
    let request = PickListRequest::new(query.fixture, query.quantity);
    let region = InventoryRegion::from_intl_flag(query.intl);

    let result = state.generator.generate(&request, region).await;
    state.metrics.record_request("picklist", result.is_ok());

    let pick_list = result?;
    state.metrics.record_pick_list(&pick_list);
    Ok(Json(pick_list))
}

pub async fn generate_batch(
    State(state): State<AppState>,
    Json(batch): Json<BatchPickListRequest>,
) -> Result<Json<Vec<BatchEntryOutcome>>, ApiError> {
    let result = state.generator.generate_batch(&batch).await;
    state.metrics.record_request("batch", result.is_ok());

    let outcomes = result?;
    for pick_list in outcomes.iter().filter_map(|o| o.pick_list.as_ref()) {
        state.metrics.record_pick_list(pick_list);
    }

    info!(
        entries = outcomes.len(),
        failed = outcomes.iter().filter(|o| !o.is_ok()).count(),
        "batch generated"
    );
    Ok(Json(outcomes))
}
