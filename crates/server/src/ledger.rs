//! Derived views: balances, settle-up plan and activity feed.
//!
//! Every request recomputes from the group's full history.

use api_types::{
    activity::ActivityResponse,
    balance::{BalancesResponse, DebtsResponse},
};
use axum::{
    Json,
    extract::{Path, State},
};
use engine::GroupId;

use crate::{
    ServerError,
    server::ServerState,
    views::{activity_view, balance_views, currency_to_api, debt_view},
};

pub async fn balances(
    State(state): State<ServerState>,
    Path(group_id): Path<String>,
) -> Result<Json<BalancesResponse>, ServerError> {
    let group = state.engine.group(&GroupId::from(group_id))?;
    let balances = group.balances();

    Ok(Json(BalancesResponse {
        currency: currency_to_api(group.currency),
        balances: balance_views(&group, &balances),
    }))
}

pub async fn debts(
    State(state): State<ServerState>,
    Path(group_id): Path<String>,
) -> Result<Json<DebtsResponse>, ServerError> {
    let group = state.engine.group(&GroupId::from(group_id))?;
    let debts = group.simplified_debts();
    tracing::debug!(group_id = %group.id, transfers = debts.len(), "settle-up plan computed");

    Ok(Json(DebtsResponse {
        currency: currency_to_api(group.currency),
        debts: debts.iter().map(|d| debt_view(&group, d)).collect(),
    }))
}

pub async fn activity(
    State(state): State<ServerState>,
    Path(group_id): Path<String>,
) -> Result<Json<ActivityResponse>, ServerError> {
    let activity = state.engine.activity(&GroupId::from(group_id))?;

    Ok(Json(ActivityResponse {
        activity: activity.iter().map(activity_view).collect(),
    }))
}
