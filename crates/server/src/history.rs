//! Expense and settlement API endpoints

use api_types::{Created, expense::ExpenseNew, settlement::SettlementNew};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use engine::{ExpenseCmd, GroupId, MoneyCents, SettlementCmd};

use crate::{ServerError, server::ServerState, views::split_from_api};

/// Handle requests for recording an expense
pub async fn expense_new(
    State(state): State<ServerState>,
    Path(group_id): Path<String>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let mut cmd = ExpenseCmd::new(
        GroupId::from(group_id),
        payload.paid_by,
        MoneyCents::new(payload.amount_minor),
        split_from_api(payload.split),
        payload.occurred_at.unwrap_or_else(Utc::now),
    );
    if let Some(description) = payload.description {
        cmd = cmd.description(description);
    }
    let group_id = cmd.group_id.clone();

    let id = state.engine.add_expense(cmd)?;
    tracing::info!(%group_id, expense_id = %id, "expense recorded");

    Ok((StatusCode::CREATED, Json(Created { id: id.to_string() })))
}

/// Handle requests for recording a settlement
pub async fn settlement_new(
    State(state): State<ServerState>,
    Path(group_id): Path<String>,
    Json(payload): Json<SettlementNew>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let group_id = GroupId::from(group_id);
    let id = state.engine.add_settlement(SettlementCmd::new(
        group_id.clone(),
        payload.payer,
        payload.receiver,
        MoneyCents::new(payload.amount_minor),
        payload.occurred_at.unwrap_or_else(Utc::now),
    ))?;
    tracing::info!(%group_id, settlement_id = %id, "settlement recorded");

    Ok((StatusCode::CREATED, Json(Created { id: id.to_string() })))
}
