//! Group and member API endpoints

use api_types::group::{GroupNew, GroupView, MemberNew, MemberView, MembersResponse};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::GroupId;

use crate::{
    ServerError,
    server::ServerState,
    views::{currency_from_api, group_view, member_view},
};

/// Handle requests for creating a new group
pub async fn group_new(
    State(state): State<ServerState>,
    Json(payload): Json<GroupNew>,
) -> Result<(StatusCode, Json<GroupView>), ServerError> {
    let currency = payload.currency.map(currency_from_api).or(Some(state.currency));
    let group = state
        .engine
        .new_group(&payload.name, &payload.admin_name, currency)?;
    tracing::info!(group_id = %group.id, "group created");

    Ok((StatusCode::CREATED, Json(group_view(&group))))
}

/// Handle requests for a group snapshot
pub async fn get(
    State(state): State<ServerState>,
    Path(group_id): Path<String>,
) -> Result<Json<GroupView>, ServerError> {
    let group = state.engine.group(&GroupId::from(group_id))?;
    Ok(Json(group_view(&group)))
}

/// Handle requests for finding a group by invite code
pub async fn by_invite_code(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> Result<Json<GroupView>, ServerError> {
    let group = state.engine.group_by_invite_code(&code)?;
    Ok(Json(group_view(&group)))
}

pub async fn list_members(
    State(state): State<ServerState>,
    Path(group_id): Path<String>,
) -> Result<Json<MembersResponse>, ServerError> {
    let members = state.engine.members(&GroupId::from(group_id))?;
    Ok(Json(MembersResponse {
        members: members.iter().map(member_view).collect(),
    }))
}

pub async fn add_member(
    State(state): State<ServerState>,
    Path(group_id): Path<String>,
    Json(payload): Json<MemberNew>,
) -> Result<(StatusCode, Json<MemberView>), ServerError> {
    let group_id = GroupId::from(group_id);
    let member = state.engine.add_member(&group_id, &payload.name)?;
    tracing::info!(%group_id, member_id = %member.id, "member added");

    Ok((StatusCode::CREATED, Json(member_view(&member))))
}
