//! Snapshot export/import and data reset endpoints (admin-only).

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};
use engine::{Snapshot, User};

pub async fn export(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Snapshot>, ServerError> {
    let engine = state.engine.read().await;
    Ok(Json(engine.export(&user)?))
}

pub async fn import(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(snapshot): Json<Snapshot>,
) -> Result<StatusCode, ServerError> {
    let mut engine = state.engine.write().await;
    engine.import(&user, snapshot)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reset(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<StatusCode, ServerError> {
    let mut engine = state.engine.write().await;
    engine.reset(&user)?;
    Ok(StatusCode::NO_CONTENT)
}
