//! User account API endpoints.

use api_types::user::{UserCreated, UserNew, UserUpdate, UserView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, role_from_api, role_view, server::ServerState};
use engine::User;

fn view(user: &User) -> UserView {
    UserView {
        id: user.id.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
        role: role_view(user.role),
    }
}

/// A regular user only ever sees their own account here.
pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<UserView>>, ServerError> {
    let engine = state.engine.read().await;
    let scoped = engine.scoped(Some(&user))?;
    Ok(Json(scoped.users.iter().map(view).collect()))
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<UserNew>,
) -> Result<Json<UserCreated>, ServerError> {
    let mut engine = state.engine.write().await;
    let id = engine.new_user(
        &user,
        &payload.name,
        &payload.email,
        &payload.password,
        role_from_api(payload.role),
    )?;
    Ok(Json(UserCreated { id }))
}

pub async fn update(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UserUpdate>,
) -> Result<StatusCode, ServerError> {
    let mut engine = state.engine.write().await;
    engine.update_user(
        &user,
        &id,
        engine::UserUpdate {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            role: role_from_api(payload.role),
        },
    )?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    let mut engine = state.engine.write().await;
    engine.delete_user(&user, &id)?;
    Ok(StatusCode::NO_CONTENT)
}
