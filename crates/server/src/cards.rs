//! Credit card API endpoints.

use api_types::card::{CardBillView, CardBillsResponse, CardCreated, CardNew, CardUpdate, CardView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};
use engine::{CreditCard, User};

fn view(card: &CreditCard) -> CardView {
    CardView {
        id: card.id.clone(),
        name: card.name.clone(),
        card_number: card.card_number.clone(),
        card_suffix: card.masked_suffix(),
        user_id: card.user_id.clone(),
    }
}

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<CardView>>, ServerError> {
    let engine = state.engine.read().await;
    let scoped = engine.scoped(Some(&user))?;
    Ok(Json(scoped.cards.iter().map(view).collect()))
}

/// Running bill per visible card, independent of the dashboard filters.
pub async fn bills(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<CardBillsResponse>, ServerError> {
    let engine = state.engine.read().await;
    let bills = engine
        .card_bills(Some(&user))?
        .iter()
        .map(|(card, bill)| CardBillView {
            card: view(card),
            bill: *bill,
        })
        .collect();
    Ok(Json(CardBillsResponse { bills }))
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<CardNew>,
) -> Result<Json<CardCreated>, ServerError> {
    let mut engine = state.engine.write().await;
    let id = engine.new_card(
        &user,
        &payload.name,
        &payload.card_number,
        payload.user_id.as_deref(),
    )?;
    Ok(Json(CardCreated { id }))
}

pub async fn update(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CardUpdate>,
) -> Result<StatusCode, ServerError> {
    let mut engine = state.engine.write().await;
    engine.update_card(
        &user,
        &id,
        &payload.name,
        &payload.card_number,
        &payload.user_id,
    )?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    let mut engine = state.engine.write().await;
    engine.delete_card(&user, &id)?;
    Ok(StatusCode::NO_CONTENT)
}
