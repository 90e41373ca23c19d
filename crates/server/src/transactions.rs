//! Payment transaction API endpoints (admin-only writes).

use api_types::transaction::{TransactionCreated, TransactionNew, TransactionView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};
use engine::{Transaction, TransactionDraft, User};

fn mode_view(mode: engine::PaymentMode) -> api_types::transaction::PaymentMode {
    match mode {
        engine::PaymentMode::Cash => api_types::transaction::PaymentMode::Cash,
        engine::PaymentMode::Online => api_types::transaction::PaymentMode::Online,
    }
}

fn mode_from_api(mode: api_types::transaction::PaymentMode) -> engine::PaymentMode {
    match mode {
        api_types::transaction::PaymentMode::Cash => engine::PaymentMode::Cash,
        api_types::transaction::PaymentMode::Online => engine::PaymentMode::Online,
    }
}

fn online_type_view(
    value: engine::OnlinePaymentType,
) -> api_types::transaction::OnlinePaymentType {
    match value {
        engine::OnlinePaymentType::Upi => api_types::transaction::OnlinePaymentType::Upi,
        engine::OnlinePaymentType::BankTransfer => {
            api_types::transaction::OnlinePaymentType::BankTransfer
        }
    }
}

fn online_type_from_api(
    value: api_types::transaction::OnlinePaymentType,
) -> engine::OnlinePaymentType {
    match value {
        api_types::transaction::OnlinePaymentType::Upi => engine::OnlinePaymentType::Upi,
        api_types::transaction::OnlinePaymentType::BankTransfer => {
            engine::OnlinePaymentType::BankTransfer
        }
    }
}

fn view(tx: &Transaction) -> TransactionView {
    TransactionView {
        id: tx.id.clone(),
        date: tx.date,
        amount: tx.amount,
        dealer: tx.dealer.clone(),
        description: tx.description.clone(),
        user_id: tx.user_id.clone(),
        card_id: tx.card_id.clone(),
        payment_mode: mode_view(tx.payment_mode),
        online_payment_type: tx.online_payment_type.map(online_type_view),
    }
}

fn draft_from(payload: TransactionNew) -> TransactionDraft {
    TransactionDraft {
        date: payload.date,
        amount: payload.amount,
        dealer: payload.dealer,
        description: payload.description,
        user_id: payload.user_id,
        card_id: payload.card_id,
        payment_mode: mode_from_api(payload.payment_mode),
        online_payment_type: payload.online_payment_type.map(online_type_from_api),
    }
}

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let engine = state.engine.read().await;
    let scoped = engine.scoped(Some(&user))?;
    Ok(Json(scoped.transactions.iter().map(view).collect()))
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<TransactionNew>,
) -> Result<Json<TransactionCreated>, ServerError> {
    let mut engine = state.engine.write().await;
    let id = engine.new_transaction(&user, draft_from(payload))?;
    Ok(Json(TransactionCreated { id }))
}

pub async fn update(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TransactionNew>,
) -> Result<StatusCode, ServerError> {
    let mut engine = state.engine.write().await;
    engine.update_transaction(&user, &id, draft_from(payload))?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    let mut engine = state.engine.write().await;
    engine.delete_transaction(&user, &id)?;
    Ok(StatusCode::NO_CONTENT)
}
