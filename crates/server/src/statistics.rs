//! Statistics API endpoints.

use api_types::{
    order::OrderListQuery,
    stats::{CashbackQuery, CashbackResponse, Statistic},
};
use axum::{
    Extension, Json,
    extract::{Query, State},
};

use crate::{ServerError, server::ServerState};
use engine::{OrderFilter, User};

/// Handle requests for the dashboard summary figures.
pub async fn get_stats(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<Statistic>, ServerError> {
    let filter = OrderFilter {
        date_range: query.from.zip(query.to),
        user_id: query.user,
        card_id: query.card,
        dealer: query.dealer,
    };

    let engine = state.engine.read().await;
    let stats = engine.stats(Some(&user), &filter)?;

    Ok(Json(Statistic {
        total_phones: stats.total_phones,
        total_invested: stats.total_invested,
        total_invested_after_cashback: stats.total_invested_after_cashback,
        total_received: stats.total_received,
        total_pending: stats.total_pending,
        total_profit: stats.total_profit,
        avg_profit: stats.avg_profit,
    }))
}

/// Cashback carries its own user filter, detached from the order filter.
pub async fn get_cashback(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Query(query): Query<CashbackQuery>,
) -> Result<Json<CashbackResponse>, ServerError> {
    let engine = state.engine.read().await;
    let total_cashback = engine.cashback(Some(&user), query.user.as_deref())?;
    Ok(Json(CashbackResponse { total_cashback }))
}
