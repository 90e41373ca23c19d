//! Order API endpoints.

use api_types::order::{
    OrderCreated, OrderListQuery, OrderListResponse, OrderNew, OrderUpdate, OrderView,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};
use engine::{Order, OrderDraft, OrderFilter, User, dealers};

fn view(order: &Order) -> OrderView {
    OrderView {
        id: order.id.clone(),
        model: order.model.clone(),
        variant: order.variant.clone(),
        order_date: order.order_date,
        ordered_price: order.ordered_price,
        cashback: order.cashback,
        net_cost: order.net_cost(),
        user_id: order.user_id.clone(),
        card_id: order.card_id.clone(),
        delivery_date: order.delivery_date,
        selling_price: order.selling_price,
        profit: order.profit(),
        profit_percent: order.profit_percent(),
        dealer: order.dealer.clone(),
        sold: order.is_sold(),
    }
}

/// A date range only applies when both ends are given.
fn filter_from_query(query: OrderListQuery) -> OrderFilter {
    OrderFilter {
        date_range: query.from.zip(query.to),
        user_id: query.user,
        card_id: query.card,
        dealer: query.dealer,
    }
}

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<OrderListResponse>, ServerError> {
    let engine = state.engine.read().await;
    let filter = filter_from_query(query);
    let orders = engine.orders_view(Some(&user), &filter)?;

    // Dealer options come from everything the user can see, not from the
    // currently filtered slice.
    let scoped = engine.scoped(Some(&user))?;
    Ok(Json(OrderListResponse {
        orders: orders.iter().map(view).collect(),
        dealers: dealers(&scoped.orders),
    }))
}

fn draft_from(payload: OrderUpdate) -> OrderDraft {
    OrderDraft {
        model: payload.model,
        variant: payload.variant,
        order_date: payload.order_date,
        ordered_price: payload.ordered_price,
        cashback: payload.cashback,
        user_id: payload.user_id,
        card_id: payload.card_id,
        delivery_date: payload.delivery_date,
        selling_price: payload.selling_price,
        dealer: payload.dealer,
    }
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<OrderNew>,
) -> Result<Json<OrderCreated>, ServerError> {
    let user_id = payload.user_id.unwrap_or_else(|| user.id.clone());
    let draft = OrderDraft {
        model: payload.model,
        variant: payload.variant,
        order_date: payload.order_date,
        ordered_price: payload.ordered_price,
        cashback: payload.cashback,
        user_id,
        card_id: payload.card_id,
        delivery_date: payload.delivery_date,
        selling_price: payload.selling_price,
        dealer: payload.dealer,
    };

    let mut engine = state.engine.write().await;
    let id = engine.new_order(&user, draft)?;
    Ok(Json(OrderCreated { id }))
}

pub async fn update(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderUpdate>,
) -> Result<StatusCode, ServerError> {
    let mut engine = state.engine.write().await;
    engine.update_order(&user, &id, draft_from(payload))?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    let mut engine = state.engine.write().await;
    engine.delete_order(&user, &id)?;
    Ok(StatusCode::NO_CONTENT)
}
