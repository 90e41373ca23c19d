use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{app, run, run_with_listener, spawn_with_listener};

mod cards;
mod data;
mod orders;
mod server;
mod statistics;
mod transactions;
mod users;

pub mod types {
    pub mod user {
        pub use api_types::user::{UserCreated, UserNew, UserUpdate, UserView};
    }

    pub mod card {
        pub use api_types::card::{
            CardBillView, CardBillsResponse, CardCreated, CardNew, CardUpdate, CardView,
        };
    }

    pub mod order {
        pub use api_types::order::{
            OrderCreated, OrderListQuery, OrderListResponse, OrderNew, OrderUpdate, OrderView,
        };
    }

    pub mod transaction {
        pub use api_types::transaction::{TransactionCreated, TransactionNew, TransactionView};
    }

    pub mod stats {
        pub use api_types::stats::{CashbackQuery, CashbackResponse, Statistic};
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::Unauthenticated => StatusCode::UNAUTHORIZED,
        EngineError::Forbidden(_) => StatusCode::FORBIDDEN,
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) | EngineError::LastAdmin(_) | EngineError::InUse(_) => {
            StatusCode::CONFLICT
        }
        EngineError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::Io(_) | EngineError::Serde(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Io(io_err) => {
            tracing::error!("store io error: {io_err}");
            "internal server error".to_string()
        }
        EngineError::Serde(serde_err) => {
            tracing::error!("store serialization error: {serde_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

fn role_view(role: engine::Role) -> api_types::Role {
    match role {
        engine::Role::Admin => api_types::Role::Admin,
        engine::Role::User => api_types::Role::User,
    }
}

fn role_from_api(role: api_types::Role) -> engine::Role {
    match role {
        api_types::Role::Admin => engine::Role::Admin,
        api_types::Role::User => engine::Role::User,
    }
}
