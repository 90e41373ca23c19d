use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{cards, data, orders, statistics, transactions, users};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<RwLock<Engine>>,
}

async fn auth(
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(auth_header) = auth_header else {
        return Err(StatusCode::UNAUTHORIZED);
    };
    if auth_header.username().is_empty() || auth_header.password().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let user = state
        .engine
        .read()
        .await
        .authenticate(auth_header.username(), auth_header.password());

    let Some(user) = user else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/users", get(users::list).post(users::create))
        .route("/users/{id}", put(users::update).delete(users::remove))
        .route("/cards", get(cards::list).post(cards::create))
        .route("/cards/bills", get(cards::bills))
        .route("/cards/{id}", put(cards::update).delete(cards::remove))
        .route("/orders", get(orders::list).post(orders::create))
        .route("/orders/{id}", put(orders::update).delete(orders::remove))
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route(
            "/transactions/{id}",
            put(transactions::update).delete(transactions::remove),
        )
        .route("/stats", get(statistics::get_stats))
        .route("/stats/cashback", get(statistics::get_cashback))
        .route("/data/export", get(data::export))
        .route("/data/import", post(data::import))
        .route("/data/reset", post(data::reset))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .with_state(state)
}

/// The full application router. Exposed so tests can drive it without a
/// listening socket.
pub fn app(engine: Engine) -> Router {
    router(ServerState {
        engine: Arc::new(RwLock::new(engine)),
    })
}

pub async fn run(engine: Engine, bind: &str) {
    let listener = match tokio::net::TcpListener::bind(bind).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
