use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};

use std::{sync::Arc, time::Instant};

use crate::{groups, history, ledger};
use engine::{Currency, Engine};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    /// Currency of groups created without an explicit one.
    pub currency: Currency,
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis();
    if status.is_server_error() {
        tracing::error!(%method, %path, status = status.as_u16(), elapsed_ms, "request failed");
    } else {
        tracing::info!(%method, %path, status = status.as_u16(), elapsed_ms, "request");
    }
    response
}

/// Builds the API router over `engine`.
pub fn router(engine: Arc<Engine>, currency: Currency) -> Router {
    let state = ServerState { engine, currency };
    Router::new()
        .route("/groups", post(groups::group_new))
        .route("/groups/invite/{code}", get(groups::by_invite_code))
        .route("/groups/{group_id}", get(groups::get))
        .route(
            "/groups/{group_id}/members",
            get(groups::list_members).post(groups::add_member),
        )
        .route("/groups/{group_id}/expenses", post(history::expense_new))
        .route("/groups/{group_id}/settlements", post(history::settlement_new))
        .route("/groups/{group_id}/balances", get(ledger::balances))
        .route("/groups/{group_id}/debts", get(ledger::debts))
        .route("/groups/{group_id}/activity", get(ledger::activity))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

pub async fn run(engine: Engine, currency: Currency) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, currency, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    currency: Currency,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(Arc::new(engine), currency)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    currency: Currency,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, currency, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
