use axum::{
    Json, Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use serde_json::{Value, json};

use std::sync::Arc;

use crate::entities;
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Log every request with its outcome.
async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;
    let status = response.status();

    if status.is_server_error() {
        tracing::error!("{method} {uri} -> {status}");
    } else {
        tracing::debug!("{method} {uri} -> {status}");
    }
    response
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "UP" }))
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/{entities}",
            get(entities::list)
                .post(entities::create)
                .put(entities::replace_without_id)
                .patch(entities::patch_without_id)
                .delete(entities::delete_without_id),
        )
        .route(
            "/api/{entities}/{id}",
            get(entities::get_one)
                .put(entities::replace)
                .patch(entities::patch)
                .delete(entities::delete),
        )
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Build the application router around `engine`.
pub fn app(engine: Engine) -> Router {
    router(ServerState {
        engine: Arc::new(engine),
    })
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine)).await
}
