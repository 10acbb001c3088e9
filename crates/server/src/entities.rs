//! Generic REST endpoints for every entity type.
//!
//! `/api/{entities}` resolves to an [`EntityKind`]; bodies are decoded with
//! the kind's descriptor so absent and `null` properties stay distinct.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{HeaderMap, HeaderValue, StatusCode, header},
};
use engine::{EngineError, EntityKind, PartialRecord, Record, codec};
use serde_json::Value;

use crate::{ALERT_HEADER, PARAMS_HEADER, ServerError, server::ServerState};

type Body = Result<Json<Value>, JsonRejection>;
type RecordPath = Result<Path<(String, i64)>, PathRejection>;

fn resolve(collection: &str) -> Result<EntityKind, ServerError> {
    EntityKind::from_collection(collection).ok_or_else(|| {
        ServerError::from(EngineError::KeyNotFound(format!("/api/{collection}")))
    })
}

/// Unwrap `/api/{entities}/{id}`; a non-numeric id is a plain bad request.
fn record_path(path: RecordPath) -> Result<(String, i64), ServerError> {
    path.map(|Path(segments)| segments)
        .map_err(|rejection| ServerError::Generic(rejection.body_text()))
}

fn decode(kind: EntityKind, body: Body) -> Result<PartialRecord, ServerError> {
    let Json(body) = body.map_err(|rejection| ServerError::Generic(rejection.body_text()))?;
    codec::decode(kind.descriptor(), body).map_err(ServerError::on(kind))
}

fn encode(kind: EntityKind, record: &Record) -> Json<Value> {
    Json(codec::encode(kind.descriptor(), record))
}

/// `x-accounting-alert` / `x-accounting-params` headers of a successful mutation.
fn alert(kind: EntityKind, action: &str, id: Option<i64>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let alert = format!("accounting.{}.{action}", kind.descriptor().name);
    if let Ok(value) = HeaderValue::from_str(&alert) {
        headers.insert(ALERT_HEADER.clone(), value);
    }
    if let Some(id) = id {
        headers.insert(PARAMS_HEADER.clone(), HeaderValue::from(id));
    }
    headers
}

pub async fn list(
    State(state): State<ServerState>,
    Path(collection): Path<String>,
) -> Result<Json<Vec<Value>>, ServerError> {
    let kind = resolve(&collection)?;
    tracing::debug!("REST request to get all {collection}");

    let records = state.engine.list(kind).await.map_err(ServerError::on(kind))?;
    Ok(Json(
        records
            .iter()
            .map(|record| codec::encode(kind.descriptor(), record))
            .collect(),
    ))
}

pub async fn get_one(
    State(state): State<ServerState>,
    path: RecordPath,
) -> Result<Json<Value>, ServerError> {
    let (collection, id) = record_path(path)?;
    let kind = resolve(&collection)?;
    tracing::debug!("REST request to get {kind} {id}");

    let record = state.engine.get(kind, id).await.map_err(ServerError::on(kind))?;
    Ok(encode(kind, &record))
}

pub async fn create(
    State(state): State<ServerState>,
    Path(collection): Path<String>,
    body: Body,
) -> Result<(StatusCode, HeaderMap, Json<Value>), ServerError> {
    let kind = resolve(&collection)?;
    let payload = decode(kind, body)?;
    tracing::debug!("REST request to save {kind}: {payload:?}");

    let record = state
        .engine
        .create(kind, &payload)
        .await
        .map_err(ServerError::on(kind))?;

    let mut headers = alert(kind, "created", record.id);
    if let Some(id) = record.id {
        if let Ok(location) = HeaderValue::from_str(&format!("/api/{collection}/{id}")) {
            headers.insert(header::LOCATION, location);
        }
    }
    Ok((StatusCode::CREATED, headers, encode(kind, &record)))
}

pub async fn replace(
    State(state): State<ServerState>,
    path: RecordPath,
    body: Body,
) -> Result<(HeaderMap, Json<Value>), ServerError> {
    let (collection, id) = record_path(path)?;
    let kind = resolve(&collection)?;
    let payload = decode(kind, body)?;
    tracing::debug!("REST request to update {kind} {id}: {payload:?}");

    let record = state
        .engine
        .replace(kind, Some(id), &payload)
        .await
        .map_err(ServerError::on(kind))?;
    Ok((alert(kind, "updated", record.id), encode(kind, &record)))
}

/// Partial update with merge-patch semantics.
pub async fn patch(
    State(state): State<ServerState>,
    path: RecordPath,
    body: Body,
) -> Result<(HeaderMap, Json<Value>), ServerError> {
    let (collection, id) = record_path(path)?;
    let kind = resolve(&collection)?;
    let payload = decode(kind, body)?;
    tracing::debug!("REST request to partially update {kind} {id}: {payload:?}");

    let record = state
        .engine
        .patch(kind, Some(id), &payload)
        .await
        .map_err(ServerError::on(kind))?;
    Ok((alert(kind, "updated", record.id), encode(kind, &record)))
}

pub async fn delete(
    State(state): State<ServerState>,
    path: RecordPath,
) -> Result<(StatusCode, HeaderMap), ServerError> {
    let (collection, id) = record_path(path)?;
    let kind = resolve(&collection)?;
    tracing::debug!("REST request to delete {kind} {id}");

    state
        .engine
        .delete(kind, Some(id))
        .await
        .map_err(ServerError::on(kind))?;
    Ok((StatusCode::NO_CONTENT, alert(kind, "deleted", Some(id))))
}

// Mutations on the collection itself carry no id. The body is not even
// decoded: a missing path id is reported before anything about the payload.

pub async fn replace_without_id(
    State(state): State<ServerState>,
    Path(collection): Path<String>,
) -> Result<Json<Value>, ServerError> {
    let kind = resolve(&collection)?;
    let record = state
        .engine
        .replace(kind, None, &PartialRecord::new())
        .await
        .map_err(ServerError::on(kind))?;
    Ok(encode(kind, &record))
}

pub async fn patch_without_id(
    State(state): State<ServerState>,
    Path(collection): Path<String>,
) -> Result<Json<Value>, ServerError> {
    let kind = resolve(&collection)?;
    let record = state
        .engine
        .patch(kind, None, &PartialRecord::new())
        .await
        .map_err(ServerError::on(kind))?;
    Ok(encode(kind, &record))
}

pub async fn delete_without_id(
    State(state): State<ServerState>,
    Path(collection): Path<String>,
) -> Result<StatusCode, ServerError> {
    let kind = resolve(&collection)?;
    state
        .engine
        .delete(kind, None)
        .await
        .map_err(ServerError::on(kind))?;
    Ok(StatusCode::NO_CONTENT)
}
