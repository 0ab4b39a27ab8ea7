//! Static routes the viewer calls to discover the server and its models.
use axum::{
    Json,
    extract::{Path, Query},
};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use lg_model::{ModelId, all_labels, last_segment};

use crate::error::ApiError;

/// Server name advertised on `/info`.
pub const SERVER_NAME: &str = "MONAILabel";
/// Protocol version the viewer expects.
pub const SERVER_VERSION: &str = "0.5.2";
pub const SERVER_DESCRIPTION: &str = "Label inference gateway";

fn model_entry(id: ModelId) -> Map<String, Value> {
    let p = id.profile();
    let mut m = Map::new();
    m.insert("type".into(), json!(p.model_type));
    m.insert("labels".into(), json!(p.label_map()));
    m.insert("dimension".into(), json!(p.dimension));
    m.insert("description".into(), json!(p.description));
    m
}

pub async fn info() -> Json<Value> {
    let models: Map<String, Value> = ModelId::ALL
        .into_iter()
        .map(|id| (id.as_str().to_string(), Value::Object(model_entry(id))))
        .collect();
    Json(json!({
        "name": SERVER_NAME,
        "version": SERVER_VERSION,
        "description": SERVER_DESCRIPTION,
        "labels": all_labels(),
        "models": models,
    }))
}

pub async fn info_models() -> Json<Vec<&'static str>> {
    Json(ModelId::ALL.iter().map(ModelId::as_str).collect())
}

pub async fn info_model(Path(name): Path<String>) -> Result<Json<Value>, ApiError> {
    let id: ModelId = name
        .parse()
        .map_err(|_| ApiError::NotFound(format!("Model {name} not found")))?;
    let mut entry = model_entry(id);
    entry.insert("model_state".into(), json!("COMPLETED"));
    Ok(Json(Value::Object(entry)))
}

#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    #[serde(default)]
    image: String,
}

pub async fn image_info(Query(q): Query<ImageQuery>) -> Json<Value> {
    Json(json!({
        "id": last_segment(&q.image),
        "name": q.image,
        "size": 1,
        "status": "READY",
    }))
}

pub async fn session() -> Json<Value> {
    Json(json!({
        "session_id": "mock-session",
        "expiry": 7200,
        "uncompress": false,
        "status": "READY",
    }))
}

pub async fn active_learning(Path(model): Path<String>) -> Json<Value> {
    Json(json!({
        "status": "not_implemented",
        "message": format!("active learning is not available for {model}"),
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "READY",
        "healthy": true,
        "version": SERVER_VERSION,
    }))
}

pub async fn logs() -> Json<Vec<Value>> {
    Json(Vec::new())
}
