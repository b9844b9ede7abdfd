use super::{ResultResponse, json_basic};
use crate::models::health::Health;
use http::StatusCode;

/// Liveness probe. Does not touch the backing file.
pub fn health() -> ResultResponse {
    let body = serde_json::to_string(&Health::now()).unwrap_or_default();
    Ok(json_basic(body, StatusCode::OK))
}
