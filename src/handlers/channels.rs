use super::{
    ResultResponse, State, json_basic,
    error::ResponseError,
    utils::{from_body_to, get_extension},
};
use http::{Request, StatusCode};
use hyper::body::Body;
use serde_json::{Value, json};

pub async fn list<B>(req: Request<B>) -> ResultResponse {
    let store = get_extension::<State>(req.extensions())?;
    let channels = store.load().await;
    tracing::info!("Returning {} channels", channels.len());

    Ok(json_basic(
        Value::Array(channels).to_string(),
        StatusCode::OK,
    ))
}

pub async fn get<B>(req: Request<B>) -> ResultResponse {
    let store = get_extension::<State>(req.extensions())?;
    let raw = req
        .uri()
        .path()
        .strip_prefix("/channel/")
        .unwrap_or_default();

    // A non-numeric identifier never matches, same as an unknown id.
    let channel = match raw.parse::<i64>() {
        Ok(id) => store.find(id).await,
        Err(_) => None,
    };

    match channel {
        Some(channel) => {
            tracing::info!("Found channel: {}", channel["name"]);
            Ok(json_basic(channel.to_string(), StatusCode::OK))
        }
        None => {
            tracing::warn!("Channel not found: {raw}");
            Err(ResponseError::new(
                StatusCode::NOT_FOUND,
                Some("Channel not found"),
            ))
        }
    }
}

pub async fn replace<B>(req: Request<B>) -> ResultResponse
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let (parts, body) = req.into_parts();
    let store = get_extension::<State>(&parts.extensions)?;
    let payload = from_body_to::<Value, B>(body).await?;

    store.replace(&payload).await?;
    tracing::info!("Channels updated successfully");

    Ok(json_basic(
        json!({"message": "Channels updated successfully"}).to_string(),
        StatusCode::OK,
    ))
}
