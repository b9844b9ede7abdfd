use super::error::ResponseError;
use http::Extensions;
use http_body_util::BodyExt;
use hyper::body::Body;
use serde::de::DeserializeOwned;

pub async fn from_body_to<T, B>(body: B) -> Result<T, ResponseError>
where
    T: DeserializeOwned,
    B: Body,
    B::Error: std::fmt::Display,
{
    match body.collect().await {
        Ok(collected) => match serde_json::from_slice::<T>(&collected.to_bytes()) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!("Error parsing the request body - {e}");
                Err(ResponseError::internal())
            }
        },
        Err(e) => {
            tracing::error!("Error collecting the request body - {e}");
            Err(ResponseError::internal())
        }
    }
}

pub fn get_extension<T>(ext: &Extensions) -> Result<&T, ResponseError>
where
    T: Send + Sync + 'static,
{
    match ext.get::<T>() {
        Some(value) => Ok(value),
        None => {
            tracing::error!("State is not present in extensions");
            Err(ResponseError::internal())
        }
    }
}
