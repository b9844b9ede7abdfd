pub mod channels;
pub mod error;
pub mod health;
pub mod utils;

use crate::store::ChannelStore;
use bytes::Bytes;
use error::ResponseError;
use http::{HeaderValue, Method, Request, Response, StatusCode, header};
use http_body_util::Full;
use hyper::body::Body;
use std::{convert::Infallible, net::SocketAddr, sync::Arc};

pub type ResultResponse = Result<Response<Full<Bytes>>, ResponseError>;

pub type State = Arc<ChannelStore>;

pub async fn entry<B>(
    req: Request<B>,
    peer: Option<SocketAddr>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    tracing::debug!(
        "Request:  {{ Method: {}, Uri: {}, Version: {:#?}, Headers: {:#?} }}",
        req.method(),
        req.uri(),
        req.version(),
        req.headers()
    );

    let duration = std::time::Instant::now();
    let path = req.uri().path().to_string();
    let response = router(req).await;
    let peer = peer.map(|x| x.to_string()).unwrap_or("Unknown".to_string());
    let duration = duration.elapsed().as_millis();

    let mut response = match response {
        Ok(r) => {
            tracing::info!(
                "Response {{ Status: {}, Path: {}, duration: {}ms, Peer: {} }}",
                r.status(),
                path,
                duration,
                peer,
            );
            r
        }
        Err(e) => {
            tracing::error!(
                "Response {{ Status: {}, Path: {}, duration: {}ms, Peer: {}, error: {} }}",
                e.status(),
                path,
                duration,
                peer,
                e,
            );
            e.into()
        }
    };

    // CORS is open: every response is callable from any origin.
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );

    Ok(response)
}

async fn router<B>(req: Request<B>) -> ResultResponse
where
    B: Body,
    B::Error: std::fmt::Display,
{
    match (req.uri().path(), req.method()) {
        (_, &Method::OPTIONS) => Ok(cors()),
        ("/channels", &Method::GET) => channels::list(req).await,
        ("/channels", &Method::POST) => channels::replace(req).await,
        ("/health", &Method::GET) => health::health(),
        (path, &Method::GET) if path.starts_with("/channel/") => channels::get(req).await,
        _ => Err(ResponseError::new(
            StatusCode::NOT_FOUND,
            Some(format!("Endpoint {} not found", req.uri())),
        )),
    }
}

fn json_basic(body: String, status: StatusCode) -> Response<Full<Bytes>> {
    Response::builder()
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, body.len())
        .status(status)
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_default()
}

fn cors() -> Response<Full<Bytes>> {
    Response::builder()
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .header(header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS")
        .header(header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type")
        .header(header::ACCESS_CONTROL_MAX_AGE, 3600)
        .status(StatusCode::NO_CONTENT)
        .body(Full::new(Bytes::new()))
        .unwrap_or_default()
}
