mod handlers;
mod models;
mod store;

use hyper::{server::conn::http1, service::service_fn};
use hyper_util::rt::TokioIo;
use std::sync::Arc;
use store::ChannelStore;
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let subscriber = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let app_host = std::env::var("APP_HOST").unwrap_or("0.0.0.0".to_string());
    let app_port = std::env::var("PORT").unwrap_or("8080".to_string());
    let channels_file = std::env::var("CHANNELS_FILE").unwrap_or("channels.json".to_string());

    let store = Arc::new(ChannelStore::new(channels_file));

    let listener = TcpListener::bind(format!("{app_host}:{app_port}")).await?;

    tracing::info!("Listening {}:{}", app_host, app_port);
    tracing::info!(
        "Endpoints: GET /channels, GET /channel/:id, POST /channels, GET /health"
    );
    tracing::info!(
        "Loaded {} channels from {}",
        store.load().await.len(),
        store.path().display()
    );

    loop {
        let (stream, _) = listener.accept().await?;
        let peer = stream.peer_addr().ok();
        let store = Arc::clone(&store);
        let io = TokioIo::new(stream);
        tokio::task::spawn(async move {
            if let Err(e) = http1::Builder::new()
                .serve_connection(
                    io,
                    service_fn(move |mut req| {
                        req.extensions_mut().insert(Arc::clone(&store));
                        handlers::entry(req, peer)
                    }),
                )
                .await
            {
                tracing::error!("{e:?}");
            }
        });
    }
}
