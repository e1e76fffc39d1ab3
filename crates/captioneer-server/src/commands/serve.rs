use std::net::SocketAddr;

use axum::{
    Json,
    Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State, rejection::BytesRejection},
    http::{HeaderMap, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::any,
};
use captioneer::{
    CaptioneerError,
    service::{CaptionRequest, CaptionResponse, CaptionService},
};

use crate::pipeline::PipelineArgs;

/// Args for the serve command.
#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pipeline: PipelineArgs,

    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:5000")]
    bind: SocketAddr,

    /// Caption endpoint path.
    #[arg(long, default_value = "/generate_caption")]
    route: String,

    /// Maximum request body size, in bytes.
    #[arg(long, default_value_t = 16 * 1024 * 1024)]
    max_body_bytes: usize,

    /// Build the decoder session before accepting requests; exit if it fails.
    #[arg(long)]
    preload: bool,
}

impl ServeArgs {
    /// Run the serve command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        if !self.route.starts_with('/') {
            return Err(format!("route must start with '/': {:?}", self.route).into());
        }

        let service = self.pipeline.load_service()?;
        if self.preload {
            service.session().get_session()?;
        }

        let app = caption_router(service, &self.route, self.max_body_bytes);

        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?
            .block_on(async {
                let listener = tokio::net::TcpListener::bind(self.bind).await?;
                log::info!("serving captions on http://{}{}", self.bind, self.route);

                axum::serve(listener, app)
                    .with_graceful_shutdown(shutdown_signal())
                    .await?;
                Ok::<(), Box<dyn std::error::Error>>(())
            })
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    log::info!("shutting down");
}

/// The caption endpoint at `route`; every method reaches the handler.
fn caption_router(
    service: CaptionService<u32>,
    route: &str,
    max_body_bytes: usize,
) -> Router {
    Router::new()
        .route(route, any(caption_handler))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(service)
}

fn json_response(response: CaptionResponse) -> Response {
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response.to_value())).into_response()
}

async fn caption_handler(
    State(service): State<CaptionService<u32>>,
    method: Method,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            let err = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                CaptioneerError::PayloadTooLarge
            } else {
                CaptioneerError::BodyUnreadable(rejection.body_text())
            };
            log::debug!("request rejected: {err}");
            return json_response(CaptionResponse::error(&err));
        }
    };

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let response = tokio::task::spawn_blocking(move || {
        service.handle(&CaptionRequest {
            method: method.as_str(),
            content_type: content_type.as_deref(),
            body: &body,
        })
    })
    .await
    .unwrap_or_else(|err| {
        log::error!("caption task failed: {err}");
        CaptionResponse::error(&CaptioneerError::Inference(err.to_string()))
    });

    json_response(response)
}
