use crate::state::AppState;
use crate::{auth, campaigns, stats};
use axum::{routing::get, Router};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .nest(
            "/api",
            Router::new()
                .merge(auth::router())
                .merge(campaigns::router())
                .merge(stats::router())
                .route("/health", get(|| async { "ok" })),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| make_http_span(req))
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

/// Span for one HTTP request; `status` is recorded later by `on_response`.
fn make_http_span<B>(req: &axum::http::Request<B>) -> tracing::Span {
    let method = req.method().clone();
    let uri = req.uri().clone();
    tracing::info_span!(
        "http_request",
        %method,
        uri = %uri,
        status = tracing::field::Empty
    )
}

pub async fn serve(app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("APP_PORT").unwrap_or_else(|_| "3000".into())
    )
    .parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_span_declares_the_status_field() {
        // Without a declared field, Span::record("status", ...) is a no-op.
        let subscriber = tracing_subscriber::fmt().finish();
        tracing::subscriber::with_default(subscriber, || {
            let req = axum::http::Request::builder()
                .method("GET")
                .uri("/api/health")
                .body(())
                .unwrap();
            let span = make_http_span(&req);
            assert!(span.has_field("status"));
        });
    }
}
