use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Лог каждого запроса: метод, путь, статус, длительность
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let elapsed_ms = start.elapsed().as_millis();
    if status < 500 {
        tracing::info!(%method, path, status, elapsed_ms, "request");
    } else {
        tracing::error!(%method, path, status, elapsed_ms, "request failed");
    }

    response
}
