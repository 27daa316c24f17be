use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Middleware для логирования HTTP запросов
///
/// Пишет одну строку на запрос: статус, метод, путь, длительность и размер ответа.
/// Ответы с ошибкой (4xx/5xx) уходят на уровне warn.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // Читаем тело ответа, чтобы узнать реальный размер
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(
                "{} {} {} | {}ms | body error: {}",
                parts.status.as_u16(),
                method,
                path,
                start.elapsed().as_millis(),
                e
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    let status = parts.status;
    let elapsed = start.elapsed().as_millis();
    let size = format_number(bytes.len());
    if status.is_client_error() || status.is_server_error() {
        tracing::warn!("{} {} {} | {}ms | {} B", status.as_u16(), method, path, elapsed, size);
    } else {
        tracing::info!("{} {} {} | {}ms | {} B", status.as_u16(), method, path, elapsed, size);
    }

    Response::from_parts(parts, Body::from(bytes))
}

/// Число с разделителями тысяч (точками)
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}
