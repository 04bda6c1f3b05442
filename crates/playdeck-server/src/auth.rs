use axum::body::Body;
use axum::extract::Request;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

/// Authentication configuration resolved from the server config.
#[derive(Clone)]
pub struct AuthConfig {
    /// Bearer token for mutating API access. None = auth disabled.
    pub bearer_token: Option<String>,
}

/// Axum middleware that validates Bearer token authentication on mutating
/// requests. Safe methods (GET, HEAD) are always allowed: the lobby read
/// surface is public. If no token is configured, all requests pass.
pub async fn bearer_auth_middleware(
    headers: HeaderMap,
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    if matches!(*request.method(), Method::GET | Method::HEAD) {
        return Ok(next.run(request).await);
    }

    let auth_config = request
        .extensions()
        .get::<AuthConfig>()
        .cloned()
        .unwrap_or(AuthConfig { bearer_token: None });

    if let Some(ref expected) = auth_config.bearer_token {
        let provided = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));

        match provided {
            Some(token) if token == expected => {},
            _ => return Err(StatusCode::UNAUTHORIZED),
        }
    }

    Ok(next.run(request).await)
}
