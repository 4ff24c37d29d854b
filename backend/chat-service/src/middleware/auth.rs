use crate::error::AppError;

/// Header the identity gateway sets after authenticating the caller.
///
/// Credentials never reach this service; by the time a request arrives the
/// gateway has already validated the session and forwards only the opaque
/// user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller, extracted once per request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub String);

/// Middleware to extract the gateway-forwarded user id and add it to
/// request extensions.
pub async fn auth_middleware(
    mut req: axum::extract::Request,
    next: axum::middleware::Next,
) -> Result<axum::response::Response, AppError> {
    let user_id = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(AppError::Unauthorized)?
        .to_string();

    req.extensions_mut().insert(CurrentUser(user_id));

    Ok(next.run(req).await)
}
