//! Public origin (`<scheme>://<host>`) derivation from HTTP request headers.

use crate::AppError;
use axum::http::{HeaderMap, HeaderName, Uri, header};
use serde_json::json;

const X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");
const X_FORWARDED_HOST: HeaderName = HeaderName::from_static("x-forwarded-host");

/// Builds the origin clients used to reach this service.
///
/// The `Host` header is kept verbatim, port included. HTTP/2 requests may
/// omit it and carry the host in the URI authority (`:authority`) instead.
/// When `behind_proxy` is set, `X-Forwarded-Proto` and `X-Forwarded-Host` take
/// precedence (first value of a comma-separated list). The scheme otherwise
/// comes from the URI when absolute, else `http`.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if no usable host header is present or it
/// contains invalid characters.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "localhost:3000".parse().unwrap());
///
/// let uri: Uri = "/shorten".parse().unwrap();
/// assert_eq!(extract_origin(&headers, &uri, false).unwrap(), "http://localhost:3000");
/// ```
pub fn extract_origin(
    headers: &HeaderMap,
    uri: &Uri,
    behind_proxy: bool,
) -> Result<String, AppError> {
    let forwarded = |name: &HeaderName| -> Option<String> {
        headers
            .get(name)?
            .to_str()
            .ok()?
            .split(',')
            .next()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let scheme = behind_proxy
        .then(|| forwarded(&X_FORWARDED_PROTO))
        .flatten()
        .or_else(|| uri.scheme_str().map(str::to_string))
        .unwrap_or_else(|| "http".to_string());

    let host = match behind_proxy.then(|| forwarded(&X_FORWARDED_HOST)).flatten() {
        Some(host) => host,
        None => match (headers.get(header::HOST), uri.authority()) {
            (Some(value), _) => value
                .to_str()
                .map_err(|_| AppError::bad_request("Invalid Host header", json!({})))?
                .to_string(),
            (None, Some(authority)) => authority.as_str().to_string(),
            (None, None) => {
                return Err(AppError::bad_request("Missing Host header", json!({})));
            }
        },
    };

    if host.is_empty() || host.contains(['/', ' ']) {
        return Err(AppError::bad_request(
            "Invalid Host header",
            json!({ "host": host }),
        ));
    }

    Ok(format!("{}://{}", scheme, host))
}

/// Joins an origin or base URL with a short id.
pub fn compose_short_url(base: &str, short_id: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), short_id)
}
