//! Request line parsing.
//!
//! Only the method and target URL of the first line are read. Headers and
//! body are left alone and forwarded as raw bytes.

use crate::cache::MAX_URL_LENGTH;
use crate::error::{ProxyError, Result};

/// Method, target URL and origin host of a client request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    pub method: String,
    /// Target URL exactly as sent, used as the cache key
    pub url: String,
    /// Host part of `url`, used to reach the origin
    pub host: String,
}

/// Parses `<method> <url>` from the first line of `raw`.
///
/// # Errors
/// - `MalformedRequestLine` if the first line has fewer than two tokens
/// - `UrlTooLong` if the URL exceeds `MAX_URL_LENGTH`
/// - `MissingHost` if no host can be taken from the URL
pub fn parse_request(raw: &[u8]) -> Result<ParsedRequest> {
    let line_end = raw.iter().position(|&b| b == b'\n').unwrap_or(raw.len());
    let line = String::from_utf8_lossy(&raw[..line_end]);

    let mut tokens = line.split_whitespace();
    let (Some(method), Some(url)) = (tokens.next(), tokens.next()) else {
        return Err(ProxyError::MalformedRequestLine);
    };

    if url.len() > MAX_URL_LENGTH {
        return Err(ProxyError::UrlTooLong {
            len: url.len(),
            max: MAX_URL_LENGTH,
        });
    }

    let host = host_of(url);
    if host.is_empty() {
        return Err(ProxyError::MissingHost {
            url: url.to_string(),
        });
    }

    Ok(ParsedRequest {
        method: method.to_string(),
        url: url.to_string(),
        host: host.to_string(),
    })
}

/// Strips any `scheme://` prefix and returns everything up to the first `/`.
pub fn host_of(url: &str) -> &str {
    let rest = match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None => url,
    };
    rest.split('/').next().unwrap_or_default()
}
