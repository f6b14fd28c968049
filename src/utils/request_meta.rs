use axum::http::HeaderMap;

use crate::utils::text::truncate_user_agent;

/// Client metadata recorded with every audit entry.
#[derive(Debug, Clone)]
pub struct RequestMeta {
    pub client_ip: String,
    pub user_agent: String,
}

impl RequestMeta {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let client_ip = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .or_else(|| headers.get("x-real-ip").and_then(|v| v.to_str().ok()))
            .unwrap_or("unknown")
            .to_string();

        let user_agent = headers
            .get(axum::http::header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(truncate_user_agent)
            .unwrap_or_default();

        Self {
            client_ip,
            user_agent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn takes_first_forwarded_address() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );
        let meta = RequestMeta::from_headers(&headers);
        assert_eq!(meta.client_ip, "203.0.113.9");
    }

    #[test]
    fn missing_headers_yield_unknown_ip() {
        let meta = RequestMeta::from_headers(&HeaderMap::new());
        assert_eq!(meta.client_ip, "unknown");
        assert!(meta.user_agent.is_empty());
    }
}
