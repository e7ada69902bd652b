use crate::config::Config;
use axum::http::{HeaderMap, header};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// The page's own origin, used as the base of share links.
    pub fn origin(&self, headers: &HeaderMap) -> String {
        if let Some(origin) = &self.config.public_origin {
            return origin.clone();
        }

        headers
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
            .filter(|host| !host.is_empty())
            .map(|host| format!("http://{host}"))
            .unwrap_or_else(|| self.config.fallback_origin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn origin_prefers_configured_value() {
        let state = AppState::new(Config::from_values(None, Some("https://cd.example".into())));
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("other:1234"));
        assert_eq!(state.origin(&headers), "https://cd.example");
    }

    #[test]
    fn origin_uses_host_then_fallback() {
        let state = AppState::new(Config::default());
        let mut headers = HeaderMap::new();
        assert_eq!(state.origin(&headers), "http://localhost:8080");
        headers.insert(header::HOST, HeaderValue::from_static("127.0.0.1:3000"));
        assert_eq!(state.origin(&headers), "http://127.0.0.1:3000");
    }
}
