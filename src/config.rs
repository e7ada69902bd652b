use std::env;

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    /// Base for share links. Derived from the request `Host` when unset.
    pub public_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_values(env::var("PORT").ok(), env::var("PUBLIC_ORIGIN").ok())
    }

    pub fn from_values(port: Option<String>, public_origin: Option<String>) -> Self {
        let port = port
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let public_origin = public_origin
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty());

        Self {
            port,
            public_origin,
        }
    }

    pub fn fallback_origin(&self) -> String {
        format!("http://localhost:{}", self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}
