pub type Result<T> = core::result::Result<T, LoadError>;

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("http error: {0}")]
    Http(String),
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("{0}")]
    Message(String),
}

pub mod config {
    use serde::Deserialize;
    use std::env;

    pub const DEFAULT_URL: &str = "http://localhost:8503/v1/chat/completions";
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;

    #[derive(Debug, Clone, Deserialize)]
    #[serde(default)]
    pub struct LoadConfig {
        pub url: String,
        pub temperature: f32,
    }

    impl Default for LoadConfig {
        fn default() -> Self {
            Self {
                url: DEFAULT_URL.to_string(),
                temperature: DEFAULT_TEMPERATURE,
            }
        }
    }

    impl LoadConfig {
        pub fn load() -> Self {
            if let Ok(path) = env::var("LLMLOAD_CONFIG") {
                let Ok(text) = std::fs::read_to_string(path) else { return Self::default() };
                return Self::from_yaml(&text);
            }
            let mut cfg = Self::default();
            if let Ok(url) = env::var("LLMLOAD_URL") {
                cfg.url = url;
            }
            if let Some(t) = env::var("LLMLOAD_TEMPERATURE").ok().and_then(|v| v.parse().ok()) {
                cfg.temperature = t;
            }
            cfg
        }

        pub fn from_yaml(text: &str) -> Self {
            let Ok(cfg) = serde_yaml::from_str::<LoadConfig>(text) else { return Self::default() };
            cfg
        }
    }

}
