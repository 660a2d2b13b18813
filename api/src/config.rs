//! Backend configuration from environment variables.

/// Credential backend configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    /// Read the backend base URL from `HEARTH_API_URL`, falling back to the
    /// hosted default. Trailing slashes are trimmed so path joins stay clean.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let base_url = std::env::var("HEARTH_API_URL")
            .unwrap_or_else(|_| "https://api-gerenciador-familiar.vercel.app".to_string());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Config pointing at an explicit base URL (tests, staging).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ApiConfig::with_base_url("http://localhost:3000/");
        assert_eq!(config.base_url, "http://localhost:3000");
    }
}
