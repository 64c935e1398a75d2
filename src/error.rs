use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to fetch data from API: {0}")]
    ApiFetch(#[from] reqwest::Error),

    #[error("Failed to parse API response: {0}")]
    ApiParse(#[from] serde_json::Error),

    // The one authoritative failure: 401/403 from any transport.
    // Stops fallback sequencing for the current operation immediately.
    #[error("API rejected credential ({status}): {message} (URL: {url})")]
    AuthRejected {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API request not found (404): {url}")]
    ApiNotFound { url: String },

    #[error("API server error ({status}): {message} (URL: {url})")]
    ApiServerError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API client error ({status}): {message} (URL: {url})")]
    ApiClientError {
        status: u16,
        message: String,
        url: String,
    },

    // Network-specific errors
    #[error("Network timeout while fetching data from: {url}")]
    NetworkTimeout { url: String },

    #[error("Connection failed to: {url} - {message}")]
    NetworkConnection { url: String, message: String },

    // Data parsing and validation errors
    #[error("API returned malformed JSON: {message} (URL: {url})")]
    ApiMalformedJson { message: String, url: String },

    #[error("API returned empty or missing data: {message} (URL: {url})")]
    ApiNoData { message: String, url: String },

    // Business logic errors
    #[error("No results available for game {game_id}: every endpoint candidate failed")]
    ResultsUnavailable { game_id: String },

    #[error("Game not found: {game_id}")]
    GameNotFound { game_id: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create an auth rejection error (401/403)
    pub fn auth_rejected(status: u16, message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::AuthRejected {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API not found error
    pub fn api_not_found(url: impl Into<String>) -> Self {
        Self::ApiNotFound { url: url.into() }
    }

    /// Create an API server error (5xx status codes)
    pub fn api_server_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiServerError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API client error (4xx status codes except 401/403/404)
    pub fn api_client_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiClientError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a network timeout error
    pub fn network_timeout(url: impl Into<String>) -> Self {
        Self::NetworkTimeout { url: url.into() }
    }

    /// Create a network connection error
    pub fn network_connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkConnection {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a malformed JSON error
    pub fn api_malformed_json(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiMalformedJson {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a no data error
    pub fn api_no_data(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiNoData {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a results-unavailable error for the critical results fetch
    pub fn results_unavailable(game_id: impl Into<String>) -> Self {
        Self::ResultsUnavailable {
            game_id: game_id.into(),
        }
    }

    /// Create a game not found error
    pub fn game_not_found(game_id: impl Into<String>) -> Self {
        Self::GameNotFound {
            game_id: game_id.into(),
        }
    }

    /// Check if error is an authoritative credential rejection.
    /// Auth errors stop fallback sequencing; nothing else does.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, AppError::AuthRejected { .. })
    }

    /// Check if error is transient (timeouts, connection failures, 5xx,
    /// malformed bodies). Transient errors advance the fallback sequence
    /// to the next transport or candidate.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AppError::NetworkTimeout { .. }
                | AppError::NetworkConnection { .. }
                | AppError::ApiServerError { .. }
                | AppError::ApiMalformedJson { .. }
                | AppError::ApiNoData { .. }
                | AppError::ApiFetch(_)
                | AppError::ApiParse(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_helper() {
        let error = AppError::config_error("Invalid configuration");
        assert!(matches!(error, AppError::Config(_)));
        assert_eq!(
            error.to_string(),
            "Configuration error: Invalid configuration"
        );
    }

    #[test]
    fn test_auth_rejected_helper() {
        let error = AppError::auth_rejected(401, "Unauthorized", "https://api.example.com/results");
        assert!(matches!(error, AppError::AuthRejected { .. }));
        assert_eq!(
            error.to_string(),
            "API rejected credential (401): Unauthorized (URL: https://api.example.com/results)"
        );
    }

    #[test]
    fn test_api_server_error_helper() {
        let error =
            AppError::api_server_error(500, "Internal server error", "https://api.example.com");
        assert!(matches!(error, AppError::ApiServerError { .. }));
        assert_eq!(
            error.to_string(),
            "API server error (500): Internal server error (URL: https://api.example.com)"
        );
    }

    #[test]
    fn test_network_timeout_helper() {
        let error = AppError::network_timeout("https://api.example.com");
        assert!(matches!(error, AppError::NetworkTimeout { .. }));
        assert_eq!(
            error.to_string(),
            "Network timeout while fetching data from: https://api.example.com"
        );
    }

    #[test]
    fn test_results_unavailable_helper() {
        let error = AppError::results_unavailable("game-42");
        assert!(matches!(error, AppError::ResultsUnavailable { .. }));
        assert_eq!(
            error.to_string(),
            "No results available for game game-42: every endpoint candidate failed"
        );
    }

    #[test]
    fn test_is_auth_error() {
        assert!(AppError::auth_rejected(401, "no", "url").is_auth_error());
        assert!(AppError::auth_rejected(403, "no", "url").is_auth_error());
        assert!(!AppError::api_server_error(500, "boom", "url").is_auth_error());
        assert!(!AppError::network_timeout("url").is_auth_error());
    }

    #[test]
    fn test_is_transient() {
        // Transient: sequencing advances past these
        assert!(AppError::network_timeout("url").is_transient());
        assert!(AppError::network_connection("url", "refused").is_transient());
        assert!(AppError::api_server_error(502, "bad gateway", "url").is_transient());
        assert!(AppError::api_malformed_json("not json", "url").is_transient());
        assert!(AppError::api_no_data("empty body", "url").is_transient());

        // Authoritative or local: sequencing must not swallow these
        assert!(!AppError::auth_rejected(403, "forbidden", "url").is_transient());
        assert!(!AppError::config_error("bad config").is_transient());
        assert!(!AppError::results_unavailable("g1").is_transient());
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let app_error: AppError = json_error.into();
        assert!(matches!(app_error, AppError::ApiParse(_)));
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let app_error: AppError = io_error.into();
        assert!(matches!(app_error, AppError::Io(_)));
    }

    #[test]
    fn test_error_display_formats() {
        let errors = vec![
            AppError::config_error("test config error"),
            AppError::auth_rejected(403, "forbidden", "https://example.com"),
            AppError::api_not_found("https://example.com"),
            AppError::api_server_error(500, "server error", "https://example.com"),
            AppError::api_client_error(400, "client error", "https://example.com"),
            AppError::network_timeout("https://example.com"),
            AppError::network_connection("https://example.com", "connection failed"),
            AppError::api_malformed_json("bad json", "https://example.com"),
            AppError::api_no_data("no data", "https://example.com"),
            AppError::results_unavailable("game-1"),
            AppError::game_not_found("game-2"),
        ];

        for error in errors {
            let display_string = error.to_string();
            assert!(
                display_string.len() > 5,
                "Error display should be descriptive: {error:?}"
            );
        }
    }
}
