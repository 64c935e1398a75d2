//! Application-wide constants and configuration values
//!
//! This module centralizes magic numbers, endpoint roots, and tuning values
//! so the fallback sequencing and polling behavior stay configurable in one place.

#![allow(dead_code)]

/// Default timeout for each individual HTTP request in seconds.
/// Every call carries this timeout; a timed-out request is treated as a
/// transient transport failure and the sequencer advances.
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 10;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 20;

/// Default interval between result polls in seconds
pub const DEFAULT_POLL_INTERVAL_SECONDS: u64 = 15;

/// Upstream API roots. The two dialects expose the same concepts under
/// incompatible path conventions; the credential form selects the dialect.
pub mod api {
    /// Base root for the legacy (v1) dialect
    pub const LEGACY_ROOT: &str = "https://api.quizrally.com/v1";

    /// Base root for the modern (v3) dialect
    pub const MODERN_ROOT: &str = "https://api.quizrally.com/v3";

    /// Authorization scheme token that marks a credential as legacy.
    /// Matched case-insensitively against the start of the credential string.
    pub const LEGACY_SCHEME: &str = "ApiKey-v1";
}

/// Public relay passthrough hosts, tried in order after a direct request
/// fails. Each wraps the full target URL as a query-encoded parameter and
/// forwards status code and body transparently.
pub mod relay {
    pub const HOSTS: [&str; 2] = [
        "https://relay.quizrally.com/fetch",
        "https://passthrough.corsbridge.dev/get",
    ];
}

/// Rich-text resolution limits
pub mod richtext {
    /// Maximum recursion depth when folding a content tree. Deeply nested or
    /// cyclic payloads terminate at this bound and fall through to the next
    /// candidate field.
    pub const MAX_CONTENT_DEPTH: usize = 8;

    /// Fallback title when a task node carries neither content nor identifier
    pub const UNKNOWN_TASK_TITLE: &str = "Unknown task";
}

/// Live-update notification tuning
pub mod notification {
    /// Suggested display lifetime for a live-update notification in seconds.
    /// The tracker only emits; expiry belongs to consumers with a transient
    /// display surface. The plain-text CLI prints each notification once and
    /// never expires it, so nothing in this binary reads the value.
    pub const DISPLAY_SECONDS: u64 = 6;
}

/// Environment variable names
pub mod env_vars {
    /// Override for the legacy API root
    pub const LEGACY_API_ROOT: &str = "QUIZBOARD_LEGACY_API_ROOT";

    /// Override for the modern API root
    pub const MODERN_API_ROOT: &str = "QUIZBOARD_MODERN_API_ROOT";

    /// Credential override (takes precedence over the config file)
    pub const CREDENTIAL: &str = "QUIZBOARD_CREDENTIAL";

    /// HTTP timeout override in seconds
    pub const HTTP_TIMEOUT: &str = "QUIZBOARD_HTTP_TIMEOUT";

    /// Log file path override
    pub const LOG_FILE: &str = "QUIZBOARD_LOG_FILE";
}
