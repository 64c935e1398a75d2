//! Candidate endpoint catalog and relay URL building
//!
//! Every logical query maps to an ordered list of candidate REST paths
//! because the two API dialects expose the same concepts under different
//! conventions, and a wrongly-guessed path answers with a clean-but-empty
//! 2xx. The catalog is immutable configuration injected into the sequencer
//! at construction; nothing here is module-level mutable state.

use crate::constants::relay;
use crate::data_fetcher::transport::{ApiAccess, Dialect};

/// The logical queries the sequencer can resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Games,
    GameInfo,
    Tasks,
    Results,
    Photos,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Games => "games",
            Operation::GameInfo => "game-info",
            Operation::Tasks => "tasks",
            Operation::Results => "results",
            Operation::Photos => "photos",
        }
    }

    /// Whether an empty 2xx should advance to the next candidate endpoint.
    /// An empty list from the wrong dialect's path is indistinguishable from
    /// real emptiness, so every operation keeps probing; the distinction
    /// only matters once all candidates are exhausted (see the sequencer).
    pub fn empty_is_failure(&self) -> bool {
        true
    }

    /// Whether a total fetch failure may degrade to an empty collection.
    /// Only team results are critical; everything else is soft.
    pub fn is_soft(&self) -> bool {
        !matches!(self, Operation::Results)
    }
}

/// Immutable endpoint configuration handed to the sequencer
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    pub relay_hosts: Vec<String>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            relay_hosts: relay::HOSTS.iter().map(|h| h.to_string()).collect(),
        }
    }
}

impl EndpointConfig {
    /// Build the ordered candidate URL list for one operation. The path
    /// convention matching the session's dialect comes first; the other
    /// dialect's spelling follows as a fallback.
    pub fn candidates(&self, op: Operation, access: &ApiAccess, game_id: Option<&str>) -> Vec<String> {
        let root = &access.base_root;
        let id = game_id.unwrap_or_default();
        let (modern, legacy): (Vec<String>, Vec<String>) = match op {
            Operation::Games => (
                vec![format!("{root}/games?limit=200")],
                vec![format!("{root}/game/list?sort=name")],
            ),
            Operation::GameInfo => (
                vec![format!("{root}/games/{id}")],
                vec![format!("{root}/game/info?gameId={id}")],
            ),
            Operation::Tasks => (
                vec![format!("{root}/games/{id}/tasks")],
                vec![format!("{root}/questions?gameId={id}")],
            ),
            Operation::Results => (
                vec![format!("{root}/games/{id}/results?includeAnswers=true")],
                vec![format!("{root}/teams?gameId={id}&answers=1&sort=score")],
            ),
            Operation::Photos => (
                vec![format!("{root}/games/{id}/photos")],
                vec![format!("{root}/media?gameId={id}&type=photo")],
            ),
        };
        match access.dialect {
            Dialect::Modern => modern.into_iter().chain(legacy).collect(),
            Dialect::Legacy => legacy.into_iter().chain(modern).collect(),
        }
    }

    /// Build the ordered transport URL list for one candidate: the direct
    /// URL first, then each relay passthrough wrapping it.
    pub fn transports(&self, target_url: &str) -> Vec<String> {
        let mut urls = Vec::with_capacity(1 + self.relay_hosts.len());
        urls.push(target_url.to_string());
        for relay in &self.relay_hosts {
            urls.push(wrap_relay(relay, target_url));
        }
        urls
    }
}

/// Wrap a target URL into a relay passthrough request. The relay forwards
/// status code and body transparently; the target travels query-encoded.
pub fn wrap_relay(relay_host: &str, target_url: &str) -> String {
    format!("{relay_host}?target={}", urlencoding::encode(target_url))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modern_access() -> ApiAccess {
        ApiAccess::with_roots("token123", "http://legacy.test/v1", "http://modern.test/v3")
    }

    fn legacy_access() -> ApiAccess {
        ApiAccess::with_roots("ApiKey-v1 tok", "http://legacy.test/v1", "http://modern.test/v3")
    }

    #[test]
    fn test_modern_dialect_prefers_modern_paths() {
        let config = EndpointConfig::default();
        let candidates = config.candidates(Operation::Results, &modern_access(), Some("g7"));
        assert_eq!(candidates.len(), 2);
        assert_eq!(
            candidates[0],
            "http://modern.test/v3/games/g7/results?includeAnswers=true"
        );
        assert!(candidates[1].contains("/teams?gameId=g7"));
    }

    #[test]
    fn test_legacy_dialect_prefers_legacy_paths() {
        let config = EndpointConfig::default();
        let candidates = config.candidates(Operation::Tasks, &legacy_access(), Some("g7"));
        assert!(candidates[0].contains("/questions?gameId=g7"));
        assert!(candidates[1].contains("/games/g7/tasks"));
    }

    #[test]
    fn test_every_operation_has_multiple_candidates() {
        let config = EndpointConfig::default();
        let access = modern_access();
        for op in [
            Operation::Games,
            Operation::GameInfo,
            Operation::Tasks,
            Operation::Results,
            Operation::Photos,
        ] {
            let candidates = config.candidates(op, &access, Some("g1"));
            assert!(
                candidates.len() >= 2,
                "{} needs a fallback candidate",
                op.name()
            );
        }
    }

    #[test]
    fn test_transports_direct_first_then_relays() {
        let config = EndpointConfig {
            relay_hosts: vec!["https://relay.test/fetch".to_string()],
        };
        let transports = config.transports("http://modern.test/v3/games?limit=200");
        assert_eq!(transports.len(), 2);
        assert_eq!(transports[0], "http://modern.test/v3/games?limit=200");
        assert_eq!(
            transports[1],
            "https://relay.test/fetch?target=http%3A%2F%2Fmodern.test%2Fv3%2Fgames%3Flimit%3D200"
        );
    }

    #[test]
    fn test_wrap_relay_encodes_query_characters() {
        let wrapped = wrap_relay("https://relay.test/get", "http://a.test/x?y=1&z=2");
        assert!(!wrapped["https://relay.test/get?target=".len()..].contains('&'));
        assert!(wrapped.contains("%26z%3D2"));
    }

    #[test]
    fn test_results_is_the_only_critical_operation() {
        assert!(!Operation::Results.is_soft());
        assert!(Operation::Games.is_soft());
        assert!(Operation::GameInfo.is_soft());
        assert!(Operation::Tasks.is_soft());
        assert!(Operation::Photos.is_soft());
    }
}
