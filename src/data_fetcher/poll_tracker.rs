//! Poll-to-poll answer diffing
//!
//! A tiny two-state machine per selected game: the first snapshot observed
//! only establishes a baseline; afterwards every growth in the total answer
//! count emits one transient live-update event. Shrinking totals (upstream
//! corrections) update the baseline silently. A game change resets to
//! baseline so a stale total can never fire a notification against a new
//! selection.

use crate::data_fetcher::models::LiveUpdate;
use tracing::debug;

#[derive(Debug, Default)]
pub struct PollDiffTracker {
    game_id: Option<String>,
    observed_total: Option<u64>,
}

impl PollDiffTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe one results snapshot for a game. Returns a notification only
    /// when the tracker was already armed for this game and the total grew.
    pub fn observe(&mut self, game_id: &str, total_answers: u64) -> Option<LiveUpdate> {
        if self.game_id.as_deref() != Some(game_id) {
            debug!(game_id, "Poll tracker re-baselining for new game");
            self.game_id = Some(game_id.to_string());
            self.observed_total = Some(total_answers);
            return None;
        }

        let previous = match self.observed_total {
            Some(previous) => previous,
            None => {
                self.observed_total = Some(total_answers);
                return None;
            }
        };

        self.observed_total = Some(total_answers);
        if total_answers > previous {
            let delta = total_answers - previous;
            debug!(game_id, delta, "Answer total grew");
            Some(LiveUpdate::from_delta(delta))
        } else {
            None
        }
    }

    /// Drop all state; the next observation becomes a baseline again
    pub fn reset(&mut self) {
        self.game_id = None;
        self.observed_total = None;
    }
}
