//! Session orchestration
//!
//! One `ScoreboardSession` owns everything a selected game needs: the
//! fallback sequencer, the reconciled catalogs, the poll diff tracker, and
//! a generation counter that ties every in-flight request to the selection
//! it was issued for. Snapshots are atomic wholesale replacements; a
//! response whose generation no longer matches the active selection is
//! dropped on arrival instead of overwriting newer data.

use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::data_fetcher::endpoints::{EndpointConfig, Operation};
use crate::data_fetcher::models::{
    Answer, GameSession, LiveUpdate, Photo, Scoreboard, TaskDefinition, TeamResult,
};
use crate::data_fetcher::photos::collect_photos;
use crate::data_fetcher::poll_tracker::PollDiffTracker;
use crate::data_fetcher::processors;
use crate::data_fetcher::reconcile::reconcile_tasks;
use crate::data_fetcher::sequencer::{FallbackSequencer, create_http_client};
use crate::data_fetcher::transport::ApiAccess;
use crate::error::AppError;

pub struct ScoreboardSession {
    sequencer: FallbackSequencer,
    tracker: PollDiffTracker,
    /// Bumped on every game change; snapshots are keyed to the generation
    /// they were issued under and stale ones are ignored on arrival.
    generation: u64,
    active_game: Option<String>,
    scoreboard: Option<Scoreboard>,
}

impl ScoreboardSession {
    /// Build a session from a credential and configuration. The credential
    /// is classified once here and drives every subsequent request.
    pub fn new(credential: &str, config: &Config) -> Result<Self, AppError> {
        let access =
            ApiAccess::with_roots(credential, &config.legacy_api_root, &config.modern_api_root);
        let client = create_http_client(config.http_timeout_seconds)?;
        let endpoints = EndpointConfig {
            relay_hosts: config.relay_hosts.clone(),
        };
        info!(dialect = ?access.dialect, "Session created");
        Ok(Self {
            sequencer: FallbackSequencer::new(client, access, endpoints),
            tracker: PollDiffTracker::new(),
            generation: 0,
            active_game: None,
            scoreboard: None,
        })
    }

    /// Construct from an existing sequencer, for tests
    #[doc(hidden)]
    pub fn from_sequencer(sequencer: FallbackSequencer) -> Self {
        Self {
            sequencer,
            tracker: PollDiffTracker::new(),
            generation: 0,
            active_game: None,
            scoreboard: None,
        }
    }

    pub fn scoreboard(&self) -> Option<&Scoreboard> {
        self.scoreboard.as_ref()
    }

    pub fn active_game(&self) -> Option<&str> {
        self.active_game.as_deref()
    }

    /// List the games this credential can see. Soft: transport failures
    /// degrade to an empty list, credential rejection propagates.
    #[instrument(skip(self))]
    pub async fn list_games(&self) -> Result<Vec<GameSession>, AppError> {
        let records = self.sequencer.resolve(Operation::Games, None).await?;
        Ok(records.iter().filter_map(processors::decode_game).collect())
    }

    /// Select a game and run the initial full-catalog load: game info, task
    /// catalog, and first results snapshot fetched concurrently, joined
    /// before reconciliation. This is the one path where a total results
    /// failure (or a credential rejection from any fetch) is user-visible.
    #[instrument(skip(self))]
    pub async fn load_game(&mut self, game_id: &str) -> Result<&Scoreboard, AppError> {
        self.generation += 1;
        self.tracker.reset();
        self.active_game = Some(game_id.to_string());
        self.scoreboard = None;

        let (info_records, task_records, result_records) = tokio::join!(
            self.sequencer.resolve(Operation::GameInfo, Some(game_id)),
            self.sequencer.resolve(Operation::Tasks, Some(game_id)),
            self.sequencer.resolve(Operation::Results, Some(game_id)),
        );

        // Auth errors surface from whichever fetch hit one first; the
        // results fetch is additionally critical in its own right.
        let info_records = info_records?;
        let task_records = task_records?;
        let result_records = result_records?;

        // A game id no endpoint knows anything about is a selection error,
        // not an empty-but-live event.
        if info_records.is_empty() && task_records.is_empty() && result_records.is_empty() {
            return Err(AppError::game_not_found(game_id));
        }

        let game = info_records
            .first()
            .and_then(processors::decode_game)
            .unwrap_or_else(|| GameSession {
                id: game_id.to_string(),
                name: game_id.to_string(),
                ..GameSession::default()
            });

        let teams = processors::decode_results(&result_records);
        let tasks = reconcile_with_answers(&task_records, &teams);

        let board = Scoreboard { game, tasks, teams };
        self.tracker
            .observe(game_id, board.total_answer_count());
        info!(
            game_id,
            teams = board.teams.len(),
            tasks = board.tasks.len(),
            "Initial load complete"
        );
        self.scoreboard = Some(board);
        Ok(self.scoreboard.as_ref().expect("scoreboard just set"))
    }

    /// Fetch a fresh results snapshot for the active game.
    ///
    /// Background semantics: failures are logged and leave the previous
    /// snapshot untouched (stale-but-present beats empty), a snapshot issued
    /// under an older generation is discarded on arrival, and a successful
    /// snapshot replaces the old one wholesale before being fed to the diff
    /// tracker. Returns the tracker's emission, if any.
    ///
    /// At-most-one-poll-in-flight is the caller's loop discipline: awaiting
    /// each poll to completion (the watch loop uses a skipping interval), so
    /// ticks elapsing during a slow poll coalesce instead of stacking.
    #[instrument(skip(self))]
    pub async fn poll_results(&mut self) -> Result<Option<LiveUpdate>, AppError> {
        let Some(game_id) = self.active_game.clone() else {
            return Ok(None);
        };
        let issued_generation = self.generation;

        let result_records = match self
            .sequencer
            .resolve(Operation::Results, Some(&game_id))
            .await
        {
            Ok(records) => records,
            Err(e) => {
                warn!(game_id, error = %e, "Background poll failed, keeping previous snapshot");
                return Ok(None);
            }
        };

        if self.generation != issued_generation || self.active_game.as_deref() != Some(&game_id) {
            info!(game_id, "Dropping stale snapshot from previous selection");
            return Ok(None);
        }

        let teams = processors::decode_results(&result_records);
        let update = self.apply_snapshot(&game_id, teams);
        Ok(update)
    }

    /// Swap in a new snapshot wholesale and observe it for diffing
    fn apply_snapshot(&mut self, game_id: &str, teams: Vec<TeamResult>) -> Option<LiveUpdate> {
        let board = match self.scoreboard.as_mut() {
            Some(board) => board,
            None => return None,
        };
        // Answers may reference tasks the catalog has not seen yet
        let authoritative = std::mem::take(&mut board.tasks);
        board.tasks = reconcile_tasks(authoritative, &collect_answers(&teams));
        board.teams = teams;
        self.tracker.observe(game_id, board.total_answer_count())
    }

    /// Build the photo gallery on demand: dedicated photo endpoints plus
    /// images embedded in the current snapshot's answer payloads. Soft all
    /// the way down: any fetch failure, credential rejection included, is
    /// logged and the gallery degrades to whatever the answer payloads held.
    #[instrument(skip(self))]
    pub async fn fetch_photos(&self) -> Result<Vec<Photo>, AppError> {
        let game_id = self.active_game.as_deref();
        let dedicated = match self.sequencer.resolve(Operation::Photos, game_id).await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Photo endpoints unavailable, harvesting answers only");
                Vec::new()
            }
        };
        let teams: &[TeamResult] = self
            .scoreboard
            .as_ref()
            .map(|board| board.teams.as_slice())
            .unwrap_or(&[]);
        Ok(collect_photos(&[dedicated], teams))
    }
}

fn collect_answers(teams: &[TeamResult]) -> Vec<Answer> {
    teams
        .iter()
        .flat_map(|team| team.answers.iter().cloned())
        .collect()
}

fn reconcile_with_answers(task_records: &[Value], teams: &[TeamResult]) -> Vec<TaskDefinition> {
    let authoritative: Vec<TaskDefinition> = task_records
        .iter()
        .filter_map(processors::decode_task)
        .collect();
    reconcile_tasks(authoritative, &collect_answers(teams))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::sequencer::create_http_client;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn session_for(server_uri: &str) -> ScoreboardSession {
        // Bare token: modern dialect, so the modern path spellings are
        // tried first against the mock server.
        let access = ApiAccess::with_roots("testtoken", server_uri, server_uri);
        let client = create_http_client(2).expect("client");
        let sequencer =
            FallbackSequencer::new(client, access, EndpointConfig { relay_hosts: vec![] });
        ScoreboardSession::from_sequencer(sequencer)
    }

    async fn mount_game(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/games/g1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"id": "g1", "name": "Harbor Rally"})),
            )
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/games/g1/tasks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [
                {"id": "t1", "title": "Find the anchor", "type": "question"},
                {"id": "t2", "title": "Photo at the pier", "type": "photo"}
            ]})))
            .mount(server)
            .await;
    }

    fn results_body(answer_count: usize) -> serde_json::Value {
        let answers: Vec<serde_json::Value> = (0..answer_count)
            .map(|i| json!({"taskId": format!("t{}", i + 1), "isCorrect": true}))
            .collect();
        json!([
            {"name": "Foxes", "score": answer_count, "answers": answers},
            {"name": "Owls", "score": 1, "answers": [{"taskId": "t1"}]}
        ])
    }

    #[tokio::test]
    async fn test_initial_load_joins_and_reconciles() {
        let server = MockServer::start().await;
        mount_game(&server).await;
        Mock::given(method("GET"))
            .and(path("/games/g1/results"))
            .respond_with(ResponseTemplate::new(200).set_body_json(results_body(3)))
            .mount(&server)
            .await;

        let mut session = session_for(&server.uri());
        let board = session.load_game("g1").await.expect("initial load");
        assert_eq!(board.game.name, "Harbor Rally");
        assert_eq!(board.teams[0].name, "Foxes");
        assert_eq!(board.teams[0].position, 1);
        assert_eq!(board.teams[1].position, 2);
        // t3 only exists as an answer reference: synthesized
        let t3 = board.tasks.iter().find(|t| t.id == "t3").expect("synthetic t3");
        assert!(t3.is_synthetic());
        assert_eq!(board.tasks[0].id, "t1");
    }

    #[tokio::test]
    async fn test_poll_emits_live_update_on_growth() {
        let server = MockServer::start().await;
        mount_game(&server).await;
        // First snapshot: 4 answers total; later snapshots: 6
        Mock::given(method("GET"))
            .and(path("/games/g1/results"))
            .respond_with(ResponseTemplate::new(200).set_body_json(results_body(3)))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/games/g1/results"))
            .respond_with(ResponseTemplate::new(200).set_body_json(results_body(5)))
            .mount(&server)
            .await;

        let mut session = session_for(&server.uri());
        session.load_game("g1").await.unwrap();

        let update = session.poll_results().await.unwrap();
        let update = update.expect("two new answers should notify");
        assert_eq!(update.delta, 2);

        // Same total again: no emission
        assert!(session.poll_results().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_background_poll_failure_keeps_previous_snapshot() {
        let server = MockServer::start().await;
        mount_game(&server).await;
        Mock::given(method("GET"))
            .and(path("/games/g1/results"))
            .respond_with(ResponseTemplate::new(200).set_body_json(results_body(2)))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/games/g1/results"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        // Legacy-spelling fallback candidate also fails
        Mock::given(method("GET"))
            .and(path("/teams"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut session = session_for(&server.uri());
        session.load_game("g1").await.unwrap();
        let teams_before = session.scoreboard().unwrap().teams.len();

        let update = session.poll_results().await.expect("background failure is not an error");
        assert!(update.is_none());
        assert_eq!(session.scoreboard().unwrap().teams.len(), teams_before);
    }

    #[tokio::test]
    async fn test_initial_load_propagates_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let mut session = session_for(&server.uri());
        let err = session.load_game("g1").await.expect_err("403 must surface");
        assert!(err.is_auth_error());
    }

    #[tokio::test]
    async fn test_unknown_game_id_is_an_error() {
        let server = MockServer::start().await;
        // Every endpoint answers cleanly but knows nothing
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let mut session = session_for(&server.uri());
        let err = session.load_game("no-such-game").await.expect_err("nothing knows this id");
        assert!(matches!(err, AppError::GameNotFound { .. }));
    }

    #[tokio::test]
    async fn test_poll_without_selection_is_noop() {
        let server = MockServer::start().await;
        let mut session = session_for(&server.uri());
        assert!(session.poll_results().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fetch_photos_merges_dedicated_and_answers() {
        let server = MockServer::start().await;
        mount_game(&server).await;
        Mock::given(method("GET"))
            .and(path("/games/g1/results"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "Foxes", "score": 2, "answers": [
                    {"taskId": "t2", "photoUrl": "https://x/from-answer.jpg"}
                ]}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/games/g1/photos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [
                {"id": "p1", "url": "https://x/1.jpg", "teamName": "Foxes"}
            ]})))
            .mount(&server)
            .await;

        let mut session = session_for(&server.uri());
        session.load_game("g1").await.unwrap();
        let photos = session.fetch_photos().await.unwrap();
        let urls: Vec<&str> = photos.iter().map(|p| p.url.as_str()).collect();
        assert!(urls.contains(&"https://x/1.jpg"));
        assert!(urls.contains(&"https://x/from-answer.jpg"));
        assert_eq!(photos.len(), 2);
    }

    #[tokio::test]
    async fn test_gallery_auth_failure_degrades_to_answer_photos() {
        let server = MockServer::start().await;
        mount_game(&server).await;
        Mock::given(method("GET"))
            .and(path("/games/g1/results"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "Foxes", "score": 1, "answers": [
                    {"taskId": "t2", "photoUrl": "https://x/from-answer.jpg"}
                ]}
            ])))
            .mount(&server)
            .await;
        // The gallery endpoint rejects the credential outright
        Mock::given(method("GET"))
            .and(path("/games/g1/photos"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let mut session = session_for(&server.uri());
        session.load_game("g1").await.unwrap();

        let photos = session
            .fetch_photos()
            .await
            .expect("gallery degrades instead of propagating");
        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0].url, "https://x/from-answer.jpg");
    }

    #[tokio::test]
    async fn test_game_change_resets_diff_tracking() {
        let server = MockServer::start().await;
        mount_game(&server).await;
        Mock::given(method("GET"))
            .and(path("/games/g1/results"))
            .respond_with(ResponseTemplate::new(200).set_body_json(results_body(2)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/games/g2"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": "g2", "name": "Second"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/games/g2/tasks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "t1"}])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/games/g2/results"))
            .respond_with(ResponseTemplate::new(200).set_body_json(results_body(5)))
            .mount(&server)
            .await;

        let mut session = session_for(&server.uri());
        session.load_game("g1").await.unwrap();
        session.load_game("g2").await.unwrap();
        // First poll after a game change measures from g2's own baseline,
        // so an unchanged total emits nothing even though g1's total differed
        assert!(session.poll_results().await.unwrap().is_none());
    }
}
