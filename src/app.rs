use crate::data_fetcher::models::{LiveUpdate, Photo, Scoreboard};
use crate::data_fetcher::session::ScoreboardSession;
use crate::error::AppError;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::info;

/// Print the current ranking as a plain table
pub fn print_scoreboard(board: &Scoreboard) {
    println!();
    println!("=== {} ===", board.game.name);
    if let Some(intro) = &board.game.intro {
        println!("{intro}");
    }
    println!("{:>4}  {:<24} {:>8}  {:>7}  {:>5}", "POS", "TEAM", "SCORE", "CORRECT", "WRONG");
    for team in &board.teams {
        println!(
            "{:>4}  {:<24} {:>8}  {:>7}  {:>5}",
            team.position,
            team.name,
            team.score,
            team.correct_answers
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
            team.incorrect_answers
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
        );
    }
    println!(
        "({} teams, {} tasks, {} answers)",
        board.teams.len(),
        board.tasks.len(),
        board.total_answer_count()
    );
}

/// Print the photo gallery summary
pub fn print_photos(photos: &[Photo]) {
    println!();
    println!("--- Photos ({}) ---", photos.len());
    for photo in photos {
        let team = photo.team_name.as_deref().unwrap_or("unknown team");
        let task = photo.task_title.as_deref().unwrap_or("-");
        println!("{team:<24} {task:<32} {}", photo.url);
    }
}

fn print_notification(update: &LiveUpdate) {
    println!(">>> {} - {}", update.message, update.subtext);
}

/// Watch loop: poll the active game on a fixed interval until Ctrl-C.
///
/// The interval skips missed ticks and each poll is awaited to completion
/// before the next tick is honored, so at most one poll is ever in flight.
pub async fn run_watch(
    session: &mut ScoreboardSession,
    interval_seconds: u64,
) -> Result<(), AppError> {
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_seconds));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately and the initial load already
    // rendered, so consume it before entering the loop.
    ticker.tick().await;

    info!(interval_seconds, "Watching for updates (Ctrl-C to stop)");
    println!("Watching for updates every {interval_seconds}s (Ctrl-C to stop)...");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Watch loop interrupted");
                return Ok(());
            }
            _ = ticker.tick() => {
                if let Some(update) = session.poll_results().await? {
                    print_notification(&update);
                    if let Some(board) = session.scoreboard() {
                        print_scoreboard(board);
                    }
                }
            }
        }
    }
}
