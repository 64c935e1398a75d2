// src/main.rs
mod app;
mod cli;
mod config;
mod constants;
mod data_fetcher;
mod error;
mod logging;

use clap::Parser;
use cli::Args;
use config::Config;
use data_fetcher::session::ScoreboardSession;
use error::AppError;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    if args.list_config {
        Config::display().await?;
        return Ok(());
    }

    let mut config = Config::load().await?;

    if args.clear_credential {
        config.credential = None;
        config.save().await?;
        println!("Saved credential cleared.");
        return Ok(());
    }

    let (_log_path, _guard) = logging::setup_logging(&args, &config).await?;

    // CLI flag wins over env/config; env overrides were applied at load
    let credential = args
        .credential
        .clone()
        .or_else(|| config.credential.clone())
        .ok_or_else(|| {
            AppError::config_error(
                "No credential supplied. Pass --credential, set QUIZBOARD_CREDENTIAL, or save one with --save-credential",
            )
        })?;

    if args.save_credential {
        config.credential = Some(credential.clone());
        config.save().await?;
        println!("Credential saved to {}", Config::get_config_path());
    }

    let mut session = ScoreboardSession::new(&credential, &config)?;

    let Some(game_id) = args.game.clone() else {
        // No game selected: list what the credential can see
        let games = session.list_games().await?;
        if games.is_empty() {
            println!("No games visible for this credential.");
            return Ok(());
        }
        println!("{:<16} NAME", "ID");
        for game in games {
            println!("{:<16} {}", game.id, game.name);
        }
        println!("\nRun again with --game <ID> to open a scoreboard.");
        return Ok(());
    };

    let board = session.load_game(&game_id).await?;
    app::print_scoreboard(board);

    if args.photos {
        let photos = session.fetch_photos().await?;
        app::print_photos(&photos);
    }

    if args.once {
        return Ok(());
    }

    let interval = args.interval.unwrap_or(config.poll_interval_seconds);
    app::run_watch(&mut session, interval).await
}
