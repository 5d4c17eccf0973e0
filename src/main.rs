use std::io::{self, Stdout, Write};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use maze_game::config::Config;
use maze_game::input::{command_for, Command};
use maze_game::render::Renderer;
use maze_game::Game;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    setup_logging(&config)?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &config);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    if let Err(e) = &result {
        tracing::error!("game loop failed: {e:#}");
    }
    result
}

/// File-only logging; the terminal belongs to the game.
fn setup_logging(config: &Config) -> Result<()> {
    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("creating log dir {}", config.log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&config.log_dir, "maze.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // Keep the writer alive for the whole process.
    std::mem::forget(guard);

    tracing::info!(log_dir = %config.log_dir.display(), "logging initialized");
    Ok(())
}

fn run(stdout: &mut Stdout, config: &Config) -> Result<()> {
    let mut rng = config.rng();
    let mut game = Game::new(config.width, config.height, &mut rng)?;
    let mut renderer = Renderer::new(game.width(), game.height());
    let frame_time = Duration::from_micros(1_000_000 / config.fps.max(1));
    tracing::info!(
        width = config.width,
        height = config.height,
        seed = ?config.seed,
        goal = ?game.state().goal(),
        "game started"
    );

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            let command = match event::read()? {
                Event::Key(key) => command_for(key),
                Event::Resize(..) => {
                    renderer.invalidate();
                    None
                }
                _ => None,
            };
            match command {
                Some(Command::Move(dir)) => {
                    game.attempt_move(dir);
                }
                Some(Command::Restart) => {
                    game.restart(&mut rng)?;
                    renderer.invalidate();
                }
                Some(Command::Quit) => {
                    tracing::info!(
                        moves = game.state().moves(),
                        status = ?game.state().status(),
                        "quit"
                    );
                    return Ok(());
                }
                None => {}
            }
        }

        renderer.render(stdout, &game, terminal::size()?)?;
        stdout.flush()?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}
