//! Breakout entry point
//!
//! Sets up the terminal, builds the game from the command line difficulty and
//! runs the loop until the player quits.

use std::io;
use std::process::ExitCode;

use breakout::platform::{TerminalInput, TerminalSession};
use breakout::renderer::TerminalRenderer;
use breakout::sim::GameState;
use breakout::{GameLoop, InitError, Settings, SystemClock};

fn main() -> ExitCode {
    env_logger::init();

    let settings = Settings::from_args(std::env::args().skip(1));
    log::info!(
        "Breakout starting: difficulty {}, {} fps cap",
        settings.difficulty.as_str(),
        settings.target_fps
    );

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("breakout: {}", e);
            ExitCode::from(1)
        }
    }
}

fn run(settings: &Settings) -> Result<(), InitError> {
    // Session first: if the bricks cannot be allocated, dropping it restores the terminal
    let session = TerminalSession::start()?;
    let mut game = GameState::new(settings.difficulty)?;

    let (columns, rows) = session.size();
    let mut renderer = TerminalRenderer::new(io::stdout(), columns, rows, game.arena);
    let mut input = TerminalInput::new(session.key_release_events());
    let mut game_loop = GameLoop::new(SystemClock::new(), settings.frame_budget());

    let stats = game_loop.run(&mut game, &mut input, &mut renderer);
    log::info!(
        "Exiting after {} frames ({} overruns, {} render failures), {} bricks left",
        stats.frames,
        stats.overruns,
        stats.render_failures,
        game.bricks.visible_count()
    );

    Ok(())
}
