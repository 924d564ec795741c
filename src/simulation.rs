//! Headless simulation
//!
//! Runs the real game loop against a virtual clock, an off-screen canvas and
//! a seeded random "player", then summarizes what happened. Used for soak
//! testing physics over long runs without a terminal.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::InitError;
use crate::game_loop::{Clock, GameLoop, LoopState, ManualClock};
use crate::platform::{InputSource, Key};
use crate::renderer::Canvas;
use crate::settings::{Difficulty, Settings};
use crate::sim::{GameState, TickInput};

/// Headless run parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    pub settings: Settings,
    /// Frames to run before quitting
    pub frames: u64,
    pub seed: u64,
    /// Simulated work per frame (milliseconds)
    pub work_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            frames: 3600,
            seed: 1,
            work_ms: 4,
        }
    }
}

impl SimConfig {
    /// Parse `--frames N`, `--seed S`, `--difficulty D`, `--work-ms W`.
    /// Unknown flags and unparsable values are logged and ignored.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();

        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            let value = args.get(i + 1).map(String::as_str);
            match (flag, value) {
                ("--frames", Some(v)) => match v.parse() {
                    Ok(n) => config.frames = n,
                    Err(_) => log::warn!("Ignoring invalid --frames value: {}", v),
                },
                ("--seed", Some(v)) => match v.parse() {
                    Ok(n) => config.seed = n,
                    Err(_) => log::warn!("Ignoring invalid --seed value: {}", v),
                },
                ("--work-ms", Some(v)) => match v.parse() {
                    Ok(n) => config.work_ms = n,
                    Err(_) => log::warn!("Ignoring invalid --work-ms value: {}", v),
                },
                ("--difficulty", Some(v)) => {
                    config.settings.difficulty = Difficulty::from_selector(v);
                }
                _ => {
                    log::warn!("Ignoring argument: {}", flag);
                    i += 1;
                    continue;
                }
            }
            i += 2;
        }

        config
    }
}

/// Random player: holds a direction for a random stretch, then re-rolls
pub struct RandomInput {
    rng: Pcg32,
    remaining_frames: u64,
    hold_frames: u32,
    current: TickInput,
}

impl RandomInput {
    pub fn new(seed: u64, frames: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            remaining_frames: frames,
            hold_frames: 0,
            current: TickInput::default(),
        }
    }
}

impl InputSource for RandomInput {
    fn poll_quit_requested(&mut self) -> bool {
        if self.remaining_frames == 0 {
            return true;
        }
        self.remaining_frames -= 1;

        if self.hold_frames == 0 {
            self.current = TickInput {
                move_left: self.rng.random_bool(0.45),
                move_right: self.rng.random_bool(0.45),
            };
            self.hold_frames = self.rng.random_range(5..60);
        }
        self.hold_frames -= 1;

        false
    }

    fn is_key_held(&self, key: Key) -> bool {
        match key {
            Key::MoveLeft => self.current.move_left,
            Key::MoveRight => self.current.move_right,
        }
    }
}

/// Outcome of a headless run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimReport {
    pub config: SimConfig,
    pub frames: u64,
    pub overruns: u64,
    pub simulated_seconds: f64,
    pub bricks_remaining: usize,
    pub balls_lost: u64,
    pub paddle_hits: u64,
    pub wall_bounces: u64,
    /// Frames where the paddle or ball broke an arena invariant
    pub invariant_violations: u64,
    pub final_state: GameState,
}

/// Paddle in range, ball inside side and top walls
fn invariants_hold(game: &GameState) -> bool {
    let paddle = &game.paddle;
    let ball = &game.ball;
    let w = game.arena.x;

    paddle.pos.x >= 0.0
        && paddle.pos.x <= w - paddle.size.x
        && ball.pos.x >= ball.radius
        && ball.pos.x <= w - ball.radius
        && ball.pos.y >= ball.radius
}

/// Run a headless game to completion
pub fn run(config: SimConfig) -> Result<SimReport, InitError> {
    let mut game = GameState::new(config.settings.difficulty)?;
    let clock = ManualClock::new(Duration::from_millis(config.work_ms));
    let mut game_loop = GameLoop::new(clock, config.settings.frame_budget());
    let mut input = RandomInput::new(config.seed, config.frames);
    let mut canvas = Canvas::new(160, 120, game.arena);

    log::info!(
        "Simulating {} frames (seed {}, difficulty {})",
        config.frames,
        config.seed,
        config.settings.difficulty.as_str()
    );

    let mut balls_lost = 0;
    let mut paddle_hits = 0;
    let mut wall_bounces = 0;
    let mut invariant_violations = 0;

    while game_loop.run_frame(&mut game, &mut input, &mut canvas) == LoopState::Running {
        let events = game_loop.last_events();
        if events.ball_lost() {
            balls_lost += 1;
        }
        if events.paddle_hit {
            paddle_hits += 1;
        }
        if events.walls.bounced() {
            wall_bounces += 1;
        }
        if !invariants_hold(&game) {
            invariant_violations += 1;
        }
    }

    let stats = game_loop.stats();
    Ok(SimReport {
        frames: stats.frames,
        overruns: stats.overruns,
        simulated_seconds: game_loop.clock().now().as_secs_f64(),
        bricks_remaining: game.bricks.visible_count(),
        balls_lost,
        paddle_hits,
        wall_bounces,
        invariant_violations,
        final_state: game,
        config,
    })
}
