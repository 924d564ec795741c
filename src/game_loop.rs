//! Game loop driver
//!
//! One iteration: measure delta time, poll input, advance the simulation,
//! draw, then sleep off whatever is left of the frame budget. Delta time is
//! measured rather than assumed, so an overrunning frame only means a larger
//! step next time.

use std::time::{Duration, Instant};

use crate::platform::InputSource;
use crate::renderer::{Renderer, draw_frame};
use crate::sim::{GameState, TickEvents, advance};

/// Monotonic time source with a blocking sleep
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin
    fn now(&self) -> Duration;
    fn sleep(&mut self, duration: Duration);

    /// Called once a frame's work is done, before the governor measures it.
    /// Virtual clocks charge simulated work here.
    fn frame_work_done(&mut self) {}
}

/// Wall clock backed by `Instant` and `thread::sleep`
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Virtual clock for headless runs. Time moves only when slept on, when
/// advanced by hand, or by `work_per_frame` as each frame finishes its work.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Duration,
    pub work_per_frame: Duration,
    /// Total time spent sleeping
    pub slept: Duration,
}

impl ManualClock {
    pub fn new(work_per_frame: Duration) -> Self {
        Self {
            work_per_frame,
            ..Self::default()
        }
    }

    /// Move time forward without sleeping
    pub fn advance(&mut self, duration: Duration) {
        self.now += duration;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        self.now += duration;
        self.slept += duration;
    }

    fn frame_work_done(&mut self) {
        self.now += self.work_per_frame;
    }
}

/// Driver state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}

/// Frame counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frames: u64,
    /// Frames whose work used up the whole budget (no sleep)
    pub overruns: u64,
    pub render_failures: u64,
}

/// Owns loop timing and runs frames against a game state
pub struct GameLoop<C: Clock> {
    state: LoopState,
    clock: C,
    frame_budget: Duration,
    last_tick: Duration,
    stats: FrameStats,
    /// Start of the current frame-rate measurement window
    window_start: Duration,
    window_frames: u64,
    last_events: TickEvents,
}

impl<C: Clock> GameLoop<C> {
    pub fn new(clock: C, frame_budget: Duration) -> Self {
        let now = clock.now();
        Self {
            state: LoopState::Running,
            clock,
            frame_budget,
            last_tick: now,
            stats: FrameStats::default(),
            window_start: now,
            window_frames: 0,
            last_events: TickEvents::default(),
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn frame_budget(&self) -> Duration {
        self.frame_budget
    }

    /// What the most recent tick did
    pub fn last_events(&self) -> TickEvents {
        self.last_events
    }

    /// Run a single iteration. Once terminated, further calls do nothing.
    pub fn run_frame<I, R>(
        &mut self,
        game: &mut GameState,
        input: &mut I,
        renderer: &mut R,
    ) -> LoopState
    where
        I: InputSource + ?Sized,
        R: Renderer + ?Sized,
    {
        if self.state == LoopState::Terminated {
            return self.state;
        }

        let frame_start = self.clock.now();
        let dt = frame_start.saturating_sub(self.last_tick).as_secs_f32();
        self.last_tick = frame_start;

        if input.poll_quit_requested() {
            log::info!("Quit requested after {} frames", self.stats.frames);
            self.state = LoopState::Terminated;
            return self.state;
        }

        let tick_input = input.tick_input();
        self.last_events = advance(game, &tick_input, dt);

        let failures = draw_frame(renderer, game);
        self.stats.render_failures += failures as u64;

        self.clock.frame_work_done();

        let elapsed = self.clock.now().saturating_sub(frame_start);
        if elapsed < self.frame_budget {
            self.clock.sleep(self.frame_budget - elapsed);
        } else {
            self.stats.overruns += 1;
            log::trace!(
                "Frame overran budget: {:?} >= {:?}",
                elapsed,
                self.frame_budget
            );
        }

        self.stats.frames += 1;
        self.report_rate();

        self.state
    }

    /// Run frames until input asks to quit
    pub fn run<I, R>(&mut self, game: &mut GameState, input: &mut I, renderer: &mut R) -> FrameStats
    where
        I: InputSource + ?Sized,
        R: Renderer + ?Sized,
    {
        while self.run_frame(game, input, renderer) == LoopState::Running {}
        self.stats
    }

    fn report_rate(&mut self) {
        self.window_frames += 1;
        let now = self.clock.now();
        let window = now.saturating_sub(self.window_start);
        if window >= Duration::from_secs(1) {
            log::debug!(
                "{:.1} fps, {} overruns total",
                self.window_frames as f64 / window.as_secs_f64(),
                self.stats.overruns
            );
            self.window_start = now;
            self.window_frames = 0;
        }
    }
}
