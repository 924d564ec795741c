use std::time::Duration;

use breakout::platform::ScriptedInput;
use breakout::renderer::{Canvas, Color};
use breakout::sim::{GameState, TickInput};
use breakout::{Difficulty, GameLoop, LoopState, ManualClock, Settings};
use glam::Vec2;

fn canvas_for(game: &GameState) -> Canvas {
    // One canvas pixel per 10 arena pixels
    Canvas::new(80, 60, game.arena)
}

#[test]
fn test_startup_from_easy_argument() {
    let settings = Settings::from_args(["1"]);
    let game = GameState::new(settings.difficulty).unwrap();

    assert_eq!(settings.difficulty, Difficulty::Easy);
    assert!((game.paddle.speed - 320.0).abs() < 1e-4);
    assert!((game.ball.vel.x - 160.0).abs() < 1e-4);
    assert!((game.ball.vel.y + 160.0).abs() < 1e-4);
    assert_eq!(game.bricks.visible_count(), 50);
}

#[test]
fn test_invalid_argument_defaults_to_medium() {
    for arg in ["0", "7", "abc", ""] {
        let settings = Settings::from_args([arg]);
        let game = GameState::new(settings.difficulty).unwrap();
        assert_eq!(game.paddle.speed, 400.0, "arg {:?}", arg);
        assert_eq!(game.ball.vel, Vec2::new(200.0, -200.0));
    }
}

#[test]
fn test_slow_frame_moves_ball_by_measured_time() {
    let settings = Settings::from_args(["2"]);
    let mut game = GameState::new(settings.difficulty).unwrap();
    // Every frame takes 100 ms, far over the 16 ms budget
    let clock = ManualClock::new(Duration::from_millis(100));
    let mut game_loop = GameLoop::new(clock, settings.frame_budget());
    let mut input = ScriptedInput::new(vec![TickInput::default(); 2]);
    let mut canvas = canvas_for(&game);

    // First frame starts at the loop's creation instant
    assert_eq!(
        game_loop.run_frame(&mut game, &mut input, &mut canvas),
        LoopState::Running
    );
    assert_eq!(game.ball.pos, Vec2::new(400.0, 300.0));

    game_loop.run_frame(&mut game, &mut input, &mut canvas);
    assert!((game.ball.pos.x - 420.0).abs() < 1e-3);
    assert!((game.ball.pos.y - 280.0).abs() < 1e-3);
    assert_eq!(game_loop.stats().overruns, 2);

    assert_eq!(
        game_loop.run_frame(&mut game, &mut input, &mut canvas),
        LoopState::Terminated
    );
}

#[test]
fn test_first_brick_hit_leaves_49() {
    let mut game = GameState::new(Difficulty::Medium).unwrap();
    let mut game_loop = GameLoop::new(ManualClock::default(), Settings::default().frame_budget());
    let mut canvas = canvas_for(&game);
    // Ball flies up-right from the center and reaches row 4 in well under a second
    let mut input = ScriptedInput::new(vec![TickInput::default(); 120]);

    let mut destroyed = Vec::new();
    while game_loop.run_frame(&mut game, &mut input, &mut canvas) == LoopState::Running {
        if let Some(index) = game_loop.last_events().brick_destroyed {
            destroyed.push(index);
            break;
        }
    }

    assert_eq!(destroyed.len(), 1);
    assert_eq!(game.bricks.row_of(destroyed[0]), 4);
    assert_eq!(game.bricks.visible_count(), 49);
    assert!(game.ball.vel.y > 0.0);
}

#[test]
fn test_frame_is_drawn_with_palette() {
    let mut game = GameState::new(Difficulty::Medium).unwrap();
    let mut game_loop = GameLoop::new(ManualClock::default(), Settings::default().frame_budget());
    let mut canvas = canvas_for(&game);
    let mut input = ScriptedInput::new(vec![TickInput::default()]);

    game_loop.run(&mut game, &mut input, &mut canvas);

    assert_eq!(canvas.frames_presented(), 1);
    // Row 0 brick at (35..95, 50..70) covers pixel (5, 5)
    assert_eq!(canvas.pixel(5, 5), Some(Color::RED));
    // Row 4 brick at (35..95, 150..170)
    assert_eq!(canvas.pixel(5, 15), Some(Color::ORANGE));
    // Paddle at (350..450, 570..590)
    assert_eq!(canvas.pixel(40, 58), Some(Color::WHITE));
    // Ball at the center
    assert_eq!(canvas.pixel(40, 30), Some(Color::WHITE));
    // Background
    assert_eq!(canvas.pixel(0, 40), Some(Color::BLACK));
}
