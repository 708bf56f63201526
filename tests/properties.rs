//! Property tests for the simulation invariants

use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use twin_pong::Tuning;
use twin_pong::sim::{
    Ball, GameEvent, GameState, Kinematics, Paddle, Player, RoundPhase, Side, TickInput,
    ball_paddle, ball_terrain, tick, touching_side,
};

const ARENA: Vec2 = Vec2::new(1280.0, 720.0);

fn unit_direction() -> impl Strategy<Value = Vec2> {
    (0.0f32..std::f32::consts::TAU).prop_map(Vec2::from_angle)
}

proptest! {
    #[test]
    fn test_integrate_moves_by_velocity_times_delta(
        x in -2000.0f32..2000.0,
        y in -2000.0f32..2000.0,
        direction in unit_direction(),
        speed in 0.0f32..2000.0,
        delta in 0.0f32..1.0,
    ) {
        let mut kinematics = Kinematics {
            position: Vec2::new(x, y),
            move_speed: speed,
            move_direction: direction,
        };
        let expected = Vec2::new(x, y) + direction * (speed * delta);
        kinematics.integrate(delta);
        prop_assert_eq!(kinematics.position, expected);
    }

    #[test]
    fn test_zero_speed_never_moves(
        x in -2000.0f32..2000.0,
        y in -2000.0f32..2000.0,
        direction in unit_direction(),
        delta in 0.0f32..1000.0,
    ) {
        let mut kinematics = Kinematics {
            position: Vec2::new(x, y),
            move_speed: 0.0,
            move_direction: direction,
        };
        kinematics.integrate(delta);
        prop_assert_eq!(kinematics.position, Vec2::new(x, y));
    }

    #[test]
    fn test_launch_is_a_unit_diagonal(seed in any::<u64>(), speed in 1.0f32..1000.0) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut ball = Ball::new(ARENA);
        ball.launch(&mut rng, speed);

        let direction = ball.kinematics.move_direction;
        prop_assert!((direction.length() - 1.0).abs() < 1e-6);
        prop_assert_eq!(direction.x.abs(), direction.y.abs());
        prop_assert_eq!(ball.kinematics.move_speed, speed);
    }

    #[test]
    fn test_wall_bounce_is_not_undone(
        x in 100.0f32..1180.0,
        overshoot in 0.0f32..20.0,
        direction in unit_direction(),
        top in any::<bool>(),
    ) {
        prop_assume!(direction.y.abs() > 1e-3);
        let y = if top { ARENA.y - 20.0 + overshoot } else { 20.0 - overshoot };
        let mut ball = Ball::new(ARENA);
        ball.kinematics.position = Vec2::new(x, y);
        ball.kinematics.move_direction = direction;
        ball.kinematics.move_speed = 300.0;

        ball_terrain(&mut ball, ARENA);
        let after_first = ball.kinematics.move_direction;
        // Now moving away from the touched wall
        if top {
            prop_assert!(after_first.y < 0.0);
        } else {
            prop_assert!(after_first.y > 0.0);
        }

        prop_assert!(!ball_terrain(&mut ball, ARENA));
        prop_assert_eq!(ball.kinematics.move_direction, after_first);
    }

    #[test]
    fn test_paddle_refuses_ball_moving_away(
        x in -100.0f32..1400.0,
        y in -100.0f32..800.0,
        direction in unit_direction(),
        player in prop_oneof![Just(Player::One), Just(Player::Two)],
    ) {
        let paddle = Paddle::new(player, ARENA, 400.0);
        prop_assume!(direction.x * paddle.facing() >= 0.0);

        let mut ball = Ball::new(ARENA);
        ball.kinematics.position = Vec2::new(x, y);
        ball.kinematics.move_direction = direction;
        ball.kinematics.move_speed = 300.0;
        let before = ball.clone();

        prop_assert!(!ball_paddle(&mut ball, &paddle, 50.0));
        prop_assert_eq!(ball, before);
    }

    #[test]
    fn test_goal_goes_to_the_other_player(
        inset in 0.0f32..19.9,
        y in 0.0f32..720.0,
        left in any::<bool>(),
    ) {
        let mut state = GameState::new(ARENA, Tuning::default(), 3);
        tick(&mut state, &TickInput { launch: true, ..Default::default() }, 0.0);

        // Far from both paddles vertically so no hit can intervene
        let paddle_y = if y > 360.0 { 60.0 } else { 660.0 };
        for player in Player::ALL {
            state.paddle_mut(player).kinematics.position.y = paddle_y;
        }

        let (x, direction, side, scorer) = if left {
            (inset, Vec2::NEG_X, Side::Player1, Player::Two)
        } else {
            (ARENA.x - inset, Vec2::X, Side::Player2, Player::One)
        };
        state.ball.kinematics.position = Vec2::new(x, y);
        state.ball.kinematics.move_direction = direction;

        let events = tick(&mut state, &TickInput::default(), 0.0);
        let goal = GameEvent::Goal { side, scorer };
        prop_assert!(events.contains(&goal));
        prop_assert_eq!(state.scores.get(scorer), 1);
        prop_assert_eq!(state.scores.get(scorer.opponent()), 0);
    }

    #[test]
    fn test_no_crossing_never_scores(
        x in 20.5f32..1259.5,
        y in 0.0f32..720.0,
    ) {
        let mut ball = Ball::new(ARENA);
        ball.kinematics.position = Vec2::new(x, y);
        prop_assert_eq!(touching_side(&ball, ARENA), Side::None);
        prop_assert_eq!(Side::None.scorer(), None);
    }

    #[test]
    fn test_round_reset_restores_start(
        ball_x in 0.0f32..1280.0,
        ball_y in 0.0f32..720.0,
        direction in unit_direction(),
        speed in 0.0f32..2000.0,
        paddle_one_y in 0.0f32..720.0,
        paddle_two_y in 0.0f32..720.0,
    ) {
        let mut state = GameState::new(ARENA, Tuning::default(), 11);
        state.phase = RoundPhase::Playing;
        state.ball.kinematics = Kinematics {
            position: Vec2::new(ball_x, ball_y),
            move_speed: speed,
            move_direction: direction,
        };
        state.paddle_mut(Player::One).kinematics.position.y = paddle_one_y;
        state.paddle_mut(Player::Two).on_move_up_pressed();
        state.paddle_mut(Player::Two).kinematics.position.y = paddle_two_y;

        state.reset_round();

        prop_assert_eq!(state.phase, RoundPhase::Serve);
        prop_assert_eq!(state.ball.position(), ARENA / 2.0);
        prop_assert_eq!(state.ball.kinematics.velocity(), Vec2::ZERO);
        prop_assert_eq!(state.paddle(Player::One).position(), Vec2::new(50.0, 360.0));
        prop_assert_eq!(state.paddle(Player::Two).position(), Vec2::new(1230.0, 360.0));
        for player in Player::ALL {
            prop_assert_eq!(state.paddle(player).kinematics.velocity(), Vec2::ZERO);
        }
    }
}

#[test]
fn test_launch_covers_all_four_diagonals() {
    let mut rng = Pcg32::seed_from_u64(2024);
    let mut counts = [0u32; 4];
    for _ in 0..4000 {
        let mut ball = Ball::new(ARENA);
        ball.launch(&mut rng, 300.0);
        let direction = ball.kinematics.move_direction;
        let quadrant = (direction.x > 0.0) as usize * 2 + (direction.y > 0.0) as usize;
        counts[quadrant] += 1;
    }
    // Each quadrant should get roughly a quarter
    for count in counts {
        assert!((800..1200).contains(&count), "{counts:?}");
    }
}
