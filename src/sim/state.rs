//! Game state and core simulation types
//!
//! Coordinates are in pixels with the origin at the bottom-left corner of the
//! arena and y growing upward.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::random_sign;
use crate::settings::Tuning;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundPhase {
    /// Ball parked at the arena center, waiting for launch input
    #[default]
    Serve,
    /// Ball in motion
    Playing,
}

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// Defends the left goal line (x = 0)
    One,
    /// Defends the right goal line (x = arena width)
    Two,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Horizontal direction this player's paddle faces
    #[inline]
    pub fn facing(self) -> f32 {
        match self {
            Player::One => 1.0,
            Player::Two => -1.0,
        }
    }
}

/// Goal line the ball touched, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    None,
    /// Player 1's (left) goal line
    Player1,
    /// Player 2's (right) goal line
    Player2,
}

impl Side {
    /// The player credited with a point when the ball touches this side
    pub fn scorer(self) -> Option<Player> {
        match self {
            Side::None => None,
            Side::Player1 => Some(Player::Two),
            Side::Player2 => Some(Player::One),
        }
    }
}

/// Position and velocity shared by paddles and the ball
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Kinematics {
    pub position: Vec2,
    pub move_speed: f32,
    /// Unit length by convention, not enforced
    pub move_direction: Vec2,
}

impl Kinematics {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Advance position by `move_direction * move_speed * delta`
    #[inline]
    pub fn integrate(&mut self, delta: f32) {
        self.position += self.move_direction * (self.move_speed * delta);
    }

    #[inline]
    pub fn stop(&mut self) {
        self.move_speed = 0.0;
        self.move_direction = Vec2::ZERO;
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.move_direction * self.move_speed
    }
}

/// A player's paddle
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub kinematics: Kinematics,
    size: Vec2,
    facing: f32,
    /// Speed applied while a move key is held
    speed: f32,
}

impl Paddle {
    /// Place a paddle for `player`, vertically centered and
    /// `PADDLE_WALL_OFFSET` pixels away from its own goal line
    pub fn new(player: Player, arena: Vec2, speed: f32) -> Self {
        let x = match player {
            Player::One => PADDLE_WALL_OFFSET,
            Player::Two => arena.x - PADDLE_WALL_OFFSET,
        };
        Self::with_size(
            Vec2::new(x, arena.y / 2.0),
            PADDLE_SIZE,
            player.facing(),
            speed,
        )
    }

    pub fn with_size(position: Vec2, size: Vec2, facing: f32, speed: f32) -> Self {
        Self {
            kinematics: Kinematics::at(position),
            size,
            facing,
            speed,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.kinematics.position
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn facing(&self) -> f32 {
        self.facing
    }

    /// Tolerance used for both wall clamping and ball hits
    #[inline]
    pub fn grace(&self) -> f32 {
        self.size.y * PADDLE_GRACE
    }

    /// X coordinate of the face turned toward the arena center
    #[inline]
    pub fn front_x(&self) -> f32 {
        self.kinematics.position.x + self.facing * self.size.x / 2.0
    }

    pub fn on_move_up_pressed(&mut self) {
        self.kinematics.move_direction = Vec2::Y;
        self.kinematics.move_speed = self.speed;
    }

    pub fn on_move_down_pressed(&mut self) {
        self.kinematics.move_direction = Vec2::NEG_Y;
        self.kinematics.move_speed = self.speed;
    }

    /// Stops only if the paddle is still moving up, so releasing one key
    /// never cancels motion started by the other
    pub fn on_move_up_released(&mut self) {
        if self.kinematics.move_direction.y > 0.0 {
            self.kinematics.stop();
        }
    }

    pub fn on_move_down_released(&mut self) {
        if self.kinematics.move_direction.y < 0.0 {
            self.kinematics.stop();
        }
    }

    /// Integrate motion, then resolve against the top and bottom walls
    pub fn update(&mut self, delta: f32, arena: Vec2) {
        let previous = self.kinematics.position;
        self.kinematics.integrate(delta);
        super::collision::paddle_terrain(self, previous, arena);
    }

    /// Recenter vertically and stop; x is fixed for the whole match
    pub fn reset(&mut self, arena: Vec2) {
        self.kinematics.position.y = arena.y / 2.0;
        self.kinematics.stop();
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub kinematics: Kinematics,
    radius: f32,
}

impl Ball {
    pub fn new(arena: Vec2) -> Self {
        Self::with_radius(arena / 2.0, BALL_RADIUS)
    }

    pub fn with_radius(position: Vec2, radius: f32) -> Self {
        Self {
            kinematics: Kinematics::at(position),
            radius,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.kinematics.position
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Start moving along one of the four diagonals, picked uniformly
    pub fn launch<R: Rng + ?Sized>(&mut self, rng: &mut R, speed: f32) {
        let x = random_sign(rng);
        let y = random_sign(rng);
        self.kinematics.move_direction = Vec2::new(x, y).normalize();
        self.kinematics.move_speed = speed;
    }

    #[inline]
    pub fn update(&mut self, delta: f32) {
        self.kinematics.integrate(delta);
    }

    /// Park at the arena center with zero velocity
    pub fn reset(&mut self, arena: Vec2) {
        self.kinematics.position = arena / 2.0;
        self.kinematics.stop();
    }
}

/// Points per player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scores([u32; 2]);

impl Scores {
    #[inline]
    pub fn get(&self, player: Player) -> u32 {
        self.0[player.index()]
    }

    pub fn award(&mut self, player: Player) {
        self.0[player.index()] += 1;
    }
}

impl std::fmt::Display for Scores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} : {}", self.0[0], self.0[1])
    }
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Arena size in pixels
    pub arena: Vec2,
    pub tuning: Tuning,
    pub phase: RoundPhase,
    /// Indexed by `Player::index`
    pub paddles: [Paddle; 2],
    pub ball: Ball,
    pub scores: Scores,
    /// Goals scored so far (rounds completed)
    pub rounds: u32,
    rng: Pcg32,
}

impl GameState {
    /// Create a new match with both paddles centered and the ball ready to serve
    pub fn new(arena: Vec2, tuning: Tuning, seed: u64) -> Self {
        Self {
            arena,
            tuning,
            phase: RoundPhase::Serve,
            paddles: [
                Paddle::new(Player::One, arena, tuning.paddle_speed),
                Paddle::new(Player::Two, arena, tuning.paddle_speed),
            ],
            ball: Ball::new(arena),
            scores: Scores::default(),
            rounds: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn paddle(&self, player: Player) -> &Paddle {
        &self.paddles[player.index()]
    }

    #[inline]
    pub fn paddle_mut(&mut self, player: Player) -> &mut Paddle {
        &mut self.paddles[player.index()]
    }

    /// Serve the ball. Ignored while a rally is already in progress.
    pub fn launch(&mut self) -> bool {
        if self.phase != RoundPhase::Serve {
            log::debug!("Launch ignored, ball already in play");
            return false;
        }
        self.ball.launch(&mut self.rng, self.tuning.ball_launch_speed);
        self.phase = RoundPhase::Playing;
        true
    }

    /// Return ball and paddles to their starting positions and wait for a serve
    pub fn reset_round(&mut self) {
        let arena = self.arena;
        self.ball.reset(arena);
        for paddle in &mut self.paddles {
            paddle.reset(arena);
        }
        self.phase = RoundPhase::Serve;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> Vec2 {
        Vec2::new(1280.0, 720.0)
    }

    #[test]
    fn test_initial_layout() {
        let state = GameState::new(arena(), Tuning::default(), 1);
        let p1 = state.paddle(Player::One);
        let p2 = state.paddle(Player::Two);
        assert_eq!(p1.position(), Vec2::new(50.0, 360.0));
        assert_eq!(p2.position(), Vec2::new(1230.0, 360.0));
        assert_eq!(p1.facing(), 1.0);
        assert_eq!(p2.facing(), -1.0);
        assert_eq!(p1.front_x(), 62.5);
        assert_eq!(p2.front_x(), 1217.5);
        assert_eq!(state.ball.position(), Vec2::new(640.0, 360.0));
        assert_eq!(state.ball.kinematics.move_speed, 0.0);
        assert_eq!(state.phase, RoundPhase::Serve);
    }

    #[test]
    fn test_integrate() {
        let mut k = Kinematics {
            position: Vec2::new(10.0, 20.0),
            move_speed: 100.0,
            move_direction: Vec2::new(1.0, -1.0),
        };
        k.integrate(0.5);
        assert_eq!(k.position, Vec2::new(60.0, -30.0));

        k.stop();
        k.integrate(1000.0);
        assert_eq!(k.position, Vec2::new(60.0, -30.0));
    }

    #[test]
    fn test_last_pressed_key_wins() {
        let mut paddle = Paddle::new(Player::One, arena(), 400.0);
        paddle.on_move_up_pressed();
        paddle.on_move_down_pressed();
        assert_eq!(paddle.kinematics.move_direction, Vec2::NEG_Y);
        assert_eq!(paddle.kinematics.move_speed, 400.0);
    }

    #[test]
    fn test_release_only_cancels_matching_direction() {
        let mut paddle = Paddle::new(Player::One, arena(), 400.0);
        paddle.on_move_up_pressed();
        paddle.on_move_down_pressed();

        // Up was overridden by down, releasing up must not stop the paddle
        paddle.on_move_up_released();
        assert_eq!(paddle.kinematics.move_direction, Vec2::NEG_Y);

        paddle.on_move_down_released();
        assert_eq!(paddle.kinematics.move_speed, 0.0);
        assert_eq!(paddle.kinematics.move_direction, Vec2::ZERO);
    }

    #[test]
    fn test_paddle_reset_keeps_x() {
        let mut paddle = Paddle::new(Player::Two, arena(), 400.0);
        paddle.on_move_up_pressed();
        paddle.update(0.25, arena());
        assert_eq!(paddle.position().y, 460.0);

        paddle.reset(arena());
        assert_eq!(paddle.position(), Vec2::new(1230.0, 360.0));
        assert_eq!(paddle.kinematics.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_side_scorer() {
        assert_eq!(Side::None.scorer(), None);
        assert_eq!(Side::Player1.scorer(), Some(Player::Two));
        assert_eq!(Side::Player2.scorer(), Some(Player::One));
    }

    #[test]
    fn test_launch_only_from_serve() {
        let mut state = GameState::new(arena(), Tuning::default(), 3);
        assert!(state.launch());
        let direction = state.ball.kinematics.move_direction;
        assert_eq!(state.ball.kinematics.move_speed, 300.0);

        assert!(!state.launch());
        assert_eq!(state.ball.kinematics.move_direction, direction);
    }

    #[test]
    fn test_reset_round() {
        let mut state = GameState::new(arena(), Tuning::default(), 3);
        state.launch();
        state.ball.update(0.5);
        state.paddle_mut(Player::One).on_move_down_pressed();
        state.paddle_mut(Player::One).update(0.1, arena());

        state.reset_round();
        assert_eq!(state.phase, RoundPhase::Serve);
        assert_eq!(state.ball.position(), Vec2::new(640.0, 360.0));
        assert_eq!(state.ball.kinematics.velocity(), Vec2::ZERO);
        assert_eq!(state.paddle(Player::One).position().y, 360.0);
    }

    #[test]
    fn test_scores_display() {
        let mut scores = Scores::default();
        scores.award(Player::Two);
        scores.award(Player::Two);
        scores.award(Player::One);
        assert_eq!(scores.get(Player::One), 1);
        assert_eq!(scores.get(Player::Two), 2);
        assert_eq!(scores.to_string(), "1 : 2");
    }
}
