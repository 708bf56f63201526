//! Per-frame simulation step
//!
//! Order inside a frame: serve → paddle input → paddle motion → ball motion →
//! wall bounce → paddle hits → goal detection → round reset.

use super::collision::{ball_paddle, ball_terrain, touching_side};
use super::state::{GameState, Player, RoundPhase, Side};

/// Key transitions for one paddle since the previous frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddleInput {
    pub up_pressed: bool,
    pub up_released: bool,
    pub down_pressed: bool,
    pub down_released: bool,
}

impl PaddleInput {
    /// Presses are applied before releases so a key tapped within a single
    /// frame leaves the paddle where it started
    fn apply(&self, paddle: &mut super::state::Paddle) {
        if self.up_pressed {
            paddle.on_move_up_pressed();
        }
        if self.down_pressed {
            paddle.on_move_down_pressed();
        }
        if self.up_released {
            paddle.on_move_up_released();
        }
        if self.down_released {
            paddle.on_move_down_released();
        }
    }
}

/// Input snapshot for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Indexed by `Player::index`
    pub paddles: [PaddleInput; 2],
    /// Serve the ball (ignored while in play)
    pub launch: bool,
}

impl TickInput {
    pub fn paddle(&self, player: Player) -> &PaddleInput {
        &self.paddles[player.index()]
    }

    pub fn paddle_mut(&mut self, player: Player) -> &mut PaddleInput {
        &mut self.paddles[player.index()]
    }
}

/// Things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Launched,
    WallBounce,
    PaddleHit(Player),
    /// `side` was touched, `scorer` got the point and the round was reset
    Goal { side: Side, scorer: Player },
}

/// Advance the game by `delta` seconds
pub fn tick(state: &mut GameState, input: &TickInput, delta: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.launch && state.launch() {
        log::debug!(
            "Ball launched towards {:?}",
            state.ball.kinematics.move_direction
        );
        events.push(GameEvent::Launched);
    }

    let arena = state.arena;
    for player in Player::ALL {
        let paddle = &mut state.paddles[player.index()];
        input.paddle(player).apply(paddle);
        paddle.update(delta, arena);
    }

    if state.phase != RoundPhase::Playing {
        return events;
    }

    state.ball.update(delta);

    if ball_terrain(&mut state.ball, arena) {
        events.push(GameEvent::WallBounce);
    }

    let increment = state.tuning.ball_speed_increment;
    let hit = Player::ALL
        .into_iter()
        .find(|player| ball_paddle(&mut state.ball, &state.paddles[player.index()], increment));

    if let Some(player) = hit {
        log::trace!(
            "{:?} returned the ball at {:.0} px/s",
            player,
            state.ball.kinematics.move_speed
        );
        events.push(GameEvent::PaddleHit(player));
        return events;
    }

    let side = touching_side(&state.ball, arena);
    if let Some(scorer) = side.scorer() {
        state.scores.award(scorer);
        state.rounds += 1;
        log::info!("{:?} scores, {}", scorer, state.scores);
        state.reset_round();
        events.push(GameEvent::Goal { side, scorer });
    }

    events
}
