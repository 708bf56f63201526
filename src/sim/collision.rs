//! Collision detection and response against the arena and the paddles
//!
//! Everything here is axis-aligned: the arena is a rectangle anchored at the
//! origin, paddles are rectangles and the ball is a circle.

use glam::Vec2;

use super::state::{Ball, Paddle, Side};
use crate::consts::BALL_BEHIND_TOLERANCE;

/// Keep a paddle inside the arena after it moved from `previous`.
///
/// A paddle may poke past a wall by its grace inset. Going further rolls the
/// paddle back to `previous` instead of snapping it onto the wall.
/// Returns true when the move was rolled back.
pub fn paddle_terrain(paddle: &mut Paddle, previous: Vec2, arena: Vec2) -> bool {
    let half_height = paddle.size().y / 2.0;
    let grace = paddle.grace();
    let y = paddle.position().y;

    let past_top = y + half_height - grace > arena.y;
    let past_bottom = y - half_height + grace < 0.0;

    if past_top || past_bottom {
        paddle.kinematics.position = previous;
        return true;
    }
    false
}

/// Bounce the ball off the top and bottom walls.
///
/// The vertical direction flips only while the ball is still heading into the
/// wall, so a ball that already bounced can't be flipped back.
pub fn ball_terrain(ball: &mut Ball, arena: Vec2) -> bool {
    let radius = ball.radius();
    let y = ball.position().y;
    let direction = &mut ball.kinematics.move_direction;

    let into_top = direction.y > 0.0 && y + radius >= arena.y;
    let into_bottom = direction.y < 0.0 && y - radius <= 0.0;

    if into_top || into_bottom {
        direction.y = -direction.y;
        return true;
    }
    false
}

/// Bounce the ball off a paddle's front face.
///
/// On a hit the ball leaves along the line from the paddle center to the ball
/// center and gains `speed_increment`. Returns false without touching the ball
/// when it moves away from the paddle, has sunk too far behind the face, or is
/// out of reach.
pub fn ball_paddle(ball: &mut Ball, paddle: &Paddle, speed_increment: f32) -> bool {
    let facing = paddle.facing();
    let radius = ball.radius();
    let position = ball.position();

    if ball.kinematics.move_direction.x * facing >= 0.0 {
        return false;
    }

    // Positive in front of the face, negative behind it
    let depth = (position.x - paddle.front_x()) * facing;
    if depth < -radius * BALL_BEHIND_TOLERANCE || depth > radius {
        return false;
    }

    let reach = paddle.size().y / 2.0 + paddle.grace();
    if (position.y - paddle.position().y).abs() > reach {
        return false;
    }

    let fallback = Vec2::new(facing, 0.0);
    ball.kinematics.move_direction = (position - paddle.position()).normalize_or(fallback);
    ball.kinematics.move_speed += speed_increment;
    true
}

/// Goal line the ball is touching, if any
pub fn touching_side(ball: &Ball, arena: Vec2) -> Side {
    let radius = ball.radius();
    let x = ball.position().x;

    if x < radius {
        Side::Player1
    } else if x > arena.x - radius {
        Side::Player2
    } else {
        Side::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Player;

    const ARENA: Vec2 = Vec2::new(1280.0, 720.0);

    fn moving_ball(position: Vec2, direction: Vec2, speed: f32) -> Ball {
        let mut ball = Ball::with_radius(position, 20.0);
        ball.kinematics.move_direction = direction;
        ball.kinematics.move_speed = speed;
        ball
    }

    #[test]
    fn test_paddle_rolls_back_past_top() {
        let mut paddle = Paddle::new(Player::One, ARENA, 400.0);
        // Top edge at 720 + 15 (exactly the grace inset) is still allowed
        paddle.kinematics.position.y = 720.0 - 75.0 + 15.0;
        assert!(!paddle_terrain(&mut paddle, Vec2::new(50.0, 600.0), ARENA));

        paddle.kinematics.position.y = 720.0 - 75.0 + 16.0;
        assert!(paddle_terrain(&mut paddle, Vec2::new(50.0, 600.0), ARENA));
        assert_eq!(paddle.position(), Vec2::new(50.0, 600.0));
    }

    #[test]
    fn test_paddle_rolls_back_past_bottom() {
        let mut paddle = Paddle::new(Player::Two, ARENA, 400.0);
        paddle.on_move_down_pressed();
        paddle.kinematics.position.y = 70.0;
        // 70 - 400 * 0.1 = 30 puts the bottom edge 45 px below the floor
        paddle.update(0.1, ARENA);
        assert_eq!(paddle.position().y, 70.0);
        // Still pushing down, still held in place
        paddle.update(0.1, ARENA);
        assert_eq!(paddle.position().y, 70.0);
    }

    #[test]
    fn test_ball_bounces_off_top() {
        let mut ball = moving_ball(Vec2::new(640.0, 705.0), Vec2::new(1.0, 1.0).normalize(), 300.0);
        assert!(ball_terrain(&mut ball, ARENA));
        assert!(ball.kinematics.move_direction.y < 0.0);
        // Moving away now, a second check in the same frame is a no-op
        assert!(!ball_terrain(&mut ball, ARENA));
        assert!(ball.kinematics.move_direction.y < 0.0);
    }

    #[test]
    fn test_ball_bounces_off_bottom() {
        let mut ball = moving_ball(Vec2::new(640.0, 10.0), Vec2::new(-1.0, -1.0).normalize(), 300.0);
        assert!(ball_terrain(&mut ball, ARENA));
        assert!(ball.kinematics.move_direction.y > 0.0);
        assert!(ball.kinematics.move_direction.x < 0.0);
    }

    #[test]
    fn test_ball_receding_from_wall_is_left_alone() {
        let mut ball = moving_ball(Vec2::new(640.0, 715.0), Vec2::new(1.0, -1.0).normalize(), 300.0);
        assert!(!ball_terrain(&mut ball, ARENA));
        assert!(ball.kinematics.move_direction.y < 0.0);
    }

    #[test]
    fn test_right_paddle_hit_scenario() {
        let paddle = Paddle::new(Player::Two, ARENA, 400.0);
        let mut ball = moving_ball(
            Vec2::new(1230.0 - 20.0, 400.0),
            Vec2::new(1.0, 1.0).normalize(),
            300.0,
        );

        assert!(ball_paddle(&mut ball, &paddle, 50.0));
        assert_eq!(ball.kinematics.move_speed, 350.0);
        let direction = ball.kinematics.move_direction;
        assert!(direction.x < 0.0);
        assert!(direction.y > 0.0);
        assert!((direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_hit_inside_grace_zone() {
        let paddle = Paddle::new(Player::One, ARENA, 400.0);
        // 75 half height + 15 grace
        let mut ball = moving_ball(Vec2::new(70.0, 360.0 + 89.0), Vec2::NEG_X, 300.0);
        assert!(ball_paddle(&mut ball, &paddle, 50.0));

        let mut ball = moving_ball(Vec2::new(70.0, 360.0 - 91.0), Vec2::NEG_X, 300.0);
        assert!(!ball_paddle(&mut ball, &paddle, 50.0));
    }

    #[test]
    fn test_ball_out_of_reach() {
        let paddle = Paddle::new(Player::One, ARENA, 400.0);
        // Front face at 62.5, radius 20
        let mut ball = moving_ball(Vec2::new(83.0, 360.0), Vec2::NEG_X, 300.0);
        assert!(!ball_paddle(&mut ball, &paddle, 50.0));
        assert_eq!(ball.kinematics.move_speed, 300.0);
    }

    #[test]
    fn test_ball_behind_face_is_refused() {
        let paddle = Paddle::new(Player::One, ARENA, 400.0);
        // 25% of radius 20 is 5 px of allowed overlap
        let mut ball = moving_ball(Vec2::new(58.0, 360.0), Vec2::NEG_X, 300.0);
        assert!(ball_paddle(&mut ball, &paddle, 50.0));

        let mut ball = moving_ball(Vec2::new(57.0, 360.0), Vec2::NEG_X, 300.0);
        assert!(!ball_paddle(&mut ball, &paddle, 50.0));
    }

    #[test]
    fn test_ball_moving_away_is_refused() {
        let paddle = Paddle::new(Player::One, ARENA, 400.0);
        let mut ball = moving_ball(Vec2::new(70.0, 360.0), Vec2::X, 300.0);
        assert!(!ball_paddle(&mut ball, &paddle, 50.0));
        assert_eq!(ball.kinematics.move_direction, Vec2::X);
    }

    #[test]
    fn test_coincident_centers_fall_back_to_straight_back() {
        let paddle = Paddle::with_size(Vec2::new(100.0, 100.0), Vec2::new(4.0, 40.0), 1.0, 0.0);
        let mut ball = moving_ball(Vec2::new(100.0, 100.0), Vec2::NEG_X, 300.0);
        assert!(ball_paddle(&mut ball, &paddle, 50.0));
        assert_eq!(ball.kinematics.move_direction, Vec2::X);
        assert!(!ball.kinematics.move_direction.is_nan());
    }

    #[test]
    fn test_touching_side() {
        let ball = Ball::with_radius(Vec2::new(5.0, 360.0), 20.0);
        assert_eq!(touching_side(&ball, ARENA), Side::Player1);

        let ball = Ball::with_radius(Vec2::new(1265.0, 360.0), 20.0);
        assert_eq!(touching_side(&ball, ARENA), Side::Player2);

        let ball = Ball::with_radius(Vec2::new(640.0, 360.0), 20.0);
        assert_eq!(touching_side(&ball, ARENA), Side::None);

        // Exactly one radius away is not a goal yet
        let ball = Ball::with_radius(Vec2::new(20.0, 360.0), 20.0);
        assert_eq!(touching_side(&ball, ARENA), Side::None);
    }
}
