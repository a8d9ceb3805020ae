// Gravity and ground contact

use glam::Vec2;

/// Result of a gravity step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundContact {
    /// The body is resting on (or was snapped to) the ground line
    Grounded,
    /// The body is in the air and gravity was applied
    Airborne,
}

/// Downward acceleration and the ground the body lands on
///
/// Screen space grows downward, so a positive acceleration pulls bodies
/// toward the bottom of the arena.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityField {
    /// Added to vertical velocity every airborne tick
    pub acceleration: f32,
    /// Y coordinate of the floor the body's feet must not cross
    pub ground_line: f32,
    /// Y coordinate of the body's top edge when it rests on the floor
    pub rest_y: f32,
}

impl GravityField {
    pub const fn new(acceleration: f32, ground_line: f32, rest_y: f32) -> Self {
        Self {
            acceleration,
            ground_line,
            rest_y,
        }
    }

    /// Apply one tick of gravity to a body of the given height
    ///
    /// Checks where the feet would be after one more tick of the current
    /// vertical velocity. If that reaches the ground line, the body stops and
    /// snaps to `rest_y`; otherwise gravity accelerates it.
    pub fn apply(&self, position: &mut Vec2, velocity: &mut Vec2, height: f32) -> GroundContact {
        if position.y + height + velocity.y >= self.ground_line {
            velocity.y = 0.0;
            position.y = self.rest_y;
            GroundContact::Grounded
        } else {
            velocity.y += self.acceleration;
            GroundContact::Airborne
        }
    }
}

/// Explicit Euler step with a time step of one tick
pub fn integrate(position: &mut Vec2, velocity: Vec2) {
    *position += velocity;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const FIELD: GravityField = GravityField::new(0.7, 480.0, 330.0);
    const HEIGHT: f32 = 150.0;

    #[test]
    fn test_integrate() {
        let mut position = Vec2::new(10.0, 20.0);
        integrate(&mut position, Vec2::new(5.0, -2.0));
        assert_eq!(position, Vec2::new(15.0, 18.0));
    }

    #[test]
    fn test_resting_body_does_not_drift() {
        let mut position = Vec2::new(0.0, 330.0);
        let mut velocity = Vec2::ZERO;

        for _ in 0..100 {
            integrate(&mut position, velocity);
            let contact = FIELD.apply(&mut position, &mut velocity, HEIGHT);
            assert_eq!(contact, GroundContact::Grounded);
        }

        assert_eq!(position.y, 330.0);
        assert_eq!(velocity.y, 0.0);
    }

    #[test]
    fn test_airborne_body_accelerates() {
        let mut position = Vec2::new(0.0, 0.0);
        let mut velocity = Vec2::ZERO;

        let contact = FIELD.apply(&mut position, &mut velocity, HEIGHT);
        assert_eq!(contact, GroundContact::Airborne);
        assert_relative_eq!(velocity.y, 0.7);

        FIELD.apply(&mut position, &mut velocity, HEIGHT);
        assert_relative_eq!(velocity.y, 1.4);
    }

    #[test]
    fn test_landing_snaps_to_rest() {
        let mut position = Vec2::new(0.0, 320.0);
        let mut velocity = Vec2::new(0.0, 12.0);

        // 320 + 150 + 12 crosses the ground line
        let contact = FIELD.apply(&mut position, &mut velocity, HEIGHT);
        assert_eq!(contact, GroundContact::Grounded);
        assert_eq!(position.y, 330.0);
        assert_eq!(velocity.y, 0.0);
    }
}
