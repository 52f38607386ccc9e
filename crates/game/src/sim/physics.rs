use super::entity::Body;

/// Per-kind ground: bodies above `threshold` are airborne and come to rest at `rest_y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct GroundLine {
    pub(crate) threshold: f32,
    pub(crate) rest_y: f32,
}

impl GroundLine {
    pub(crate) const STANDARD: GroundLine = GroundLine {
        threshold: 325.0,
        rest_y: 330.0,
    };

    pub(crate) fn is_above(&self, y: f32) -> bool {
        y < self.threshold
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PhysicsBody {
    pub(crate) vertical_velocity: f32,
    pub(crate) gravity_accel: f32,
    pub(crate) ground: GroundLine,
}

impl PhysicsBody {
    pub(crate) const fn resting(gravity_accel: f32, ground: GroundLine) -> Self {
        Self {
            vertical_velocity: 0.0,
            gravity_accel,
            ground,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GravityStep {
    Resting,
    Airborne,
    Landed,
}

/// One unconditional ballistic step; positive velocity moves up the screen.
pub(crate) fn integrate_free_fall(body: &mut Body, vertical_velocity: &mut f32, accel: f32) {
    body.y -= *vertical_velocity;
    *vertical_velocity -= accel;
}

pub(crate) fn apply_gravity(body: &mut Body, physics: &mut PhysicsBody) -> GravityStep {
    let airborne = physics.ground.is_above(body.y) || physics.vertical_velocity > 0.0;
    if airborne {
        integrate_free_fall(body, &mut physics.vertical_velocity, physics.gravity_accel);
    }
    if !physics.ground.is_above(body.y) && physics.vertical_velocity < 0.0 {
        body.y = physics.ground.rest_y;
        physics.vertical_velocity = 0.0;
        return GravityStep::Landed;
    }
    if airborne {
        GravityStep::Airborne
    } else {
        GravityStep::Resting
    }
}
