use super::entity::{Aabb, Body, Collidable, DrawLayer, Drawable, Inset, SpriteView};
use super::physics::integrate_free_fall;

pub(crate) const PROJECTILE_SIZE: f32 = 60.0;
const PROJECTILE_INSET: f32 = 15.0;
const SPAWN_X_OFFSET: f32 = 30.0;
const LAUNCH_VELOCITY: f32 = 20.0;
const HORIZONTAL_STEP: f32 = 10.0;
const GRAVITY_ACCEL: f32 = 1.5;
const SPENT_BELOW_Y: f32 = 350.0;
const SPENT_VELOCITY: f32 = -35.0;
const SPRITE_KEY: &str = "projectile/stone";

/// A thrown stone on a ballistic arc.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Projectile {
    body: Body,
    direction: f32,
    vertical_velocity: f32,
    is_spent: bool,
}

impl Projectile {
    /// Launches from the thrower's center toward the side it faces.
    pub(crate) fn launch(center_x: f32, center_y: f32, facing_left: bool) -> Self {
        let mut body = Body::new(
            center_x - SPAWN_X_OFFSET,
            center_y,
            PROJECTILE_SIZE,
            PROJECTILE_SIZE,
            Inset::uniform(PROJECTILE_INSET),
        );
        body.facing_left = facing_left;
        Self {
            body,
            direction: if facing_left { -1.0 } else { 1.0 },
            vertical_velocity: LAUNCH_VELOCITY,
            is_spent: false,
        }
    }

    pub(crate) fn step(&mut self) {
        if self.is_spent {
            return;
        }
        self.body.x += HORIZONTAL_STEP * self.direction;
        integrate_free_fall(&mut self.body, &mut self.vertical_velocity, GRAVITY_ACCEL);
        if self.vertical_velocity < SPENT_VELOCITY && self.body.y > SPENT_BELOW_Y {
            self.is_spent = true;
        }
    }

    pub(crate) fn mark_spent(&mut self) {
        self.is_spent = true;
    }

    pub(crate) fn is_spent(&self) -> bool {
        self.is_spent
    }

    pub(crate) fn body(&self) -> &Body {
        &self.body
    }

    pub(crate) fn direction(&self) -> f32 {
        self.direction
    }

    pub(crate) fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }
}

impl Collidable for Projectile {
    fn collision_box(&self) -> Aabb {
        self.body.collision_box()
    }
}

impl Drawable for Projectile {
    fn sprite_view(&self) -> SpriteView {
        SpriteView::of_body(SPRITE_KEY.to_string(), DrawLayer::Projectile, &self.body)
    }
}
