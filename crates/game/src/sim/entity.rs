/// Margins that shrink a sprite box to its collision box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct Inset {
    pub(crate) top: f32,
    pub(crate) left: f32,
    pub(crate) right: f32,
    pub(crate) bottom: f32,
}

impl Inset {
    pub(crate) const fn new(top: f32, left: f32, right: f32, bottom: f32) -> Self {
        Self {
            top,
            left,
            right,
            bottom,
        }
    }

    pub(crate) const fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Whether the inset box stays inside a `width` x `height` sprite box.
    pub(crate) fn fits(&self, width: f32, height: f32) -> bool {
        let non_negative = self.top >= 0.0 && self.left >= 0.0;
        let non_negative = non_negative && self.right >= 0.0 && self.bottom >= 0.0;
        non_negative && self.left + self.right <= width && self.top + self.bottom <= height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Aabb {
    pub(crate) left: f32,
    pub(crate) top: f32,
    pub(crate) right: f32,
    pub(crate) bottom: f32,
}

impl Aabb {
    /// Strict overlap; boxes that only touch along an edge do not collide.
    pub(crate) fn overlaps(&self, other: &Aabb) -> bool {
        self.right > other.left
            && self.bottom > other.top
            && self.left < other.right
            && self.top < other.bottom
    }
}

/// Position, size and facing shared by everything placed in the level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Body {
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) facing_left: bool,
    pub(crate) inset: Inset,
}

impl Body {
    pub(crate) fn new(x: f32, y: f32, width: f32, height: f32, inset: Inset) -> Self {
        debug_assert!(
            inset.fits(width, height),
            "collision inset {inset:?} exceeds a {width}x{height} sprite"
        );
        Self {
            x,
            y,
            width,
            height,
            facing_left: false,
            inset,
        }
    }

    pub(crate) fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub(crate) fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub(crate) fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub(crate) fn collision_box(&self) -> Aabb {
        Aabb {
            left: self.x + self.inset.left,
            top: self.y + self.inset.top,
            right: self.x + self.width - self.inset.right,
            bottom: self.y + self.height - self.inset.bottom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Health {
    current: u32,
    max: u32,
}

impl Health {
    pub(crate) const fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    pub(crate) fn current(&self) -> u32 {
        self.current
    }

    pub(crate) fn max(&self) -> u32 {
        self.max
    }

    pub(crate) fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Subtracts `amount`, clamping at zero, and returns what remains.
    pub(crate) fn take(&mut self, amount: u32) -> u32 {
        self.current = self.current.saturating_sub(amount);
        self.current
    }

    pub(crate) fn deplete(&mut self) {
        self.current = 0;
    }

    pub(crate) fn percentage(&self) -> f32 {
        if self.max == 0 {
            return 0.0;
        }
        self.current as f32 * 100.0 / self.max as f32
    }
}

pub(crate) trait Collidable {
    fn collision_box(&self) -> Aabb;

    fn is_colliding<T: Collidable + ?Sized>(&self, other: &T) -> bool {
        self.collision_box().overlaps(&other.collision_box())
    }
}

impl Collidable for Body {
    fn collision_box(&self) -> Aabb {
        Body::collision_box(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DrawLayer {
    Background,
    Cloud,
    Player,
    Boss,
    Grunt,
    Coin,
    Stone,
    Projectile,
}

/// What the render collaborator needs to blit one world-space sprite.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SpriteView {
    pub(crate) key: String,
    pub(crate) layer: DrawLayer,
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) flip_x: bool,
}

impl SpriteView {
    pub(crate) fn of_body(key: String, layer: DrawLayer, body: &Body) -> Self {
        Self {
            key,
            layer,
            x: body.x,
            y: body.y,
            width: body.width,
            height: body.height,
            flip_x: body.facing_left,
        }
    }
}

pub(crate) trait Drawable {
    fn sprite_view(&self) -> SpriteView;
}
