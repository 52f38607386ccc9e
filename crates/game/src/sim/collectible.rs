use super::entity::{Aabb, Body, Collidable, DrawLayer, Drawable, Inset, SpriteView};

const COLLECTIBLE_SIZE: f32 = 45.0;
const STONE_INSET: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CollectibleKind {
    Coin,
    Stone,
}

impl CollectibleKind {
    fn inset(self) -> Inset {
        match self {
            CollectibleKind::Coin => Inset::default(),
            CollectibleKind::Stone => Inset::uniform(STONE_INSET),
        }
    }

    fn sprite_key(self) -> &'static str {
        match self {
            CollectibleKind::Coin => "collectible/coin",
            CollectibleKind::Stone => "collectible/stone",
        }
    }

    fn layer(self) -> DrawLayer {
        match self {
            CollectibleKind::Coin => DrawLayer::Coin,
            CollectibleKind::Stone => DrawLayer::Stone,
        }
    }
}

/// Static pickup; no physics.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Collectible {
    kind: CollectibleKind,
    body: Body,
}

impl Collectible {
    pub(crate) fn new(kind: CollectibleKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            body: Body::new(x, y, COLLECTIBLE_SIZE, COLLECTIBLE_SIZE, kind.inset()),
        }
    }

    pub(crate) fn coin(x: f32, y: f32) -> Self {
        Self::new(CollectibleKind::Coin, x, y)
    }

    pub(crate) fn stone(x: f32, y: f32) -> Self {
        Self::new(CollectibleKind::Stone, x, y)
    }
}

impl Collidable for Collectible {
    fn collision_box(&self) -> Aabb {
        self.body.collision_box()
    }
}

impl Drawable for Collectible {
    fn sprite_view(&self) -> SpriteView {
        SpriteView::of_body(
            self.kind.sprite_key().to_string(),
            self.kind.layer(),
            &self.body,
        )
    }
}
