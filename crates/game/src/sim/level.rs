use rand::Rng;

use super::boss::{EndBoss, BOSS_START_X};
use super::collectible::Collectible;
use super::entity::{Body, DrawLayer, Drawable, Inset, SpriteView};
use super::grunt::{Grunt, GruntSkin};

pub(crate) const LEVEL_END_X: f32 = 2500.0;
const CLOUD_KEY: &str = "scenery/clouds";
const CLOUD_WIDTH: f32 = 740.0;
const CLOUD_HEIGHT: f32 = 400.0;
const CLOUD_Y: f32 = -50.0;
const TILE_SPACING: f32 = 720.0;
const TILE_WIDTH: f32 = 721.0;
const TILE_HEIGHT: f32 = 480.0;
const BACKGROUND_LAYERS: [(&str, f32); 5] = [
    ("background/sky", 0.0),
    ("background/rocks", 0.0),
    ("background/rocks2", 0.0),
    ("background/rocks3", 0.0),
    ("background/ground", 340.0),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct GruntPlacement {
    pub(crate) skin: GruntSkin,
    pub(crate) x: f32,
}

/// Placements only; sizes and behaviour come from the entity kinds.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LevelLayout {
    pub(crate) level_end_x: f32,
    pub(crate) boss_x: f32,
    pub(crate) grunts: Vec<GruntPlacement>,
    pub(crate) coins: Vec<(f32, f32)>,
    pub(crate) stones: Vec<(f32, f32)>,
    pub(crate) cloud_count: u32,
    pub(crate) background_start_x: f32,
    pub(crate) background_columns: u32,
}

impl LevelLayout {
    pub(crate) fn level1() -> Self {
        let grunts_a = [500.0, 800.0, 1100.0, 1400.0].map(|x| GruntPlacement {
            skin: GruntSkin::A,
            x,
        });
        let grunts_b = [650.0, 950.0, 1250.0, 1550.0].map(|x| GruntPlacement {
            skin: GruntSkin::B,
            x,
        });
        Self {
            level_end_x: LEVEL_END_X,
            boss_x: BOSS_START_X,
            grunts: grunts_a.into_iter().chain(grunts_b).collect(),
            coins: [200.0, 600.0, 800.0, 900.0, 1400.0]
                .map(|x| (x, 300.0))
                .to_vec(),
            stones: [250.0, 375.0, 1000.0, 1125.0, 1750.0, 2000.0]
                .map(|x| (x, 350.0))
                .to_vec(),
            cloud_count: 8,
            background_start_x: -720.0,
            background_columns: 6,
        }
    }

    /// Bare level with only the boss; used to stage focused scenarios.
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self {
            grunts: Vec::new(),
            coins: Vec::new(),
            stones: Vec::new(),
            cloud_count: 0,
            background_columns: 0,
            ..Self::level1()
        }
    }
}

/// Purely decorative sprite.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Scenery {
    key: &'static str,
    layer: DrawLayer,
    body: Body,
}

impl Scenery {
    fn new(key: &'static str, layer: DrawLayer, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            key,
            layer,
            body: Body::new(x, y, width, height, Inset::default()),
        }
    }
}

impl Drawable for Scenery {
    fn sprite_view(&self) -> SpriteView {
        SpriteView::of_body(self.key.to_string(), self.layer, &self.body)
    }
}

/// Everything placed in one level. The world removes grunts and pickups in place.
#[derive(Debug, Clone)]
pub(crate) struct Level {
    pub(crate) boss: EndBoss,
    pub(crate) grunts: Vec<Grunt>,
    pub(crate) clouds: Vec<Scenery>,
    pub(crate) backgrounds: Vec<Scenery>,
    pub(crate) coins: Vec<Collectible>,
    pub(crate) stones: Vec<Collectible>,
    pub(crate) level_end_x: f32,
}

impl Level {
    pub(crate) fn from_layout(layout: &LevelLayout, rng: &mut impl Rng) -> Self {
        let grunts = layout
            .grunts
            .iter()
            .map(|placement| Grunt::spawn(placement.skin, placement.x, rng))
            .collect();
        let clouds = (0..layout.cloud_count)
            .map(|index| {
                Scenery::new(
                    CLOUD_KEY,
                    DrawLayer::Cloud,
                    index as f32 * TILE_SPACING,
                    CLOUD_Y,
                    CLOUD_WIDTH,
                    CLOUD_HEIGHT,
                )
            })
            .collect();
        let mut backgrounds = Vec::new();
        for column in 0..layout.background_columns {
            let x = layout.background_start_x + column as f32 * TILE_SPACING;
            for (key, y) in BACKGROUND_LAYERS {
                backgrounds.push(Scenery::new(
                    key,
                    DrawLayer::Background,
                    x,
                    y,
                    TILE_WIDTH,
                    TILE_HEIGHT,
                ));
            }
        }
        Self {
            boss: EndBoss::new(layout.boss_x),
            grunts,
            clouds,
            backgrounds,
            coins: layout
                .coins
                .iter()
                .map(|&(x, y)| Collectible::coin(x, y))
                .collect(),
            stones: layout
                .stones
                .iter()
                .map(|&(x, y)| Collectible::stone(x, y))
                .collect(),
            level_end_x: layout.level_end_x,
        }
    }

    /// Live entities that take part in the simulation, boss included.
    pub(crate) fn live_entity_count(&self) -> usize {
        1 + self.grunts.len() + self.coins.len() + self.stones.len()
    }
}
