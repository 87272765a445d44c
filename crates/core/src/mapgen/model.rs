//! Public data model for a generated room, prior to being instantiated as
//! live game state.

use crate::content::{ArmorKind, WeaponKind};
use crate::types::{Pos, RoomKind, TileKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemySpawn {
    pub pos: Pos,
    pub glyph: char,
    pub speed: u32,
    pub health: i32,
    pub shooting_skill: u32,
    pub weapon: Option<WeaponKind>,
    pub armor: Option<ArmorKind>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedRoom {
    pub kind: RoomKind,
    pub challenge_rating_modifier: i32,
    pub challenge_rating: u32,
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<TileKind>,
    pub enemy_spawns: Vec<EnemySpawn>,
}

impl GeneratedRoom {
    /// Stable byte encoding used for determinism fingerprints in tests.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.push(match self.kind {
            RoomKind::Cavern => 0,
            RoomKind::Barracks => 1,
            RoomKind::Storage => 2,
        });
        bytes.extend(self.challenge_rating_modifier.to_le_bytes());
        bytes.extend(self.challenge_rating.to_le_bytes());
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        for tile in &self.tiles {
            bytes.push(match tile {
                TileKind::Wall => 0,
                TileKind::Floor => 1,
                TileKind::Door => 2,
                TileKind::Rubble => 3,
                TileKind::Water => 4,
            });
        }
        bytes.extend((self.enemy_spawns.len() as u32).to_le_bytes());
        for spawn in &self.enemy_spawns {
            bytes.extend(spawn.pos.y.to_le_bytes());
            bytes.extend(spawn.pos.x.to_le_bytes());
            bytes.extend(u32::from(spawn.glyph).to_le_bytes());
            bytes.extend(spawn.speed.to_le_bytes());
            bytes.extend(spawn.health.to_le_bytes());
            bytes.extend(spawn.shooting_skill.to_le_bytes());
            bytes.push(match spawn.weapon {
                None => 0,
                Some(WeaponKind::RustyPistol) => 1,
                Some(WeaponKind::Scattergun) => 2,
                Some(WeaponKind::LongRifle) => 3,
            });
            bytes.push(match spawn.armor {
                None => 0,
                Some(ArmorKind::PaddedVest) => 1,
                Some(ArmorKind::ScrapPlate) => 2,
            });
        }
        bytes
    }

    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if pos.x < 0 || pos.y < 0 {
            return TileKind::Wall;
        }
        let x = pos.x as usize;
        let y = pos.y as usize;
        if x >= self.width || y >= self.height {
            return TileKind::Wall;
        }
        self.tiles[y * self.width + x]
    }

    /// Default player entry cell; also the anchor spawn placement keeps
    /// clear of.
    pub fn entry_tile(&self) -> Pos {
        Pos::new(self.width as i32 / 2, self.height as i32 - 2)
    }
}
