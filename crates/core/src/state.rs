use crate::content::{self, ArmorKind, WeaponKind};
use crate::render::color;
use crate::types::{Pos, TileKind};

impl TileKind {
    /// Can an entity occupy this cell? Tile semantics are queried, not
    /// stored as flags, so they stay centralized here.
    pub fn is_walkable(self) -> bool {
        matches!(self, TileKind::Floor | TileKind::Door | TileKind::Water)
    }

    pub fn glyph(self) -> char {
        match self {
            TileKind::Wall => '#',
            TileKind::Floor => '.',
            TileKind::Door => '+',
            TileKind::Rubble => '%',
            TileKind::Water => '~',
        }
    }

    pub fn color_pair(self) -> u8 {
        match self {
            TileKind::Wall | TileKind::Rubble => color::WALL,
            TileKind::Floor | TileKind::Door => color::DEFAULT,
            TileKind::Water => color::WATER,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub kind: TileKind,
    pub discovered: bool,
}

impl Tile {
    pub fn new(kind: TileKind) -> Self {
        Self { kind, discovered: false }
    }

    /// The synthetic tile standing in for every out-of-bounds cell; the room
    /// is conceptually surrounded by an infinite undiscovered wall.
    pub fn boundary_wall() -> Self {
        Self::new(TileKind::Wall)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemStack {
    Weapon(WeaponKind),
    Armor(ArmorKind),
}

impl ItemStack {
    pub fn glyph(self) -> char {
        match self {
            ItemStack::Weapon(_) => ')',
            ItemStack::Armor(_) => '[',
        }
    }

    pub fn color_pair(self) -> u8 {
        color::ITEM
    }

    pub fn name(self) -> &'static str {
        match self {
            ItemStack::Weapon(kind) => content::weapon_spec(kind).name,
            ItemStack::Armor(kind) => content::armor_spec(kind).name,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Pos,
    pub health: i32,
    pub max_health: i32,
    pub view_distance: u32,
    pub equipped_weapon: Option<WeaponKind>,
    pub equipped_armor: Option<ArmorKind>,
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Pos::new(0, 0),
            health: 20,
            max_health: 20,
            view_distance: 6,
            equipped_weapon: None,
            equipped_armor: None,
        }
    }

    pub fn is_in_view_distance(&self, pos: Pos) -> bool {
        self.pos.chebyshev(pos) <= self.view_distance
    }

    pub fn armor_mitigation(&self) -> i32 {
        self.equipped_armor.map_or(0, |kind| content::armor_spec(kind).mitigation)
    }

    /// Bare fists plus whatever is equipped.
    pub fn melee_damage(&self) -> i32 {
        2 + self.equipped_weapon.map_or(0, |kind| content::weapon_spec(kind).damage)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
