use crate::content::{ArmorKind, WeaponKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn translated(self, dx: i32, dy: i32) -> Self {
        Self { y: self.y + dy, x: self.x + dx }
    }

    pub fn manhattan(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Box distance. A 3-tile radius means a 7x7 box around the center.
    pub fn chebyshev(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileKind {
    Wall,
    Floor,
    Door,
    Rubble,
    Water,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoomKind {
    Cavern,
    Barracks,
    Storage,
}

impl RoomKind {
    pub fn display_name(self) -> &'static str {
        match self {
            RoomKind::Cavern => "Cavern",
            RoomKind::Barracks => "Barracks",
            RoomKind::Storage => "Storage Hall",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogEvent {
    RoomEntered { kind: RoomKind, challenge_rating: u32 },
    EnemyShotHit { damage: i32 },
    EnemyShotMissed,
    EnemyReloaded,
    EnemyDefeated { pos: Pos },
    WeaponDropped { weapon: WeaponKind, pos: Pos },
    WeaponTaken { weapon: WeaponKind },
    ArmorTaken { armor: ArmorKind },
    ExitRevealed { pos: Pos },
}
