//! Static content tables for gear and enemy archetypes.

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WeaponKind {
    RustyPistol,
    Scattergun,
    LongRifle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArmorKind {
    PaddedVest,
    ScrapPlate,
}

pub struct WeaponSpec {
    pub name: &'static str,
    pub damage: i32,
    pub range: u32,
    pub ammo_capacity: u32,
}

pub struct ArmorSpec {
    pub name: &'static str,
    pub mitigation: i32,
}

pub fn weapon_spec(kind: WeaponKind) -> WeaponSpec {
    match kind {
        WeaponKind::RustyPistol => {
            WeaponSpec { name: "Rusty Pistol", damage: 2, range: 4, ammo_capacity: 6 }
        }
        WeaponKind::Scattergun => {
            WeaponSpec { name: "Scattergun", damage: 4, range: 2, ammo_capacity: 2 }
        }
        WeaponKind::LongRifle => {
            WeaponSpec { name: "Long Rifle", damage: 3, range: 7, ammo_capacity: 4 }
        }
    }
}

pub fn armor_spec(kind: ArmorKind) -> ArmorSpec {
    match kind {
        ArmorKind::PaddedVest => ArmorSpec { name: "Padded Vest", mitigation: 1 },
        ArmorKind::ScrapPlate => ArmorSpec { name: "Scrap Plate", mitigation: 2 },
    }
}

pub struct EnemyArchetype {
    pub glyph: char,
    pub speed: u32,
    pub weapon: WeaponKind,
    pub armor: Option<ArmorKind>,
}

/// Gear tiers unlock with the room's challenge rating; higher tiers shoot
/// harder and move on a faster cadence (lower speed value).
pub fn enemy_archetype(tier: u32) -> EnemyArchetype {
    match tier {
        0 => EnemyArchetype { glyph: 'b', speed: 3, weapon: WeaponKind::RustyPistol, armor: None },
        1 => EnemyArchetype {
            glyph: 's',
            speed: 2,
            weapon: WeaponKind::Scattergun,
            armor: Some(ArmorKind::PaddedVest),
        },
        _ => EnemyArchetype {
            glyph: 'm',
            speed: 1,
            weapon: WeaponKind::LongRifle,
            armor: Some(ArmorKind::ScrapPlate),
        },
    }
}

pub fn enemy_health(challenge_rating: u32) -> i32 {
    4 + 2 * challenge_rating as i32
}

pub fn enemy_shooting_skill(challenge_rating: u32) -> u32 {
    1 + challenge_rating / 3
}
