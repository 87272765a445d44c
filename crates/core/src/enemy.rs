use rand_chacha::ChaCha8Rng;

use crate::content::{self, ArmorKind, WeaponKind};
use crate::render::{self, ColorAttr, Surface, color};
use crate::rng;
use crate::state::Player;
use crate::types::{LogEvent, Pos};

/// A mobile combat entity. Movement is gated by a tick counter: an enemy
/// with `speed` acts once every `speed` ticks, so lower values act more
/// often. The room owns the enemy and validates destinations before moving
/// it; [`Enemy::step`] itself does no collision checking.
#[derive(Clone, Debug)]
pub struct Enemy {
    pub pos: Pos,
    pub glyph: char,
    pub speed: u32,
    pub current_speed: u32,
    pub health: i32,
    pub shooting_skill: u32,
    pub equipped_weapon: Option<WeaponKind>,
    pub equipped_armor: Option<ArmorKind>,
    pub ammo: u32,
}

impl Enemy {
    pub fn new(pos: Pos, glyph: char, speed: u32, health: i32) -> Self {
        Self {
            pos,
            glyph,
            speed,
            current_speed: 0,
            health,
            shooting_skill: 1,
            equipped_weapon: None,
            equipped_armor: None,
            ammo: 0,
        }
    }

    pub fn with_gear(mut self, weapon: Option<WeaponKind>, armor: Option<ArmorKind>) -> Self {
        self.equipped_weapon = weapon;
        self.equipped_armor = armor;
        self.ammo = weapon.map_or(0, |kind| content::weapon_spec(kind).ammo_capacity);
        self
    }

    /// Unconditional translation; the caller checks walkability first.
    pub fn step(&mut self, dx: i32, dy: i32) {
        self.pos = self.pos.translated(dx, dy);
    }

    /// Called once per game tick whether or not the enemy gets to act.
    pub fn update_movement(&mut self) {
        self.current_speed += 1;
    }

    /// The sole gate for acting this tick. Returns true and resets the
    /// counter once it has reached `speed`; otherwise leaves it unchanged.
    pub fn can_move(&mut self) -> bool {
        if self.current_speed >= self.speed {
            self.current_speed = 0;
            return true;
        }
        false
    }

    /// Enemies with nothing to reload never report being out of ammo, so
    /// the turn logic falls through to movement instead of reload-looping.
    pub fn has_ammo(&self) -> bool {
        self.equipped_weapon.is_none() || self.ammo > 0
    }

    pub fn reload_ammo(&mut self) {
        if let Some(kind) = self.equipped_weapon {
            self.ammo = content::weapon_spec(kind).ammo_capacity;
        }
    }

    pub fn can_attack_player(&self, player_pos: Pos) -> bool {
        let Some(kind) = self.equipped_weapon else {
            return false;
        };
        self.ammo > 0 && self.pos.chebyshev(player_pos) <= content::weapon_spec(kind).range
    }

    /// Spend one round at the player. Hit chance scales with shooting skill;
    /// the player's armor absorbs part of the damage but a hit always costs
    /// at least one point.
    pub fn attack(&mut self, player: &mut Player, rng: &mut ChaCha8Rng, log: &mut Vec<LogEvent>) {
        let Some(kind) = self.equipped_weapon else {
            return;
        };
        if self.ammo == 0 {
            return;
        }
        self.ammo -= 1;

        let hit_chance = (35 + 15 * self.shooting_skill).min(95);
        if rng::range(rng, 100) >= hit_chance {
            log.push(LogEvent::EnemyShotMissed);
            return;
        }

        let damage = (content::weapon_spec(kind).damage - player.armor_mitigation()).max(1);
        player.health -= damage;
        log.push(LogEvent::EnemyShotHit { damage });
    }

    pub fn name(&self) -> &'static str {
        match self.glyph {
            'b' => "Bandit",
            's' => "Scrapper",
            'm' => "Marksman",
            _ => "Enemy",
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, at: Pos) {
        surface.draw_char(at.y, at.x, self.glyph, ColorAttr::pair(color::ENEMY));
    }

    /// Fixed-layout status block in the side panel, anchored at row 13.
    pub fn draw_status(&self, surface: &mut dyn Surface, panel_x: i32) {
        const TOP: i32 = 13;
        let col = panel_x + 1;
        let attr = ColorAttr::pair(color::ENEMY);

        render::draw_text(surface, TOP, col, self.name(), ColorAttr::bold(color::ENEMY));
        render::draw_text(surface, TOP + 1, col, &format!("Health: {}", self.health), attr);
        render::draw_text(
            surface,
            TOP + 2,
            col,
            &format!("Shooting Skill: {}", self.shooting_skill),
            attr,
        );
        render::draw_text(surface, TOP + 4, col, "Equipped Weapon:", attr);
        let weapon = self.equipped_weapon.map_or("None", |kind| content::weapon_spec(kind).name);
        render::draw_text(surface, TOP + 5, col, weapon, attr);
        render::draw_text(surface, TOP + 6, col, "Equipped Armor:", attr);
        let armor = self.equipped_armor.map_or("None", |kind| content::armor_spec(kind).name);
        render::draw_text(surface, TOP + 7, col, armor, attr);
    }
}
