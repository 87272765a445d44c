//! Live room state: tiles with discovery flags, the enemy roster, item
//! stacks on the floor, and the exit once the room is cleared.

use std::collections::BTreeMap;

use rand_chacha::ChaCha8Rng;

use crate::enemy::Enemy;
use crate::mapgen::GeneratedRoom;
use crate::rng;
use crate::state::{ItemStack, Player, Tile};
use crate::types::{LogEvent, Pos, RoomKind};

mod draw;

/// How far a dropped item may scatter from the drop point (Chebyshev).
const SCATTER_RADIUS: u32 = 3;
const SCATTER_ATTEMPTS: u32 = 64;

pub struct Room {
    pub kind: RoomKind,
    /// Per-room difficulty swing applied on top of the game rating, fixed
    /// at generation time. The effective rating is recomputed live so it
    /// tracks the game rating as the run progresses.
    pub challenge_rating_modifier: i32,
    pub width: usize,
    pub height: usize,
    tiles: Vec<Tile>,
    pub enemies: Vec<Enemy>,
    pub floor_item_stacks: BTreeMap<Pos, ItemStack>,
    pub exit: Option<Pos>,
    /// Set on first entry so entry bookkeeping runs exactly once per room.
    pub was_entered: bool,
    entry: Pos,
}

impl Room {
    pub fn from_generated(generated: GeneratedRoom) -> Self {
        let enemies = generated
            .enemy_spawns
            .iter()
            .map(|spawn| {
                let mut enemy = Enemy::new(spawn.pos, spawn.glyph, spawn.speed, spawn.health)
                    .with_gear(spawn.weapon, spawn.armor);
                enemy.shooting_skill = spawn.shooting_skill;
                enemy
            })
            .collect();

        Self {
            kind: generated.kind,
            challenge_rating_modifier: generated.challenge_rating_modifier,
            width: generated.width,
            height: generated.height,
            tiles: generated.tiles.iter().map(|&kind| Tile::new(kind)).collect(),
            enemies,
            floor_item_stacks: BTreeMap::new(),
            exit: None,
            was_entered: false,
            entry: generated.entry_tile(),
        }
    }

    /// Effective difficulty right now: the game rating plus this room's
    /// fixed modifier, floored at one.
    pub fn challenge_rating(&self, game_rating: u32) -> u32 {
        (game_rating as i32 + self.challenge_rating_modifier).max(1) as u32
    }

    /// Entering a room puts the player on the exit tile when one exists
    /// (re-entry), otherwise on the default entry cell.
    pub fn position_player(&self, player: &mut Player) {
        player.pos = self.exit.unwrap_or(self.entry);
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Out-of-bounds reads resolve to a synthetic undiscovered wall; the
    /// room is conceptually surrounded by infinite rock.
    pub fn tile_at(&self, pos: Pos) -> Tile {
        if !self.in_bounds(pos) {
            return Tile::boundary_wall();
        }
        self.tiles[pos.y as usize * self.width + pos.x as usize]
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.tile_at(pos).kind.is_walkable()
    }

    fn mark_discovered(&mut self, pos: Pos) {
        if self.in_bounds(pos) {
            self.tiles[pos.y as usize * self.width + pos.x as usize].discovered = true;
        }
    }

    pub fn enemy_at(&self, pos: Pos) -> Option<usize> {
        self.enemies.iter().position(|enemy| enemy.pos == pos)
    }

    pub fn is_cleared(&self) -> bool {
        self.enemies.is_empty()
    }

    /// One enemy turn for the whole roster. Every enemy ticks its movement
    /// counter; those whose gate opens act with a strict priority of
    /// attack, then reload, then a random step onto a walkable tile.
    pub fn move_enemies(
        &mut self,
        player: &mut Player,
        rng: &mut ChaCha8Rng,
        log: &mut Vec<LogEvent>,
    ) {
        for index in 0..self.enemies.len() {
            self.enemies[index].update_movement();
            if !self.enemies[index].can_move() {
                continue;
            }

            if self.enemies[index].can_attack_player(player.pos) {
                self.enemies[index].attack(player, rng, log);
                continue;
            }
            if !self.enemies[index].has_ammo() {
                self.enemies[index].reload_ammo();
                log.push(LogEvent::EnemyReloaded);
                continue;
            }

            // One uniform orthogonal step.
            let (dx, dy) = [(0, -1), (0, 1), (-1, 0), (1, 0)][rng::range(rng, 4) as usize];
            let destination = self.enemies[index].pos.translated(dx, dy);
            if self.is_walkable(destination) && destination != player.pos {
                self.enemies[index].step(dx, dy);
            }
        }
    }

    /// Sweep out every enemy at or below zero health, dropping its weapon
    /// near where it fell.
    pub fn remove_defeated(&mut self, rng: &mut ChaCha8Rng, log: &mut Vec<LogEvent>) {
        let mut index = 0;
        while index < self.enemies.len() {
            if self.enemies[index].health > 0 {
                index += 1;
                continue;
            }
            let fallen = self.enemies.remove(index);
            log.push(LogEvent::EnemyDefeated { pos: fallen.pos });
            if let Some(weapon) = fallen.equipped_weapon
                && let Some(at) =
                    self.add_item_stack_to_floor(fallen.pos, ItemStack::Weapon(weapon), rng)
            {
                log.push(LogEvent::WeaponDropped { weapon, pos: at });
            }
        }
    }

    /// Scatter a stack onto a free walkable tile within [`SCATTER_RADIUS`]
    /// of the drop point. After a bounded number of random tries it falls
    /// back to the nearest free walkable tile; a room with no such tile
    /// swallows the stack.
    pub fn add_item_stack_to_floor(
        &mut self,
        origin: Pos,
        stack: ItemStack,
        rng: &mut ChaCha8Rng,
    ) -> Option<Pos> {
        for _ in 0..SCATTER_ATTEMPTS {
            let candidate =
                origin.translated(rng::offset(rng, SCATTER_RADIUS), rng::offset(rng, SCATTER_RADIUS));
            if self.is_free_for_item(candidate) {
                self.floor_item_stacks.insert(candidate, stack);
                return Some(candidate);
            }
        }

        let fallback = self.nearest_free_tile(origin)?;
        self.floor_item_stacks.insert(fallback, stack);
        Some(fallback)
    }

    fn is_free_for_item(&self, pos: Pos) -> bool {
        self.is_walkable(pos) && !self.floor_item_stacks.contains_key(&pos)
    }

    fn nearest_free_tile(&self, origin: Pos) -> Option<Pos> {
        let mut best: Option<(u32, Pos)> = None;
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let pos = Pos::new(x, y);
                if !self.is_free_for_item(pos) {
                    continue;
                }
                let distance = origin.chebyshev(pos);
                let candidate = (distance, pos);
                if best.is_none_or(|current| candidate < current) {
                    best = Some(candidate);
                }
            }
        }
        best.map(|(_, pos)| pos)
    }

    pub fn take_item_stack(&mut self, pos: Pos) -> Option<ItemStack> {
        self.floor_item_stacks.remove(&pos)
    }

    /// Reveal the exit on the walkable tile farthest from the player so a
    /// cleared room still asks for a walk.
    pub fn create_exit(&mut self, player_pos: Pos, log: &mut Vec<LogEvent>) {
        if self.exit.is_some() {
            return;
        }
        let mut farthest: Option<(u32, Pos)> = None;
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let pos = Pos::new(x, y);
                if !self.is_walkable(pos) {
                    continue;
                }
                // Invert distance so the tuple comparison prefers far tiles
                // and breaks ties on (y, x).
                let key = (u32::MAX - player_pos.manhattan(pos), pos);
                if farthest.is_none_or(|current| key < current) {
                    farthest = Some(key);
                }
            }
        }
        if let Some((_, pos)) = farthest {
            self.exit = Some(pos);
            log.push(LogEvent::ExitRevealed { pos });
        }
    }

    /// Hand-built room for tests: a bordered rectangle of floor.
    #[cfg(test)]
    pub(crate) fn open_box(width: usize, height: usize) -> Self {
        use crate::types::TileKind;

        let mut tiles = vec![Tile::new(TileKind::Floor); width * height];
        for x in 0..width {
            tiles[x] = Tile::new(TileKind::Wall);
            tiles[(height - 1) * width + x] = Tile::new(TileKind::Wall);
        }
        for y in 0..height {
            tiles[y * width] = Tile::new(TileKind::Wall);
            tiles[y * width + width - 1] = Tile::new(TileKind::Wall);
        }
        Self {
            kind: RoomKind::Cavern,
            challenge_rating_modifier: 0,
            width,
            height,
            tiles,
            enemies: Vec::new(),
            floor_item_stacks: BTreeMap::new(),
            exit: None,
            was_entered: false,
            entry: Pos::new(width as i32 / 2, height as i32 - 2),
        }
    }
}
