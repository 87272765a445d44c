//! Deterministic enemy spawn placement and gear assignment.

use crate::content;
use crate::types::{Pos, RoomKind, TileKind};

use super::model::EnemySpawn;
use super::seed::mix_seed_stream;

const STREAM_SPAWN: u64 = 7_000;

/// Enemies never spawn on top of the player's entry pocket.
const MIN_ENTRY_DISTANCE: u32 = 4;

pub(super) struct SpawnContext<'a> {
    pub kind: RoomKind,
    pub room_seed: u64,
    pub challenge_rating: u32,
    pub width: usize,
    pub height: usize,
    pub tiles: &'a [TileKind],
    pub entry_tile: Pos,
}

pub(super) fn generate_enemy_spawns(context: &SpawnContext<'_>) -> Vec<EnemySpawn> {
    let kind_bonus = match context.kind {
        RoomKind::Barracks => 2,
        RoomKind::Cavern | RoomKind::Storage => 0,
    };
    let enemy_count = (2 + context.challenge_rating + kind_bonus) as usize;

    let mut spawns: Vec<EnemySpawn> = Vec::with_capacity(enemy_count);
    for spawn_index in 0..enemy_count {
        let stream = STREAM_SPAWN + spawn_index as u64 * 3;
        let x = 1 + (mix_seed_stream(context.room_seed, stream) as usize) % (context.width - 2);
        let y = 1 + (mix_seed_stream(context.room_seed, stream + 1) as usize) % (context.height - 2);
        let desired = Pos::new(x as i32, y as i32);
        let pos = nearest_open_tile(context, desired, &spawns);

        let Some(pos) = pos else {
            continue;
        };
        spawns.push(build_spawn(context, pos, stream + 2));
    }

    spawns.sort_by_key(|spawn| (spawn.pos.y, spawn.pos.x));
    spawns
}

fn build_spawn(context: &SpawnContext<'_>, pos: Pos, stream: u64) -> EnemySpawn {
    // Tier roll is biased toward the room's challenge rating: a rating-1
    // room fields pistol grunts, higher ratings mix in the better gear.
    let max_tier = (context.challenge_rating.saturating_sub(1)).min(2);
    let tier = (mix_seed_stream(context.room_seed, stream) % u64::from(max_tier + 1)) as u32;
    let archetype = content::enemy_archetype(tier);

    EnemySpawn {
        pos,
        glyph: archetype.glyph,
        speed: archetype.speed,
        health: content::enemy_health(context.challenge_rating),
        shooting_skill: content::enemy_shooting_skill(context.challenge_rating),
        weapon: Some(archetype.weapon),
        armor: archetype.armor,
    }
}

/// Walk outward from the desired cell to the nearest walkable tile that is
/// unoccupied and far enough from the entry pocket. Deterministic scan
/// order: distance first, then (y, x).
fn nearest_open_tile(
    context: &SpawnContext<'_>,
    desired: Pos,
    taken: &[EnemySpawn],
) -> Option<Pos> {
    let mut best: Option<(u32, Pos)> = None;
    for y in 1..context.height - 1 {
        for x in 1..context.width - 1 {
            let pos = Pos::new(x as i32, y as i32);
            if !context.tiles[y * context.width + x].is_walkable() {
                continue;
            }
            if pos.chebyshev(context.entry_tile) < MIN_ENTRY_DISTANCE {
                continue;
            }
            if taken.iter().any(|spawn| spawn.pos == pos) {
                continue;
            }
            let distance = pos.manhattan(desired);
            let candidate = (distance, pos);
            let better = match best {
                None => true,
                Some((best_distance, best_pos)) => {
                    distance < best_distance
                        || (distance == best_distance && (pos.y, pos.x) < (best_pos.y, best_pos.x))
                }
            };
            if better {
                best = Some(candidate);
            }
        }
    }
    best.map(|(_, pos)| pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::layout::carve_tiles;

    fn context_for(seed: u64, kind: RoomKind) -> (Vec<TileKind>, usize, usize) {
        let (width, height) = (26, 34);
        (carve_tiles(seed, kind, width, height), width, height)
    }

    #[test]
    fn spawns_land_on_walkable_tiles_away_from_entry() {
        let (tiles, width, height) = context_for(77, RoomKind::Cavern);
        let entry = Pos::new(width as i32 / 2, height as i32 - 2);
        let context = SpawnContext {
            kind: RoomKind::Cavern,
            room_seed: 77,
            challenge_rating: 3,
            width,
            height,
            tiles: &tiles,
            entry_tile: entry,
        };
        let spawns = generate_enemy_spawns(&context);
        assert!(!spawns.is_empty());
        for spawn in &spawns {
            let index = spawn.pos.y as usize * width + spawn.pos.x as usize;
            assert!(tiles[index].is_walkable());
            assert!(spawn.pos.chebyshev(entry) >= MIN_ENTRY_DISTANCE);
        }
    }

    #[test]
    fn spawns_never_share_a_tile() {
        let (tiles, width, height) = context_for(909, RoomKind::Barracks);
        let context = SpawnContext {
            kind: RoomKind::Barracks,
            room_seed: 909,
            challenge_rating: 5,
            width,
            height,
            tiles: &tiles,
            entry_tile: Pos::new(width as i32 / 2, height as i32 - 2),
        };
        let spawns = generate_enemy_spawns(&context);
        let mut positions: Vec<Pos> = spawns.iter().map(|spawn| spawn.pos).collect();
        positions.sort();
        positions.dedup();
        assert_eq!(positions.len(), spawns.len());
    }

    #[test]
    fn rating_one_rooms_only_field_the_lowest_tier() {
        let (tiles, width, height) = context_for(5, RoomKind::Cavern);
        let context = SpawnContext {
            kind: RoomKind::Cavern,
            room_seed: 5,
            challenge_rating: 1,
            width,
            height,
            tiles: &tiles,
            entry_tile: Pos::new(width as i32 / 2, height as i32 - 2),
        };
        for spawn in generate_enemy_spawns(&context) {
            assert_eq!(spawn.glyph, 'b');
        }
    }

    #[test]
    fn barracks_field_more_enemies_than_caverns_at_equal_rating() {
        let (cavern_tiles, width, height) = context_for(11, RoomKind::Cavern);
        let cavern = SpawnContext {
            kind: RoomKind::Cavern,
            room_seed: 11,
            challenge_rating: 3,
            width,
            height,
            tiles: &cavern_tiles,
            entry_tile: Pos::new(width as i32 / 2, height as i32 - 2),
        };
        let (barracks_tiles, width, height) = context_for(11, RoomKind::Barracks);
        let barracks = SpawnContext {
            kind: RoomKind::Barracks,
            room_seed: 11,
            challenge_rating: 3,
            width,
            height,
            tiles: &barracks_tiles,
            entry_tile: Pos::new(width as i32 / 2, height as i32 - 2),
        };
        let cavern_spawns = generate_enemy_spawns(&cavern);
        let barracks_spawns = generate_enemy_spawns(&barracks);
        assert!(barracks_spawns.len() > cavern_spawns.len());
    }
}
