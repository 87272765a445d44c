//! High-level room generation orchestration that composes dimensions,
//! carving, and spawns.

use crate::types::RoomKind;

use super::layout::carve_tiles;
use super::model::GeneratedRoom;
use super::seed::{derive_room_seed, mix_seed_stream, random_usize};

// Room dimensions are the challenge rating times a randomized multiplier.
const HEIGHT_MULTIPLIER_MIN: usize = 15;
const HEIGHT_MULTIPLIER_MAX: usize = 25;
const WIDTH_MULTIPLIER_MIN: usize = 10;
const WIDTH_MULTIPLIER_MAX: usize = 12;

const STREAM_MODIFIER: u64 = 1;
const STREAM_HEIGHT: u64 = 2;
const STREAM_WIDTH: u64 = 3;

pub struct RoomGenerator {
    run_seed: u64,
}

impl RoomGenerator {
    pub fn new(run_seed: u64) -> Self {
        Self { run_seed }
    }

    pub fn generate(
        &self,
        room_index: u32,
        kind: RoomKind,
        base_challenge_rating: u32,
    ) -> GeneratedRoom {
        let room_seed = derive_room_seed(self.run_seed, room_index, kind);

        // Per-room difficulty swing in -1..=2.
        let modifier = (mix_seed_stream(room_seed, STREAM_MODIFIER) % 4) as i32 - 1;
        let challenge_rating = (base_challenge_rating as i32 + modifier).max(1) as u32;

        let height = challenge_rating as usize
            * random_usize(room_seed, STREAM_HEIGHT, HEIGHT_MULTIPLIER_MIN, HEIGHT_MULTIPLIER_MAX);
        let width = challenge_rating as usize
            * random_usize(room_seed, STREAM_WIDTH, WIDTH_MULTIPLIER_MIN, WIDTH_MULTIPLIER_MAX);

        let tiles = carve_tiles(room_seed, kind, width, height);

        let mut generated = GeneratedRoom {
            kind,
            challenge_rating_modifier: modifier,
            challenge_rating,
            width,
            height,
            tiles,
            enemy_spawns: Vec::new(),
        };

        let spawn_context = super::spawns::SpawnContext {
            kind,
            room_seed,
            challenge_rating,
            width,
            height,
            tiles: &generated.tiles,
            entry_tile: generated.entry_tile(),
        };
        generated.enemy_spawns = super::spawns::generate_enemy_spawns(&spawn_context);

        generated
    }
}
