//! Procedural room generation split into coherent submodules. Generation is
//! a pure function of `(run_seed, room_index, kind, base rating)` so the
//! same run always produces the same rooms.

pub mod model;

mod generator;
mod layout;
mod seed;
mod spawns;

pub use generator::RoomGenerator;
pub use model::{EnemySpawn, GeneratedRoom};

use crate::types::RoomKind;

/// Which kind of room the run visits at `room_index`. Derived from the run
/// seed so the sequence is fixed for the whole run.
pub fn room_kind_for(run_seed: u64, room_index: u32) -> RoomKind {
    match seed::mix_seed_stream(run_seed, 0xB00D + u64::from(room_index)) % 3 {
        0 => RoomKind::Cavern,
        1 => RoomKind::Barracks,
        _ => RoomKind::Storage,
    }
}

pub fn generate_room(
    run_seed: u64,
    room_index: u32,
    kind: RoomKind,
    base_challenge_rating: u32,
) -> GeneratedRoom {
    RoomGenerator::new(run_seed).generate(room_index, kind, base_challenge_rating)
}
