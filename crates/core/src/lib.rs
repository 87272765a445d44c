pub mod content;
pub mod enemy;
pub mod game;
pub mod mapgen;
pub mod render;
pub mod room;
mod rng;
pub mod state;
pub mod types;
pub mod viewport;

pub use enemy::Enemy;
pub use game::{Game, PlayerAction, TurnOutcome};
pub use render::{ColorAttr, Surface};
pub use room::Room;
pub use state::{ItemStack, Player, Tile};
pub use types::*;
pub use viewport::Viewport;
