//! Viewport math: the visible window is centered on the player and the map
//! scrolls under it.

use crate::types::Pos;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub const DEFAULT: Viewport = Viewport { width: 21, height: 15 };

    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Top-left map coordinate currently under viewport cell (0, 0).
    pub fn offset(self, player_pos: Pos) -> Pos {
        Pos { y: player_pos.y - self.height / 2, x: player_pos.x - self.width / 2 }
    }

    pub fn contains(self, view_pos: Pos) -> bool {
        view_pos.x >= 0 && view_pos.x < self.width && view_pos.y >= 0 && view_pos.y < self.height
    }

    /// Map space to screen space. `None` means the map cell is not visible
    /// in the viewport; that is an answer, not an error.
    pub fn map_to_viewport(self, map_pos: Pos, player_pos: Pos) -> Option<Pos> {
        let offset = self.offset(player_pos);
        let view_pos = Pos { y: map_pos.y - offset.y, x: map_pos.x - offset.x };
        self.contains(view_pos).then_some(view_pos)
    }

    /// Exact inverse of [`Self::map_to_viewport`] over its `Some` range.
    pub fn viewport_to_map(self, view_pos: Pos, player_pos: Pos) -> Pos {
        let offset = self.offset(player_pos);
        Pos { y: view_pos.y + offset.y, x: view_pos.x + offset.x }
    }
}
