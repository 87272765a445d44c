//! Viewport-relative draw passes for a room. Drawing doubles as discovery:
//! tiles inside the player's sight are marked discovered as they render.

use crate::render::{ColorAttr, Surface, color};
use crate::state::Player;
use crate::types::{Pos, TileKind};
use crate::viewport::Viewport;

use super::Room;

impl Room {
    /// Base map pass. Three fog states per cell: inside sight renders bold
    /// and marks the tile discovered, discovered-but-out-of-sight renders
    /// in the dim pair, and everything else stays blank.
    pub fn draw_map(&mut self, surface: &mut dyn Surface, player: &Player, viewport: Viewport) {
        for view_y in 0..viewport.height {
            for view_x in 0..viewport.width {
                let view_pos = Pos::new(view_x, view_y);
                let map_pos = viewport.viewport_to_map(view_pos, player.pos);
                let tile = self.tile_at(map_pos);

                if player.is_in_view_distance(map_pos) {
                    self.mark_discovered(map_pos);
                    surface.draw_char(
                        view_y,
                        view_x,
                        tile.kind.glyph(),
                        ColorAttr::bold(tile.kind.color_pair()),
                    );
                } else if tile.discovered {
                    surface.draw_char(
                        view_y,
                        view_x,
                        tile.kind.glyph(),
                        ColorAttr::pair(color::OUTSIDE_SIGHT),
                    );
                } else {
                    surface.draw_char(view_y, view_x, ' ', ColorAttr::default());
                }
            }
        }
    }

    /// Full room pass: map first, then exit, then floor items, then
    /// enemies, so later layers overdraw earlier ones. The entity layers
    /// clip to the viewport only; an enemy standing on remembered dim
    /// terrain is still drawn.
    pub fn draw(&mut self, surface: &mut dyn Surface, player: &Player, viewport: Viewport) {
        self.draw_map(surface, player, viewport);

        if let Some(exit) = self.exit
            && let Some(at) = viewport.map_to_viewport(exit, player.pos)
        {
            surface.draw_char(at.y, at.x, TileKind::Door.glyph(), ColorAttr::bold(color::EXIT));
        }

        for (&pos, &stack) in &self.floor_item_stacks {
            if let Some(at) = viewport.map_to_viewport(pos, player.pos) {
                surface.draw_char(at.y, at.x, stack.glyph(), ColorAttr::bold(stack.color_pair()));
            }
        }

        for enemy in &self.enemies {
            if let Some(at) = viewport.map_to_viewport(enemy.pos, player.pos) {
                enemy.draw(surface, at);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::WeaponKind;
    use crate::enemy::Enemy;
    use crate::state::ItemStack;

    /// Records the last glyph and attribute drawn to each cell.
    struct Recorder {
        width: i32,
        cells: Vec<(char, ColorAttr)>,
    }

    impl Recorder {
        fn new(viewport: Viewport) -> Self {
            Self {
                width: viewport.width,
                cells: vec![(' ', ColorAttr::default()); (viewport.width * viewport.height) as usize],
            }
        }

        fn cell(&self, view_pos: Pos) -> (char, ColorAttr) {
            self.cells[(view_pos.y * self.width + view_pos.x) as usize]
        }
    }

    impl Surface for Recorder {
        fn draw_char(&mut self, row: i32, col: i32, glyph: char, attr: ColorAttr) {
            self.cells[(row * self.width + col) as usize] = (glyph, attr);
        }
    }

    fn viewport() -> Viewport {
        Viewport::new(21, 15)
    }

    fn centered_player(pos: Pos) -> Player {
        let mut player = Player::new();
        player.pos = pos;
        player
    }

    #[test]
    fn cells_in_sight_render_bold_and_become_discovered() {
        let mut room = Room::open_box(30, 30);
        let player = centered_player(Pos::new(15, 15));
        let mut surface = Recorder::new(viewport());

        room.draw_map(&mut surface, &player, viewport());

        let center = Pos::new(viewport().width / 2, viewport().height / 2);
        let (glyph, attr) = surface.cell(center);
        assert_eq!(glyph, '.');
        assert!(attr.bold);
        assert!(room.tile_at(player.pos).discovered);
    }

    #[test]
    fn discovered_cells_out_of_sight_render_dim() {
        let mut room = Room::open_box(60, 10);
        let mut player = centered_player(Pos::new(10, 5));
        let mut surface = Recorder::new(viewport());
        room.draw_map(&mut surface, &player, viewport());
        assert!(room.tile_at(Pos::new(10, 5)).discovered);

        // Walk away and redraw: the old position is discovered but no
        // longer inside the sight radius.
        player.pos = Pos::new(20, 5);
        let mut surface = Recorder::new(viewport());
        room.draw_map(&mut surface, &player, viewport());

        let old = viewport().map_to_viewport(Pos::new(10, 5), player.pos).unwrap();
        let (glyph, attr) = surface.cell(old);
        assert_eq!(glyph, '.');
        assert_eq!(attr, ColorAttr::pair(color::OUTSIDE_SIGHT));
    }

    #[test]
    fn undiscovered_cells_stay_blank() {
        let mut room = Room::open_box(60, 30);
        let player = centered_player(Pos::new(10, 10));
        let mut surface = Recorder::new(viewport());
        room.draw_map(&mut surface, &player, viewport());

        // Viewport corner is outside the 6-tile sight radius and has never
        // been seen.
        let (glyph, attr) = surface.cell(Pos::new(0, 0));
        assert_eq!(glyph, ' ');
        assert_eq!(attr, ColorAttr::default());
    }

    #[test]
    fn out_of_bounds_cells_render_as_undiscovered_blank() {
        let mut room = Room::open_box(8, 8);
        let player = centered_player(Pos::new(1, 1));
        let mut surface = Recorder::new(viewport());
        room.draw_map(&mut surface, &player, viewport());

        // Map (-9, -6) sits far outside the room and outside sight.
        let view_pos = viewport().map_to_viewport(Pos::new(-9, -6), player.pos).unwrap();
        assert_eq!(surface.cell(view_pos), (' ', ColorAttr::default()));

        // Just outside the border but inside sight: the synthetic wall is
        // drawn like any wall in view.
        let near = viewport().map_to_viewport(Pos::new(-1, 1), player.pos).unwrap();
        let (glyph, attr) = surface.cell(near);
        assert_eq!(glyph, '#');
        assert!(attr.bold);
    }

    #[test]
    fn enemies_overdraw_items_which_overdraw_the_exit() {
        let mut room = Room::open_box(30, 30);
        let spot = Pos::new(16, 15);
        room.exit = Some(spot);
        room.floor_item_stacks.insert(spot, ItemStack::Weapon(WeaponKind::RustyPistol));
        room.enemies.push(Enemy::new(spot, 'b', 1, 8));

        let player = centered_player(Pos::new(15, 15));
        let mut surface = Recorder::new(viewport());
        room.draw(&mut surface, &player, viewport());

        let at = viewport().map_to_viewport(spot, player.pos).unwrap();
        let (glyph, attr) = surface.cell(at);
        assert_eq!(glyph, 'b');
        assert_eq!(attr, ColorAttr::pair(color::ENEMY));
    }

    #[test]
    fn off_viewport_layers_are_not_drawn() {
        let mut room = Room::open_box(60, 30);
        let far = Pos::new(40, 25);
        room.exit = Some(far);
        room.floor_item_stacks.insert(far, ItemStack::Armor(crate::content::ArmorKind::PaddedVest));
        room.enemies.push(Enemy::new(far, 'm', 1, 8));

        let player = centered_player(Pos::new(10, 10));
        let mut surface = Recorder::new(viewport());
        room.draw(&mut surface, &player, viewport());

        // Everything at `far` falls outside the 21x15 window; nothing but
        // the map pass may have touched the buffer.
        for (glyph, _) in &surface.cells {
            assert!(matches!(glyph, ' ' | '.' | '#'));
        }
    }

    #[test]
    fn layers_on_remembered_terrain_are_still_drawn() {
        let mut room = Room::open_box(30, 30);
        let enemy_spot = Pos::new(23, 15);
        let item_spot = Pos::new(22, 10);
        let exit_spot = Pos::new(8, 20);
        room.enemies.push(Enemy::new(enemy_spot, 'b', 3, 8));
        room.floor_item_stacks.insert(item_spot, ItemStack::Weapon(WeaponKind::RustyPistol));
        room.exit = Some(exit_spot);

        // All three spots sit inside the viewport but beyond the 6-tile
        // sight radius of a player at (15, 15).
        let player = centered_player(Pos::new(15, 15));
        assert!(!player.is_in_view_distance(enemy_spot));
        assert!(!player.is_in_view_distance(item_spot));
        assert!(!player.is_in_view_distance(exit_spot));

        let mut surface = Recorder::new(viewport());
        room.draw(&mut surface, &player, viewport());

        let at = viewport().map_to_viewport(enemy_spot, player.pos).unwrap();
        assert_eq!(surface.cell(at), ('b', ColorAttr::pair(color::ENEMY)));
        let at = viewport().map_to_viewport(item_spot, player.pos).unwrap();
        assert_eq!(surface.cell(at).0, ')');
        let at = viewport().map_to_viewport(exit_spot, player.pos).unwrap();
        assert_eq!(surface.cell(at), ('+', ColorAttr::bold(color::EXIT)));
    }
}
