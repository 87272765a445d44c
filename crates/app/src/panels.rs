//! Text panels around the map viewport: player status and the nearest
//! enemy's status on the right, the recent event log underneath.

use game_core::content::{armor_spec, weapon_spec};
use game_core::render::{self, ColorAttr, color};
use game_core::types::LogEvent;
use game_core::{Enemy, Game, Surface};

/// First column of the side panel, just right of the 21-wide viewport.
pub const PANEL_X: i32 = 23;
/// Events shown under the map.
pub const LOG_LINES: usize = 4;

pub fn draw_player_status(surface: &mut dyn Surface, game: &Game) {
    let col = PANEL_X + 1;
    let attr = ColorAttr::default();
    let player = &game.player;

    render::draw_text(surface, 0, col, "You", ColorAttr::bold(color::PLAYER));
    render::draw_text(
        surface,
        1,
        col,
        &format!("Health: {}/{}", player.health, player.max_health),
        attr,
    );
    let weapon = player.equipped_weapon.map_or("Fists", |kind| weapon_spec(kind).name);
    render::draw_text(surface, 2, col, &format!("Weapon: {weapon}"), attr);
    let armor = player.equipped_armor.map_or("None", |kind| armor_spec(kind).name);
    render::draw_text(surface, 3, col, &format!("Armor: {armor}"), attr);
    render::draw_text(
        surface,
        5,
        col,
        &format!(
            "{} (CR {})",
            game.room.kind.display_name(),
            game.room.challenge_rating(game.challenge_rating)
        ),
        attr,
    );
    render::draw_text(surface, 6, col, &format!("Depth: {}", game.room_index + 1), attr);
}

/// The enemy whose status block is shown: the closest one the player can
/// currently see, ties broken by position so the choice is stable.
pub fn focused_enemy(game: &Game) -> Option<&Enemy> {
    game.room
        .enemies
        .iter()
        .filter(|enemy| game.player.is_in_view_distance(enemy.pos))
        .min_by_key(|enemy| (game.player.pos.chebyshev(enemy.pos), enemy.pos))
}

pub fn draw_enemy_status(surface: &mut dyn Surface, game: &Game) {
    if let Some(enemy) = focused_enemy(game) {
        enemy.draw_status(surface, PANEL_X);
    }
}

pub fn format_event(event: &LogEvent) -> String {
    match event {
        LogEvent::RoomEntered { kind, challenge_rating } => {
            format!("You enter a {} (CR {challenge_rating}).", kind.display_name().to_lowercase())
        }
        LogEvent::EnemyShotHit { damage } => format!("A shot hits you for {damage}."),
        LogEvent::EnemyShotMissed => "A shot whistles past you.".to_string(),
        LogEvent::EnemyReloaded => "You hear a weapon being reloaded.".to_string(),
        LogEvent::EnemyDefeated { .. } => "An enemy falls.".to_string(),
        LogEvent::WeaponDropped { weapon, .. } => {
            format!("A {} clatters to the floor.", weapon_spec(*weapon).name)
        }
        LogEvent::WeaponTaken { weapon } => {
            format!("You take the {}.", weapon_spec(*weapon).name)
        }
        LogEvent::ArmorTaken { armor } => {
            format!("You strap on the {}.", armor_spec(*armor).name)
        }
        LogEvent::ExitRevealed { .. } => "The way down is open.".to_string(),
    }
}

/// Most recent events, newest last, under the map.
pub fn draw_event_log(surface: &mut dyn Surface, game: &Game, top_row: i32) {
    let events = game.log();
    let start = events.len().saturating_sub(LOG_LINES);
    for (line, event) in events[start..].iter().enumerate() {
        render::draw_text(surface, top_row + line as i32, 0, &format_event(event), ColorAttr::default());
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use game_core::PlayerAction;
    use game_core::types::RoomKind;

    use super::*;

    struct TextGrid {
        cells: BTreeMap<(i32, i32), char>,
    }

    impl TextGrid {
        fn new() -> Self {
            Self { cells: BTreeMap::new() }
        }

        fn row_text(&self, row: i32) -> String {
            self.cells.range((row, i32::MIN)..=(row, i32::MAX)).map(|(_, &glyph)| glyph).collect()
        }
    }

    impl Surface for TextGrid {
        fn draw_char(&mut self, row: i32, col: i32, glyph: char, _attr: ColorAttr) {
            self.cells.insert((row, col), glyph);
        }
    }

    #[test]
    fn player_status_shows_health_gear_and_room() {
        let game = Game::new(404);
        let mut grid = TextGrid::new();
        draw_player_status(&mut grid, &game);

        assert_eq!(grid.row_text(0), "You");
        assert_eq!(grid.row_text(1), "Health: 20/20");
        assert_eq!(grid.row_text(2), "Weapon: Fists");
        assert_eq!(grid.row_text(3), "Armor: None");
        assert!(grid.row_text(5).contains("(CR "));
        assert_eq!(grid.row_text(6), "Depth: 1");
    }

    #[test]
    fn event_lines_read_like_messages() {
        assert_eq!(
            format_event(&LogEvent::RoomEntered { kind: RoomKind::Barracks, challenge_rating: 2 }),
            "You enter a barracks (CR 2).",
        );
        assert_eq!(format_event(&LogEvent::EnemyShotHit { damage: 3 }), "A shot hits you for 3.");
        assert_eq!(format_event(&LogEvent::EnemyReloaded), "You hear a weapon being reloaded.");
    }

    #[test]
    fn event_log_keeps_only_the_newest_lines() {
        let mut game = Game::new(404);
        // Generate more events than fit by waiting while enemies act.
        for _ in 0..60 {
            game.player_turn(PlayerAction::Wait);
        }
        let mut grid = TextGrid::new();
        draw_event_log(&mut grid, &game, 16);

        let drawn_rows = grid.cells.keys().map(|&(row, _)| row).collect::<std::collections::BTreeSet<_>>();
        assert!(drawn_rows.len() <= LOG_LINES);
        assert!(drawn_rows.iter().all(|&row| (16..16 + LOG_LINES as i32).contains(&row)));

        if let Some(last) = game.log().last() {
            let expected = format_event(last);
            let shown = (16..16 + LOG_LINES as i32).map(|row| grid.row_text(row)).collect::<Vec<_>>();
            assert!(shown.iter().any(|line| *line == expected));
        }
    }

    #[test]
    fn focused_enemy_is_the_closest_visible_one() {
        let mut game = Game::new(404);
        game.room.enemies.clear();
        let near = game.player.pos.translated(2, 0);
        let far = game.player.pos.translated(0, -5);
        game.room.enemies.push(Enemy::new(far, 'm', 1, 9));
        game.room.enemies.push(Enemy::new(near, 'b', 1, 9));

        let focused = focused_enemy(&game).expect("both enemies are visible");
        assert_eq!(focused.pos, near);
    }
}
