use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};

use app::input::{self, Command};
use app::panels;
use app::renderer::Terminal;
use app::run_state_file::RunStateFile;
use app::seed::{self, SeedChoice};
use app::{format_seed, format_snapshot_hash};
use game_core::render::{self, ColorAttr, color};
use game_core::{Game, TurnOutcome};

/// Map viewport (21x15) plus the side panel and the log under the map.
const FRAME_WIDTH: i32 = 44;
const FRAME_HEIGHT: i32 = 21;
const LOG_ROW: i32 = 16;
const HELP_ROW: i32 = 20;

#[derive(Parser)]
#[command(name = "warrens", about = "A small terminal roguelike")]
struct Args {
    /// Run seed; omit for a fresh random run.
    #[arg(long)]
    seed: Option<u64>,
    /// Where the per-turn run state is written. Defaults to the platform
    /// data directory.
    #[arg(long)]
    state_file: Option<PathBuf>,
}

enum RunEnd {
    Quit,
    Defeated,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let seed_choice = match args.seed {
        Some(seed) => SeedChoice::Cli(seed),
        None => SeedChoice::Generated(seed::generate_runtime_seed()),
    };
    let state_path = args.state_file.or_else(RunStateFile::get_default_path);

    let mut game = Game::new(seed_choice.value());
    let mut terminal = Terminal::new(FRAME_WIDTH, FRAME_HEIGHT);
    terminal.init().context("failed to enter raw terminal mode")?;
    let end = run(&mut game, &mut terminal, state_path.as_deref());
    terminal.cleanup().context("failed to restore the terminal")?;
    let end = end?;

    match end {
        RunEnd::Quit => println!("You slip back to the surface."),
        RunEnd::Defeated => println!("You fall on depth {}.", game.room_index + 1),
    }
    println!("seed: {}", format_seed(seed_choice.value()));
    println!("ticks: {}", game.current_tick());
    println!("state: {}", format_snapshot_hash(game.snapshot_hash()));
    if let SeedChoice::Generated(seed) = seed_choice {
        println!("replay with: warrens --seed {seed}");
    }

    Ok(())
}

fn run(game: &mut Game, terminal: &mut Terminal, state_path: Option<&Path>) -> Result<RunEnd> {
    loop {
        let frame = terminal.frame();
        game.draw(&mut *frame);
        panels::draw_player_status(&mut *frame, game);
        panels::draw_enemy_status(&mut *frame, game);
        panels::draw_event_log(&mut *frame, game, LOG_ROW);
        render::draw_text(
            &mut *frame,
            HELP_ROW,
            0,
            "hjkl/arrows move  g pick up  . wait  q quit",
            ColorAttr::pair(color::OUTSIDE_SIGHT),
        );
        terminal.flush_frame().context("failed to flush the frame")?;

        let command = match event::read().context("failed to read terminal input")? {
            Event::Key(key) => input::command_for_key(key),
            Event::Resize(..) => {
                terminal.invalidate();
                None
            }
            _ => None,
        };
        let Some(command) = command else {
            continue;
        };

        let outcome = match command {
            Command::Quit => return Ok(RunEnd::Quit),
            Command::Player(action) => game.player_turn(action),
        };

        if let Some(path) = state_path {
            // A failed state write never interrupts the run.
            let _ = persist_run_state(game, path);
        }

        match outcome {
            TurnOutcome::PlayerDefeated => return Ok(RunEnd::Defeated),
            TurnOutcome::Continue | TurnOutcome::RoomAdvanced => {}
        }
    }
}

fn persist_run_state(game: &Game, path: &Path) -> std::io::Result<()> {
    let updated_at_unix_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_millis() as u64);
    RunStateFile {
        format_version: RunStateFile::FORMAT_VERSION,
        run_seed: game.run_seed(),
        snapshot_hash_hex: format_snapshot_hash(game.snapshot_hash()),
        tick: game.current_tick(),
        room_index: game.room_index,
        room_kind: game.room.kind.display_name().to_string(),
        challenge_rating: game.room.challenge_rating(game.challenge_rating),
        player_health: game.player.health,
        updated_at_unix_ms,
    }
    .write_atomic(path)
}
