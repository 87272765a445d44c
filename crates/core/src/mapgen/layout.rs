//! Tile carving strategies, one per room kind, plus the connectivity pass
//! that guarantees every walkable tile is reachable from the entry cell.

use crate::types::{Pos, RoomKind, TileKind};

use super::seed::{mix_seed_stream, random_usize};

// Stream bases keep the per-purpose pseudo-random sequences independent.
const STREAM_WALK: u64 = 1_000;
const STREAM_ROOMS: u64 = 2_000;
const STREAM_WATER: u64 = 3_000;
const STREAM_RUBBLE: u64 = 4_000;
const STREAM_AISLES: u64 = 5_000;

pub(super) fn carve_tiles(
    room_seed: u64,
    kind: RoomKind,
    width: usize,
    height: usize,
) -> Vec<TileKind> {
    let mut tiles = vec![TileKind::Wall; width * height];

    match kind {
        RoomKind::Cavern => carve_cavern(&mut tiles, width, height, room_seed),
        RoomKind::Barracks => carve_barracks(&mut tiles, width, height, room_seed),
        RoomKind::Storage => carve_storage(&mut tiles, width, height, room_seed),
    }

    carve_entry_pocket(&mut tiles, width, height);
    connect_regions(&mut tiles, width, height);

    tiles
}

/// The default player placement is `(width/2, height-2)`; make sure that
/// cell and a small pocket above it are always open.
fn carve_entry_pocket(tiles: &mut [TileKind], width: usize, height: usize) {
    let entry_x = width / 2;
    let entry_y = height - 2;
    for y in entry_y.saturating_sub(2)..=entry_y {
        for x in entry_x.saturating_sub(1)..=(entry_x + 1).min(width - 2) {
            if x >= 1 && y >= 1 && y < height - 1 {
                tiles[y * width + x] = TileKind::Floor;
            }
        }
    }
}

fn carve_cavern(tiles: &mut [TileKind], width: usize, height: usize, room_seed: u64) {
    let area = width * height;
    let target_floor = area * 2 / 5;
    let step_budget = area * 8;

    let mut x = width / 2;
    let mut y = height - 2;
    let mut carved = 0usize;

    for step in 0..step_budget {
        if tiles[y * width + x] != TileKind::Floor {
            tiles[y * width + x] = TileKind::Floor;
            carved += 1;
            if carved >= target_floor {
                break;
            }
        }
        match mix_seed_stream(room_seed, STREAM_WALK + step as u64) % 4 {
            0 if y > 1 => y -= 1,
            1 if y < height - 2 => y += 1,
            2 if x > 1 => x -= 1,
            _ if x < width - 2 => x += 1,
            _ => {}
        }
    }

    scatter_water_pools(tiles, width, height, room_seed, 2);
    scatter_rubble(tiles, width, height, room_seed, area / 60);
}

fn carve_barracks(tiles: &mut [TileKind], width: usize, height: usize, room_seed: u64) {
    let target_room_count = 4 + random_usize(room_seed, STREAM_ROOMS, 0, (width * height) / 300);
    let mut rooms: Vec<RoomRect> = Vec::new();

    for attempt in 0..240_u64 {
        if rooms.len() >= target_room_count {
            break;
        }
        let room_width = random_usize(room_seed, STREAM_ROOMS + attempt * 8 + 1, 4, 8);
        let room_height = random_usize(room_seed, STREAM_ROOMS + attempt * 8 + 2, 3, 6);
        if room_width + 2 >= width || room_height + 2 >= height {
            continue;
        }

        let max_x = width - room_width - 1;
        let max_y = height - room_height - 1;
        if max_x <= 1 || max_y <= 1 {
            continue;
        }
        let x = random_usize(room_seed, STREAM_ROOMS + attempt * 8 + 3, 1, max_x);
        let y = random_usize(room_seed, STREAM_ROOMS + attempt * 8 + 4, 1, max_y);

        let candidate = RoomRect { x, y, width: room_width, height: room_height };
        let candidate_with_margin = candidate.expanded(1);
        if rooms.iter().any(|existing| existing.expanded(1).intersects(&candidate_with_margin)) {
            continue;
        }
        rooms.push(candidate);
    }

    for room in &rooms {
        for y in room.y..=room.bottom() {
            for x in room.x..=room.right() {
                tiles[y * width + x] = TileKind::Floor;
            }
        }
    }

    carve_room_corridors(tiles, width, room_seed, &rooms);
    place_doors_on_room_perimeters(tiles, width, height, &rooms);
    scatter_rubble(tiles, width, height, room_seed, rooms.len());
}

fn carve_storage(tiles: &mut [TileKind], width: usize, height: usize, room_seed: u64) {
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            tiles[y * width + x] = TileKind::Floor;
        }
    }

    // Crate rows every third column, with stream-chosen gaps so the hall
    // stays traversable along the aisles.
    let mut aisle = 0_u64;
    for x in (3..width.saturating_sub(3)).step_by(3) {
        for y in 2..height - 3 {
            aisle += 1;
            if mix_seed_stream(room_seed, STREAM_AISLES + aisle) % 4 != 0 {
                tiles[y * width + x] = TileKind::Rubble;
            }
        }
    }

    scatter_water_pools(tiles, width, height, room_seed, 1);
}

fn scatter_water_pools(
    tiles: &mut [TileKind],
    width: usize,
    height: usize,
    room_seed: u64,
    pool_count: usize,
) {
    for pool in 0..pool_count {
        let cx = random_usize(room_seed, STREAM_WATER + pool as u64 * 4, 2, width - 3);
        let cy = random_usize(room_seed, STREAM_WATER + pool as u64 * 4 + 1, 2, height - 3);
        for dy in -1_i32..=1 {
            for dx in -1_i32..=1 {
                let x = cx as i32 + dx;
                let y = cy as i32 + dy;
                if x >= 1 && y >= 1 && (x as usize) < width - 1 && (y as usize) < height - 1 {
                    let index = y as usize * width + x as usize;
                    if tiles[index] == TileKind::Floor {
                        tiles[index] = TileKind::Water;
                    }
                }
            }
        }
    }
}

fn scatter_rubble(
    tiles: &mut [TileKind],
    width: usize,
    height: usize,
    room_seed: u64,
    rubble_count: usize,
) {
    for pile in 0..rubble_count {
        let x = random_usize(room_seed, STREAM_RUBBLE + pile as u64 * 2, 1, width - 2);
        let y = random_usize(room_seed, STREAM_RUBBLE + pile as u64 * 2 + 1, 1, height - 2);
        let index = y * width + x;
        if tiles[index] == TileKind::Floor {
            tiles[index] = TileKind::Rubble;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct RoomRect {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

impl RoomRect {
    fn right(self) -> usize {
        self.x + self.width - 1
    }

    fn bottom(self) -> usize {
        self.y + self.height - 1
    }

    fn center(self) -> Pos {
        Pos { y: (self.y + self.height / 2) as i32, x: (self.x + self.width / 2) as i32 }
    }

    fn expanded(self, margin: usize) -> Self {
        let expanded_x = self.x.saturating_sub(margin);
        let expanded_y = self.y.saturating_sub(margin);
        let expanded_right = self.right() + margin;
        let expanded_bottom = self.bottom() + margin;
        Self {
            x: expanded_x,
            y: expanded_y,
            width: expanded_right - expanded_x + 1,
            height: expanded_bottom - expanded_y + 1,
        }
    }

    fn intersects(self, other: &Self) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }
}

/// Greedy minimum-distance spanning connection between room centers.
fn carve_room_corridors(tiles: &mut [TileKind], width: usize, room_seed: u64, rooms: &[RoomRect]) {
    if rooms.len() < 2 {
        return;
    }

    let mut connected = vec![0_usize];
    let mut pending: Vec<usize> = (1..rooms.len()).collect();

    while !pending.is_empty() {
        let mut best: Option<(u32, usize, usize)> = None;
        for &connected_index in &connected {
            let connected_center = rooms[connected_index].center();
            for &pending_index in &pending {
                let distance = connected_center.manhattan(rooms[pending_index].center());
                let candidate = (distance, connected_index, pending_index);
                if best.is_none_or(|current| candidate < current) {
                    best = Some(candidate);
                }
            }
        }

        let Some((_, from_index, to_index)) = best else {
            break;
        };
        let horizontal_first =
            mix_seed_stream(room_seed, ((from_index as u64) << 32) | to_index as u64) & 1 == 0;
        carve_l_corridor(
            tiles,
            width,
            rooms[from_index].center(),
            rooms[to_index].center(),
            horizontal_first,
        );

        connected.push(to_index);
        pending.retain(|&index| index != to_index);
    }
}

fn carve_l_corridor(tiles: &mut [TileKind], width: usize, start: Pos, end: Pos, horizontal_first: bool) {
    if horizontal_first {
        carve_horizontal_line(tiles, width, start.y, start.x, end.x);
        carve_vertical_line(tiles, width, end.x, start.y, end.y);
    } else {
        carve_vertical_line(tiles, width, start.x, start.y, end.y);
        carve_horizontal_line(tiles, width, end.y, start.x, end.x);
    }
}

fn carve_horizontal_line(tiles: &mut [TileKind], width: usize, y: i32, left_x: i32, right_x: i32) {
    for x in left_x.min(right_x)..=left_x.max(right_x) {
        if x <= 0 || y <= 0 || (x as usize) >= width - 1 {
            continue;
        }
        tiles[y as usize * width + x as usize] = TileKind::Floor;
    }
}

fn carve_vertical_line(tiles: &mut [TileKind], width: usize, x: i32, top_y: i32, bottom_y: i32) {
    for y in top_y.min(bottom_y)..=top_y.max(bottom_y) {
        if x <= 0 || y <= 0 || (x as usize) >= width - 1 {
            continue;
        }
        tiles[y as usize * width + x as usize] = TileKind::Floor;
    }
}

/// A corridor tile sitting exactly on a room's surrounding wall ring is the
/// natural doorway; mark it as such.
fn place_doors_on_room_perimeters(
    tiles: &mut [TileKind],
    width: usize,
    height: usize,
    rooms: &[RoomRect],
) {
    for room in rooms {
        let ring = room.expanded(1);
        let bottom = ring.bottom().min(height - 1);
        let right = ring.right().min(width - 1);
        for y in ring.y..=bottom {
            for x in ring.x..=right {
                let on_border = y == ring.y || y == bottom || x == ring.x || x == right;
                if on_border && tiles[y * width + x] == TileKind::Floor {
                    tiles[y * width + x] = TileKind::Door;
                }
            }
        }
    }
}

/// Post-pass: label walkable regions and carve corridors until the entry
/// cell can reach every walkable tile. Carving only ever opens walls, so
/// the loop strictly reduces the region count and terminates.
fn connect_regions(tiles: &mut [TileKind], width: usize, height: usize) {
    let entry = Pos::new(width as i32 / 2, height as i32 - 2);
    loop {
        let labels = label_regions(tiles, width, height);
        let entry_label = labels[entry.y as usize * width + entry.x as usize];
        debug_assert!(entry_label.is_some(), "entry pocket must be walkable");

        let mut disconnected: Option<Pos> = None;
        for y in 0..height {
            for x in 0..width {
                if labels[y * width + x].is_some() && labels[y * width + x] != entry_label {
                    disconnected = Some(Pos::new(x as i32, y as i32));
                    break;
                }
            }
            if disconnected.is_some() {
                break;
            }
        }

        let Some(island) = disconnected else {
            return;
        };
        carve_l_corridor(tiles, width, island, entry, island.x < entry.x);
    }
}

fn label_regions(tiles: &[TileKind], width: usize, height: usize) -> Vec<Option<u32>> {
    let mut labels: Vec<Option<u32>> = vec![None; width * height];
    let mut next_label = 0_u32;

    for start in 0..tiles.len() {
        if labels[start].is_some() || !tiles[start].is_walkable() {
            continue;
        }
        let label = next_label;
        next_label += 1;

        let mut stack = vec![start];
        labels[start] = Some(label);
        while let Some(index) = stack.pop() {
            let x = index % width;
            let y = index / width;
            let mut push = |nx: usize, ny: usize| {
                let neighbor = ny * width + nx;
                if labels[neighbor].is_none() && tiles[neighbor].is_walkable() {
                    labels[neighbor] = Some(label);
                    stack.push(neighbor);
                }
            };
            if x > 0 {
                push(x - 1, y);
            }
            if x + 1 < width {
                push(x + 1, y);
            }
            if y > 0 {
                push(x, y - 1);
            }
            if y + 1 < height {
                push(x, y + 1);
            }
        }
    }

    labels
}
