//! Map panel cache.
//!
//! Room positions, door locks, hazards and power state keyed by
//! server-assigned ids. A `map` frame replaces everything; the narrower
//! status frames patch single entries. The grid is rebuilt from the cache
//! for the visible window only, so far-apart coordinates cost nothing.

use std::{collections::BTreeMap, ops::RangeInclusive};

use mudlink_proto::payloads::MapRoom;

/// Position and name of one room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomPosition {
    /// Grid column.
    pub x: i32,
    /// Grid row.
    pub y: i32,
    /// Display name.
    pub name: String,
}

/// One occupied grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapCell {
    /// Room in this cell.
    pub room_id: String,
    /// First character of the room name.
    pub initial: char,
    /// Door to this room is locked.
    pub locked: bool,
    /// Room has active hazards.
    pub hazard: bool,
    /// Room is reported unpowered.
    pub unpowered: bool,
    /// Room is the current selection.
    pub selected: bool,
}

/// Rendered map: rows top to bottom, `None` for empty cells.
pub type MapGrid = Vec<Vec<Option<MapCell>>>;

/// Ephemeral map caches.
#[derive(Debug, Clone, Default)]
pub struct MapState {
    rooms: BTreeMap<String, RoomPosition>,
    /// Room occupying each position. The smallest id wins a shared cell.
    positions: BTreeMap<(i32, i32), String>,
    doors: BTreeMap<String, bool>,
    hazards: BTreeMap<String, Vec<String>>,
    power: BTreeMap<String, bool>,
    selected: Option<String>,
}

impl MapState {
    /// Replace every cache from an authoritative snapshot.
    pub fn replace(
        &mut self,
        rooms: Vec<MapRoom>,
        doors: BTreeMap<String, bool>,
        hazards: BTreeMap<String, Vec<String>>,
        power: BTreeMap<String, bool>,
    ) {
        self.rooms = rooms
            .into_iter()
            .map(|r| (r.id, RoomPosition { x: r.x, y: r.y, name: r.name }))
            .collect();
        self.positions.clear();
        for (id, pos) in &self.rooms {
            self.positions.entry((pos.x, pos.y)).or_insert_with(|| id.clone());
        }
        self.doors = doors;
        self.hazards = hazards;
        self.power = power;
    }

    /// Record a door lock change.
    pub fn set_door(&mut self, room_id: String, locked: bool) {
        self.doors.insert(room_id, locked);
    }

    /// Record the hazards now present in a room.
    pub fn set_hazards(&mut self, room_id: String, hazards: Vec<String>) {
        self.hazards.insert(room_id, hazards);
    }

    /// Record a power grid change. An unknown state clears the indicator.
    pub fn set_power(&mut self, grid_id: String, is_powered: Option<bool>) {
        match is_powered {
            Some(powered) => {
                self.power.insert(grid_id, powered);
            },
            None => {
                self.power.remove(&grid_id);
            },
        }
    }

    /// True when no room positions are known.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Known rooms keyed by id.
    pub fn rooms(&self) -> &BTreeMap<String, RoomPosition> {
        &self.rooms
    }

    /// Currently selected room.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Select a room. Returns its description, or `None` for unknown ids.
    pub fn select(&mut self, room_id: &str) -> Option<String> {
        let description = self.describe(room_id)?;
        self.selected = Some(room_id.to_owned());
        Some(description)
    }

    /// Move the selection to the next or previous room in id order.
    pub fn cycle(&mut self, forward: bool) -> Option<String> {
        let ids: Vec<&String> = self.rooms.keys().collect();
        let current = self.selected.as_ref().and_then(|s| ids.iter().position(|id| *id == s));
        let len = ids.len();
        if len == 0 {
            return None;
        }

        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        let id = ids.get(next).map(|id| (*id).clone())?;
        self.select(&id)
    }

    /// Room name followed by hazard, lock and power notes.
    pub fn describe(&self, room_id: &str) -> Option<String> {
        let room = self.rooms.get(room_id)?;
        let mut text = room.name.clone();
        if let Some(hazards) = self.hazards.get(room_id).filter(|h| !h.is_empty()) {
            text.push_str(" - Hazards: ");
            text.push_str(&hazards.join(", "));
        }
        if self.is_locked(room_id) {
            text.push_str(" [Door Locked]");
        }
        if self.is_unpowered(room_id) {
            text.push_str(" [No Power]");
        }
        Some(text)
    }

    /// Door lock indicator for a room.
    pub fn is_locked(&self, room_id: &str) -> bool {
        self.doors.get(room_id).copied().unwrap_or(false)
    }

    /// Hazard indicator for a room.
    pub fn has_hazard(&self, room_id: &str) -> bool {
        self.hazards.get(room_id).is_some_and(|h| !h.is_empty())
    }

    /// No-power indicator. Only an explicit `false` counts as unpowered.
    pub fn is_unpowered(&self, room_id: &str) -> bool {
        self.power.get(room_id) == Some(&false)
    }

    /// Build at most `cols` x `rows` cells of the grid.
    ///
    /// A map that fits is shown from its top-left corner. A larger one is
    /// centred on the selected room, clamped to the map edges.
    pub fn grid_window(&self, cols: usize, rows: usize) -> MapGrid {
        let Some((min_x, max_x, min_y, max_y)) = self.bounds() else {
            return Vec::new();
        };
        let focus = self.selected.as_ref().and_then(|id| self.rooms.get(id));
        let (Some(xs), Some(ys)) = (
            window(min_x, max_x, cols, focus.map(|p| p.x)),
            window(min_y, max_y, rows, focus.map(|p| p.y)),
        ) else {
            return Vec::new();
        };

        ys.map(|y| {
            xs.clone()
                .map(|x| {
                    self.positions
                        .get(&(x, y))
                        .and_then(|id| self.rooms.get_key_value(id))
                        .map(|(id, pos)| self.cell(id, pos))
                })
                .collect()
        })
        .collect()
    }

    fn cell(&self, room_id: &str, pos: &RoomPosition) -> MapCell {
        MapCell {
            room_id: room_id.to_owned(),
            initial: pos.name.chars().next().unwrap_or('?'),
            locked: self.is_locked(room_id),
            hazard: self.has_hazard(room_id),
            unpowered: self.is_unpowered(room_id),
            selected: self.selected.as_deref() == Some(room_id),
        }
    }

    fn bounds(&self) -> Option<(i32, i32, i32, i32)> {
        let mut positions = self.rooms.values();
        let first = positions.next()?;
        Some(positions.fold((first.x, first.x, first.y, first.y), |(lx, hx, ly, hy), p| {
            (lx.min(p.x), hx.max(p.x), ly.min(p.y), hy.max(p.y))
        }))
    }
}

/// Coordinates `len` wide within `min..=max`, around `focus` when given.
fn window(min: i32, max: i32, len: usize, focus: Option<i32>) -> Option<RangeInclusive<i32>> {
    let span = i64::from(max) - i64::from(min) + 1;
    let len = i64::try_from(len).unwrap_or(i64::MAX).min(span);
    if len == 0 {
        return None;
    }

    let start = match focus {
        Some(f) => (i64::from(f) - len / 2).clamp(i64::from(min), i64::from(max) - len + 1),
        None => i64::from(min),
    };
    let end = start + len - 1;
    Some(i32::try_from(start).ok()?..=i32::try_from(end).ok()?)
}
