//! The script-facing level builder (sp_lev.c command handlers)
//!
//! A [`LevelBuilder`] is the whole state of a running script: the
//! generation context it writes into, the script's name for error reports
//! and the origin of the last placed map. Script coordinates are relative
//! to that origin; before any map is placed they are absolute.

use nh_rng::GameRng;
use tracing::debug;

use super::map::MapTemplate;
use crate::consts::{COLNO, ROWNO};
use crate::context::GenerationContext;
use crate::dungeon::corridor::{add_door, finddpos, make_corridors};
use crate::dungeon::features::{find_in_room, mktrap, okay_roompos, random_object_class};
use crate::dungeon::maze::{Heading, init_grid, maze_floor, mazewalk};
use crate::dungeon::placement::{RoomRequest, create_room, sort_rooms, topologize};
use crate::dungeon::special_room::{fill_zoo, set_room_flag, stock_shop};
use crate::dungeon::wall::{classify, wallify};
use crate::dungeon::{
    CellFlags, CellType, Door, DoorState, Engraving, EngravingType, FeatureKind, Level, LevelFlags,
    MonsterPlacement, ObjectPlacement, Rect, Room, RoomType, TrapType, WallSide,
};
use crate::error::ScriptError;
use crate::{X_MAZE_MAX, Y_MAZE_MAX};

/// A rectangular region to turn into a room record (`des.region`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionSpec {
    /// Inclusive corners in script coordinates
    pub area: (i32, i32, i32, i32),
    pub lit: bool,
    pub rtype: RoomType,
    /// Stock the room according to its type
    pub filled: bool,
    pub parent: Option<usize>,
}

impl RegionSpec {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            area: (x1, y1, x2, y2),
            lit: false,
            rtype: RoomType::Ordinary,
            filled: false,
            parent: None,
        }
    }

    pub fn lit(self) -> Self {
        Self { lit: true, ..self }
    }

    pub fn kind(self, rtype: RoomType) -> Self {
        Self { rtype, ..self }
    }

    pub fn filled(self) -> Self {
        Self { filled: true, ..self }
    }

    pub fn inside(self, parent: usize) -> Self {
        Self {
            parent: Some(parent),
            ..self
        }
    }
}

pub struct LevelBuilder<'a> {
    ctx: &'a mut GenerationContext,
    script: &'static str,
    origin: (i32, i32),
    map_area: Option<Rect>,
}

impl<'a> LevelBuilder<'a> {
    pub fn new(ctx: &'a mut GenerationContext, script: &'static str) -> Self {
        Self {
            ctx,
            script,
            origin: (0, 0),
            map_area: None,
        }
    }

    pub fn script(&self) -> &'static str {
        self.script
    }

    pub fn rng(&mut self) -> &mut GameRng {
        &mut self.ctx.rng
    }

    pub fn level(&self) -> &Level {
        &self.ctx.level
    }

    pub fn flags(&mut self) -> &mut LevelFlags {
        &mut self.ctx.level.flags
    }

    pub fn depth(&self) -> i32 {
        self.ctx.depth()
    }

    /// Script coordinates to map coordinates.
    pub fn abs(&self, x: i32, y: i32) -> Result<(usize, usize), ScriptError> {
        let (ax, ay) = (x + self.origin.0, y + self.origin.1);
        if !Level::isok(ax, ay) {
            return Err(ScriptError::OutOfBounds {
                script: self.script.to_string(),
                x,
                y,
            });
        }
        Ok((ax as usize, ay as usize))
    }

    fn abs_rect(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> Result<Rect, ScriptError> {
        let (lx, ly) = self.abs(x1.min(x2), y1.min(y2))?;
        let (hx, hy) = self.abs(x1.max(x2), y1.max(y2))?;
        Ok(Rect::new(lx, ly, hx, hy))
    }

    /// Sequencer-driven Fisher-Yates over script data.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        self.ctx.rng.shuffle(items);
    }

    /// Set every square of the level to `typ` (`level_init` solidfill).
    pub fn fill(&mut self, typ: CellType) {
        for (x, y) in Rect::map().cells() {
            self.ctx.level.set_typ(x, y, typ);
        }
    }

    /// Lay the unwalked maze grid over the whole level (`level_init`
    /// mazegrid).
    pub fn maze_grid(&mut self) {
        let level = &mut self.ctx.level;
        level.flags.is_maze = true;
        level.flags.corridor_maze = false;
        init_grid(level, X_MAZE_MAX, Y_MAZE_MAX);
    }

    /// Stamp `map` centred on the level and make its top-left corner the
    /// origin for later commands.
    pub fn map(&mut self, map: &MapTemplate) -> Result<(), ScriptError> {
        let x0 = COLNO.saturating_sub(map.width()) / 2;
        let y0 = ROWNO.saturating_sub(map.height()) / 2;
        if x0 == 0 || x0 + map.width() > COLNO || y0 + map.height() > ROWNO {
            return Err(ScriptError::MalformedTemplate {
                script: self.script.to_string(),
                reason: format!("{}x{} map does not fit the level", map.width(), map.height()),
            });
        }
        self.origin = (x0 as i32, y0 as i32);
        self.map_area = Some(Rect::new(x0, y0, x0 + map.width() - 1, y0 + map.height() - 1));

        for (mx, my, typ) in map.cells() {
            let (x, y) = (x0 + mx, y0 + my);
            self.ctx.level.cell_mut(x, y).lit = false;
            match typ {
                CellType::Fountain => self.ctx.level.add_feature(x, y, FeatureKind::Fountain),
                CellType::Sink => self.ctx.level.add_feature(x, y, FeatureKind::Sink),
                CellType::Throne => self.ctx.level.add_feature(x, y, FeatureKind::Throne),
                CellType::Door => {
                    self.ctx.level.set_typ(x, y, typ);
                    record_door(&mut self.ctx.level, x, y, DoorState::CLOSED);
                }
                CellType::SecretDoor => {
                    self.ctx.level.set_typ(x, y, typ);
                    record_door(&mut self.ctx.level, x, y, DoorState::CLOSED | DoorState::SECRET);
                }
                _ => self.ctx.level.set_typ(x, y, typ),
            }
        }
        debug!(script = self.script, x0, y0, "map stamped");
        Ok(())
    }

    /// Turn an already drawn area into a room record. Subregions name their
    /// parent so they may overlap it.
    pub fn region(&mut self, spec: RegionSpec) -> Result<usize, ScriptError> {
        let (x1, y1, x2, y2) = spec.area;
        let area = self.abs_rect(x1, y1, x2, y2)?;
        if area.lx < 1 || area.ly < 1 || area.hx > COLNO - 2 || area.hy > ROWNO - 2 {
            return Err(ScriptError::OutOfBounds {
                script: self.script.to_string(),
                x: x1,
                y: y1,
            });
        }

        let mut room = Room::new(area, spec.lit);
        room.rtype = spec.rtype;
        room.parent = spec.parent;
        room.needjoining = false;
        if spec.lit {
            for (x, y) in room.bounds().cells() {
                self.ctx.level.cell_mut(x, y).lit = true;
            }
        }
        let idx = self.ctx.level.rooms.len();
        self.ctx.level.rooms.push(room);
        if let Some(p) = spec.parent {
            self.ctx.level.rooms[p].subrooms.push(idx);
        }
        set_room_flag(&mut self.ctx.level, spec.rtype);

        if spec.filled {
            if spec.rtype.monsters_sleep() {
                fill_zoo(self.ctx, idx);
            } else if spec.rtype.is_shop() {
                stock_shop(self.ctx, idx);
            }
        }
        Ok(idx)
    }

    /// Place a walled room; a random one when `req` leaves fields unset.
    pub fn room(&mut self, req: RoomRequest) -> Option<usize> {
        let room = create_room(self.ctx, req);
        if room.is_none() {
            debug!(script = self.script, "room did not fit");
        }
        room
    }

    /// A subroom of `parent` at `(x, y)` relative to the parent's floor.
    pub fn subroom(&mut self, parent: usize, x: usize, y: usize, size: (usize, usize), rtype: RoomType) -> Option<usize> {
        let p = &self.ctx.level.rooms[parent];
        let req = RoomRequest {
            size: Some(size),
            pos: Some((p.lx + x, p.ly + y)),
            rtype,
            lit: Some(p.lit),
            parent: Some(parent),
        };
        self.room(req)
    }

    /// Set or update the door at `(x, y)`. A secret door square stays
    /// secret.
    pub fn door(&mut self, x: i32, y: i32, state: DoorState) -> Result<(), ScriptError> {
        let (x, y) = self.abs(x, y)?;
        let level = &mut self.ctx.level;
        let mut state = state;
        if level.typ(x, y) == CellType::SecretDoor || state.contains(DoorState::SECRET) {
            level.set_typ(x, y, CellType::SecretDoor);
            state |= DoorState::SECRET;
            if !state.intersects(DoorState::CLOSED | DoorState::LOCKED) {
                state |= DoorState::CLOSED;
            }
        } else {
            level.set_typ(x, y, CellType::Door);
        }
        record_door(level, x, y, state);
        Ok(())
    }

    /// A doorway in a random wall of `room` (`des.door` with wall "all").
    pub fn door_in_random_wall(&mut self, room: usize, state: DoorState) {
        let r = &self.ctx.level.rooms[room];
        let (lx, ly, hx, hy) = (r.lx, r.ly, r.hx, r.hy);
        let (x1, y1, x2, y2) = match self.ctx.rng.rn2(4) {
            0 => (lx, ly - 1, hx, ly - 1),
            1 => (lx, hy + 1, hx, hy + 1),
            2 => (hx + 1, ly, hx + 1, hy),
            _ => (lx - 1, ly, lx - 1, hy),
        };
        let (x, y) = finddpos(self.ctx, x1, y1, x2, y2);
        self.ctx.level.set_typ(x, y, CellType::Door);
        add_door(self.ctx, x, y, room, state);
    }

    pub fn object(&mut self, x: i32, y: i32, class: char, name: Option<&str>) -> Result<&mut ObjectPlacement, ScriptError> {
        let (x, y) = self.abs(x, y)?;
        let object = match name {
            Some(name) => ObjectPlacement::named(x, y, class, name),
            None => ObjectPlacement::new(x, y, class),
        };
        let objects = &mut self.ctx.level.objects;
        objects.push(object);
        let idx = objects.len() - 1;
        Ok(&mut objects[idx])
    }

    /// A random object somewhere on the floor of `room`.
    pub fn object_in_room(&mut self, room: usize) -> Option<(usize, usize)> {
        let (x, y) = find_in_room(self.ctx, room, "object", floor_square)?;
        let class = random_object_class(self.ctx);
        self.ctx.level.objects.push(ObjectPlacement::new(x, y, class));
        Some((x, y))
    }

    pub fn monster(&mut self, x: i32, y: i32, class: Option<char>, name: Option<&str>) -> Result<&mut MonsterPlacement, ScriptError> {
        let (x, y) = self.abs(x, y)?;
        let monster = MonsterPlacement {
            class,
            name: name.map(str::to_string),
            ..MonsterPlacement::random(x, y)
        };
        let monsters = &mut self.ctx.level.monsters;
        monsters.push(monster);
        let idx = monsters.len() - 1;
        Ok(&mut monsters[idx])
    }

    /// A random monster on a free floor square of `room`.
    pub fn monster_in_room(&mut self, room: usize) -> Option<(usize, usize)> {
        let (x, y) = find_in_room(self.ctx, room, "monster", |level, x, y| {
            floor_square(level, x, y) && !level.monsters.iter().any(|m| m.x == x && m.y == y)
        })?;
        self.ctx.level.monsters.push(MonsterPlacement::random(x, y));
        Some((x, y))
    }

    pub fn trap(&mut self, x: i32, y: i32, kind: TrapType) -> Result<(), ScriptError> {
        let (x, y) = self.abs(x, y)?;
        self.ctx.level.add_trap(x, y, kind);
        Ok(())
    }

    /// A trap of a depth-appropriate random kind in `room`.
    pub fn trap_in_room(&mut self, room: usize) -> Option<(usize, usize)> {
        mktrap(self.ctx, None, Some(room))
    }

    pub fn feature(&mut self, x: i32, y: i32, kind: FeatureKind) -> Result<(), ScriptError> {
        let (x, y) = self.abs(x, y)?;
        self.ctx.level.add_feature(x, y, kind);
        Ok(())
    }

    pub fn engraving(&mut self, x: i32, y: i32, kind: EngravingType, text: &str) -> Result<(), ScriptError> {
        let (x, y) = self.abs(x, y)?;
        self.ctx.level.engravings.push(Engraving {
            x,
            y,
            text: text.to_string(),
            kind,
        });
        Ok(())
    }

    /// A drawbridge spanning the water at `(x, y)`, its portcullis on the
    /// `dir` side.
    pub fn drawbridge(&mut self, x: i32, y: i32, dir: WallSide, open: bool) -> Result<(), ScriptError> {
        let (sx, sy) = self.abs(x, y)?;
        let (dx, dy) = dir.outward();
        let (wx, wy) = self.abs(x + dx, y + dy)?;
        let level = &mut self.ctx.level;
        if open {
            level.set_typ(sx, sy, CellType::DrawbridgeDown);
            level.set_typ(wx, wy, CellType::Door);
            record_door(level, wx, wy, DoorState::NO_DOOR);
        } else {
            level.set_typ(sx, sy, CellType::DrawbridgeUp);
            level.set_typ(wx, wy, CellType::DBWall);
        }
        Ok(())
    }

    pub fn mazewalk(&mut self, x: i32, y: i32, heading: Heading) -> Result<(), ScriptError> {
        let (x, y) = self.abs(x, y)?;
        mazewalk(self.ctx, x, y, heading);
        Ok(())
    }

    /// Wrap floor in the map area (or the whole level) with walls.
    pub fn wallify(&mut self) {
        let area = self.map_area.unwrap_or(Rect::new(1, 0, COLNO - 1, ROWNO - 1));
        wallify(&mut self.ctx.level, area);
    }

    pub fn non_diggable(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> Result<(), ScriptError> {
        let area = self.abs_rect(x1, y1, x2, y2)?;
        for (x, y) in area.cells() {
            self.ctx.level.cell_mut(x, y).flags |= CellFlags::NON_DIGGABLE;
        }
        Ok(())
    }

    pub fn stair(&mut self, x: i32, y: i32, up: bool) -> Result<(), ScriptError> {
        let (x, y) = self.abs(x, y)?;
        self.ctx.level.set_stairs(x, y, up);
        Ok(())
    }

    pub fn stair_in_room(&mut self, room: usize, up: bool) -> Option<(usize, usize)> {
        let what = if up { "up stairs" } else { "down stairs" };
        let (x, y) = find_in_room(self.ctx, room, what, okay_roompos)?;
        self.ctx.level.set_stairs(x, y, up);
        Some((x, y))
    }

    /// Stairs somewhere on open floor of the absolute `area`, outside
    /// `exclude` (script coordinates): 200 random tries, then a scan.
    pub fn stair_in_area(&mut self, area: Rect, exclude: Option<(i32, i32, i32, i32)>, up: bool) -> Result<Option<(usize, usize)>, ScriptError> {
        let exclude = match exclude {
            Some((x1, y1, x2, y2)) => Some(self.abs_rect(x1, y1, x2, y2)?),
            None => None,
        };
        let floor = maze_floor(&self.ctx.level);
        let good = |level: &Level, x: usize, y: usize| {
            let typ = level.typ(x, y);
            !exclude.is_some_and(|r| r.contains(x, y))
                && (typ == floor || typ == CellType::Room)
                && !level.occupied(x, y)
        };
        let mut found = None;
        for _ in 0..200 {
            let x = self.ctx.rng.rn1(area.width() as i32, area.lx as i32) as usize;
            let y = self.ctx.rng.rn1(area.height() as i32, area.ly as i32) as usize;
            if Level::isok(x as i32, y as i32) && good(&self.ctx.level, x, y) {
                found = Some((x, y));
                break;
            }
        }
        if found.is_none() {
            found = area
                .cells()
                .find(|&(x, y)| Level::isok(x as i32, y as i32) && good(&self.ctx.level, x, y));
        }
        match found {
            Some((x, y)) => self.ctx.level.set_stairs(x, y, up),
            None => debug!(script = self.script, up, "no square for stairs"),
        }
        Ok(found)
    }

    /// Join the top-level rooms with corridors, left to right.
    pub fn random_corridors(&mut self) {
        sort_rooms(self.ctx);
        topologize(self.ctx);
        make_corridors(self.ctx);
    }

    /// Close out the script: attach doors to the rooms whose walls hold
    /// them, classify walls and record room ownership.
    pub fn finish(self) {
        link_doors(&mut self.ctx.level);
        if !self.ctx.level.flags.corridor_maze {
            classify(&mut self.ctx.level, Rect::map());
        }
        topologize(self.ctx);
        debug!(
            script = self.script,
            rooms = self.ctx.level.rooms.len(),
            doors = self.ctx.level.doors.len(),
            "script finished"
        );
    }
}

fn floor_square(level: &Level, x: usize, y: usize) -> bool {
    level.typ(x, y) == CellType::Room
}

/// Which wall a free-standing door sits in, judged from the grid.
fn grid_side(level: &Level, x: usize, y: usize) -> WallSide {
    let (x, y) = (x as i32, y as i32);
    let open = |dx: i32, dy: i32| {
        let typ = level.typ_at(x + dx, y + dy);
        typ.is_passable() && !typ.is_door()
    };
    let horizontal = level.typ_at(x - 1, y).is_wall_like() || level.typ_at(x + 1, y).is_wall_like();
    match (horizontal, open(0, 1), open(1, 0)) {
        (true, true, _) => WallSide::Top,
        (true, false, _) => WallSide::Bottom,
        (false, _, true) => WallSide::Left,
        (false, _, false) => WallSide::Right,
    }
}

/// Create or update the door record at `(x, y)`.
fn record_door(level: &mut Level, x: usize, y: usize, state: DoorState) {
    level.cell_mut(x, y).door = state;
    match level.door_at(x, y) {
        Some(idx) => level.doors[idx].state = state,
        None => {
            let side = grid_side(level, x, y);
            level.doors.push(Door {
                x,
                y,
                state,
                side,
                room: None,
            });
        }
    }
}

/// Give every unowned door to the innermost room whose wall it sits in.
fn link_doors(level: &mut Level) {
    for idx in 0..level.doors.len() {
        let door = level.doors[idx];
        if door.room.is_some() {
            continue;
        }
        let owner = (0..level.rooms.len())
            .rev()
            .find_map(|r| level.rooms[r].wall_side(door.x, door.y).map(|side| (r, side)));
        if let Some((r, side)) = owner {
            level.doors[idx].room = Some(r);
            level.doors[idx].side = side;
            level.rooms[r].doors.push(idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::test_context_at;

    const HUT: &str = "
-----
|...|
|...+
|...|
-----
";

    #[test]
    fn test_map_sets_origin_and_doors() {
        let mut ctx = test_context_at(1, 5);
        let mut b = LevelBuilder::new(&mut ctx, "hut");
        let map = MapTemplate::parse("hut", HUT).unwrap();
        b.map(&map).unwrap();
        assert_eq!(b.abs(0, 0).unwrap(), (37, 8));
        let room = b.region(RegionSpec::new(1, 1, 3, 3).lit()).unwrap();
        b.door(4, 2, DoorState::LOCKED).unwrap();
        b.finish();
        let level = &ctx.level;
        assert_eq!(level.typ(41, 10), CellType::Door);
        assert_eq!(level.doors.len(), 1);
        assert_eq!(level.doors[0].state, DoorState::LOCKED);
        assert_eq!(level.doors[0].room, Some(room));
        assert_eq!(level.doors[0].side, WallSide::Right);
        assert_eq!(level.typ(37, 8), CellType::TLCorner);
        assert!(level.cell(39, 10).lit);
        assert_eq!(level.cell(39, 10).roomno, Some(room as u8));
    }

    #[test]
    fn test_out_of_bounds_is_an_error() {
        let mut ctx = test_context_at(1, 5);
        let mut b = LevelBuilder::new(&mut ctx, "probe");
        let err = b.object(90, 3, '*', None).unwrap_err();
        assert_eq!(
            err,
            ScriptError::OutOfBounds {
                script: "probe".to_string(),
                x: 90,
                y: 3
            }
        );
        assert!(b.trap(0, 3, TrapType::Pit).is_err());
    }

    #[test]
    fn test_secret_door_stays_secret() {
        let mut ctx = test_context_at(1, 5);
        let mut b = LevelBuilder::new(&mut ctx, "s");
        b.map(&MapTemplate::parse("s", "|.S.|").unwrap()).unwrap();
        b.door(2, 0, DoorState::LOCKED).unwrap();
        let (x, y) = b.abs(2, 0).unwrap();
        let level = b.level();
        assert_eq!(level.typ(x, y), CellType::SecretDoor);
        assert_eq!(level.doors[0].state, DoorState::LOCKED | DoorState::SECRET);
    }

    #[test]
    fn test_closed_drawbridge() {
        let mut ctx = test_context_at(1, 5);
        let mut b = LevelBuilder::new(&mut ctx, "db");
        b.map(&MapTemplate::parse("db", "}|.").unwrap()).unwrap();
        b.drawbridge(0, 0, WallSide::Right, false).unwrap();
        let (x, y) = b.abs(0, 0).unwrap();
        assert_eq!(b.level().typ(x, y), CellType::DrawbridgeUp);
        assert_eq!(b.level().typ(x + 1, y), CellType::DBWall);
    }

    #[test]
    fn test_wallify_encloses_floor() {
        let mut ctx = test_context_at(1, 5);
        let mut b = LevelBuilder::new(&mut ctx, "w");
        b.map(&MapTemplate::parse("w", "     \n ... \n     ").unwrap()).unwrap();
        b.wallify();
        let (x, y) = b.abs(0, 0).unwrap();
        let level = b.level();
        assert_eq!(level.typ(x + 2, y), CellType::HWall);
        assert_eq!(level.typ(x, y + 1), CellType::VWall);
        assert_eq!(level.typ(x + 2, y + 1), CellType::Room);
    }

    #[test]
    fn test_stair_in_area_skips_exclusion() {
        let mut ctx = test_context_at(4, 5);
        let mut b = LevelBuilder::new(&mut ctx, "st");
        b.fill(CellType::Room);
        let got = b
            .stair_in_area(Rect::new(1, 0, 10, 20), Some((1, 0, 9, 20)), true)
            .unwrap()
            .unwrap();
        assert_eq!(got.0, 10);
        assert!(ctx.level.upstair.is_some());
    }
}
