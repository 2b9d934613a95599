//! Hallway carving between placed rooms
//!
//! A hallway is routed by the pathfinder under [`HallwayCost`], then carved
//! in three passes:
//! 1. Classify every path cell as existing floor, door or new hallway floor
//! 2. Write hallway floor and doors, sealing the walls next to each door
//! 3. Wall in every new hallway floor cell where nothing was placed yet

use tracing::debug;

use super::grid::TileGrid;
use super::rect::{Direction, Point};
use super::registry::TileRegistry;
use super::room::{RoomData, RoomId};
use super::tile::TileFlags;
use crate::config::{GeneratorConfig, HallwayCosts};
use crate::consts::MAX_SEARCH_STEPS;
use crate::error::HallError;
use crate::pathfind::{MovementCost, PathFinder};

/// Hallway cost model over a level grid
///
/// Illegal: diagonal steps and stepping onto granite or a sealed cell. Room
/// walls add two more illegal moves, since every wall cell a route crosses
/// becomes a door:
/// - stepping from one room wall straight onto another
/// - crossing a room wall anywhere but straight between room floor and the
///   outside, so corners and wall runs are never cut
///
/// Existing hallway floor is cheap to follow, room walls are expensive to
/// cut through, and turning costs extra unless the turn happens inside a
/// room or on an existing hallway.
#[derive(Debug, Clone, Copy)]
pub struct HallwayCost<'g> {
    grid: &'g TileGrid,
    costs: HallwayCosts,
}

impl<'g> HallwayCost<'g> {
    pub fn new(grid: &'g TileGrid, costs: HallwayCosts) -> Self {
        Self { grid, costs }
    }

    fn is_room_floor(&self, p: Point) -> bool {
        self.grid
            .try_get(p)
            .is_some_and(|t| t.is_room() && (t.is_floor() || t.is_doorway()))
    }
}

impl MovementCost for HallwayCost<'_> {
    fn cost(&self, from: Point, to: Point, prev: Option<Point>) -> Option<u32> {
        if !from.is_orthogonal_to(to) {
            return None;
        }

        let source = self.grid.get(from);
        let target = self.grid.get(to);
        if target.is_granite() || target.is_sealed() {
            return None;
        }

        let source_room_wall = source.is_wall() && source.is_room();
        let target_room_wall = target.is_wall() && target.is_room();
        if source_room_wall && target_room_wall {
            return None;
        }

        let in_room = self.is_room_floor(from);
        let step = to - from;
        if target_room_wall && !in_room && !self.is_room_floor(to + step) {
            return None;
        }
        if source_room_wall && !self.is_room_floor(to) && !self.is_room_floor(from - step) {
            return None;
        }

        let on_hall = target.is_hall() && target.is_floor();

        let mut cost = if on_hall {
            self.costs.reuse()
        } else if target_room_wall {
            self.costs.room_wall
        } else {
            self.costs.base
        };

        if let Some(prev) = prev {
            let turning = Direction::between(prev, from) != Direction::between(from, to);
            if turning && !in_room && !on_hall {
                cost += self.costs.turn_penalty;
            }
        }

        Some(cost)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathCell {
    Existing,
    Door,
    Hall,
}

/// What a single carve wrote into the grid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarvedHall {
    /// Full route including both room centers
    pub path: Vec<Point>,
    pub doors: Vec<Point>,
    /// Newly written hallway floor
    pub floors: Vec<Point>,
    /// Hallway walls added around the new floor
    pub walls: Vec<Point>,
}

/// Connects rooms with hallways
#[derive(Debug, Clone, Copy)]
pub struct HallGenerator<'a> {
    registry: &'a TileRegistry,
    costs: HallwayCosts,
    max_steps: usize,
}

impl<'a> HallGenerator<'a> {
    pub fn new(registry: &'a TileRegistry, costs: HallwayCosts) -> Self {
        Self {
            registry,
            costs,
            max_steps: MAX_SEARCH_STEPS,
        }
    }

    pub fn from_config(registry: &'a TileRegistry, config: &GeneratorConfig) -> Self {
        Self::new(registry, config.hallway).with_max_steps(config.max_search_steps)
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Find a hallway route without touching the grid
    pub fn route(&self, grid: &TileGrid, from: Point, to: Point) -> Vec<Point> {
        let cost = HallwayCost::new(grid, self.costs);
        PathFinder::new(grid.width(), grid.height(), cost)
            .with_max_steps(self.max_steps)
            .find_path(from, to)
    }

    /// Carve a hallway between the floor centers of two placed rooms
    ///
    /// On success both rooms record each other as connected. An unreachable
    /// pair leaves the grid untouched.
    pub fn connect(
        &self,
        grid: &mut TileGrid,
        rooms: &mut [RoomData],
        a: RoomId,
        b: RoomId,
    ) -> Result<CarvedHall, HallError> {
        let from = rooms[a.0]
            .world_floor_center()
            .ok_or(HallError::Unplaced(a.0))?;
        let to = rooms[b.0]
            .world_floor_center()
            .ok_or(HallError::Unplaced(b.0))?;

        let path = self.route(grid, from, to);
        if path.is_empty() {
            return Err(HallError::Unreachable { from, to });
        }

        let hall = self.carve(grid, path);
        rooms[a.0].connect(b);
        rooms[b.0].connect(a);

        debug!(
            from = %a,
            to = %b,
            len = hall.path.len(),
            doors = hall.doors.len(),
            "carved hallway"
        );
        Ok(hall)
    }

    /// Carve an already routed path into the grid
    pub fn carve(&self, grid: &mut TileGrid, path: Vec<Point>) -> CarvedHall {
        let cells: Vec<PathCell> = path
            .iter()
            .map(|&p| {
                let tile = grid.get(p);
                if tile.is_floor() || tile.is_doorway() {
                    PathCell::Existing
                } else if tile.is_wall() && tile.is_room() {
                    PathCell::Door
                } else {
                    PathCell::Hall
                }
            })
            .collect();

        let hall_floor = self.registry.floor().with_flags(TileFlags::IS_HALL);
        let door = self.registry.doorway().with_flags(TileFlags::IS_ROOM);
        let hall_wall = self.registry.wall().with_flags(TileFlags::IS_HALL);

        let mut carved = CarvedHall::default();
        for (&p, cell) in path.iter().zip(&cells) {
            match cell {
                PathCell::Existing => {}
                PathCell::Hall => {
                    grid.set(p, hall_floor.clone());
                    carved.floors.push(p);
                }
                // Sealed by a door written earlier in this pass
                PathCell::Door if grid.get(p).is_sealed() => {}
                PathCell::Door => {
                    grid.set(p, door.clone());
                    Self::seal_around(grid, p);
                    carved.doors.push(p);
                }
            }
        }

        for &p in &carved.floors {
            for n in p.neighbors8() {
                if grid.try_get(n).is_some_and(|t| !t.is_placed()) {
                    grid.set(n, hall_wall.clone());
                    carved.walls.push(n);
                }
            }
        }

        carved.path = path;
        carved
    }

    /// Seal the walls next to a door so no other door lands beside it
    fn seal_around(grid: &mut TileGrid, door: Point) {
        for dir in Direction::CARDINAL {
            let n = door + dir.offset();
            if grid.try_get(n).is_some_and(|t| t.is_wall() && !t.is_granite()) {
                grid.get_mut(n).seal();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::rect::Rect;
    use crate::dungeon::TileTypeId;

    /// Two 3x3 rooms side by side in a 20x9 level with a granite border
    fn two_rooms(registry: &TileRegistry) -> TileGrid {
        let mut grid = TileGrid::new(20, 9);
        for p in grid.bounds().points().collect::<Vec<_>>() {
            if grid.bounds().is_border(p) {
                grid.set(p, registry.granite());
            }
        }
        let wall = registry.wall().with_flags(TileFlags::IS_ROOM);
        let floor = registry.floor().with_flags(TileFlags::IS_ROOM);
        grid.carve_room(&Rect::new(2, 3, 3, 3), 1, &wall, &floor);
        grid.carve_room(&Rect::new(14, 3, 3, 3), 1, &wall, &floor);
        grid
    }

    fn costs() -> HallwayCosts {
        HallwayCosts::default()
    }

    #[test]
    fn test_cost_rejects_diagonal_granite_and_sealed() {
        let registry = TileRegistry::standard();
        let mut grid = two_rooms(&registry);
        grid.get_mut(Point::new(8, 4)).seal();
        let cost = HallwayCost::new(&grid, costs());

        assert_eq!(cost.cost(Point::new(7, 4), Point::new(8, 5), None), None);
        assert_eq!(cost.cost(Point::new(7, 1), Point::new(7, 0), None), None);
        assert_eq!(cost.cost(Point::new(7, 4), Point::new(8, 4), None), None);
    }

    #[test]
    fn test_cost_rejects_wall_to_wall() {
        let registry = TileRegistry::standard();
        let grid = two_rooms(&registry);
        let cost = HallwayCost::new(&grid, costs());
        assert_eq!(cost.cost(Point::new(1, 2), Point::new(2, 2), None), None);
    }

    #[test]
    fn test_cost_rejects_cutting_room_corner() {
        let registry = TileRegistry::standard();
        let grid = two_rooms(&registry);
        let cost = HallwayCost::new(&grid, costs());

        // Onto the top right corner from either outside side
        assert_eq!(cost.cost(Point::new(6, 2), Point::new(5, 2), None), None);
        assert_eq!(cost.cost(Point::new(5, 1), Point::new(5, 2), None), None);
        // Off the corner again
        assert_eq!(cost.cost(Point::new(5, 2), Point::new(6, 2), None), None);
        // Straight through the side wall stays legal both ways
        assert!(cost.cost(Point::new(6, 3), Point::new(5, 3), None).is_some());
        assert!(cost.cost(Point::new(4, 3), Point::new(5, 3), None).is_some());
        assert!(cost.cost(Point::new(5, 3), Point::new(6, 3), None).is_some());
    }

    #[test]
    fn test_cost_model() {
        let registry = TileRegistry::standard();
        let mut grid = two_rooms(&registry);
        let c = costs();
        grid.set(Point::new(9, 4), registry.floor().with_flags(TileFlags::IS_HALL));
        let cost = HallwayCost::new(&grid, c);

        // Plain stone, straight on
        assert_eq!(
            cost.cost(Point::new(7, 4), Point::new(8, 4), Some(Point::new(6, 4))),
            Some(c.base)
        );
        // Plain stone, turning
        assert_eq!(
            cost.cost(Point::new(7, 4), Point::new(7, 5), Some(Point::new(6, 4))),
            Some(c.base + c.turn_penalty)
        );
        // Room wall
        assert_eq!(
            cost.cost(Point::new(6, 4), Point::new(5, 4), None),
            Some(c.room_wall)
        );
        // Existing hallway, turning is free
        assert_eq!(
            cost.cost(Point::new(9, 5), Point::new(9, 4), Some(Point::new(8, 5))),
            Some(c.reuse())
        );
        // Turning inside a room is free
        assert_eq!(
            cost.cost(Point::new(3, 4), Point::new(3, 5), Some(Point::new(2, 4))),
            Some(c.base)
        );
    }

    #[test]
    fn test_connect_carves_doors_and_walls() {
        let registry = TileRegistry::standard();
        let mut grid = two_rooms(&registry);
        let halls = HallGenerator::new(&registry, costs());

        let path = halls.route(&grid, Point::new(3, 4), Point::new(15, 4));
        assert!(!path.is_empty());
        let hall = halls.carve(&mut grid, path);

        assert_eq!(hall.doors, vec![Point::new(5, 4), Point::new(13, 4)]);
        for x in 6..13 {
            let tile = grid.get(Point::new(x, 4));
            assert!(tile.is_floor() && tile.is_hall(), "({x}, 4) should be hallway");
            assert!(grid.get(Point::new(x, 3)).is_wall());
            assert!(grid.get(Point::new(x, 5)).is_wall());
        }
        for door in &hall.doors {
            assert_eq!(grid.get(*door).kind_id(), TileTypeId::Doorway);
            assert!(grid.get(*door + Point::new(0, -1)).is_sealed());
            assert!(grid.get(*door + Point::new(0, 1)).is_sealed());
        }
        // Room interiors untouched
        assert!(grid.get(Point::new(3, 4)).is_room());
        assert!(!grid.get(Point::new(3, 4)).is_hall());
    }

    #[test]
    fn test_diagonal_rooms_get_separated_doors() {
        let registry = TileRegistry::standard();
        let mut grid = TileGrid::new(30, 20);
        let wall = registry.wall().with_flags(TileFlags::IS_ROOM);
        let floor = registry.floor().with_flags(TileFlags::IS_ROOM);
        grid.carve_room(&Rect::new(3, 3, 4, 3), 1, &wall, &floor);
        grid.carve_room(&Rect::new(9, 8, 3, 4), 1, &wall, &floor);
        grid.carve_room(&Rect::new(20, 12, 5, 4), 1, &wall, &floor);

        let halls = HallGenerator::new(&registry, costs());
        for (from, to) in [
            (Point::new(4, 4), Point::new(22, 13)),
            (Point::new(10, 9), Point::new(4, 4)),
            (Point::new(22, 13), Point::new(10, 9)),
        ] {
            let path = halls.route(&grid, from, to);
            assert!(!path.is_empty(), "no route {from} -> {to}");
            halls.carve(&mut grid, path);
        }

        let room_floor = |p: Point| grid.try_get(p).is_some_and(|t| t.is_room() && t.is_floor());
        for (p, tile) in grid.iter() {
            if !tile.is_doorway() {
                continue;
            }
            for dir in Direction::CARDINAL {
                let n = p + dir.offset();
                assert!(
                    !grid.try_get(n).is_some_and(|t| t.is_doorway()),
                    "doors at {p} and {n}"
                );
            }
            let straight = Direction::CARDINAL
                .iter()
                .any(|dir| room_floor(p + dir.offset()) && !room_floor(p - dir.offset()));
            assert!(straight, "door at {p} is not between room floor and the outside");
        }
    }

    #[test]
    fn test_carve_skips_door_sealed_by_earlier_door() {
        let registry = TileRegistry::standard();
        let mut grid = two_rooms(&registry);
        let halls = HallGenerator::new(&registry, costs());

        // Two wall cells of the same side, one after the other
        let path = vec![
            Point::new(6, 3),
            Point::new(5, 3),
            Point::new(5, 4),
            Point::new(6, 4),
        ];
        let hall = halls.carve(&mut grid, path);

        assert_eq!(hall.doors, vec![Point::new(5, 3)]);
        let skipped = grid.get(Point::new(5, 4));
        assert!(skipped.is_wall() && skipped.is_sealed());
        assert_eq!(grid.get(Point::new(5, 3)).kind_id(), TileTypeId::Doorway);
    }

    #[test]
    fn test_wall_off_keeps_existing_content() {
        let registry = TileRegistry::standard();
        let mut grid = two_rooms(&registry);
        let halls = HallGenerator::new(&registry, costs());
        let path = halls.route(&grid, Point::new(3, 4), Point::new(15, 4));
        let hall = halls.carve(&mut grid, path);

        for w in &hall.walls {
            assert!(grid.get(*w).is_hall());
        }
        // The room wall next to the first hallway cell keeps its room flag
        assert!(grid.get(Point::new(5, 3)).is_room());
    }

    #[test]
    fn test_second_hallway_reuses_first() {
        let registry = TileRegistry::standard();
        let mut grid = two_rooms(&registry);
        let halls = HallGenerator::new(&registry, costs());

        let first = halls.route(&grid, Point::new(3, 4), Point::new(15, 4));
        halls.carve(&mut grid, first.clone());
        let second = halls.route(&grid, Point::new(3, 4), Point::new(15, 4));

        assert_eq!(first, second);
        let again = halls.carve(&mut grid, second);
        assert!(again.doors.is_empty());
        assert!(again.floors.is_empty());
    }

    #[test]
    fn test_connect_records_rooms() {
        use crate::dungeon::room::{RoomGenerator, RoomSize};
        use crate::rng::Random;

        let registry = TileRegistry::standard();
        let rooms_gen = RoomGenerator::new(&registry);
        let mut rng = Random::new(1);
        let mut grid = TileGrid::new(60, 30);

        let mut rooms = vec![
            rooms_gen.generate(&mut rng, RoomSize::Small),
            rooms_gen.generate(&mut rng, RoomSize::Small),
        ];
        for (room, offset) in rooms.iter_mut().zip([Point::new(2, 2), Point::new(40, 15)]) {
            let tiles = room.place(offset).unwrap();
            grid.insert(offset, &tiles);
        }

        let halls = HallGenerator::new(&registry, costs());
        let hall = halls
            .connect(&mut grid, &mut rooms, RoomId(0), RoomId(1))
            .unwrap();

        assert_eq!(hall.path.first().copied(), rooms[0].world_floor_center());
        assert_eq!(hall.path.last().copied(), rooms[1].world_floor_center());
        assert_eq!(rooms[0].connected_rooms(), &[RoomId(1)]);
        assert_eq!(rooms[1].connected_rooms(), &[RoomId(0)]);
    }

    #[test]
    fn test_unreachable_leaves_grid_untouched() {
        use crate::dungeon::room::{RoomGenerator, RoomSize};
        use crate::rng::Random;

        let registry = TileRegistry::standard();
        let mut rng = Random::new(2);
        let mut grid = TileGrid::new(40, 20);
        let mut rooms = vec![
            RoomGenerator::new(&registry).generate(&mut rng, RoomSize::Small),
            RoomGenerator::new(&registry).generate(&mut rng, RoomSize::Small),
        ];
        for (room, offset) in rooms.iter_mut().zip([Point::new(1, 1), Point::new(28, 8)]) {
            let tiles = room.place(offset).unwrap();
            grid.insert(offset, &tiles);
        }
        // Granite wall splitting the level in two
        for y in 0..20 {
            grid.set(Point::new(20, y), registry.granite());
        }

        let before = grid.clone();
        let halls = HallGenerator::new(&registry, costs());
        let err = halls
            .connect(&mut grid, &mut rooms, RoomId(0), RoomId(1))
            .unwrap_err();

        assert!(matches!(err, HallError::Unreachable { .. }));
        assert_eq!(grid, before);
        assert!(rooms[0].connected_rooms().is_empty());
    }

    #[test]
    fn test_unplaced_room() {
        use crate::dungeon::room::{RoomGenerator, RoomSize};
        use crate::rng::Random;

        let registry = TileRegistry::standard();
        let mut rng = Random::new(2);
        let mut grid = TileGrid::new(40, 20);
        let mut rooms = vec![
            RoomGenerator::new(&registry).generate(&mut rng, RoomSize::Small),
            RoomGenerator::new(&registry).generate(&mut rng, RoomSize::Small),
        ];

        let halls = HallGenerator::new(&registry, costs());
        assert_eq!(
            halls.connect(&mut grid, &mut rooms, RoomId(0), RoomId(1)),
            Err(HallError::Unplaced(0))
        );
    }
}
