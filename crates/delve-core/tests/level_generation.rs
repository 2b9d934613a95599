use delve_core::dungeon::{Direction, TileFlags, TileTypeId};
use delve_core::{GeneratorConfig, Level, LevelGenerator, Random, TileRegistry};
use proptest::prelude::*;

fn generate(config: GeneratorConfig, seed: u64) -> Level {
    LevelGenerator::new(config)
        .unwrap()
        .generate(&mut Random::new(seed))
}

fn check_level(level: &Level) {
    let bounds = level.grid().bounds();
    let interior = bounds.inflate(-1);

    for (p, tile) in level.grid().iter() {
        assert_eq!(tile.is_granite(), bounds.is_border(p), "granite at {p}");

        // New hallway floor is always fully walled in
        if tile.is_hall() && tile.is_floor() {
            for n in p.neighbors8() {
                assert!(level.tile_at(n).is_placed(), "hallway at {p} open to {n}");
            }
        }

        if tile.is_doorway() {
            let grid = level.grid();
            let mut room_side = false;
            for dir in Direction::CARDINAL {
                let n = p + dir.offset();
                let Some(next) = grid.try_get(n) else {
                    continue;
                };
                assert!(!next.is_doorway(), "doors side by side at {p} and {n}");
                room_side |= next.is_room() && next.is_floor();
            }
            assert!(room_side, "door at {p} has no room floor beside it");
        }
    }

    let rooms = level.rooms();
    for (i, room) in rooms.iter().enumerate() {
        let area = room.world_total_area().unwrap();
        assert!(interior.contains(&area), "room {i} overlaps the border");
        assert!(room.tiles().is_none());
        for other in &rooms[i + 1..] {
            assert!(!area.intersects(&other.world_total_area().unwrap()));
        }
    }

    match level.stairs_up() {
        Some(stairs) => {
            assert_eq!(level.tile_at(stairs).kind_id(), TileTypeId::StairsUp);
            assert_eq!(Some(stairs), rooms[0].world_floor_center());
        }
        None => assert!(rooms.is_empty()),
    }
}

#[test]
fn test_same_seed_same_level() {
    let a = generate(GeneratorConfig::default(), 1234);
    let b = generate(GeneratorConfig::default(), 1234);
    assert_eq!(a.grid(), b.grid());
    assert_eq!(a.dump(), b.dump());
    assert_eq!(a.stats(), b.stats());
}

#[test]
fn test_different_seeds_differ() {
    let a = generate(GeneratorConfig::default(), 1);
    let b = generate(GeneratorConfig::default(), 2);
    assert_ne!(a.dump(), b.dump());
}

#[test]
fn test_default_levels_hold_invariants() {
    for seed in 0..8 {
        let level = generate(GeneratorConfig::default(), seed);
        assert!(level.rooms().len() >= 2, "seed {seed} placed too few rooms");
        check_level(&level);
    }
}

#[test]
fn test_doors_never_side_by_side() {
    for seed in 0..200 {
        check_level(&generate(GeneratorConfig::default(), seed));
    }
}

#[test]
fn test_dump_shape() {
    let level = generate(GeneratorConfig::default(), 77);
    let dump = level.dump();
    let lines: Vec<&str> = dump.lines().collect();

    assert_eq!(lines.len(), 50);
    assert!(lines.iter().all(|l| l.chars().count() == 76));
    assert!(lines[0].chars().all(|c| c == 'x'));
    assert_eq!(dump.matches('<').count(), 1);
    assert!(dump.contains('+'));
}

#[test]
fn test_tiles_share_supplied_registry() {
    let registry = TileRegistry::standard();
    let generator =
        LevelGenerator::with_registry(GeneratorConfig::default(), registry.clone()).unwrap();
    let level = generator.generate(&mut Random::new(9));

    let room = &level.rooms()[1];
    let center = room.world_floor_center().unwrap();
    assert_eq!(
        *level.tile_at(center),
        registry.floor().with_flags(TileFlags::IS_ROOM)
    );
}

#[test]
fn test_hallways_connect_rooms() {
    let level = generate(GeneratorConfig::default(), 31);
    let stats = level.stats();
    assert_eq!(stats.halls_carved + stats.halls_failed, level.rooms().len());

    let connected = level
        .rooms()
        .iter()
        .filter(|r| !r.connected_rooms().is_empty())
        .count();
    if stats.halls_failed == 0 {
        assert_eq!(connected, level.rooms().len());
    }
}

#[test]
fn test_json_config() {
    let config: GeneratorConfig =
        serde_json::from_str(r#"{ "width": 40, "height": 30, "placement_attempts": 60 }"#)
            .unwrap();
    let level = generate(config, 5);
    assert_eq!((level.width(), level.height()), (40, 30));
    assert_eq!(level.stats().attempts, 60);
    check_level(&level);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_generation_is_deterministic(
        seed in any::<u64>(),
        width in 20..60i32,
        height in 15..40i32,
    ) {
        let config = GeneratorConfig::with_size(width, height);
        let a = generate(config.clone(), seed);
        let b = generate(config, seed);
        prop_assert_eq!(a.grid(), b.grid());
        prop_assert_eq!(a.stats(), b.stats());
    }

    #[test]
    fn prop_levels_hold_invariants(
        seed in any::<u64>(),
        width in 10..60i32,
        height in 10..40i32,
    ) {
        let level = generate(GeneratorConfig::with_size(width, height), seed);
        prop_assert_eq!(level.width(), width);
        prop_assert_eq!(level.height(), height);
        check_level(&level);
    }
}
