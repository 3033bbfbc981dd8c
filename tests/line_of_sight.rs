mod common;

use common::{center, layout, t, TestScene, DOOR};
use tiles_advanced::{
    can_see, has_line_of_sight, set_wall_for_type, to_tile, ActorId, Grid, SampleMode, SightConfig, TileMap,
    WorldPoint,
};

const GUARD: ActorId = ActorId(1);
const THIEF: ActorId = ActorId(2);

fn two_rooms() -> TestScene {
    TestScene::new(layout(
        "
        #########
        #...#...#
        #...D...#
        #...#...#
        #########
        ",
    ))
}

/// Whether any sample point lands on a wall
fn any_sample_on_wall(grid: &Grid, from: WorldPoint, to: WorldPoint, samples: usize) -> bool {
    let step_x = (to.x - from.x) / samples as f32;
    let step_y = (to.y - from.y) / samples as f32;
    (0..samples).any(|i| {
        let point = WorldPoint::new(from.x + i as f32 * step_x, from.y + i as f32 * step_y);
        grid.is_wall(to_tile(point, 16.0))
    })
}

#[test]
fn test_closed_door_blocks_and_open_door_clears() {
    let mut scene = two_rooms();
    scene.place(GUARD, center(1, 2));
    scene.place(THIEF, center(7, 2));
    let sight = SightConfig::default();

    assert!(!can_see(&scene, &scene, GUARD, THIEF, &sight));
    assert!(!can_see(&scene, &scene, THIEF, GUARD, &sight));

    set_wall_for_type(&mut scene, DOOR, false);
    assert!(can_see(&scene, &scene, GUARD, THIEF, &sight));

    // the door aside, the dividing wall still blocks other rows
    scene.place(THIEF, center(7, 1));
    scene.place(GUARD, center(1, 1));
    assert!(!can_see(&scene, &scene, GUARD, THIEF, &sight));
}

#[test]
fn test_same_room_always_visible() {
    let mut scene = two_rooms();
    scene.place(GUARD, center(1, 1));
    for (col, row) in [(2, 1), (3, 3), (1, 3), (3, 1)] {
        scene.place(THIEF, center(col, row));
        assert!(can_see(&scene, &scene, GUARD, THIEF, &SightConfig::default()));
    }
}

#[test]
fn test_looker_on_wall_sees_nothing() {
    let mut scene = two_rooms();
    scene.place(GUARD, center(4, 1));
    scene.place(THIEF, center(4, 1));
    assert!(!can_see(&scene, &scene, GUARD, THIEF, &SightConfig::default()));
}

#[test]
fn test_off_map_samples_block() {
    let grid = layout("...\n...\n");
    let outside = WorldPoint::new(-8.0, 8.0);
    assert!(!has_line_of_sight(&grid, outside, center(2, 1), &SightConfig::default()));
    assert!(has_line_of_sight(&grid, center(2, 1), center(0, 0), &SightConfig::default()));
}

#[test]
fn test_matches_brute_force_sampling() {
    let grid = layout(
        "
        ..........
        ..#.......
        .....#....
        ...#......
        ........#.
        ",
    );
    let sight = SightConfig::default();
    let points: Vec<WorldPoint> = (0..10)
        .flat_map(|col| (0..5).map(move |row| center(col, row)))
        .collect();

    for &from in &points {
        for &to in &points {
            let expected = !any_sample_on_wall(&grid, from, to, sight.samples);
            assert_eq!(has_line_of_sight(&grid, from, to, &sight), expected, "{:?} -> {:?}", from, to);
        }
    }
}

#[test]
fn test_per_tile_sampling_catches_thin_walls() {
    let grid = layout(
        "
        ................................
        ............#...................
        ................................
        ",
    );
    let from = center(0, 1);
    let to = center(31, 1);
    let coarse = SightConfig {
        samples: 3,
        ..SightConfig::default()
    };
    assert!(has_line_of_sight(&grid, from, to, &coarse));

    let per_tile = SightConfig {
        sampling: SampleMode::PerTile,
        ..coarse
    };
    assert!(!has_line_of_sight(&grid, from, to, &per_tile));
    assert_eq!(per_tile.sample_count(from.distance(&to)), 32);
    assert!(!grid.is_wall(t(0, 1)));
}
