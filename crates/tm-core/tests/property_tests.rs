use proptest::prelude::*;

use tm_core::grid::{on_pillar_lattice, stamp_tower};
use tm_core::progress::Pacer;
use tm_core::rooms::Layout;
use tm_core::{CellKind, GeneratorConfig, Grid};

fn layout_rows() -> impl Strategy<Value = Vec<String>> {
    (1usize..7, 1usize..7).prop_flat_map(|(w, h)| {
        prop::collection::vec(prop::collection::vec(prop::sample::select(vec!['z', 'x', '0', 'a']), w), h)
            .prop_map(|rows| {
                rows.into_iter()
                    .map(|r| r.into_iter().collect::<String>())
                    .collect::<Vec<_>>()
            })
    })
}

proptest! {
    #[test]
    fn test_rotation_by_four_is_identity(rows in layout_rows(), k in 0u32..8) {
        let layout = Layout::parse(rows.as_slice()).unwrap();
        prop_assert_eq!(layout.rotated(4 * k), layout.clone());
    }

    #[test]
    fn test_four_quarter_turns_round_trip(rows in layout_rows()) {
        let layout = Layout::parse(rows.as_slice()).unwrap();
        let mut turned = layout.clone();
        for _ in 0..4 {
            turned = turned.rotated(1);
        }
        prop_assert_eq!(turned, layout);
    }

    #[test]
    fn test_quarter_turn_swaps_dimensions(rows in layout_rows(), k in 0u32..4) {
        let layout = Layout::parse(rows.as_slice()).unwrap();
        let turned = layout.rotated(k);
        if k % 2 == 1 {
            prop_assert_eq!(turned.width(), layout.height());
            prop_assert_eq!(turned.height(), layout.width());
        } else {
            prop_assert_eq!(turned.width(), layout.width());
            prop_assert_eq!(turned.height(), layout.height());
        }
    }

    #[test]
    fn test_rotation_preserves_markers(rows in layout_rows(), k in 0u32..4) {
        let layout = Layout::parse(rows.as_slice()).unwrap();
        let mut before: Vec<char> = layout.rows().concat().chars().collect();
        let mut after: Vec<char> = layout.rotated(k).rows().concat().chars().collect();
        before.sort_unstable();
        after.sort_unstable();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn test_tower_shape_invariant(
        half in 1usize..30,
        factor in 0.1f64..=1.0,
        wall in 0.0f64..6.0,
        spacing in 1usize..20,
    ) {
        let config = GeneratorConfig {
            grid_size: 2 * half + 1,
            tower_radius_factor: factor,
            wall_thickness: wall,
            pillar_spacing: spacing,
            ..GeneratorConfig::default()
        };
        let mut grid = Grid::new(config.grid_size);
        let shape = stamp_tower(&mut grid, &config, &mut Pacer::silent());

        for (x, y, kind) in grid.iter() {
            let dist = shape.distance(x, y);
            let expected = if dist > shape.radius {
                CellKind::Out
            } else if shape.radius - dist < wall {
                CellKind::Wall
            } else if (x, y) == shape.center {
                CellKind::Pin
            } else if on_pillar_lattice(x, y, spacing) {
                CellKind::Pillar
            } else {
                CellKind::Floor
            };
            prop_assert_eq!(kind, expected);
        }
        prop_assert!(grid.count(CellKind::Pin) <= 1);
        prop_assert_eq!(grid.count(CellKind::Box), 0);
    }
}
