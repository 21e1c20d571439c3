//! Whole-build assertions over generated islands.

use rand::rngs::mock::StepRng;
use rand::{rngs::StdRng, SeedableRng};
use std::collections::{HashMap, HashSet};
use voxisle_world::{generate, Material};

#[test]
fn voxel_positions_are_unique() {
    let build = generate(64, &mut StdRng::seed_from_u64(42));
    let mut seen = HashSet::new();
    for v in build.voxels() {
        assert!(
            seen.insert((v.x, v.y, v.z)),
            "duplicate voxel at ({}, {}, {})",
            v.x,
            v.y,
            v.z
        );
    }
}

#[test]
fn all_columns_lie_inside_the_island_radius() {
    let size = 64;
    let max_dist = (size / 2) as f64 * 0.8;
    let build = generate(size, &mut StdRng::seed_from_u64(42));
    for v in build.voxels() {
        let dist = ((v.x * v.x + v.z * v.z) as f64).sqrt();
        assert!(
            dist < max_dist,
            "voxel ({}, {}) outside radius {max_dist}",
            v.x,
            v.z
        );
    }
}

#[test]
fn builds_with_the_same_seed_replay_exactly() {
    let a = generate(48, &mut StdRng::seed_from_u64(7));
    let b = generate(48, &mut StdRng::seed_from_u64(7));
    assert_eq!(a, b);
}

#[test]
fn tree_columns_are_strictly_between_two_and_eight() {
    // Force a tree on every eligible column so the check covers all
    // of them.
    let build = generate(64, &mut StepRng::new(0, 0));
    assert!(!build.trees().is_empty());

    let mut column_tops: HashMap<(i32, i32), i32> = HashMap::new();
    for v in build.voxels() {
        let top = column_tops.entry((v.x, v.z)).or_insert(v.y);
        *top = (*top).max(v.y);
    }

    for tree in build.trees() {
        let height = column_tops
            .get(&(tree.x, tree.z))
            .copied()
            .expect("tree marker over a generated column");
        assert!(
            height > 2 && height < 8,
            "tree at ({}, {}) over column of height {height}",
            tree.x,
            tree.z
        );
        assert_eq!(tree.y, height + 1);
    }
}

#[test]
fn surface_of_mid_columns_is_grass() {
    let build = generate(64, &mut StepRng::new(u64::MAX, 0));

    let mut column_tops: HashMap<(i32, i32), i32> = HashMap::new();
    for v in build.voxels() {
        let top = column_tops.entry((v.x, v.z)).or_insert(v.y);
        *top = (*top).max(v.y);
    }

    for v in build.voxels() {
        let top = column_tops[&(v.x, v.z)];
        if v.y == top && (2..=8).contains(&top) {
            assert_eq!(v.material, Material::Grass, "({}, {}, {})", v.x, v.y, v.z);
        }
    }
}
