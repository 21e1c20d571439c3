//! Property tests over generation sizes and tree seeds.

use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use std::collections::HashSet;
use voxisle_world::{generate, Material};

proptest! {
    #[test]
    fn voxels_unique_with_sand_floor(size in -4i32..40, seed in any::<u64>()) {
        let build = generate(size, &mut StdRng::seed_from_u64(seed));
        if size <= 0 {
            prop_assert!(build.voxels().is_empty());
            prop_assert!(build.trees().is_empty());
        }

        let mut seen = HashSet::new();
        for v in build.voxels() {
            prop_assert!(seen.insert((v.x, v.y, v.z)));
            prop_assert!(v.y >= 0);
            if v.y == 0 {
                prop_assert_eq!(v.material, Material::Sand);
            }
        }
    }

    #[test]
    fn columns_stay_inside_the_mask_radius(size in 1i32..40, seed in any::<u64>()) {
        let max_dist = (size / 2) as f64 * 0.8;
        let build = generate(size, &mut StdRng::seed_from_u64(seed));
        for v in build.voxels() {
            let dist = ((v.x * v.x + v.z * v.z) as f64).sqrt();
            prop_assert!(dist < max_dist);
        }
    }

    #[test]
    fn trees_never_outnumber_columns(size in 1i32..40, seed in any::<u64>()) {
        let build = generate(size, &mut StdRng::seed_from_u64(seed));
        let columns: HashSet<_> = build.voxels().iter().map(|v| (v.x, v.z)).collect();
        prop_assert!(build.trees().len() <= columns.len());
        // Every marker hovers over an existing column.
        for tree in build.trees() {
            prop_assert!(columns.contains(&(tree.x, tree.z)));
        }
    }
}
