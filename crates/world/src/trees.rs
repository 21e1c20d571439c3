//! Tree decoration pass over voxelized columns.
//!
//! The one non-deterministic stage: the random source is injected so
//! builds replay exactly under a seeded RNG.

use crate::terrain::Column;
use rand::Rng;

/// Probability of a tree on an eligible column.
const TREE_PROBABILITY: f64 = 0.15;
/// Eligible column heights are strictly between these bounds.
const MIN_HEIGHT: i32 = 2;
const MAX_HEIGHT: i32 = 8;

/// Marker one cell above a column's top voxel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeMarker {
    /// Lattice X coordinate.
    pub x: i32,
    /// Lattice Y coordinate, one above the column's top voxel.
    pub y: i32,
    /// Lattice Z coordinate.
    pub z: i32,
}

/// Scatter markers over columns whose height is strictly between 2
/// and 8, drawing one sample per eligible column.
pub fn place_trees<R: Rng>(columns: &[Column], rng: &mut R) -> Vec<TreeMarker> {
    let mut markers = Vec::new();
    for column in columns {
        if column.height <= MIN_HEIGHT || column.height >= MAX_HEIGHT {
            continue;
        }
        if rng.gen::<f64>() < TREE_PROBABILITY {
            markers.push(TreeMarker {
                x: column.x,
                y: column.height + 1,
                z: column.z,
            });
        }
    }
    markers
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn columns() -> Vec<Column> {
        vec![
            Column { x: 0, z: 0, height: 2 },  // too short
            Column { x: 1, z: 0, height: 3 },  // eligible
            Column { x: 2, z: 0, height: 7 },  // eligible
            Column { x: 3, z: 0, height: 8 },  // too tall
            Column { x: 4, z: 0, height: 12 }, // too tall
            Column { x: 5, z: 0, height: 0 },  // too short
        ]
    }

    #[test]
    fn only_eligible_columns_grow_trees() {
        // StepRng at 0 samples 0.0, below the probability every draw.
        let markers = place_trees(&columns(), &mut StepRng::new(0, 0));
        assert_eq!(
            markers,
            vec![
                TreeMarker { x: 1, y: 4, z: 0 },
                TreeMarker { x: 2, y: 8, z: 0 },
            ]
        );
    }

    #[test]
    fn high_samples_place_nothing() {
        let markers = place_trees(&columns(), &mut StepRng::new(u64::MAX, 0));
        assert!(markers.is_empty());
    }

    #[test]
    fn markers_sit_one_above_the_column_top() {
        let markers = place_trees(&columns(), &mut StepRng::new(0, 0));
        for marker in markers {
            let column = columns()
                .into_iter()
                .find(|c| c.x == marker.x && c.z == marker.z)
                .expect("marker has a source column");
            assert_eq!(marker.y, column.height + 1);
        }
    }

    #[test]
    fn one_sample_per_eligible_column() {
        use rand::RngCore;

        let mut rng = StepRng::new(0, 1);
        place_trees(&columns(), &mut rng);
        // Two eligible columns, so exactly two draws: the counter
        // advanced from 0 to 2.
        assert_eq!(rng.next_u64(), 2);
    }

    #[test]
    fn empty_input_is_fine() {
        let markers = place_trees(&[], &mut StepRng::new(0, 0));
        assert!(markers.is_empty());
    }
}
