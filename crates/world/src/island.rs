//! Radial island mask.
//!
//! Decides which lattice columns exist and tapers terrain amplitude
//! toward zero at the island edge, turning a square lattice into a
//! circular island.

/// Fraction of the lattice half-size used as the island radius.
const EDGE_FACTOR: f64 = 0.8;

/// Radial falloff mask over the lattice `[-half_size, half_size)²`.
#[derive(Debug, Clone, Copy)]
pub struct IslandMask {
    max_dist: f64,
}

impl IslandMask {
    /// Build the mask for a lattice with the given half-size.
    pub fn new(half_size: i32) -> Self {
        Self {
            max_dist: half_size as f64 * EDGE_FACTOR,
        }
    }

    fn dist_from_center(x: i32, z: i32) -> f64 {
        ((x as f64).powi(2) + (z as f64).powi(2)).sqrt()
    }

    /// Whether the column at (x, z) is part of the island.
    pub fn included(&self, x: i32, z: i32) -> bool {
        Self::dist_from_center(x, z) < self.max_dist
    }

    /// Linear amplitude taper: 1.0 at the center, 0.0 at the island
    /// edge. Only meaningful for included columns.
    pub fn falloff(&self, x: i32, z: i32) -> f64 {
        1.0 - Self::dist_from_center(x, z) / self.max_dist
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_four_inclusion_set_is_exact() {
        // half_size 2 gives max_dist 1.6: every cell with both
        // coordinates in {-1, 0, 1} is included, nothing else.
        let mask = IslandMask::new(2);
        let mut included = Vec::new();
        for x in -2..2 {
            for z in -2..2 {
                if mask.included(x, z) {
                    included.push((x, z));
                }
            }
        }
        let mut expected = Vec::new();
        for x in -1..=1 {
            for z in -1..=1 {
                expected.push((x, z));
            }
        }
        assert_eq!(included, expected);
    }

    #[test]
    fn cells_at_or_beyond_radius_are_excluded() {
        let mask = IslandMask::new(16);
        let max_dist = 16.0 * EDGE_FACTOR;
        for x in -16..16 {
            for z in -16..16 {
                let dist = IslandMask::dist_from_center(x, z);
                if dist >= max_dist {
                    assert!(!mask.included(x, z), "({x}, {z}) should be excluded");
                } else {
                    assert!(mask.included(x, z), "({x}, {z}) should be included");
                }
            }
        }
    }

    #[test]
    fn falloff_is_one_at_center_and_in_unit_range_inside() {
        let mask = IslandMask::new(20);
        assert_eq!(mask.falloff(0, 0), 1.0);
        for x in -20..20 {
            for z in -20..20 {
                if mask.included(x, z) {
                    let f = mask.falloff(x, z);
                    assert!((0.0..=1.0).contains(&f), "falloff {f} at ({x}, {z})");
                }
            }
        }
    }
}
