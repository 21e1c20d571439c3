//! Terrain voxelization.
//!
//! Combines the heightfield and the island mask into per-column voxel
//! lists with material labels, plus an explicit memo cache keyed by
//! the generation size.

use crate::island::IslandMask;
use crate::noise;
use crate::trees::{self, TreeMarker};
use rand::Rng;
use tracing::debug;

/// Compression applied to the raw heightfield amplitude.
const HEIGHT_SCALE: f64 = 0.3;
/// Minimum above-sea-level thickness near the island center.
const BASE_THICKNESS: f64 = 3.0;
/// Columns taller than this turn to stone above the dirt band.
const STONE_THRESHOLD: i32 = 8;

/// Voxel material label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    /// Sea-floor layer, always at y = 0.
    Sand,
    /// Single band at y = 1 under any taller column.
    Dirt,
    /// Surface of low and mid-height columns.
    Grass,
    /// Core of columns taller than the stone threshold.
    Stone,
}

impl Material {
    /// RGB used for instanced rendering.
    pub fn color(&self) -> [f32; 3] {
        match self {
            Material::Sand => [0.761, 0.698, 0.502],
            Material::Dirt => [0.545, 0.353, 0.169],
            Material::Grass => [0.133, 0.545, 0.133],
            Material::Stone => [0.502, 0.502, 0.502],
        }
    }
}

/// One unit cube on the integer lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Voxel {
    /// Lattice X coordinate.
    pub x: i32,
    /// Lattice Y coordinate (0 is the sea floor).
    pub y: i32,
    /// Lattice Z coordinate.
    pub z: i32,
    /// Material label for this voxel.
    pub material: Material,
}

/// An included column and its computed height, fed to tree placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Lattice X coordinate.
    pub x: i32,
    /// Lattice Z coordinate.
    pub z: i32,
    /// Top voxel Y coordinate of the column.
    pub height: i32,
}

/// Immutable output of one generation pass, keyed by `size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainBuild {
    size: i32,
    voxels: Vec<Voxel>,
    trees: Vec<TreeMarker>,
}

impl TerrainBuild {
    /// Size parameter this build was generated for.
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Generated voxels, one per occupied lattice cell.
    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    /// Generated tree markers; may be empty.
    pub fn trees(&self) -> &[TreeMarker] {
        &self.trees
    }
}

/// Height of the column at (x, z): the compressed, falloff-tapered
/// heightfield sample plus the base thickness, floored and clamped to
/// be non-negative.
pub fn column_height(x: i32, z: i32, mask: &IslandMask) -> i32 {
    let raw =
        noise::height(x as f64, z as f64) * mask.falloff(x, z) * HEIGHT_SCALE + BASE_THICKNESS;
    (raw.floor() as i32).max(0)
}

/// Material for the voxel at `y` within a column of the given height.
///
/// The precedence is ordered and the first match wins: sand floor,
/// dirt band, stone core, grass. A column taller than the stone
/// threshold is sand at y=0, dirt at y=1, and stone everywhere above.
fn material_for(y: i32, column_height: i32) -> Material {
    if y == 0 {
        Material::Sand
    } else if y == 1 && column_height > 1 {
        Material::Dirt
    } else if column_height > STONE_THRESHOLD {
        Material::Stone
    } else {
        Material::Grass
    }
}

/// Generate the island for the given lattice size.
///
/// Columns span `[-size/2, size/2)²` filtered by the island mask; one
/// voxel is emitted per integer y from 0 through the column height, so
/// positions are unique within a build. The terrain shape depends only
/// on `size`; `rng` drives tree placement alone. A non-positive size
/// produces an empty build.
pub fn generate<R: Rng>(size: i32, rng: &mut R) -> TerrainBuild {
    if size <= 0 {
        return TerrainBuild {
            size,
            voxels: Vec::new(),
            trees: Vec::new(),
        };
    }

    let half = size / 2;
    let mask = IslandMask::new(half);
    let mut voxels = Vec::new();
    let mut columns = Vec::new();

    for x in -half..half {
        for z in -half..half {
            if !mask.included(x, z) {
                continue;
            }
            let height = column_height(x, z, &mask);
            for y in 0..=height {
                voxels.push(Voxel {
                    x,
                    y,
                    z,
                    material: material_for(y, height),
                });
            }
            columns.push(Column { x, z, height });
        }
    }

    let trees = trees::place_trees(&columns, rng);
    debug!(
        size,
        voxels = voxels.len(),
        trees = trees.len(),
        "island generated"
    );

    TerrainBuild {
        size,
        voxels,
        trees,
    }
}

/// Explicit memo for the latest build, keyed by `size`.
///
/// Replaces reactive dependency tracking: the caller asks for a size
/// every frame and the cache regenerates only when it changes.
#[derive(Debug, Default)]
pub struct TerrainCache {
    build: Option<TerrainBuild>,
}

impl TerrainCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached build when `size` is unchanged, regenerating
    /// otherwise. A cache hit does not consume the RNG.
    pub fn get_or_generate<R: Rng>(&mut self, size: i32, rng: &mut R) -> &TerrainBuild {
        let stale = self.build.as_ref().map_or(true, |b| b.size() != size);
        if stale {
            self.build = Some(generate(size, rng));
        }
        self.build.as_ref().expect("cache populated above")
    }
}
