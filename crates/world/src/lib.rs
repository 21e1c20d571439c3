#![warn(missing_docs)]
//! Island terrain generation: heightfield sampling, radial island
//! mask, voxelization with material assignment, and tree decoration.

mod island;
pub mod noise;
mod terrain;
mod trees;

pub use island::IslandMask;
pub use terrain::{
    column_height, generate, Column, Material, TerrainBuild, TerrainCache, Voxel,
};
pub use trees::{place_trees, TreeMarker};
