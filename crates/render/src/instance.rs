//! Instanced draw data.
//!
//! Packs voxel and tree lists into index-stable (transform, color)
//! buffers: index `i` of the packed data corresponds exactly to index
//! `i` of the source list, and rebuilding from an unchanged list is
//! bit-identical.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};
use voxisle_world::{TreeMarker, Voxel};

/// Anisotropic scale applied to the unit cylinder as a trunk proxy.
const TREE_SCALE: Vec3 = Vec3::new(0.8, 2.0, 0.8);
/// Shared trunk color; trees have no per-instance color variation.
const TREE_COLOR: [f32; 3] = [0.420, 0.286, 0.157];

/// Per-instance GPU data.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    /// Column-major 4x4 model transform.
    pub model: [[f32; 4]; 4],
    /// RGBA color (alpha always 1).
    pub color: [f32; 4],
}

impl InstanceData {
    fn from_parts(scale: Vec3, translation: Vec3, rgb: [f32; 3]) -> Self {
        let model = Mat4::from_scale_rotation_translation(scale, Quat::IDENTITY, translation);
        Self {
            model: model.to_cols_array_2d(),
            color: [rgb[0], rgb[1], rgb[2], 1.0],
        }
    }
}

/// Types that can be packed into an instance buffer.
pub trait Instanced {
    /// Transform + color for this item.
    fn instance(&self) -> InstanceData;
}

impl Instanced for Voxel {
    fn instance(&self) -> InstanceData {
        InstanceData::from_parts(
            Vec3::ONE,
            Vec3::new(self.x as f32, self.y as f32, self.z as f32),
            self.material.color(),
        )
    }
}

impl Instanced for TreeMarker {
    fn instance(&self) -> InstanceData {
        InstanceData::from_parts(
            TREE_SCALE,
            Vec3::new(self.x as f32, self.y as f32, self.z as f32),
            TREE_COLOR,
        )
    }
}

/// CPU-side instance list with a dirty flag consumed by the GPU upload.
#[derive(Debug, Default)]
pub struct InstanceBatch {
    instances: Vec<InstanceData>,
    dirty: bool,
}

impl InstanceBatch {
    /// Create an empty, clean batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pack a list into a fresh batch. An empty input is a valid
    /// zero-instance batch.
    pub fn build<T: Instanced>(items: &[T]) -> Self {
        let mut batch = Self::new();
        batch.rebuild(items);
        batch
    }

    /// Repack in place and mark the batch dirty.
    pub fn rebuild<T: Instanced>(&mut self, items: &[T]) {
        self.instances.clear();
        self.instances.extend(items.iter().map(Instanced::instance));
        self.dirty = true;
    }

    /// Packed instances, index-aligned with the source list.
    pub fn instances(&self) -> &[InstanceData] {
        &self.instances
    }

    /// Number of instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether the batch holds no instances.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Consume the dirty flag; true when GPU storage must be refreshed.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
