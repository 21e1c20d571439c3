//! CPU mesh construction for the shared voxel cube and trunk cylinder.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

/// Vertex layout shared by every mesh in the scene pass.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Face normal.
    pub normal: [f32; 3],
}

/// A mesh staged on the CPU, ready for upload.
#[derive(Debug, Clone)]
pub struct MeshBuffers {
    /// Vertex list.
    pub vertices: Vec<MeshVertex>,
    /// Triangle indices into `vertices`.
    pub indices: Vec<u32>,
}

/// Face table: (normal, four corners in CCW order seen from outside).
const FACES: [([f32; 3], [[f32; 3]; 4]); 6] = [
    // +X
    (
        [1.0, 0.0, 0.0],
        [
            [0.5, -0.5, -0.5],
            [0.5, 0.5, -0.5],
            [0.5, 0.5, 0.5],
            [0.5, -0.5, 0.5],
        ],
    ),
    // -X
    (
        [-1.0, 0.0, 0.0],
        [
            [-0.5, -0.5, 0.5],
            [-0.5, 0.5, 0.5],
            [-0.5, 0.5, -0.5],
            [-0.5, -0.5, -0.5],
        ],
    ),
    // +Y
    (
        [0.0, 1.0, 0.0],
        [
            [-0.5, 0.5, 0.5],
            [0.5, 0.5, 0.5],
            [0.5, 0.5, -0.5],
            [-0.5, 0.5, -0.5],
        ],
    ),
    // -Y
    (
        [0.0, -1.0, 0.0],
        [
            [-0.5, -0.5, -0.5],
            [0.5, -0.5, -0.5],
            [0.5, -0.5, 0.5],
            [-0.5, -0.5, 0.5],
        ],
    ),
    // +Z
    (
        [0.0, 0.0, 1.0],
        [
            [-0.5, -0.5, 0.5],
            [0.5, -0.5, 0.5],
            [0.5, 0.5, 0.5],
            [-0.5, 0.5, 0.5],
        ],
    ),
    // -Z
    (
        [0.0, 0.0, -1.0],
        [
            [0.5, -0.5, -0.5],
            [-0.5, -0.5, -0.5],
            [-0.5, 0.5, -0.5],
            [0.5, 0.5, -0.5],
        ],
    ),
];

/// Unit cube centered on the origin with per-face normals.
pub fn unit_cube() -> MeshBuffers {
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, corners) in FACES {
        let base = vertices.len() as u32;
        for position in corners {
            vertices.push(MeshVertex { position, normal });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshBuffers { vertices, indices }
}

/// Unit-height cylinder of radius 0.5 centered on the origin.
///
/// `segments` is clamped to a minimum of 3.
pub fn unit_cylinder(segments: u32) -> MeshBuffers {
    let segments = segments.max(3);
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    // Side: one bottom/top vertex pair per segment, normals radial.
    for i in 0..segments {
        let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
        let (sin, cos) = angle.sin_cos();
        let normal = [cos, 0.0, sin];
        vertices.push(MeshVertex {
            position: [cos * 0.5, -0.5, sin * 0.5],
            normal,
        });
        vertices.push(MeshVertex {
            position: [cos * 0.5, 0.5, sin * 0.5],
            normal,
        });
    }
    for i in 0..segments {
        let bottom = i * 2;
        let top = bottom + 1;
        let next_bottom = (i + 1) % segments * 2;
        let next_top = next_bottom + 1;
        indices.extend_from_slice(&[bottom, top, next_top, bottom, next_top, next_bottom]);
    }

    // Caps: shared center vertex plus one rim vertex per segment.
    for (y, normal_y) in [(-0.5f32, -1.0f32), (0.5, 1.0)] {
        let center = vertices.len() as u32;
        let normal = [0.0, normal_y, 0.0];
        vertices.push(MeshVertex {
            position: [0.0, y, 0.0],
            normal,
        });
        for i in 0..segments {
            let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
            let (sin, cos) = angle.sin_cos();
            vertices.push(MeshVertex {
                position: [cos * 0.5, y, sin * 0.5],
                normal,
            });
        }
        for i in 0..segments {
            let rim = center + 1 + i;
            let next_rim = center + 1 + (i + 1) % segments;
            if normal_y > 0.0 {
                indices.extend_from_slice(&[center, rim, next_rim]);
            } else {
                indices.extend_from_slice(&[center, next_rim, rim]);
            }
        }
    }

    MeshBuffers { vertices, indices }
}

/// A mesh resident on the GPU.
pub struct GpuMesh {
    /// Vertex buffer.
    pub vertex_buffer: wgpu::Buffer,
    /// 32-bit index buffer.
    pub index_buffer: wgpu::Buffer,
    /// Number of indices to draw.
    pub index_count: u32,
}

impl GpuMesh {
    /// Upload staged buffers to the device.
    pub fn upload(device: &wgpu::Device, mesh: &MeshBuffers, label: &str) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}-vertices")),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}-indices")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }
}
