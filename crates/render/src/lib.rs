//! Instanced wgpu renderer for the island scene.
//!
//! The renderer can run headless: until [`Renderer::initialize_gpu`]
//! succeeds, sync and render calls are retried no-ops, so game state
//! can be driven without a window or adapter.

#![warn(missing_docs)]

pub mod geometry;
pub mod instance;
pub mod pipeline;

pub use geometry::{unit_cube, unit_cylinder, GpuMesh, MeshBuffers, MeshVertex};
pub use instance::{InstanceBatch, InstanceData, Instanced};
pub use pipeline::{CameraUniform, IslandPipeline, RenderContext};

use anyhow::Result;
use glam::Mat4;
use std::f32::consts::FRAC_PI_3;
use std::sync::Arc;
use voxisle_camera::CameraState;
use wgpu::util::DeviceExt;
use winit::window::Window;

/// Segment count for the tree trunk cylinder.
const TRUNK_SEGMENTS: u32 = 12;
/// Clear color: light sky blue.
const SKY_COLOR: wgpu::Color = wgpu::Color {
    r: 0.53,
    g: 0.77,
    b: 0.92,
    a: 1.0,
};

/// Renderer creation parameters.
#[derive(Debug, Clone, Copy)]
pub struct RendererConfig {
    /// Backbuffer width in pixels.
    pub width: u32,
    /// Backbuffer height in pixels.
    pub height: u32,
}

/// GPU-resident instance buffer and its draw count.
struct GpuInstances {
    buffer: wgpu::Buffer,
    count: u32,
}

impl GpuInstances {
    fn upload(device: &wgpu::Device, instances: &[InstanceData], label: &str) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(instances),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            buffer,
            count: instances.len() as u32,
        }
    }
}

/// Scene renderer: shared cube and cylinder meshes drawn with
/// per-instance transforms and colors.
pub struct Renderer {
    config: RendererConfig,
    context: Option<RenderContext>,
    pipeline: Option<IslandPipeline>,
    cube: Option<GpuMesh>,
    cylinder: Option<GpuMesh>,
    terrain: Option<GpuInstances>,
    trees: Option<GpuInstances>,
}

impl Renderer {
    /// Create a renderer with no GPU resources yet.
    pub fn new(config: RendererConfig) -> Self {
        Self {
            config,
            context: None,
            pipeline: None,
            cube: None,
            cylinder: None,
            terrain: None,
            trees: None,
        }
    }

    /// Whether GPU initialization has completed.
    pub fn has_gpu(&self) -> bool {
        self.context.is_some()
    }

    /// Acquire the device and build pipeline and shared meshes.
    pub async fn initialize_gpu(&mut self, window: Arc<Window>) -> Result<()> {
        let context = RenderContext::new(window).await?;
        let pipeline = IslandPipeline::new(&context)?;
        self.cube = Some(GpuMesh::upload(&context.device, &unit_cube(), "cube"));
        self.cylinder = Some(GpuMesh::upload(
            &context.device,
            &unit_cylinder(TRUNK_SEGMENTS),
            "trunk",
        ));
        self.config.width = context.size.0;
        self.config.height = context.size.1;
        self.context = Some(context);
        self.pipeline = Some(pipeline);
        Ok(())
    }

    /// Resize the surface and depth buffer.
    pub fn resize(&mut self, new_size: (u32, u32)) {
        if new_size.0 == 0 || new_size.1 == 0 {
            return;
        }
        self.config.width = new_size.0;
        self.config.height = new_size.1;
        if let Some(context) = self.context.as_mut() {
            context.resize(new_size);
            if let Some(pipeline) = self.pipeline.as_mut() {
                pipeline.resize(&context.device, new_size);
            }
        }
    }

    /// Upload the terrain batch if it changed.
    ///
    /// Without a device this leaves the dirty flag intact so the
    /// upload is retried after GPU initialization.
    pub fn sync_terrain(&mut self, batch: &mut InstanceBatch) {
        let Some(context) = self.context.as_ref() else {
            return;
        };
        if !batch.take_dirty() {
            return;
        }
        tracing::debug!(instances = batch.len(), "uploading terrain instances");
        self.terrain = (!batch.is_empty())
            .then(|| GpuInstances::upload(&context.device, batch.instances(), "terrain-instances"));
    }

    /// Upload the tree batch if it changed. Same retry semantics as
    /// [`Renderer::sync_terrain`].
    pub fn sync_trees(&mut self, batch: &mut InstanceBatch) {
        let Some(context) = self.context.as_ref() else {
            return;
        };
        if !batch.take_dirty() {
            return;
        }
        tracing::debug!(instances = batch.len(), "uploading tree instances");
        self.trees = (!batch.is_empty())
            .then(|| GpuInstances::upload(&context.device, batch.instances(), "tree-instances"));
    }

    /// Draw one frame from the given camera pose.
    pub fn render(&mut self, camera: &CameraState) -> Result<()> {
        let (Some(context), Some(pipeline)) = (self.context.as_ref(), self.pipeline.as_ref())
        else {
            return Ok(());
        };

        let projection =
            Mat4::perspective_rh(FRAC_PI_3, context.aspect_ratio(), 0.1, 1000.0);
        let view_proj = projection * camera.view_matrix();
        let uniform = CameraUniform {
            view_proj: view_proj.to_cols_array_2d(),
            camera_pos: [
                camera.position.x,
                camera.position.y,
                camera.position.z,
                1.0,
            ],
        };
        pipeline.update_camera(&context.queue, &uniform);

        let frame = match context.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                context.surface.configure(&context.device, &context.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => return Ok(()),
            Err(err) => return Err(err.into()),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("island-frame"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("island-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(SKY_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: pipeline.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(pipeline.pipeline());
            pass.set_bind_group(0, pipeline.camera_bind_group(), &[]);

            if let (Some(cube), Some(terrain)) = (self.cube.as_ref(), self.terrain.as_ref()) {
                pass.set_vertex_buffer(0, cube.vertex_buffer.slice(..));
                pass.set_vertex_buffer(1, terrain.buffer.slice(..));
                pass.set_index_buffer(cube.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..cube.index_count, 0, 0..terrain.count);
            }

            if let (Some(cylinder), Some(trees)) = (self.cylinder.as_ref(), self.trees.as_ref()) {
                pass.set_vertex_buffer(0, cylinder.vertex_buffer.slice(..));
                pass.set_vertex_buffer(1, trees.buffer.slice(..));
                pass.set_index_buffer(cylinder.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..cylinder.index_count, 0, 0..trees.count);
            }
        }

        context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}
