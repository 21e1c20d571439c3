//! Scene state: the generated island, its instance batches, and the
//! flying camera.

use glam::Vec3;
use rand::{rngs::StdRng, SeedableRng};
use voxisle_camera::{CameraState, FreeCameraController};
use voxisle_render::{InstanceBatch, Renderer};
use voxisle_world::TerrainCache;

use crate::config::AppConfig;

/// Island size change per bracket-key press, in voxels.
pub const RESIZE_STEP: i32 = 10;
const MIN_ISLAND_SIZE: i32 = 0;
const MAX_ISLAND_SIZE: i32 = 400;

/// Everything that changes frame to frame.
pub struct Game {
    controller: FreeCameraController,
    terrain: TerrainCache,
    rng: StdRng,
    island_size: i32,
    built_size: Option<i32>,
    voxel_batch: InstanceBatch,
    tree_batch: InstanceBatch,
}

impl Game {
    /// Create a game from startup settings, with the camera parked
    /// above the island edge looking slightly down.
    pub fn new(config: &AppConfig) -> Self {
        let spawn = Vec3::new(0.0, 30.0, config.island_size as f32 * 0.75);
        let mut controller = FreeCameraController::new(spawn)
            .with_speed(config.fly_speed)
            .with_sensitivity(config.mouse_sensitivity);
        controller.state_mut().pitch = -0.4;
        controller.start();

        Self {
            controller,
            terrain: TerrainCache::new(),
            rng: StdRng::from_entropy(),
            island_size: config.island_size.clamp(MIN_ISLAND_SIZE, MAX_ISLAND_SIZE),
            built_size: None,
            voxel_batch: InstanceBatch::new(),
            tree_batch: InstanceBatch::new(),
        }
    }

    /// Camera controller, for routing input events.
    pub fn controller(&mut self) -> &mut FreeCameraController {
        &mut self.controller
    }

    /// Current island edge length in voxels.
    pub fn island_size(&self) -> i32 {
        self.island_size
    }

    /// Grow or shrink the island; the rebuild happens on the next
    /// [`sync`](Self::sync).
    pub fn resize_island(&mut self, delta: i32) {
        let next = (self.island_size + delta).clamp(MIN_ISLAND_SIZE, MAX_ISLAND_SIZE);
        if next != self.island_size {
            tracing::info!(from = self.island_size, to = next, "resizing island");
            self.island_size = next;
        }
    }

    /// Rebuild instance batches if the island changed, then push any
    /// dirty batches to the GPU.
    pub fn sync(&mut self, renderer: &mut Renderer) {
        if self.built_size != Some(self.island_size) {
            let build = self.terrain.get_or_generate(self.island_size, &mut self.rng);
            self.voxel_batch.rebuild(build.voxels());
            self.tree_batch.rebuild(build.trees());
            self.built_size = Some(self.island_size);
        }
        renderer.sync_terrain(&mut self.voxel_batch);
        renderer.sync_trees(&mut self.tree_batch);
    }

    /// Advance the camera by one frame.
    pub fn update(&mut self, dt: f32) -> &CameraState {
        self.controller.tick(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxisle_render::RendererConfig;

    fn headless_renderer() -> Renderer {
        Renderer::new(RendererConfig {
            width: 320,
            height: 240,
        })
    }

    #[test]
    fn island_size_is_clamped_at_both_ends() {
        let mut game = Game::new(&AppConfig::default());
        for _ in 0..100 {
            game.resize_island(-RESIZE_STEP);
        }
        assert_eq!(game.island_size(), 0);

        for _ in 0..100 {
            game.resize_island(RESIZE_STEP);
        }
        assert_eq!(game.island_size(), 400);
    }

    #[test]
    fn sync_builds_batches_once_per_size() {
        let config = AppConfig {
            island_size: 16,
            ..AppConfig::default()
        };
        let mut game = Game::new(&config);
        let mut renderer = headless_renderer();

        game.sync(&mut renderer);
        let first_len = game.voxel_batch.len();
        assert!(first_len > 0);

        // Same size again: the batch is left alone.
        game.sync(&mut renderer);
        assert_eq!(game.voxel_batch.len(), first_len);

        game.resize_island(RESIZE_STEP);
        game.sync(&mut renderer);
        assert_ne!(game.voxel_batch.len(), first_len);
    }

    #[test]
    fn zero_size_island_yields_empty_batches() {
        let config = AppConfig {
            island_size: 0,
            ..AppConfig::default()
        };
        let mut game = Game::new(&config);
        let mut renderer = headless_renderer();
        game.sync(&mut renderer);
        assert!(game.voxel_batch.is_empty());
        assert!(game.tree_batch.is_empty());
    }

    #[test]
    fn update_integrates_the_camera() {
        let mut game = Game::new(&AppConfig::default());
        let before = game.controller.state().position;
        game.controller.state_mut().velocity = Vec3::new(0.0, 0.0, -1.0);
        game.update(0.016);
        assert_ne!(game.controller.state().position, before);
    }
}
