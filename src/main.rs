//! voxisle: a procedurally generated floating voxel island with a
//! free-flying camera.

mod config;
mod game;
mod input;

use anyhow::Result;
use std::sync::Arc;
use std::time::Instant;
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use voxisle_render::{Renderer, RendererConfig};

use config::AppConfig;
use game::Game;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let config = AppConfig::load();
    tracing::info!(island_size = config.island_size, "starting voxisle");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let window = Arc::new(
        WindowBuilder::new()
            .with_title("voxisle")
            .with_inner_size(winit::dpi::PhysicalSize::new(
                config.window_width,
                config.window_height,
            ))
            .build(&event_loop)?,
    );

    let mut renderer = Renderer::new(RendererConfig {
        width: config.window_width,
        height: config.window_height,
    });
    pollster::block_on(renderer.initialize_gpu(window.clone()))?;

    let mut game = Game::new(&config);
    let mut last_frame = Instant::now();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => renderer.resize((size.width, size.height)),
            WindowEvent::KeyboardInput { event, .. } => {
                input::handle_key(&mut game, &window, &event);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => input::handle_click(&mut game, &window),
            WindowEvent::Focused(false) => input::release_cursor(&mut game, &window),
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                // Cap dt so a long stall does not launch the camera.
                let dt = (now - last_frame).as_secs_f32().min(0.1);
                last_frame = now;

                game.sync(&mut renderer);
                let camera = *game.update(dt);
                if let Err(err) = renderer.render(&camera) {
                    tracing::error!(%err, "frame failed");
                    elwt.exit();
                }
            }
            _ => {}
        },
        Event::DeviceEvent { event, .. } => input::handle_device_event(&mut game, &event),
        Event::AboutToWait => window.request_redraw(),
        _ => {}
    })?;

    Ok(())
}
