use anyhow::Result;
use log::info;
use std::sync::Arc;
use winit::{
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::assets::AssetManager;
use engine::game_loop::GameLoop;
use engine::input::{Action, InputManager, InputSource};
use engine::renderer::Renderer;
use game::characters::FighterConfig;
use game::{ArenaConfig, Match};

const TITLE: &str = "Samurai Duel";

/// Directory holding the `img/` tree, overridable for packaged builds
const ASSET_ROOT_VAR: &str = "SAMURAI_DUEL_ASSETS";
const DEFAULT_ASSET_ROOT: &str = "assets";

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting {}...", TITLE);

    let arena = ArenaConfig::default();

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(arena.width, arena.height))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let mut renderer = pollster::block_on(Renderer::new(window.clone(), arena.size()))?;

    let asset_root =
        std::env::var(ASSET_ROOT_VAR).unwrap_or_else(|_| DEFAULT_ASSET_ROOT.to_string());
    let mut assets = AssetManager::new(&asset_root);

    let mut game = Match::new(
        arena,
        [FighterConfig::samurai_mack(), FighterConfig::kenji()],
        |path| assets.request_texture(path),
    )?;
    info!("Requested {} textures", assets.pending_count());

    let mut game_loop = GameLoop::new();
    let mut input = InputManager::default();
    let mut title = String::new();

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                WindowEvent::Resized(physical_size) => {
                    renderer.resize(physical_size);
                }
                WindowEvent::Focused(false) => {
                    // Keys released while unfocused never report their key-up
                    input.reset_all();
                }
                WindowEvent::KeyboardInput {
                    event: key_event, ..
                } => {
                    if is_fresh_press(&key_event, KeyCode::Escape) {
                        info!("Escape pressed, shutting down...");
                        elwt.exit();
                        return;
                    }
                    if is_pause_press(&input, &key_event) {
                        game_loop.toggle_pause();
                    }
                    input.process_keyboard_event(&key_event);
                }
                WindowEvent::RedrawRequested => {
                    for loaded in assets.poll_loaded() {
                        renderer.upload_texture(&loaded);
                    }

                    // Each tick redraws the whole scene; with no tick the last one is shown again
                    let timing = game_loop.begin_frame();
                    for _ in 0..timing.ticks {
                        renderer.begin_frame();
                        game.tick(&input, &mut renderer);
                        input.update();
                    }
                    game.advance_clock(timing.elapsed);

                    let status = if game_loop.is_paused() {
                        format!("{} - {} (paused)", TITLE, game.status_line())
                    } else {
                        format!("{} - {}", TITLE, game.status_line())
                    };
                    if status != title {
                        window.set_title(&status);
                        title = status;
                    }

                    match renderer.render() {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            renderer.reconfigure();
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("GPU out of memory, shutting down");
                            elwt.exit();
                        }
                        Err(e) => log::warn!("Dropped frame: {}", e),
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}

fn is_fresh_press(event: &KeyEvent, key: KeyCode) -> bool {
    event.state == ElementState::Pressed && !event.repeat && event.physical_key == PhysicalKey::Code(key)
}

/// Pause is handled on the event itself: a paused loop runs no ticks to consume input edges
fn is_pause_press(input: &InputManager, event: &KeyEvent) -> bool {
    let PhysicalKey::Code(code) = event.physical_key else {
        return false;
    };
    event.state == ElementState::Pressed
        && !event.repeat
        && input.global_action(InputSource::key(code)) == Some(Action::Pause)
}
