//! tilehop: a tile-based 2D platformer
//!
//! A CSV tile grid drawn from a sprite atlas, and one player body that
//! runs, jumps and collides with solid tiles.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod game;
mod input;
mod render;
mod world;

use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use macroquad::prelude::*;
use config::GameConfig;
use game::GameState;
use input::{Action, InputState};
use render::{Camera, TileAtlas};
use world::Grid;

#[derive(Parser, Debug)]
#[command(name = "tilehop", version, about = "A tile-based 2D platformer")]
struct Cli {
    /// RON config file (defaults are used if it does not exist)
    #[arg(long, default_value = "assets/config.ron")]
    config: PathBuf,

    /// CSV level file, overrides the config
    #[arg(long)]
    level: Option<PathBuf>,

    /// Start with the debug overlay visible
    #[arg(long)]
    debug: bool,

    /// Write the default config to the --config path and exit
    #[arg(long)]
    write_config: bool,
}

fn window_conf(config: &GameConfig) -> Conf {
    Conf {
        window_title: format!("{} v{}", config.window.title, VERSION),
        window_width: config.window.width,
        window_height: config.window.height,
        window_resizable: config.window.resizable,
        ..Default::default()
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if cli.write_config {
        config::write_config(&cli.config, &GameConfig::default())
            .with_context(|| format!("writing starter config {}", cli.config.display()))?;
        return Ok(());
    }

    let mut config = config::load_config(&cli.config)
        .with_context(|| format!("loading config {}", cli.config.display()))?;
    if let Some(level) = cli.level {
        config.level = level;
    }

    let loaded = world::load_grid_or_empty(&config.level);
    let grid = if config.strict_level_load {
        loaded.into_strict().map_err(|e| {
            let path = e.path().display().to_string();
            anyhow::Error::new(e)
                .context(format!("strict_level_load is set and level {} failed to load", path))
        })?
    } else {
        loaded.grid
    };

    log::info!("=== tilehop v{} ===", VERSION);
    macroquad::Window::from_config(window_conf(&config), run(config, grid, cli.debug));
    Ok(())
}

async fn run(config: GameConfig, grid: Grid, debug: bool) {
    let atlas = TileAtlas::load(&config.atlas, config.tile_size);
    let mut input = InputState::new();
    let mut game = GameState::new(grid, &config);
    game.show_debug_overlay = debug;
    let mut camera = Camera::new(Vec2::ZERO);

    let (r, g, b) = config.background;
    let background = Color::from_rgba(r, g, b, 255);

    loop {
        // Track frame start time for FPS limiting
        let frame_start = get_time();

        let snapshot = input.poll();
        if snapshot.was_pressed(Action::Quit) {
            break;
        }

        game.tick(get_frame_time(), &snapshot);

        camera.follow(game.player.body.bounds(), vec2(screen_width(), screen_height()));
        clear_background(background);
        render::draw_level(&game, &atlas, &camera);
        render::draw_player(&game, &atlas, &camera);
        if game.show_debug_overlay {
            render::draw_debug_overlay(&game, &camera, input.has_gamepad());
        }

        if let Some(target_frame_time) = config.fps_limit.frame_time() {
            // Native: use sleep for bulk, then spin-wait for precision
            #[cfg(not(target_arch = "wasm32"))]
            {
                let spin_margin = 0.002; // 2ms
                while get_time() - frame_start + spin_margin < target_frame_time {
                    std::thread::sleep(std::time::Duration::from_millis(1));
                }
                while get_time() - frame_start < target_frame_time {
                    std::hint::spin_loop();
                }
            }
            // WASM: the browser paces frames
            #[cfg(target_arch = "wasm32")]
            let _ = (frame_start, target_frame_time);
        }

        next_frame().await;
    }

    log::info!("Exiting after {} ticks", game.tick_count);
}
