//! Angelfall main entry point.
//!
//! Windowed frontend over the `angelfall` library:
//! - **raylib** for the window, input sampling and drawing
//! - **bevy_ecs** for the simulation, assembled by [`game::build_world`]
//!
//! # Main Loop
//!
//! 1. Load `config.ini`, apply CLI overrides, open the window
//! 2. Build the world from the levels directory and the save file
//! 3. Every frame:
//!    - sample keyboard and mouse into an [`InputSnapshot`]
//!    - [`game::step`] the world
//!    - replay the frame's [`DrawList`] into a fixed-resolution render
//!      target and scale it to the window
//!
//! # Running
//!
//! ```sh
//! cargo run --release --features window -- --level 2
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::{Path, PathBuf};

use angelfall::components::tint::Rgba;
use angelfall::game;
use angelfall::resources::drawlist::{DrawCommand, DrawList, Renderer};
use angelfall::resources::gameconfig::GameConfig;
use angelfall::resources::input::{Action, InputSnapshot};
use angelfall::resources::level::LevelLibrary;
use angelfall::resources::save::{JsonFileStore, SaveSlot};
use clap::Parser;
use glam::Vec2;
use raylib::prelude::*;
use rustc_hash::FxHashMap;

/// Textures looked up by entity tag.
const TEXTURE_TAGS: [&str; 23] = [
    "Tile",
    "Player",
    "Pistol",
    "Shotgun",
    "SawbladeLauncher",
    "Filth",
    "Soldier",
    "Virtue",
    "Maurice",
    "Gabriel",
    "HellPit",
    "Checkpoint",
    "Decoration",
    "FGDecoration",
    "Bullet",
    "Coin",
    "Core",
    "Magnet",
    "Sawblade",
    "Fireball",
    "FallingSword",
    "Sword",
    "Wing",
];

/// Angelfall
#[derive(Parser)]
#[command(version, about = "A fast 2D action platformer.")]
struct Cli {
    /// Path to the INI configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Level to start on (clamped to the highest unlocked level).
    #[arg(long, value_name = "N")]
    level: Option<u32>,

    /// Fixed RNG seed.
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Start with the debug overlay enabled.
    #[arg(long)]
    debug: bool,
}

const KEY_BINDINGS: [(KeyboardKey, Action); 11] = [
    (KeyboardKey::KEY_A, Action::Left),
    (KeyboardKey::KEY_D, Action::Right),
    (KeyboardKey::KEY_SPACE, Action::Jump),
    (KeyboardKey::KEY_S, Action::Slide),
    (KeyboardKey::KEY_F, Action::Punch),
    (KeyboardKey::KEY_ONE, Action::Weapon1),
    (KeyboardKey::KEY_TWO, Action::Weapon2),
    (KeyboardKey::KEY_THREE, Action::Weapon3),
    (KeyboardKey::KEY_R, Action::Restart),
    (KeyboardKey::KEY_F11, Action::Debug),
    (KeyboardKey::KEY_W, Action::Jump),
];

const MOUSE_BINDINGS: [(MouseButton, Action); 2] = [
    (MouseButton::MOUSE_BUTTON_LEFT, Action::Fire),
    (MouseButton::MOUSE_BUTTON_RIGHT, Action::AltFire),
];

/// Sample keyboard and mouse. The pointer is mapped from window pixels to
/// the logical render resolution.
fn sample_input(rl: &RaylibHandle, render_size: Vec2) -> InputSnapshot {
    let mut snapshot = InputSnapshot::new();
    for (key, action) in KEY_BINDINGS {
        if rl.is_key_pressed(key) {
            snapshot = snapshot.press(action);
        } else if rl.is_key_down(key) {
            snapshot = snapshot.hold(action);
        } else if rl.is_key_released(key) {
            snapshot = snapshot.release(action);
        }
    }
    for (button, action) in MOUSE_BINDINGS {
        if rl.is_mouse_button_pressed(button) {
            snapshot = snapshot.press(action);
        } else if rl.is_mouse_button_down(button) {
            snapshot = snapshot.hold(action);
        } else if rl.is_mouse_button_released(button) {
            snapshot = snapshot.release(action);
        }
    }
    let window = Vec2::new(rl.get_screen_width() as f32, rl.get_screen_height() as f32).max(Vec2::ONE);
    let mouse = rl.get_mouse_position();
    let pointer = Vec2::new(mouse.x, mouse.y) * render_size / window;
    snapshot.pointer_at(pointer.x, pointer.y)
}

fn load_textures(rl: &mut RaylibHandle, thread: &RaylibThread, dir: &Path) -> FxHashMap<String, Texture2D> {
    let mut textures = FxHashMap::default();
    for tag in TEXTURE_TAGS {
        let path = dir.join(format!("{}.png", tag));
        if !path.exists() {
            continue;
        }
        match rl.load_texture(thread, &path.to_string_lossy()) {
            Ok(texture) => {
                textures.insert(tag.to_string(), texture);
            }
            Err(e) => log::warn!("Failed to load texture {:?}: {}", path, e),
        }
    }
    log::info!("Loaded {} textures from {:?}", textures.len(), dir);
    textures
}

fn color(rgba: Rgba) -> Color {
    Color::new(rgba.r, rgba.g, rgba.b, rgba.a)
}

fn vector(v: Vec2) -> Vector2 {
    Vector2::new(v.x, v.y)
}

/// Replays draw commands through any raylib drawing scope.
struct RaylibRenderer<'a, D: RaylibDraw> {
    d: &'a mut D,
    textures: &'a FxHashMap<String, Texture2D>,
}

impl<D: RaylibDraw> Renderer for RaylibRenderer<'_, D> {
    fn draw(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Clear(c) => self.d.clear_background(color(*c)),
            DrawCommand::Sprite {
                key,
                rect,
                rotation,
                flip_h,
                tint,
            } => {
                let center = rect.center();
                let dest = Rectangle::new(center.x, center.y, rect.size.x, rect.size.y);
                let origin = vector(rect.size * 0.5);
                match self.textures.get(key) {
                    Some(texture) => {
                        let w = texture.width as f32;
                        let src = Rectangle::new(0.0, 0.0, if *flip_h { -w } else { w }, texture.height as f32);
                        self.d.draw_texture_pro(texture, src, dest, origin, *rotation, color(*tint));
                    }
                    None => self.d.draw_rectangle_pro(dest, origin, *rotation, color(*tint)),
                }
            }
            DrawCommand::Rect { rect, color: c, filled } => {
                let r = Rectangle::new(rect.pos.x, rect.pos.y, rect.size.x, rect.size.y);
                if *filled {
                    self.d.draw_rectangle_rec(r, color(*c));
                } else {
                    self.d.draw_rectangle_lines_ex(r, 1.0, color(*c));
                }
            }
            DrawCommand::Line {
                from,
                to,
                thickness,
                color: c,
            } => self.d.draw_line_ex(vector(*from), vector(*to), *thickness, color(*c)),
            DrawCommand::Circle {
                center,
                radius,
                color: c,
                filled,
            } => {
                if *filled {
                    self.d.draw_circle_v(vector(*center), *radius, color(*c));
                } else {
                    self.d
                        .draw_circle_lines(center.x as i32, center.y as i32, *radius, color(*c));
                }
            }
            DrawCommand::Arc {
                center,
                radius,
                start,
                end,
                color: c,
            } => self.d.draw_ring_lines(
                vector(*center),
                (*radius - 1.0).max(0.0),
                *radius,
                *start,
                *end,
                24,
                color(*c),
            ),
            DrawCommand::Text {
                text,
                pos,
                size,
                color: c,
            } => self
                .d
                .draw_text(text, pos.x as i32, pos.y as i32, *size as i32, color(*c)),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        log::warn!("{}; using defaults", e);
    }
    if let Some(level) = cli.level {
        config.start_level = level.max(1);
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config.debug |= cli.debug;

    log::info!("Angelfall starting");
    // --------------- Raylib window & assets ---------------
    let (window_width, window_height) = config.window_size();
    let mut builder = raylib::init();
    builder
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title("Angelfall");
    if config.vsync {
        builder.vsync();
    }
    if config.fullscreen {
        builder.fullscreen();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);
    // Disable ESC to exit
    rl.set_exit_key(None);

    let (render_width, render_height) = config.render_size();
    let mut render_target = match rl.load_render_texture(&thread, render_width, render_height) {
        Ok(target) => target,
        Err(e) => {
            log::error!("Failed to create render target: {}", e);
            std::process::exit(1);
        }
    };
    let textures = load_textures(&mut rl, &thread, Path::new("./assets/textures"));

    // --------------- ECS world ---------------
    let library = LevelLibrary::from_dir(&config.levels_dir);
    let save_slot = SaveSlot::new(JsonFileStore::new(&config.save_path));
    let mut world = game::build_world(&config, library, save_slot);
    let mut update = game::build_update_schedule();

    let render_size = Vec2::new(render_width as f32, render_height as f32);

    // --------------- Main loop ---------------
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        let input = sample_input(&rl, render_size);
        game::step(&mut world, &mut update, dt, input);

        let screen_w = rl.get_screen_width() as f32;
        let screen_h = rl.get_screen_height() as f32;
        let mut d = rl.begin_drawing(&thread);
        {
            let mut target = d.begin_texture_mode(&thread, &mut render_target);
            let mut renderer = RaylibRenderer {
                d: &mut target,
                textures: &textures,
            };
            world.resource::<DrawList>().render(&mut renderer);
        }
        d.clear_background(Color::BLACK);
        // Render textures are stored upside down.
        let src = Rectangle::new(0.0, 0.0, render_size.x, -render_size.y);
        let dest = Rectangle::new(0.0, 0.0, screen_w, screen_h);
        d.draw_texture_pro(&render_target, src, dest, Vector2::zero(), 0.0, Color::WHITE);
    }
}
