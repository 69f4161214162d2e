//! Game configuration resource.
//!
//! Manages game settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [render]
//! width = 480
//! height = 270
//!
//! [window]
//! width = 960
//! height = 540
//! fullscreen = false
//! vsync = true
//! target_fps = 60
//!
//! [game]
//! camera_smoothing = 1.0
//! levels_dir = ./assets/levels
//! save_path = ./save-data/data.json
//! start_level = 1
//! seed = 1234
//!
//! [debug]
//! enabled = false
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_RENDER_WIDTH: u32 = 480;
const DEFAULT_RENDER_HEIGHT: u32 = 270;
const DEFAULT_WINDOW_WIDTH: u32 = 960;
const DEFAULT_WINDOW_HEIGHT: u32 = 540;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_FULLSCREEN: bool = false;
const DEFAULT_CAMERA_SMOOTHING: f32 = 1.0;
const DEFAULT_LEVELS_DIR: &str = "./assets/levels";
const DEFAULT_SAVE_PATH: &str = "./save-data/data.json";
const DEFAULT_START_LEVEL: u32 = 1;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
///
/// Stores render resolution, window settings and the gameplay paths.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Logical render width in pixels (camera viewport).
    pub render_width: u32,
    /// Logical render height in pixels (camera viewport).
    pub render_height: u32,
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Enable vertical sync.
    pub vsync: bool,
    /// Start in fullscreen mode.
    pub fullscreen: bool,
    /// Fraction of the remaining distance the camera covers per frame.
    pub camera_smoothing: f32,
    /// Directory holding `level_<n>.json` files.
    pub levels_dir: PathBuf,
    /// Save file location.
    pub save_path: PathBuf,
    /// Level entered at start, clamped to the max unlocked level.
    pub start_level: u32,
    /// Fixed RNG seed; random when unset.
    pub seed: Option<u64>,
    /// Start with debug overlays enabled.
    pub debug: bool,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            render_width: DEFAULT_RENDER_WIDTH,
            render_height: DEFAULT_RENDER_HEIGHT,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            fullscreen: DEFAULT_FULLSCREEN,
            camera_smoothing: DEFAULT_CAMERA_SMOOTHING,
            levels_dir: PathBuf::from(DEFAULT_LEVELS_DIR),
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            start_level: DEFAULT_START_LEVEL,
            seed: None,
            debug: false,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [render] section
        if let Some(width) = config.getuint("render", "width").ok().flatten() {
            self.render_width = width as u32;
        }
        if let Some(height) = config.getuint("render", "height").ok().flatten() {
            self.render_height = height as u32;
        }

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = vsync;
        }
        if let Some(fullscreen) = config.getbool("window", "fullscreen").ok().flatten() {
            self.fullscreen = fullscreen;
        }

        // [game] section
        if let Some(smoothing) = config.getfloat("game", "camera_smoothing").ok().flatten() {
            self.camera_smoothing = smoothing as f32;
        }
        if let Some(dir) = config.get("game", "levels_dir") {
            self.levels_dir = PathBuf::from(dir);
        }
        if let Some(path) = config.get("game", "save_path") {
            self.save_path = PathBuf::from(path);
        }
        if let Some(level) = config.getuint("game", "start_level").ok().flatten() {
            self.start_level = (level as u32).max(1);
        }
        if let Some(seed) = config.getuint("game", "seed").ok().flatten() {
            self.seed = Some(seed);
        }

        // [debug] section
        if let Some(enabled) = config.getbool("debug", "enabled").ok().flatten() {
            self.debug = enabled;
        }

        info!(
            "Loaded config: {}x{} render, {}x{} window, fps={}, vsync={}, fullscreen={}, levels={:?}, save={:?}",
            self.render_width,
            self.render_height,
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.fullscreen,
            self.levels_dir,
            self.save_path
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [render] section
        config.set("render", "width", Some(self.render_width.to_string()));
        config.set("render", "height", Some(self.render_height.to_string()));

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "vsync", Some(self.vsync.to_string()));
        config.set("window", "fullscreen", Some(self.fullscreen.to_string()));

        // [game] section
        config.set(
            "game",
            "camera_smoothing",
            Some(self.camera_smoothing.to_string()),
        );
        config.set(
            "game",
            "levels_dir",
            Some(self.levels_dir.to_string_lossy().into_owned()),
        );
        config.set(
            "game",
            "save_path",
            Some(self.save_path.to_string_lossy().into_owned()),
        );
        config.set("game", "start_level", Some(self.start_level.to_string()));
        if let Some(seed) = self.seed {
            config.set("game", "seed", Some(seed.to_string()));
        }

        // [debug] section
        config.set("debug", "enabled", Some(self.debug.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    /// Get the logical render size.
    pub fn render_size(&self) -> (u32, u32) {
        (self.render_width, self.render_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_an_error_and_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = GameConfig::with_path(dir.path().join("nope.ini"));
        assert!(config.load_from_file().is_err());
        assert_eq!(config.render_size(), (480, 270));
        assert_eq!(config.start_level, 1);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[game]\nstart_level = 2\nseed = 99\n[debug]\nenabled = true").unwrap();
        drop(file);

        let mut config = GameConfig::with_path(&path);
        config.load_from_file().unwrap();
        assert_eq!(config.start_level, 2);
        assert_eq!(config.seed, Some(99));
        assert!(config.debug);
        assert_eq!(config.window_size(), (960, 540));
        assert_eq!(config.levels_dir, PathBuf::from("./assets/levels"));
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        let mut config = GameConfig::with_path(&path);
        config.render_width = 320;
        config.camera_smoothing = 0.5;
        config.levels_dir = PathBuf::from("levels");
        config.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded.render_width, 320);
        assert_eq!(loaded.camera_smoothing, 0.5);
        assert_eq!(loaded.levels_dir, PathBuf::from("levels"));
    }
}
