//! Runner settings: an optional JSON file plus environment overrides.
//!
//! Environment:
//! - `VOXTRIS_CONFIG`: settings file (skipped when unset)
//! - `VOXTRIS_KEYMAP`: key-binding file (default `voxtris-keys.json`)
//! - `VOXTRIS_SEED`: overrides the seed
//! - `VOXTRIS_LOG_FILE`: log destination (default `<tmp>/voxtris.log`)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::input::keyboard::DEFAULT_KEY_RELEASE_TIMEOUT_MS;
use crate::types::{Extent, GameConfig, KEY_REPEAT_MS};

pub const CONFIG_ENV: &str = "VOXTRIS_CONFIG";
pub const KEYMAP_ENV: &str = "VOXTRIS_KEYMAP";
pub const SEED_ENV: &str = "VOXTRIS_SEED";
pub const LOG_FILE_ENV: &str = "VOXTRIS_LOG_FILE";

const DEFAULT_KEYMAP: &str = "voxtris-keys.json";

/// Everything the terminal runner can be tuned with.
///
/// Every field is optional in the file; missing ones keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub width: u16,
    pub height: u16,
    pub depth: u16,
    /// Starting gravity in cells per second (negative = down)
    pub initial_velocity: f32,
    pub speedup_per_row: f32,
    pub spawn_headroom: i32,
    pub seed: u32,
    /// Auto-repeat period for held translation keys
    pub repeat_ms: u32,
    /// Release a key after this long without a press/repeat event; 0 = never
    pub key_release_timeout_ms: u32,
    /// Camera turn per arrow key press, in degrees
    pub view_step_deg: f32,
    pub keymap: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        let config = GameConfig::default();
        Self {
            width: config.extent.width,
            height: config.extent.height,
            depth: config.extent.depth,
            initial_velocity: config.initial_velocity,
            speedup_per_row: config.speedup_per_row,
            spawn_headroom: config.spawn_headroom,
            seed: config.seed,
            repeat_ms: KEY_REPEAT_MS,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            view_step_deg: 90.0,
            keymap: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json).context("parse settings")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("read settings from {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("in {}", path.display()))
    }

    /// Settings file named by `VOXTRIS_CONFIG` (or defaults), then env overrides.
    pub fn from_env() -> Result<Self> {
        let mut settings = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path))?,
            None => Self::default(),
        };

        if let Some(path) = std::env::var_os(KEYMAP_ENV) {
            settings.keymap = Some(PathBuf::from(path));
        }
        if let Ok(seed) = std::env::var(SEED_ENV) {
            match seed.trim().parse() {
                Ok(seed) => settings.seed = seed,
                Err(e) => warn!("ignoring {SEED_ENV}={seed:?}: {e}"),
            }
        }
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 || self.depth == 0 {
            bail!(
                "field dimensions must be non-zero, got {}x{}x{}",
                self.width,
                self.height,
                self.depth
            );
        }
        if !self.initial_velocity.is_finite() || !self.speedup_per_row.is_finite() {
            bail!("velocities must be finite numbers");
        }
        if self.initial_velocity >= 0.0 {
            bail!(
                "initial_velocity must be negative (downward), got {}",
                self.initial_velocity
            );
        }
        // The I piece reaches two cells below its pivot.
        if self.spawn_headroom < 2 {
            bail!(
                "spawn_headroom must be at least 2 to spawn above the field, got {}",
                self.spawn_headroom
            );
        }
        Ok(())
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            extent: Extent::new(self.width, self.height, self.depth),
            initial_velocity: self.initial_velocity,
            speedup_per_row: self.speedup_per_row,
            spawn_headroom: self.spawn_headroom,
            seed: self.seed,
        }
    }

    pub fn keymap_path(&self) -> PathBuf {
        self.keymap
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_KEYMAP))
    }

    pub fn view_step_radians(&self) -> f32 {
        self.view_step_deg.to_radians()
    }
}

/// Log file from `VOXTRIS_LOG_FILE`, or `voxtris.log` in the temp dir
pub fn log_file_path() -> PathBuf {
    std::env::var_os(LOG_FILE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("voxtris.log"))
}
