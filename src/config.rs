use std::path::{Path, PathBuf};

use egui::Color32;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::BackgroundMode;
use crate::palette::{self, BACKGROUND_COLORS, PEN_COLORS, STANDALONE_BACKGROUND};

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV_VAR: &str = "EFRAME_ANNOTATE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Board settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Swatches offered for the pen.
    pub pen_colors: Vec<String>,
    /// Swatches offered for the background.
    pub background_colors: Vec<String>,
    /// Starting pen color.
    pub pen_color: String,
    /// Starting pen width.
    pub pen_width: f32,
    /// Range of the width slider.
    pub min_width: f32,
    pub max_width: f32,
    /// Used when no saved document provides one.
    pub background_color: String,
    /// Overlay mode: the board floats over other windows, so `off` really is
    /// see-through and the background starts switched off.
    pub transparent: bool,
    /// Alpha of the `transparent-solid` background.
    pub transparency: f32,
    /// Where the file persistence keeps its document.
    pub state_dir: Option<PathBuf>,
    /// Save after every committed change.
    pub save_enabled: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            pen_colors: PEN_COLORS.iter().map(|c| c.to_string()).collect(),
            background_colors: BACKGROUND_COLORS.iter().map(|c| c.to_string()).collect(),
            pen_color: "#FFFFFF".into(),
            pen_width: 5.0,
            min_width: 1.0,
            max_width: 50.0,
            background_color: palette::to_hex(STANDALONE_BACKGROUND),
            transparent: false,
            transparency: 0.3,
            state_dir: None,
            save_enabled: true,
        }
    }
}

impl BoardConfig {
    /// Read and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: BoardConfig = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file named by [`CONFIG_ENV_VAR`], falling back to defaults.
    pub fn load() -> Self {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load_or_default(Path::new(&path)),
            None => Self::default(),
        }
    }

    /// Like [`BoardConfig::from_file`] but never fails; problems are logged.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                warn!("{}; using defaults", err);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_width > 0.0 && self.min_width <= self.max_width) {
            return Err(ConfigError::Invalid(format!(
                "width range {}..={} is empty or not positive",
                self.min_width, self.max_width
            )));
        }
        if !(self.min_width..=self.max_width).contains(&self.pen_width) {
            return Err(ConfigError::Invalid(format!(
                "pen width {} is outside {}..={}",
                self.pen_width, self.min_width, self.max_width
            )));
        }
        if !(0.0..=1.0).contains(&self.transparency) {
            return Err(ConfigError::Invalid(format!("transparency {} is not in 0..=1", self.transparency)));
        }
        for text in [&self.pen_color, &self.background_color]
            .into_iter()
            .chain(&self.pen_colors)
            .chain(&self.background_colors)
        {
            palette::parse_hex(text).map_err(|err| ConfigError::Invalid(err.to_string()))?;
        }
        Ok(())
    }

    pub fn pen_color(&self) -> Color32 {
        palette::parse_hex(&self.pen_color).unwrap_or(Color32::WHITE)
    }

    pub fn background_color(&self) -> Color32 {
        palette::parse_hex(&self.background_color).unwrap_or(STANDALONE_BACKGROUND)
    }

    /// Parsed pen swatches; unparsable entries are skipped.
    pub fn pen_swatches(&self) -> Vec<Color32> {
        swatches(&self.pen_colors)
    }

    pub fn background_swatches(&self) -> Vec<Color32> {
        swatches(&self.background_colors)
    }

    /// Overlays start with the background off, standalone boards opaque.
    pub fn initial_background_mode(&self) -> BackgroundMode {
        if self.transparent {
            BackgroundMode::Off
        } else {
            BackgroundMode::OpaqueSolid
        }
    }

    pub fn clamp_width(&self, width: f32) -> f32 {
        width.clamp(self.min_width, self.max_width)
    }
}

fn swatches(colors: &[String]) -> Vec<Color32> {
    colors.iter().filter_map(|c| palette::parse_hex(c).ok()).collect()
}
