use std::path::{
    Path,
    PathBuf,
};

use serde::Deserialize;

use crate::camera::CameraOptions;
use crate::error::{
    Error,
    Result,
};

pub const CONFIG_FILE : &str = "opengl-by-example.toml";
pub const CONFIG_ENV : &str = "OPENGL_BY_EXAMPLE_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window : WindowConfig,
    pub camera : CameraConfig,
    pub assets : AssetConfig,
    pub clear_color : [f32; 4],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window : WindowConfig::default(),
            camera : CameraConfig::default(),
            assets : AssetConfig::default(),
            clear_color : [0.2, 0.3, 0.3, 1.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title : String,
    pub width : u32,
    pub height : u32,
    pub vsync : bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title : "LearnOpenGL".to_string(),
            width : 800,
            height : 600,
            vsync : true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position : [f32; 3],
    pub movement_speed : f32,
    pub mouse_sensitivity : f32,
    /// use relative device motion instead of cursor positions
    pub raw_mouse : bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let options = CameraOptions::default();

        Self {
            position : [0.0, 0.0, 3.0],
            movement_speed : options.movement_speed,
            mouse_sensitivity : options.mouse_sensitivity,
            raw_mouse : true,
        }
    }
}

impl CameraConfig {
    pub fn options(&self) -> CameraOptions {
        CameraOptions {
            movement_speed : self.movement_speed,
            mouse_sensitivity : self.mouse_sensitivity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub textures : [PathBuf; 2],
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            textures : [
                PathBuf::from("resources/textures/container.jpg"),
                PathBuf::from("resources/textures/grunge-scratch.png"),
            ],
        }
    }
}

impl Config {
    /// Reads `$OPENGL_BY_EXAMPLE_CONFIG`, or `opengl-by-example.toml` in the
    /// working directory. A missing file gives the defaults.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        Self::from_file(&path)
    }

    pub fn from_file(path : &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path : path.to_owned(),
            source,
        })?;

        let config = Self::parse(&s).map_err(|source| Error::Config {
            path : path.to_owned(),
            source,
        })?;

        log::info!("loaded config from {}", path.display());

        Ok(config)
    }

    pub fn parse(s : &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}
