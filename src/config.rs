//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`ATOM_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use atomviz_core::{Color, Fog, Vec3};
use atomviz_input::OrbitControls;
use atomviz_render::PerspectiveCamera;

use crate::scene::{ElectronConfig, NucleusGenerator};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Orbit camera controls
    #[serde(default)]
    pub controls: ControlsConfig,
    /// Atom scene
    #[serde(default)]
    pub atom: AtomConfig,
    /// Smoke-test scene
    #[serde(default)]
    pub smoke: SmokeConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`ATOM_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // ATOM_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("ATOM_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Load configuration, falling back to defaults on error
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Atom".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Orbit controls configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub enabled: bool,
    /// Radians of orbit per pixel of drag
    pub rotate_speed: f32,
    /// Distance multiplier per wheel line
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rotate_speed: 0.005,
            zoom_speed: 0.95,
            min_distance: 1.0,
            max_distance: 80.0,
        }
    }
}

impl ControlsConfig {
    /// Check speeds and distance limits before they reach the controls
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.rotate_speed.is_finite() {
            return Err(ConfigError::invalid("controls.rotate_speed", self.rotate_speed));
        }
        if !self.zoom_speed.is_finite() || self.zoom_speed <= 0.0 {
            return Err(ConfigError::invalid("controls.zoom_speed", self.zoom_speed));
        }
        if !self.min_distance.is_finite() || self.min_distance < 0.0 {
            return Err(ConfigError::invalid("controls.min_distance", self.min_distance));
        }
        // max_distance may be infinite (no limit)
        if self.max_distance.is_nan() || self.max_distance < self.min_distance {
            return Err(ConfigError::invalid("controls.max_distance", self.max_distance));
        }
        Ok(())
    }

    /// Build orbit controls, falling back to defaults if the section is invalid
    pub fn build(&self) -> OrbitControls {
        if let Err(e) = self.validate() {
            log::warn!("{}, using default controls", e);
            return Self::default().build();
        }
        let mut controls = OrbitControls::new()
            .with_rotate_speed(self.rotate_speed)
            .with_zoom_speed(self.zoom_speed)
            .with_distance_limits(self.min_distance, self.max_distance);
        controls.enabled = self.enabled;
        controls
    }
}

/// Perspective camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Starting position [x, y, z]
    pub position: [f32; 3],
    /// Point the camera looks at [x, y, z]
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self::atom()
    }
}

impl CameraConfig {
    /// Camera for the atom scene
    pub fn atom() -> Self {
        Self {
            fov: 40.0,
            near: 0.1,
            far: 100.0,
            position: [16.0, 10.0, 12.0],
            target: [0.0, 0.0, 0.0],
        }
    }

    /// Camera for the smoke-test scene
    pub fn smoke() -> Self {
        Self {
            fov: 70.0,
            near: 0.01,
            far: 10.0,
            position: [0.0, 0.0, 1.0],
            target: [0.0, 0.0, 0.0],
        }
    }

    pub fn build(&self, aspect: f32) -> PerspectiveCamera {
        PerspectiveCamera::new(self.fov, aspect, self.near, self.far)
            .with_position(Vec3::from_array(self.position))
            .looking_at(Vec3::from_array(self.target))
    }
}

/// Linear fog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FogConfig {
    pub enabled: bool,
    pub color: Color,
    pub near: f32,
    pub far: f32,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            color: Color::from_hex(0x090b33),
            near: 5.0,
            far: 50.0,
        }
    }
}

impl FogConfig {
    pub fn build(&self) -> Option<Fog> {
        self.enabled.then(|| Fog::new(self.color, self.near, self.far))
    }
}

/// Atom scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AtomConfig {
    pub nucleus: NucleusGenerator,
    /// One entry per electron; planes are assigned XY, XZ, YZ in order
    pub electrons: Vec<ElectronConfig>,
    /// Radians added to the nucleus Y rotation per frame
    pub nucleus_spin: f32,
    pub camera: CameraConfig,
    pub fog: FogConfig,
    /// Seed for random electron angles (random when unset)
    pub seed: Option<u64>,
}

impl Default for AtomConfig {
    fn default() -> Self {
        Self {
            nucleus: NucleusGenerator::default(),
            electrons: (1..=3)
                .map(|i| ElectronConfig::named(format!("electron{}", i)))
                .collect(),
            nucleus_spin: 0.002,
            camera: CameraConfig::atom(),
            fog: FogConfig::default(),
            seed: None,
        }
    }
}

/// Smoke-test scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmokeConfig {
    /// Cube edge length
    pub cube_size: f32,
    /// Radians added to the cube X and Y rotation per frame
    pub spin: f32,
    pub camera: CameraConfig,
    pub fog: FogConfig,
    pub light_color: Color,
    pub light_intensity: f32,
    /// Point light range (0 = unlimited)
    pub light_distance: f32,
    pub light_position: [f32; 3],
    pub ambient_intensity: f32,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            cube_size: 0.2,
            spin: 0.01,
            camera: CameraConfig::smoke(),
            fog: FogConfig::default(),
            light_color: Color::RED,
            light_intensity: 5.0,
            light_distance: 100.0,
            light_position: [50.0, 50.0, 50.0],
            ambient_intensity: 0.3,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Clear color
    pub background: Color,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl ConfigError {
    fn invalid(field: &str, value: impl std::fmt::Display) -> Self {
        ConfigError {
            message: format!("invalid value {} for {}", value, field),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
