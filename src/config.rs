use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::{TopologyError, UniverseTopology};
use crate::math::Vec3;
use crate::render::ToneMapping;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("width and height must be positive")]
    InvalidDimensions,
    #[error("frames array must not be empty")]
    NoFrames,
    #[error("outputPath '{0}' must include a parent directory")]
    MissingOutputParent(String),
    #[error("output directory does not exist: {}", .0.display())]
    OutputDirectoryMissing(PathBuf),
    #[error("{0} must contain finite values")]
    NonFiniteVector(&'static str),
    #[error("camera position must differ from camera target")]
    DegenerateCamera,
    #[error("camera.up must not be parallel to the view direction")]
    CameraUpParallelToView,
    #[error("fovDeg must lie in (0, 180), got {0}")]
    InvalidFov(f32),
    #[error("maxSteps must be at least 1")]
    NoMarchSteps,
    #[error("invalid march settings: {0}")]
    InvalidMarch(String),
    #[error("invalid light: {0}")]
    InvalidLight(String),
    #[error("invalid shading: {0}")]
    InvalidShading(String),
    #[error(transparent)]
    Topology(#[from] TopologyError),
    #[error("camera position {position:?} is not inside a universe of radius {radius}")]
    CameraOutsideUniverse { position: [f32; 3], radius: f32 },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    #[serde(default = "default_up")]
    pub up: [f32; 3],
    #[serde(default = "default_fov_deg")]
    pub fov_deg: f32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UniverseConfig {
    pub radius: f32,
    pub epsilon: f32,
    pub max_distance: f32,
    pub max_steps: u32,
    pub fog_color: [f32; 3],
    pub crystal_color: [f32; 3],
    pub light_direction: [f32; 3],
    pub light_color: [f32; 3],
    pub diffuse_intensity: f32,
    pub specular_intensity: f32,
    pub shininess: f32,
    pub tone_mapping: String,
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            radius: 450.0,
            epsilon: 0.001,
            max_distance: 1_000.0,
            max_steps: 120,
            fog_color: hex_to_array(0x101030),
            crystal_color: hex_to_array(0x87ceeb),
            light_direction: [1.0, 1.0, 1.0],
            light_color: [1.0, 1.0, 1.0],
            diffuse_intensity: 0.5,
            specular_intensity: 3.0,
            shininess: 16.0,
            tone_mapping: "clamp".into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameConfig {
    pub output_path: String,
    /// World-space displacement applied to the camera before this frame.
    #[serde(default)]
    pub movement: [f32; 3],
    #[serde(default)]
    pub time: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightConfig {
    pub width: u32,
    pub height: u32,
    pub camera: CameraConfig,
    #[serde(default)]
    pub universe: UniverseConfig,
    pub frames: Vec<FrameConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleFrameConfig {
    pub width: u32,
    pub height: u32,
    pub output_path: String,
    pub camera: CameraConfig,
    #[serde(default)]
    pub universe: UniverseConfig,
    #[serde(default)]
    pub time: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IncomingConfig {
    Flight(FlightConfig),
    Single(SingleFrameConfig),
}

impl IncomingConfig {
    pub fn into_flight(self) -> FlightConfig {
        match self {
            Self::Flight(flight) => flight,
            Self::Single(single) => FlightConfig {
                width: single.width,
                height: single.height,
                camera: single.camera,
                universe: single.universe,
                frames: vec![FrameConfig {
                    output_path: single.output_path,
                    movement: [0.0; 3],
                    time: single.time,
                }],
            },
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct DebugOptions {
    pub hide_crystal: bool,
}

impl DebugOptions {
    pub fn from_env() -> Self {
        let hide_crystal = std::env::var("HYPERSPHERE_HIDE_CRYSTAL")
            .ok()
            .and_then(|raw| parse_bool(&raw))
            .unwrap_or(false);

        Self { hide_crystal }
    }
}

fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

const fn default_fov_deg() -> f32 {
    45.0
}

fn hex_to_array(hex: u32) -> [f32; 3] {
    let color = Vec3::from_hex_rgb(hex);
    [color.x, color.y, color.z]
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn validate_config(config: &FlightConfig) -> Result<(), ConfigError> {
    if config.width == 0 || config.height == 0 {
        return Err(ConfigError::InvalidDimensions);
    }

    if config.frames.is_empty() {
        return Err(ConfigError::NoFrames);
    }

    for frame in &config.frames {
        validate_output_path(&frame.output_path)?;
        if !is_finite_vec3(frame.movement) {
            return Err(ConfigError::NonFiniteVector("movement"));
        }
    }

    let camera = &config.camera;
    for (name, value) in [
        ("camera.position", camera.position),
        ("camera.target", camera.target),
        ("camera.up", camera.up),
    ] {
        if !is_finite_vec3(value) {
            return Err(ConfigError::NonFiniteVector(name));
        }
    }
    let view = vec3_from(camera.target) - vec3_from(camera.position);
    if view.length() < 0.0001 {
        return Err(ConfigError::DegenerateCamera);
    }
    if view.normalize().cross(vec3_from(camera.up).normalize()).length() < 0.0001 {
        return Err(ConfigError::CameraUpParallelToView);
    }
    if !(camera.fov_deg > 0.0 && camera.fov_deg < 180.0) {
        return Err(ConfigError::InvalidFov(camera.fov_deg));
    }

    let universe = &config.universe;
    UniverseTopology::new(universe.radius)?;
    if universe.max_steps == 0 {
        return Err(ConfigError::NoMarchSteps);
    }
    for (name, value) in [
        ("universe.fogColor", universe.fog_color),
        ("universe.crystalColor", universe.crystal_color),
        ("universe.lightDirection", universe.light_direction),
        ("universe.lightColor", universe.light_color),
    ] {
        if !is_finite_vec3(value) {
            return Err(ConfigError::NonFiniteVector(name));
        }
    }
    if ToneMapping::parse(&universe.tone_mapping).is_none() {
        return Err(ConfigError::InvalidShading(format!(
            "toneMapping must be 'clamp' or 'filmic', got '{}'",
            universe.tone_mapping
        )));
    }

    Ok(())
}

fn validate_output_path(output_path: &str) -> Result<(), ConfigError> {
    let output_parent = Path::new(output_path)
        .parent()
        .ok_or_else(|| ConfigError::MissingOutputParent(output_path.to_string()))?;

    // A bare file name has an empty parent, meaning the working directory.
    if !output_parent.as_os_str().is_empty() && !output_parent.exists() {
        return Err(ConfigError::OutputDirectoryMissing(output_parent.to_path_buf()));
    }

    Ok(())
}

pub fn vec3_from(value: [f32; 3]) -> Vec3 {
    Vec3::from_array(value)
}

fn is_finite_vec3(value: [f32; 3]) -> bool {
    vec3_from(value).is_finite()
}
